//! Integration Tests for the public cache API
//!
//! Exercises the crate through its re-exports only: eviction scenarios,
//! typed accessors, the registry and shared use across threads and tasks.

use std::sync::{Arc, Once};
use std::thread;

use typed_lru::{CacheError, CacheRegistry, Config, LruCache, Value, DEFAULT_CAPACITY};

// == Helper Functions ==

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "typed_lru=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

fn filled(capacity: usize, keys: &[&str]) -> LruCache {
    let cache = LruCache::new(capacity);
    for (i, key) in keys.iter().enumerate() {
        cache.set(*key, i as i64 + 1);
    }
    cache
}

// == Eviction Scenarios ==

#[test]
fn test_promoted_key_survives_eviction() {
    init_tracing();
    let cache = filled(3, &["a", "b", "c"]);

    assert_eq!(cache.get("a").unwrap(), Value::Int(1));

    let evicted = cache.set("d", 4i64);
    assert_eq!(evicted.map(|(k, _)| k), Some("b".to_string()));
    assert!(matches!(cache.get("b"), Err(CacheError::KeyNotFound(k)) if k == "b"));
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.keys(), vec!["d", "a", "c"]);
}

#[test]
fn test_flush_invalidates_everything() {
    init_tracing();
    let cache = LruCache::new(3);
    cache.set("a", true);
    assert!(cache.get_bool("a").unwrap());

    cache.flush();

    assert!(cache.get_bool("a").unwrap_err().is_not_found());
    assert!(cache.is_empty());
    assert_eq!(cache.stats().flushes, 1);
}

#[test]
fn test_eviction_follows_access_order() {
    let cache = filled(4, &["a", "b", "c", "d"]);

    // Touch in a new order: oldest to newest becomes c, a, d, b
    cache.get("c").unwrap();
    cache.get("a").unwrap();
    cache.set("d", 40i64);
    cache.get("b").unwrap();

    let mut victims = Vec::new();
    for key in ["w", "x", "y", "z"] {
        victims.extend(cache.set(key, 0i64).map(|(k, _)| k));
    }
    assert_eq!(victims, vec!["c", "a", "d", "b"]);
}

#[test]
fn test_reinsertion_keeps_count() {
    let cache = LruCache::new(3);
    cache.set("a", 1i64);
    cache.set("a", 2i64);
    cache.set("a", "three");

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get_str("a").unwrap(), "three");
}

#[test]
fn test_zero_capacity_falls_back_to_default() {
    let cache = LruCache::new(0);
    assert_eq!(cache.capacity(), DEFAULT_CAPACITY);

    for i in 0..DEFAULT_CAPACITY + 10 {
        cache.set(format!("k{i}"), i);
    }
    assert_eq!(cache.len(), DEFAULT_CAPACITY);
    assert_eq!(cache.stats().evictions, 10);
    assert!(!cache.contains("k9"));
    assert!(cache.contains("k10"));
}

// == Typed Accessors ==

#[test]
fn test_signed_minus_one_reads_as_max_unsigned() {
    let cache = LruCache::new(3);
    cache.set("a", -1i8);

    assert_eq!(cache.get_uint8("a").unwrap(), 255);
    assert_eq!(cache.get_int8("a").unwrap(), -1);
    assert_eq!(cache.get_int("a").unwrap(), -1);
}

#[test]
fn test_typed_errors_are_distinct() {
    let cache = LruCache::new(3);
    cache.set("flag", true);

    let missing = cache.get_int32("nope").unwrap_err();
    assert_eq!(missing, CacheError::KeyNotFound("nope".to_string()));

    let mismatch = cache.get_int32("flag").unwrap_err();
    assert!(mismatch.is_type_mismatch());
    assert!(cache.get_bool("flag").unwrap());
}

#[test]
fn test_stats_track_hits_and_misses() {
    let cache = LruCache::new(2);
    cache.set("a", 1i64);

    cache.get("a").unwrap();
    cache.get_int64("a").unwrap();
    let _ = cache.get("b");
    let _ = cache.peek("a");

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["total_entries"], 1);
}

// == Registry ==

#[test]
fn test_registry_shares_caches_by_name() {
    init_tracing();
    let registry = Arc::new(CacheRegistry::new(Config::new(2)));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let cache = registry.get_or_create("shared");
                cache.set(format!("t{i}"), i as u32);
                cache
            })
        })
        .collect();
    let caches: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(registry.len(), 1);
    assert!(caches.iter().all(|c| Arc::ptr_eq(c, &caches[0])));
    assert_eq!(caches[0].len(), 2);
}

// == Concurrency ==

#[test]
fn test_concurrent_threads_respect_capacity() {
    let cache = Arc::new(LruCache::new(16));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..500 {
                    let key = format!("k{}", (t * 7 + i) % 40);
                    cache.set(key.clone(), i as i64);
                    match cache.get_int64(&key) {
                        Ok(_) | Err(CacheError::KeyNotFound(_)) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                    if i % 97 == 0 {
                        cache.flush();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 16);
    assert_eq!(cache.keys().len(), cache.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_share_cache() {
    let cache = Arc::new(LruCache::new(8));

    let mut handles = Vec::new();
    for t in 0..16u64 {
        let cache = Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            for i in 0..100u64 {
                let key = format!("k{}", (t + i) % 12);
                cache.set(key.clone(), t * 1000 + i);
                let _ = cache.get_uint64(&key);
                tokio::task::yield_now().await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = cache.stats();
    assert_eq!(cache.len(), 8);
    assert_eq!(stats.total_entries, 8);
    assert_eq!(stats.hits + stats.misses, 1600);
}
