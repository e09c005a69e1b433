// ==============================================
// LRU SCENARIO TESTS (integration)
// ==============================================

use lrukit::builder::LruCacheBuilder;
use lrukit::policy::lru::{IntLruCache, LruCache};
use lrukit::traits::{CoreCache, LruCacheTrait};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

mod demo_sequence {
    use super::*;

    #[test]
    fn test_fill_evict_and_touch() {
        let mut cache = IntLruCache::new(5);
        for k in 2..=7 {
            cache.put(k, k);
        }

        assert_eq!(cache.len(), 5);
        assert!(!cache.contains(&2));
        assert_eq!(cache.to_string(), "[7 6 5 4 3]");

        assert_eq!(cache.get(&5), Some(&5));
        assert_eq!(cache.to_string(), "[5 7 6 4 3]");
        assert_eq!(cache.peek_lru(), Some((&3, &3)));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_next_insert_evicts_touched_order_tail() {
        let mut cache = IntLruCache::new(5);
        for k in 2..=7 {
            cache.put(k, k);
        }
        cache.get(&5);
        cache.put(8, 8);
        assert_eq!(cache.to_string(), "[8 5 7 6 4]");
    }
}

mod generic_use {
    use super::*;

    fn warm<C: CoreCache<String, Vec<u8>>>(cache: &mut C, names: &[&str]) {
        for name in names {
            cache.put(name.to_string(), name.as_bytes().to_vec());
        }
    }

    #[test]
    fn test_works_through_core_cache_bound() {
        let mut cache = LruCacheBuilder::new(2).build();
        warm(&mut cache, &["a", "bb", "ccc"]);

        assert_eq!(CoreCache::len(&cache), 2);
        assert!(!CoreCache::contains(&cache, &"a".to_string()));
        assert_eq!(cache.get(&"bb".to_string()), Some(&b"bb".to_vec()));
    }

    #[test]
    fn test_non_clone_values() {
        struct Blob(#[allow(dead_code)] Vec<u8>);

        let mut cache: LruCache<u32, Blob> = LruCache::new(2);
        cache.put(1, Blob(vec![1]));
        cache.put(2, Blob(vec![2]));
        let old = cache.put(1, Blob(vec![3]));
        assert!(old.is_some());
        cache.put(3, Blob(vec![4]));
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
    }
}

mod workload {
    use super::*;

    #[test]
    fn test_random_workload_keeps_invariants() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut cache = LruCache::new(64);

        for step in 0..20_000u64 {
            let key = rng.random::<u64>() % 256;
            if rng.random::<u8>() % 3 == 0 {
                cache.put(key, step);
            } else {
                cache.get(&key);
            }
            assert!(cache.len() <= 64);
            if step % 1_000 == 0 {
                cache.check_invariants().unwrap();
            }
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_hot_keys_survive_scan() {
        let mut cache = LruCache::new(16);
        for hot in 0..4u32 {
            cache.put(hot, hot);
        }

        for cold in 100..1_000u32 {
            for hot in 0..4u32 {
                cache.get(&hot);
            }
            cache.put(cold, cold);
        }

        for hot in 0..4u32 {
            assert!(cache.contains(&hot), "hot key {} was evicted", hot);
        }
    }
}
