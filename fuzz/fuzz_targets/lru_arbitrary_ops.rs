#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCache;
use lrukit::traits::LruCacheTrait;

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity; the rest are (op, key) pairs over put, get,
// peek, contains, peek_lru and recency_rank. Invariants are checked after
// every operation.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let op = pair[0] % 6;
        let key = pair[1];
        let value = step as u32;

        match op {
            0 => {
                // put
                let existed = cache.contains(&key);
                let old_len = cache.len();
                let previous = cache.put(key, value);

                assert_eq!(previous.is_some(), existed);
                assert_eq!(cache.recency_rank(&key), Some(0));
                if existed || old_len < capacity {
                    assert_eq!(cache.len(), old_len + usize::from(!existed));
                } else {
                    assert_eq!(cache.len(), capacity);
                }
            }
            1 => {
                // get
                let before = cache.snapshot();
                match cache.get(&key).copied() {
                    Some(v) => {
                        assert_eq!(cache.snapshot()[0], v);
                    }
                    None => {
                        assert_eq!(cache.snapshot(), before);
                    }
                }
            }
            2 => {
                // peek (read-only)
                let before = cache.snapshot();
                let _ = cache.peek(&key);
                assert_eq!(cache.snapshot(), before);
            }
            3 => {
                // contains
                assert_eq!(cache.contains(&key), cache.peek(&key).is_some());
            }
            4 => {
                // peek_lru
                let last = cache.snapshot().last().copied();
                assert_eq!(cache.peek_lru().map(|(_, v)| *v), last);
            }
            5 => {
                // recency_rank
                if let Some(rank) = cache.recency_rank(&key) {
                    assert!(rank < cache.len());
                }
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated after step {}: {}", step, err);
        }
    }
});
