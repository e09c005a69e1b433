#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::{RecencyList, SlotId};

// Fuzz arbitrary operation sequences on RecencyList
//
// Tests random sequences of push_front, move_to_front, pop_back and lookups,
// verifying link symmetry after each step.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u8, u32> = RecencyList::new();
    let mut ids: Vec<SlotId> = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 4;
        let arg = pair[1];

        match op {
            0 => {
                // push_front
                let id = list.push_front(arg, u32::from(arg));
                ids.push(id);
                assert_eq!(list.front(), Some((&arg, &u32::from(arg))));
            }
            1 => {
                // move_to_front
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    if list.move_to_front(id) {
                        assert_eq!(list.ids().next(), Some(id));
                    }
                }
            }
            2 => {
                // pop_back
                let old_len = list.len();
                let expected = list.back().map(|(k, v)| (*k, *v));
                let popped = list.pop_back();
                assert_eq!(popped, expected);
                if popped.is_some() {
                    assert_eq!(list.len(), old_len - 1);
                }
            }
            3 => {
                // lookups (read-only)
                if !ids.is_empty() {
                    let id = ids[usize::from(arg) % ids.len()];
                    assert_eq!(list.contains(id), list.get(id).is_some());
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(list.iter().count(), list.len());
        if let Err(err) = list.check_links() {
            panic!("broken links: {}", err);
        }
    }
});
