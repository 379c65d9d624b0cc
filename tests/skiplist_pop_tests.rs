// Skip List: pop_first / pop_last drain the ends

use skiplist_engine::SkipList;

fn counted(limit: u64) -> SkipList<u64, u64> {
    let mut sl = SkipList::seeded(31);
    // Insert in a scrambled order so the ends aren't the insertion ends.
    for i in 0..limit {
        let k = (i * 7919) % limit;
        sl.add(k, k * 10).unwrap();
    }
    sl
}

// =============================================================================
// Test 1: Empty list pops nothing
// =============================================================================
#[test]
fn pop_on_empty_is_none() {
    let mut sl: SkipList<u64, u64> = SkipList::seeded(31);
    assert_eq!(sl.pop_first(), None);
    assert_eq!(sl.pop_last(), None);
    assert!(sl.is_empty());
}

// =============================================================================
// Test 2: pop_first drains in ascending order
// =============================================================================
#[test]
fn pop_first_drains_ascending() {
    let limit = 1_000;
    let mut sl = counted(limit);

    for expected in 0..limit {
        assert_eq!(sl.pop_first(), Some((expected, expected * 10)));
        assert_eq!(sl.len(), (limit - expected - 1) as usize);
    }
    assert_eq!(sl.pop_first(), None);
    assert_eq!(sl.stats().height, 0);
    sl.check().unwrap();
}

// =============================================================================
// Test 3: pop_last drains in descending order
// =============================================================================
#[test]
fn pop_last_drains_descending() {
    let limit = 1_000;
    let mut sl = counted(limit);

    for expected in (0..limit).rev() {
        assert_eq!(sl.pop_last(), Some((expected, expected * 10)));
    }
    assert_eq!(sl.pop_last(), None);
    assert!(sl.is_empty());
    sl.check().unwrap();
}

// =============================================================================
// Test 4: Alternating ends meet in the middle
// =============================================================================
#[test]
fn pop_both_ends() {
    let mut sl = counted(101);
    for i in 0..50 {
        assert_eq!(sl.pop_first().map(|(k, _)| k), Some(i));
        assert_eq!(sl.pop_last().map(|(k, _)| k), Some(100 - i));
        sl.check().unwrap();
    }
    assert_eq!(sl.len(), 1);
    assert_eq!(sl.first(), sl.last());
    assert_eq!(sl.pop_last(), Some((50, 500)));
}

// =============================================================================
// Test 5: Duplicate keys come off one at a time
// =============================================================================
#[test]
fn pop_takes_duplicates_singly() {
    let mut sl = SkipList::seeded(31);
    for v in 0..3 {
        sl.add("a", v).unwrap();
        sl.add("z", v).unwrap();
    }

    let mut fronts = Vec::new();
    let mut backs = Vec::new();
    for _ in 0..3 {
        fronts.push(sl.pop_first().unwrap());
        backs.push(sl.pop_last().unwrap());
    }
    assert!(fronts.iter().all(|(k, _)| *k == "a"));
    assert!(backs.iter().all(|(k, _)| *k == "z"));
    assert!(sl.is_empty());
}
