// Skip List: delete_all over runs of duplicate keys

use skiplist_engine::SkipList;

fn counted(limit: i64) -> SkipList<i64, i64> {
    let mut sl = SkipList::seeded(23);
    for i in 0..limit {
        sl.add(i, i).unwrap();
    }
    sl
}

// =============================================================================
// Test 1: One key, one removal
// =============================================================================
#[test]
fn trivial_delete_all() {
    let mut sl = SkipList::seeded(23);
    sl.add("foo", "bar").unwrap();

    let mut seen = Vec::new();
    let removed = sl.delete_all("foo", |k, v| seen.push((k, v)));

    assert_eq!(removed, 1);
    assert_eq!(seen, [("foo", "bar")]);
    assert!(sl.is_empty());
}

// =============================================================================
// Test 2: Absent key never calls back
// =============================================================================
#[test]
fn delete_all_absent_key() {
    let mut sl = counted(10);
    let mut calls = 0;
    assert_eq!(sl.delete_all(&42, |_, _| calls += 1), 0);
    assert_eq!(calls, 0);
    assert_eq!(sl.len(), 10);
}

// =============================================================================
// Test 3: Duplicates at the front
// =============================================================================
// 100 distinct keys plus 30 more copies of key 0: 31 pairs go, 99 stay.
#[test]
fn delete_all_duplicates_at_start() {
    let mut sl = counted(100);
    for _ in 0..30 {
        sl.add(0, -1).unwrap();
    }
    assert_eq!(sl.len(), 130);

    let mut calls = 0;
    let removed = sl.delete_all(&0, |k, _| {
        assert_eq!(k, 0);
        calls += 1;
    });

    assert_eq!(removed, 31);
    assert_eq!(calls, 31);
    assert_eq!(sl.len(), 99);
    assert!(!sl.contains(&0));
    assert_eq!(sl.first(), Some((&1, &1)));
    sl.check().unwrap();
}

// =============================================================================
// Test 4: Duplicates in the middle
// =============================================================================
#[test]
fn delete_all_duplicates_in_middle() {
    let limit = 10_000;
    let mut sl = counted(limit);
    for _ in 0..30 {
        sl.add(limit / 2, -1).unwrap();
    }

    let mut values = Vec::new();
    let removed = sl.delete_all(&(limit / 2), |_, v| values.push(v));

    assert_eq!(removed, 31);
    assert_eq!(values.iter().filter(|&&v| v == -1).count(), 30);
    assert!(values.contains(&(limit / 2)));
    assert_eq!(sl.len(), limit as usize - 1);
    assert!(sl.contains(&(limit / 2 - 1)));
    assert!(sl.contains(&(limit / 2 + 1)));
    sl.check().unwrap();
}

// =============================================================================
// Test 5: Duplicates at the end
// =============================================================================
#[test]
fn delete_all_duplicates_at_end() {
    let limit = 10_000;
    let mut sl = counted(limit);
    for _ in 0..30 {
        sl.add(limit - 1, -1).unwrap();
    }

    assert_eq!(sl.delete_all(&(limit - 1), |_, _| {}), 31);
    assert_eq!(sl.len(), limit as usize - 1);
    assert_eq!(sl.last(), Some((&(limit - 2), &(limit - 2))));
    sl.check().unwrap();
}

// =============================================================================
// Test 6: Plain delete takes one duplicate at a time
// =============================================================================
#[test]
fn delete_one_of_many() {
    let mut sl = SkipList::seeded(5);
    for v in 0..5 {
        sl.add("dup", v).unwrap();
    }

    let mut taken = Vec::new();
    while let Some(v) = sl.delete("dup") {
        taken.push(v);
        assert_eq!(sl.len(), 5 - taken.len());
    }
    taken.sort();
    assert_eq!(taken, [0, 1, 2, 3, 4]);
    assert_eq!(sl.stats().height, 0);
}
