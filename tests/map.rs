use rbtree_slab::RBTreeMap;

#[test]
pub fn entry_or_default_inserts_missing_key() {
	let mut map: RBTreeMap<i32, String> = RBTreeMap::new();
	map.insert(1, "1".to_string());
	map.insert(2, "2".to_string());

	map.entry(3).or_default().push('3');

	assert_eq!(map.len(), 3);
	assert_eq!(map[&3], "3");

	// an existing entry is left untouched.
	map.entry(1).or_default();
	assert_eq!(map[&1], "1");
}

#[test]
pub fn entry_and_modify() {
	let mut map: RBTreeMap<&str, usize> = RBTreeMap::new();

	map.entry("a").and_modify(|v| *v += 1).or_insert(10);
	assert_eq!(map["a"], 10);

	map.entry("a").and_modify(|v| *v += 1).or_insert(10);
	assert_eq!(map["a"], 11);
}

#[test]
pub fn entry_occupied_remove() {
	use rbtree_slab::generic::map::Entry;

	let mut map: RBTreeMap<i32, i32> = RBTreeMap::new();
	for i in 0..10 {
		map.insert(i, i);
	}

	match map.entry(5) {
		Entry::Occupied(entry) => {
			assert_eq!(entry.remove_entry(), (5, 5));
		}
		Entry::Vacant(_) => panic!("expected an occupied entry"),
	}

	assert_eq!(map.len(), 9);
	assert!(!map.contains_key(&5));
	map.validate();
}

#[test]
pub fn index_returns_value() {
	let mut map = RBTreeMap::new();
	map.insert("a", 1);
	assert_eq!(map["a"], 1);
}

#[test]
#[should_panic(expected = "no entry found for key")]
pub fn index_panics_on_missing_key() {
	let mut map = RBTreeMap::new();
	map.insert("a", 1);
	let _ = map["b"];
}

#[test]
pub fn merge_keeps_collisions_in_donor() {
	let mut a = RBTreeMap::new();
	a.insert(1, "a1");
	a.insert(2, "a2");
	a.insert(3, "a3");

	let mut b = RBTreeMap::new();
	b.insert(3, "b3");
	b.insert(4, "b4");
	b.insert(5, "b5");

	a.merge(&mut b);

	assert_eq!(a.len(), 5);
	assert_eq!(a[&3], "a3");
	assert_eq!(a[&4], "b4");
	assert_eq!(a[&5], "b5");

	assert_eq!(b.len(), 1);
	assert_eq!(b[&3], "b3");

	a.validate();
	b.validate();
}

#[test]
pub fn merge_into_empty_map() {
	let mut a: RBTreeMap<i32, i32> = RBTreeMap::new();
	let mut b = RBTreeMap::new();
	b.insert(1, 1);
	b.insert(2, 2);

	a.merge(&mut b);

	assert_eq!(a.len(), 2);
	assert!(b.is_empty());
	a.validate();
	b.validate();
}

#[test]
pub fn merge_from_empty_map() {
	let mut a = RBTreeMap::new();
	a.insert(1, 1);
	let mut b: RBTreeMap<i32, i32> = RBTreeMap::new();

	a.merge(&mut b);

	assert_eq!(a.len(), 1);
	assert!(b.is_empty());
}

#[test]
pub fn swap() {
	let mut a = RBTreeMap::new();
	a.insert(1, "a");
	let mut b = RBTreeMap::new();
	b.insert(2, "b");
	b.insert(3, "c");

	a.swap(&mut b);

	assert_eq!(a.len(), 2);
	assert_eq!(b.len(), 1);
	assert_eq!(a[&2], "b");
	assert_eq!(b[&1], "a");
	a.validate();
	b.validate();
}

#[test]
pub fn clone_is_equal_and_independent() {
	let mut map = RBTreeMap::new();
	for i in 0..100 {
		map.insert(i, i * 10);
	}

	let mut copy = map.clone();
	copy.validate();
	assert_eq!(map, copy);

	copy.insert(100, 1000);
	assert_ne!(map, copy);
	assert_eq!(map.len(), 100);
}

#[test]
pub fn comparisons() {
	let a: RBTreeMap<i32, i32> = [(1, 1), (2, 2)].iter().copied().collect();
	let b: RBTreeMap<i32, i32> = [(1, 1), (3, 3)].iter().copied().collect();

	assert!(a < b);
	assert!(b > a);
	assert_eq!(a, a.clone());
}

#[test]
pub fn cursor_traversal() {
	let mut map = RBTreeMap::new();
	for i in 0..5 {
		map.insert(i, i);
	}

	let mut cursor = map.cursor_front();
	for i in 0..5 {
		assert_eq!(cursor.key(), Some(&i));
		cursor.move_next();
	}
	assert!(cursor.is_end());

	// moving forward from the end wraps around to the minimum.
	cursor.move_next();
	assert_eq!(cursor.key(), Some(&0));

	// moving backward from the minimum reaches the end.
	cursor.move_prev();
	assert!(cursor.is_end());

	// moving backward from the end wraps around to the maximum.
	cursor.move_prev();
	assert_eq!(cursor.key(), Some(&4));
}

#[test]
pub fn cursor_on_empty_map() {
	let map: RBTreeMap<i32, i32> = RBTreeMap::new();

	let mut cursor = map.cursor_front();
	assert!(cursor.is_end());
	cursor.move_next();
	assert!(cursor.is_end());
	cursor.move_prev();
	assert!(cursor.is_end());

	assert!(map.lower_bound(&0).is_end());
	assert!(map.upper_bound(&0).is_end());
}

#[test]
pub fn bounds() {
	let map: RBTreeMap<i32, i32> = [10, 20, 30].iter().map(|&k| (k, k)).collect();

	assert_eq!(map.lower_bound(&5).key(), Some(&10));
	assert_eq!(map.lower_bound(&10).key(), Some(&10));
	assert_eq!(map.lower_bound(&15).key(), Some(&20));
	assert_eq!(map.lower_bound(&30).key(), Some(&30));
	assert!(map.lower_bound(&31).is_end());

	assert_eq!(map.upper_bound(&5).key(), Some(&10));
	assert_eq!(map.upper_bound(&10).key(), Some(&20));
	assert_eq!(map.upper_bound(&29).key(), Some(&30));
	assert!(map.upper_bound(&30).is_end());

	// cursors returned by the bound searches can be moved both ways.
	let mut cursor = map.lower_bound(&15);
	cursor.move_prev();
	assert_eq!(cursor.key_value(), Some((&10, &10)));
}

#[test]
pub fn get_mut() {
	let mut map = RBTreeMap::new();
	map.insert(1, "a");
	if let Some(value) = map.get_mut(&1) {
		*value = "b";
	}
	assert_eq!(map[&1], "b");
	assert_eq!(map.get_mut(&2), None);
}

#[test]
pub fn debug_format() {
	let mut map = RBTreeMap::new();
	map.insert(3, "c");
	map.insert(1, "a");
	map.insert(2, "b");

	assert_eq!(
		format!("{:?}", map),
		"{1: \"a\", 2: \"b\", 3: \"c\"}"
	);
}

#[test]
pub fn max_len_is_positive() {
	let map: RBTreeMap<u64, u64> = RBTreeMap::new();
	assert!(map.max_len() > 0);
}
