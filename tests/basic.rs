use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use rbtree_slab::RBTreeMap;

fn shuffled_keys(n: usize, seed: u64) -> Vec<usize> {
	let mut keys: Vec<usize> = (0..n).collect();
	keys.shuffle(&mut SmallRng::seed_from_u64(seed));
	keys
}

#[test]
pub fn insert() {
	let mut map: RBTreeMap<usize, usize> = RBTreeMap::new();

	for key in shuffled_keys(100, 1) {
		assert_eq!(map.insert(key, key * 2), None);
		map.validate();
	}

	assert_eq!(map.len(), 100);

	for key in 0..100 {
		assert_eq!(map.get(&key), Some(&(key * 2)));
	}
}

#[test]
pub fn insert_existing_key_updates_value() {
	let mut map: RBTreeMap<usize, &str> = RBTreeMap::new();

	assert_eq!(map.insert(1, "a"), None);
	assert_eq!(map.insert(1, "b"), Some("a"));
	assert_eq!(map.len(), 1);
	assert_eq!(map.get(&1), Some(&"b"));
	map.validate();
}

#[test]
pub fn remove() {
	let mut map: RBTreeMap<usize, usize> = RBTreeMap::new();

	for key in shuffled_keys(100, 2) {
		map.insert(key, key);
	}

	for key in shuffled_keys(100, 3) {
		assert_eq!(map.remove(&key), Some(key));
		assert_eq!(map.remove(&key), None);
		map.validate();
	}

	assert!(map.is_empty());
	assert_eq!(map.first_key_value(), None);
	assert_eq!(map.last_key_value(), None);
}

#[test]
pub fn remove_entry() {
	let mut map: RBTreeMap<usize, usize> = RBTreeMap::new();
	map.insert(1, 10);

	assert_eq!(map.remove_entry(&1), Some((1, 10)));
	assert_eq!(map.remove_entry(&1), None);
}

#[test]
pub fn mixed_insertions_and_removals() {
	let mut map: RBTreeMap<usize, usize> = RBTreeMap::new();

	for key in shuffled_keys(1000, 4) {
		map.insert(key, key);
	}

	// remove the odd keys, keep the even ones.
	for key in shuffled_keys(1000, 5) {
		if key % 2 == 1 {
			assert_eq!(map.remove(&key), Some(key));
		}
	}
	map.validate();

	for key in shuffled_keys(500, 6) {
		map.insert(1000 + key, key);
		map.validate();
	}

	assert_eq!(map.len(), 1000);
	assert!(map.contains_key(&0));
	assert!(!map.contains_key(&1));
	assert!(map.contains_key(&1499));
}

#[test]
pub fn boundary_access() {
	let mut map: RBTreeMap<i32, i32> = RBTreeMap::new();
	assert_eq!(map.first_key_value(), None);
	assert_eq!(map.last_key_value(), None);

	for key in [5, 3, 8, 1, 9] {
		map.insert(key, -key);
	}

	assert_eq!(map.first_key_value(), Some((&1, &-1)));
	assert_eq!(map.last_key_value(), Some((&9, &-9)));

	map.remove(&1);
	map.remove(&9);
	assert_eq!(map.first_key_value(), Some((&3, &-3)));
	assert_eq!(map.last_key_value(), Some((&8, &-8)));
}

#[test]
pub fn pop_first_and_last() {
	let mut map: RBTreeMap<usize, usize> = RBTreeMap::new();

	for key in shuffled_keys(10, 7) {
		map.insert(key, key);
	}

	assert_eq!(map.pop_first(), Some((0, 0)));
	assert_eq!(map.pop_last(), Some((9, 9)));
	assert_eq!(map.pop_first(), Some((1, 1)));
	assert_eq!(map.pop_last(), Some((8, 8)));
	assert_eq!(map.len(), 6);
	map.validate();
}

#[test]
pub fn clear() {
	let mut map: RBTreeMap<usize, usize> = RBTreeMap::new();

	for key in 0..10 {
		map.insert(key, key);
	}

	map.clear();
	assert!(map.is_empty());
	map.validate();

	// the map is usable after clearing.
	map.insert(1, 1);
	assert_eq!(map.len(), 1);
	map.validate();
}

#[test]
pub fn lookup_after_interior_removal() {
	let mut map: RBTreeMap<i32, i32> = RBTreeMap::new();

	for key in [9, 8, 1, 4, 2, 3, 10, 11, 18, 19, 14, 12, 13] {
		map.insert(key, key);
		map.validate();
	}

	assert_eq!(map.get(&13), Some(&13));

	// removing an inner node with two children exercises the
	// successor exchange.
	assert_eq!(map.remove(&10), Some(10));
	map.validate();
	assert_eq!(map.get(&11), Some(&11));
	assert_eq!(map.get(&13), Some(&13));
	assert_eq!(map.len(), 12);
}
