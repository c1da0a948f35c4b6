use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use rbtree_slab::RBTreeSet;

#[test]
pub fn insert_rejects_duplicates() {
	let mut set = RBTreeSet::new();

	assert!(set.insert(2));
	assert!(set.insert(5));
	assert!(set.insert(3));
	assert!(!set.insert(5));

	assert_eq!(set.len(), 3);
	assert!(set.contains(&5));
	assert!(set.contains(&3));
	assert!(!set.contains(&7));
	set.validate();
}

#[test]
pub fn iter_is_sorted() {
	let mut values: Vec<u32> = (0..500).collect();
	values.shuffle(&mut SmallRng::seed_from_u64(9));

	let mut set = RBTreeSet::new();
	for value in values {
		set.insert(value);
	}
	set.validate();

	let collected: Vec<u32> = set.iter().cloned().collect();
	let expected: Vec<u32> = (0..500).collect();
	assert_eq!(collected, expected);

	let reversed: Vec<u32> = set.iter().rev().cloned().collect();
	let expected: Vec<u32> = (0..500).rev().collect();
	assert_eq!(reversed, expected);
}

#[test]
pub fn remove_and_take() {
	let mut set: RBTreeSet<usize> = [1, 2, 3].iter().cloned().collect();

	assert!(set.remove(&2));
	assert!(!set.remove(&2));
	assert_eq!(set.take(&3), Some(3));
	assert_eq!(set.take(&3), None);

	assert_eq!(set.len(), 1);
	set.validate();
}

#[test]
pub fn replace_swaps_the_stored_value() {
	let mut set = RBTreeSet::new();
	set.insert(Vec::<i32>::new());

	assert_eq!(set.get(&[][..]).unwrap().capacity(), 0);
	let old = set.replace(Vec::with_capacity(10));
	assert_eq!(old.unwrap().capacity(), 0);
	assert_eq!(set.get(&[][..]).unwrap().capacity(), 10);
	assert_eq!(set.len(), 1);
}

#[test]
pub fn first_and_last() {
	let mut set = RBTreeSet::new();
	assert_eq!(set.first(), None);
	assert_eq!(set.last(), None);

	for value in [5, 1, 9, 3] {
		set.insert(value);
	}

	assert_eq!(set.first(), Some(&1));
	assert_eq!(set.last(), Some(&9));

	assert_eq!(set.pop_first(), Some(1));
	assert_eq!(set.pop_last(), Some(9));
	assert_eq!(set.first(), Some(&3));
	assert_eq!(set.last(), Some(&5));
	set.validate();
}

#[test]
pub fn merge_keeps_duplicates_in_donor() {
	let mut a: RBTreeSet<usize> = [1, 2, 3].iter().cloned().collect();
	let mut b: RBTreeSet<usize> = [3, 4, 5].iter().cloned().collect();

	a.merge(&mut b);

	assert_eq!(a.len(), 5);
	assert_eq!(b.len(), 1);
	assert!(b.contains(&3));

	let merged: Vec<usize> = a.iter().cloned().collect();
	assert_eq!(merged, [1, 2, 3, 4, 5]);

	a.validate();
	b.validate();
}

#[test]
pub fn swap() {
	let mut a: RBTreeSet<usize> = [1].iter().cloned().collect();
	let mut b: RBTreeSet<usize> = [2, 3].iter().cloned().collect();

	a.swap(&mut b);

	assert_eq!(a.len(), 2);
	assert_eq!(b.len(), 1);
	assert!(a.contains(&2));
	assert!(b.contains(&1));
}

#[test]
pub fn equality() {
	let a: RBTreeSet<usize> = [3, 1, 2].iter().cloned().collect();
	let b: RBTreeSet<usize> = [1, 2, 3].iter().cloned().collect();
	let c: RBTreeSet<usize> = [1, 2].iter().cloned().collect();

	assert_eq!(a, b);
	assert_ne!(a, c);
}

#[test]
pub fn into_iter() {
	let set: RBTreeSet<usize> = [4, 2, 3, 1].iter().cloned().collect();
	let values: Vec<usize> = set.into_iter().collect();
	assert_eq!(values, [1, 2, 3, 4]);
}

#[test]
pub fn bounds() {
	let set: RBTreeSet<usize> = [1, 3, 5].iter().cloned().collect();

	assert_eq!(set.lower_bound(&2).key(), Some(&3));
	assert_eq!(set.upper_bound(&3).key(), Some(&5));
	assert!(set.lower_bound(&6).is_end());
	assert!(set.upper_bound(&5).is_end());
}

#[test]
pub fn clear() {
	let mut set: RBTreeSet<usize> = [1, 2, 3].iter().cloned().collect();
	set.clear();
	assert!(set.is_empty());
	assert!(!set.contains(&1));

	set.insert(1);
	assert_eq!(set.len(), 1);
	set.validate();
}

#[test]
pub fn debug_format() {
	let set: RBTreeSet<usize> = [3, 1, 2].iter().cloned().collect();
	assert_eq!(format!("{:?}", set), "{1, 2, 3}");
}
