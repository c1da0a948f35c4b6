use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use rbtree_slab::RBTreeMap;
use std::{cell::Cell, rc::Rc};

#[test]
pub fn iter() {
	let mut map = RBTreeMap::new();
	for i in 0..10 {
		map.insert(i, i);
	}

	let mut i = 0;
	for (key, value) in &map {
		assert_eq!(*key, i);
		assert_eq!(*value, i);
		i += 1;
	}

	assert_eq!(i, 10)
}

#[test]
pub fn iter_is_sorted_regardless_of_insertion_order() {
	let mut keys: Vec<u32> = (0..1000).collect();
	keys.shuffle(&mut SmallRng::seed_from_u64(42));

	let mut map = RBTreeMap::new();
	for key in keys {
		map.insert(key, ());
	}

	let collected: Vec<u32> = map.keys().cloned().collect();
	let expected: Vec<u32> = (0..1000).collect();
	assert_eq!(collected, expected);
}

#[test]
pub fn iter_rev() {
	let mut map = RBTreeMap::new();
	for i in 0..10 {
		map.insert(i, i);
	}

	let mut i = 10;
	for (key, _) in map.iter().rev() {
		i -= 1;
		assert_eq!(*key, i);
	}

	assert_eq!(i, 0)
}

#[test]
pub fn iter_double_ended() {
	let mut map = RBTreeMap::new();
	for i in 0..4 {
		map.insert(i, i);
	}

	let mut it = map.iter();
	assert_eq!(it.len(), 4);
	assert_eq!(it.next(), Some((&0, &0)));
	assert_eq!(it.next_back(), Some((&3, &3)));
	assert_eq!(it.next(), Some((&1, &1)));
	assert_eq!(it.next_back(), Some((&2, &2)));
	assert_eq!(it.next(), None);
	assert_eq!(it.next_back(), None);
}

#[test]
pub fn iter_empty() {
	let map: RBTreeMap<i32, i32> = RBTreeMap::new();
	assert_eq!(map.iter().next(), None);
	assert_eq!(map.iter().next_back(), None);
	assert_eq!(map.iter().len(), 0);
}

#[test]
pub fn iter_mut() {
	let mut map = RBTreeMap::new();
	for i in 0..10 {
		map.insert(i, i);
	}

	for (key, value) in map.iter_mut() {
		*value += *key;
	}

	for (key, value) in &map {
		assert_eq!(*value, *key * 2);
	}
}

#[test]
pub fn values_mut() {
	let mut map = RBTreeMap::new();
	map.insert(1, String::from("hello"));
	map.insert(2, String::from("goodbye"));

	for value in map.values_mut() {
		value.push('!');
	}

	let values: Vec<String> = map.values().cloned().collect();
	assert_eq!(values, ["hello!", "goodbye!"]);
}

#[test]
pub fn into_iter() {
	struct Element {
		/// Drop counter.
		counter: Rc<Cell<usize>>,
		value: i32,
	}

	impl Element {
		pub fn new(counter: &Rc<Cell<usize>>, value: i32) -> Self {
			Element {
				counter: counter.clone(),
				value,
			}
		}

		pub fn inner(&self) -> i32 {
			self.value
		}
	}

	impl Drop for Element {
		fn drop(&mut self) {
			let c = self.counter.get();
			self.counter.set(c + 1);
		}
	}

	let counter = Rc::new(Cell::new(0));
	let mut map = RBTreeMap::new();
	for i in 0..100 {
		map.insert(i, Element::new(&counter, i));
	}

	let mut expected = 0;
	for (key, value) in map {
		assert_eq!(key, value.inner());
		assert_eq!(key, expected);
		expected += 1;
	}

	assert_eq!(expected, 100);
	assert_eq!(counter.get(), 100);
}

#[test]
pub fn into_iter_partially_consumed_drops_everything() {
	struct Element {
		/// Drop counter.
		counter: Rc<Cell<usize>>,
	}

	impl Drop for Element {
		fn drop(&mut self) {
			let c = self.counter.get();
			self.counter.set(c + 1);
		}
	}

	let counter = Rc::new(Cell::new(0));
	let mut map = RBTreeMap::new();
	for i in 0..100 {
		map.insert(
			i,
			Element {
				counter: counter.clone(),
			},
		);
	}

	let mut it = map.into_iter();
	it.next();
	it.next();
	drop(it);

	assert_eq!(counter.get(), 100);
}

#[test]
pub fn into_keys_and_values() {
	let mut map = RBTreeMap::new();
	map.insert(2, "b");
	map.insert(1, "a");
	map.insert(3, "c");

	let keys: Vec<i32> = map.clone().into_keys().collect();
	assert_eq!(keys, [1, 2, 3]);

	let values: Vec<&str> = map.into_values().collect();
	assert_eq!(values, ["a", "b", "c"]);
}
