use crate::generic::{map, node::Node, RBTreeMap};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
	iter::{DoubleEndedIterator, ExactSizeIterator, FromIterator, FusedIterator},
};

/// A set based on a red-black tree.
///
/// See [`RBTreeMap`]'s documentation for a detailed discussion of this collection's performance benefits and drawbacks.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
///
/// [`Ord`]: core::cmp::Ord
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
#[derive(Clone)]
pub struct RBTreeSet<T, C> {
	map: RBTreeMap<T, (), C>,
}

impl<T, C> RBTreeSet<T, C> {
	/// Makes a new, empty `RBTreeSet`.
	///
	/// # Example
	///
	/// ```
	/// # #![allow(unused_mut)]
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set: RBTreeSet<i32> = RBTreeSet::new();
	/// ```
	#[inline]
	pub fn new() -> Self
	where
		C: Default,
	{
		Self::default()
	}

	/// Returns the number of elements in the set.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut v = RBTreeSet::new();
	/// assert_eq!(v.len(), 0);
	/// v.insert(1);
	/// assert_eq!(v.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// Returns `true` if the set contains no elements.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut v = RBTreeSet::new();
	/// assert!(v.is_empty());
	/// v.insert(1);
	/// assert!(!v.is_empty());
	/// ```
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the maximum number of elements the set is able to hold.
	#[inline]
	pub fn max_len(&self) -> usize {
		self.map.max_len()
	}

	/// Exchange the content of this set with the content of `other`.
	#[inline]
	pub fn swap(&mut self, other: &mut Self) {
		self.map.swap(&mut other.map)
	}
}

impl<T, C: Default> Default for RBTreeSet<T, C> {
	#[inline]
	fn default() -> Self {
		RBTreeSet {
			map: RBTreeMap::new(),
		}
	}
}

impl<T, C: Slab<Node<T, ()>>> RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	/// Gets an iterator that visits the values in the set in ascending order.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let set: RBTreeSet<usize> = [3, 1, 2].iter().cloned().collect();
	/// let set_iter: Vec<_> = set.iter().collect();
	/// assert_eq!(set_iter, [&1, &2, &3]);
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<T, C> {
		Iter {
			inner: self.map.keys(),
		}
	}

	/// Check every structural invariant of the underlying tree.
	///
	/// This is intended for tests and debugging.
	#[inline]
	pub fn validate(&self)
	where
		T: Ord,
	{
		self.map.validate()
	}
}

impl<T: Ord, C: Slab<Node<T, ()>>> RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	/// Returns `true` if the set contains a value.
	///
	/// The value may be any borrowed form of the set's value type,
	/// but the ordering on the borrowed form *must* match the
	/// ordering on the value type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let set: RBTreeSet<usize> = [1, 2, 3].iter().cloned().collect();
	/// assert_eq!(set.contains(&1), true);
	/// assert_eq!(set.contains(&4), false);
	/// ```
	#[inline]
	pub fn contains<Q: ?Sized>(&self, value: &Q) -> bool
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.map.contains_key(value)
	}

	/// Returns a reference to the value in the set, if any, that is equal to the given value.
	///
	/// The value may be any borrowed form of the set's value type,
	/// but the ordering on the borrowed form *must* match the
	/// ordering on the value type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let set: RBTreeSet<usize> = [1, 2, 3].iter().cloned().collect();
	/// assert_eq!(set.get(&2), Some(&2));
	/// assert_eq!(set.get(&4), None);
	/// ```
	#[inline]
	pub fn get<Q: ?Sized>(&self, value: &Q) -> Option<&T>
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.map.get_key_value(value).map(|(k, _)| k)
	}

	/// Returns a reference to the first value in the set, if any.
	/// This value is always the minimum of all values in the set.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set = RBTreeSet::new();
	/// assert_eq!(set.first(), None);
	/// set.insert(1);
	/// assert_eq!(set.first(), Some(&1));
	/// set.insert(2);
	/// assert_eq!(set.first(), Some(&1));
	/// ```
	#[inline]
	pub fn first(&self) -> Option<&T> {
		self.map.first_key_value().map(|(k, _)| k)
	}

	/// Returns a reference to the last value in the set, if any.
	/// This value is always the maximum of all values in the set.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set = RBTreeSet::new();
	/// assert_eq!(set.last(), None);
	/// set.insert(1);
	/// assert_eq!(set.last(), Some(&1));
	/// set.insert(2);
	/// assert_eq!(set.last(), Some(&2));
	/// ```
	#[inline]
	pub fn last(&self) -> Option<&T> {
		self.map.last_key_value().map(|(k, _)| k)
	}

	/// Returns a cursor over the first value that is not less than `value`.
	///
	/// If every value is less than `value` the cursor points past the end.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let set: RBTreeSet<usize> = [1, 3, 5].iter().cloned().collect();
	/// assert_eq!(set.lower_bound(&2).key(), Some(&3));
	/// assert_eq!(set.lower_bound(&3).key(), Some(&3));
	/// assert!(set.lower_bound(&6).is_end());
	/// ```
	#[inline]
	pub fn lower_bound<Q: ?Sized>(&self, value: &Q) -> map::Cursor<T, (), C>
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.map.lower_bound(value)
	}

	/// Returns a cursor over the first value that is greater than `value`.
	///
	/// If no value is greater than `value` the cursor points past the end.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let set: RBTreeSet<usize> = [1, 3, 5].iter().cloned().collect();
	/// assert_eq!(set.upper_bound(&3).key(), Some(&5));
	/// assert!(set.upper_bound(&5).is_end());
	/// ```
	#[inline]
	pub fn upper_bound<Q: ?Sized>(&self, value: &Q) -> map::Cursor<T, (), C>
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.map.upper_bound(value)
	}
}

impl<T: Ord, C: SlabMut<Node<T, ()>>> RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Clears the set, removing all values.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut v = RBTreeSet::new();
	/// v.insert(1);
	/// v.clear();
	/// assert!(v.is_empty());
	/// ```
	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.map.clear()
	}

	/// Adds a value to the set.
	///
	/// If the set did not have this value present, `true` is returned.
	///
	/// If the set did have this value present, `false` is returned, and the
	/// entry is not updated. The stored value keeps its identity.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set = RBTreeSet::new();
	///
	/// assert_eq!(set.insert(2), true);
	/// assert_eq!(set.insert(2), false);
	/// assert_eq!(set.len(), 1);
	/// ```
	#[inline]
	pub fn insert(&mut self, element: T) -> bool {
		match self.map.entry(element) {
			map::Entry::Occupied(_) => false,
			map::Entry::Vacant(entry) => {
				entry.insert(());
				true
			}
		}
	}

	/// Removes a value from the set. Returns whether the value was
	/// present in the set.
	///
	/// The value may be any borrowed form of the set's value type,
	/// but the ordering on the borrowed form *must* match the
	/// ordering on the value type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set = RBTreeSet::new();
	///
	/// set.insert(2);
	/// assert_eq!(set.remove(&2), true);
	/// assert_eq!(set.remove(&2), false);
	/// ```
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, value: &Q) -> bool
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.map.remove(value).is_some()
	}

	/// Removes and returns the value in the set, if any, that is equal to the given one.
	///
	/// The value may be any borrowed form of the set's value type,
	/// but the ordering on the borrowed form *must* match the
	/// ordering on the value type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set: RBTreeSet<usize> = [1, 2, 3].iter().cloned().collect();
	/// assert_eq!(set.take(&2), Some(2));
	/// assert_eq!(set.take(&2), None);
	/// ```
	#[inline]
	pub fn take<Q: ?Sized>(&mut self, value: &Q) -> Option<T>
	where
		T: Borrow<Q>,
		Q: Ord,
	{
		self.map.remove_entry(value).map(|(k, ())| k)
	}

	/// Adds a value to the set, replacing the existing value, if any, that is equal to the given
	/// one. Returns the replaced value.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set = RBTreeSet::new();
	/// set.insert(Vec::<i32>::new());
	///
	/// assert_eq!(set.get(&[][..]).unwrap().capacity(), 0);
	/// set.replace(Vec::with_capacity(10));
	/// assert_eq!(set.get(&[][..]).unwrap().capacity(), 10);
	/// ```
	#[inline]
	pub fn replace(&mut self, value: T) -> Option<T> {
		let old = self.take(&value);
		self.insert(value);
		old
	}

	/// Removes the first value from the set and returns it, if any.
	/// The first value is always the minimum value in the set.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set = RBTreeSet::new();
	///
	/// set.insert(1);
	/// while let Some(n) = set.pop_first() {
	///     assert_eq!(n, 1);
	/// }
	/// assert!(set.is_empty());
	/// ```
	#[inline]
	pub fn pop_first(&mut self) -> Option<T> {
		self.map.pop_first().map(|(k, ())| k)
	}

	/// Removes the last value from the set and returns it, if any.
	/// The last value is always the maximum value in the set.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut set = RBTreeSet::new();
	///
	/// set.insert(1);
	/// while let Some(n) = set.pop_last() {
	///     assert_eq!(n, 1);
	/// }
	/// assert!(set.is_empty());
	/// ```
	#[inline]
	pub fn pop_last(&mut self) -> Option<T> {
		self.map.pop_last().map(|(k, ())| k)
	}

	/// Moves all elements of `other` that are not already present into `self`,
	/// leaving the duplicates in `other`.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeSet;
	///
	/// let mut a: RBTreeSet<usize> = [1, 2, 3].iter().cloned().collect();
	/// let mut b: RBTreeSet<usize> = [3, 4, 5].iter().cloned().collect();
	///
	/// a.merge(&mut b);
	///
	/// assert_eq!(a.len(), 5);
	/// assert_eq!(b.len(), 1);
	/// assert!(b.contains(&3));
	/// ```
	#[inline]
	pub fn merge(&mut self, other: &mut Self)
	where
		C: Default,
	{
		self.map.merge(&mut other.map)
	}
}

impl<T: Ord, C: SlabMut<Node<T, ()>> + Default> FromIterator<T> for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = T>,
	{
		let mut set = RBTreeSet::new();
		set.extend(iter);
		set
	}
}

impl<T: Ord, C: SlabMut<Node<T, ()>>> Extend<T> for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = T>,
	{
		for element in iter {
			self.insert(element);
		}
	}
}

impl<'a, T: 'a + Ord + Copy, C: SlabMut<Node<T, ()>>> Extend<&'a T> for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<I>(&mut self, iter: I)
	where
		I: IntoIterator<Item = &'a T>,
	{
		self.extend(iter.into_iter().copied());
	}
}

impl<T, L: PartialEq<T>, C: Slab<Node<T, ()>>, D: Slab<Node<L, ()>>> PartialEq<RBTreeSet<L, D>>
	for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
	D: SimpleCollectionRef,
{
	#[inline]
	fn eq(&self, other: &RBTreeSet<L, D>) -> bool {
		self.map == other.map
	}
}

impl<T: Eq, C: Slab<Node<T, ()>>> Eq for RBTreeSet<T, C> where C: SimpleCollectionRef {}

impl<T, L: PartialOrd<T>, C: Slab<Node<T, ()>>, D: Slab<Node<L, ()>>> PartialOrd<RBTreeSet<L, D>>
	for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
	D: SimpleCollectionRef,
{
	#[inline]
	fn partial_cmp(&self, other: &RBTreeSet<L, D>) -> Option<Ordering> {
		self.map.partial_cmp(&other.map)
	}
}

impl<T: Ord, C: Slab<Node<T, ()>>> Ord for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn cmp(&self, other: &RBTreeSet<T, C>) -> Ordering {
		self.map.cmp(&other.map)
	}
}

impl<T: Hash, C: Slab<Node<T, ()>>> Hash for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn hash<H: Hasher>(&self, h: &mut H) {
		self.map.hash(h)
	}
}

impl<T: fmt::Debug, C: Slab<Node<T, ()>>> fmt::Debug for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

impl<'a, T, C: Slab<Node<T, ()>>> IntoIterator for &'a RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
{
	type IntoIter = Iter<'a, T, C>;
	type Item = &'a T;

	#[inline]
	fn into_iter(self) -> Iter<'a, T, C> {
		self.iter()
	}
}

impl<T, C: SlabMut<Node<T, ()>>> IntoIterator for RBTreeSet<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type IntoIter = IntoIter<T, C>;
	type Item = T;

	#[inline]
	fn into_iter(self) -> IntoIter<T, C> {
		IntoIter {
			inner: self.map.into_keys(),
		}
	}
}

pub struct Iter<'a, T, C> {
	inner: map::Keys<'a, T, (), C>,
}

impl<'a, T, C: Slab<Node<T, ()>>> Iterator for Iter<'a, T, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		self.inner.next()
	}
}

impl<'a, T, C: Slab<Node<T, ()>>> DoubleEndedIterator for Iter<'a, T, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a T> {
		self.inner.next_back()
	}
}

impl<'a, T, C: Slab<Node<T, ()>>> FusedIterator for Iter<'a, T, C> where C: SimpleCollectionRef {}
impl<'a, T, C: Slab<Node<T, ()>>> ExactSizeIterator for Iter<'a, T, C> where C: SimpleCollectionRef {}

pub struct IntoIter<T, C> {
	inner: map::IntoKeys<T, (), C>,
}

impl<T, C: SlabMut<Node<T, ()>>> Iterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = T;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<T> {
		self.inner.next()
	}
}

impl<T, C: SlabMut<Node<T, ()>>> DoubleEndedIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<T> {
		self.inner.next_back()
	}
}

impl<T, C: SlabMut<Node<T, ()>>> FusedIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<T, C: SlabMut<Node<T, ()>>> ExactSizeIterator for IntoIter<T, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
