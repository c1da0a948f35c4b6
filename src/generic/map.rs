use crate::generic::node::{Branch, Color, Item, Node};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use std::{
	borrow::Borrow,
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
	iter::{DoubleEndedIterator, ExactSizeIterator, FromIterator, FusedIterator},
	marker::PhantomData,
	ops::Index,
};

mod entry;

pub use entry::*;

/// A map based on a red-black tree.
///
/// This offers an alternative over the standard implementation of ordered maps where nodes are
/// allocated in a contiguous array of [`Node`]s, reducing the cost of tree node allocations.
/// Nodes refer to each other through their index in the array instead of raw pointers,
/// which also keeps the rebalancing code free of aliasing hazards.
///
/// # Basic usage
///
/// Basic usage is similar to the map data structures offered by the standard library.
/// ```
/// use rbtree_slab::RBTreeMap;
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `RBTreeMap<&str, &str>` in this example).
/// let mut movie_reviews = RBTreeMap::new();
///
/// // review some movies.
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.");
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.");
/// movie_reviews.insert("The Godfather",      "Very enjoyable.");
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.");
///
/// // check for a specific one.
/// if !movie_reviews.contains_key("Les Misérables") {
///     println!("We've got {} reviews, but Les Misérables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers");
///
/// // look up the values associated with some keys.
/// let to_find = ["Up!", "Office Space"];
/// for movie in &to_find {
///     match movie_reviews.get(movie) {
///        Some(review) => println!("{}: {}", movie, review),
///        None => println!("{} is unreviewed.", movie)
///     }
/// }
///
/// // iterate over everything.
/// for (movie, review) in &movie_reviews {
///     println!("{}: \"{}\"", movie, review);
/// }
/// ```
///
/// # Balancing
///
/// The tree maintains the usual red-black invariants: the root is black,
/// no red node has a red child, and every path from the root down to a missing
/// child crosses the same number of black nodes. Every insertion performs at
/// most two rotations and every removal at most three, so all operations are
/// `O(log n)` with `O(1)` restructuring work.
/// The [`validate`](RBTreeMap::validate) method checks every invariant and is
/// meant to be called from tests.
///
/// # Cursors
///
/// In addition to the standard iterators, the map exposes [`Cursor`]s
/// through [`cursor_front`](RBTreeMap::cursor_front),
/// [`lower_bound`](RBTreeMap::lower_bound) and
/// [`upper_bound`](RBTreeMap::upper_bound). A cursor designates either an
/// entry of the map or the position past the end, and can be moved freely in
/// both directions.
///
/// # Custom allocation
///
/// This data structure is built on top of a slab data structure,
/// but is agnostic of the actual slab implementation which is taken as parameter (`C`).
/// If the `std-slab` feature is enabled,
/// the [`slab::Slab`] implementation is used by default by reexporting
/// `RBTreeMap<K, V, slab::Slab<_>>` at the root of the crate.
/// Any container implementing "slab-like" functionalities can be used.
///
/// # Correctness
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative
/// to any other key, as determined by the [`Ord`] trait, changes while it is in the map.
/// This is normally only possible through [`Cell`](`std::cell::Cell`),
/// [`RefCell`](`std::cell::RefCell`), global state, I/O, or unsafe code.
#[derive(Clone)]
pub struct RBTreeMap<K, V, C> {
	/// Allocated and free nodes.
	nodes: C,

	/// Root node id.
	root: Option<usize>,

	/// Minimum node id.
	first: Option<usize>,

	/// Maximum node id.
	last: Option<usize>,

	/// Number of items in the tree.
	len: usize,

	k: PhantomData<K>,
	v: PhantomData<V>,
}

impl<K, V, C> RBTreeMap<K, V, C> {
	/// Create a new empty map.
	#[inline]
	pub fn new() -> RBTreeMap<K, V, C>
	where
		C: Default,
	{
		RBTreeMap {
			nodes: Default::default(),
			root: None,
			first: None,
			last: None,
			len: 0,
			k: PhantomData,
			v: PhantomData,
		}
	}

	/// Returns `true` if the map contains no elements.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// assert!(a.is_empty());
	/// a.insert(1, "a");
	/// assert!(!a.is_empty());
	/// ```
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.root.is_none()
	}

	/// Returns the number of elements in the map.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// assert_eq!(a.len(), 0);
	/// a.insert(1, "a");
	/// assert_eq!(a.len(), 1);
	/// ```
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns the maximum number of elements the map is able to hold.
	///
	/// This is a theoretical bound derived from the size of a node; the
	/// practical limit is the memory available to the storage container.
	#[inline]
	pub fn max_len(&self) -> usize {
		usize::MAX / std::mem::size_of::<Node<K, V>>()
	}

	/// Exchange the content of this map with the content of `other`.
	///
	/// Nodes are not moved nor copied: only the two storage containers and
	/// the cached root/minimum/maximum/length are exchanged.
	#[inline]
	pub fn swap(&mut self, other: &mut Self) {
		std::mem::swap(self, other)
	}
}

impl<K, V, C: Slab<Node<K, V>>> RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
{
	/// Get the node associated to the given `id`.
	///
	/// Panics if `id` is out of bounds.
	#[inline]
	fn node(&self, id: usize) -> &Node<K, V> {
		C::into_ref(self.nodes.get(id).unwrap())
	}

	/// Tell on which side of `parent` the child `id` is attached.
	#[inline]
	fn branch_in(&self, parent: usize, id: usize) -> Branch {
		if self.node(parent).left() == Some(id) {
			Branch::Left
		} else {
			Branch::Right
		}
	}

	/// Find the node matching the given key.
	///
	/// Returns `Ok(id)` for an exact match, or `Err((parent, branch))`
	/// describing the position where such a node would be attached.
	#[inline]
	fn id_of<Q: ?Sized>(&self, key: &Q) -> Result<usize, (Option<usize>, Branch)>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let mut next = self.root;
		let mut pos = (None, Branch::Left);

		while let Some(id) = next {
			let node = self.node(id);
			match key.cmp(node.key().borrow()) {
				Ordering::Equal => return Ok(id),
				Ordering::Less => {
					pos = (Some(id), Branch::Left);
					next = node.left()
				}
				Ordering::Greater => {
					pos = (Some(id), Branch::Right);
					next = node.right()
				}
			}
		}

		Err(pos)
	}

	/// Id of the leftmost node of the subtree rooted at `id`.
	#[inline]
	fn leftmost(&self, mut id: usize) -> usize {
		while let Some(left) = self.node(id).left() {
			id = left
		}
		id
	}

	/// Id of the rightmost node of the subtree rooted at `id`.
	#[inline]
	fn rightmost(&self, mut id: usize) -> usize {
		while let Some(right) = self.node(id).right() {
			id = right
		}
		id
	}

	/// Id of the in-order successor of `id`, if any.
	///
	/// The successor is either the leftmost node of the right subtree or the
	/// first ancestor of which `id`'s subtree is a left descendant.
	/// `O(log n)` worst case, `O(1)` amortized over a full traversal.
	fn next_id(&self, id: usize) -> Option<usize> {
		if let Some(right) = self.node(id).right() {
			return Some(self.leftmost(right));
		}

		let mut child = id;
		let mut parent = self.node(id).parent();
		while let Some(p) = parent {
			if self.branch_in(p, child) == Branch::Left {
				return Some(p);
			}
			child = p;
			parent = self.node(p).parent();
		}

		None
	}

	/// Id of the in-order predecessor of `id`, if any.
	fn prev_id(&self, id: usize) -> Option<usize> {
		if let Some(left) = self.node(id).left() {
			return Some(self.rightmost(left));
		}

		let mut child = id;
		let mut parent = self.node(id).parent();
		while let Some(p) = parent {
			if self.branch_in(p, child) == Branch::Right {
				return Some(p);
			}
			child = p;
			parent = self.node(p).parent();
		}

		None
	}

	/// Id of the first node whose key is not less than `key`.
	fn lower_bound_id<Q: ?Sized>(&self, key: &Q) -> Option<usize>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let mut next = self.root;
		let mut result = None;

		while let Some(id) = next {
			let node = self.node(id);
			if node.key().borrow() < key {
				next = node.right()
			} else {
				result = Some(id);
				next = node.left()
			}
		}

		result
	}

	/// Id of the first node whose key is greater than `key`.
	fn upper_bound_id<Q: ?Sized>(&self, key: &Q) -> Option<usize>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		let mut next = self.root;
		let mut result = None;

		while let Some(id) = next {
			let node = self.node(id);
			if node.key().borrow() <= key {
				next = node.right()
			} else {
				result = Some(id);
				next = node.left()
			}
		}

		result
	}

	/// Returns a reference to the value corresponding to the supplied key.
	///
	/// The supplied key may be any borrowed form of the map's key type, but the ordering
	/// on the borrowed form *must* match the ordering on the key type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map: RBTreeMap<i32, &str> = RBTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get(&1), Some(&"a"));
	/// assert_eq!(map.get(&2), None);
	/// ```
	#[inline]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.id_of(key) {
			Ok(id) => Some(self.node(id).item().value()),
			Err(_) => None,
		}
	}

	/// Returns the key-value pair corresponding to the supplied key.
	///
	/// The supplied key may be any borrowed form of the map's key type, but the ordering
	/// on the borrowed form *must* match the ordering on the key type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.get_key_value(&1), Some((&1, &"a")));
	/// assert_eq!(map.get_key_value(&2), None);
	/// ```
	#[inline]
	pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.id_of(key) {
			Ok(id) => Some(self.node(id).item().as_pair()),
			Err(_) => None,
		}
	}

	/// Returns `true` if the map contains a value for the specified key.
	///
	/// # Example
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map: RBTreeMap<i32, &str> = RBTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.contains_key(&1), true);
	/// assert_eq!(map.contains_key(&2), false);
	/// ```
	#[inline]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		self.get(key).is_some()
	}

	/// Returns the first key-value pair in the map.
	/// The key in this pair is the minimum key in the map.
	///
	/// The minimum is cached, so this is `O(1)`.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// assert_eq!(map.first_key_value(), None);
	/// map.insert(1, "b");
	/// map.insert(2, "a");
	/// assert_eq!(map.first_key_value(), Some((&1, &"b")));
	/// ```
	#[inline]
	pub fn first_key_value(&self) -> Option<(&K, &V)> {
		self.first.map(move |id| self.node(id).item().as_pair())
	}

	/// Returns the last key-value pair in the map.
	/// The key in this pair is the maximum key in the map.
	///
	/// The maximum is cached, so this is `O(1)`.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "b");
	/// map.insert(2, "a");
	/// assert_eq!(map.last_key_value(), Some((&2, &"a")));
	/// ```
	#[inline]
	pub fn last_key_value(&self) -> Option<(&K, &V)> {
		self.last.map(move |id| self.node(id).item().as_pair())
	}

	/// Gets an iterator over the entries of the map, sorted by key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(3, "c");
	/// map.insert(2, "b");
	/// map.insert(1, "a");
	///
	/// let (first_key, first_value) = map.iter().next().unwrap();
	/// assert_eq!((*first_key, *first_value), (1, "a"));
	/// ```
	#[inline]
	pub fn iter(&self) -> Iter<K, V, C> {
		Iter::new(self)
	}

	/// Gets an iterator over the keys of the map, in sorted order.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// a.insert(2, "b");
	/// a.insert(1, "a");
	///
	/// let keys: Vec<_> = a.keys().cloned().collect();
	/// assert_eq!(keys, [1, 2]);
	/// ```
	#[inline]
	pub fn keys(&self) -> Keys<K, V, C> {
		Keys { inner: self.iter() }
	}

	/// Gets an iterator over the values of the map, in order by key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// a.insert(1, "hello");
	/// a.insert(2, "goodbye");
	///
	/// let values: Vec<&str> = a.values().cloned().collect();
	/// assert_eq!(values, ["hello", "goodbye"]);
	/// ```
	#[inline]
	pub fn values(&self) -> Values<K, V, C> {
		Values { inner: self.iter() }
	}

	/// Returns a cursor over the first entry of the map.
	///
	/// If the map is empty the cursor points past the end.
	#[inline]
	pub fn cursor_front(&self) -> Cursor<K, V, C> {
		Cursor {
			map: self,
			id: self.first,
		}
	}

	/// Returns a cursor over the last entry of the map.
	///
	/// If the map is empty the cursor points past the end.
	#[inline]
	pub fn cursor_back(&self) -> Cursor<K, V, C> {
		Cursor {
			map: self,
			id: self.last,
		}
	}

	/// Returns a cursor over the first entry whose key is not less than `key`.
	///
	/// If every key is less than `key` the cursor points past the end.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "a");
	/// map.insert(3, "c");
	/// assert_eq!(map.lower_bound(&2).key_value(), Some((&3, &"c")));
	/// assert_eq!(map.lower_bound(&3).key_value(), Some((&3, &"c")));
	/// assert!(map.lower_bound(&4).is_end());
	/// ```
	#[inline]
	pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V, C>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		Cursor {
			map: self,
			id: self.lower_bound_id(key),
		}
	}

	/// Returns a cursor over the first entry whose key is greater than `key`.
	///
	/// If no key is greater than `key` the cursor points past the end.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "a");
	/// map.insert(3, "c");
	/// assert_eq!(map.upper_bound(&1).key_value(), Some((&3, &"c")));
	/// assert!(map.upper_bound(&3).is_end());
	/// ```
	#[inline]
	pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Cursor<K, V, C>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		Cursor {
			map: self,
			id: self.upper_bound_id(key),
		}
	}

	/// Check every structural invariant of the tree.
	///
	/// Panics if the binary search ordering is broken, if a parent link does
	/// not match the corresponding child link, if the root is red, if a red
	/// node has a red child, if two downward paths cross a different number
	/// of black nodes, if the cached length is wrong, or if the cached
	/// minimum or maximum is stale.
	///
	/// This is intended for tests and debugging; no public operation relies
	/// on it at runtime.
	pub fn validate(&self)
	where
		K: Ord,
	{
		match self.root {
			Some(root) => {
				assert!(self.node(root).parent().is_none(), "root has a parent");
				assert!(self.node(root).is_black(), "root is red");
				let (count, _) = self.validate_node(root, None, None, None);
				assert_eq!(count, self.len, "wrong cached length");
				assert_eq!(self.first, Some(self.leftmost(root)), "stale minimum cache");
				assert_eq!(self.last, Some(self.rightmost(root)), "stale maximum cache");
			}
			None => {
				assert_eq!(self.len, 0, "wrong cached length");
				assert!(self.first.is_none(), "stale minimum cache");
				assert!(self.last.is_none(), "stale maximum cache");
			}
		}
	}

	/// Validate the subtree rooted at `id` and return its node count and
	/// black-height.
	fn validate_node(
		&self,
		id: usize,
		parent: Option<usize>,
		min: Option<&K>,
		max: Option<&K>,
	) -> (usize, usize)
	where
		K: Ord,
	{
		let node = self.node(id);
		assert_eq!(node.parent(), parent, "broken parent link");

		let key = node.key();
		if let Some(min) = min {
			assert!(key > min, "tree is not sorted");
		}
		if let Some(max) = max {
			assert!(key < max, "tree is not sorted");
		}

		if node.is_red() {
			if let Some(left) = node.left() {
				assert!(self.node(left).is_black(), "red node with a red child");
			}
			if let Some(right) = node.right() {
				assert!(self.node(right).is_black(), "red node with a red child");
			}
		}

		let (left_count, left_height) = match node.left() {
			Some(left) => self.validate_node(left, Some(id), min, Some(key)),
			None => (0, 0),
		};
		let (right_count, right_height) = match node.right() {
			Some(right) => self.validate_node(right, Some(id), Some(key), max),
			None => (0, 0),
		};

		assert_eq!(left_height, right_height, "unbalanced black-height");

		let height = left_height + if node.is_black() { 1 } else { 0 };
		(left_count + right_count + 1, height)
	}

	/// Write the tree in the DOT graph descrption language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		write!(f, "digraph tree {{\n\tnode [shape=record];\n")?;
		if let Some(id) = self.root {
			self.dot_write_node(f, id)?
		}
		write!(f, "}}")
	}

	/// Write the given node in the DOT graph descrption language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	fn dot_write_node<W: std::io::Write>(&self, f: &mut W, id: usize) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		let name = format!("n{}", id);
		let node = self.node(id);

		write!(f, "\t{} [label=\"", name)?;
		if let Some(parent) = node.parent() {
			write!(f, "({})|", parent)?;
		}

		node.dot_write_label(f)?;
		writeln!(f, "({})\"];", id)?;

		if let Some(child_id) = node.left() {
			self.dot_write_node(f, child_id)?;
			writeln!(f, "\t{} -> n{}", name, child_id)?;
		}
		if let Some(child_id) = node.right() {
			self.dot_write_node(f, child_id)?;
			writeln!(f, "\t{} -> n{}", name, child_id)?;
		}

		Ok(())
	}
}

impl<K, V, C: SlabMut<Node<K, V>>> RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	/// Get the node associated to the given `id` mutabily.
	///
	/// Panics if `id` is out of bounds.
	#[inline]
	fn node_mut(&mut self, id: usize) -> &mut Node<K, V> {
		C::into_mut(self.nodes.get_mut(id).unwrap())
	}

	/// Allocate a free identifier for the given node.
	#[inline]
	fn allocate_node(&mut self, node: Node<K, V>) -> usize {
		self.nodes.insert(node)
	}

	/// Release the given node identifier and return the node it used to identify.
	#[inline]
	fn release_node(&mut self, id: usize) -> Node<K, V> {
		self.nodes.remove(id).unwrap()
	}

	/// Clears the map, removing all elements.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// a.insert(1, "a");
	/// a.clear();
	/// assert!(a.is_empty());
	/// ```
	#[inline]
	pub fn clear(&mut self)
	where
		C: cc_traits::Clear,
	{
		self.root = None;
		self.first = None;
		self.last = None;
		self.len = 0;
		self.nodes.clear()
	}

	/// Returns a mutable reference to the value corresponding to the key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "a");
	/// if let Some(x) = map.get_mut(&1) {
	///     *x = "b";
	/// }
	/// assert_eq!(map[&1], "b");
	/// ```
	#[inline]
	pub fn get_mut(&mut self, key: &K) -> Option<&mut V>
	where
		K: Ord,
	{
		match self.id_of(key) {
			Ok(id) => Some(self.node_mut(id).item_mut().value_mut()),
			Err(_) => None,
		}
	}

	/// Gets the given key's corresponding entry in the map for in-place manipulation.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut letters = RBTreeMap::new();
	///
	/// for ch in "a short treatise on fungi".chars() {
	///     let counter = letters.entry(ch).or_insert(0);
	///     *counter += 1;
	/// }
	///
	/// assert_eq!(letters[&'s'], 2);
	/// assert_eq!(letters[&'t'], 3);
	/// assert_eq!(letters[&'u'], 1);
	/// assert_eq!(letters.get(&'y'), None);
	/// ```
	#[inline]
	pub fn entry(&mut self, key: K) -> Entry<K, V, C>
	where
		K: Ord,
	{
		match self.id_of(&key) {
			Ok(id) => Entry::Occupied(OccupiedEntry { map: self, id }),
			Err((parent, branch)) => Entry::Vacant(VacantEntry {
				map: self,
				key,
				parent,
				branch,
			}),
		}
	}

	/// Insert a key-value pair in the tree.
	///
	/// If the map did not have this key present, `None` is returned.
	/// If the map did have this key present, no new node is created:
	/// the value is updated in place and the old value is returned.
	#[inline]
	pub fn insert(&mut self, key: K, value: V) -> Option<V>
	where
		K: Ord,
	{
		match self.id_of(&key) {
			Ok(id) => Some(self.node_mut(id).item_mut().set_value(value)),
			Err((parent, branch)) => {
				self.insert_at(parent, branch, Item::new(key, value));
				None
			}
		}
	}

	/// Attach a new node holding `item` below `parent` on the given branch.
	///
	/// Returns the new node id along with the number of rotations performed
	/// by the insertion fixup.
	fn insert_at(
		&mut self,
		parent: Option<usize>,
		branch: Branch,
		item: Item<K, V>,
	) -> (usize, usize) {
		let id = self.allocate_node(Node::new(item, parent));

		match parent {
			Some(p) => {
				self.node_mut(p).set_child(branch, Some(id));

				// a new minimum is always attached left of the old one,
				// and symmetrically for the maximum.
				if self.first == Some(p) && branch == Branch::Left {
					self.first = Some(id)
				}
				if self.last == Some(p) && branch == Branch::Right {
					self.last = Some(id)
				}
			}
			None => {
				self.root = Some(id);
				self.first = Some(id);
				self.last = Some(id);
			}
		}

		self.len += 1;

		let rotations = self.insert_fixup(id);
		debug_assert!(rotations <= 2, "insertion fixup exceeded the rotation bound");

		(id, rotations)
	}

	/// Restore the red-black invariants after the red node `id` was attached.
	///
	/// While the parent of the current node is red, either recolor (red
	/// uncle) and propagate the violation upward, or rotate the grandparent
	/// (black uncle) and stop. Returns the number of rotations performed,
	/// which is at most 2.
	fn insert_fixup(&mut self, mut id: usize) -> usize {
		let mut rotations = 0;

		loop {
			let parent = match self.node(id).parent() {
				Some(parent) => parent,
				None => break,
			};

			if self.node(parent).is_black() {
				break;
			}

			// the root is always black, so a red parent has a parent.
			let grandparent = self.node(parent).parent().unwrap();
			let parent_branch = self.branch_in(grandparent, parent);
			let uncle = self.node(grandparent).child(parent_branch.opposite());

			match uncle {
				Some(uncle) if self.node(uncle).is_red() => {
					self.node_mut(parent).set_color(Color::Black);
					self.node_mut(uncle).set_color(Color::Black);
					self.node_mut(grandparent).set_color(Color::Red);
					id = grandparent;
				}
				_ => {
					if self.branch_in(parent, id) == parent_branch.opposite() {
						// inner grandchild: straighten the zig-zag first.
						self.rotate(parent, parent_branch);
						rotations += 1;
						id = parent;
					}

					let parent = self.node(id).parent().unwrap();
					self.node_mut(parent).set_color(Color::Black);
					self.node_mut(grandparent).set_color(Color::Red);
					self.rotate(grandparent, parent_branch.opposite());
					rotations += 1;
					break;
				}
			}
		}

		let root = self.root.unwrap();
		self.node_mut(root).set_color(Color::Black);

		rotations
	}

	/// Rotate the subtree rooted at `id` in direction `dir`, promoting the
	/// child on the opposite side.
	///
	/// The inner subtree of the promoted child changes sides, every parent
	/// link of the relocated nodes is updated, and the root is updated when
	/// `id` was the root. The in-order sequence is preserved.
	fn rotate(&mut self, id: usize, dir: Branch) {
		let up = self.node(id).child(dir.opposite()).unwrap();
		let inner = self.node(up).child(dir);

		self.node_mut(id).set_child(dir.opposite(), inner);
		if let Some(inner) = inner {
			self.node_mut(inner).set_parent(Some(id));
		}

		let parent = self.node(id).parent();
		self.node_mut(up).set_parent(parent);
		match parent {
			Some(p) => {
				let branch = self.branch_in(p, id);
				self.node_mut(p).set_child(branch, Some(up));
			}
			None => self.root = Some(up),
		}

		self.node_mut(up).set_child(dir, Some(id));
		self.node_mut(id).set_parent(Some(up));
	}

	/// Detach the node `id` and return its item.
	///
	/// A node with two children trades items with its in-order successor so
	/// that the node actually spliced out of the tree has at most one child.
	/// If the spliced node was black, the deletion fixup restores the
	/// black-height invariant. Returns the item along with the number of
	/// rotations performed, which is at most 3.
	fn remove_at(&mut self, id: usize) -> (Item<K, V>, usize) {
		let target = {
			let node = self.node(id);
			if node.left().is_some() && node.right().is_some() {
				self.leftmost(node.right().unwrap())
			} else {
				id
			}
		};

		// `target` has at most one child; splice it out.
		let (child, parent, color) = {
			let node = self.node(target);
			(node.left().or(node.right()), node.parent(), node.color())
		};
		let branch = parent.map(|p| self.branch_in(p, target));

		if let Some(child) = child {
			self.node_mut(child).set_parent(parent);
		}
		match parent {
			Some(p) => self.node_mut(p).set_child(branch.unwrap(), child),
			None => self.root = child,
		}

		let node = self.release_node(target);
		let item = if target == id {
			node.into_item()
		} else {
			// the successor's item takes the place of the removed one.
			std::mem::replace(self.node_mut(id).item_mut(), node.into_item())
		};

		self.len -= 1;

		let mut rotations = 0;
		if color == Color::Black {
			rotations = self.remove_fixup(child, parent, branch.unwrap_or(Branch::Left));
			debug_assert!(rotations <= 3, "deletion fixup exceeded the rotation bound");
		}

		self.first = self.root.map(|root| self.leftmost(root));
		self.last = self.root.map(|root| self.rightmost(root));

		(item, rotations)
	}

	/// Restore the black-height invariant after a black node was spliced out.
	///
	/// `id` is the child that took the removed node's place (possibly
	/// absent), `parent` its parent and `branch` the side it occupies. The
	/// deficiency is either resolved locally by rotating a suitable sibling
	/// configuration into place, or pushed up one level by recoloring.
	/// Returns the number of rotations performed, which is at most 3.
	fn remove_fixup(
		&mut self,
		mut id: Option<usize>,
		mut parent: Option<usize>,
		mut branch: Branch,
	) -> usize {
		let mut rotations = 0;

		while let Some(p) = parent {
			if let Some(id) = id {
				if self.node(id).is_red() {
					break;
				}
			}

			// the removed path was short one black node, so the sibling
			// subtree is non-empty.
			let mut sibling = self.node(p).child(branch.opposite()).unwrap();

			if self.node(sibling).is_red() {
				// red sibling: bring a black sibling above `id`.
				self.node_mut(sibling).set_color(Color::Black);
				self.node_mut(p).set_color(Color::Red);
				self.rotate(p, branch);
				rotations += 1;
				sibling = self.node(p).child(branch.opposite()).unwrap();
			}

			let near = self.node(sibling).child(branch);
			let far = self.node(sibling).child(branch.opposite());
			let near_red = near.map_or(false, |n| self.node(n).is_red());
			let far_red = far.map_or(false, |n| self.node(n).is_red());

			if !near_red && !far_red {
				// both nephews black: push the deficiency up.
				self.node_mut(sibling).set_color(Color::Red);
				id = Some(p);
				parent = self.node(p).parent();
				if let Some(gp) = parent {
					branch = self.branch_in(gp, p);
				}
			} else {
				if !far_red {
					// near nephew red: straighten the zig-zag.
					let near = near.unwrap();
					self.node_mut(near).set_color(Color::Black);
					self.node_mut(sibling).set_color(Color::Red);
					self.rotate(sibling, branch.opposite());
					rotations += 1;
					sibling = self.node(p).child(branch.opposite()).unwrap();
				}

				// far nephew red: one rotation absorbs the deficiency.
				let color = self.node(p).color();
				self.node_mut(sibling).set_color(color);
				self.node_mut(p).set_color(Color::Black);
				let far = self.node(sibling).child(branch.opposite()).unwrap();
				self.node_mut(far).set_color(Color::Black);
				self.rotate(p, branch);
				rotations += 1;
				break;
			}
		}

		if let Some(id) = id {
			self.node_mut(id).set_color(Color::Black);
		}

		rotations
	}

	/// Removes a key from the map, returning the value at the key if the key
	/// was previously in the map.
	///
	/// The key may be any borrowed form of the map's key type, but the ordering
	/// on the borrowed form *must* match the ordering on the key type.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.remove(&1), Some("a"));
	/// assert_eq!(map.remove(&1), None);
	/// ```
	#[inline]
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.id_of(key) {
			Ok(id) => Some(self.remove_at(id).0.into_value()),
			Err(_) => None,
		}
	}

	/// Removes a key from the map, returning the stored key and value if the key
	/// was previously in the map.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "a");
	/// assert_eq!(map.remove_entry(&1), Some((1, "a")));
	/// assert_eq!(map.remove_entry(&1), None);
	/// ```
	#[inline]
	pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
	where
		K: Borrow<Q>,
		Q: Ord,
	{
		match self.id_of(key) {
			Ok(id) => Some(self.remove_at(id).0.into_pair()),
			Err(_) => None,
		}
	}

	/// Removes and returns the first element in the map.
	/// The key of this element is the minimum key that was in the map.
	///
	/// # Example
	///
	/// Draining elements in ascending order, while keeping a usable map each iteration.
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "a");
	/// map.insert(2, "b");
	/// while let Some((key, _val)) = map.pop_first() {
	///     assert!(map.iter().all(|(k, _v)| *k > key));
	/// }
	/// assert!(map.is_empty());
	/// ```
	#[inline]
	pub fn pop_first(&mut self) -> Option<(K, V)> {
		match self.first {
			Some(id) => Some(self.remove_at(id).0.into_pair()),
			None => None,
		}
	}

	/// Removes and returns the last element in the map.
	/// The key of this element is the maximum key that was in the map.
	///
	/// # Example
	///
	/// Draining elements in descending order, while keeping a usable map each iteration.
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert(1, "a");
	/// map.insert(2, "b");
	/// while let Some((key, _val)) = map.pop_last() {
	///     assert!(map.iter().all(|(k, _v)| *k < key));
	/// }
	/// assert!(map.is_empty());
	/// ```
	#[inline]
	pub fn pop_last(&mut self) -> Option<(K, V)> {
		match self.last {
			Some(id) => Some(self.remove_at(id).0.into_pair()),
			None => None,
		}
	}

	/// Moves all elements of `other` whose keys are not already present into
	/// `self`, leaving the collisions in `other`.
	///
	/// After the call, `self` contains the union of both key sets with its
	/// own values winning on collision, and `other` contains exactly the
	/// elements whose keys collided.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// a.insert(1, "a");
	/// a.insert(2, "b");
	/// a.insert(3, "c");
	///
	/// let mut b = RBTreeMap::new();
	/// b.insert(3, "d");
	/// b.insert(4, "e");
	/// b.insert(5, "f");
	///
	/// a.merge(&mut b);
	///
	/// assert_eq!(a.len(), 5);
	/// assert_eq!(b.len(), 1);
	///
	/// assert_eq!(a[&3], "c");
	/// assert_eq!(b[&3], "d");
	/// ```
	#[inline]
	pub fn merge(&mut self, other: &mut Self)
	where
		K: Ord,
		C: Default,
	{
		// Do we have to merge anything at all?
		if other.is_empty() {
			return;
		}

		// We can just swap `self` and `other` if `self` is empty.
		if self.is_empty() {
			std::mem::swap(self, other);
			return;
		}

		let drained = std::mem::take(other);
		for (key, value) in drained {
			if self.contains_key(&key) {
				other.insert(key, value);
			} else {
				self.insert(key, value);
			}
		}
	}

	/// Gets a mutable iterator over the entries of the map, sorted by key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut map = RBTreeMap::new();
	/// map.insert("a", 1);
	/// map.insert("b", 2);
	/// map.insert("c", 3);
	///
	/// // add 10 to the value if the key isn't "a"
	/// for (key, value) in map.iter_mut() {
	///     if key != &"a" {
	///         *value += 10;
	///     }
	/// }
	/// ```
	#[inline]
	pub fn iter_mut(&mut self) -> IterMut<K, V, C> {
		IterMut::new(self)
	}

	/// Gets a mutable iterator over the values of the map, in order by key.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// a.insert(1, String::from("hello"));
	/// a.insert(2, String::from("goodbye"));
	///
	/// for value in a.values_mut() {
	///     value.push_str("!");
	/// }
	///
	/// let values: Vec<String> = a.values().cloned().collect();
	/// assert_eq!(values, [String::from("hello!"),
	///                     String::from("goodbye!")]);
	/// ```
	#[inline]
	pub fn values_mut(&mut self) -> ValuesMut<K, V, C> {
		ValuesMut {
			inner: self.iter_mut(),
		}
	}

	/// Creates a consuming iterator visiting all the keys, in sorted order.
	/// The map cannot be used after calling this.
	/// The iterator element type is `K`.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// a.insert(2, "b");
	/// a.insert(1, "a");
	///
	/// let keys: Vec<i32> = a.into_keys().collect();
	/// assert_eq!(keys, [1, 2]);
	/// ```
	#[inline]
	pub fn into_keys(self) -> IntoKeys<K, V, C> {
		IntoKeys {
			inner: self.into_iter(),
		}
	}

	/// Creates a consuming iterator visiting all the values, in order by key.
	/// The map cannot be used after calling this.
	/// The iterator element type is `V`.
	///
	/// # Example
	///
	/// ```
	/// use rbtree_slab::RBTreeMap;
	///
	/// let mut a = RBTreeMap::new();
	/// a.insert(1, "hello");
	/// a.insert(2, "goodbye");
	///
	/// let values: Vec<&str> = a.into_values().collect();
	/// assert_eq!(values, ["hello", "goodbye"]);
	/// ```
	#[inline]
	pub fn into_values(self) -> IntoValues<K, V, C> {
		IntoValues {
			inner: self.into_iter(),
		}
	}
}

impl<K: Ord, Q: ?Sized, V, C: Slab<Node<K, V>>> Index<&Q> for RBTreeMap<K, V, C>
where
	K: Borrow<Q>,
	Q: Ord,
	C: SimpleCollectionRef,
{
	type Output = V;

	/// Returns a reference to the value corresponding to the supplied key.
	///
	/// # Panics
	///
	/// Panics if the key is not present in the `RBTreeMap`.
	#[inline]
	fn index(&self, key: &Q) -> &V {
		self.get(key).expect("no entry found for key")
	}
}

impl<K, L: PartialEq<K>, V, W: PartialEq<V>, C: Slab<Node<K, V>>, D: Slab<Node<L, W>>>
	PartialEq<RBTreeMap<L, W, D>> for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	D: SimpleCollectionRef,
{
	fn eq(&self, other: &RBTreeMap<L, W, D>) -> bool {
		if self.len() == other.len() {
			let mut it1 = self.iter();
			let mut it2 = other.iter();

			loop {
				match (it1.next(), it2.next()) {
					(None, None) => break,
					(Some((k, v)), Some((l, w))) => {
						if l != k || w != v {
							return false;
						}
					}
					_ => return false,
				}
			}

			true
		} else {
			false
		}
	}
}

impl<K, V, C: Default> Default for RBTreeMap<K, V, C> {
	#[inline]
	fn default() -> Self {
		RBTreeMap::new()
	}
}

impl<K: Ord, V, C: SlabMut<Node<K, V>> + Default> FromIterator<(K, V)> for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn from_iter<T>(iter: T) -> RBTreeMap<K, V, C>
	where
		T: IntoIterator<Item = (K, V)>,
	{
		let mut map = RBTreeMap::new();

		for (key, value) in iter {
			map.insert(key, value);
		}

		map
	}
}

impl<K: Ord, V, C: SlabMut<Node<K, V>>> Extend<(K, V)> for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<T>(&mut self, iter: T)
	where
		T: IntoIterator<Item = (K, V)>,
	{
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl<'a, K: Ord + Copy, V: Copy, C: SlabMut<Node<K, V>>> Extend<(&'a K, &'a V)>
	for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn extend<T>(&mut self, iter: T)
	where
		T: IntoIterator<Item = (&'a K, &'a V)>,
	{
		self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
	}
}

impl<K: Eq, V: Eq, C: Slab<Node<K, V>>> Eq for RBTreeMap<K, V, C> where C: SimpleCollectionRef {}

impl<K, L: PartialOrd<K>, V, W: PartialOrd<V>, C: Slab<Node<K, V>>, D: Slab<Node<L, W>>>
	PartialOrd<RBTreeMap<L, W, D>> for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	D: SimpleCollectionRef,
{
	fn partial_cmp(&self, other: &RBTreeMap<L, W, D>) -> Option<Ordering> {
		let mut it1 = self.iter();
		let mut it2 = other.iter();

		loop {
			match (it1.next(), it2.next()) {
				(None, None) => return Some(Ordering::Equal),
				(_, None) => return Some(Ordering::Greater),
				(None, _) => return Some(Ordering::Less),
				(Some((k, v)), Some((l, w))) => match l.partial_cmp(k) {
					Some(Ordering::Greater) => return Some(Ordering::Less),
					Some(Ordering::Less) => return Some(Ordering::Greater),
					Some(Ordering::Equal) => match w.partial_cmp(v) {
						Some(Ordering::Greater) => return Some(Ordering::Less),
						Some(Ordering::Less) => return Some(Ordering::Greater),
						Some(Ordering::Equal) => (),
						None => return None,
					},
					None => return None,
				},
			}
		}
	}
}

impl<K: Ord, V: Ord, C: Slab<Node<K, V>>> Ord for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
{
	fn cmp(&self, other: &RBTreeMap<K, V, C>) -> Ordering {
		let mut it1 = self.iter();
		let mut it2 = other.iter();

		loop {
			match (it1.next(), it2.next()) {
				(None, None) => return Ordering::Equal,
				(_, None) => return Ordering::Greater,
				(None, _) => return Ordering::Less,
				(Some((k, v)), Some((l, w))) => match l.cmp(k) {
					Ordering::Greater => return Ordering::Less,
					Ordering::Less => return Ordering::Greater,
					Ordering::Equal => match w.cmp(v) {
						Ordering::Greater => return Ordering::Less,
						Ordering::Less => return Ordering::Greater,
						Ordering::Equal => (),
					},
				},
			}
		}
	}
}

impl<K: Hash, V: Hash, C: Slab<Node<K, V>>> Hash for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn hash<H: Hasher>(&self, h: &mut H) {
		for (k, v) in self {
			k.hash(h);
			v.hash(h);
		}
	}
}

impl<K: fmt::Debug, V: fmt::Debug, C: Slab<Node<K, V>>> fmt::Debug for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_map().entries(self.iter()).finish()
	}
}

/// A cursor over the entries of a [`RBTreeMap`].
///
/// A cursor points either to an entry of the map or to the position past the
/// end, and can be moved in both directions in `O(log n)` worst case without
/// auxiliary storage. Moving past the last entry reaches the end position;
/// moving forward from the end position wraps around to the first entry, and
/// moving backward from it wraps around to the last entry.
///
/// Two cursors over the same map are equal if and only if they point to the
/// same position, the end position included.
pub struct Cursor<'a, K, V, C> {
	map: &'a RBTreeMap<K, V, C>,

	/// Pointed node id, or `None` for the past-the-end position.
	id: Option<usize>,
}

impl<'a, K, V, C> Clone for Cursor<'a, K, V, C> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, K, V, C> Copy for Cursor<'a, K, V, C> {}

impl<'a, K, V, C> PartialEq for Cursor<'a, K, V, C> {
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.map, other.map) && self.id == other.id
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> Cursor<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	/// Returns `true` if the cursor points past the end of the map.
	#[inline]
	pub fn is_end(&self) -> bool {
		self.id.is_none()
	}

	/// Returns a reference to the pointed key, or `None` at the end position.
	#[inline]
	pub fn key(&self) -> Option<&'a K> {
		self.id.map(move |id| self.map.node(id).key())
	}

	/// Returns a reference to the pointed value, or `None` at the end position.
	#[inline]
	pub fn value(&self) -> Option<&'a V> {
		self.id.map(move |id| self.map.node(id).item().value())
	}

	/// Returns the pointed entry, or `None` at the end position.
	#[inline]
	pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
		self.id.map(move |id| self.map.node(id).item().as_pair())
	}

	/// Move the cursor to the next entry in key order.
	///
	/// Moving forward from the last entry reaches the end position;
	/// moving forward from the end position wraps around to the first entry.
	#[inline]
	pub fn move_next(&mut self) {
		self.id = match self.id {
			Some(id) => self.map.next_id(id),
			None => self.map.first,
		}
	}

	/// Move the cursor to the previous entry in key order.
	///
	/// Moving backward from the first entry reaches the end position;
	/// moving backward from the end position wraps around to the last entry.
	#[inline]
	pub fn move_prev(&mut self) {
		self.id = match self.id {
			Some(id) => self.map.prev_id(id),
			None => self.map.last,
		}
	}
}

pub struct Iter<'a, K, V, C> {
	/// The tree reference.
	map: &'a RBTreeMap<K, V, C>,

	/// Id of the next node yielded by `next`.
	front: Option<usize>,

	/// Id of the next node yielded by `next_back`.
	back: Option<usize>,

	len: usize,
}

impl<'a, K, V, C: Slab<Node<K, V>>> Iter<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn new(map: &'a RBTreeMap<K, V, C>) -> Self {
		Iter {
			map,
			front: map.first,
			back: map.last,
			len: map.len,
		}
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> Iterator for Iter<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = (&'a K, &'a V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a V)> {
		if self.len > 0 {
			let id = self.front.unwrap();
			self.len -= 1;
			self.front = self.map.next_id(id);
			Some(self.map.node(id).item().as_pair())
		} else {
			None
		}
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> FusedIterator for Iter<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<K, V>>> ExactSizeIterator for Iter<'a, K, V, C> where
	C: SimpleCollectionRef
{
}

impl<'a, K, V, C: Slab<Node<K, V>>> DoubleEndedIterator for Iter<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
		if self.len > 0 {
			let id = self.back.unwrap();
			self.len -= 1;
			self.back = self.map.prev_id(id);
			Some(self.map.node(id).item().as_pair())
		} else {
			None
		}
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> IntoIterator for &'a RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
{
	type IntoIter = Iter<'a, K, V, C>;
	type Item = (&'a K, &'a V);

	#[inline]
	fn into_iter(self) -> Iter<'a, K, V, C> {
		self.iter()
	}
}

pub struct IterMut<'a, K, V, C> {
	/// The tree reference.
	map: &'a mut RBTreeMap<K, V, C>,

	/// Id of the next node yielded by `next`.
	front: Option<usize>,

	/// Id of the next node yielded by `next_back`.
	back: Option<usize>,

	len: usize,
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn new(map: &'a mut RBTreeMap<K, V, C>) -> Self {
		let front = map.first;
		let back = map.last;
		let len = map.len;
		IterMut {
			map,
			front,
			back,
			len,
		}
	}

	#[inline]
	fn next_item(&mut self) -> Option<&'a mut Item<K, V>> {
		if self.len > 0 {
			let id = self.front.unwrap();
			self.len -= 1;
			self.front = self.map.next_id(id);
			let item = self.map.node_mut(id).item_mut();
			Some(unsafe { std::mem::transmute(item) }) // this is safe because only one mutable reference to the same item can be emitted.
		} else {
			None
		}
	}

	#[inline]
	fn next_back_item(&mut self) -> Option<&'a mut Item<K, V>> {
		if self.len > 0 {
			let id = self.back.unwrap();
			self.len -= 1;
			self.back = self.map.prev_id(id);
			let item = self.map.node_mut(id).item_mut();
			Some(unsafe { std::mem::transmute(item) }) // this is safe because only one mutable reference to the same item can be emitted.
		} else {
			None
		}
	}
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> Iterator for IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = (&'a K, &'a mut V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.len, Some(self.len))
	}

	#[inline]
	fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
		self.next_item().map(|item| {
			let (key, value) = item.as_pair_mut();
			(key as &'a K, value)
		})
	}
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> FusedIterator for IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<'a, K, V, C: SlabMut<Node<K, V>>> ExactSizeIterator for IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> DoubleEndedIterator for IterMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> {
		self.next_back_item().map(|item| {
			let (key, value) = item.as_pair_mut();
			(key as &'a K, value)
		})
	}
}

/// An owning iterator over the entries of a `RBTreeMap`.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeMap`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V, C> {
	map: RBTreeMap<K, V, C>,
}

impl<K, V, C: SlabMut<Node<K, V>>> Iterator for IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = (K, V);

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		(self.map.len, Some(self.map.len))
	}

	#[inline]
	fn next(&mut self) -> Option<(K, V)> {
		self.map.pop_first()
	}
}

impl<K, V, C: SlabMut<Node<K, V>>> DoubleEndedIterator for IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<(K, V)> {
		self.map.pop_last()
	}
}

impl<K, V, C: SlabMut<Node<K, V>>> FusedIterator for IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<K, V, C: SlabMut<Node<K, V>>> ExactSizeIterator for IntoIter<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<K, V, C: SlabMut<Node<K, V>>> IntoIterator for RBTreeMap<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type IntoIter = IntoIter<K, V, C>;
	type Item = (K, V);

	#[inline]
	fn into_iter(self) -> IntoIter<K, V, C> {
		IntoIter { map: self }
	}
}

pub struct Keys<'a, K, V, C> {
	inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C: Slab<Node<K, V>>> FusedIterator for Keys<'a, K, V, C> where C: SimpleCollectionRef {}
impl<'a, K, V, C: Slab<Node<K, V>>> ExactSizeIterator for Keys<'a, K, V, C> where
	C: SimpleCollectionRef
{
}

impl<'a, K, V, C: Slab<Node<K, V>>> Iterator for Keys<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a K;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a K> {
		self.inner.next().map(|(k, _)| k)
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> DoubleEndedIterator for Keys<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a K> {
		self.inner.next_back().map(|(k, _)| k)
	}
}

pub struct IntoKeys<K, V, C> {
	inner: IntoIter<K, V, C>,
}

impl<K, V, C: SlabMut<Node<K, V>>> FusedIterator for IntoKeys<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<K, V, C: SlabMut<Node<K, V>>> ExactSizeIterator for IntoKeys<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<K, V, C: SlabMut<Node<K, V>>> Iterator for IntoKeys<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = K;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<K> {
		self.inner.next().map(|(k, _)| k)
	}
}

impl<K, V, C: SlabMut<Node<K, V>>> DoubleEndedIterator for IntoKeys<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<K> {
		self.inner.next_back().map(|(k, _)| k)
	}
}

pub struct Values<'a, K, V, C> {
	inner: Iter<'a, K, V, C>,
}

impl<'a, K, V, C: Slab<Node<K, V>>> FusedIterator for Values<'a, K, V, C> where
	C: SimpleCollectionRef
{
}
impl<'a, K, V, C: Slab<Node<K, V>>> ExactSizeIterator for Values<'a, K, V, C> where
	C: SimpleCollectionRef
{
}

impl<'a, K, V, C: Slab<Node<K, V>>> Iterator for Values<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	type Item = &'a V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<'a, K, V, C: Slab<Node<K, V>>> DoubleEndedIterator for Values<'a, K, V, C>
where
	C: SimpleCollectionRef,
{
	#[inline]
	fn next_back(&mut self) -> Option<&'a V> {
		self.inner.next_back().map(|(_, v)| v)
	}
}

pub struct ValuesMut<'a, K, V, C> {
	inner: IterMut<'a, K, V, C>,
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> FusedIterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<'a, K, V, C: SlabMut<Node<K, V>>> ExactSizeIterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<'a, K, V, C: SlabMut<Node<K, V>>> Iterator for ValuesMut<'a, K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = &'a mut V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<&'a mut V> {
		self.inner.next().map(|(_, v)| v)
	}
}

pub struct IntoValues<K, V, C> {
	inner: IntoIter<K, V, C>,
}

impl<K, V, C: SlabMut<Node<K, V>>> FusedIterator for IntoValues<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}
impl<K, V, C: SlabMut<Node<K, V>>> ExactSizeIterator for IntoValues<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
}

impl<K, V, C: SlabMut<Node<K, V>>> Iterator for IntoValues<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	type Item = V;

	#[inline]
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.inner.size_hint()
	}

	#[inline]
	fn next(&mut self) -> Option<V> {
		self.inner.next().map(|(_, v)| v)
	}
}

impl<K, V, C: SlabMut<Node<K, V>>> DoubleEndedIterator for IntoValues<K, V, C>
where
	C: SimpleCollectionRef,
	C: SimpleCollectionMut,
{
	#[inline]
	fn next_back(&mut self) -> Option<V> {
		self.inner.next_back().map(|(_, v)| v)
	}
}

#[cfg(all(test, feature = "std-slab"))]
mod tests {
	use super::*;
	use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

	type Map = RBTreeMap<u32, u32, slab::Slab<Node<u32, u32>>>;

	#[test]
	fn insertion_rotation_bound() {
		let mut map = Map::new();
		let mut keys: Vec<u32> = (0..256).collect();
		keys.shuffle(&mut SmallRng::seed_from_u64(0x5eed));

		for key in keys {
			let (_, rotations) = match map.id_of(&key) {
				Err((parent, branch)) => map.insert_at(parent, branch, Item::new(key, 0)),
				Ok(_) => panic!("unexpected duplicate"),
			};
			assert!(rotations <= 2);
			map.validate();
		}
	}

	#[test]
	fn deletion_rotation_bound() {
		let mut map = Map::new();
		for key in 0..256 {
			map.insert(key, 0);
		}

		let mut keys: Vec<u32> = (0..256).collect();
		keys.shuffle(&mut SmallRng::seed_from_u64(0xdead));

		for key in keys {
			let id = map.id_of(&key).ok().unwrap();
			let (item, rotations) = map.remove_at(id);
			assert_eq!(*item.key(), key);
			assert!(rotations <= 3);
			map.validate();
		}

		assert!(map.is_empty());
	}

	#[test]
	fn monotone_runs() {
		let mut map = Map::new();
		for key in 0..512 {
			map.insert(key, key);
			map.validate();
		}
		for key in (0..512).rev() {
			assert_eq!(map.remove(&key), Some(key));
			map.validate();
		}
	}

	#[test]
	fn successor_chain_is_sorted() {
		let mut map = Map::new();
		let mut keys: Vec<u32> = (0..100).collect();
		keys.shuffle(&mut SmallRng::seed_from_u64(7));
		for key in keys {
			map.insert(key, key);
		}

		let mut id = map.first;
		let mut expected = 0;
		while let Some(i) = id {
			assert_eq!(*map.node(i).key(), expected);
			expected += 1;
			id = map.next_id(i);
		}
		assert_eq!(expected, 100);

		let mut id = map.last;
		while let Some(i) = id {
			expected -= 1;
			assert_eq!(*map.node(i).key(), expected);
			id = map.prev_id(i);
		}
		assert_eq!(expected, 0);
	}
}
