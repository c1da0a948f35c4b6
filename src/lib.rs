pub mod generic;

/// Red-black tree map based on `Slab`.
#[cfg(feature = "std-slab")]
pub type RBTreeMap<K, V> = generic::RBTreeMap<K, V, slab::Slab<generic::Node<K, V>>>;

/// Red-black tree set based on `Slab`.
#[cfg(feature = "std-slab")]
pub type RBTreeSet<T> = generic::RBTreeSet<T, slab::Slab<generic::Node<T, ()>>>;
