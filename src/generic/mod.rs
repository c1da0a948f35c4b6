//! Generic red-black tree types.
//!
//! Types defined in this module are independant of the actual storage type.
pub mod node;
pub use node::Node;

pub mod map;
pub use map::RBTreeMap;

pub mod set;
pub use set::RBTreeSet;
