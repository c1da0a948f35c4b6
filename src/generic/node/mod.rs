mod item;

pub use item::Item;

/// Color of a tree node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
	Red,
	Black,
}

/// Child edge of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Branch {
	Left,
	Right,
}

impl Branch {
	#[inline]
	pub fn opposite(self) -> Branch {
		match self {
			Branch::Left => Branch::Right,
			Branch::Right => Branch::Left,
		}
	}
}

/// Red-black tree node.
///
/// Stores a single item along with its color and the identifiers of
/// the parent and child nodes in the storage container.
/// The parent link is a non-owning back-reference used for traversal and
/// rebalancing only.
#[derive(Clone)]
pub struct Node<K, V> {
	item: Item<K, V>,
	color: Color,
	parent: Option<usize>,
	left: Option<usize>,
	right: Option<usize>,
}

impl<K, V> Node<K, V> {
	/// Create a new red node holding `item`, attached below `parent`.
	///
	/// New nodes are always red: inserting a red node never changes the
	/// black-height of any path, so only the red-red invariant may need
	/// fixing afterwards.
	#[inline]
	pub fn new(item: Item<K, V>, parent: Option<usize>) -> Node<K, V> {
		Node {
			item,
			color: Color::Red,
			parent,
			left: None,
			right: None,
		}
	}

	#[inline]
	pub fn item(&self) -> &Item<K, V> {
		&self.item
	}

	#[inline]
	pub fn item_mut(&mut self) -> &mut Item<K, V> {
		&mut self.item
	}

	#[inline]
	pub fn into_item(self) -> Item<K, V> {
		self.item
	}

	#[inline]
	pub fn key(&self) -> &K {
		self.item.key()
	}

	#[inline]
	pub fn color(&self) -> Color {
		self.color
	}

	#[inline]
	pub fn set_color(&mut self, color: Color) {
		self.color = color
	}

	#[inline]
	pub fn is_red(&self) -> bool {
		self.color == Color::Red
	}

	#[inline]
	pub fn is_black(&self) -> bool {
		self.color == Color::Black
	}

	#[inline]
	pub fn parent(&self) -> Option<usize> {
		self.parent
	}

	#[inline]
	pub fn set_parent(&mut self, parent: Option<usize>) {
		self.parent = parent
	}

	#[inline]
	pub fn left(&self) -> Option<usize> {
		self.left
	}

	#[inline]
	pub fn right(&self) -> Option<usize> {
		self.right
	}

	#[inline]
	pub fn child(&self, branch: Branch) -> Option<usize> {
		match branch {
			Branch::Left => self.left,
			Branch::Right => self.right,
		}
	}

	#[inline]
	pub fn set_child(&mut self, branch: Branch, child: Option<usize>) {
		match branch {
			Branch::Left => self.left = child,
			Branch::Right => self.right = child,
		}
	}

	/// Write the label of the node in the DOT graph description language.
	///
	/// Requires the `dot` feature.
	#[cfg(feature = "dot")]
	#[inline]
	pub fn dot_write_label<W: std::io::Write>(&self, f: &mut W) -> std::io::Result<()>
	where
		K: std::fmt::Display,
		V: std::fmt::Display,
	{
		let color = match self.color {
			Color::Red => "R",
			Color::Black => "B",
		};
		write!(f, "{}:{} [{}]", self.item.key(), self.item.value(), color)
	}
}
