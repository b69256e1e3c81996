//! The minimal element-tree capability the activity extractor needs.
//!
//! Any parsed track file that can hand out its root element and walk children
//! by tag name can be measured; the extractor never touches a parser directly.

/// A handle to one element of a parsed track document.
///
/// Handles are cheap to copy and borrow from the document that produced them.
pub trait TrackNode: Copy {
    /// First child element, restricted to `tag` when given.
    fn first_child(&self, tag: Option<&str>) -> Option<Self>;

    /// Next sibling element after this one, restricted to `tag` when given.
    fn next_sibling(&self, tag: Option<&str>) -> Option<Self>;

    /// Attribute value read as a double. `None` when the attribute is missing
    /// or does not parse as a number.
    fn attr(&self, name: &str) -> Option<f64>;

    /// Text content of the element, `None` when it has none.
    fn text(&self) -> Option<String>;

    /// Iterates over the children tagged `tag`, in document order.
    fn children(&self, tag: &'static str) -> Children<Self> {
        Children {
            next: self.first_child(Some(tag)),
            tag,
        }
    }
}

pub trait TrackDocument {
    type Node<'a>: TrackNode
    where
        Self: 'a;

    fn root(&self) -> Option<Self::Node<'_>>;
}

pub struct Children<N> {
    next: Option<N>,
    tag: &'static str,
}

impl<N: TrackNode> Iterator for Children<N> {
    type Item = N;

    fn next(&mut self) -> Option<N> {
        let current = self.next.take()?;
        self.next = current.next_sibling(Some(self.tag));
        Some(current)
    }
}
