//! Upward scans over the markup tree.
//!
//! Change-tracking annotations wrap runs (`w:del`, `w:moveFrom`, `w:ins`,
//! `w:moveTo`). Whether a run is affected is answered by walking from the run
//! towards the root and stopping at a boundary (its paragraph, or the body).

use roxmltree::Node;

use crate::markup::W_NS;

/// A change-tracking annotation that can enclose a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackChange {
    /// `w:del` - tracked deletion
    Deletion,
    /// `w:moveFrom` - origin of a tracked move
    MoveFrom,
    /// `w:ins` - tracked insertion
    Insertion,
    /// `w:moveTo` - destination of a tracked move
    MoveTo,
}

impl TrackChange {
    /// Classify a node as a change-tracking wrapper.
    pub fn from_node(node: &Node) -> Option<Self> {
        if !node.is_element() || node.tag_name().namespace() != Some(W_NS) {
            return None;
        }
        match node.tag_name().name() {
            "del" => Some(TrackChange::Deletion),
            "moveFrom" => Some(TrackChange::MoveFrom),
            "ins" => Some(TrackChange::Insertion),
            "moveTo" => Some(TrackChange::MoveTo),
            _ => None,
        }
    }

    /// Content under this marker is no longer part of the document text.
    pub fn removes_content(self) -> bool {
        matches!(self, TrackChange::Deletion | TrackChange::MoveFrom)
    }
}

/// Returns true if `node` is the WordprocessingML element `name`.
pub fn is_w(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().namespace() == Some(W_NS) && node.tag_name().name() == name
}

/// Find the nearest node, starting at `node` itself and moving upward, that
/// satisfies `is_marker`. The scan stops (exclusive) at the first node
/// satisfying `is_boundary`.
pub fn nearest_enclosing<'a, 'input, B, M>(
    node: Node<'a, 'input>,
    is_boundary: B,
    is_marker: M,
) -> Option<Node<'a, 'input>>
where
    B: Fn(&Node<'a, 'input>) -> bool,
    M: Fn(&Node<'a, 'input>) -> bool,
{
    node.ancestors()
        .take_while(|n| !is_boundary(n))
        .find(|n| is_marker(n))
}

/// The nearest change-tracking marker of a kind accepted by `kind` between
/// `node` and its paragraph (or body) boundary.
pub fn enclosing_change<K>(node: Node, kind: K) -> Option<TrackChange>
where
    K: Fn(TrackChange) -> bool,
{
    nearest_enclosing(
        node,
        |n| is_w(n, "p") || is_w(n, "body"),
        |n| TrackChange::from_node(n).map_or(false, |change| kind(change)),
    )
    .and_then(|n| TrackChange::from_node(&n))
}
