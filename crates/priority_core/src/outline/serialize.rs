//! Outline export.

use crate::model::priority::PriorityNode;
use crate::outline::OutlineConfig;

/// Serializes a forest into outline text.
///
/// Root nodes get one marker, their children two, and so on. Each node is
/// followed immediately by its own subtree.
pub fn serialize(roots: &[PriorityNode], config: &OutlineConfig) -> String {
    let marker = config.marker();
    let mut out = String::new();
    let mut stack: Vec<(&PriorityNode, usize)> =
        roots.iter().rev().map(|node| (node, 1)).collect();
    while let Some((node, depth)) = stack.pop() {
        out.extend(std::iter::repeat(marker).take(depth));
        out.push(' ');
        out.push_str(node.content.as_str());
        out.push('\n');
        stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    out
}
