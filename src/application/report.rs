//! Display collaborator: listings, tree rendering and summaries
//!
//! Everything here only reads the arena through its public traversal API.

use termtree::Tree;
use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ComponentArena, ComponentId, ComponentKind, Weight};

/// How a weight is called and which unit it is printed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    /// e.g. "Size", "Salary"
    pub label: String,
    /// e.g. "bytes"; empty for unit-less output
    pub unit: String,
}

impl Measure {
    pub fn size(unit: impl Into<String>) -> Self {
        Self {
            label: "Size".into(),
            unit: unit.into(),
        }
    }

    pub fn salary(unit: impl Into<String>) -> Self {
        Self {
            label: "Salary".into(),
            unit: unit.into(),
        }
    }

    pub fn format(&self, weight: Weight) -> String {
        if self.unit.is_empty() {
            weight.to_string()
        } else {
            format!("{} {}", weight, self.unit)
        }
    }
}

/// Flat listing of a container's direct children followed by the total.
///
/// ```text
/// docs contains:
/// - a.txt | Size: 500 bytes
/// - b.txt | Size: 800 bytes
/// Total Size: 1300 bytes
/// ```
#[instrument(level = "debug", skip(arena))]
pub fn listing(
    arena: &ComponentArena,
    container: ComponentId,
    measure: &Measure,
) -> ApplicationResult<Vec<String>> {
    let mut lines = vec![format!("{} contains:", arena.name(container)?)];
    for &child in arena.children(container)? {
        lines.push(format!(
            "- {} | {}: {}",
            arena.name(child)?,
            measure.label,
            measure.format(arena.weight(child)?)
        ));
    }
    lines.push(format!(
        "Total {}: {}",
        measure.label,
        measure.format(arena.weight(container)?)
    ));
    Ok(lines)
}

/// Renders the subtree below `root` as a [`termtree::Tree`].
///
/// Built bottom-up from a post-order walk, so subtree weights are summed once
/// and deep trees need no recursion.
#[instrument(level = "debug", skip(arena))]
pub fn to_tree(
    arena: &ComponentArena,
    root: ComponentId,
    measure: &Measure,
    show_weights: bool,
) -> ApplicationResult<Tree<String>> {
    let mut built: Vec<(Tree<String>, Weight)> = Vec::new();

    for (_, node) in arena.iter_postorder(root) {
        let split = built
            .len()
            .checked_sub(node.children().len())
            .ok_or_else(|| ApplicationError::Inconsistent(node.name().to_string()))?;
        let children = built.split_off(split);

        let weight = match node.kind() {
            ComponentKind::Leaf { weight } => *weight,
            ComponentKind::Container { .. } => children.iter().map(|(_, w)| *w).sum(),
        };
        let label = if show_weights {
            format!("{} ({})", node.name(), measure.format(weight))
        } else {
            node.name().to_string()
        };

        let tree = Tree::new(label).with_leaves(children.into_iter().map(|(t, _)| t));
        built.push((tree, weight));
    }

    built
        .pop()
        .map(|(tree, _)| tree)
        .ok_or_else(|| ApplicationError::Domain(crate::domain::DomainError::UnknownComponent))
}

/// Shape and total of a subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSummary {
    pub name: String,
    pub leaves: usize,
    pub containers: usize,
    pub depth: usize,
    pub total: Weight,
}

#[instrument(level = "debug", skip(arena))]
pub fn summary(arena: &ComponentArena, root: ComponentId) -> ApplicationResult<TreeSummary> {
    let (leaves, containers) = arena
        .iter_preorder(root)
        .fold((0, 0), |(l, c), (_, node)| {
            if node.is_leaf() {
                (l + 1, c)
            } else {
                (l, c + 1)
            }
        });

    Ok(TreeSummary {
        name: arena.name(root)?.to_string(),
        leaves,
        containers,
        depth: arena.depth(root)?,
        total: arena.weight(root)?,
    })
}
