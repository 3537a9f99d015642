use std::collections::{HashMap, HashSet};

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::weight::Weight;

/// Default bound on tree height enforced at insert time.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Handle to a component stored in a [`ComponentArena`].
///
/// Identity of a component is its handle: two leaves with the same name and
/// weight are different components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(Index);

/// Leaf or container payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    /// Indivisible component with a stored weight
    Leaf { weight: Weight },
    /// Ordered child handles; weight is derived from them
    Container { children: Vec<ComponentId> },
}

/// Component node in the arena.
#[derive(Debug)]
pub struct ComponentNode {
    name: String,
    kind: ComponentKind,
    /// One entry per container slot referencing this node
    parents: Vec<ComponentId>,
}

impl ComponentNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, ComponentKind::Leaf { .. })
    }

    pub fn is_container(&self) -> bool {
        !self.is_leaf()
    }

    /// Direct children; empty for leaves.
    pub fn children(&self) -> &[ComponentId] {
        match &self.kind {
            ComponentKind::Leaf { .. } => &[],
            ComponentKind::Container { children } => children,
        }
    }

    /// Number of container slots currently referencing this node.
    pub fn attachments(&self) -> usize {
        self.parents.len()
    }
}

/// Arena owning every component of one or more composite trees.
///
/// Containers reference children by handle, so the same component may be
/// attached to several containers (or several times to one). A node lives
/// until [`ComponentArena::discard`] destroys it; `remove` only detaches.
#[derive(Debug)]
pub struct ComponentArena {
    arena: Arena<ComponentNode>,
    max_depth: usize,
}

impl Default for ComponentArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentArena {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            arena: Arena::new(),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.arena.contains(id.0)
    }

    pub fn get(&self, id: ComponentId) -> Option<&ComponentNode> {
        self.arena.get(id.0)
    }

    fn node(&self, id: ComponentId) -> DomainResult<&ComponentNode> {
        self.arena.get(id.0).ok_or(DomainError::UnknownComponent)
    }

    fn node_mut(&mut self, id: ComponentId) -> DomainResult<&mut ComponentNode> {
        self.arena.get_mut(id.0).ok_or(DomainError::UnknownComponent)
    }

    /// Creates a detached leaf. Fails for negative, NaN or infinite weights.
    pub fn new_leaf(&mut self, name: impl Into<String>, weight: f64) -> DomainResult<ComponentId> {
        let name = name.into();
        let weight = Weight::new(weight).ok_or_else(|| DomainError::InvalidWeight {
            name: name.clone(),
            weight,
        })?;
        trace!("new leaf {} ({})", name, weight);
        Ok(self.alloc(name, ComponentKind::Leaf { weight }))
    }

    /// Creates a detached, empty container.
    pub fn new_container(&mut self, name: impl Into<String>) -> ComponentId {
        let name = name.into();
        trace!("new container {}", name);
        self.alloc(
            name,
            ComponentKind::Container {
                children: Vec::new(),
            },
        )
    }

    fn alloc(&mut self, name: String, kind: ComponentKind) -> ComponentId {
        ComponentId(self.arena.insert(ComponentNode {
            name,
            kind,
            parents: Vec::new(),
        }))
    }

    pub fn name(&self, id: ComponentId) -> DomainResult<&str> {
        Ok(self.node(id)?.name())
    }

    pub fn kind(&self, id: ComponentId) -> DomainResult<&ComponentKind> {
        Ok(self.node(id)?.kind())
    }

    pub fn is_leaf(&self, id: ComponentId) -> DomainResult<bool> {
        Ok(self.node(id)?.is_leaf())
    }

    pub fn is_container(&self, id: ComponentId) -> DomainResult<bool> {
        Ok(self.node(id)?.is_container())
    }

    /// Direct children of a container in insertion order.
    pub fn children(&self, container: ComponentId) -> DomainResult<&[ComponentId]> {
        let node = self.node(container)?;
        match &node.kind {
            ComponentKind::Container { children } => Ok(children),
            ComponentKind::Leaf { .. } => Err(DomainError::NotAContainer(node.name.clone())),
        }
    }

    /// Weight of a component: stored for leaves, summed over the whole
    /// subtree for containers. Never cached between calls.
    ///
    /// Subtree sums are kept for the duration of one call, so a child shared
    /// by several slots is summed once and added once per slot.
    #[instrument(level = "trace", skip(self))]
    pub fn weight(&self, id: ComponentId) -> DomainResult<Weight> {
        let mut sums: HashMap<ComponentId, Weight> = HashMap::new();
        let mut stack = vec![(id, false)];

        while let Some((current, expanded)) = stack.pop() {
            if sums.contains_key(&current) {
                continue;
            }
            match &self.node(current)?.kind {
                ComponentKind::Leaf { weight } => {
                    sums.insert(current, *weight);
                }
                ComponentKind::Container { children } if expanded => {
                    let total = children.iter().filter_map(|c| sums.get(c)).copied().sum();
                    sums.insert(current, total);
                }
                ComponentKind::Container { children } => {
                    stack.push((current, true));
                    for &child in children {
                        if !sums.contains_key(&child) {
                            stack.push((child, false));
                        }
                    }
                }
            }
        }

        Ok(sums.get(&id).copied().unwrap_or(Weight::ZERO))
    }

    /// Appends `component` to the children of `container`.
    ///
    /// Rejects leaf targets, inserts that would make a component its own
    /// ancestor, and inserts that would grow the tree past `max_depth`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, container: ComponentId, component: ComponentId) -> DomainResult<()> {
        self.check_insert(container, component)?;

        if let ComponentKind::Container { children } = &mut self.node_mut(container)?.kind {
            children.push(component);
        }
        self.node_mut(component)?.parents.push(container);
        Ok(())
    }

    /// Runs every check of [`ComponentArena::insert`] without changing the
    /// arena.
    pub fn check_insert(&self, container: ComponentId, component: ComponentId) -> DomainResult<()> {
        let target = self.node(container)?;
        if target.is_leaf() {
            return Err(DomainError::NotAContainer(target.name.clone()));
        }
        let inserted = self.node(component)?;

        if component == container || self.is_ancestor(component, container)? {
            return Err(DomainError::CyclicStructure {
                container: target.name.clone(),
                component: inserted.name.clone(),
            });
        }

        let resulting = self.levels_above(container)? + self.depth(component)?;
        if resulting > self.max_depth {
            debug!(
                "rejecting insert: depth {} > {}",
                resulting, self.max_depth
            );
            return Err(DomainError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    /// Detaches the first occurrence of `component` from the direct children
    /// of `container`. Returns `false` (and changes nothing) when it is not a
    /// direct child. The detached component stays alive in the arena.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, container: ComponentId, component: ComponentId) -> DomainResult<bool> {
        let node = self.node_mut(container)?;
        let children = match &mut node.kind {
            ComponentKind::Container { children } => children,
            ComponentKind::Leaf { .. } => return Err(DomainError::NotAContainer(node.name.clone())),
        };

        let Some(pos) = children.iter().position(|&c| c == component) else {
            return Ok(false);
        };
        children.remove(pos);

        if let Some(child) = self.arena.get_mut(component.0) {
            if let Some(slot) = child.parents.iter().position(|&p| p == container) {
                child.parents.remove(slot);
            }
        }
        Ok(true)
    }

    /// Destroys `id`, detaching it from every container first, then destroys
    /// each descendant left without any attachment. Returns the number of
    /// destroyed nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn discard(&mut self, id: ComponentId) -> DomainResult<usize> {
        let parents: HashSet<ComponentId> = self.node(id)?.parents.iter().copied().collect();
        for parent in parents {
            if let Some(ComponentNode {
                kind: ComponentKind::Container { children },
                ..
            }) = self.arena.get_mut(parent.0)
            {
                children.retain(|&c| c != id);
            }
        }

        let mut destroyed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.arena.remove(current.0) else {
                continue;
            };
            destroyed += 1;

            for child in node.children() {
                if let Some(child_node) = self.arena.get_mut(child.0) {
                    if let Some(slot) = child_node.parents.iter().position(|&p| p == current) {
                        child_node.parents.remove(slot);
                    }
                    if child_node.parents.is_empty() && !stack.contains(child) {
                        stack.push(*child);
                    }
                }
            }
        }

        debug!("discarded {} nodes", destroyed);
        Ok(destroyed)
    }

    /// True if `ancestor` is reachable upwards from `id` (or equals it).
    fn is_ancestor(&self, ancestor: ComponentId, id: ComponentId) -> DomainResult<bool> {
        let mut visited = HashSet::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if current == ancestor {
                return Ok(true);
            }
            if visited.insert(current) {
                stack.extend(self.node(current)?.parents.iter().copied());
            }
        }
        Ok(false)
    }

    /// Length of the longest upward path from `id` to a root, counting `id`.
    fn levels_above(&self, id: ComponentId) -> DomainResult<usize> {
        let mut levels: HashMap<ComponentId, usize> = HashMap::new();
        let mut stack = vec![(id, false)];

        while let Some((current, expanded)) = stack.pop() {
            if levels.contains_key(&current) {
                continue;
            }
            let parents = &self.node(current)?.parents;
            if expanded {
                let above = parents
                    .iter()
                    .filter_map(|p| levels.get(p))
                    .max()
                    .copied()
                    .unwrap_or(0);
                levels.insert(current, above + 1);
            } else {
                stack.push((current, true));
                for &parent in parents {
                    if !levels.contains_key(&parent) {
                        stack.push((parent, false));
                    }
                }
            }
        }

        Ok(levels.get(&id).copied().unwrap_or(1))
    }

    /// Height of the subtree rooted at `id`; a leaf or empty container is 1.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self, id: ComponentId) -> DomainResult<usize> {
        let mut heights: HashMap<ComponentId, usize> = HashMap::new();
        let mut stack = vec![(id, false)];

        while let Some((current, expanded)) = stack.pop() {
            if heights.contains_key(&current) {
                continue;
            }
            let children = self.node(current)?.children();
            if expanded || children.is_empty() {
                let below = children
                    .iter()
                    .filter_map(|c| heights.get(c))
                    .max()
                    .copied()
                    .unwrap_or(0);
                heights.insert(current, below + 1);
            } else {
                stack.push((current, true));
                for &child in children {
                    if !heights.contains_key(&child) {
                        stack.push((child, false));
                    }
                }
            }
        }

        Ok(heights.get(&id).copied().unwrap_or(1))
    }

    /// Names of all leaves below `id` in pre-order.
    pub fn leaves(&self, id: ComponentId) -> Vec<String> {
        self.iter_preorder(id)
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.name.clone())
            .collect()
    }

    /// First component in pre-order below (and including) `root` named `name`.
    pub fn find_by_name(&self, root: ComponentId, name: &str) -> Option<ComponentId> {
        self.iter_preorder(root)
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    pub fn iter_preorder(&self, root: ComponentId) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, root)
    }

    pub fn iter_postorder(&self, root: ComponentId) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, root)
    }
}

/// Depth-first, parent-before-children traversal. A component attached in
/// several slots is yielded once per slot.
pub struct PreOrderIterator<'a> {
    arena: &'a ComponentArena,
    stack: Vec<ComponentId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a ComponentArena, root: ComponentId) -> Self {
        Self {
            arena,
            stack: vec![root],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (ComponentId, &'a ComponentNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.arena.get(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children().iter().rev().copied());
                return Some((current, node));
            }
        }
        None
    }
}

/// Depth-first, children-before-parent traversal.
pub struct PostOrderIterator<'a> {
    arena: &'a ComponentArena,
    stack: Vec<(ComponentId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a ComponentArena, root: ComponentId) -> Self {
        Self {
            arena,
            stack: vec![(root, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (ComponentId, &'a ComponentNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                for &child in node.children().iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
