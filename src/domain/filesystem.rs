//! Files and folders on top of [`ComponentArena`].
//!
//! A file is a leaf whose weight is its size in bytes; a folder is a container
//! whose size is the sum of everything below it.

use crate::domain::arena::{ComponentArena, ComponentId};
use crate::domain::error::DomainResult;
use crate::domain::weight::Weight;

#[derive(Debug)]
pub struct FileSystem {
    arena: ComponentArena,
    root: ComponentId,
}

impl FileSystem {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self::with_arena(ComponentArena::new(), root_name)
    }

    /// Uses a preconfigured arena, e.g. one with a custom depth limit.
    pub fn with_arena(mut arena: ComponentArena, root_name: impl Into<String>) -> Self {
        let root = arena.new_container(root_name);
        Self { arena, root }
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    pub fn arena(&self) -> &ComponentArena {
        &self.arena
    }

    /// Adds a file of `size_bytes` under `folder`.
    ///
    /// Sizes are stored as `f64`: exact up to 2^53 bytes, rounded above.
    pub fn add_file(
        &mut self,
        folder: ComponentId,
        name: impl Into<String>,
        size_bytes: u64,
    ) -> DomainResult<ComponentId> {
        let file = self.arena.new_leaf(name, size_bytes as f64)?;
        self.attach_new(folder, file)
    }

    pub fn add_folder(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
    ) -> DomainResult<ComponentId> {
        let folder = self.arena.new_container(name);
        self.attach_new(parent, folder)
    }

    fn attach_new(&mut self, parent: ComponentId, created: ComponentId) -> DomainResult<ComponentId> {
        if let Err(e) = self.arena.insert(parent, created) {
            self.arena.discard(created)?;
            return Err(e);
        }
        Ok(created)
    }

    /// Attaches an existing file or folder under `parent`.
    pub fn attach(&mut self, parent: ComponentId, component: ComponentId) -> DomainResult<()> {
        self.arena.insert(parent, component)
    }

    /// Detaches `child` from `parent` without deleting it.
    pub fn detach(&mut self, parent: ComponentId, child: ComponentId) -> DomainResult<bool> {
        self.arena.remove(parent, child)
    }

    /// Detaches and deletes a component and everything only it referenced.
    pub fn delete(&mut self, component: ComponentId) -> DomainResult<usize> {
        self.arena.discard(component)
    }

    pub fn size(&self, component: ComponentId) -> DomainResult<Weight> {
        self.arena.weight(component)
    }

    pub fn total_size(&self) -> DomainResult<Weight> {
        self.size(self.root)
    }
}
