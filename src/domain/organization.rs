//! Organization chart on top of [`ComponentArena`].
//!
//! Individual contributors are leaves weighted by salary. A manager is a unit
//! (container) whose first child is the manager's own position, followed by
//! their reports, so the unit's weight is its total payroll.

use std::collections::HashMap;
use std::fmt;

use crate::domain::arena::{ComponentArena, ComponentId};
use crate::domain::error::DomainResult;
use crate::domain::weight::Weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Developer,
    Designer,
    Manager,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Developer => "Developer",
            Role::Designer => "Designer",
            Role::Manager => "Manager",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct Organization {
    arena: ComponentArena,
    root: ComponentId,
    roles: HashMap<ComponentId, Role>,
}

impl Organization {
    /// Creates the organization with its top manager.
    pub fn new(ceo: impl Into<String>, salary: f64) -> DomainResult<Self> {
        Self::with_arena(ComponentArena::new(), ceo, salary)
    }

    /// Uses a preconfigured arena, e.g. one with a custom depth limit.
    pub fn with_arena(
        mut arena: ComponentArena,
        ceo: impl Into<String>,
        salary: f64,
    ) -> DomainResult<Self> {
        let ceo = ceo.into();
        let position = arena.new_leaf(ceo.clone(), salary)?;
        let root = arena.new_container(ceo);
        arena.insert(root, position)?;

        let mut roles = HashMap::new();
        roles.insert(position, Role::Manager);
        roles.insert(root, Role::Manager);
        Ok(Self { arena, root, roles })
    }

    pub fn root(&self) -> ComponentId {
        self.root
    }

    pub fn arena(&self) -> &ComponentArena {
        &self.arena
    }

    /// Hires an individual contributor into `unit`.
    pub fn hire(
        &mut self,
        unit: ComponentId,
        name: impl Into<String>,
        role: Role,
        salary: f64,
    ) -> DomainResult<ComponentId> {
        let employee = self.arena.new_leaf(name, salary)?;
        if let Err(e) = self.arena.insert(unit, employee) {
            self.arena.discard(employee)?;
            return Err(e);
        }
        self.roles.insert(employee, role);
        Ok(employee)
    }

    /// Hires a manager into `parent` and returns the new manager's unit.
    pub fn hire_manager(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
        salary: f64,
    ) -> DomainResult<ComponentId> {
        let name = name.into();
        let position = self.arena.new_leaf(name.clone(), salary)?;
        let unit = self.arena.new_container(name);
        self.arena.insert(unit, position)?;
        if let Err(e) = self.arena.insert(parent, unit) {
            self.arena.discard(unit)?;
            return Err(e);
        }
        self.roles.insert(position, Role::Manager);
        self.roles.insert(unit, Role::Manager);
        Ok(unit)
    }

    /// Moves an employee or unit from one unit into another. A rejected
    /// transfer leaves both units untouched.
    pub fn transfer(
        &mut self,
        from: ComponentId,
        to: ComponentId,
        member: ComponentId,
    ) -> DomainResult<bool> {
        if !self.arena.children(from)?.contains(&member) {
            return Ok(false);
        }
        self.arena.check_insert(to, member)?;
        self.arena.remove(from, member)?;
        self.arena.insert(to, member)?;
        Ok(true)
    }

    /// Removes `member` from `unit`. The member stays known to the arena and
    /// can be brought back with [`Organization::rehire`].
    pub fn dismiss(&mut self, unit: ComponentId, member: ComponentId) -> DomainResult<bool> {
        self.arena.remove(unit, member)
    }

    pub fn rehire(&mut self, unit: ComponentId, member: ComponentId) -> DomainResult<()> {
        self.arena.insert(unit, member)
    }

    pub fn role(&self, member: ComponentId) -> Option<Role> {
        self.roles.get(&member).copied()
    }

    pub fn salary(&self, member: ComponentId) -> DomainResult<Weight> {
        self.arena.weight(member)
    }

    pub fn payroll(&self, unit: ComponentId) -> DomainResult<Weight> {
        self.arena.weight(unit)
    }

    /// Number of people below `unit`, manager included.
    pub fn headcount(&self, unit: ComponentId) -> usize {
        self.arena.leaves(unit).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_unit_includes_own_salary() {
        let mut org = Organization::new("Winston", 25000.0).unwrap();
        let root = org.root();
        org.hire(root, "John Wick", Role::Developer, 15000.0).unwrap();
        org.hire(root, "Caine Lee", Role::Developer, 15000.0).unwrap();
        org.hire(root, "Charon", Role::Designer, 12000.0).unwrap();

        assert_eq!(org.payroll(root).unwrap().value(), 67000.0);
        assert_eq!(org.role(root), Some(Role::Manager));
        assert_eq!(org.headcount(root), 4);
    }

    #[test]
    fn test_hire_with_negative_salary_fails() {
        let mut org = Organization::new("Winston", 25000.0).unwrap();
        let root = org.root();
        assert!(org.hire(root, "Nobody", Role::Designer, -1.0).is_err());
        assert_eq!(org.headcount(root), 1);
    }

    #[test]
    fn test_with_arena_keeps_depth_limit() {
        let mut org = Organization::with_arena(ComponentArena::with_max_depth(2), "Winston", 1.0)
            .unwrap();
        let root = org.root();
        assert!(org.hire(root, "Charon", Role::Designer, 1.0).is_ok());
        assert!(org.hire_manager(root, "Bowery King", 1.0).is_err());
        assert_eq!(org.arena().max_depth(), 2);
    }
}
