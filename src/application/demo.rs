//! Example hierarchies printed by `rscomposite demo`.

use crate::domain::{ComponentArena, ComponentId, DomainResult, FileSystem, Organization, Role};

/// ```text
/// root
/// ├── docs
/// │   ├── a.txt (500)
/// │   └── b.txt (800)
/// └── c.txt (1200)
/// ```
pub struct FileSystemExample {
    pub fs: FileSystem,
    pub docs: ComponentId,
}

pub fn filesystem_example(max_depth: usize) -> DomainResult<FileSystemExample> {
    let mut fs = FileSystem::with_arena(ComponentArena::with_max_depth(max_depth), "root");
    let docs = fs.add_folder(fs.root(), "docs")?;
    fs.add_file(docs, "a.txt", 500)?;
    fs.add_file(docs, "b.txt", 800)?;
    fs.add_file(fs.root(), "c.txt", 1200)?;
    Ok(FileSystemExample { fs, docs })
}

/// Winston's team: two developers and a designer, plus a sub-team led by
/// the Bowery King.
pub struct OrganizationExample {
    pub org: Organization,
    pub sub_team: ComponentId,
}

pub fn organization_example(max_depth: usize) -> DomainResult<OrganizationExample> {
    let mut org = Organization::with_arena(
        ComponentArena::with_max_depth(max_depth),
        "Winston",
        25000.0,
    )?;
    let root = org.root();
    org.hire(root, "John Wick", Role::Developer, 15000.0)?;
    org.hire(root, "Caine Lee", Role::Developer, 15000.0)?;
    org.hire(root, "Charon", Role::Designer, 12000.0)?;

    let sub_team = org.hire_manager(root, "Bowery King", 20000.0)?;
    org.hire(sub_team, "Sofia", Role::Designer, 14000.0)?;
    Ok(OrganizationExample { org, sub_team })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_example_totals() {
        let example = filesystem_example(16).unwrap();
        assert_eq!(example.fs.size(example.docs).unwrap().value(), 1300.0);
        assert_eq!(example.fs.total_size().unwrap().value(), 2500.0);
    }

    #[test]
    fn test_organization_example_payroll() {
        let example = organization_example(16).unwrap();
        let org = &example.org;
        assert_eq!(org.payroll(example.sub_team).unwrap().value(), 34000.0);
        assert_eq!(org.payroll(org.root()).unwrap().value(), 101000.0);
    }

    #[test]
    fn test_organization_example_honours_depth_limit() {
        // Winston -> Bowery King's unit -> Sofia has height 3
        assert!(organization_example(2).is_err());
        assert!(organization_example(3).is_ok());
    }
}
