//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod changelog;
pub mod commit;
pub mod tag;
pub mod version;

pub use branch::{is_develop, is_hotfix, is_release, BranchKind};
pub use changelog::Changelog;
pub use commit::{Commit, CommitParser, Note, Revert};
pub use tag::Tag;
pub use version::VersionBump;
