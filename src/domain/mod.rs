//! Domain logic - the version grammar and pure tagging rules, independent of any remote

pub mod branch;
pub mod bump;
pub mod ordering;
pub mod prefix;
pub mod version;

pub use branch::BranchContext;
pub use bump::{bump, BumpKind};
pub use ordering::compare;
pub use prefix::PrefixPlanner;
pub use version::{VersionGrammar, VersionRecord};
