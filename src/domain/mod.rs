//! Domain logic - pure version and commit rules independent of git operations

pub mod branch;
pub mod build;
pub mod commit;
pub mod prerelease;
pub mod version;

pub use branch::{BranchConfig, BranchPolicyTable};
pub use build::BuildInputs;
pub use commit::{classify, ClassifiedCommit, Commit};
pub use prerelease::PreRelease;
pub use version::{BumpLevel, Version, INITIAL_VERSION};
