//! Analysis engine for determining version bumps from commits

pub mod bump_policy;

pub use bump_policy::BumpPolicy;
