//! Release hand-off
//!
//! After a release is tagged it can be handed to a [`ReleasePublisher`]. The
//! shipped publisher runs a user script ([`HookExecutor`]) with the release
//! described in `VERSIONER_*` environment variables.

pub mod executor;
pub mod lifecycle;

pub use executor::HookExecutor;
pub use lifecycle::HookContext;

use crate::error::Result;

/// Publishes a tagged release somewhere outside the repository
pub trait ReleasePublisher {
    fn publish(&self, context: &HookContext) -> Result<()>;
}
