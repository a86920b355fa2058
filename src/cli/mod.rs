pub mod orchestration;

pub use orchestration::{
    ReleaseMode, ReleaseOrchestrator, ReleaseOutcome, ReleasePlan, ReleaseRequest,
};
