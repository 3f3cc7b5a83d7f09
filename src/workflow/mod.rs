pub mod submission_ctx;
pub mod submission_flow;

pub use submission_ctx::SubmissionCtx;
pub use submission_flow::{BatchStatus, SubmissionFlow, SubmissionOutcome};
