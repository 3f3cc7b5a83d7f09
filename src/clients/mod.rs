pub mod automation_client;

pub use automation_client::{AutomationClient, SubmissionTransport, SubmitResponse};
