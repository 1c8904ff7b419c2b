pub mod agent_call;
pub mod retry;
pub mod session;
pub mod submission;

pub use agent_call::AgentCall;
pub use retry::{RetryFlow, RetryOutcome};
pub use session::SessionContext;
pub use submission::SubmissionFlow;
