pub mod form;
pub mod record;
pub mod sample;

pub use form::{today_string, SubmissionForm};
pub use record::{FailureTexts, IssuanceRecord, IssuanceStatus, RetryRefusal};
pub use sample::{sample_records, SAMPLE_RECORD_COUNT};
