//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! console::Console (持有记录列表和会话)
//!     ↓
//! orchestrator::BulkProcessor (处理 Vec<BulkRow>)
//!     ↓
//! workflow::SubmissionFlow / RetryFlow (处理单条记录)
//!     ↓
//! agent (能力层：智能体调用)
//! ```

pub mod bulk_processor;

pub use bulk_processor::{BulkProcessor, BulkProgress, BulkSummary};
