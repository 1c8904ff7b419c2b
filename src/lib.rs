//! # CertiFlow
//!
//! 证书签发控制台：提交参与者信息，由外部智能体生成感谢语并发送证书邮件，
//! 在内存中跟踪每次签发的状态（success / failed / pending）
//!
//! ## 架构设计
//!
//! ### ① 能力层（Agent / Services）
//! - `agent/` - 外部智能体调用，只暴露"发送指令"的能力
//! - `services/validation` - 表单校验
//! - `services/csv_codec` - 批量导入解析、导出、模板
//! - `services/query` - 搜索、筛选、分页、统计、验证
//!
//! ### ② 流程层（Workflow）
//! - `workflow/` - 定义"一张证书"的完整处理流程
//! - `SessionContext` - 会话上下文（证书计数器 + 智能体进行中标记）
//! - `SubmissionFlow` - 签发流程（分配 ID → 调用智能体 → 结算）
//! - `RetryFlow` - 重试流程（原地更新，受重试上限约束）
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/bulk_processor` - 批量签发，严格顺序逐行处理
//! - `console` - 顶层控制器，持有记录列表和视图状态
//! - `supervisor` - 错误边界

pub mod agent;
pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod supervisor;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use agent::{AgentClient, AgentResponse};
pub use app::App;
pub use config::Config;
pub use console::{Console, SubmitMessage};
pub use error::{AppError, AppResult};
pub use models::{IssuanceRecord, IssuanceStatus, SubmissionForm};
pub use orchestrator::{BulkProgress, BulkSummary};
pub use supervisor::ErrorBoundary;
pub use workflow::{RetryOutcome, SessionContext};
