//! 单条签发流程 - 流程层
//!
//! 核心职责：定义"一张证书"的完整处理流程
//!
//! 流程顺序：
//! 1. 分配证书 ID → 创建 pending 记录
//! 2. 调用智能体（生成感谢语 + 发送邮件）
//! 3. 根据结果结算为 success / failed
//!
//! 流程只返回记录，不写入列表；查重由调用方在进入流程前完成。

use chrono::Utc;
use tracing::{info, warn};

use crate::agent::certificate_instruction;
use crate::models::{FailureTexts, IssuanceRecord, IssuanceStatus, SubmissionForm};
use crate::utils::logging::truncate_text;
use crate::workflow::agent_call::AgentCall;
use crate::workflow::session::SessionContext;

/// 单条签发流程
///
/// - 不持有记录列表
/// - 只依赖智能体调用能力
pub struct SubmissionFlow {
    agent_call: AgentCall,
    verbose_logging: bool,
}

impl SubmissionFlow {
    /// 创建新的签发流程
    pub fn new(agent_call: AgentCall, verbose_logging: bool) -> Self {
        Self {
            agent_call,
            verbose_logging,
        }
    }

    /// 签发一张证书
    ///
    /// `form` 必须已经去空白并通过校验。无论智能体成功与否都会返回一条结算后的记录。
    pub async fn run(&self, session: &mut SessionContext, form: &SubmissionForm) -> IssuanceRecord {
        let certificate_id = session.next_certificate_id();
        let mut record = IssuanceRecord::pending(certificate_id, form, Utc::now());

        info!(
            "[{}] 📤 正在为 {} <{}> 签发「{}」证书...",
            record.certificate_id, record.name, record.email, record.event
        );

        let instruction = certificate_instruction(&record);
        let outcome = self
            .agent_call
            .run(session, &instruction, &record.email)
            .await;
        record.settle(outcome, FailureTexts::SUBMISSION);

        self.log_result(&record);
        record
    }

    fn log_result(&self, record: &IssuanceRecord) {
        match record.status {
            IssuanceStatus::Success => {
                info!(
                    "[{}] ✓ 证书已生成并发送至 {}",
                    record.certificate_id,
                    record.delivery_address()
                );
                if self.verbose_logging {
                    info!(
                        "[{}] 感谢语: {}",
                        record.certificate_id,
                        truncate_text(&record.appreciation_message, 80)
                    );
                }
            }
            _ => warn!(
                "[{}] ❌ 签发失败: {}",
                record.certificate_id, record.appreciation_message
            ),
        }
    }
}
