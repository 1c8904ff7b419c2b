//! 重试流程
//!
//! 对已有记录重新调用智能体，原地更新，不分配新的证书 ID

use tracing::{info, warn};

use crate::agent::certificate_instruction;
use crate::models::{IssuanceRecord, IssuanceStatus, RetryRefusal};
use crate::workflow::agent_call::AgentCall;
use crate::workflow::session::SessionContext;

/// 重试结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// 没有这条记录
    NotFound,
    /// 已达到重试上限，记录未改动
    Exhausted { retries: u32 },
    /// 记录仍在处理中
    InFlight,
    /// 记录不是 `failed`，记录未改动
    NotFailed { status: IssuanceStatus },
    /// 已重新调用智能体并结算
    Completed {
        status: IssuanceStatus,
        retries: u32,
    },
}

impl RetryOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RetryOutcome::Completed { .. })
    }
}

/// 重试流程
pub struct RetryFlow {
    agent_call: AgentCall,
    max_retries: u32,
}

impl RetryFlow {
    pub fn new(agent_call: AgentCall, max_retries: u32) -> Self {
        Self {
            agent_call,
            max_retries,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// 重试指定证书
    ///
    /// 只处理 `failed` 记录：先把状态切回 `pending`，再调用智能体；无论成败重试次数加一
    pub async fn run(
        &self,
        session: &mut SessionContext,
        records: &mut [IssuanceRecord],
        certificate_id: &str,
    ) -> RetryOutcome {
        let Some(record) = records
            .iter_mut()
            .find(|r| r.certificate_id == certificate_id)
        else {
            warn!("[{}] ⚠️ 找不到要重试的记录", certificate_id);
            return RetryOutcome::NotFound;
        };

        match record.begin_retry(self.max_retries) {
            Ok(()) => {}
            Err(RetryRefusal::Exhausted { retries }) => {
                info!("[{}] 已重试 {} 次，不再重试", certificate_id, retries);
                return RetryOutcome::Exhausted { retries };
            }
            Err(RetryRefusal::InFlight) => return RetryOutcome::InFlight,
            Err(RetryRefusal::NotFailed) => {
                info!("[{}] 记录状态为 {}，无需重试", certificate_id, record.status);
                return RetryOutcome::NotFailed {
                    status: record.status,
                };
            }
        }

        info!(
            "[{}] 🔄 第 {}/{} 次重试...",
            certificate_id,
            record.retries + 1,
            self.max_retries
        );

        let instruction = certificate_instruction(record);
        let outcome = self
            .agent_call
            .run(session, &instruction, &record.email)
            .await;
        record.settle_retry(outcome);

        match record.status {
            IssuanceStatus::Success => info!("[{}] ✓ 重试成功", certificate_id),
            _ => warn!(
                "[{}] ❌ 重试失败: {}",
                certificate_id, record.appreciation_message
            ),
        }

        RetryOutcome::Completed {
            status: record.status,
            retries: record.retries,
        }
    }
}
