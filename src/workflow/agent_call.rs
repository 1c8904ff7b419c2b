use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::agent::{AgentClient, AgentOutcome};
use crate::error::AgentError;
use crate::workflow::session::SessionContext;

/// 带超时的智能体调用
///
/// 调用前后维护会话里的"智能体进行中"标记
#[derive(Clone)]
pub struct AgentCall {
    agent: Arc<dyn AgentClient>,
    agent_id: String,
    timeout: Duration,
}

impl AgentCall {
    pub fn new(agent: Arc<dyn AgentClient>, agent_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent,
            agent_id: agent_id.into(),
            timeout,
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// 发送指令并给出结论，永远不会失败
    pub async fn run(
        &self,
        session: &mut SessionContext,
        instruction: &str,
        fallback_email: &str,
    ) -> AgentOutcome {
        session.mark_agent_active(&self.agent_id);

        let result = match tokio::time::timeout(
            self.timeout,
            self.agent.invoke(instruction, &self.agent_id),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout(self.timeout.as_secs())),
        };

        session.clear_agent_active();

        match &result {
            Ok(resp) => debug!("智能体响应: success={}", resp.success),
            Err(e) => warn!("⚠️ 智能体调用失败: {}", e),
        }

        AgentOutcome::interpret(result, fallback_email)
    }
}
