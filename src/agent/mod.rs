//! 智能体接入层
//!
//! 外部智能体只暴露一个能力：接收一段自然语言指令，生成感谢语并发送证书邮件。
//! 工作流只依赖 `AgentClient`，具体走 HTTP 还是直接调 LLM 由配置决定。

pub mod http_agent;
pub mod llm_agent;
pub mod prompt;
pub mod response;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AgentBackend, Config};
use crate::error::{AgentError, ConfigError};

pub use http_agent::HttpAgentClient;
pub use llm_agent::LlmAgentClient;
pub use prompt::certificate_instruction;
pub use response::{AgentOutcome, AgentPayload, AgentResponse, AgentResult};

/// 外部智能体
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// 发送指令并等待智能体完成
    async fn invoke(&self, instruction: &str, agent_id: &str) -> Result<AgentResponse, AgentError>;
}

/// 按配置创建智能体客户端
pub fn build_agent(config: &Config) -> Result<Arc<dyn AgentClient>, ConfigError> {
    let agent: Arc<dyn AgentClient> = match config.agent_backend {
        AgentBackend::Http => Arc::new(HttpAgentClient::new(config)?),
        AgentBackend::Llm => Arc::new(LlmAgentClient::new(config)),
    };
    Ok(agent)
}
