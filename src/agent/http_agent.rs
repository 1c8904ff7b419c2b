//! HTTP 智能体客户端
//!
//! POST `{"message", "agent_id"}` 到配置的地址，响应体即 `AgentResponse`

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::agent::{AgentClient, AgentResponse};
use crate::config::Config;
use crate::error::{AgentError, ConfigError};
use crate::utils::logging::truncate_text;

/// HTTP 智能体客户端
pub struct HttpAgentClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpAgentClient {
    /// 创建新的 HTTP 智能体客户端
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.agent_timeout_secs.max(1)))
            .build()
            .map_err(|e| ConfigError::ClientBuildFailed(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.agent_api_url.clone(),
            api_key: config.agent_api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> Result<AgentResponse, AgentError> {
        debug!("调用智能体 {}，地址: {}", agent_id, self.endpoint);
        debug!("指令: {}", truncate_text(instruction, 120));

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "message": instruction, "agent_id": agent_id }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AgentError::request_failed(&self.endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::request_failed(&self.endpoint, e))?;

        parse_agent_body(&self.endpoint, status.as_u16(), &body)
    }
}

/// 解析响应体
///
/// 非 2xx 的响应如果带了约定结构的错误信息，按智能体失败处理；否则视为请求错误
fn parse_agent_body(endpoint: &str, status: u16, body: &str) -> Result<AgentResponse, AgentError> {
    let parsed = serde_json::from_str::<AgentResponse>(body);

    if !(200..300).contains(&status) {
        warn!("智能体返回 HTTP {}: {}", status, truncate_text(body, 200));
        return match parsed {
            Ok(resp) if !resp.success && resp.error_message().is_some() => Ok(resp),
            _ => Err(AgentError::BadStatus {
                endpoint: endpoint.to_string(),
                status,
            }),
        };
    }

    parsed.map_err(|e| AgentError::InvalidResponse(e.to_string()))
}
