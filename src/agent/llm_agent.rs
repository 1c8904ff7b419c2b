//! LLM 智能体客户端
//!
//! 不经过远程智能体，直接用 OpenAI 兼容接口生成感谢语
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）
//!
//! 这个后端只负责生成文案，邮件由下游系统发送；`email_sent_to` 回退为参与者邮箱。

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::agent::{AgentClient, AgentPayload, AgentResponse, AgentResult};
use crate::config::Config;
use crate::error::AgentError;

const SYSTEM_MESSAGE: &str = "You are a certificate assistant. Follow the instruction and reply with a single JSON object \
{\"appreciation_message\": string, \"email_sent_to\": string} and nothing else.";

/// LLM 智能体客户端
pub struct LlmAgentClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmAgentClient {
    /// 创建新的 LLM 智能体客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 发送一轮对话并返回文本内容
    async fn send_to_llm(&self, user_message: &str) -> Result<String, AgentError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_MESSAGE)
            .build()
            .map_err(|e| AgentError::llm(&self.model_name, e))?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| AgentError::llm(&self.model_name, e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(0.7)
            .max_tokens(512u32)
            .build()
            .map_err(|e| AgentError::llm(&self.model_name, e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AgentError::llm(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .ok_or_else(|| AgentError::llm(&self.model_name, "LLM 返回内容为空"))
    }
}

#[async_trait]
impl AgentClient for LlmAgentClient {
    async fn invoke(&self, instruction: &str, agent_id: &str) -> Result<AgentResponse, AgentError> {
        debug!("LLM 后端代替智能体 {} 处理指令", agent_id);
        let content = self.send_to_llm(instruction).await?;
        Ok(parse_llm_reply(&content))
    }
}

#[derive(Debug, Deserialize)]
struct LlmReply {
    #[serde(default)]
    appreciation_message: Option<String>,
    #[serde(default)]
    email_sent_to: Option<String>,
}

/// 解析 LLM 回复
///
/// 优先按 JSON 解析（允许被 ``` 代码块包裹），否则把整段文本当作感谢语
fn parse_llm_reply(content: &str) -> AgentResponse {
    let body = strip_code_fence(content);

    match serde_json::from_str::<LlmReply>(body) {
        Ok(reply) => AgentResponse {
            success: true,
            response: Some(AgentPayload {
                result: Some(AgentResult {
                    appreciation_message: reply.appreciation_message,
                    email_sent_to: reply.email_sent_to,
                }),
                message: None,
            }),
            error: None,
        },
        Err(_) => {
            debug!("LLM 回复不是 JSON，按纯文本处理");
            AgentResponse::message_only(body)
        }
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // 去掉语言标记，例如 ```json
    let inner = inner.split_once('\n').map_or(inner, |(_, rest)| rest);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
