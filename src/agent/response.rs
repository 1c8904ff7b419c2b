//! 智能体响应结构
//!
//! `{success, response?: {result?: {appreciation_message?, email_sent_to?}, message?}, error?}`

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// 智能体调用的原始响应
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<AgentPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AgentResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appreciation_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_sent_to: Option<String>,
}

impl AgentResponse {
    /// 成功响应，携带生成的感谢语和实际发送地址
    pub fn delivered(appreciation_message: impl Into<String>, email_sent_to: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(AgentPayload {
                result: Some(AgentResult {
                    appreciation_message: Some(appreciation_message.into()),
                    email_sent_to: Some(email_sent_to.into()),
                }),
                message: None,
            }),
            error: None,
        }
    }

    /// 只有一段文本消息的成功响应
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(AgentPayload {
                result: None,
                message: Some(message.into()),
            }),
            error: None,
        }
    }

    /// 智能体明确返回失败
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(error.into()),
        }
    }

    fn result(&self) -> Option<&AgentResult> {
        self.response.as_ref().and_then(|p| p.result.as_ref())
    }

    /// 感谢语：优先 `result.appreciation_message`，其次 `response.message`
    pub fn appreciation_message(&self) -> Option<&str> {
        self.result()
            .and_then(|r| non_empty(r.appreciation_message.as_deref()))
            .or_else(|| {
                self.response
                    .as_ref()
                    .and_then(|p| non_empty(p.message.as_deref()))
            })
    }

    pub fn email_sent_to(&self) -> Option<&str> {
        self.result().and_then(|r| non_empty(r.email_sent_to.as_deref()))
    }

    pub fn error_message(&self) -> Option<&str> {
        non_empty(self.error.as_deref())
    }
}

/// 一次智能体调用的结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentOutcome {
    /// 生成并发送成功
    Delivered {
        appreciation_message: String,
        email_sent_to: String,
    },
    /// 智能体明确返回失败，可能带原因
    Rejected(Option<String>),
    /// 网络错误、超时或响应无法解析
    Unreachable(String),
}

/// 成功但没有返回感谢语时使用
pub const DEFAULT_APPRECIATION_MESSAGE: &str = "Certificate of appreciation generated successfully.";

impl AgentOutcome {
    /// 解释调用结果
    ///
    /// `fallback_email` 用于智能体未确认发送地址的情况
    pub fn interpret(result: Result<AgentResponse, AgentError>, fallback_email: &str) -> Self {
        match result {
            Ok(response) if response.success => AgentOutcome::Delivered {
                appreciation_message: response
                    .appreciation_message()
                    .unwrap_or(DEFAULT_APPRECIATION_MESSAGE)
                    .to_string(),
                email_sent_to: response
                    .email_sent_to()
                    .unwrap_or(fallback_email)
                    .to_string(),
            },
            Ok(response) => AgentOutcome::Rejected(response.error_message().map(str::to_string)),
            Err(e) => AgentOutcome::Unreachable(e.to_string()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_success_payload() {
        let raw = r#"{
            "success": true,
            "response": {
                "result": {
                    "appreciation_message": "Thank you, Alice.",
                    "email_sent_to": "alice@example.com"
                }
            }
        }"#;
        let response: AgentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.appreciation_message(), Some("Thank you, Alice."));
        assert_eq!(response.email_sent_to(), Some("alice@example.com"));
    }

    #[test]
    fn test_deserialize_failure_payload() {
        let response: AgentResponse =
            serde_json::from_str(r#"{"success": false, "error": "quota exceeded"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.error_message(), Some("quota exceeded"));
    }

    #[test]
    fn test_message_falls_back_to_response_message() {
        let outcome = AgentOutcome::interpret(Ok(AgentResponse::message_only("Done.")), "a@x.com");
        assert_eq!(
            outcome,
            AgentOutcome::Delivered {
                appreciation_message: "Done.".to_string(),
                email_sent_to: "a@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_fields_fall_back_to_defaults() {
        let outcome = AgentOutcome::interpret(Ok(AgentResponse::delivered("", "")), "a@x.com");
        assert_eq!(
            outcome,
            AgentOutcome::Delivered {
                appreciation_message: DEFAULT_APPRECIATION_MESSAGE.to_string(),
                email_sent_to: "a@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_rejected_and_unreachable() {
        assert_eq!(
            AgentOutcome::interpret(Ok(AgentResponse::failed("bad input")), "a@x.com"),
            AgentOutcome::Rejected(Some("bad input".to_string()))
        );
        assert_eq!(
            AgentOutcome::interpret(Ok(AgentResponse::failed("")), "a@x.com"),
            AgentOutcome::Rejected(None)
        );
        assert!(matches!(
            AgentOutcome::interpret(Err(AgentError::Timeout(5)), "a@x.com"),
            AgentOutcome::Unreachable(_)
        ));
    }
}
