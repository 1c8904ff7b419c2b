//! 签发记录及其状态机

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::AgentOutcome;
use crate::models::form::SubmissionForm;

/// 签发状态
///
/// 合法转换：`pending → success | failed`，重试时 `failed → pending`；`success` 是终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuanceStatus {
    Pending,
    Success,
    Failed,
}

impl IssuanceStatus {
    pub const ALL: [IssuanceStatus; 3] = [
        IssuanceStatus::Pending,
        IssuanceStatus::Success,
        IssuanceStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssuanceStatus::Pending => "pending",
            IssuanceStatus::Success => "success",
            IssuanceStatus::Failed => "failed",
        }
    }

    pub fn can_transition_to(self, next: IssuanceStatus) -> bool {
        matches!(
            (self, next),
            (IssuanceStatus::Pending, IssuanceStatus::Success)
                | (IssuanceStatus::Pending, IssuanceStatus::Failed)
                | (IssuanceStatus::Failed, IssuanceStatus::Pending)
        )
    }
}

impl fmt::Display for IssuanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssuanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(IssuanceStatus::Pending),
            "success" => Ok(IssuanceStatus::Success),
            "failed" => Ok(IssuanceStatus::Failed),
            other => Err(format!("未知的签发状态: {}", other)),
        }
    }
}

/// 失败时写入记录的兜底文案
#[derive(Debug, Clone, Copy)]
pub struct FailureTexts {
    /// 智能体返回失败但没有给出原因
    pub rejected: &'static str,
    /// 网络错误或超时
    pub unreachable: &'static str,
}

impl FailureTexts {
    pub const SUBMISSION: FailureTexts = FailureTexts {
        rejected: "Failed to generate appreciation message",
        unreachable: "Network error during certificate generation",
    };

    pub const RETRY: FailureTexts = FailureTexts {
        rejected: "Retry failed",
        unreachable: "Network error on retry",
    };
}

/// 拒绝重试的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryRefusal {
    /// 已达到重试上限
    Exhausted { retries: u32 },
    /// 记录仍在处理中
    InFlight,
    /// 只有失败的记录可以重试
    NotFailed,
}

/// 一次证书签发尝试
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuanceRecord {
    pub certificate_id: String,
    pub name: String,
    pub email: String,
    pub event: String,
    pub date: String,
    pub status: IssuanceStatus,
    pub appreciation_message: String,
    pub email_sent_to: String,
    pub timestamp: DateTime<Utc>,
    pub retries: u32,
}

impl IssuanceRecord {
    /// 创建一条待处理记录
    pub fn pending(certificate_id: String, form: &SubmissionForm, timestamp: DateTime<Utc>) -> Self {
        Self {
            certificate_id,
            name: form.name.clone(),
            email: form.email.clone(),
            event: form.event.clone(),
            date: form.date.clone(),
            status: IssuanceStatus::Pending,
            appreciation_message: String::new(),
            email_sent_to: String::new(),
            timestamp,
            retries: 0,
        }
    }

    /// 同名、同邮箱、同活动（忽略大小写）视为同一次签发
    pub fn same_issuance(&self, name: &str, email: &str, event: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
            && self.email.to_lowercase() == email.to_lowercase()
            && self.event.to_lowercase() == event.to_lowercase()
    }

    /// 只有 `failed` 且未达上限的记录可以重试
    pub fn can_retry(&self, max_retries: u32) -> bool {
        self.status == IssuanceStatus::Failed && self.retries < max_retries
    }

    /// 进入重试：状态从 `failed` 回到 `pending`
    pub fn begin_retry(&mut self, max_retries: u32) -> Result<(), RetryRefusal> {
        match self.status {
            IssuanceStatus::Pending => return Err(RetryRefusal::InFlight),
            IssuanceStatus::Success => return Err(RetryRefusal::NotFailed),
            IssuanceStatus::Failed => {}
        }
        if self.retries >= max_retries {
            return Err(RetryRefusal::Exhausted {
                retries: self.retries,
            });
        }
        debug_assert!(self.status.can_transition_to(IssuanceStatus::Pending));
        self.status = IssuanceStatus::Pending;
        Ok(())
    }

    /// 根据智能体调用结论结算一条 `pending` 记录
    pub fn settle(&mut self, outcome: AgentOutcome, texts: FailureTexts) {
        debug_assert_eq!(self.status, IssuanceStatus::Pending);

        match outcome {
            AgentOutcome::Delivered {
                appreciation_message,
                email_sent_to,
            } => {
                self.status = IssuanceStatus::Success;
                self.appreciation_message = appreciation_message;
                self.email_sent_to = email_sent_to;
            }
            AgentOutcome::Rejected(reason) => {
                self.status = IssuanceStatus::Failed;
                self.appreciation_message = reason.unwrap_or_else(|| texts.rejected.to_string());
            }
            AgentOutcome::Unreachable(_) => {
                self.status = IssuanceStatus::Failed;
                self.appreciation_message = texts.unreachable.to_string();
            }
        }
    }

    /// 结算一次重试，无论成败重试次数都加一
    pub fn settle_retry(&mut self, outcome: AgentOutcome) {
        self.settle(outcome, FailureTexts::RETRY);
        self.retries += 1;
    }

    /// 发送成功时确认的地址，没有则用原邮箱
    pub fn delivery_address(&self) -> &str {
        if self.email_sent_to.is_empty() {
            &self.email
        } else {
            &self.email_sent_to
        }
    }
}
