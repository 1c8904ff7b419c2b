use serde::{Deserialize, Serialize};

use crate::services::validation::{validate_form, FieldErrors};

/// 签发表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    pub name: String,
    pub email: String,
    pub event: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl SubmissionForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        event: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            event: event.into(),
            date: date.into(),
        }
    }

    /// 空表单，日期默认今天
    pub fn blank() -> Self {
        Self {
            date: today_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> FieldErrors {
        validate_form(&self.name, &self.email, &self.event, &self.date)
    }

    /// 去掉各字段首尾空白
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            event: self.event.trim().to_string(),
            date: self.date.trim().to_string(),
        }
    }
}

/// 本地日期 `YYYY-MM-DD`
pub fn today_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
