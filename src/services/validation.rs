//! 表单校验 - 业务能力层
//!
//! 纯函数，不产生副作用

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// `local-part@domain.tld`，任何位置都不允许空白
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Event,
    Date,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Event => "event",
            FormField::Date => "date",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 字段 → 错误信息；为空表示校验通过
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// 检查邮箱格式
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// 校验签发表单
///
/// 每个不合法的字段对应一条错误信息
pub fn validate_form(name: &str, email: &str, event: &str, date: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if name.trim().is_empty() {
        errors.insert(FormField::Name, "Full name is required");
    }

    let email = email.trim();
    if email.is_empty() {
        errors.insert(FormField::Email, "Email address is required");
    } else if !is_valid_email(email) {
        errors.insert(FormField::Email, "Please enter a valid email address");
    }

    if event.trim().is_empty() {
        errors.insert(FormField::Event, "Event name is required");
    }
    if date.trim().is_empty() {
        errors.insert(FormField::Date, "Date is required");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let errors = validate_form("Alice", "alice@example.com", "AI Workshop", "2026-02-15");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_each_blank_field_is_reported() {
        let errors = validate_form("  ", "", "\t", "");
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(FormField::Name), Some("Full name is required"));
        assert_eq!(errors.get(FormField::Email), Some("Email address is required"));
        assert_eq!(errors.get(FormField::Event), Some("Event name is required"));
        assert_eq!(errors.get(FormField::Date), Some("Date is required"));
    }

    #[test]
    fn test_malformed_email_only() {
        let errors = validate_form("Alice", "alice@example", "Evt", "2026-01-01");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::Email),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_email_is_trimmed_before_matching() {
        let errors = validate_form("Alice", "  alice@example.com ", "Evt", "2026-01-01");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_display_lists_fields_in_order() {
        let errors = validate_form("", "bad", "Evt", "2026-01-01");
        assert_eq!(
            errors.to_string(),
            "name: Full name is required; email: Please enter a valid email address"
        );
    }
}
