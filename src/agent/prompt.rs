use crate::models::IssuanceRecord;

/// 构建发给智能体的指令
///
/// 首次签发和重试使用同一段指令
pub fn certificate_instruction(record: &IssuanceRecord) -> String {
    format!(
        "Generate a personalized, formal appreciation message (under 60 words) for participant \"{name}\" \
who completed the event \"{event}\" on {date}. Certificate ID: {id}. \
Then send a VeloDB & Lyzr branded certificate email to their email address: {email}. \
The email subject should be \"Your VeloDB & Lyzr Certificate - {event}\". \
Include the participant name, event name, date, certificate ID, and appreciation message in the email body.",
        name = record.name,
        event = record.event,
        date = record.date,
        id = record.certificate_id,
        email = record.email,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubmissionForm;
    use chrono::Utc;

    #[test]
    fn test_instruction_embeds_every_field() {
        let form = SubmissionForm::new("Alice", "alice@example.com", "Rust Summit", "2026-03-01");
        let record = IssuanceRecord::pending("CERT-2026-007".to_string(), &form, Utc::now());
        let text = certificate_instruction(&record);

        assert!(text.contains("participant \"Alice\""));
        assert!(text.contains("the event \"Rust Summit\" on 2026-03-01."));
        assert!(text.contains("Certificate ID: CERT-2026-007."));
        assert!(text.contains("email address: alice@example.com."));
        assert!(text.contains("\"Your VeloDB & Lyzr Certificate - Rust Summit\""));
    }
}
