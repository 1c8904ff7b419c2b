//! 预览用样例数据
//!
//! 真实记录为空且打开了样例开关时，控制台展示这批记录

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::record::{IssuanceRecord, IssuanceStatus};

/// 样例记录数量，打开样例时证书计数器会推进到这里
pub const SAMPLE_RECORD_COUNT: u32 = 5;

struct SampleRow {
    name: &'static str,
    email: &'static str,
    event: &'static str,
    day: u32,
    hour: u32,
    minute: u32,
    status: IssuanceStatus,
    message: &'static str,
    retries: u32,
}

const SAMPLE_ROWS: [SampleRow; SAMPLE_RECORD_COUNT as usize] = [
    SampleRow {
        name: "Alice Johnson",
        email: "alice.johnson@example.com",
        event: "AI Innovation Hackathon 2026",
        day: 15,
        hour: 10,
        minute: 30,
        status: IssuanceStatus::Success,
        message: "We proudly recognize Alice Johnson for her outstanding participation in the AI Innovation Hackathon 2026. Her dedication and innovative contributions have exemplified the spirit of excellence that defines this event.",
        retries: 0,
    },
    SampleRow {
        name: "Bob Martinez",
        email: "bob.martinez@example.com",
        event: "Cloud Architecture Summit",
        day: 16,
        hour: 14,
        minute: 22,
        status: IssuanceStatus::Success,
        message: "It is with great pleasure that we honor Bob Martinez for his remarkable engagement in the Cloud Architecture Summit. His insightful contributions and commitment to learning have left a lasting impression on all attendees.",
        retries: 0,
    },
    SampleRow {
        name: "Clara Nguyen",
        email: "clara.nguyen@example.com",
        event: "Data Science Bootcamp",
        day: 17,
        hour: 9,
        minute: 15,
        status: IssuanceStatus::Failed,
        message: "Network error during generation",
        retries: 2,
    },
    SampleRow {
        name: "David Chen",
        email: "david.chen@example.com",
        event: "Full Stack Development Workshop",
        day: 18,
        hour: 11,
        minute: 45,
        status: IssuanceStatus::Success,
        message: "We extend our heartfelt appreciation to David Chen for his exemplary performance in the Full Stack Development Workshop. His passion for technology and collaborative spirit have truly set him apart.",
        retries: 0,
    },
    SampleRow {
        name: "Eva Rossi",
        email: "eva.rossi@example.com",
        event: "UX Design Masterclass",
        day: 19,
        hour: 16,
        minute: 0,
        status: IssuanceStatus::Pending,
        message: "",
        retries: 0,
    },
];

/// 生成样例记录（ID 为 `CERT-2026-001` 到 `CERT-2026-005`）
pub fn sample_records() -> Vec<IssuanceRecord> {
    SAMPLE_ROWS
        .iter()
        .enumerate()
        .map(|(idx, row)| IssuanceRecord {
            certificate_id: format!("CERT-2026-{:03}", idx + 1),
            name: row.name.to_string(),
            email: row.email.to_string(),
            event: row.event.to_string(),
            date: format!("2026-02-{:02}", row.day),
            status: row.status,
            appreciation_message: row.message.to_string(),
            email_sent_to: if row.status == IssuanceStatus::Success {
                row.email.to_string()
            } else {
                String::new()
            },
            timestamp: february_2026(row.day, row.hour, row.minute),
            retries: row.retries,
        })
        .collect()
}

fn february_2026(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2026, 2, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_records_cover_every_status() {
        let records = sample_records();
        assert_eq!(records.len(), SAMPLE_RECORD_COUNT as usize);
        assert_eq!(records[0].certificate_id, "CERT-2026-001");
        assert_eq!(records[4].certificate_id, "CERT-2026-005");
        for status in IssuanceStatus::ALL {
            assert!(records.iter().any(|r| r.status == status));
        }
        assert_eq!(records[2].email_sent_to, "");
        assert!(records[3]
            .appreciation_message
            .ends_with("collaborative spirit have truly set him apart."));
        assert_eq!(
            records[0].timestamp.to_rfc3339(),
            "2026-02-15T10:30:00+00:00"
        );
    }
}
