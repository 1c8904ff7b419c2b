//! CSV 导入 / 导出 - 业务能力层
//!
//! 导入只做简单的逗号切分，不支持字段内逗号；不合法的行直接丢弃

use chrono::SecondsFormat;
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::CsvError;
use crate::models::IssuanceRecord;
use crate::services::validation::is_valid_email;

/// 导出文件名
pub const EXPORT_FILE_NAME: &str = "certiflow_export.csv";
/// 模板文件名
pub const TEMPLATE_FILE_NAME: &str = "certificate_template.csv";

/// 批量导入模板
pub const CSV_TEMPLATE: &str = "name,email,event\n\
John Smith,john@example.com,AI Workshop 2026\n\
Jane Doe,jane@example.com,Cloud Summit 2026\n";

const EXPORT_HEADER: &str = "Certificate ID,Name,Email,Event,Date,Status,Appreciation Message,Email Sent To,Timestamp,Retries";

/// 导入的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRow {
    pub name: String,
    pub email: String,
    pub event: String,
}

/// 解析批量导入的 CSV
///
/// 第一行非空行是表头，`name` / `email` / `event` 三列按名称定位（忽略大小写和顺序）。
/// 缺列或没有数据行时返回空列表。
pub fn parse_bulk_csv(text: &str) -> Vec<BulkRow> {
    let lines: Vec<&str> = text.split('\n').filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let header: Vec<String> = lines[0]
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();
    let column = |name: &str| header.iter().position(|h| h == name);

    let (Some(name_idx), Some(email_idx), Some(event_idx)) =
        (column("name"), column("email"), column("event"))
    else {
        return Vec::new();
    };

    lines[1..]
        .iter()
        .filter_map(|line| {
            let cols: Vec<&str> = line.split(',').map(|c| strip_quotes(c.trim())).collect();
            let cell = |idx: usize| cols.get(idx).copied().unwrap_or("");

            let (name, email, event) = (cell(name_idx), cell(email_idx), cell(event_idx));
            if name.is_empty() || email.is_empty() || event.is_empty() || !is_valid_email(email) {
                return None;
            }
            Some(BulkRow {
                name: name.to_string(),
                email: email.to_string(),
                event: event.to_string(),
            })
        })
        .collect()
}

/// 去掉首尾各一个双引号
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// 导出记录为 CSV；没有记录时返回 `None`
///
/// 表头不加引号；数据行列顺序固定，每个值都用双引号包裹，值内的双引号写成两个
pub fn export_records_csv(records: &[IssuanceRecord]) -> Result<Option<String>, CsvError> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut buf = format!("{}\n", EXPORT_HEADER).into_bytes();
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buf);

        for r in records {
            let timestamp = r.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
            let retries = r.retries.to_string();
            writer
                .write_record([
                    r.certificate_id.as_str(),
                    r.name.as_str(),
                    r.email.as_str(),
                    r.event.as_str(),
                    r.date.as_str(),
                    r.status.as_str(),
                    r.appreciation_message.as_str(),
                    r.email_sent_to.as_str(),
                    timestamp.as_str(),
                    retries.as_str(),
                ])
                .map_err(|e| CsvError::Export(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| CsvError::Export(e.to_string()))?;
    }

    let mut out = String::from_utf8(buf).map_err(|e| CsvError::Export(e.to_string()))?;
    // 最后一行不带换行
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_records;

    #[test]
    fn test_template_parses_to_two_rows() {
        let rows = parse_bulk_csv(CSV_TEMPLATE);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "John Smith");
        assert_eq!(rows[1].email, "jane@example.com");
    }

    #[test]
    fn test_header_is_case_insensitive_and_order_independent() {
        let text = "Event,EXTRA,Email,Name\r\n\"Summit\",x,\"bob@x.com\",\"Bob\"\r\n";
        let rows = parse_bulk_csv(text);
        assert_eq!(
            rows,
            vec![BulkRow {
                name: "Bob".to_string(),
                email: "bob@x.com".to_string(),
                event: "Summit".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let text = "name,email,event\n\
                    Alice,alice@x.com,Evt\n\
                    NoEmail,,Evt\n\
                    BadEmail,bad@x,Evt\n\
                    Short,short@x.com\n\
                    \n\
                    Carol,carol@x.com,Evt\n";
        let rows = parse_bulk_csv(text);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
    }

    #[test]
    fn test_missing_header_or_data_yields_nothing() {
        assert!(parse_bulk_csv("").is_empty());
        assert!(parse_bulk_csv("name,email,event\n").is_empty());
        assert!(parse_bulk_csv("name,mail,event\nA,a@x.com,E\n").is_empty());
    }

    #[test]
    fn test_export_shape() {
        let mut records = sample_records();
        records[0].appreciation_message = "She said \"thanks\"".to_string();
        records[1].event = "Summit, Day 2".to_string();

        let csv = export_records_csv(&records).unwrap().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), records.len() + 1);
        assert_eq!(lines[0], EXPORT_HEADER);
        assert!(lines[1].contains("\"She said \"\"thanks\"\"\""));
        assert!(lines[1].starts_with("\"CERT-2026-001\",\"Alice Johnson\""));
        assert!(lines[1].ends_with("\"2026-02-15T10:30:00.000Z\",\"0\""));
        assert!(lines[3].contains("\"failed\""));
        assert!(lines[2].contains(",\"Summit, Day 2\","));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_export_empty_is_none() {
        assert!(export_records_csv(&[]).unwrap().is_none());
    }
}
