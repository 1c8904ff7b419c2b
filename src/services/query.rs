//! 查询 / 视图层
//!
//! 搜索、状态筛选、分页、统计和证书验证，全部是对内存列表的线性扫描

use std::fmt;
use std::str::FromStr;

use crate::models::{IssuanceRecord, IssuanceStatus};

/// 状态筛选
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(IssuanceStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: IssuanceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => *expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(StatusFilter::All)
        } else {
            s.parse().map(StatusFilter::Only)
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

/// 搜索词 + 状态筛选，两者同时满足才算命中
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl RecordFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    pub fn matches(&self, record: &IssuanceRecord) -> bool {
        self.status.accepts(record.status) && self.matches_search(record)
    }

    fn matches_search(&self, record: &IssuanceRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [
            &record.name,
            &record.email,
            &record.event,
            &record.certificate_id,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn apply<'a>(&self, records: &'a [IssuanceRecord]) -> Vec<&'a IssuanceRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// 总页数，至少为 1
pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    item_count.div_ceil(page_size).max(1)
}

/// 取第 `page` 页（从 1 开始），超出范围返回空切片
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// 状态统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub pending: usize,
}

impl RecordStats {
    pub fn from_records(records: &[IssuanceRecord]) -> Self {
        records.iter().fold(
            RecordStats {
                total: records.len(),
                ..Default::default()
            },
            |mut stats, r| {
                match r.status {
                    IssuanceStatus::Success => stats.success += 1,
                    IssuanceStatus::Failed => stats.failed += 1,
                    IssuanceStatus::Pending => stats.pending += 1,
                }
                stats
            },
        )
    }

    /// 占总数的百分比（四舍五入），总数为 0 时返回 0
    pub fn percentage(&self, value: usize) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((value as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// 证书验证结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Verification {
    /// 没有输入，不显示任何结果
    #[default]
    Idle,
    Found(IssuanceRecord),
    NotFound,
}

/// 按证书 ID 精确查找（忽略大小写）
pub fn verify_certificate(records: &[IssuanceRecord], candidate: &str) -> Verification {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return Verification::Idle;
    }
    let candidate = candidate.to_lowercase();
    records
        .iter()
        .find(|r| r.certificate_id.to_lowercase() == candidate)
        .map_or(Verification::NotFound, |r| Verification::Found(r.clone()))
}

/// 是否已存在同名、同邮箱、同活动的记录
pub fn is_duplicate(records: &[IssuanceRecord], name: &str, email: &str, event: &str) -> bool {
    records.iter().any(|r| r.same_issuance(name, email, event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_records, SubmissionForm};
    use chrono::Utc;

    fn record(id: usize, name: &str, status: IssuanceStatus) -> IssuanceRecord {
        let form = SubmissionForm::new(name, format!("{}@x.com", name.to_lowercase()), "Evt", "2026-01-01");
        let mut r = IssuanceRecord::pending(format!("CERT-2026-{:03}", id), &form, Utc::now());
        r.status = status;
        r
    }

    #[test]
    fn test_search_and_status_filter() {
        let records = vec![
            record(1, "Alice", IssuanceStatus::Success),
            record(2, "Bob", IssuanceStatus::Failed),
        ];

        let by_name = RecordFilter::new("ali", StatusFilter::All).apply(&records);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Alice");

        let by_status = RecordFilter::new("", StatusFilter::Only(IssuanceStatus::Failed)).apply(&records);
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].name, "Bob");

        let both = RecordFilter::new("ali", StatusFilter::Only(IssuanceStatus::Failed)).apply(&records);
        assert!(both.is_empty());
    }

    #[test]
    fn test_search_covers_email_event_and_id() {
        let records = sample_records();
        assert_eq!(RecordFilter::new("CERT-2026-003", StatusFilter::All).apply(&records).len(), 1);
        assert_eq!(RecordFilter::new("BOB.MARTINEZ@", StatusFilter::All).apply(&records).len(), 1);
        assert_eq!(RecordFilter::new("summit", StatusFilter::All).apply(&records).len(), 1);
        assert_eq!(RecordFilter::new("", StatusFilter::All).apply(&records).len(), 5);
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "pending".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(IssuanceStatus::Pending)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_pagination() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(total_pages(items.len(), 10), 3);
        assert_eq!(page_slice(&items, 1, 10).len(), 10);
        assert_eq!(page_slice(&items, 3, 10), &[20, 21, 22, 23, 24]);
        assert!(page_slice(&items, 4, 10).is_empty());
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
    }

    #[test]
    fn test_stats() {
        let stats = RecordStats::from_records(&sample_records());
        assert_eq!(
            stats,
            RecordStats {
                total: 5,
                success: 3,
                failed: 1,
                pending: 1
            }
        );
        assert_eq!(stats.percentage(stats.success), 60);
        assert_eq!(RecordStats::default().percentage(0), 0);
    }

    #[test]
    fn test_verify_exact_match_ignoring_case() {
        let records = sample_records();
        match verify_certificate(&records, "  cert-2026-004 ") {
            Verification::Found(r) => assert_eq!(r.name, "David Chen"),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(verify_certificate(&records, "CERT-2026-00"), Verification::NotFound);
        assert_eq!(verify_certificate(&records, "   "), Verification::Idle);
    }

    #[test]
    fn test_duplicate_detection() {
        let records = vec![record(1, "Alice", IssuanceStatus::Success)];
        assert!(is_duplicate(&records, "alice", "ALICE@x.com", "evt"));
        assert!(!is_duplicate(&records, "alice", "alice@x.com", "Other"));
    }
}
