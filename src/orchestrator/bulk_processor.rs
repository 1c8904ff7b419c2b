//! 批量签发处理器 - 编排层
//!
//! ## 职责
//!
//! 把 CSV 解析出的行逐条交给单条签发流程，并汇总结果。
//!
//! ## 设计特点
//!
//! - **严格顺序**：上一行完全结束（包括智能体调用）后才开始下一行，
//!   后面的行查重时能看到前面刚签发的记录
//! - **进度回调**：每处理完一行回调一次 `BulkProgress`
//! - **向下委托**：单行的处理交给 `SubmissionFlow`

use std::fmt;

use tracing::{info, warn};

use crate::models::{IssuanceRecord, IssuanceStatus, SubmissionForm};
use crate::services::{is_duplicate, BulkRow};
use crate::workflow::{SessionContext, SubmissionFlow};

/// 批量处理进度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkProgress {
    pub processed: usize,
    pub total: usize,
}

impl BulkProgress {
    /// 完成百分比（向下取整）
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.processed * 100 / self.total
        }
    }
}

/// 批量处理结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub succeeded: usize,
    /// 签发失败或因重复被跳过
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for BulkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bulk processing complete: {} succeeded, {} failed/skipped out of {} total.",
            self.succeeded, self.failed, self.total
        )
    }
}

/// 批量签发处理器
pub struct BulkProcessor<'a> {
    flow: &'a SubmissionFlow,
    /// 批量导入没有日期列，统一使用这个日期
    date: String,
}

impl<'a> BulkProcessor<'a> {
    pub fn new(flow: &'a SubmissionFlow, date: impl Into<String>) -> Self {
        Self {
            flow,
            date: date.into(),
        }
    }

    /// 顺序处理所有行
    ///
    /// 新记录插入到 `records` 最前面；重复的行不调用智能体，计入失败/跳过
    pub async fn run<F>(
        &self,
        session: &mut SessionContext,
        records: &mut Vec<IssuanceRecord>,
        rows: Vec<BulkRow>,
        mut on_progress: F,
    ) -> BulkSummary
    where
        F: FnMut(BulkProgress),
    {
        let mut summary = BulkSummary {
            total: rows.len(),
            ..Default::default()
        };

        for (idx, row) in rows.into_iter().enumerate() {
            if is_duplicate(records, &row.name, &row.email, &row.event) {
                warn!(
                    "[第 {} 行] ⚠️ {} <{}> 已签发过「{}」，跳过",
                    idx + 1,
                    row.name,
                    row.email,
                    row.event
                );
                summary.failed += 1;
            } else {
                let form = SubmissionForm::new(row.name, row.email, row.event, self.date.clone());
                let record = self.flow.run(session, &form).await;

                match record.status {
                    IssuanceStatus::Success => summary.succeeded += 1,
                    _ => summary.failed += 1,
                }
                records.insert(0, record);
            }

            on_progress(BulkProgress {
                processed: idx + 1,
                total: summary.total,
            });
        }

        info!("{}", summary);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(BulkProgress { processed: 1, total: 3 }.percent(), 33);
        assert_eq!(BulkProgress { processed: 3, total: 3 }.percent(), 100);
        assert_eq!(BulkProgress::default().percent(), 0);
    }

    #[test]
    fn test_summary_message() {
        let summary = BulkSummary {
            succeeded: 2,
            failed: 1,
            total: 3,
        };
        assert_eq!(
            summary.to_string(),
            "Bulk processing complete: 2 succeeded, 1 failed/skipped out of 3 total."
        );
    }
}
