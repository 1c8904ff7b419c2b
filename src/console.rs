//! 签发控制台
//!
//! 顶层控制器：持有内存中的记录列表、会话上下文和列表视图状态，
//! 所有写操作都经过 `&mut self`，不存在并发修改。

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::agent::AgentClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, CsvError};
use crate::models::{
    sample_records, today_string, IssuanceRecord, IssuanceStatus, SubmissionForm,
    SAMPLE_RECORD_COUNT,
};
use crate::orchestrator::{BulkProcessor, BulkProgress, BulkSummary};
use crate::services::{
    export_records_csv, is_duplicate, page_slice, parse_bulk_csv, total_pages,
    verify_certificate, RecordFilter, RecordStats, StatusFilter, Verification,
};
use crate::utils::logging::log_bulk_start;
use crate::workflow::{AgentCall, RetryFlow, RetryOutcome, SessionContext, SubmissionFlow};

/// 表单提交后展示给用户的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitMessage {
    Success(String),
    Error(String),
}

impl SubmitMessage {
    /// 根据签发结果生成提示
    pub fn for_record(record: &IssuanceRecord) -> Self {
        match record.status {
            IssuanceStatus::Success => SubmitMessage::Success(format!(
                "VeloDB & Lyzr Certificate {} generated and emailed to {} for {}.",
                record.certificate_id,
                record.delivery_address(),
                record.name
            )),
            _ => SubmitMessage::Error(format!(
                "Failed to generate certificate: {}. You can retry from the dashboard.",
                record.appreciation_message
            )),
        }
    }

    /// 根据提交前的错误生成提示
    pub fn for_error(error: &AppError) -> Self {
        SubmitMessage::Error(error.to_string())
    }

    pub fn text(&self) -> &str {
        match self {
            SubmitMessage::Success(text) | SubmitMessage::Error(text) => text,
        }
    }
}

impl fmt::Display for SubmitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// 证书签发控制台
pub struct Console {
    session: SessionContext,
    /// 最新的记录在最前面
    records: Vec<IssuanceRecord>,
    submission: SubmissionFlow,
    retry: RetryFlow,
    page_size: usize,
    filter: RecordFilter,
    page: usize,
    show_sample_data: bool,
    last_issued: Option<IssuanceRecord>,
    verification: Verification,
}

impl Console {
    /// 创建新的控制台
    pub fn new(config: &Config, agent: Arc<dyn AgentClient>) -> Self {
        let agent_call = AgentCall::new(
            agent,
            config.agent_id.clone(),
            Duration::from_secs(config.agent_timeout_secs.max(1)),
        );

        Self {
            session: SessionContext::new(),
            records: Vec::new(),
            submission: SubmissionFlow::new(agent_call.clone(), config.verbose_logging),
            retry: RetryFlow::new(agent_call, config.max_retries),
            page_size: config.page_size.max(1),
            filter: RecordFilter::default(),
            page: 1,
            show_sample_data: false,
            last_issued: None,
            verification: Verification::Idle,
        }
    }

    // ========== 签发 ==========

    /// 提交签发表单
    ///
    /// 校验失败或重复签发时返回错误且不创建记录；
    /// 否则无论智能体成败都会新增一条记录并返回它
    pub async fn submit(&mut self, form: &SubmissionForm) -> AppResult<IssuanceRecord> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        let form = form.trimmed();
        if is_duplicate(&self.records, &form.name, &form.email, &form.event) {
            warn!("⚠️ {} 已签发过「{}」，拒绝重复签发", form.name, form.event);
            return Err(AppError::Duplicate {
                name: form.name,
                event: form.event,
            });
        }

        let record = self.submission.run(&mut self.session, &form).await;
        self.records.insert(0, record.clone());
        if record.status == IssuanceStatus::Success {
            self.last_issued = Some(record.clone());
        }
        Ok(record)
    }

    /// 重试一条记录
    pub async fn retry(&mut self, certificate_id: &str) -> RetryOutcome {
        self.retry
            .run(&mut self.session, &mut self.records, certificate_id)
            .await
    }

    /// 该记录当前是否还能重试
    pub fn can_retry(&self, certificate_id: &str) -> bool {
        self.find(certificate_id)
            .is_some_and(|r| r.can_retry(self.retry.max_retries()))
    }

    /// 批量签发
    ///
    /// 没有任何有效行时返回 `CsvError::NoValidRows`
    pub async fn bulk_upload<F>(&mut self, csv_text: &str, on_progress: F) -> AppResult<BulkSummary>
    where
        F: FnMut(BulkProgress),
    {
        let rows = parse_bulk_csv(csv_text);
        if rows.is_empty() {
            warn!("⚠️ CSV 中没有有效行");
            return Err(CsvError::NoValidRows.into());
        }

        log_bulk_start(rows.len());
        let processor = BulkProcessor::new(&self.submission, today_string());
        let summary = processor
            .run(&mut self.session, &mut self.records, rows, on_progress)
            .await;
        Ok(summary)
    }

    // ========== 记录 ==========

    /// 真实记录（不含样例）
    pub fn records(&self) -> &[IssuanceRecord] {
        &self.records
    }

    pub fn find(&self, certificate_id: &str) -> Option<&IssuanceRecord> {
        self.records
            .iter()
            .find(|r| r.certificate_id == certificate_id)
    }

    pub fn last_issued(&self) -> Option<&IssuanceRecord> {
        self.last_issued.as_ref()
    }

    pub fn active_agent(&self) -> Option<&str> {
        self.session.active_agent()
    }

    /// 打开 / 关闭样例数据
    ///
    /// 打开且没有真实记录时，计数器推进到样例数量之后，避免 ID 冲突
    pub fn set_show_sample_data(&mut self, show: bool) {
        self.show_sample_data = show;
        if show && self.records.is_empty() {
            self.session.advance_counter_to(SAMPLE_RECORD_COUNT);
        }
    }

    /// 当前展示的记录：开了样例且没有真实记录时展示样例
    pub fn display_records(&self) -> Vec<IssuanceRecord> {
        if self.show_sample_data && self.records.is_empty() {
            sample_records()
        } else {
            self.records.clone()
        }
    }

    // ========== 列表视图 ==========

    /// 修改搜索词，页码回到第 1 页
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.page = 1;
    }

    /// 修改状态筛选，页码回到第 1 页
    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
        self.page = 1;
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// 跳到指定页，超出范围时夹到 `[1, total_pages]`
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filtered_records(&self) -> Vec<IssuanceRecord> {
        let records = self.display_records();
        self.filter.apply(&records).into_iter().cloned().collect()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_records().len(), self.page_size)
    }

    /// 当前页的记录
    pub fn current_page_records(&self) -> Vec<IssuanceRecord> {
        page_slice(&self.filtered_records(), self.page, self.page_size).to_vec()
    }

    /// 统计展示中的全部记录（不受筛选影响）
    pub fn stats(&self) -> RecordStats {
        RecordStats::from_records(&self.display_records())
    }

    // ========== 验证 / 导出 ==========

    /// 按证书 ID 验证
    pub fn verify(&mut self, candidate: &str) -> &Verification {
        self.verification = verify_certificate(&self.display_records(), candidate);
        &self.verification
    }

    pub fn verification(&self) -> &Verification {
        &self.verification
    }

    /// 导出展示中的记录；没有记录时返回 `None`
    pub fn export_csv(&self) -> AppResult<Option<String>> {
        Ok(export_records_csv(&self.display_records())?)
    }
}
