//! 批量签发应用
//!
//! 程序入口使用的编排：读取 CSV → 顺序签发 → 输出统计 → 导出结果

use std::path::Path;

use anyhow::Result;
use tokio::fs;
use tracing::{info, warn};

use crate::agent::build_agent;
use crate::config::{AgentBackend, Config};
use crate::console::Console;
use crate::error::AppError;
use crate::orchestrator::BulkSummary;
use crate::services::CSV_TEMPLATE;
use crate::supervisor::ErrorBoundary;
use crate::utils::logging::{init_log_file, log_row_progress, log_startup, print_final_stats};

/// 应用主结构
pub struct App {
    config: Config,
    console: Console,
    boundary: ErrorBoundary,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .map_err(|e| AppError::file(&config.output_log_file, e))?;

        let backend = match config.agent_backend {
            AgentBackend::Http => "http",
            AgentBackend::Llm => "llm",
        };
        log_startup(&config.agent_id, backend);

        let agent = build_agent(&config)?;
        let console = Console::new(&config, agent);

        Ok(Self {
            config,
            console,
            boundary: ErrorBoundary::new(),
        })
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<()> {
        self.write_template().await?;

        let csv_path = self.config.bulk_csv_file.clone();
        if !Path::new(&csv_path).exists() {
            warn!("⚠️ 没有找到待签发的CSV文件 {}，程序结束", csv_path);
            return Ok(());
        }

        info!("\n📁 正在读取 {}...", csv_path);
        let csv_text = fs::read_to_string(&csv_path)
            .await
            .map_err(|e| AppError::file(&csv_path, e))?;

        let summary = self.process_csv(&csv_text).await;

        if let Some(failure) = self.boundary.failure() {
            warn!("⚠️ {}: {}", failure.title, failure.detail);
            self.boundary.reset();
        }

        if let Some(summary) = summary {
            print_final_stats(&summary, &self.config.output_log_file);
            self.export().await?;
        }

        Ok(())
    }

    /// 在错误边界内执行批量签发
    async fn process_csv(&mut self, csv_text: &str) -> Option<BulkSummary> {
        let console = &mut self.console;
        self.boundary
            .guard(console.bulk_upload(csv_text, |progress| log_row_progress(&progress)))
            .await
    }

    /// 导出签发结果
    async fn export(&self) -> Result<()> {
        let Some(csv) = self.console.export_csv()? else {
            info!("没有记录可导出");
            return Ok(());
        };
        let path = &self.config.export_file;
        fs::write(path, csv)
            .await
            .map_err(|e| AppError::file(path, e))?;
        info!("💾 已导出 {} 条记录至 {}", self.console.records().len(), path);
        Ok(())
    }

    /// 写出批量导入模板
    async fn write_template(&self) -> Result<()> {
        let path = &self.config.template_file;
        if Path::new(path).exists() {
            return Ok(());
        }
        fs::write(path, CSV_TEMPLATE)
            .await
            .map_err(|e| AppError::file(path, e))?;
        info!("📝 已生成导入模板 {}", path);
        Ok(())
    }
}
