//! 日志工具模块
//!
//! 提供日志初始化、格式化和输出的辅助函数

use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::orchestrator::{BulkProgress, BulkSummary};

/// 初始化 tracing 订阅者
///
/// `RUST_LOG` 优先；未设置时默认 `info`，详细模式下为 `debug`。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> std::io::Result<()> {
    let log_header = format!(
        "{}\n证书签发日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
}

/// 记录程序启动信息
pub fn log_startup(agent_id: &str, backend: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 证书批量签发模式");
    info!("🤖 智能体: {} ({})", agent_id, backend);
    info!("{}", "=".repeat(60));
}

/// 记录批量任务开始
///
/// # 参数
/// - `total`: 有效行数
pub fn log_bulk_start(total: usize) {
    info!("✓ 解析到 {} 条有效记录", total);
    info!("📋 将逐条顺序签发，每条完成后再处理下一条\n");
}

/// 记录单行处理进度
pub fn log_row_progress(progress: &BulkProgress) {
    info!(
        "📦 进度 {}/{} ({}%)",
        progress.processed,
        progress.total,
        progress.percent()
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `summary`: 批量处理结果
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(summary: &BulkSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.succeeded, summary.total);
    info!("❌ 失败/跳过: {}", summary.failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
