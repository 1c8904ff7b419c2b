//! 顶层兜底
//!
//! 捕获工作流里没有处理的错误和 panic，记录下来并展示通用提示，
//! 调用 `reset()` 后可以继续使用

use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::error;

/// 兜底展示的标题
pub const FALLBACK_TITLE: &str = "Something went wrong";

/// 被捕获的失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryFailure {
    pub title: String,
    pub detail: String,
}

/// 错误边界
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    failure: Option<BoundaryFailure>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在边界内执行
    ///
    /// 成功返回 `Some`；返回错误或 panic 时记录失败并返回 `None`。
    /// 已处于失败状态时不再执行，直到 `reset()`。
    pub async fn guard<F, T, E>(&mut self, fut: F) -> Option<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        if self.failure.is_some() {
            return None;
        }

        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                self.trip(e.to_string());
                None
            }
            Err(panic) => {
                self.trip(panic_message(panic.as_ref()));
                None
            }
        }
    }

    pub fn has_error(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure(&self) -> Option<&BoundaryFailure> {
        self.failure.as_ref()
    }

    /// 清除失败状态
    pub fn reset(&mut self) {
        self.failure = None;
    }

    fn trip(&mut self, detail: String) {
        error!("❌ {}: {}", FALLBACK_TITLE, detail);
        self.failure = Some(BoundaryFailure {
            title: FALLBACK_TITLE.to_string(),
            detail,
        });
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
