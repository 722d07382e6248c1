//! 后台任务管理
//!
//! 统一管理所有后台任务的注册、启动和关闭。
//!
//! # 任务类型
//!
//! - [`TaskKind::Warmup`] - 启动预热任务（运行一次，如座位目录初始化）
//! - [`TaskKind::Periodic`] - 定时任务（如过期预订回收）

use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// 启动预热任务（运行一次）
    Warmup,
    /// 定时任务
    Periodic,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Warmup => write!(f, "Warmup"),
            TaskKind::Periodic => write!(f, "Periodic"),
        }
    }
}

/// 已注册的后台任务
struct RegisteredTask {
    /// 任务名称
    name: &'static str,
    /// 任务类型
    kind: TaskKind,
    /// 任务句柄
    handle: JoinHandle<()>,
}

/// 后台任务管理器
///
/// 统一管理所有后台任务的注册和生命周期。
///
/// # 使用示例
///
/// ```ignore
/// let mut tasks = BackgroundTasks::new();
///
/// // 注册定时任务
/// tasks.spawn("expiry_sweeper", TaskKind::Periodic, async move {
///     // 任务逻辑
/// });
///
/// // Graceful shutdown
/// tasks.shutdown().await;
/// ```
pub struct BackgroundTasks {
    /// 已注册的任务列表
    tasks: Vec<RegisteredTask>,
    /// 全局取消令牌
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    /// 创建新的任务管理器
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// 获取取消令牌（用于任务内部监听 shutdown 信号）
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// 注册并启动一个后台任务
    ///
    /// 任务会被包装以捕获 panic，如果任务异常退出会记录错误日志。
    ///
    /// # 参数
    ///
    /// - `name`: 任务名称（用于日志和调试）
    /// - `kind`: 任务类型
    /// - `future`: 要执行的异步任务
    pub fn spawn<F>(&mut self, name: &'static str, kind: TaskKind, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        // Wrap the future to catch panics and log errors
        let wrapped_future = async move {
            let result: Result<(), Box<dyn std::any::Any + Send>> =
                AssertUnwindSafe(future).catch_unwind().await;
            match result {
                Ok(()) => {
                    // Normal completion - only Warmup tasks are expected to finish
                    if kind != TaskKind::Warmup {
                        tracing::warn!(task = %name, kind = %kind, "Background task completed unexpectedly");
                    }
                }
                Err(panic_info) => {
                    let panic_msg: String = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    tracing::error!(
                        task = %name,
                        kind = %kind,
                        panic = %panic_msg,
                        "Background task panicked! This is a bug that should be reported."
                    );
                }
            }
        };

        let handle = tokio::spawn(wrapped_future);
        tracing::debug!(task = %name, kind = %kind, "Registered background task");
        self.tasks.push(RegisteredTask { name, kind, handle });
    }

    /// 获取已注册任务数量
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// 检查是否没有注册任务
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 打印任务摘要
    pub fn log_summary(&self) {
        let warmup = self
            .tasks
            .iter()
            .filter(|t| t.kind == TaskKind::Warmup)
            .count();
        let periodic = self.tasks.len() - warmup;
        tracing::info!(
            "Background tasks registered: {} total (Periodic: {}, Warmup: {})",
            self.tasks.len(),
            periodic,
            warmup
        );
    }

    /// Graceful shutdown - 取消所有任务并等待完成
    ///
    /// 发送取消信号后，等待所有任务完成或超时。
    pub async fn shutdown(self) {
        tracing::info!("Shutting down {} background tasks...", self.tasks.len());

        // 发送取消信号
        self.shutdown.cancel();

        // 等待所有任务完成
        for task in self.tasks {
            match task.handle.await {
                Ok(()) => {
                    tracing::debug!(task = %task.name, "Task completed");
                }
                Err(e) if e.is_cancelled() => {
                    tracing::debug!(task = %task.name, "Task cancelled");
                }
                Err(e) => {
                    tracing::error!(task = %task.name, error = ?e, "Task panicked");
                }
            }
        }

        tracing::info!("All background tasks stopped");
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_warmup_task_runs_to_completion() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("warmup", TaskKind::Warmup, async move {
            let _ = tx.send(42);
        });
        assert_eq!(tasks.len(), 1);
        assert_eq!(rx.await.unwrap(), 42);
        tasks.shutdown().await;
    }

    #[tokio::test]
    async fn test_periodic_task_stops_on_shutdown() {
        let mut tasks = BackgroundTasks::new();
        let token = tasks.shutdown_token();
        tasks.spawn("periodic", TaskKind::Periodic, async move {
            token.cancelled().await;
        });
        // Must return (the task observes the cancel signal)
        tasks.shutdown().await;
    }

    #[tokio::test]
    async fn test_panicking_task_does_not_poison_shutdown() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("boom", TaskKind::Warmup, async move {
            panic!("boom");
        });
        // The panic is caught by the wrapper; shutdown completes normally
        tasks.shutdown().await;
    }
}
