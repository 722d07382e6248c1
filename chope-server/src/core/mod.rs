//! Core server infrastructure
//!
//! 配置、状态、HTTP 服务器生命周期与后台任务管理。

mod config;
mod error;
mod server;
mod state;
mod tasks;

pub use config::{Config, StorageBackend};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
pub use tasks::{BackgroundTasks, TaskKind};
