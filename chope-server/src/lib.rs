//! ChopeLah Seat Reservation Server - 食阁订座服务
//!
//! # 架构概述
//!
//! 本模块是订座服务的主入口，提供以下核心功能：
//!
//! - **座位存储** (`db`): SurrealDB 文档存储 + redb 本地降级缓存
//! - **过期回收** (`booking::sweeper`): 周期扫描并释放过期预订
//! - **预订规则** (`policy`): 无状态校验引擎（时长、取消窗口、数量上限）
//! - **预订历史** (`booking::history`): 用户有效预订视图与取消
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! chope-server/src/
//! ├── core/          # 配置、状态、服务器、后台任务
//! ├── db/            # 数据库层（座位文档 + 存储后端）
//! ├── policy/        # 预订规则引擎
//! ├── booking/       # 预订服务、历史视图、过期回收
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod booking;
pub mod core;
pub mod db;
pub mod policy;
pub mod utils;

// Re-export 公共类型
pub use crate::booking::{BookingService, ExpirySweeper};
pub use crate::core::{BackgroundTasks, Config, Server, ServerState, TaskKind};
pub use crate::db::repository::{
    BookOutcome, LocalSeatStore, SeatStore, StoreError, StoreResult, SurrealSeatStore,
};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ________                     __          __
  / ____/ /_  ____  ____  ___  / /   ____ _/ /_
 / /   / __ \/ __ \/ __ \/ _ \/ /   / __ `/ __ \
/ /___/ / / / /_/ / /_/ /  __/ /___/ /_/ / / / /
\____/_/ /_/\____/ .___/\___/_____/\__,_/_/ /_/
                /_/
    "#
    );
}
