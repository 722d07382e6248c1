use std::sync::Arc;

use crate::booking::{BookingService, ExpirySweeper};
use crate::core::config::{Config, StorageBackend};
use crate::core::tasks::{BackgroundTasks, TaskKind};
use crate::core::{Result, ServerError};
use crate::db::DbService;
use crate::db::repository::{LocalSeatStore, SeatStore, SurrealSeatStore};
use shared::FoodCentre;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是订座服务的核心数据结构。使用 Arc 实现浅拷贝，
/// 克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<dyn SeatStore> | 座位存储后端 (构造时选定) |
/// | booking | BookingService | 预订服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 座位存储后端
    store: Arc<dyn SeatStore>,
    /// 预订服务
    booking: BookingService,
}

impl ServerState {
    /// 使用给定的存储后端构造状态 (测试常用)
    pub fn with_store(config: Config, store: Arc<dyn SeatStore>) -> Self {
        let booking = BookingService::new(store.clone());
        Self {
            config,
            store,
            booking,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 存储后端 (SurrealDB 主库；`auto` 模式下打开失败降级到 redb 本地缓存)
    /// 3. 预订服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let store = Self::open_store(config).await?;
        tracing::info!(backend = store.backend(), "Seat store ready");

        Ok(Self::with_store(config.clone(), store))
    }

    /// 按配置选择存储后端
    async fn open_store(config: &Config) -> Result<Arc<dyn SeatStore>> {
        let storage_timeout = config.storage_timeout();
        let db_path = config.database_dir().join("chope.db");
        let db_path = db_path.to_string_lossy();

        match config.storage_backend {
            StorageBackend::Local => Ok(Arc::new(LocalSeatStore::open(config.cache_file())
                .map_err(|e| ServerError::Storage(e.to_string()))?)),
            StorageBackend::Surreal => {
                let db_service = DbService::new(&db_path).await?;
                Ok(Arc::new(SurrealSeatStore::new(db_service.db, storage_timeout)))
            }
            StorageBackend::Auto => match DbService::new(&db_path).await {
                Ok(db_service) => Ok(Arc::new(SurrealSeatStore::new(
                    db_service.db,
                    storage_timeout,
                ))),
                Err(e) => {
                    // Primary unreachable at startup: run on the local cache
                    tracing::warn!(
                        error = %e,
                        "Primary seat store unavailable, falling back to local cache"
                    );
                    Ok(Arc::new(LocalSeatStore::open(config.cache_file())
                        .map_err(|e| ServerError::Storage(e.to_string()))?))
                }
            },
        }
    }

    /// 获取预订服务
    pub fn booking(&self) -> &BookingService {
        &self.booking
    }

    /// 获取存储后端
    pub fn store(&self) -> Arc<dyn SeatStore> {
        self.store.clone()
    }

    /// 注册后台任务
    ///
    /// 必须在 `Server::run()` 开始服务之前调用。
    ///
    /// 注册的任务：
    /// - 座位目录初始化 (Warmup, 可配置关闭)
    /// - 过期预订回收器 (Periodic)
    pub fn register_background_tasks(&self, tasks: &mut BackgroundTasks) {
        if self.config.seed_on_startup {
            let store = self.store();
            tasks.spawn("seat_catalog_seed", TaskKind::Warmup, async move {
                for centre in FoodCentre::ALL {
                    // Seeding failures are logged, never fatal: the store
                    // lazily initializes on first access anyway
                    if let Err(e) = store.ensure_initialized(centre).await {
                        tracing::error!(centre = %centre, error = %e, "Failed to seed centre");
                    }
                }
            });
        }

        let sweeper = ExpirySweeper::new(
            self.store(),
            self.config.sweep_interval(),
            tasks.shutdown_token(),
        );
        tasks.spawn("expiry_sweeper", TaskKind::Periodic, sweeper.run());
    }
}
