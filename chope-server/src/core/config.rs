use std::path::PathBuf;
use std::time::Duration;

/// 存储后端选择
///
/// `Auto` 先尝试打开主文档库，失败时降级到本地缓存。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// 主库失败时自动降级到本地缓存
    Auto,
    /// 仅使用 SurrealDB 文档库
    Surreal,
    /// 仅使用 redb 本地缓存
    Local,
}

impl StorageBackend {
    fn parse(value: &str) -> Self {
        match value {
            "surreal" => Self::Surreal,
            "local" => Self::Local,
            _ => Self::Auto,
        }
    }
}

/// 服务器配置 - 订座服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/chopelah | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STORAGE_BACKEND | auto | 存储后端: auto \| surreal \| local |
/// | SWEEP_INTERVAL_SECS | 300 | 过期回收扫描间隔(秒) |
/// | SEED_ON_STARTUP | true | 启动时初始化全部食阁座位 |
/// | REQUEST_TIMEOUT_MS | 30000 | HTTP 请求超时(毫秒) |
/// | STORAGE_TIMEOUT_MS | 5000 | 存储调用超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/chopelah HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、缓存、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 存储后端选择
    pub storage_backend: StorageBackend,
    /// 过期回收扫描间隔 (秒)
    pub sweep_interval_secs: u64,
    /// 启动时初始化全部食阁座位
    pub seed_on_startup: bool,
    /// HTTP 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 存储调用超时时间 (毫秒)
    pub storage_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/chopelah".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            storage_backend: std::env::var("STORAGE_BACKEND")
                .map(|v| StorageBackend::parse(&v))
                .unwrap_or(StorageBackend::Auto),
            sweep_interval_secs: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(300),
            seed_on_startup: std::env::var("SEED_ON_STARTUP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            storage_timeout_ms: std::env::var("STORAGE_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 本地缓存目录 (work_dir/cache)
    pub fn cache_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("cache")
    }

    /// 本地缓存文件路径
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir().join("seats.redb")
    }

    /// 日志目录 (work_dir/logs)
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.cache_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
