//! 过期预订回收器
//!
//! 启动时先执行一次补扫（清理上次运行遗留的过期预订），之后按固定间隔
//! 扫描全部食阁并释放已过期的座位。
//!
//! 回收走与用户取消相同的幂等释放路径：回收器与取消并发竞争时，双方都
//! 退化为 no-op。单个食阁扫描失败只记录日志并跳过，等待下一轮。

use crate::db::repository::SeatStore;
use shared::{FoodCentre, SeatKey};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Result of one sweep pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    /// Seats examined
    pub scanned: usize,
    /// Expired bookings released
    pub released: usize,
    /// Centres or seats skipped because of storage failures
    pub failures: usize,
}

/// 过期预订回收器
///
/// 注册为 `TaskKind::Periodic`，在 `register_background_tasks()` 中启动。
pub struct ExpirySweeper {
    store: Arc<dyn SeatStore>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ExpirySweeper {
    pub fn new(store: Arc<dyn SeatStore>, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            store,
            interval,
            shutdown,
        }
    }

    /// 主循环：启动补扫 → 周期触发
    pub async fn run(self) {
        tracing::info!(
            "Expiry sweeper started (interval: {}s)",
            self.interval.as_secs()
        );

        // 启动补扫：上次运行遗留的过期状态不能被第一个调用者观察到
        self.sweep_and_log().await;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Expiry sweeper received shutdown signal");
                    return;
                }
            }

            self.sweep_and_log().await;
        }
    }

    async fn sweep_and_log(&self) {
        let now = shared::util::now_millis();
        let stats = self.sweep_once(now).await;
        if stats.released > 0 || stats.failures > 0 {
            tracing::info!(
                scanned = stats.scanned,
                released = stats.released,
                failures = stats.failures,
                "Sweep pass finished"
            );
        } else {
            tracing::debug!(scanned = stats.scanned, "Sweep pass finished (nothing expired)");
        }
    }

    /// One scan-and-release pass over all centres at time `now_ms`.
    ///
    /// Releases every record with `status = booked` and `expires_at <
    /// now_ms`, leaving all others untouched. Best effort: failures are
    /// counted and skipped, never fatal.
    pub async fn sweep_once(&self, now_ms: i64) -> SweepStats {
        let mut stats = SweepStats::default();

        for centre in FoodCentre::ALL {
            let seats = match self.store.list_seats(centre).await {
                Ok(seats) => seats,
                Err(e) => {
                    tracing::warn!(centre = %centre, error = %e, "Sweep skipped centre");
                    stats.failures += 1;
                    continue;
                }
            };

            for (table, row) in &seats {
                for (seat, record) in row {
                    stats.scanned += 1;
                    if !record.is_expired(now_ms) {
                        continue;
                    }

                    let key = SeatKey::new(centre, *table, *seat);
                    match self.store.release_seat(&key).await {
                        Ok(()) => {
                            stats.released += 1;
                            tracing::info!(
                                seat = %key,
                                expired_by = record.booked_by.as_deref().unwrap_or(""),
                                "Released expired booking"
                            );
                        }
                        Err(e) => {
                            stats.failures += 1;
                            tracing::warn!(seat = %key, error = %e, "Failed to release expired booking");
                        }
                    }
                }
            }
        }

        stats
    }
}
