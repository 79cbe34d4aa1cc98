//! 应用状态
//!
//! 持有三个能力服务（告警、统计、写入）和时钟。
//! 时钟默认读取系统时间，测试中可替换为固定时刻。

use chrono::{DateTime, Utc};
use sanimon_alerts::AlertEngine;
use sanimon_analytics::AnalyticsEngine;
use sanimon_intake::IntakeService;
use sanimon_storage::{
    CleaningLogStore, FeedbackStore, InMemoryFacilityStore, PgCleaningLogStore, PgFeedbackStore,
    PgPool, PgStaffStore, PgToiletStore, StaffStore, ToiletStore,
};
use std::sync::Arc;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub alerts: Arc<AlertEngine>,
    pub analytics: Arc<AnalyticsEngine>,
    pub intake: Arc<IntakeService>,
    clock: Clock,
}

impl AppState {
    pub fn from_stores(
        toilets: Arc<dyn ToiletStore>,
        feedback: Arc<dyn FeedbackStore>,
        cleaning_logs: Arc<dyn CleaningLogStore>,
        staff: Arc<dyn StaffStore>,
    ) -> Self {
        Self {
            alerts: Arc::new(AlertEngine::new(feedback.clone(), toilets.clone())),
            analytics: Arc::new(AnalyticsEngine::new(
                toilets.clone(),
                feedback.clone(),
                cleaning_logs.clone(),
                staff.clone(),
            )),
            intake: Arc::new(IntakeService::new(toilets, staff, feedback, cleaning_logs)),
            clock: Arc::new(Utc::now),
        }
    }

    /// 内存后端：一个结构体实现全部存储接口。
    pub fn in_memory(store: Arc<InMemoryFacilityStore>) -> Self {
        Self::from_stores(store.clone(), store.clone(), store.clone(), store)
    }

    /// Postgres 后端：各存储共享同一个连接池。
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_stores(
            Arc::new(PgToiletStore::new(pool.clone())),
            Arc::new(PgFeedbackStore::new(pool.clone())),
            Arc::new(PgCleaningLogStore::new(pool.clone())),
            Arc::new(PgStaffStore::new(pool)),
        )
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
