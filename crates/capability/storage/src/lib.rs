//! # Sanimon Storage 模块
//!
//! 设施数据的存储网关：厕位（含楼层/位置/公司路径）、用户反馈、保洁记录、员工。
//! 告警、统计、写入链路都只通过这里的 trait 访问数据。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：ToiletStore、FeedbackStore、CleaningLogStore、StaffStore
//! 2. **数据模型层** (`models.rs`)：实体记录、关联视图、查询条件、分组结果
//! 3. **错误处理层** (`error.rs`)：统一的 `StorageError`
//! 4. **验证辅助层** (`validation.rs`)：作用域判定、评分与分页校验
//! 5. **连接管理层** (`connection.rs`)：Postgres 连接池
//! 6. **实现层**：
//!    - `in_memory/`：`InMemoryFacilityStore`，一个结构体实现全部接口（测试与演示）
//!    - `postgres/`：每个接口一个 `Pg*Store`（生产环境）
//!
//! ## 作用域
//!
//! 范围查询接收 `domain::ScopeFilter`：给出 location_id 时只保留该位置下的厕位，
//! 给出 company_id 时只保留该公司下各位置的厕位；两者同时给出时两个条件都生效。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use sanimon_storage::{FeedbackFilter, FeedbackStore, InMemoryFacilityStore};
//! use domain::{ScopeFilter, lookback};
//!
//! let store = InMemoryFacilityStore::with_demo_fleet(now)?;
//! let filter = FeedbackFilter::within(lookback(now, chrono::Duration::hours(24)));
//! let total = store.count_feedback(&ScopeFilter::all(), &filter).await?;
//! ```
//!
//! ## 设计约束
//!
//! - **禁止直接 SQL**：Handler 与引擎层不写 SQL，统一通过 storage 层
//! - **稳定顺序**：列表与分组结果顺序确定，同一数据重复查询结果一致
//! - **原子写入**：写保洁记录与推进厕位排期不可分割

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;
pub mod validation;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::InMemoryFacilityStore;
pub use in_memory::demo::{DEMO_CLEANER_ID, DEMO_COMPANY_ID, DEMO_LOCATION_ID, DEMO_SUPERVISOR_ID};

pub use postgres::{PgCleaningLogStore, PgFeedbackStore, PgStaffStore, PgToiletStore};
