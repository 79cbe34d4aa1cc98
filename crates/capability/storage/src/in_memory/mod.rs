//! 内存存储实现模块
//!
//! 用于本地演示和测试。单个 `InMemoryFacilityStore` 同时实现
//! ToiletStore、FeedbackStore、CleaningLogStore、StaffStore，
//! 所有表放在同一把 RwLock 下，写保洁记录与推进排期因此是原子的。

pub mod cleaning_log;
pub mod demo;
pub mod facility;
pub mod feedback;
pub mod staff;
pub mod toilet;

pub use facility::*;
