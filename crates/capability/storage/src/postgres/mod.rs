//! # PostgreSQL 存储实现模块
//!
//! 本模块提供所有存储接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：所有 SQL 使用参数绑定，禁止拼接用户输入
//! 2. **作用域过滤**：范围查询统一通过 `toilets → floors → locations` 连接，
//!    `$1` 绑定 location_id，`$2` 绑定 company_id，空值表示不限
//! 3. **可选谓词**：过滤条件写成 `($n is null or ...)`，一条 SQL 覆盖所有组合
//! 4. **稳定排序**：列表与分组结果都带有完整的 order by
//!
//! ## 包含的实现
//!
//! - **ToiletStore** (`toilet.rs`)
//! - **FeedbackStore** (`feedback.rs`)：计数、平均分与分组统计在数据库内完成
//! - **CleaningLogStore** (`cleaning_log.rs`)：写记录与推进排期在同一事务内
//! - **StaffStore** (`staff.rs`)
//!
//! ## 数据库模式
//!
//! 见 crate 根目录下的 `migrations/0001_init.sql`：
//! companies, locations, floors, toilets, staff, feedback, cleaning_logs。
//!
//! ## 错误处理
//!
//! - `sqlx::Error` 自动转换为 `StorageError`
//! - 枚举列或清单列无法解析时返回 `StorageError`（数据一致性错误）

pub mod cleaning_log;
pub mod feedback;
pub mod staff;
pub mod toilet;

pub use cleaning_log::*;
pub use feedback::*;
pub use staff::*;
pub use toilet::*;

use crate::error::StorageError;
use crate::models::{ToiletPath, ToiletRecord};
use domain::ScopeFilter;
use sqlx::Row;
use sqlx::postgres::{PgArguments, PgRow};

pub(crate) type PgQuery<'q> = sqlx::query::Query<'q, sqlx::Postgres, PgArguments>;

/// 从厕位连接到楼层、位置（别名 t / fl / l）
pub(crate) const TOILET_PATH_JOIN: &str = "join floors fl on fl.floor_id = t.floor_id \
     join locations l on l.location_id = fl.location_id";

pub(crate) const TOILET_COLUMNS: &str = "t.toilet_id, t.floor_id, t.toilet_number, t.qr_code, \
     t.cleaning_frequency_hours, t.last_cleaned_at, t.next_cleaning_due, t.status";

pub(crate) const PATH_COLUMNS: &str = "fl.name as floor_name, fl.floor_number, l.location_id, \
     l.name as location_name, l.company_id";

/// `$1` / `$2` 作用域谓词
pub(crate) const SCOPE_PREDICATE: &str =
    "($1::text is null or l.location_id = $1) and ($2::text is null or l.company_id = $2)";

pub(crate) fn bind_scope<'q>(query: PgQuery<'q>, scope: &ScopeFilter) -> PgQuery<'q> {
    query
        .bind(scope.location_id.clone())
        .bind(scope.company_id.clone())
}

pub(crate) fn toilet_from_row(row: &PgRow) -> Result<ToiletRecord, StorageError> {
    let status: String = row.try_get("status")?;
    Ok(ToiletRecord {
        toilet_id: row.try_get("toilet_id")?,
        floor_id: row.try_get("floor_id")?,
        toilet_number: row.try_get("toilet_number")?,
        qr_code: row.try_get("qr_code")?,
        cleaning_frequency_hours: row.try_get("cleaning_frequency_hours")?,
        last_cleaned_at: row.try_get("last_cleaned_at")?,
        next_cleaning_due: row.try_get("next_cleaning_due")?,
        status: status.parse()?,
    })
}

pub(crate) fn path_from_row(row: &PgRow) -> Result<ToiletPath, StorageError> {
    Ok(ToiletPath {
        floor_name: row.try_get("floor_name")?,
        floor_number: row.try_get("floor_number")?,
        location_id: row.try_get("location_id")?,
        location_name: row.try_get("location_name")?,
        company_id: row.try_get("company_id")?,
    })
}

/// count(*) 等 bigint 列转为 u64
pub(crate) fn count_from_row(row: &PgRow, column: &str) -> Result<u64, StorageError> {
    let value: i64 = row.try_get(column)?;
    u64::try_from(value).map_err(|_| StorageError::new("negative count"))
}
