//! Postgres 保洁记录存储实现
//!
//! record_cleaning 在一个事务内先更新厕位排期（行锁），再写入记录；
//! 厕位不存在时回滚，不留下孤立记录。

use super::{
    PATH_COLUMNS, PgQuery, SCOPE_PREDICATE, TOILET_COLUMNS, TOILET_PATH_JOIN, bind_scope,
    count_from_row, path_from_row, toilet_from_row,
};
use crate::connection::{DEFAULT_MAX_CONNECTIONS, connect_pool};
use crate::error::StorageError;
use crate::models::{CleaningLogDetail, CleaningLogFilter, CleaningLogRecord, CleaningOutcome, Page};
use crate::traits::CleaningLogStore;
use crate::validation::ensure_page;
use domain::{ChecklistItem, ScopeFilter};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const CLEANING_FROM: &str = "from cleaning_logs c join toilets t on t.toilet_id = c.toilet_id";

/// `$3`/`$4` 时间区间，`$5` 厕位，`$6` 员工
const CLEANING_FILTER: &str = "($3::timestamptz is null or c.cleaned_at >= $3) \
     and ($4::timestamptz is null or c.cleaned_at < $4) \
     and ($5::text is null or c.toilet_id = $5) \
     and ($6::text is null or c.staff_id = $6)";

fn bind_filter<'q>(
    query: PgQuery<'q>,
    scope: &ScopeFilter,
    filter: &CleaningLogFilter,
) -> PgQuery<'q> {
    bind_scope(query, scope)
        .bind(filter.range.map(|range| range.from))
        .bind(filter.range.and_then(|range| range.to))
        .bind(filter.toilet_id.clone())
        .bind(filter.staff_id.clone())
}

fn log_from_row(row: &PgRow) -> Result<CleaningLogRecord, StorageError> {
    let checklist: String = row.try_get("checklist")?;
    Ok(CleaningLogRecord {
        log_id: row.try_get("log_id")?,
        toilet_id: row.try_get("toilet_id")?,
        staff_id: row.try_get("staff_id")?,
        checklist: serde_json::from_str::<Vec<ChecklistItem>>(&checklist)?,
        notes: row.try_get("notes")?,
        photo_url: row.try_get("photo_url")?,
        cleaned_at: row.try_get("cleaned_at")?,
    })
}

pub struct PgCleaningLogStore {
    pub pool: PgPool,
}

impl PgCleaningLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = connect_pool(database_url, DEFAULT_MAX_CONNECTIONS).await?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl CleaningLogStore for PgCleaningLogStore {
    async fn record_cleaning(
        &self,
        record: CleaningLogRecord,
    ) -> Result<Option<CleaningOutcome>, StorageError> {
        let checklist = serde_json::to_string(&record.checklist)?;
        let mut tx = self.pool.begin().await?;
        let sql = format!(
            "update toilets t set last_cleaned_at = $2, \
             next_cleaning_due = $2 + make_interval(hours => t.cleaning_frequency_hours), \
             updated_at = $2 \
             where t.toilet_id = $1 returning {TOILET_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(&record.toilet_id)
            .bind(record.cleaned_at)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };
        let toilet = toilet_from_row(&row)?;
        sqlx::query(
            "insert into cleaning_logs (log_id, toilet_id, staff_id, checklist, notes, \
             photo_url, cleaned_at) values ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&record.log_id)
        .bind(&record.toilet_id)
        .bind(&record.staff_id)
        .bind(&checklist)
        .bind(&record.notes)
        .bind(&record.photo_url)
        .bind(record.cleaned_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(Some(CleaningOutcome { log: record, toilet }))
    }

    async fn list_cleaning_logs(
        &self,
        scope: &ScopeFilter,
        filter: &CleaningLogFilter,
        page: Option<Page>,
    ) -> Result<Vec<CleaningLogDetail>, StorageError> {
        if let Some(page) = page.as_ref() {
            ensure_page(page)?;
        }
        let sql = format!(
            "select c.log_id, c.toilet_id, c.staff_id, c.checklist, c.notes, c.photo_url, \
             c.cleaned_at, t.toilet_number, {PATH_COLUMNS}, s.name as staff_name \
             {CLEANING_FROM} {TOILET_PATH_JOIN} \
             left join staff s on s.staff_id = c.staff_id \
             where {SCOPE_PREDICATE} and {CLEANING_FILTER} \
             order by c.cleaned_at desc, c.log_id \
             limit $7 offset $8"
        );
        let rows = bind_filter(sqlx::query(&sql), scope, filter)
            .bind(page.map(|page| page.limit))
            .bind(page.map(|page| page.offset).unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(CleaningLogDetail {
                log: log_from_row(&row)?,
                toilet_number: row.try_get("toilet_number")?,
                path: path_from_row(&row)?,
                staff_name: row.try_get("staff_name")?,
            });
        }
        Ok(items)
    }

    async fn count_cleaning_logs(
        &self,
        scope: &ScopeFilter,
        filter: &CleaningLogFilter,
    ) -> Result<u64, StorageError> {
        let sql = format!(
            "select count(*) as total {CLEANING_FROM} {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {CLEANING_FILTER}"
        );
        let row = bind_filter(sqlx::query(&sql), scope, filter)
            .fetch_one(&self.pool)
            .await?;
        count_from_row(&row, "total")
    }
}
