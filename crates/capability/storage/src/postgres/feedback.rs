//! Postgres 反馈存储实现
//!
//! 计数、平均分与分组统计均在 SQL 中完成，避免把整个窗口的反馈拉回内存。

use super::{
    PATH_COLUMNS, PgQuery, SCOPE_PREDICATE, TOILET_PATH_JOIN, bind_scope, count_from_row,
    path_from_row,
};
use crate::connection::{DEFAULT_MAX_CONNECTIONS, connect_pool};
use crate::error::StorageError;
use crate::models::{
    FeedbackDetail, FeedbackFilter, FeedbackRecord, IssueCount, Page, RatingCount, ToiletCount,
};
use crate::traits::FeedbackStore;
use crate::validation::{ensure_page, ensure_rating};
use domain::{IssueType, ScopeFilter};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const FEEDBACK_FROM: &str = "from feedback f join toilets t on t.toilet_id = f.toilet_id";

const FEEDBACK_COLUMNS: &str = "f.feedback_id, f.toilet_id, f.rating, f.issue_type, f.comment, \
     f.photo_url, f.user_agent, f.ip_address, f.created_at";

/// `$3`/`$4` 时间区间，`$5` 评分上限，`$6` 问题类型集合，`$7` 厕位
const FEEDBACK_FILTER: &str = "($3::timestamptz is null or f.created_at >= $3) \
     and ($4::timestamptz is null or f.created_at < $4) \
     and ($5::smallint is null or f.rating <= $5) \
     and (cardinality($6::text[]) = 0 or f.issue_type = any($6)) \
     and ($7::text is null or f.toilet_id = $7)";

fn bind_filter<'q>(
    query: PgQuery<'q>,
    scope: &ScopeFilter,
    filter: &FeedbackFilter,
) -> PgQuery<'q> {
    let issue_types: Vec<String> = filter
        .issue_types
        .iter()
        .map(|issue| issue.as_str().to_string())
        .collect();
    bind_scope(query, scope)
        .bind(filter.range.map(|range| range.from))
        .bind(filter.range.and_then(|range| range.to))
        .bind(filter.max_rating.map(i16::from))
        .bind(issue_types)
        .bind(filter.toilet_id.clone())
}

fn rating_from_row(row: &PgRow, column: &str) -> Result<u8, StorageError> {
    let rating: i16 = row.try_get(column)?;
    u8::try_from(rating).map_err(|_| StorageError::new("corrupt column: rating"))
}

fn feedback_from_row(row: &PgRow) -> Result<FeedbackRecord, StorageError> {
    let issue_type: Option<String> = row.try_get("issue_type")?;
    Ok(FeedbackRecord {
        feedback_id: row.try_get("feedback_id")?,
        toilet_id: row.try_get("toilet_id")?,
        rating: rating_from_row(row, "rating")?,
        issue_type: issue_type.map(|value| value.parse()).transpose()?,
        comment: row.try_get("comment")?,
        photo_url: row.try_get("photo_url")?,
        user_agent: row.try_get("user_agent")?,
        ip_address: row.try_get("ip_address")?,
        created_at: row.try_get("created_at")?,
    })
}

pub struct PgFeedbackStore {
    pub pool: PgPool,
}

impl PgFeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = connect_pool(database_url, DEFAULT_MAX_CONNECTIONS).await?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn create_feedback(&self, record: FeedbackRecord) -> Result<FeedbackRecord, StorageError> {
        ensure_rating(record.rating)?;
        sqlx::query(
            "insert into feedback (feedback_id, toilet_id, rating, issue_type, comment, \
             photo_url, user_agent, ip_address, created_at) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&record.feedback_id)
        .bind(&record.toilet_id)
        .bind(i16::from(record.rating))
        .bind(record.issue_type.map(|issue| issue.as_str()))
        .bind(&record.comment)
        .bind(&record.photo_url)
        .bind(&record.user_agent)
        .bind(&record.ip_address)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_feedback(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
        page: Option<Page>,
    ) -> Result<Vec<FeedbackDetail>, StorageError> {
        if let Some(page) = page.as_ref() {
            ensure_page(page)?;
        }
        let sql = format!(
            "select {FEEDBACK_COLUMNS}, t.toilet_number, {PATH_COLUMNS} \
             {FEEDBACK_FROM} {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {FEEDBACK_FILTER} \
             order by f.created_at desc, f.feedback_id \
             limit $8 offset $9"
        );
        let rows = bind_filter(sqlx::query(&sql), scope, filter)
            .bind(page.map(|page| page.limit))
            .bind(page.map(|page| page.offset).unwrap_or(0))
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(FeedbackDetail {
                feedback: feedback_from_row(&row)?,
                toilet_number: row.try_get("toilet_number")?,
                path: path_from_row(&row)?,
            });
        }
        Ok(items)
    }

    async fn count_feedback(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<u64, StorageError> {
        let sql = format!(
            "select count(*) as total {FEEDBACK_FROM} {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {FEEDBACK_FILTER}"
        );
        let row = bind_filter(sqlx::query(&sql), scope, filter)
            .fetch_one(&self.pool)
            .await?;
        count_from_row(&row, "total")
    }

    async fn average_rating(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Option<f64>, StorageError> {
        let sql = format!(
            "select avg(f.rating)::float8 as average {FEEDBACK_FROM} {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {FEEDBACK_FILTER}"
        );
        let row = bind_filter(sqlx::query(&sql), scope, filter)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("average")?)
    }

    async fn count_by_rating(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Vec<RatingCount>, StorageError> {
        let sql = format!(
            "select f.rating, count(*) as total {FEEDBACK_FROM} {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {FEEDBACK_FILTER} \
             group by f.rating order by f.rating"
        );
        let rows = bind_filter(sqlx::query(&sql), scope, filter)
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(RatingCount {
                rating: rating_from_row(&row, "rating")?,
                count: count_from_row(&row, "total")?,
            });
        }
        Ok(items)
    }

    async fn count_by_issue_type(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Vec<IssueCount>, StorageError> {
        let sql = format!(
            "select f.issue_type, count(*) as total {FEEDBACK_FROM} {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {FEEDBACK_FILTER} and f.issue_type is not null \
             group by f.issue_type order by f.issue_type"
        );
        let rows = bind_filter(sqlx::query(&sql), scope, filter)
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            let issue_type: String = row.try_get("issue_type")?;
            items.push(IssueCount {
                issue_type: issue_type.parse::<IssueType>()?,
                count: count_from_row(&row, "total")?,
            });
        }
        Ok(items)
    }

    async fn count_by_toilet(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
        more_than: u64,
    ) -> Result<Vec<ToiletCount>, StorageError> {
        let sql = format!(
            "select f.toilet_id, count(*) as total, avg(f.rating)::float8 as average \
             {FEEDBACK_FROM} {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {FEEDBACK_FILTER} \
             group by f.toilet_id having count(*) > $8 \
             order by count(*) desc, f.toilet_id"
        );
        let threshold = i64::try_from(more_than).unwrap_or(i64::MAX);
        let rows = bind_filter(sqlx::query(&sql), scope, filter)
            .bind(threshold)
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ToiletCount {
                toilet_id: row.try_get("toilet_id")?,
                count: count_from_row(&row, "total")?,
                average_rating: row.try_get("average")?,
            });
        }
        Ok(items)
    }
}
