//! Postgres 厕位存储实现

use super::{
    PATH_COLUMNS, PgQuery, SCOPE_PREDICATE, TOILET_COLUMNS, TOILET_PATH_JOIN, bind_scope,
    count_from_row, path_from_row, toilet_from_row,
};
use crate::connection::{DEFAULT_MAX_CONNECTIONS, connect_pool};
use crate::error::StorageError;
use crate::models::{ToiletDetail, ToiletFilter};
use crate::traits::ToiletStore;
use domain::ScopeFilter;
use sqlx::PgPool;

/// `$3` 状态，`$4` 排期早于，`$5` 上次保洁早于
const TOILET_FILTER: &str = "($3::text is null or t.status = $3) \
     and ($4::timestamptz is null or t.next_cleaning_due < $4) \
     and ($5::timestamptz is null or t.last_cleaned_at is null or t.last_cleaned_at < $5)";

fn bind_filter<'q>(query: PgQuery<'q>, scope: &ScopeFilter, filter: &ToiletFilter) -> PgQuery<'q> {
    bind_scope(query, scope)
        .bind(filter.status.map(|status| status.as_str().to_string()))
        .bind(filter.due_before)
        .bind(filter.not_cleaned_since)
}

pub struct PgToiletStore {
    pub pool: PgPool,
}

impl PgToiletStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = connect_pool(database_url, DEFAULT_MAX_CONNECTIONS).await?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl ToiletStore for PgToiletStore {
    async fn find_toilet(&self, toilet_id: &str) -> Result<Option<ToiletDetail>, StorageError> {
        let sql = format!(
            "select {TOILET_COLUMNS}, {PATH_COLUMNS} from toilets t {TOILET_PATH_JOIN} \
             where t.toilet_id = $1"
        );
        let row = sqlx::query(&sql)
            .bind(toilet_id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(ToiletDetail {
            toilet: toilet_from_row(&row)?,
            path: path_from_row(&row)?,
        }))
    }

    async fn list_toilets(
        &self,
        scope: &ScopeFilter,
        filter: &ToiletFilter,
    ) -> Result<Vec<ToiletDetail>, StorageError> {
        let sql = format!(
            "select {TOILET_COLUMNS}, {PATH_COLUMNS} from toilets t {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {TOILET_FILTER} order by t.toilet_id"
        );
        let rows = bind_filter(sqlx::query(&sql), scope, filter)
            .fetch_all(&self.pool)
            .await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(ToiletDetail {
                toilet: toilet_from_row(&row)?,
                path: path_from_row(&row)?,
            });
        }
        Ok(items)
    }

    async fn count_toilets(
        &self,
        scope: &ScopeFilter,
        filter: &ToiletFilter,
    ) -> Result<u64, StorageError> {
        let sql = format!(
            "select count(*) as total from toilets t {TOILET_PATH_JOIN} \
             where {SCOPE_PREDICATE} and {TOILET_FILTER}"
        );
        let row = bind_filter(sqlx::query(&sql), scope, filter)
            .fetch_one(&self.pool)
            .await?;
        count_from_row(&row, "total")
    }
}
