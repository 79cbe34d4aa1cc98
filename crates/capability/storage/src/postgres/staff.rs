//! Postgres 员工存储实现

use crate::connection::{DEFAULT_MAX_CONNECTIONS, connect_pool};
use crate::error::StorageError;
use crate::models::{StaffFilter, StaffRecord};
use crate::traits::StaffStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

fn staff_from_row(row: &PgRow) -> Result<StaffRecord, StorageError> {
    let role: String = row.try_get("role")?;
    Ok(StaffRecord {
        staff_id: row.try_get("staff_id")?,
        company_id: row.try_get("company_id")?,
        name: row.try_get("name")?,
        phone: row.try_get("phone")?,
        role: role.parse()?,
        is_active: row.try_get("is_active")?,
    })
}

pub struct PgStaffStore {
    pub pool: PgPool,
}

impl PgStaffStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = connect_pool(database_url, DEFAULT_MAX_CONNECTIONS).await?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl StaffStore for PgStaffStore {
    async fn find_staff(&self, staff_id: &str) -> Result<Option<StaffRecord>, StorageError> {
        let row = sqlx::query(
            "select staff_id, company_id, name, phone, role, is_active \
             from staff where staff_id = $1",
        )
        .bind(staff_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(staff_from_row).transpose()
    }

    async fn list_staff(&self, filter: &StaffFilter) -> Result<Vec<StaffRecord>, StorageError> {
        let rows = sqlx::query(
            "select staff_id, company_id, name, phone, role, is_active from staff \
             where ($1::text is null or company_id = $1) and (not $2 or is_active) \
             order by name, staff_id",
        )
        .bind(filter.company_id.as_deref())
        .bind(filter.active_only)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(staff_from_row).collect()
    }
}
