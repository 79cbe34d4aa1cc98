//! 保洁记录内存存储实现
//!
//! record_cleaning 在同一把写锁内完成“写记录 + 推进排期”，
//! 并发读者不会看到只完成一半的状态。

use super::facility::{InMemoryFacilityStore, paginate};
use crate::error::StorageError;
use crate::models::{CleaningLogDetail, CleaningLogFilter, CleaningLogRecord, CleaningOutcome, Page};
use crate::traits::CleaningLogStore;
use chrono::Duration;
use domain::ScopeFilter;

#[async_trait::async_trait]
impl CleaningLogStore for InMemoryFacilityStore {
    async fn record_cleaning(
        &self,
        record: CleaningLogRecord,
    ) -> Result<Option<CleaningOutcome>, StorageError> {
        let mut tables = self.write()?;
        let Some(toilet) = tables.toilets.get_mut(&record.toilet_id) else {
            return Ok(None);
        };
        let frequency = Duration::hours(i64::from(toilet.cleaning_frequency_hours));
        toilet.last_cleaned_at = Some(record.cleaned_at);
        toilet.next_cleaning_due = Some(record.cleaned_at + frequency);
        let toilet = toilet.clone();
        tables.cleaning_logs.push(record.clone());
        Ok(Some(CleaningOutcome { log: record, toilet }))
    }

    async fn list_cleaning_logs(
        &self,
        scope: &ScopeFilter,
        filter: &CleaningLogFilter,
        page: Option<Page>,
    ) -> Result<Vec<CleaningLogDetail>, StorageError> {
        let tables = self.read()?;
        let mut items: Vec<CleaningLogDetail> = tables
            .cleaning_logs
            .iter()
            .filter(|log| filter.matches(log))
            .filter_map(|log| {
                let detail = tables.scoped_detail(scope, &log.toilet_id)?;
                Some(CleaningLogDetail {
                    log: log.clone(),
                    toilet_number: detail.toilet.toilet_number,
                    path: detail.path,
                    staff_name: tables.staff.get(&log.staff_id).map(|staff| staff.name.clone()),
                })
            })
            .collect();
        items.sort_by(|a, b| {
            b.log
                .cleaned_at
                .cmp(&a.log.cleaned_at)
                .then_with(|| a.log.log_id.cmp(&b.log.log_id))
        });
        paginate(items, page)
    }

    async fn count_cleaning_logs(
        &self,
        scope: &ScopeFilter,
        filter: &CleaningLogFilter,
    ) -> Result<u64, StorageError> {
        let tables = self.read()?;
        let count = tables
            .cleaning_logs
            .iter()
            .filter(|log| filter.matches(log))
            .filter(|log| tables.toilet_in_scope(scope, &log.toilet_id))
            .count();
        Ok(count as u64)
    }
}
