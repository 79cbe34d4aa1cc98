//! 反馈内存存储实现
//!
//! 分组统计在内存中直接累加；排序规则与 Postgres 实现保持一致。

use super::facility::{InMemoryFacilityStore, Tables, paginate};
use crate::error::StorageError;
use crate::models::{
    FeedbackDetail, FeedbackFilter, FeedbackRecord, IssueCount, Page, RatingCount, ToiletCount,
};
use crate::traits::FeedbackStore;
use crate::validation::ensure_rating;
use domain::{IssueType, ScopeFilter};
use std::collections::{BTreeMap, HashMap};

fn matching<'a>(
    tables: &'a Tables,
    scope: &'a ScopeFilter,
    filter: &'a FeedbackFilter,
) -> impl Iterator<Item = &'a FeedbackRecord> + 'a {
    tables
        .feedback
        .iter()
        .filter(move |item| filter.matches(item))
        .filter(move |item| tables.toilet_in_scope(scope, &item.toilet_id))
}

#[async_trait::async_trait]
impl FeedbackStore for InMemoryFacilityStore {
    async fn create_feedback(&self, record: FeedbackRecord) -> Result<FeedbackRecord, StorageError> {
        ensure_rating(record.rating)?;
        let mut tables = self.write()?;
        if !tables.toilets.contains_key(&record.toilet_id) {
            return Err(StorageError::new("toilet not found"));
        }
        tables.feedback.push(record.clone());
        Ok(record)
    }

    async fn list_feedback(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
        page: Option<Page>,
    ) -> Result<Vec<FeedbackDetail>, StorageError> {
        let tables = self.read()?;
        let mut items: Vec<FeedbackDetail> = tables
            .feedback
            .iter()
            .filter(|item| filter.matches(item))
            .filter_map(|item| {
                let detail = tables.scoped_detail(scope, &item.toilet_id)?;
                Some(FeedbackDetail {
                    feedback: item.clone(),
                    toilet_number: detail.toilet.toilet_number,
                    path: detail.path,
                })
            })
            .collect();
        items.sort_by(|a, b| {
            b.feedback
                .created_at
                .cmp(&a.feedback.created_at)
                .then_with(|| a.feedback.feedback_id.cmp(&b.feedback.feedback_id))
        });
        paginate(items, page)
    }

    async fn count_feedback(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<u64, StorageError> {
        let tables = self.read()?;
        Ok(matching(&tables, scope, filter).count() as u64)
    }

    async fn average_rating(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Option<f64>, StorageError> {
        let tables = self.read()?;
        let (sum, count) = matching(&tables, scope, filter)
            .fold((0u64, 0u64), |(sum, count), item| {
                (sum + u64::from(item.rating), count + 1)
            });
        if count == 0 {
            return Ok(None);
        }
        Ok(Some(sum as f64 / count as f64))
    }

    async fn count_by_rating(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Vec<RatingCount>, StorageError> {
        let tables = self.read()?;
        let mut groups: BTreeMap<u8, u64> = BTreeMap::new();
        for item in matching(&tables, scope, filter) {
            *groups.entry(item.rating).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(rating, count)| RatingCount { rating, count })
            .collect())
    }

    async fn count_by_issue_type(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Vec<IssueCount>, StorageError> {
        let tables = self.read()?;
        let mut groups: HashMap<IssueType, u64> = HashMap::new();
        for item in matching(&tables, scope, filter) {
            if let Some(issue_type) = item.issue_type {
                *groups.entry(issue_type).or_default() += 1;
            }
        }
        let mut items: Vec<IssueCount> = groups
            .into_iter()
            .map(|(issue_type, count)| IssueCount { issue_type, count })
            .collect();
        items.sort_by(|a, b| a.issue_type.as_str().cmp(b.issue_type.as_str()));
        Ok(items)
    }

    async fn count_by_toilet(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
        more_than: u64,
    ) -> Result<Vec<ToiletCount>, StorageError> {
        let tables = self.read()?;
        let mut groups: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
        for item in matching(&tables, scope, filter) {
            let entry = groups.entry(item.toilet_id.as_str()).or_default();
            entry.0 += 1;
            entry.1 += u64::from(item.rating);
        }
        let mut items: Vec<ToiletCount> = groups
            .into_iter()
            .filter(|(_, (count, _))| *count > more_than)
            .map(|(toilet_id, (count, sum))| ToiletCount {
                toilet_id: toilet_id.to_string(),
                count,
                average_rating: sum as f64 / count as f64,
            })
            .collect();
        items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.toilet_id.cmp(&b.toilet_id)));
        Ok(items)
    }
}
