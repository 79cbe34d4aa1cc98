//! 厕位内存存储实现

use super::facility::InMemoryFacilityStore;
use crate::error::StorageError;
use crate::models::{ToiletDetail, ToiletFilter};
use crate::traits::ToiletStore;
use domain::ScopeFilter;

#[async_trait::async_trait]
impl ToiletStore for InMemoryFacilityStore {
    async fn find_toilet(&self, toilet_id: &str) -> Result<Option<ToiletDetail>, StorageError> {
        Ok(self.read()?.detail(toilet_id))
    }

    async fn list_toilets(
        &self,
        scope: &ScopeFilter,
        filter: &ToiletFilter,
    ) -> Result<Vec<ToiletDetail>, StorageError> {
        let tables = self.read()?;
        let items = tables
            .toilets
            .keys()
            .filter_map(|toilet_id| tables.scoped_detail(scope, toilet_id))
            .filter(|detail| filter.matches(&detail.toilet))
            .collect();
        Ok(items)
    }

    async fn count_toilets(
        &self,
        scope: &ScopeFilter,
        filter: &ToiletFilter,
    ) -> Result<u64, StorageError> {
        Ok(self.list_toilets(scope, filter).await?.len() as u64)
    }
}
