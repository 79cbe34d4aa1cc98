//! 员工内存存储实现

use super::facility::InMemoryFacilityStore;
use crate::error::StorageError;
use crate::models::{StaffFilter, StaffRecord};
use crate::traits::StaffStore;

#[async_trait::async_trait]
impl StaffStore for InMemoryFacilityStore {
    async fn find_staff(&self, staff_id: &str) -> Result<Option<StaffRecord>, StorageError> {
        Ok(self.read()?.staff.get(staff_id).cloned())
    }

    async fn list_staff(&self, filter: &StaffFilter) -> Result<Vec<StaffRecord>, StorageError> {
        let tables = self.read()?;
        let mut items: Vec<StaffRecord> = tables
            .staff
            .values()
            .filter(|item| {
                filter
                    .company_id
                    .as_deref()
                    .is_none_or(|company_id| item.company_id == company_id)
            })
            .filter(|item| !filter.active_only || item.is_active)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.staff_id.cmp(&b.staff_id)));
        Ok(items)
    }
}
