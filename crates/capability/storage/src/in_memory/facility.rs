//! 设施内存存储
//!
//! 功能：
//! - 公司/位置/楼层/厕位/员工/反馈/保洁记录的内存表
//! - 作用域过滤（位置 → 公司）
//! - 测试与演示用的写入辅助方法

use crate::error::StorageError;
use crate::models::{
    CleaningLogRecord, CompanyRecord, FeedbackRecord, FloorRecord, LocationRecord, Page,
    StaffRecord, ToiletDetail, ToiletPath, ToiletRecord,
};
use crate::validation::{ensure_page, path_in_scope};
use domain::ScopeFilter;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) companies: BTreeMap<String, CompanyRecord>,
    pub(crate) locations: BTreeMap<String, LocationRecord>,
    pub(crate) floors: BTreeMap<String, FloorRecord>,
    pub(crate) toilets: BTreeMap<String, ToiletRecord>,
    pub(crate) staff: BTreeMap<String, StaffRecord>,
    pub(crate) feedback: Vec<FeedbackRecord>,
    pub(crate) cleaning_logs: Vec<CleaningLogRecord>,
}

impl Tables {
    /// 楼层 → 位置 → 公司 的路径；任一环缺失时返回 None
    pub(crate) fn path_of(&self, floor_id: &str) -> Option<ToiletPath> {
        let floor = self.floors.get(floor_id)?;
        let location = self.locations.get(&floor.location_id)?;
        Some(ToiletPath {
            floor_name: floor.name.clone(),
            floor_number: floor.floor_number.clone(),
            location_id: location.location_id.clone(),
            location_name: location.name.clone(),
            company_id: location.company_id.clone(),
        })
    }

    pub(crate) fn detail(&self, toilet_id: &str) -> Option<ToiletDetail> {
        let toilet = self.toilets.get(toilet_id)?;
        let path = self.path_of(&toilet.floor_id)?;
        Some(ToiletDetail {
            toilet: toilet.clone(),
            path,
        })
    }

    /// 作用域内的厕位详情
    pub(crate) fn scoped_detail(&self, scope: &ScopeFilter, toilet_id: &str) -> Option<ToiletDetail> {
        self.detail(toilet_id)
            .filter(|detail| path_in_scope(scope, &detail.path))
    }

    /// 行级作用域判定：不限作用域时不要求厕位仍然存在
    pub(crate) fn toilet_in_scope(&self, scope: &ScopeFilter, toilet_id: &str) -> bool {
        scope.is_unscoped() || self.scoped_detail(scope, toilet_id).is_some()
    }
}

/// 应用偏移分页
pub(crate) fn paginate<T>(items: Vec<T>, page: Option<Page>) -> Result<Vec<T>, StorageError> {
    let Some(page) = page else {
        return Ok(items);
    };
    ensure_page(&page)?;
    Ok(items
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect())
}

/// 设施内存存储
///
/// 使用 RwLock + BTreeMap，遍历顺序稳定。
#[derive(Debug, Default)]
pub struct InMemoryFacilityStore {
    tables: RwLock<Tables>,
}

impl InMemoryFacilityStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables
            .read()
            .map_err(|_| StorageError::new("lock failed"))
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables
            .write()
            .map_err(|_| StorageError::new("lock failed"))
    }

    pub fn insert_company(&self, record: CompanyRecord) -> Result<(), StorageError> {
        self.write()?
            .companies
            .insert(record.company_id.clone(), record);
        Ok(())
    }

    pub fn insert_location(&self, record: LocationRecord) -> Result<(), StorageError> {
        self.write()?
            .locations
            .insert(record.location_id.clone(), record);
        Ok(())
    }

    pub fn insert_floor(&self, record: FloorRecord) -> Result<(), StorageError> {
        self.write()?.floors.insert(record.floor_id.clone(), record);
        Ok(())
    }

    pub fn insert_toilet(&self, record: ToiletRecord) -> Result<(), StorageError> {
        if record.cleaning_frequency_hours <= 0 {
            return Err(StorageError::new("cleaning frequency must be positive"));
        }
        self.write()?
            .toilets
            .insert(record.toilet_id.clone(), record);
        Ok(())
    }

    pub fn insert_staff(&self, record: StaffRecord) -> Result<(), StorageError> {
        self.write()?.staff.insert(record.staff_id.clone(), record);
        Ok(())
    }

    /// 直接写入一条历史反馈（不做校验，用于种子数据）
    pub fn insert_feedback(&self, record: FeedbackRecord) -> Result<(), StorageError> {
        self.write()?.feedback.push(record);
        Ok(())
    }

    /// 直接写入一条历史保洁记录，不推进厕位排期
    pub fn insert_cleaning_log(&self, record: CleaningLogRecord) -> Result<(), StorageError> {
        self.write()?.cleaning_logs.push(record);
        Ok(())
    }

    /// 移除厕位（保留其反馈与保洁记录）
    pub fn remove_toilet(&self, toilet_id: &str) -> Result<bool, StorageError> {
        Ok(self.write()?.toilets.remove(toilet_id).is_some())
    }
}
