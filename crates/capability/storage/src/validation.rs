//! 作用域与取值校验
//!
//! - path_in_scope：厕位所属位置/公司是否落在查询作用域内
//! - ensure_rating：评分必须在 1..=5
//! - ensure_page：分页参数不能为负
//!
//! 内存实现与 Postgres 实现共用同一套判定，保证两种后端的过滤语义一致。

use crate::error::StorageError;
use crate::models::{Page, ToiletPath};
use domain::ScopeFilter;

/// 判断厕位路径是否落在作用域内
pub fn path_in_scope(scope: &ScopeFilter, path: &ToiletPath) -> bool {
    scope.matches(&path.location_id, &path.company_id)
}

/// 验证评分范围
pub fn ensure_rating(rating: u8) -> Result<(), StorageError> {
    if !(1..=5).contains(&rating) {
        return Err(StorageError::new("rating out of range"));
    }
    Ok(())
}

/// 验证分页参数
pub fn ensure_page(page: &Page) -> Result<(), StorageError> {
    if page.limit < 0 || page.offset < 0 {
        return Err(StorageError::new("invalid page"));
    }
    Ok(())
}
