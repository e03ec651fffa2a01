pub mod chembl_client;

pub use chembl_client::ChemblClient;

use crate::error::ApiError;
use crate::models::ActivityPage;
use async_trait::async_trait;

/// 分页活性数据源
///
/// 分页器只依赖这个接口，测试中可以替换成内存数据源。
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// 获取 `offset` 处的一页，最多 `limit` 条
    async fn fetch_page(
        &self,
        target_chembl_id: &str,
        limit: u64,
        offset: u64,
    ) -> Result<ActivityPage, ApiError>;
}
