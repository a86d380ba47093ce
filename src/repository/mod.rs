// ==========================================
// 清运运营报表分析引擎 - 数据源层
// ==========================================
// 职责: 定义查询层接口 (外部协作方), 返回扁平记录快照
// 红线: 日期范围/维度过滤由查询层在数据到达本核心前完成;
//       重试/降级是查询层的责任, 本核心不重试
// ==========================================

pub mod error;
pub mod memory;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::InMemoryDataSource;

use crate::domain::{CollectionTrip, FuelEntry, Invoice, StockRow, VehicleDocument};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ReportQuery - 报表取数参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportQuery {
    /// 起始日期 (含)
    pub start_date: NaiveDate,

    /// 结束日期 (含)
    pub end_date: NaiveDate,

    /// 可选单维度过滤, 如 ("route", "R1")
    pub filter: Option<DimensionFilter>,
}

/// 单维度过滤条件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionFilter {
    /// 维度名 (route / vehicle / driver / customer)
    pub dimension: String,

    /// 过滤标签
    pub label: String,
}

impl ReportQuery {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            filter: None,
        }
    }

    pub fn with_filter(mut self, dimension: &str, label: &str) -> Self {
        self.filter = Some(DimensionFilter {
            dimension: dimension.to_string(),
            label: label.to_string(),
        });
        self
    }

    /// 日期是否落在查询范围内 (两端含)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

// ==========================================
// ReportDataSource - 查询层接口
// ==========================================
// 取数是报表管道中唯一的挂起点, 也是唯一的可失败环节
#[async_trait]
pub trait ReportDataSource: Send + Sync {
    /// 取清运行程快照
    async fn fetch_collection_trips(
        &self,
        query: &ReportQuery,
    ) -> RepositoryResult<Vec<CollectionTrip>>;

    /// 取加油记录快照
    async fn fetch_fuel_entries(&self, query: &ReportQuery) -> RepositoryResult<Vec<FuelEntry>>;

    /// 取销售发票快照
    async fn fetch_invoices(&self, query: &ReportQuery) -> RepositoryResult<Vec<Invoice>>;

    /// 取库存快照 (无日期维度)
    async fn fetch_stock_rows(&self) -> RepositoryResult<Vec<StockRow>>;

    /// 取车辆证件快照 (无日期维度)
    async fn fetch_vehicle_documents(&self) -> RepositoryResult<Vec<VehicleDocument>>;
}
