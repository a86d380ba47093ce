// ==========================================
// 清运运营报表分析引擎 - 领域层
// ==========================================
// 职责: 定义报表管道流经的实体与类型
// 红线: 领域实体全部为瞬态, 每次报表调用新建, 调用结束即丢弃
// ==========================================

pub mod metric;
pub mod source;
pub mod types;

// 重导出领域实体
pub use metric::{AccumulatorOp, AccumulatorSpec, GroupRollup, MetricRecord, RatioSpec};
pub use source::{CollectionTrip, FuelEntry, Invoice, StockRow, VehicleDocument};
pub use types::{AgeBucket, AgingItem, ExpiryStatus, RatioValue, StockHealth};
