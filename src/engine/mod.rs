// ==========================================
// 清运运营报表分析引擎 - 引擎层
// ==========================================
// 职责: 报表计算核心 (归一化/分类/汇总/比率/导出)
// 红线: 引擎全部无状态, 方法均为纯函数;
//       不读全局时钟, "今天"/"截至日期" 一律显式传参;
//       除导出写缓冲外不产生任何 Result
// ==========================================

pub mod aggregate;
pub mod aging;
pub mod compliance;
pub mod export;
pub mod normalizer;
pub mod ratio;
pub mod stock_health;

// 重导出核心引擎
pub use aggregate::AggregationEngine;
pub use aging::AgingClassifier;
pub use compliance::ComplianceClassifier;
pub use export::{ExportError, ExportFormatter};
pub use normalizer::{RecordNormalizer, RecordSource};
pub use ratio::RatioEngine;
pub use stock_health::StockHealthClassifier;
