// ==========================================
// 清运运营报表分析引擎 - 核心库
// ==========================================
// 系统定位: 运营管理系统的报表与分析核心
// 管道: 取数(外部) → 归一化 → 分桶分类 → 分组汇总 → 比率推导 → 呈现/导出
// 红线: 计算核心不做 I/O, 不读全局时钟, 不抛异常
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 归一化/分类/汇总/比率/导出
pub mod engine;

// 数据源层 - 查询层接口(外部协作方)
pub mod repository;

// 配置层 - 报表阈值配置
pub mod config;

// API 层 - 报表入口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AgeBucket, ExpiryStatus, RatioValue, StockHealth};

// 领域实体
pub use domain::{
    AgingItem, CollectionTrip, FuelEntry, GroupRollup, Invoice, MetricRecord, StockRow,
    VehicleDocument,
};

// 引擎
pub use engine::{
    AggregationEngine, AgingClassifier, ComplianceClassifier, ExportFormatter, RecordNormalizer,
    StockHealthClassifier,
};

// 配置
pub use config::ReportConfig;

// API
pub use api::{ReportApi, RequestGuard};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "清运运营报表分析引擎";

// 缺失维度的统一标签 (归一化层唯一写入点)
pub const UNKNOWN_LABEL: &str = "Unknown";

// ==========================================
// 预编译检查
// ==========================================
