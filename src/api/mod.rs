// ==========================================
// 清运运营报表分析引擎 - API 层
// ==========================================
// 职责: 报表入口与响应 DTO; 请求时序守卫
// ==========================================

pub mod error;
pub mod report_api;
pub mod request_guard;

pub use error::{ApiError, ApiResult};
pub use report_api::{
    CollectionSummaryResponse, FuelEfficiencyResponse, ReceivablesAgingResponse, ReportApi,
    StockHealthResponse, VehicleComplianceResponse,
};
pub use request_guard::RequestGuard;
