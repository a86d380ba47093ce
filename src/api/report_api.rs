// ==========================================
// 清运运营报表分析引擎 - 报表 API
// ==========================================
// 职责: 每类报表一个入口, 串起 取数 → 归一化 → 分类/汇总 → 比率 → 导出
// 架构: API 层 → 数据源接口 (外部) + 引擎层 (纯计算)
// 红线: 取数失败直接上抛, 不做部分汇总;
//       "今天"/"截至日期" 由调用方传入, 本层不读时钟
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ReportConfig;
use crate::domain::{AccumulatorSpec, GroupRollup, RatioSpec};
use crate::engine::aging::AgingBucketTotal;
use crate::engine::compliance::{ComplianceStatusTotal, VehicleComplianceRow};
use crate::engine::stock_health::{StockItemStatus, StockStatusTotal};
use crate::engine::{
    AggregationEngine, AgingClassifier, ComplianceClassifier, ExportFormatter, RatioEngine,
    RecordNormalizer, StockHealthClassifier,
};
use crate::repository::{ReportDataSource, ReportQuery};

// 清运行程支持的分组维度
const TRIP_DIMENSIONS: [&str; 6] = ["route", "vehicle", "driver", "helper", "date", "status"];

// ==========================================
// 响应 DTO
// ==========================================

/// 清运汇总响应 (按单一维度分组)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSummaryResponse {
    /// 本次报表调用标识
    pub report_id: String,

    /// 分组维度
    pub dimension: String,

    /// 分组汇总 (度量: weight/bags/distance, 比率: weight_per_trip/weight_share)
    pub rollups: Vec<GroupRollup>,

    /// 全量合计
    pub total_trips: u64,
    pub total_weight: f64,
    pub total_bags: f64,
    pub total_distance: f64,
}

/// 燃油效率响应 (按车辆分组)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelEfficiencyResponse {
    pub report_id: String,

    /// 分组汇总 (度量: liters/fuel_cost/distance, 比率: km_per_liter/cost_per_km)
    pub rollups: Vec<GroupRollup>,

    pub total_liters: f64,
    pub total_fuel_cost: f64,
    pub total_distance: f64,
}

/// 应收账龄响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivablesAgingResponse {
    pub report_id: String,

    /// 截至日期
    pub as_of: NaiveDate,

    /// 固定桶序的分桶合计 (Current -> Over90)
    pub buckets: Vec<AgingBucketTotal>,

    /// 按客户分组的未收金额 (度量: outstanding, 比率: outstanding_share)
    pub by_customer: Vec<GroupRollup>,

    pub total_outstanding: f64,
    pub overdue_count: u64,
    pub overdue_amount: f64,
}

/// 库存健康响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockHealthResponse {
    pub report_id: String,

    /// 单物料状态行 (保持查询层顺序)
    pub items: Vec<StockItemStatus>,

    /// 固定状态顺序的合计 (断货 -> 健康)
    pub totals: Vec<StockStatusTotal>,

    pub total_stock_value: f64,
}

/// 车辆证件合规响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleComplianceResponse {
    pub report_id: String,

    /// 截至日期
    pub today: NaiveDate,

    /// 单车状态行 (保持查询层顺序)
    pub rows: Vec<VehicleComplianceRow>,

    /// 固定状态顺序的证件数合计
    pub totals: Vec<ComplianceStatusTotal>,
}

// ==========================================
// ReportApi - 报表 API
// ==========================================
pub struct ReportApi<S: ReportDataSource> {
    /// 查询层 (外部协作方)
    source: Arc<S>,

    /// 报表阈值配置
    config: ReportConfig,

    normalizer: RecordNormalizer,
    aggregator: AggregationEngine,
    ratio_engine: RatioEngine,
    formatter: ExportFormatter,
}

impl<S: ReportDataSource> ReportApi<S> {
    /// 创建新的 ReportApi 实例
    ///
    /// # 参数
    /// - `source`: 查询层实现
    /// - `config`: 报表阈值配置 (分桶边界/预警窗口/预警系数)
    pub fn new(source: Arc<S>, config: ReportConfig) -> Self {
        Self {
            source,
            config,
            normalizer: RecordNormalizer::new(),
            aggregator: AggregationEngine::new(),
            ratio_engine: RatioEngine::new(),
            formatter: ExportFormatter::new(),
        }
    }

    // ==========================================
    // 参数校验
    // ==========================================

    fn validate_query(query: &ReportQuery) -> ApiResult<()> {
        if query.start_date > query.end_date {
            return Err(ApiError::InvalidInput(format!(
                "起始日期晚于结束日期: {} > {}",
                query.start_date, query.end_date
            )));
        }
        Ok(())
    }

    fn validate_trip_dimension(dimension: &str) -> ApiResult<()> {
        if !TRIP_DIMENSIONS.contains(&dimension) {
            return Err(ApiError::InvalidInput(format!(
                "不支持的分组维度: {} (可选: {})",
                dimension,
                TRIP_DIMENSIONS.join("/")
            )));
        }
        Ok(())
    }

    // ==========================================
    // 清运汇总报表
    // ==========================================

    /// 清运汇总: 按单一维度分组, 重量/袋数/里程合计 + 均重/占比
    ///
    /// # 参数
    /// - `query`: 日期范围与可选维度过滤 (查询层应用)
    /// - `dimension`: 分组维度 (route/vehicle/driver/helper/date/status)
    /// - `top_n`: 指定时按重量降序取前 N 组 (显式排序步骤)
    pub async fn collection_summary(
        &self,
        query: &ReportQuery,
        dimension: &str,
        top_n: Option<usize>,
    ) -> ApiResult<CollectionSummaryResponse> {
        Self::validate_query(query)?;
        Self::validate_trip_dimension(dimension)?;

        let trips = self.source.fetch_collection_trips(query).await?;
        info!(
            dimension,
            trip_count = trips.len(),
            "清运汇总: 快照取数完成"
        );

        let records = self.normalizer.normalize_all(
            &trips,
            &TRIP_DIMENSIONS,
            &["weight", "bags", "distance"],
        );

        let mut rollups = self.aggregator.aggregate(
            &records,
            |r| r.dimension(dimension).to_string(),
            &[
                AccumulatorSpec::sum("weight"),
                AccumulatorSpec::sum("bags"),
                AccumulatorSpec::sum("distance"),
                AccumulatorSpec::count("trips"),
            ],
        );

        self.ratio_engine.derive_ratios(
            &mut rollups,
            &[RatioSpec::new("weight_per_trip", "weight", "trips")],
        );
        self.ratio_engine
            .derive_share_of_total(&mut rollups, "weight", "weight_share");

        // Top-N 是显式后置步骤, 未指定时保持分组首现顺序
        if let Some(n) = top_n {
            self.aggregator.sort_by_measure_desc(&mut rollups, "weight");
            rollups = self.aggregator.top_n(rollups, n);
        }

        let total_weight: f64 = records.iter().map(|r| r.measure("weight")).sum();
        let total_bags: f64 = records.iter().map(|r| r.measure("bags")).sum();
        let total_distance: f64 = records.iter().map(|r| r.measure("distance")).sum();

        debug!(group_count = rollups.len(), "清运汇总: 分组完成");

        Ok(CollectionSummaryResponse {
            report_id: Uuid::new_v4().to_string(),
            dimension: dimension.to_string(),
            rollups,
            total_trips: records.len() as u64,
            total_weight,
            total_bags,
            total_distance,
        })
    }

    /// 清运汇总导出为分隔文本
    pub async fn export_collection_summary_csv(
        &self,
        query: &ReportQuery,
        dimension: &str,
        top_n: Option<usize>,
    ) -> ApiResult<String> {
        let response = self.collection_summary(query, dimension, top_n).await?;
        let text = self.formatter.rollup_csv(
            dimension_header(dimension),
            "Trips",
            &[
                ("weight", "Weight (kg)"),
                ("bags", "Bags"),
                ("distance", "Distance (km)"),
            ],
            &[
                ("weight_per_trip", "Kg/Trip"),
                ("weight_share", "Weight %"),
            ],
            &response.rollups,
        )?;
        Ok(text)
    }

    // ==========================================
    // 燃油效率报表
    // ==========================================

    /// 燃油效率: 按车辆分组, 升数/油费 + 行程里程, 推导 km/L 与 成本/km
    ///
    /// 加油记录与行程记录归一化后合并汇总:
    /// 两类记录各自缺失的度量按 0 计, 同车辆自然对齐
    pub async fn fuel_efficiency(&self, query: &ReportQuery) -> ApiResult<FuelEfficiencyResponse> {
        Self::validate_query(query)?;

        let fuel_entries = self.source.fetch_fuel_entries(query).await?;
        let trips = self.source.fetch_collection_trips(query).await?;
        info!(
            fuel_count = fuel_entries.len(),
            trip_count = trips.len(),
            "燃油效率: 快照取数完成"
        );

        let mut records = self.normalizer.normalize_all(
            &fuel_entries,
            &["vehicle"],
            &["liters", "fuel_cost"],
        );
        records.extend(
            self.normalizer
                .normalize_all(&trips, &["vehicle"], &["distance"]),
        );

        let mut rollups = self.aggregator.aggregate(
            &records,
            |r| r.dimension("vehicle").to_string(),
            &[
                AccumulatorSpec::sum("liters"),
                AccumulatorSpec::sum("fuel_cost"),
                AccumulatorSpec::sum("distance"),
            ],
        );

        self.ratio_engine.derive_ratios(
            &mut rollups,
            &[
                RatioSpec::new("km_per_liter", "distance", "liters"),
                RatioSpec::new("cost_per_km", "fuel_cost", "distance"),
            ],
        );

        let total_liters: f64 = rollups.iter().map(|r| r.measure("liters")).sum();
        let total_fuel_cost: f64 = rollups.iter().map(|r| r.measure("fuel_cost")).sum();
        let total_distance: f64 = rollups.iter().map(|r| r.measure("distance")).sum();

        Ok(FuelEfficiencyResponse {
            report_id: Uuid::new_v4().to_string(),
            rollups,
            total_liters,
            total_fuel_cost,
            total_distance,
        })
    }

    /// 燃油效率导出为分隔文本
    pub async fn export_fuel_efficiency_csv(&self, query: &ReportQuery) -> ApiResult<String> {
        let response = self.fuel_efficiency(query).await?;
        let text = self.formatter.rollup_csv(
            "Vehicle",
            "Records",
            &[
                ("liters", "Liters"),
                ("fuel_cost", "Fuel Cost"),
                ("distance", "Distance (km)"),
            ],
            &[("km_per_liter", "Km/L"), ("cost_per_km", "Cost/Km")],
            &response.rollups,
        )?;
        Ok(text)
    }

    // ==========================================
    // 应收账龄报表
    // ==========================================

    /// 应收账龄: 发票 -> 账龄条目 -> 固定桶序合计 + 按客户分组
    ///
    /// # 参数
    /// - `query`: 发票日期范围
    /// - `as_of`: 账龄截至日期 (调用方外壳默认传 "今天")
    pub async fn receivables_aging(
        &self,
        query: &ReportQuery,
        as_of: NaiveDate,
    ) -> ApiResult<ReceivablesAgingResponse> {
        Self::validate_query(query)?;

        let invoices = self.source.fetch_invoices(query).await?;
        info!(
            invoice_count = invoices.len(),
            %as_of,
            "应收账龄: 快照取数完成"
        );

        let classifier = AgingClassifier::from_config(&self.config);
        let items = classifier.build_items(&invoices, as_of);
        let buckets = classifier.bucket_totals(&items);
        let (overdue_count, overdue_amount) = classifier.overdue_totals(&items);
        let total_outstanding: f64 = items.iter().map(|i| i.amount_outstanding).sum();

        // 按客户分组的未收金额 (走通用汇总管道)
        let records =
            self.normalizer
                .normalize_all(&invoices, &["customer"], &["outstanding"]);
        let mut by_customer = self.aggregator.aggregate(
            &records,
            |r| r.dimension("customer").to_string(),
            &[AccumulatorSpec::sum("outstanding")],
        );
        self.ratio_engine
            .derive_share_of_total(&mut by_customer, "outstanding", "outstanding_share");

        Ok(ReceivablesAgingResponse {
            report_id: Uuid::new_v4().to_string(),
            as_of,
            buckets,
            by_customer,
            total_outstanding,
            overdue_count,
            overdue_amount,
        })
    }

    /// 应收账龄导出为分隔文本 (固定桶序)
    pub async fn export_receivables_aging_csv(
        &self,
        query: &ReportQuery,
        as_of: NaiveDate,
    ) -> ApiResult<String> {
        let response = self.receivables_aging(query, as_of).await?;

        let headers = vec![
            "Bucket".to_string(),
            "Invoices".to_string(),
            "Outstanding".to_string(),
        ];
        let rows: Vec<Vec<String>> = response
            .buckets
            .iter()
            .map(|b| {
                vec![
                    b.bucket.label().to_string(),
                    b.count.to_string(),
                    crate::engine::export::format_number(b.amount_outstanding),
                ]
            })
            .collect();

        Ok(self.formatter.to_delimited_text(&headers, &rows)?)
    }

    // ==========================================
    // 库存健康报表
    // ==========================================

    /// 库存健康: 全量库存行分类 + 固定状态顺序合计
    pub async fn stock_health(&self) -> ApiResult<StockHealthResponse> {
        let rows = self.source.fetch_stock_rows().await?;
        info!(row_count = rows.len(), "库存健康: 快照取数完成");

        let classifier = StockHealthClassifier::from_config(&self.config);
        let items = classifier.classify_rows(&rows);
        let totals = classifier.status_totals(&items);
        let total_stock_value: f64 = items.iter().map(|i| i.stock_value).sum();

        Ok(StockHealthResponse {
            report_id: Uuid::new_v4().to_string(),
            items,
            totals,
            total_stock_value,
        })
    }

    /// 库存健康导出为分隔文本 (保持查询层行序)
    pub async fn export_stock_health_csv(&self) -> ApiResult<String> {
        let response = self.stock_health().await?;

        let headers = vec![
            "Code".to_string(),
            "Name".to_string(),
            "Current".to_string(),
            "Minimum".to_string(),
            "Status".to_string(),
            "Stock Value".to_string(),
        ];
        let rows: Vec<Vec<String>> = response
            .items
            .iter()
            .map(|i| {
                vec![
                    i.code.clone(),
                    i.name.clone(),
                    crate::engine::export::format_number(i.current_quantity),
                    crate::engine::export::format_number(i.minimum_quantity),
                    i.status.label().to_string(),
                    crate::engine::export::format_number(i.stock_value),
                ]
            })
            .collect();

        Ok(self.formatter.to_delimited_text(&headers, &rows)?)
    }

    // ==========================================
    // 车辆证件合规报表
    // ==========================================

    /// 车辆证件合规: 保险/年检到期日 vs 显式传入的 "今天"
    pub async fn vehicle_compliance(
        &self,
        today: NaiveDate,
    ) -> ApiResult<VehicleComplianceResponse> {
        let documents = self.source.fetch_vehicle_documents().await?;
        info!(
            document_count = documents.len(),
            %today,
            "车辆证件合规: 快照取数完成"
        );

        let classifier = ComplianceClassifier::from_config(&self.config);
        let rows = classifier.classify_documents(&documents, today);
        let totals = classifier.status_totals(&rows);

        Ok(VehicleComplianceResponse {
            report_id: Uuid::new_v4().to_string(),
            today,
            rows,
            totals,
        })
    }

    /// 车辆证件合规导出为分隔文本 (保持查询层行序)
    pub async fn export_vehicle_compliance_csv(&self, today: NaiveDate) -> ApiResult<String> {
        let response = self.vehicle_compliance(today).await?;

        let headers = vec![
            "Registration".to_string(),
            "Insurance Expiry".to_string(),
            "Insurance Status".to_string(),
            "Fitness Expiry".to_string(),
            "Fitness Status".to_string(),
        ];
        let rows: Vec<Vec<String>> = response
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.registration.clone(),
                    r.insurance_expiry.map(|d| d.to_string()).unwrap_or_default(),
                    r.insurance_status.label().to_string(),
                    r.fitness_expiry.map(|d| d.to_string()).unwrap_or_default(),
                    r.fitness_status.label().to_string(),
                ]
            })
            .collect();

        Ok(self.formatter.to_delimited_text(&headers, &rows)?)
    }
}

/// 分组维度 -> 导出列标题
fn dimension_header(dimension: &str) -> &'static str {
    match dimension {
        "route" => "Route",
        "vehicle" => "Vehicle",
        "driver" => "Driver",
        "helper" => "Helper",
        "date" => "Date",
        "status" => "Status",
        _ => "Group",
    }
}
