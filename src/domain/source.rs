// ==========================================
// 清运运营报表分析引擎 - 查询层输入记录
// ==========================================
// 职责: 定义查询层返回的扁平记录形态 (输入契约)
// 说明: 关联查找 (如线路名) 已由查询层预连接为标量字段;
//       上游允许为空的字段一律 Option, 由归一化层统一兜底
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// CollectionTrip - 清运行程
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionTrip {
    /// 清运日期
    pub date: NaiveDate,

    /// 线路标签 (未指派时为空)
    pub route_label: Option<String>,

    /// 车辆标签
    pub vehicle_label: Option<String>,

    /// 司机标签
    pub driver_label: Option<String>,

    /// 跟车工标签
    pub helper_label: Option<String>,

    /// 总重量 (kg)
    pub total_weight: Option<f64>,

    /// 总袋数
    pub total_bags: Option<f64>,

    /// 出车里程表读数 (km)
    pub start_km: Option<f64>,

    /// 收车里程表读数 (km)
    pub end_km: Option<f64>,

    /// 行程状态 (completed / cancelled 等)
    pub status: Option<String>,
}

// ==========================================
// FuelEntry - 加油记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelEntry {
    /// 加油日期
    pub date: NaiveDate,

    /// 车辆标签
    pub vehicle_label: Option<String>,

    /// 升数
    pub liters: Option<f64>,

    /// 单价 (每升)
    pub price_per_liter: Option<f64>,

    /// 总金额
    pub total_amount: Option<f64>,
}

// ==========================================
// Invoice - 销售发票
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// 发票号
    pub invoice_no: String,

    /// 发票日期
    pub date: NaiveDate,

    /// 客户标签
    pub customer_label: Option<String>,

    /// 小计
    pub subtotal: Option<f64>,

    /// 总金额
    pub total_amount: Option<f64>,

    /// 已收金额
    pub paid_amount: Option<f64>,

    /// 信用期天数 (未约定时为空, 取配置默认值)
    pub credit_period_days: Option<i64>,
}

// ==========================================
// StockRow - 库存行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRow {
    /// 物料编码
    pub code: String,

    /// 物料名称
    pub name: String,

    /// 当前库存数量
    pub current_quantity: f64,

    /// 最低库存数量 (0 表示未配置阈值)
    pub minimum_quantity: f64,

    /// 单价 (库存价值 = 数量 x 单价)
    pub rate: Option<f64>,
}

// ==========================================
// VehicleDocument - 车辆证件
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleDocument {
    /// 车牌号
    pub registration: String,

    /// 保险到期日
    pub insurance_expiry: Option<NaiveDate>,

    /// 年检到期日
    pub fitness_expiry: Option<NaiveDate>,
}
