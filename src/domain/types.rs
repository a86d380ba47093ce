// ==========================================
// 清运运营报表分析引擎 - 领域类型定义
// ==========================================
// 红线: 分桶边界全部来自配置注入, 类型本身不携带阈值
// 序列化格式: SCREAMING_SNAKE_CASE (与前端/导出一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 账龄分桶 (Age Bucket)
// ==========================================
// 顺序: Current < Days31To60 < Days61To90 < Over90
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeBucket {
    Current,    // 未逾期 (0-30天)
    Days31To60, // 31-60天
    Days61To90, // 61-90天
    Over90,     // 90天以上
}

impl AgeBucket {
    /// 固定呈现顺序 (账龄表从新到旧)
    pub const ALL: [AgeBucket; 4] = [
        AgeBucket::Current,
        AgeBucket::Days31To60,
        AgeBucket::Days61To90,
        AgeBucket::Over90,
    ];

    /// 报表列标签
    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Current => "Current",
            AgeBucket::Days31To60 => "31-60 Days",
            AgeBucket::Days61To90 => "61-90 Days",
            AgeBucket::Over90 => "Over 90 Days",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeBucket::Current => write!(f, "CURRENT"),
            AgeBucket::Days31To60 => write!(f, "DAYS_31_TO_60"),
            AgeBucket::Days61To90 => write!(f, "DAYS_61_TO_90"),
            AgeBucket::Over90 => write!(f, "OVER_90"),
        }
    }
}

// ==========================================
// 库存健康状态 (Stock Health)
// ==========================================
// 顺序: 越靠前越严重, 呈现时按固定顺序输出
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockHealth {
    OutOfStock, // 断货 (数量为零, 优先判定)
    Critical,   // 告急 (低于最低库存)
    Warning,    // 预警 (接近最低库存)
    Healthy,    // 健康
}

impl StockHealth {
    /// 固定呈现顺序 (从严重到健康)
    pub const ALL: [StockHealth; 4] = [
        StockHealth::OutOfStock,
        StockHealth::Critical,
        StockHealth::Warning,
        StockHealth::Healthy,
    ];

    /// 报表行标签
    pub fn label(&self) -> &'static str {
        match self {
            StockHealth::OutOfStock => "Out of Stock",
            StockHealth::Critical => "Critical",
            StockHealth::Warning => "Warning",
            StockHealth::Healthy => "Healthy",
        }
    }
}

impl fmt::Display for StockHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockHealth::OutOfStock => write!(f, "OUT_OF_STOCK"),
            StockHealth::Critical => write!(f, "CRITICAL"),
            StockHealth::Warning => write!(f, "WARNING"),
            StockHealth::Healthy => write!(f, "HEALTHY"),
        }
    }
}

// ==========================================
// 证件有效期状态 (Expiry Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStatus {
    NoDate,       // 未登记有效期
    Expired,      // 已过期
    ExpiringSoon, // 即将过期 (预警窗口内)
    Valid,        // 有效
}

impl ExpiryStatus {
    /// 固定呈现顺序 (从缺失/过期到有效)
    pub const ALL: [ExpiryStatus; 4] = [
        ExpiryStatus::NoDate,
        ExpiryStatus::Expired,
        ExpiryStatus::ExpiringSoon,
        ExpiryStatus::Valid,
    ];

    /// 报表行标签
    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::NoDate => "No Date",
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::ExpiringSoon => "Expiring Soon",
            ExpiryStatus::Valid => "Valid",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryStatus::NoDate => write!(f, "NO_DATE"),
            ExpiryStatus::Expired => write!(f, "EXPIRED"),
            ExpiryStatus::ExpiringSoon => write!(f, "EXPIRING_SOON"),
            ExpiryStatus::Valid => write!(f, "VALID"),
        }
    }
}

// ==========================================
// 比率哨兵值 (Ratio Value)
// ==========================================
// 红线: 分母为零必须呈现为 Undefined ("—"),
//       绝不允许 Infinity / NaN / 被静默记为 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatioValue {
    /// 可计算的比率
    Value(f64),
    /// 分母为零, 不可计算
    Undefined,
}

impl RatioValue {
    /// 导出时的哨兵文本
    pub const UNDEFINED_TEXT: &'static str = "—";

    /// 转换为 Option 供程序侧区分
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RatioValue::Value(v) => Some(*v),
            RatioValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, RatioValue::Undefined)
    }
}

impl fmt::Display for RatioValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioValue::Value(v) => write!(f, "{:.2}", v),
            RatioValue::Undefined => write!(f, "{}", Self::UNDEFINED_TEXT),
        }
    }
}

// ==========================================
// 账龄条目 (Aging Item)
// ==========================================
// 由发票 + as_of 日期构造, 构造时完成全部钳制 (见 engine::aging)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingItem {
    /// 业务标识 (发票号或客户标签)
    pub reference: String,

    /// 客户标签
    pub customer_label: String,

    /// 未收金额 (= 总额 - 已收, 钳制为 >= 0)
    pub amount_outstanding: f64,

    /// 账龄天数 (= as_of - 单据日期, 钳制为 >= 0)
    pub age_in_days: i64,

    /// 信用期天数 (缺失时取配置默认值)
    pub credit_period_days: i64,
}

impl AgingItem {
    /// 是否逾期: 超过信用期且仍有未收金额
    pub fn is_overdue(&self) -> bool {
        self.age_in_days > self.credit_period_days && self.amount_outstanding > 0.0
    }
}
