// ==========================================
// 清运运营报表分析引擎 - 汇总实体
// ==========================================
// 职责: 定义汇总管道的通用单元 (MetricRecord) 与输出实体 (GroupRollup)
// 红线: MetricRecord 进入管道前已由归一化层保证:
//       维度无空标签, 度量全部为有限非负数
// ==========================================

use crate::domain::types::RatioValue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// MetricRecord - 通用汇总单元
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRecord {
    /// 业务日期 (清运日期/发票日期/加油日期)
    pub timestamp: NaiveDate,

    /// 维度标签 (dimension name -> label, 缺失已替换为 "Unknown")
    pub dimensions: HashMap<String, String>,

    /// 度量值 (measure name -> 有限非负数)
    pub measures: HashMap<String, f64>,
}

impl MetricRecord {
    /// 读取维度标签, 缺失时返回 "Unknown"
    ///
    /// 归一化层已保证声明过的维度都存在, 此处的回退只为未声明维度兜底
    pub fn dimension(&self, name: &str) -> &str {
        self.dimensions
            .get(name)
            .map(|s| s.as_str())
            .unwrap_or(crate::UNKNOWN_LABEL)
    }

    /// 读取度量值, 缺失时返回 0
    pub fn measure(&self, name: &str) -> f64 {
        self.measures.get(name).copied().unwrap_or(0.0)
    }
}

// ==========================================
// 累加器声明 (Accumulator Spec)
// ==========================================

/// 累加操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccumulatorOp {
    Sum,   // 求和
    Count, // 计数 (忽略度量取值)
    Max,   // 最大值
}

/// 累加器声明: 对哪个度量做什么操作
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccumulatorSpec {
    /// 度量名 (同时作为 GroupRollup 中的结果键)
    pub measure: String,

    /// 累加操作
    pub op: AccumulatorOp,
}

impl AccumulatorSpec {
    pub fn sum(measure: &str) -> Self {
        Self {
            measure: measure.to_string(),
            op: AccumulatorOp::Sum,
        }
    }

    pub fn count(measure: &str) -> Self {
        Self {
            measure: measure.to_string(),
            op: AccumulatorOp::Count,
        }
    }

    pub fn max(measure: &str) -> Self {
        Self {
            measure: measure.to_string(),
            op: AccumulatorOp::Max,
        }
    }
}

// ==========================================
// 比率声明 (Ratio Spec)
// ==========================================

/// 比率声明: 分子度量 / 分母度量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioSpec {
    /// 比率名 (GroupRollup.ratios 中的键)
    pub name: String,

    /// 分子度量名
    pub numerator: String,

    /// 分母度量名
    pub denominator: String,
}

impl RatioSpec {
    pub fn new(name: &str, numerator: &str, denominator: &str) -> Self {
        Self {
            name: name.to_string(),
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
        }
    }
}

// ==========================================
// GroupRollup - 分组汇总结果
// ==========================================
// 生命周期: 每次汇总调用新建, 比率推导后不再变更, 随调用丢弃
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRollup {
    /// 分组标签 (单维度或 "route|driver" 复合键)
    pub key: String,

    /// 组内记录数
    pub count: u64,

    /// 各度量累计值 (measure name -> total)
    pub measures: HashMap<String, f64>,

    /// 推导比率 (ratio name -> 值或哨兵)
    pub ratios: HashMap<String, RatioValue>,
}

impl GroupRollup {
    /// 新建空汇总组
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            count: 0,
            measures: HashMap::new(),
            ratios: HashMap::new(),
        }
    }

    /// 读取度量累计值, 未声明的度量返回 0
    pub fn measure(&self, name: &str) -> f64 {
        self.measures.get(name).copied().unwrap_or(0.0)
    }

    /// 读取推导比率, 未推导的比率返回哨兵
    pub fn ratio(&self, name: &str) -> RatioValue {
        self.ratios
            .get(name)
            .copied()
            .unwrap_or(RatioValue::Undefined)
    }
}
