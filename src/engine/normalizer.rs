// ==========================================
// 清运运营报表分析引擎 - 记录归一化器
// ==========================================
// 职责: 把查询层的可空扁平记录压成安全计算形态
// 红线: 空维度在此唯一入口替换为 "Unknown",
//       避免 null/空串变体在下游裂成意外分组;
//       度量在此唯一入口钳制为有限非负数
// ==========================================

use crate::domain::source::{CollectionTrip, FuelEntry, Invoice};
use crate::domain::MetricRecord;
use crate::UNKNOWN_LABEL;
use chrono::NaiveDate;
use std::collections::HashMap;

// ==========================================
// RecordSource - 原始记录取数接口
// ==========================================
// 每种查询层记录实现一次, 归一化器对所有报表只写一份
pub trait RecordSource {
    /// 记录的业务日期
    fn record_date(&self) -> NaiveDate;

    /// 按维度名读取标签 (缺失/未指派返回 None)
    fn dimension(&self, name: &str) -> Option<String>;

    /// 按度量名读取原始值 (缺失返回 None, 允许为负, 由归一化器钳制)
    fn measure(&self, name: &str) -> Option<f64>;
}

// ==========================================
// RecordNormalizer - 归一化器
// ==========================================
// 无状态引擎, 永不失败: 任意输入都产出合法 MetricRecord
pub struct RecordNormalizer;

impl RecordNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// 归一化单条记录
    ///
    /// # 参数
    /// - `source`: 原始记录
    /// - `dimensions`: 声明的维度名列表
    /// - `measures`: 声明的度量名列表
    ///
    /// # 规则
    /// - 维度缺失 => "Unknown"
    /// - 度量缺失/非有限 => 0
    /// - 度量为负 (如里程表录反) => 钳制为 0
    pub fn normalize<S: RecordSource>(
        &self,
        source: &S,
        dimensions: &[&str],
        measures: &[&str],
    ) -> MetricRecord {
        let mut dimension_map = HashMap::with_capacity(dimensions.len());
        for name in dimensions {
            let label = source
                .dimension(name)
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
            dimension_map.insert((*name).to_string(), label);
        }

        let mut measure_map = HashMap::with_capacity(measures.len());
        for name in measures {
            let value = source.measure(name).unwrap_or(0.0);
            let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
            measure_map.insert((*name).to_string(), value);
        }

        MetricRecord {
            timestamp: source.record_date(),
            dimensions: dimension_map,
            measures: measure_map,
        }
    }

    /// 归一化一批记录 (保持输入顺序)
    pub fn normalize_all<S: RecordSource>(
        &self,
        sources: &[S],
        dimensions: &[&str],
        measures: &[&str],
    ) -> Vec<MetricRecord> {
        sources
            .iter()
            .map(|s| self.normalize(s, dimensions, measures))
            .collect()
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 查询层记录的取数实现
// ==========================================

impl RecordSource for CollectionTrip {
    fn record_date(&self) -> NaiveDate {
        self.date
    }

    fn dimension(&self, name: &str) -> Option<String> {
        match name {
            "route" => self.route_label.clone(),
            "vehicle" => self.vehicle_label.clone(),
            "driver" => self.driver_label.clone(),
            "helper" => self.helper_label.clone(),
            "status" => self.status.clone(),
            "date" => Some(self.date.to_string()),
            _ => None,
        }
    }

    fn measure(&self, name: &str) -> Option<f64> {
        match name {
            "weight" => self.total_weight,
            "bags" => self.total_bags,
            // 里程差原样返回, 录反时为负, 由归一化器钳制
            "distance" => match (self.start_km, self.end_km) {
                (Some(start), Some(end)) => Some(end - start),
                _ => None,
            },
            _ => None,
        }
    }
}

impl RecordSource for FuelEntry {
    fn record_date(&self) -> NaiveDate {
        self.date
    }

    fn dimension(&self, name: &str) -> Option<String> {
        match name {
            "vehicle" => self.vehicle_label.clone(),
            "date" => Some(self.date.to_string()),
            _ => None,
        }
    }

    fn measure(&self, name: &str) -> Option<f64> {
        match name {
            "liters" => self.liters,
            // 总金额缺失时退回 升数 x 单价
            "fuel_cost" => self.total_amount.or_else(|| {
                match (self.liters, self.price_per_liter) {
                    (Some(l), Some(p)) => Some(l * p),
                    _ => None,
                }
            }),
            _ => None,
        }
    }
}

impl RecordSource for Invoice {
    fn record_date(&self) -> NaiveDate {
        self.date
    }

    fn dimension(&self, name: &str) -> Option<String> {
        match name {
            "customer" => self.customer_label.clone(),
            "date" => Some(self.date.to_string()),
            _ => None,
        }
    }

    fn measure(&self, name: &str) -> Option<f64> {
        match name {
            "subtotal" => self.subtotal,
            "total_amount" => self.total_amount,
            "paid_amount" => self.paid_amount,
            // 未收金额, 多收时为负, 由归一化器钳制
            "outstanding" => Some(
                self.total_amount.unwrap_or(0.0) - self.paid_amount.unwrap_or(0.0),
            ),
            _ => None,
        }
    }
}
