// ==========================================
// 清运运营报表分析引擎 - 比率推导引擎
// ==========================================
// 职责: 汇总后置比率推导 (均值/效率/占比)
// 红线: 分母为零 => RatioValue::Undefined ("—"),
//       绝不产出 Infinity / NaN, 也绝不静默记 0;
//       占比的全局总量为零时例外: 所有组占比为 0%
// ==========================================

use crate::domain::types::RatioValue;
use crate::domain::{GroupRollup, RatioSpec};

// ==========================================
// RatioEngine - 比率推导引擎
// ==========================================
pub struct RatioEngine;

impl RatioEngine {
    pub fn new() -> Self {
        Self
    }

    /// 按声明为每个汇总组推导比率
    ///
    /// # 参数
    /// - `rollups`: 汇总列表 (就地附加比率字段)
    /// - `specs`: 比率声明列表
    pub fn derive_ratios(&self, rollups: &mut [GroupRollup], specs: &[RatioSpec]) {
        for rollup in rollups.iter_mut() {
            for spec in specs {
                let numerator = rollup.measure(&spec.numerator);
                let denominator = rollup.measure(&spec.denominator);

                let value = if denominator == 0.0 {
                    // 零分母: 不可计算, 与真零比率必须可区分
                    RatioValue::Undefined
                } else {
                    RatioValue::Value(numerator / denominator)
                };

                rollup.ratios.insert(spec.name.clone(), value);
            }
        }
    }

    /// 推导各组某度量占全体总量的百分比
    ///
    /// 全局总量为零时没有可分配的份额, 所有组占比记为 0%
    /// (区别于单组零分母的 "无意义对比" 情形)
    pub fn derive_share_of_total(
        &self,
        rollups: &mut [GroupRollup],
        measure: &str,
        ratio_name: &str,
    ) {
        let total: f64 = rollups.iter().map(|r| r.measure(measure)).sum();

        for rollup in rollups.iter_mut() {
            let share = if total == 0.0 {
                RatioValue::Value(0.0)
            } else {
                RatioValue::Value(rollup.measure(measure) / total * 100.0)
            };
            rollup.ratios.insert(ratio_name.to_string(), share);
        }
    }
}

impl Default for RatioEngine {
    fn default() -> Self {
        Self::new()
    }
}
