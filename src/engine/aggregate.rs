// ==========================================
// 清运运营报表分析引擎 - 分组汇总引擎
// ==========================================
// 职责: 声明式多键 reduce, 各报表共用同一条汇总管道
// 红线: 输出顺序 = 分组键首次出现顺序 (显式维护插入序,
//       不依赖 HashMap 迭代序), 同输入同声明必须逐字节一致;
//       排序/Top-N 是显式后置步骤, 不是引擎默认行为
// ==========================================

use crate::domain::{AccumulatorOp, AccumulatorSpec, GroupRollup, MetricRecord};
use std::collections::HashMap;

// ==========================================
// AggregationEngine - 分组汇总引擎
// ==========================================
// 无状态引擎, O(n) 单遍扫描, 额外空间 O(组数)
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 分组汇总
    ///
    /// # 参数
    /// - `records`: 归一化后的记录列表
    /// - `key_fn`: 记录 -> 分组标签 (单维度或复合键)
    /// - `accumulators`: 累加器声明列表
    ///
    /// # 返回
    /// 按分组键首次出现顺序排列的汇总列表; 空输入返回空列表
    pub fn aggregate<F>(
        &self,
        records: &[MetricRecord],
        key_fn: F,
        accumulators: &[AccumulatorSpec],
    ) -> Vec<GroupRollup>
    where
        F: Fn(&MetricRecord) -> String,
    {
        let mut rollups: Vec<GroupRollup> = Vec::new();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        for record in records {
            let key = key_fn(record);
            let index = match index_by_key.get(&key) {
                Some(i) => *i,
                None => {
                    let i = rollups.len();
                    let mut rollup = GroupRollup::new(&key);
                    // 声明过的度量先占位为 0, 保证每组键空间一致
                    for spec in accumulators {
                        rollup.measures.insert(spec.measure.clone(), 0.0);
                    }
                    rollups.push(rollup);
                    index_by_key.insert(key, i);
                    i
                }
            };

            let rollup = &mut rollups[index];
            rollup.count += 1;

            for spec in accumulators {
                let value = record.measure(&spec.measure);
                let slot = rollup
                    .measures
                    .entry(spec.measure.clone())
                    .or_insert(0.0);
                match spec.op {
                    AccumulatorOp::Sum => *slot += value,
                    AccumulatorOp::Count => *slot += 1.0,
                    AccumulatorOp::Max => {
                        if value > *slot {
                            *slot = value;
                        }
                    }
                }
            }
        }

        rollups
    }

    /// 复合分组键: 按声明顺序取维度标签, 以 "|" 连接
    pub fn composite_key(record: &MetricRecord, dimensions: &[&str]) -> String {
        dimensions
            .iter()
            .map(|d| record.dimension(d))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// 按某度量降序重排 (显式后置步骤, 用于 "Top N" 视图)
    ///
    /// 并列值保持原有先后 (稳定排序), 维持确定性输出
    pub fn sort_by_measure_desc(&self, rollups: &mut Vec<GroupRollup>, measure: &str) {
        rollups.sort_by(|a, b| {
            b.measure(measure)
                .partial_cmp(&a.measure(measure))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// 截取前 N 组 (显式后置步骤)
    pub fn top_n(&self, rollups: Vec<GroupRollup>, n: usize) -> Vec<GroupRollup> {
        rollups.into_iter().take(n).collect()
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}
