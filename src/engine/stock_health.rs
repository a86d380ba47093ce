// ==========================================
// 清运运营报表分析引擎 - 库存健康分类器
// ==========================================
// 职责: 当前库存 vs 最低库存 -> 健康状态
// 红线: 全函数; 数量为零优先判定为断货;
//       最低库存为 0 表示未配置阈值, 豁免 Critical/Warning
// ==========================================

use crate::config::{ReportConfig, StockConfig};
use crate::domain::source::StockRow;
use crate::domain::types::StockHealth;
use serde::{Deserialize, Serialize};

// ==========================================
// StockItemStatus - 单物料状态行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockItemStatus {
    /// 物料编码
    pub code: String,

    /// 物料名称
    pub name: String,

    /// 当前库存数量
    pub current_quantity: f64,

    /// 最低库存数量
    pub minimum_quantity: f64,

    /// 健康状态
    pub status: StockHealth,

    /// 库存价值 (数量 x 单价, 单价缺失按 0)
    pub stock_value: f64,
}

// ==========================================
// StockStatusTotal - 单状态合计
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockStatusTotal {
    /// 健康状态
    pub status: StockHealth,

    /// 状态内物料数
    pub count: u64,

    /// 状态内库存价值合计
    pub stock_value: f64,
}

// ==========================================
// StockHealthClassifier - 库存健康分类器
// ==========================================
pub struct StockHealthClassifier {
    /// 预警系数 (默认 1.5, 业务可调)
    warning_factor: f64,
}

impl StockHealthClassifier {
    pub fn new(config: StockConfig) -> Self {
        Self {
            warning_factor: config.warning_factor,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.stock.clone())
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 当前库存 + 最低库存 -> 健康状态
    ///
    /// 判定顺序:
    /// 1. current == 0                               => OutOfStock (与最低库存无关)
    /// 2. minimum > 0 且 current <= minimum          => Critical
    /// 3. minimum > 0 且 current <= minimum * 系数   => Warning
    /// 4. 其余                                       => Healthy
    pub fn classify(&self, current: f64, minimum: f64) -> StockHealth {
        if current == 0.0 {
            StockHealth::OutOfStock
        } else if minimum > 0.0 && current <= minimum {
            StockHealth::Critical
        } else if minimum > 0.0 && current <= minimum * self.warning_factor {
            StockHealth::Warning
        } else {
            StockHealth::Healthy
        }
    }

    /// 为一批库存行生成状态行 (保持输入顺序)
    pub fn classify_rows(&self, rows: &[StockRow]) -> Vec<StockItemStatus> {
        rows.iter()
            .map(|row| StockItemStatus {
                code: row.code.clone(),
                name: row.name.clone(),
                current_quantity: row.current_quantity,
                minimum_quantity: row.minimum_quantity,
                status: self.classify(row.current_quantity, row.minimum_quantity),
                stock_value: row.current_quantity * row.rate.unwrap_or(0.0),
            })
            .collect()
    }

    /// 按固定状态顺序合计 (断货 -> 健康), 空状态仍占位
    pub fn status_totals(&self, items: &[StockItemStatus]) -> Vec<StockStatusTotal> {
        StockHealth::ALL
            .iter()
            .map(|status| {
                let mut count = 0;
                let mut stock_value = 0.0;
                for item in items.iter().filter(|i| i.status == *status) {
                    count += 1;
                    stock_value += item.stock_value;
                }
                StockStatusTotal {
                    status: *status,
                    count,
                    stock_value,
                }
            })
            .collect()
    }
}

impl Default for StockHealthClassifier {
    fn default() -> Self {
        Self::new(StockConfig::default())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn default_classifier() -> StockHealthClassifier {
        StockHealthClassifier::default()
    }

    #[test]
    fn test_zero_quantity_always_out_of_stock() {
        let classifier = default_classifier();

        // 与最低库存无关
        assert_eq!(classifier.classify(0.0, 0.0), StockHealth::OutOfStock);
        assert_eq!(classifier.classify(0.0, 10.0), StockHealth::OutOfStock);
        assert_eq!(classifier.classify(0.0, 1000.0), StockHealth::OutOfStock);
    }

    #[test]
    fn test_no_threshold_always_healthy() {
        let classifier = default_classifier();

        // minimum == 0 表示未配置阈值, 只要有库存就是健康
        assert_eq!(classifier.classify(0.5, 0.0), StockHealth::Healthy);
        assert_eq!(classifier.classify(100.0, 0.0), StockHealth::Healthy);
    }

    #[test]
    fn test_critical_and_warning_boundaries() {
        let classifier = default_classifier();

        assert_eq!(classifier.classify(10.0, 10.0), StockHealth::Critical);
        assert_eq!(classifier.classify(10.1, 10.0), StockHealth::Warning);
        assert_eq!(classifier.classify(15.0, 10.0), StockHealth::Warning); // 10 * 1.5 含边界
        assert_eq!(classifier.classify(15.1, 10.0), StockHealth::Healthy);
    }

    #[test]
    fn test_configured_warning_factor() {
        let classifier = StockHealthClassifier::new(StockConfig {
            warning_factor: 2.0,
        });

        assert_eq!(classifier.classify(20.0, 10.0), StockHealth::Warning);
        assert_eq!(classifier.classify(20.1, 10.0), StockHealth::Healthy);
    }

    #[test]
    fn test_classify_rows_and_totals() {
        let classifier = default_classifier();
        let rows = vec![
            StockRow {
                code: "MAT-001".to_string(),
                name: "Bags".to_string(),
                current_quantity: 0.0,
                minimum_quantity: 50.0,
                rate: Some(2.0),
            },
            StockRow {
                code: "MAT-002".to_string(),
                name: "Gloves".to_string(),
                current_quantity: 40.0,
                minimum_quantity: 50.0,
                rate: Some(1.5),
            },
            StockRow {
                code: "MAT-003".to_string(),
                name: "Fuel Cans".to_string(),
                current_quantity: 200.0,
                minimum_quantity: 50.0,
                rate: None,
            },
        ];

        let items = classifier.classify_rows(&rows);
        assert_eq!(items[0].status, StockHealth::OutOfStock);
        assert_eq!(items[1].status, StockHealth::Critical);
        assert_eq!(items[1].stock_value, 60.0);
        assert_eq!(items[2].status, StockHealth::Healthy);
        assert_eq!(items[2].stock_value, 0.0); // 单价缺失按 0

        let totals = classifier.status_totals(&items);
        assert_eq!(totals.len(), 4);
        assert_eq!(totals[0].status, StockHealth::OutOfStock);
        assert_eq!(totals[0].count, 1);
        assert_eq!(totals[1].count, 1); // Critical
        assert_eq!(totals[2].count, 0); // Warning 空桶占位
        assert_eq!(totals[3].count, 1); // Healthy
    }
}
