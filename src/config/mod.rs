// ==========================================
// 清运运营报表分析引擎 - 报表阈值配置
// ==========================================
// 职责: 集中管理报表阈值
// 说明: 分桶边界/预警窗口/库存预警系数都是业务决策而非算法常量,
//       因此全部作为配置注入, 代码里不留散落的魔法数字
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// AgingBucketConfig - 账龄分桶边界
// ==========================================
// 边界语义: age <= current_max 为未逾期, 依次类推, 超过 late_max 为 90+
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgingBucketConfig {
    /// 未逾期上界 (含)
    pub current_max_days: i64,

    /// 中段上界 (含)
    pub mid_max_days: i64,

    /// 后段上界 (含)
    pub late_max_days: i64,
}

impl Default for AgingBucketConfig {
    fn default() -> Self {
        Self {
            current_max_days: 30,
            mid_max_days: 60,
            late_max_days: 90,
        }
    }
}

// ==========================================
// StockConfig - 库存健康阈值
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    /// 预警系数: current <= minimum * warning_factor 时进入预警
    pub warning_factor: f64,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            warning_factor: 1.5,
        }
    }
}

// ==========================================
// ComplianceConfig - 证件到期预警窗口
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceConfig {
    /// 预警窗口天数: today <= expiry <= today + N 时为即将过期
    pub warning_window_days: i64,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            warning_window_days: 30,
        }
    }
}

// ==========================================
// ReceivablesConfig - 应收款项参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceivablesConfig {
    /// 未约定信用期时的默认天数
    pub default_credit_period_days: i64,
}

impl Default for ReceivablesConfig {
    fn default() -> Self {
        Self {
            default_credit_period_days: 30,
        }
    }
}

// ==========================================
// ReportConfig - 报表配置全集
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 账龄分桶边界
    pub aging: AgingBucketConfig,

    /// 库存健康阈值
    pub stock: StockConfig,

    /// 证件到期预警窗口
    pub compliance: ComplianceConfig,

    /// 应收款项参数
    pub receivables: ReceivablesConfig,
}

impl ReportConfig {
    /// 从 JSON 字符串解析配置, 缺失字段取默认值
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("报表配置 JSON 解析失败")
    }

    /// 从 JSON 文件加载配置
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        Self::from_json_str(&content)
    }
}
