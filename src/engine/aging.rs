// ==========================================
// 清运运营报表分析引擎 - 账龄分类器
// ==========================================
// 职责: 发票 -> 账龄条目 -> 分桶合计
// 红线: 全函数 (任意输入都有定义, 不抛异常);
//       分桶边界来自配置注入, 必须在 30/31, 60/61, 90/91 处精确
// ==========================================

use crate::config::{AgingBucketConfig, ReportConfig};
use crate::domain::source::Invoice;
use crate::domain::types::{AgeBucket, AgingItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// AgingBucketTotal - 单桶合计
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingBucketTotal {
    /// 所属分桶
    pub bucket: AgeBucket,

    /// 桶内条目数
    pub count: u64,

    /// 桶内未收金额合计
    pub amount_outstanding: f64,
}

// ==========================================
// AgingClassifier - 账龄分类器
// ==========================================
pub struct AgingClassifier {
    /// 分桶边界 (默认 30/60/90)
    buckets: AgingBucketConfig,

    /// 未约定信用期时的默认天数
    default_credit_period_days: i64,
}

impl AgingClassifier {
    pub fn new(buckets: AgingBucketConfig, default_credit_period_days: i64) -> Self {
        Self {
            buckets,
            default_credit_period_days,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(
            config.aging.clone(),
            config.receivables.default_credit_period_days,
        )
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 账龄天数 -> 分桶
    ///
    /// 边界规则 (下界含):
    /// - age <= current_max        => Current
    /// - age <= mid_max            => Days31To60
    /// - age <= late_max           => Days61To90
    /// - 其余                      => Over90
    pub fn classify(&self, age_in_days: i64) -> AgeBucket {
        if age_in_days <= self.buckets.current_max_days {
            AgeBucket::Current
        } else if age_in_days <= self.buckets.mid_max_days {
            AgeBucket::Days31To60
        } else if age_in_days <= self.buckets.late_max_days {
            AgeBucket::Days61To90
        } else {
            AgeBucket::Over90
        }
    }

    /// 由发票构造账龄条目 (构造时完成全部钳制)
    ///
    /// - 未收金额 = 总额 - 已收, 钳制为 >= 0
    /// - 账龄 = as_of - 发票日期, 钳制为 >= 0
    /// - 信用期缺失 => 配置默认值
    pub fn build_item(&self, invoice: &Invoice, as_of: NaiveDate) -> AgingItem {
        let total = invoice.total_amount.unwrap_or(0.0);
        let paid = invoice.paid_amount.unwrap_or(0.0);

        AgingItem {
            reference: invoice.invoice_no.clone(),
            customer_label: invoice
                .customer_label
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| crate::UNKNOWN_LABEL.to_string()),
            amount_outstanding: (total - paid).max(0.0),
            age_in_days: (as_of - invoice.date).num_days().max(0),
            credit_period_days: invoice
                .credit_period_days
                .unwrap_or(self.default_credit_period_days),
        }
    }

    /// 构造一批账龄条目 (保持输入顺序)
    pub fn build_items(&self, invoices: &[Invoice], as_of: NaiveDate) -> Vec<AgingItem> {
        invoices
            .iter()
            .map(|inv| self.build_item(inv, as_of))
            .collect()
    }

    /// 分桶合计, 按固定桶序输出 (Current -> Over90)
    ///
    /// 桶集是封闭枚举, 账龄表按固定顺序呈现,
    /// 与通用汇总引擎的首现顺序语义无关
    pub fn bucket_totals(&self, items: &[AgingItem]) -> Vec<AgingBucketTotal> {
        let mut totals: Vec<AgingBucketTotal> = AgeBucket::ALL
            .iter()
            .map(|bucket| AgingBucketTotal {
                bucket: *bucket,
                count: 0,
                amount_outstanding: 0.0,
            })
            .collect();

        for item in items {
            let bucket = self.classify(item.age_in_days);
            let slot = &mut totals[AgeBucket::ALL
                .iter()
                .position(|b| *b == bucket)
                .unwrap_or(0)];
            slot.count += 1;
            slot.amount_outstanding += item.amount_outstanding;
        }

        totals
    }

    /// 逾期合计: (逾期条目数, 逾期未收金额)
    pub fn overdue_totals(&self, items: &[AgingItem]) -> (u64, f64) {
        let mut count = 0;
        let mut amount = 0.0;
        for item in items {
            if item.is_overdue() {
                count += 1;
                amount += item.amount_outstanding;
            }
        }
        (count, amount)
    }
}
