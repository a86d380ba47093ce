// ==========================================
// 清运运营报表分析引擎 - 证件有效期分类器
// ==========================================
// 职责: 到期日 vs 截至日期 -> 合规状态
// 红线: 全函数; "今天" 一律显式传参, 引擎不读系统时钟;
//       预警窗口两端均含 (today <= expiry <= today + N)
// ==========================================

use crate::config::{ComplianceConfig, ReportConfig};
use crate::domain::source::VehicleDocument;
use crate::domain::types::ExpiryStatus;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// VehicleComplianceRow - 单车证件状态行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleComplianceRow {
    /// 车牌号
    pub registration: String,

    /// 保险到期日
    pub insurance_expiry: Option<NaiveDate>,

    /// 保险状态
    pub insurance_status: ExpiryStatus,

    /// 年检到期日
    pub fitness_expiry: Option<NaiveDate>,

    /// 年检状态
    pub fitness_status: ExpiryStatus,
}

// ==========================================
// ComplianceStatusTotal - 单状态合计
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceStatusTotal {
    /// 合规状态
    pub status: ExpiryStatus,

    /// 状态命中的证件数 (保险与年检分别计数)
    pub count: u64,
}

// ==========================================
// ComplianceClassifier - 证件有效期分类器
// ==========================================
pub struct ComplianceClassifier {
    /// 预警窗口天数 (默认 30, 业务可调)
    warning_window_days: i64,
}

impl ComplianceClassifier {
    pub fn new(config: ComplianceConfig) -> Self {
        Self {
            warning_window_days: config.warning_window_days,
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.compliance.clone())
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 到期日 -> 合规状态
    ///
    /// - 未登记            => NoDate
    /// - expiry < today    => Expired
    /// - 窗口内 (两端含)   => ExpiringSoon
    /// - 其余              => Valid
    pub fn classify(&self, expiry: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
        let expiry = match expiry {
            Some(d) => d,
            None => return ExpiryStatus::NoDate,
        };

        if expiry < today {
            ExpiryStatus::Expired
        } else if expiry <= today + Duration::days(self.warning_window_days) {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Valid
        }
    }

    /// 为一批车辆证件生成状态行 (保持输入顺序)
    pub fn classify_documents(
        &self,
        documents: &[VehicleDocument],
        today: NaiveDate,
    ) -> Vec<VehicleComplianceRow> {
        documents
            .iter()
            .map(|doc| VehicleComplianceRow {
                registration: doc.registration.clone(),
                insurance_expiry: doc.insurance_expiry,
                insurance_status: self.classify(doc.insurance_expiry, today),
                fitness_expiry: doc.fitness_expiry,
                fitness_status: self.classify(doc.fitness_expiry, today),
            })
            .collect()
    }

    /// 按固定状态顺序合计证件数 (保险与年检各计一件)
    pub fn status_totals(&self, rows: &[VehicleComplianceRow]) -> Vec<ComplianceStatusTotal> {
        ExpiryStatus::ALL
            .iter()
            .map(|status| {
                let count = rows
                    .iter()
                    .map(|r| {
                        (r.insurance_status == *status) as u64
                            + (r.fitness_status == *status) as u64
                    })
                    .sum();
                ComplianceStatusTotal {
                    status: *status,
                    count,
                }
            })
            .collect()
    }
}

impl Default for ComplianceClassifier {
    fn default() -> Self {
        Self::new(ComplianceConfig::default())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_scenarios() {
        let classifier = ComplianceClassifier::default();
        let today = make_date(2024, 1, 1);

        assert_eq!(classifier.classify(None, today), ExpiryStatus::NoDate);
        assert_eq!(
            classifier.classify(Some(make_date(2023, 12, 31)), today),
            ExpiryStatus::Expired
        );
        assert_eq!(
            classifier.classify(Some(make_date(2024, 1, 15)), today),
            ExpiryStatus::ExpiringSoon
        );
        assert_eq!(
            classifier.classify(Some(make_date(2024, 3, 1)), today),
            ExpiryStatus::Valid
        );
    }

    #[test]
    fn test_window_boundaries_inclusive() {
        let classifier = ComplianceClassifier::default();
        let today = make_date(2024, 1, 1);

        // 当天到期: 在窗口内
        assert_eq!(
            classifier.classify(Some(today), today),
            ExpiryStatus::ExpiringSoon
        );
        // 窗口末日 (today + 30): 仍在窗口内
        assert_eq!(
            classifier.classify(Some(make_date(2024, 1, 31)), today),
            ExpiryStatus::ExpiringSoon
        );
        // 窗口外第一天
        assert_eq!(
            classifier.classify(Some(make_date(2024, 2, 1)), today),
            ExpiryStatus::Valid
        );
    }

    #[test]
    fn test_configured_window() {
        let classifier = ComplianceClassifier::new(ComplianceConfig {
            warning_window_days: 7,
        });
        let today = make_date(2024, 1, 1);

        assert_eq!(
            classifier.classify(Some(make_date(2024, 1, 8)), today),
            ExpiryStatus::ExpiringSoon
        );
        assert_eq!(
            classifier.classify(Some(make_date(2024, 1, 9)), today),
            ExpiryStatus::Valid
        );
    }

    #[test]
    fn test_classify_documents_and_totals() {
        let classifier = ComplianceClassifier::default();
        let today = make_date(2024, 1, 1);

        let documents = vec![
            VehicleDocument {
                registration: "KA-01-1234".to_string(),
                insurance_expiry: Some(make_date(2023, 12, 1)), // 已过期
                fitness_expiry: Some(make_date(2024, 1, 10)),   // 即将过期
            },
            VehicleDocument {
                registration: "KA-02-5678".to_string(),
                insurance_expiry: None,                        // 未登记
                fitness_expiry: Some(make_date(2024, 6, 1)),   // 有效
            },
        ];

        let rows = classifier.classify_documents(&documents, today);
        assert_eq!(rows[0].insurance_status, ExpiryStatus::Expired);
        assert_eq!(rows[0].fitness_status, ExpiryStatus::ExpiringSoon);
        assert_eq!(rows[1].insurance_status, ExpiryStatus::NoDate);
        assert_eq!(rows[1].fitness_status, ExpiryStatus::Valid);

        let totals = classifier.status_totals(&rows);
        assert_eq!(totals[0].status, ExpiryStatus::NoDate);
        assert_eq!(totals[0].count, 1);
        assert_eq!(totals[1].count, 1); // Expired
        assert_eq!(totals[2].count, 1); // ExpiringSoon
        assert_eq!(totals[3].count, 1); // Valid
    }
}
