// ==========================================
// 配置加载集成测试
// ==========================================
// 覆盖: JSON 文件加载 / 缺失文件错误 / 配置注入对分类结果的影响
// ==========================================

mod helpers;

use std::io::Write;
use std::sync::Arc;

use collection_ops_report::{ReportApi, ReportConfig, StockHealth};
use collection_ops_report::repository::ReportQuery;

use helpers::{make_date, sample_data_source};

#[test]
fn test_load_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "aging": {{"current_max_days": 15, "mid_max_days": 45, "late_max_days": 75}},
            "stock": {{"warning_factor": 2.0}}
        }}"#
    )
    .unwrap();

    let config = ReportConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.aging.current_max_days, 15);
    assert_eq!(config.aging.mid_max_days, 45);
    assert_eq!(config.aging.late_max_days, 75);
    assert_eq!(config.stock.warning_factor, 2.0);
    // 未提供的部分保持默认
    assert_eq!(config.compliance.warning_window_days, 30);
    assert_eq!(config.receivables.default_credit_period_days, 30);
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-config.json");

    assert!(ReportConfig::load_from_file(&path).is_err());
}

#[tokio::test]
async fn test_stock_warning_factor_injection() {
    // 系数 5.0: MAT-004 (200 vs 最低 50) 从健康落入预警
    let mut config = ReportConfig::default();
    config.stock.warning_factor = 5.0;
    let api = ReportApi::new(Arc::new(sample_data_source()), config);

    let response = api.stock_health().await.unwrap();
    let mat_004 = response
        .items
        .iter()
        .find(|i| i.code == "MAT-004")
        .unwrap();
    assert_eq!(mat_004.status, StockHealth::Warning);
}

#[tokio::test]
async fn test_aging_boundary_injection() {
    // 未逾期上界 5 天: 账龄 7 天的 INV-001 移入中段桶
    let mut config = ReportConfig::default();
    config.aging.current_max_days = 5;
    let api = ReportApi::new(Arc::new(sample_data_source()), config);

    let query = ReportQuery::new(make_date(2024, 1, 1), make_date(2024, 6, 30));
    let response = api
        .receivables_aging(&query, make_date(2024, 6, 1))
        .await
        .unwrap();

    assert_eq!(response.buckets[0].count, 0);
    assert_eq!(response.buckets[1].count, 2); // INV-001 + INV-002
}
