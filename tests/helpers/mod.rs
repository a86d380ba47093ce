// ==========================================
// 集成测试辅助 - 测试数据构造
// ==========================================
// 职责: 为各报表集成测试提供统一的快照数据
// 说明: 各测试二进制分别编译本模块, 允许部分构造函数未被用到
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use collection_ops_report::repository::InMemoryDataSource;
use collection_ops_report::{CollectionTrip, FuelEntry, Invoice, StockRow, VehicleDocument};

pub fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(clippy::too_many_arguments)]
pub fn make_trip(
    date: NaiveDate,
    route: Option<&str>,
    vehicle: Option<&str>,
    driver: Option<&str>,
    weight: f64,
    bags: f64,
    start_km: Option<f64>,
    end_km: Option<f64>,
) -> CollectionTrip {
    CollectionTrip {
        date,
        route_label: route.map(|s| s.to_string()),
        vehicle_label: vehicle.map(|s| s.to_string()),
        driver_label: driver.map(|s| s.to_string()),
        helper_label: None,
        total_weight: Some(weight),
        total_bags: Some(bags),
        start_km,
        end_km,
        status: Some("completed".to_string()),
    }
}

pub fn make_fuel_entry(
    date: NaiveDate,
    vehicle: &str,
    liters: f64,
    price: Option<f64>,
    total: Option<f64>,
) -> FuelEntry {
    FuelEntry {
        date,
        vehicle_label: Some(vehicle.to_string()),
        liters: Some(liters),
        price_per_liter: price,
        total_amount: total,
    }
}

pub fn make_invoice(
    no: &str,
    date: NaiveDate,
    customer: Option<&str>,
    total: f64,
    paid: f64,
) -> Invoice {
    Invoice {
        invoice_no: no.to_string(),
        date,
        customer_label: customer.map(|s| s.to_string()),
        subtotal: Some(total),
        total_amount: Some(total),
        paid_amount: Some(paid),
        credit_period_days: None,
    }
}

pub fn make_stock_row(code: &str, name: &str, current: f64, minimum: f64, rate: f64) -> StockRow {
    StockRow {
        code: code.to_string(),
        name: name.to_string(),
        current_quantity: current,
        minimum_quantity: minimum,
        rate: Some(rate),
    }
}

/// 标准清运行程快照 (2024年3月, 外加一条范围外行程)
pub fn sample_trips() -> Vec<CollectionTrip> {
    vec![
        make_trip(
            make_date(2024, 3, 1),
            Some("R1"),
            Some("V1"),
            Some("Asha"),
            100.0,
            10.0,
            Some(1000.0),
            Some(1040.0),
        ),
        make_trip(
            make_date(2024, 3, 2),
            Some("R2"),
            Some("V2"),
            Some("Binu"),
            50.5,
            5.0,
            Some(500.0),
            Some(520.0),
        ),
        make_trip(
            make_date(2024, 3, 3),
            Some("R1"),
            Some("V1"),
            Some("Asha"),
            99.5,
            9.0,
            Some(1040.0),
            Some(1080.0),
        ),
        // 未指派线路/司机, 里程缺失
        make_trip(make_date(2024, 3, 4), None, Some("V1"), None, 25.0, 2.0, None, None),
        // 范围外 (4月), 查询层应过滤
        make_trip(
            make_date(2024, 4, 15),
            Some("R1"),
            Some("V1"),
            Some("Asha"),
            999.0,
            99.0,
            None,
            None,
        ),
    ]
}

/// 标准加油快照 (V3 无任何行程里程)
pub fn sample_fuel_entries() -> Vec<FuelEntry> {
    vec![
        make_fuel_entry(make_date(2024, 3, 5), "V1", 40.0, None, Some(100.0)),
        // 总金额缺失, 回退 升数 x 单价
        make_fuel_entry(make_date(2024, 3, 6), "V2", 20.0, Some(2.5), None),
        make_fuel_entry(make_date(2024, 3, 7), "V3", 10.0, None, Some(30.0)),
    ]
}

/// 标准发票快照 (as_of = 2024-06-01 时覆盖四个账龄桶)
pub fn sample_invoices() -> Vec<Invoice> {
    vec![
        make_invoice("INV-001", make_date(2024, 5, 25), Some("Acme"), 200.0, 0.0), // 7天
        make_invoice("INV-002", make_date(2024, 4, 20), Some("Beta"), 300.0, 100.0), // 42天
        make_invoice("INV-003", make_date(2024, 3, 10), Some("Acme"), 150.0, 150.0), // 83天, 已结清
        make_invoice("INV-004", make_date(2024, 1, 1), None, 500.0, 100.0),        // 152天
    ]
}

/// 标准库存快照
pub fn sample_stock_rows() -> Vec<StockRow> {
    vec![
        make_stock_row("MAT-001", "Garbage Bags", 0.0, 50.0, 2.0),
        make_stock_row("MAT-002", "Gloves", 40.0, 50.0, 1.5),
        make_stock_row("MAT-003", "Brooms", 70.0, 50.0, 4.0),
        make_stock_row("MAT-004", "Fuel Cans", 200.0, 50.0, 10.0),
    ]
}

/// 标准车辆证件快照
pub fn sample_vehicle_documents() -> Vec<VehicleDocument> {
    vec![
        VehicleDocument {
            registration: "KA-01-1234".to_string(),
            insurance_expiry: Some(make_date(2023, 12, 1)),
            fitness_expiry: Some(make_date(2024, 1, 10)),
        },
        VehicleDocument {
            registration: "KA-02-5678".to_string(),
            insurance_expiry: None,
            fitness_expiry: Some(make_date(2024, 6, 1)),
        },
    ]
}

/// 全量标准快照的内存数据源
pub fn sample_data_source() -> InMemoryDataSource {
    InMemoryDataSource::new()
        .with_trips(sample_trips())
        .with_fuel_entries(sample_fuel_entries())
        .with_invoices(sample_invoices())
        .with_stock_rows(sample_stock_rows())
        .with_vehicle_documents(sample_vehicle_documents())
}
