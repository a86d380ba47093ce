// ==========================================
// 清运运营报表分析引擎 - 内存数据源
// ==========================================
// 职责: ReportDataSource 的内存实现
// 用途: 集成测试 / 演示; 同时示范查询层应当承担的
//       日期范围与维度过滤语义 (到达核心前完成)
// ==========================================

use crate::domain::{CollectionTrip, FuelEntry, Invoice, StockRow, VehicleDocument};
use crate::repository::{
    DimensionFilter, ReportDataSource, ReportQuery, RepositoryResult,
};
use async_trait::async_trait;

// ==========================================
// InMemoryDataSource - 内存数据源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    trips: Vec<CollectionTrip>,
    fuel_entries: Vec<FuelEntry>,
    invoices: Vec<Invoice>,
    stock_rows: Vec<StockRow>,
    vehicle_documents: Vec<VehicleDocument>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trips(mut self, trips: Vec<CollectionTrip>) -> Self {
        self.trips = trips;
        self
    }

    pub fn with_fuel_entries(mut self, entries: Vec<FuelEntry>) -> Self {
        self.fuel_entries = entries;
        self
    }

    pub fn with_invoices(mut self, invoices: Vec<Invoice>) -> Self {
        self.invoices = invoices;
        self
    }

    pub fn with_stock_rows(mut self, rows: Vec<StockRow>) -> Self {
        self.stock_rows = rows;
        self
    }

    pub fn with_vehicle_documents(mut self, documents: Vec<VehicleDocument>) -> Self {
        self.vehicle_documents = documents;
        self
    }
}

/// 维度过滤: 标签精确匹配 (None 标签视为不匹配)
fn label_matches(filter: &DimensionFilter, label: &Option<String>) -> bool {
    label.as_deref() == Some(filter.label.as_str())
}

#[async_trait]
impl ReportDataSource for InMemoryDataSource {
    async fn fetch_collection_trips(
        &self,
        query: &ReportQuery,
    ) -> RepositoryResult<Vec<CollectionTrip>> {
        Ok(self
            .trips
            .iter()
            .filter(|t| query.contains(t.date))
            .filter(|t| match &query.filter {
                None => true,
                Some(f) => match f.dimension.as_str() {
                    "route" => label_matches(f, &t.route_label),
                    "vehicle" => label_matches(f, &t.vehicle_label),
                    "driver" => label_matches(f, &t.driver_label),
                    "helper" => label_matches(f, &t.helper_label),
                    _ => true,
                },
            })
            .cloned()
            .collect())
    }

    async fn fetch_fuel_entries(&self, query: &ReportQuery) -> RepositoryResult<Vec<FuelEntry>> {
        Ok(self
            .fuel_entries
            .iter()
            .filter(|e| query.contains(e.date))
            .filter(|e| match &query.filter {
                None => true,
                Some(f) => match f.dimension.as_str() {
                    "vehicle" => label_matches(f, &e.vehicle_label),
                    _ => true,
                },
            })
            .cloned()
            .collect())
    }

    async fn fetch_invoices(&self, query: &ReportQuery) -> RepositoryResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .iter()
            .filter(|i| query.contains(i.date))
            .filter(|i| match &query.filter {
                None => true,
                Some(f) => match f.dimension.as_str() {
                    "customer" => label_matches(f, &i.customer_label),
                    _ => true,
                },
            })
            .cloned()
            .collect())
    }

    async fn fetch_stock_rows(&self) -> RepositoryResult<Vec<StockRow>> {
        Ok(self.stock_rows.clone())
    }

    async fn fetch_vehicle_documents(&self) -> RepositoryResult<Vec<VehicleDocument>> {
        Ok(self.vehicle_documents.clone())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_trip(date: NaiveDate, route: Option<&str>) -> CollectionTrip {
        CollectionTrip {
            date,
            route_label: route.map(|s| s.to_string()),
            vehicle_label: None,
            driver_label: None,
            helper_label: None,
            total_weight: Some(10.0),
            total_bags: Some(1.0),
            start_km: None,
            end_km: None,
            status: Some("completed".to_string()),
        }
    }

    #[tokio::test]
    async fn test_date_range_inclusive() {
        let source = InMemoryDataSource::new().with_trips(vec![
            make_trip(make_date(2024, 2, 29), Some("R1")),
            make_trip(make_date(2024, 3, 1), Some("R1")),
            make_trip(make_date(2024, 3, 31), Some("R1")),
            make_trip(make_date(2024, 4, 1), Some("R1")),
        ]);

        let query = ReportQuery::new(make_date(2024, 3, 1), make_date(2024, 3, 31));
        let trips = source.fetch_collection_trips(&query).await.unwrap();

        assert_eq!(trips.len(), 2);
    }

    #[tokio::test]
    async fn test_dimension_filter() {
        let source = InMemoryDataSource::new().with_trips(vec![
            make_trip(make_date(2024, 3, 1), Some("R1")),
            make_trip(make_date(2024, 3, 1), Some("R2")),
            make_trip(make_date(2024, 3, 1), None), // 未指派线路, 过滤时不匹配
        ]);

        let query = ReportQuery::new(make_date(2024, 3, 1), make_date(2024, 3, 31))
            .with_filter("route", "R1");
        let trips = source.fetch_collection_trips(&query).await.unwrap();

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].route_label.as_deref(), Some("R1"));
    }
}
