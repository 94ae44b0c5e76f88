//! Admin dashboard and analytics payloads.
//!
//! Plain read models for the two admin reporting endpoints. Money-valued
//! fields go through [`Money`](crate::money::Money) because the backend mixes
//! float and decimal-string renderings across these payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checkout::OrderStatus;
use crate::ids::{OrderId, ProductId};
use crate::money::Money;

/// Chart colors the backend cycles through for category slices.
pub const CHART_PALETTE: [&str; 7] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7c7c", "#00C49F", "#FFBB28", "#FF8042",
];

/// Color for the n-th slice, cycling the palette.
pub fn palette_color(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

/// The admin dashboard's headline numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub total_products: i64,
    pub total_orders: i64,
    /// Revenue across successful orders.
    pub total_revenue: Money,
    /// Preformatted by the backend (e.g. "+12.5%").
    pub growth_rate: String,
    /// Products with stock below 10 units.
    pub low_stock_products: Vec<LowStockProduct>,
    /// Latest 5 orders.
    pub recent_orders: Vec<RecentOrder>,
}

impl DashboardStats {
    pub fn has_low_stock(&self) -> bool {
        !self.low_stock_products.is_empty()
    }
}

/// A product running low, as projected by the dashboard endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LowStockProduct {
    pub id: ProductId,
    pub name: String,
    /// Raw category column value; null for uncategorized products.
    pub category: Option<String>,
    pub quantity: u32,
}

/// A row of the dashboard's recent-orders table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentOrder {
    pub id: OrderId,
    pub sku: Option<String>,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// The admin analytics payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Analytics {
    pub metrics: AnalyticsMetrics,
    /// Successful-order totals bucketed by month, oldest first.
    pub sales_data: Vec<MonthlySales>,
    /// Product counts per category, largest first.
    pub category_data: Vec<CategorySlice>,
    /// Top 5 products by units sold.
    pub top_products: Vec<TopProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsMetrics {
    pub total_revenue: Money,
    pub total_orders: i64,
    pub average_order_value: Money,
    /// Fixed placeholder on the backend today.
    pub conversion_rate: f64,
}

/// One month's sales bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySales {
    /// Three-letter month name ("Jan").
    pub month: String,
    pub sales: Money,
    pub orders: i64,
}

/// One slice of the category pie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySlice {
    /// Title-cased category name, "Uncategorized" when unset.
    pub name: String,
    /// Product count.
    pub value: i64,
    /// Hex color assigned by the backend.
    pub color: String,
}

/// One row of the top-products table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopProduct {
    pub name: String,
    pub sold: i64,
    pub revenue: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_stats_parse() {
        // total_amount arrives as a decimal string on this endpoint
        let json = r#"{
            "total_products": 24,
            "total_orders": 110,
            "total_revenue": 45230.5,
            "growth_rate": "+12.5%",
            "low_stock_products": [
                {"id": 3, "name": "Organic Honey", "category": "dairy", "quantity": 4},
                {"id": 9, "name": "Basmati Rice", "category": null, "quantity": 7}
            ],
            "recent_orders": [
                {
                    "id": 42,
                    "sku": "ORD-1A2B3C",
                    "total_amount": "140.39",
                    "status": "success",
                    "created_at": "2025-08-20T09:15:00+00:00"
                }
            ]
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_products, 24);
        assert_eq!(stats.total_revenue, Money::from_paise(4523050));
        assert!(stats.has_low_stock());
        assert_eq!(stats.low_stock_products[1].category, None);
        assert_eq!(stats.recent_orders[0].total_amount, Money::from_paise(14039));
        assert_eq!(stats.recent_orders[0].status, OrderStatus::Success);
    }

    #[test]
    fn test_analytics_parse() {
        let json = r##"{
            "metrics": {
                "total_revenue": 45230.5,
                "total_orders": 98,
                "average_order_value": 461.54,
                "conversion_rate": 3.2
            },
            "sales_data": [
                {"month": "Jun", "sales": 15200.0, "orders": 31},
                {"month": "Jul", "sales": 30030.5, "orders": 67}
            ],
            "category_data": [
                {"name": "Vegetables", "value": 10, "color": "#8884d8"},
                {"name": "Uncategorized", "value": 2, "color": "#82ca9d"}
            ],
            "top_products": [
                {"name": "Tomatoes", "sold": 120, "revenue": 5400.0}
            ]
        }"##;
        let analytics: Analytics = serde_json::from_str(json).unwrap();
        assert_eq!(analytics.metrics.total_orders, 98);
        assert_eq!(analytics.metrics.average_order_value, Money::from_paise(46154));
        assert_eq!(analytics.sales_data[1].month, "Jul");
        assert_eq!(analytics.category_data[0].color, CHART_PALETTE[0]);
        assert_eq!(analytics.top_products[0].revenue, Money::from_paise(540000));
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), "#8884d8");
        assert_eq!(palette_color(6), "#FF8042");
        assert_eq!(palette_color(7), "#8884d8");
    }
}
