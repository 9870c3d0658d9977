use serde::Deserialize;

/// Admin dashboard snapshot. Counts, revenue, and month-over-month percentages.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminAnalytics {
    /// Sellers awaiting verification
    pub unverified_users: u64,
    /// Products awaiting verification
    pub unverified_products: u64,
    /// Requests awaiting verification
    pub unverified_requests: u64,
    /// All sellers
    pub total_users: u64,
    /// All products
    pub total_products: u64,
    /// All stock requests
    pub total_requests: u64,
    /// All orders
    pub total_orders: u64,
    /// Orders marked completed
    pub completed_orders: u64,
    /// Requests marked completed
    pub completed_requests: u64,
    /// Orders marked cancelled
    pub cancelled_orders: u64,
    /// Requests marked cancelled
    pub cancelled_requests: u64,
    /// Revenue of completed orders, in INR
    pub total_revenue: f64,
    /// Sellers joined this month
    pub this_month_users: u64,
    /// Products listed this month
    pub this_month_products: u64,
    /// Requests submitted this month
    pub this_month_requests: u64,
    /// Orders placed this month
    pub this_month_orders: u64,
    /// Revenue this month, in INR
    pub this_month_revenue: f64,
    /// Orders completed this month
    pub this_month_completed_orders: u64,
    /// Requests completed this month
    pub this_month_completed_requests: u64,
    /// Orders cancelled this month
    pub this_month_cancelled_orders: u64,
    /// Requests cancelled this month
    pub this_month_cancelled_requests: u64,
    /// Change in new sellers against last month
    pub this_month_users_percentage: f64,
    /// Change in new products against last month
    pub this_month_products_percentage: f64,
    /// Change in new requests against last month
    pub this_month_requests_percentage: f64,
    /// Change in orders against last month
    pub this_month_orders_percentage: f64,
    /// Change in revenue against last month
    pub this_month_revenue_percentage: f64,
    /// Share of orders completed
    pub completed_orders_percentage: f64,
    /// Share of requests completed
    pub completed_requests_percentage: f64,
    /// Share of orders cancelled
    pub cancelled_orders_percentage: f64,
    /// Share of requests cancelled
    pub cancelled_requests_percentage: f64,
}

/// Product side of the seller dashboard.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductsAnalytics {
    /// Units sold
    pub total_sales: u64,
    /// Products listed
    pub total_products: u64,
    /// Revenue from sales, in INR
    pub total_revenue: f64,
    /// Units in stock
    pub total_stock: f64,
    /// Value of the stock, in INR
    pub total_stock_value: f64,
    /// Products listed this month
    pub added_this_month: u64,
    /// Products currently active
    pub active_products: u64,
    /// Products paused by the seller
    pub inactive_products: u64,
}

/// Order side of the seller dashboard.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrdersAnalytics {
    /// Orders placed last month
    pub last_month_orders: u64,
    /// All orders
    pub total_orders: u64,
    /// Revenue of completed orders, in INR
    pub total_revenue: f64,
}

/// Seller dashboard snapshot. Revenue figures are stored in INR.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerAnalytics {
    /// Product totals
    pub products_analytics: ProductsAnalytics,
    /// Order totals
    #[serde(alias = "ordersAnalytics")]
    pub order_analytics: OrdersAnalytics,
    /// Rupees per dollar at the time of the request
    pub usd_to_inr_rate: f64,
}
