use super::{CliContext, Paging, ProductArgs, render};
use crate::api::{OrderFilter, SellerProductFilter};
use crate::core::forms::ProductForm;
use crate::errors::Result;
use crate::models::{OrderStatus, ProductStatus, RequestStatus, Role, SortOrder};
use crate::views::{FormScreens, OrderTable, ProductTable, RequestTable, SellerDashboard, report};
use clap::Subcommand;
use tracing::debug;

/// Seller area commands. Each one needs a logged-in seller.
#[derive(Debug, Subcommand)]
pub enum SellerCommand {
    /// Sales, stock, and verification overview
    Dashboard,
    /// Own products, optionally filtered
    Products {
        /// Only active or inactive products
        #[arg(long, conflicts_with_all = ["visible", "search"])]
        status: Option<ProductStatus>,
        /// Only shown (`true`) or hidden (`false`) products
        #[arg(long, conflicts_with = "search")]
        visible: Option<bool>,
        /// Products matching a name
        #[arg(long)]
        search: Option<String>,
        /// Page selection
        #[command(flatten)]
        paging: Paging,
    },
    /// Show one of your products
    Product {
        /// Product id
        id: String,
    },
    /// List a new product
    Add(ProductArgs),
    /// Replace a product's details
    Update {
        /// Product id
        id: String,
        /// New details
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Delete one of your products
    Remove {
        /// Product id
        id: String,
    },
    /// Switch a product between active and inactive
    ToggleStatus {
        /// Product id
        id: String,
    },
    /// Orders received
    Orders {
        /// Only orders with this status
        #[arg(long, conflicts_with = "search")]
        status: Option<OrderStatus>,
        /// Orders matching a buyer or product name
        #[arg(long)]
        search: Option<String>,
        /// Newest first
        #[arg(long)]
        desc: bool,
        #[command(flatten)]
        paging: Paging,
    },
    /// Mark an order completed or cancelled
    OrderStatus {
        /// Order id
        id: String,
        /// New status
        status: OrderStatus,
    },
    /// Requests assigned to you
    Requests(Paging),
    /// Mark an assigned request completed or cancelled
    RequestStatus {
        /// Request id
        id: String,
        /// New status
        status: RequestStatus,
    },
}

pub(super) fn order_filter(status: Option<OrderStatus>, search: Option<String>, desc: bool) -> OrderFilter {
    match (status, search) {
        (Some(status), _) => OrderFilter::Status(status),
        (None, Some(search)) if !search.trim().is_empty() => OrderFilter::Search(search),
        _ => OrderFilter::All(if desc { SortOrder::Desc } else { SortOrder::Asc }),
    }
}

pub(super) fn product_filter(
    status: Option<ProductStatus>,
    visible: Option<bool>,
    search: Option<String>,
) -> SellerProductFilter {
    match (status, visible, search) {
        (Some(status), _, _) => SellerProductFilter::Status(status),
        (None, Some(visible), _) => SellerProductFilter::Visibility(visible),
        (None, None, Some(search)) if !search.trim().is_empty() => {
            SellerProductFilter::Search(search)
        }
        _ => SellerProductFilter::All,
    }
}

/// Runs a seller command after checking the logged-in role.
pub async fn run(ctx: &CliContext, command: SellerCommand) -> Result<bool> {
    let seller = ctx.session.require(Role::Seller).await?;
    debug!(seller = %seller.username, ?command, "seller command");
    let api = ctx.session.api_handle();
    let notifier = ctx.notifier.clone();
    let currency = ctx.session.currency().await?;

    match command {
        SellerCommand::Dashboard => {
            let mut dashboard = SellerDashboard::new(ctx.session.clone(), notifier);
            if !dashboard.load().await {
                return Ok(false);
            }
            println!(
                "Verified: {}",
                if dashboard.is_verified { "yes" } else { "pending" }
            );
            println!("Assigned requests: {}", dashboard.requests_count);
            if let Some(analytics) = &dashboard.analytics {
                let products = &analytics.products_analytics;
                let orders = &analytics.order_analytics;
                println!(
                    "Products: {} ({} active, {} inactive, {} added this month)",
                    products.total_products,
                    products.active_products,
                    products.inactive_products,
                    products.added_this_month
                );
                println!(
                    "Orders: {} ({} last month), units sold: {}",
                    orders.total_orders, orders.last_month_orders, products.total_sales
                );
            }
            if let Ok(Some((revenue, stock_value))) = dashboard.value_labels() {
                println!("Revenue: {revenue}");
                println!("Stock value: {stock_value}");
            }
            Ok(true)
        }
        SellerCommand::Products {
            status,
            visible,
            search,
            paging,
        } => {
            let filter = product_filter(status, visible, search);
            let mut table = ProductTable::seller_filtered(api, notifier, filter);
            if !table.load(ctx.page(&paging)).await {
                return Ok(false);
            }
            let rate = table.usd_to_inr_rate;
            println!(
                "{}",
                render::paged(&render::products(&table.products, currency, rate), &table.pages)
            );
            Ok(true)
        }
        SellerCommand::Product { id } => {
            let result = api.seller_product(&id).await;
            let Some(product) = report(notifier.as_ref(), "load product", result) else {
                return Ok(false);
            };
            println!("{}", render::products(&[product], currency, None));
            Ok(true)
        }
        SellerCommand::Add(product) => {
            let screens = FormScreens::new(ctx.session.clone(), notifier);
            Ok(screens.add_product(&ProductForm::from(product)).await)
        }
        SellerCommand::Update { id, product } => {
            let screens = FormScreens::new(ctx.session.clone(), notifier);
            Ok(screens.update_product(&id, &ProductForm::from(product)).await)
        }
        SellerCommand::Remove { id } => Ok(ProductTable::seller(api, notifier).remove(&id).await),
        SellerCommand::ToggleStatus { id } => {
            let result = api.seller_product(&id).await;
            let Some(product) = report(notifier.as_ref(), "load product", result) else {
                return Ok(false);
            };
            let mut table = ProductTable::seller(api, notifier);
            table.products.push(product);
            Ok(table.toggle_status(&id).await)
        }
        SellerCommand::Orders {
            status,
            search,
            desc,
            paging,
        } => {
            let mut table = OrderTable::seller(api, notifier);
            table.filter = order_filter(status, search, desc);
            if !table.load(ctx.page(&paging)).await {
                return Ok(false);
            }
            let rate = table.usd_to_inr_rate;
            println!(
                "{}",
                render::paged(&render::orders(&table.orders, currency, rate), &table.pages)
            );
            Ok(true)
        }
        SellerCommand::OrderStatus { id, status } => {
            Ok(OrderTable::seller(api, notifier).set_status(&id, status).await)
        }
        SellerCommand::Requests(paging) => {
            let mut table = RequestTable::seller(api, notifier);
            if !table.load(ctx.page(&paging)).await {
                return Ok(false);
            }
            println!("{}", render::paged(&render::requests(&table.requests), &table.pages));
            Ok(true)
        }
        SellerCommand::RequestStatus { id, status } => {
            Ok(RequestTable::seller(api, notifier).set_status(&id, status).await)
        }
    }
}
