use super::seller::{order_filter, product_filter};
use super::{CliContext, Paging, ProductArgs, RequestArgs, render};
use crate::api::UserStatus;
use crate::core::forms::{ProductForm, RequestForm};
use crate::errors::Result;
use crate::models::{OrderStatus, ProductStatus, Role};
use crate::views::{
    AdminDashboard, FormScreens, OrderTable, ProductTable, RequestTable, SellerFilter,
    SellerTable, report,
};
use clap::Subcommand;
use tracing::debug;

/// Admin area commands. Each one needs a logged-in admin.
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Platform totals and this month's movement
    Dashboard,
    /// Every product on the platform, optionally narrowed
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
    /// One product with its seller
    Product {
        /// Product id
        id: String,
    },
    /// Show or hide a product in the public catalog
    ToggleVisibility {
        /// Product id
        id: String,
    },
    /// Feature or unfeature a product on the home page
    ToggleFeatured {
        /// Product id
        id: String,
    },
    /// Flip a product's verified badge
    VerifyProduct {
        /// Product id
        id: String,
    },
    /// Delete a product for good
    RemoveProduct {
        /// Product id
        id: String,
    },
    /// Replace a product's details
    UpdateProduct {
        /// Product id
        id: String,
        /// New details
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Seller accounts
    Sellers {
        /// Only active or inactive sellers
        #[arg(long, conflicts_with = "search")]
        status: Option<UserStatus>,
        /// Sellers matching a name, email, or company
        #[arg(long)]
        search: Option<String>,
        /// Page selection
        #[command(flatten)]
        paging: Paging,
    },
    /// Activate or deactivate a seller
    ToggleSeller {
        /// Seller id
        id: String,
    },
    /// Flip a seller's verified badge
    VerifySeller {
        /// Seller id
        id: String,
    },
    /// Delete a seller account
    RemoveSeller {
        /// Seller id
        id: String,
    },
    /// Stock requests from buyers
    Requests(Paging),
    /// One request with its note
    Request {
        /// Request id
        id: String,
    },
    /// Publish a request on the inquiry board
    VerifyRequest {
        /// Request id
        id: String,
    },
    /// Sellers a request can be assigned to
    AssignableSellers(Paging),
    /// Hand a request to a seller
    Assign {
        /// Request id
        request_id: String,
        /// Seller id
        seller_id: String,
    },
    /// Replace a request's details
    UpdateRequest {
        /// Request id
        id: String,
        /// New details
        #[command(flatten)]
        request: RequestArgs,
    },
    /// All orders
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
    /// Show the USD to INR rate, or set it
    Rate {
        /// Rupees per dollar
        rate: Option<f64>,
    },
}

fn seller_filter(status: Option<UserStatus>, search: Option<String>) -> SellerFilter {
    match (status, search) {
        (Some(status), _) => SellerFilter::Status(status),
        (None, Some(search)) if !search.trim().is_empty() => SellerFilter::Search(search),
        _ => SellerFilter::All,
    }
}

/// Runs an admin command after checking the logged-in role.
#[allow(clippy::too_many_lines)]
pub async fn run(ctx: &CliContext, command: AdminCommand) -> Result<bool> {
    let admin = ctx.session.require(Role::Admin).await?;
    debug!(admin = %admin.username, ?command, "admin command");
    let api = ctx.session.api_handle();
    let notifier = ctx.notifier.clone();
    let currency = ctx.session.currency().await?;

    match command {
        AdminCommand::Dashboard => {
            let mut dashboard = AdminDashboard::new(ctx.session.clone(), notifier);
            if !dashboard.load().await {
                return Ok(false);
            }
            if let Some(a) = &dashboard.analytics {
                println!(
                    "Users: {} ({} unverified, {} this month)",
                    a.total_users, a.unverified_users, a.this_month_users
                );
                println!(
                    "Products: {} ({} unverified, {} this month)",
                    a.total_products, a.unverified_products, a.this_month_products
                );
                println!(
                    "Requests: {} ({} unverified, {} completed, {} cancelled)",
                    a.total_requests, a.unverified_requests, a.completed_requests, a.cancelled_requests
                );
                println!(
                    "Orders: {} ({} completed, {} cancelled, {} this month)",
                    a.total_orders, a.completed_orders, a.cancelled_orders, a.this_month_orders
                );
            }
            if let Ok(Some((total, month))) = dashboard.revenue_labels() {
                println!("Revenue: {total} ({month} this month)");
            }
            Ok(true)
        }
        AdminCommand::Products {
            status,
            visible,
            search,
            paging,
        } => {
            let filter = product_filter(status, visible, search);
            let mut table = ProductTable::admin_filtered(api, notifier, filter);
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
        AdminCommand::Product { id } => {
            let result = api.admin_product(&id).await;
            let Some(product) = report(notifier.as_ref(), "load product", result) else {
                return Ok(false);
            };
            println!("{}", render::products(&[product], currency, None));
            Ok(true)
        }
        AdminCommand::ToggleVisibility { id } => {
            Ok(ProductTable::admin(api, notifier).toggle_visibility(&id).await)
        }
        AdminCommand::ToggleFeatured { id } => {
            Ok(ProductTable::admin(api, notifier).toggle_featured(&id).await)
        }
        AdminCommand::VerifyProduct { id } => {
            Ok(ProductTable::admin(api, notifier).verify(&id).await)
        }
        AdminCommand::RemoveProduct { id } => {
            Ok(ProductTable::admin(api, notifier).remove(&id).await)
        }
        AdminCommand::UpdateProduct { id, product } => {
            let screens = FormScreens::new(ctx.session.clone(), notifier);
            Ok(screens
                .admin_update_product(&id, &ProductForm::from(product))
                .await)
        }
        AdminCommand::Sellers {
            status,
            search,
            paging,
        } => {
            let mut table = SellerTable::new(api, notifier);
            table.filter = seller_filter(status, search);
            if !table.load(ctx.page(&paging)).await {
                return Ok(false);
            }
            println!("{}", render::paged(&render::users(&table.sellers), &table.pages));
            Ok(true)
        }
        AdminCommand::ToggleSeller { id } => {
            Ok(SellerTable::new(api, notifier).toggle_status(&id).await)
        }
        AdminCommand::VerifySeller { id } => Ok(SellerTable::new(api, notifier).verify(&id).await),
        AdminCommand::RemoveSeller { id } => Ok(SellerTable::new(api, notifier).remove(&id).await),
        AdminCommand::Requests(paging) => {
            let mut table = RequestTable::admin(api, notifier);
            if !table.load(ctx.page(&paging)).await {
                return Ok(false);
            }
            println!("{}", render::paged(&render::requests(&table.requests), &table.pages));
            Ok(true)
        }
        AdminCommand::Request { id } => {
            let result = api.admin_request(&id).await;
            let Some(request) = report(notifier.as_ref(), "load request", result) else {
                return Ok(false);
            };
            println!("{}", render::requests(std::slice::from_ref(&request)));
            if !request.note.is_empty() {
                println!("Note: {}", request.note);
            }
            Ok(true)
        }
        AdminCommand::VerifyRequest { id } => {
            Ok(RequestTable::admin(api, notifier).verify(&id).await)
        }
        AdminCommand::AssignableSellers(paging) => {
            let mut table = RequestTable::admin(api, notifier);
            if !table.load_assignable(ctx.page(&paging)).await {
                return Ok(false);
            }
            println!(
                "{}",
                render::paged(&render::users(&table.assignable), &table.assignable_pages)
            );
            Ok(true)
        }
        AdminCommand::Assign {
            request_id,
            seller_id,
        } => Ok(RequestTable::admin(api, notifier)
            .assign(&request_id, &seller_id)
            .await),
        AdminCommand::UpdateRequest { id, request } => {
            let screens = FormScreens::new(ctx.session.clone(), notifier);
            Ok(screens
                .admin_update_request(&id, &RequestForm::from(request))
                .await)
        }
        AdminCommand::Orders {
            status,
            search,
            desc,
            paging,
        } => {
            let mut table = OrderTable::admin(api, notifier);
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
        AdminCommand::Rate { rate: Some(rate) } => {
            let screens = FormScreens::new(ctx.session.clone(), notifier);
            Ok(screens.update_rate(rate).await)
        }
        AdminCommand::Rate { rate: None } => {
            let result = api.usd_to_inr_rate().await;
            let Some(rate) = report(notifier.as_ref(), "load rate", result) else {
                return Ok(false);
            };
            println!("1 USD = {rate} INR");
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forms::LoginForm;
    use crate::errors::Error;
    use crate::test_utils::{MockTransport, RecordingNotifier, product_json, setup_session, user_json};
    use serde_json::json;
    use std::sync::Arc;

    async fn logged_in_as(
        role: &str,
    ) -> Result<(CliContext, Arc<MockTransport>, Arc<RecordingNotifier>)> {
        let (session, mock) = setup_session().await?;
        mock.push(200, user_json("u1", "Root", role));
        session
            .login(&LoginForm {
                email: "root@example.com".to_string(),
                password: "pw".to_string(),
            })
            .await?;
        let notifier = RecordingNotifier::new();
        Ok((CliContext::new(Arc::new(session), notifier.clone(), 25), mock, notifier))
    }

    #[tokio::test]
    async fn test_seller_cannot_enter_admin_area() -> Result<()> {
        let (ctx, mock, _notifier) = logged_in_as("seller").await?;

        let result = run(&ctx, AdminCommand::Dashboard).await;
        assert!(matches!(result, Err(Error::Forbidden { ref role }) if role == "seller"));
        assert_eq!(mock.requests().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_products_page_reports_pagination() -> Result<()> {
        let (ctx, mock, notifier) = logged_in_as("admin").await?;
        let rows: Vec<_> = (0..25)
            .map(|i| product_json(&format!("p{i}"), "Dye", 10.0))
            .collect();
        mock.push(
            200,
            json!({"productsData": rows, "count": 25, "totalProducts": 30, "page": 1, "limit": 25, "totalPages": 2}),
        );

        let command = AdminCommand::Products {
            status: None,
            visible: None,
            search: None,
            paging: Paging { page: 1, limit: None },
        };
        assert!(run(&ctx, command).await?);
        assert_eq!(mock.requests()[1].path, "admin/products");
        assert_eq!(mock.requests()[1].query_value("limit"), Some("25"));
        assert!(notifier.errors().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_products_search_from_admin_area() -> Result<()> {
        let (ctx, mock, notifier) = logged_in_as("admin").await?;
        mock.push(200, json!({"products": [product_json("p4", "Acid Blue", 12.0)], "totalProducts": 1}));

        let command = AdminCommand::Products {
            status: None,
            visible: None,
            search: Some("acid".to_string()),
            paging: Paging { page: 1, limit: None },
        };
        assert!(run(&ctx, command).await?);
        let request = &mock.requests()[1];
        assert_eq!(request.path, "seller/products/search");
        assert_eq!(request.query_value("search"), Some("acid"));
        assert!(notifier.errors().is_empty());
        Ok(())
    }

    #[test]
    fn test_products_flags_parse() {
        use crate::cli::{Cli, Command};
        use clap::Parser;

        let cli = Cli::try_parse_from(["chemstock", "admin", "products", "--status", "active"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::Admin(AdminCommand::Products { status: Some(ProductStatus::Active), .. })
        ));
        assert!(
            Cli::try_parse_from(["chemstock", "admin", "products", "--status", "active", "--search", "x"])
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_rate_update_goes_through_settings() -> Result<()> {
        let (ctx, mock, notifier) = logged_in_as("admin").await?;
        mock.push(200, json!({}));

        assert!(run(&ctx, AdminCommand::Rate { rate: Some(85.5) }).await?);
        assert_eq!(mock.requests()[1].path, "admin/settings");
        assert_eq!(notifier.successes(), vec!["USD to INR rate updated successfully"]);
        Ok(())
    }

    #[test]
    fn test_seller_filter_from_flags() {
        assert_eq!(
            seller_filter(Some(UserStatus::Inactive), None),
            SellerFilter::Status(UserStatus::Inactive)
        );
        assert_eq!(
            seller_filter(None, Some("acme".to_string())),
            SellerFilter::Search("acme".to_string())
        );
        assert_eq!(seller_filter(None, None), SellerFilter::All);
    }
}
