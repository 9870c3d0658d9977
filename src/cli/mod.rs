//! Command-line surface: one subcommand per marketplace page.
//!
//! Commands are thin: they parse arguments into forms and queries, drive a view
//! controller or the API client, and print plain text tables. Outcomes of user
//! actions are reported through the [`Notifier`]; handlers return whether the
//! action succeeded so the binary can set its exit status.

/// Login, registration, and local preferences
mod account;
/// Admin area
mod admin;
/// Public catalog, checkout, ratings, contact, and the inquiry board
mod public;
/// Plain text tables
pub mod render;
/// Seller area
mod seller;

use crate::core::forms::{ImageInput, ProductForm, RequestForm};
use crate::errors::Result;
use crate::models::{ContactMethod, Currency, PageRequest, StockUnit};
use crate::notify::Notifier;
use crate::store::Session;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

pub use admin::AdminCommand;
pub use public::InquiryCommand;
pub use seller::SellerCommand;

/// ChemStock marketplace client.
#[derive(Debug, Parser)]
#[command(name = "chemstock", version, about)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in as a seller or admin
    Login {
        /// Login email
        #[arg(long)]
        email: String,
        /// Login password
        #[arg(long)]
        password: String,
    },
    /// Register a seller account
    Register(account::RegisterArgs),
    /// End the current session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Show or set the display currency; without a value it toggles
    Currency {
        /// `usd` or `inr`
        currency: Option<Currency>,
    },
    /// Search and filter the public catalog
    Products(public::CatalogArgs),
    /// Show one product with its ratings
    Product {
        /// Product id
        id: String,
    },
    /// Featured products
    Featured(Paging),
    /// Sellers ranked by sales
    TopSellers(Paging),
    /// A seller's other products next to one of theirs
    SellerProducts {
        /// Seller id
        seller_id: String,
        /// Product to show the seller next to
        product_id: String,
        /// Page selection
        #[command(flatten)]
        paging: Paging,
    },
    /// More products from a seller
    MoreProducts {
        /// Seller id
        seller_id: String,
        /// Page selection
        #[command(flatten)]
        paging: Paging,
    },
    /// Order a product and get the link to message the seller
    Buy(public::BuyArgs),
    /// Review a product
    Rate(public::RateArgs),
    /// Build a link to message support
    Contact(public::ContactArgs),
    /// Public stock request board
    #[command(subcommand)]
    Inquiry(InquiryCommand),
    /// Seller area
    #[command(subcommand)]
    Seller(SellerCommand),
    /// Admin area
    #[command(subcommand)]
    Admin(AdminCommand),
}

/// Page selection shared by list commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct Paging {
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page; defaults to the configured page limit
    #[arg(long)]
    pub limit: Option<u32>,
}

impl Paging {
    /// Page request, with `default_limit` when no limit was given.
    #[must_use]
    pub fn request(&self, default_limit: u32) -> PageRequest {
        PageRequest::new(self.page, self.limit.unwrap_or(default_limit))
    }
}

/// Product form fields.
#[derive(Debug, Clone, Args)]
pub struct ProductArgs {
    /// Product name
    #[arg(long)]
    pub name: String,
    /// Free text description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Unit price
    #[arg(long)]
    pub price: f64,
    /// Currency of the price
    #[arg(long, default_value_t = Currency::Inr)]
    pub currency: Currency,
    /// Shade
    #[arg(long, default_value = "")]
    pub tone: String,
    /// Colour Index number
    #[arg(long, default_value = "")]
    pub ci: String,
    /// Quantity in stock
    #[arg(long, default_value_t = 0.0)]
    pub stock: f64,
    /// Unit of the stock quantity
    #[arg(long, default_value_t = StockUnit::Kg)]
    pub stock_unit: StockUnit,
    /// Image URL or local file to upload
    #[arg(long)]
    pub image: Option<String>,
}

impl From<ProductArgs> for ProductForm {
    fn from(args: ProductArgs) -> Self {
        Self {
            image: ImageInput::parse(args.image.as_deref()),
            name: args.name,
            description: args.description,
            price: args.price,
            currency: args.currency,
            tone: args.tone,
            ci: args.ci,
            stock: args.stock,
            stock_unit: args.stock_unit,
        }
    }
}

/// Stock request form fields.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// Product wanted
    #[arg(long)]
    pub name: String,
    /// Quantity wanted
    #[arg(long)]
    pub quantity: f64,
    /// Unit of the quantity
    #[arg(long, default_value_t = StockUnit::Kg)]
    pub stock_unit: StockUnit,
    /// Colour Index number
    #[arg(long)]
    pub ci: Option<String>,
    /// Shade
    #[arg(long)]
    pub tone: Option<String>,
    /// Phone number or email to be reached on
    #[arg(long)]
    pub contact: String,
    #[arg(long, default_value_t = ContactMethod::Whatsapp)]
    pub method: ContactMethod,
    #[arg(long)]
    pub description: Option<String>,
    /// Image URL or local file to upload
    #[arg(long)]
    pub image: Option<String>,
}

impl From<RequestArgs> for RequestForm {
    fn from(args: RequestArgs) -> Self {
        Self {
            image: ImageInput::parse(args.image.as_deref()),
            name: args.name,
            quantity: args.quantity,
            stock_unit: args.stock_unit,
            ci: args.ci,
            tone: args.tone,
            contact: args.contact,
            contact_method: args.method,
            description: args.description,
        }
    }
}

/// What every command handler gets.
pub struct CliContext {
    /// Persisted session and its API client
    pub session: Arc<Session>,
    /// Where notifications go
    pub notifier: Arc<dyn Notifier>,
    /// Default rows per page
    pub page_limit: u32,
}

impl CliContext {
    /// Bundles the session and notifier for the handlers.
    #[must_use]
    pub fn new(session: Arc<Session>, notifier: Arc<dyn Notifier>, page_limit: u32) -> Self {
        Self {
            session,
            notifier,
            page_limit,
        }
    }

    pub(crate) fn page(&self, paging: &Paging) -> PageRequest {
        paging.request(self.page_limit)
    }
}

/// Runs one command. Returns `false` when the action failed and was reported.
///
/// # Errors
/// Failures outside a user action, such as the access gate refusing an area
/// or the session store being unreadable.
pub async fn run(command: Command, ctx: &CliContext) -> Result<bool> {
    match command {
        Command::Login { email, password } => account::login(ctx, email, password).await,
        Command::Register(args) => account::register(ctx, args).await,
        Command::Logout => account::logout(ctx).await,
        Command::Whoami => account::whoami(ctx).await,
        Command::Currency { currency } => account::currency(ctx, currency).await,
        Command::Products(args) => public::catalog(ctx, args).await,
        Command::Product { id } => public::product(ctx, &id).await,
        Command::Featured(paging) => public::featured(ctx, &paging).await,
        Command::TopSellers(paging) => public::top_sellers(ctx, &paging).await,
        Command::SellerProducts {
            seller_id,
            product_id,
            paging,
        } => public::showcase(ctx, &seller_id, &product_id, &paging).await,
        Command::MoreProducts { seller_id, paging } => {
            public::more_products(ctx, &seller_id, &paging).await
        }
        Command::Buy(args) => public::buy(ctx, args).await,
        Command::Rate(args) => public::rate(ctx, args).await,
        Command::Contact(args) => Ok(public::contact(ctx, args)),
        Command::Inquiry(command) => public::inquiry(ctx, command).await,
        Command::Seller(command) => seller::run(ctx, command).await,
        Command::Admin(command) => admin::run(ctx, command).await,
    }
}
