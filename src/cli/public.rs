use super::{CliContext, Paging, RequestArgs, render};
use crate::core::catalog_query::{CatalogQuery, Range, SortKey};
use crate::core::currency::plain_number;
use crate::core::forms::{BuyForm, ContactForm, RatingForm};
use crate::core::listing::PageState;
use crate::errors::Result;
use crate::models::{ContactMethod, SortOrder};
use crate::views::{BoardQuery, FormScreens, InquiryBoard, ProductDetailView, report};
use clap::{Args, Subcommand};

/// Catalog search, filter, and sort options.
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Free text search
    #[arg(long, default_value = "")]
    pub search: String,
    /// Only products of these companies; repeatable
    #[arg(long = "company")]
    pub companies: Vec<String>,
    /// Price range as `min-max`
    #[arg(long, value_parser = parse_range)]
    pub price: Option<Range>,
    /// Stock range as `min-max`
    #[arg(long, value_parser = parse_range)]
    pub stock: Option<Range>,
    /// Sort key
    #[arg(long, default_value_t = SortKey::Relevant)]
    pub sort: SortKey,
    /// Sort direction
    #[arg(long, default_value_t = SortOrder::Asc)]
    pub order: SortOrder,
    /// Page selection
    #[command(flatten)]
    pub paging: Paging,
}

fn parse_range(value: &str) -> std::result::Result<Range, String> {
    let (min, max) = value
        .split_once('-')
        .ok_or_else(|| format!("expected min-max, got '{value}'"))?;
    let bound = |text: &str| {
        text.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid bound '{text}': {e}"))
    };
    let (min, max) = (bound(min)?, bound(max)?);
    if min > max {
        return Err(format!("minimum {min} is above maximum {max}"));
    }
    Ok(Range::new(min, max))
}

impl CatalogArgs {
    fn query(&self, default_limit: u32) -> CatalogQuery {
        CatalogQuery {
            search: self.search.clone(),
            companies: self.companies.clone(),
            price: self.price,
            stock: self.stock,
            sort: self.sort,
            order: self.order,
            page: self.paging.request(default_limit),
        }
    }
}

/// Order form.
#[derive(Debug, Clone, Args)]
pub struct BuyArgs {
    /// Product to order
    pub product_id: String,
    /// Your name
    #[arg(long)]
    pub name: String,
    /// Phone number or email
    #[arg(long)]
    pub contact: String,
    #[arg(long, default_value = "+91")]
    pub country_code: String,
    /// How the seller can reach you
    #[arg(long, default_value_t = ContactMethod::Whatsapp)]
    pub method: ContactMethod,
    /// How to reach the seller once the order is placed
    #[arg(long, default_value_t = ContactMethod::Whatsapp)]
    pub reach_via: ContactMethod,
    #[arg(long, default_value_t = 1.0)]
    pub quantity: f64,
    /// Anything the seller should know
    #[arg(long, default_value = "")]
    pub note: String,
}

/// Rating form.
#[derive(Debug, Clone, Args)]
pub struct RateArgs {
    /// Product to review
    pub product_id: String,
    /// Stars, 1 to 5
    #[arg(long)]
    pub rating: u8,
    /// Review text
    #[arg(long)]
    pub comment: String,
    /// Your name
    #[arg(long)]
    pub name: String,
    /// Your email
    #[arg(long)]
    pub email: String,
}

/// Support message form.
#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    /// Your name
    #[arg(long)]
    pub name: String,
    /// Your email
    #[arg(long)]
    pub email: String,
    /// Subject line
    #[arg(long)]
    pub subject: String,
    /// Message text
    #[arg(long)]
    pub message: String,
    /// How to reach support
    #[arg(long, default_value_t = ContactMethod::Whatsapp)]
    pub method: ContactMethod,
}

/// Public stock request board.
#[derive(Debug, Subcommand)]
pub enum InquiryCommand {
    /// Latest verified requests
    List {
        /// Oldest first instead of newest first
        #[arg(long)]
        oldest: bool,
        #[command(flatten)]
        paging: Paging,
    },
    /// Verified requests matching a name
    Search {
        /// Text to search for
        query: String,
        /// Page selection
        #[command(flatten)]
        paging: Paging,
    },
    /// Ask sellers for stock that is not listed
    Submit(RequestArgs),
    /// Status of the requests submitted from this machine
    Mine,
}

/// `products`: prints one catalog page and the filter facets.
pub async fn catalog(ctx: &CliContext, args: CatalogArgs) -> Result<bool> {
    let query = args.query(ctx.page_limit);
    let currency = ctx.session.currency().await?;
    let result = ctx.session.api().catalog(&query).await;
    let Some(page) = report(ctx.notifier.as_ref(), "load catalog", result) else {
        return Ok(false);
    };
    let mut pages = PageState::default();
    pages.apply(&page.products.meta);
    println!(
        "{}",
        render::paged(
            &render::products(&page.products.items, currency, page.products.usd_to_inr_rate),
            &pages
        )
    );
    if !page.companies.is_empty() {
        println!("Companies: {}", page.companies.join(", "));
    }
    if query.active_filter_count() > 0 {
        println!("Filters active: {}", query.active_filter_count());
    }
    Ok(true)
}

/// `product`: prints one product with its ratings.
pub async fn product(ctx: &CliContext, id: &str) -> Result<bool> {
    let mut view = ProductDetailView::new(ctx.session.clone(), ctx.notifier.clone());
    if !view.load(id).await {
        return Ok(false);
    }
    let Some(detail) = &view.detail else {
        return Ok(false);
    };
    let product = &detail.product;
    println!("{} ({})", product.name, product.id);
    if !product.description.is_empty() {
        println!("{}", product.description);
    }
    let label = view
        .price_label()
        .ok()
        .flatten()
        .unwrap_or_else(|| render::price(product.price, product.currency, view.currency, None));
    println!("Price: {label}");
    println!(
        "Stock: {} {}",
        plain_number(product.stock),
        product.stock_unit
    );
    if !detail.seller_company.is_empty() || !detail.seller_name.is_empty() {
        println!("Seller: {} ({})", detail.seller_company, detail.seller_name);
    }
    println!(
        "Rating: {} from {} reviews",
        view.summary.display_average(),
        view.summary.count
    );
    for rating in &view.ratings {
        println!("  {}★ {}: {}", rating.rating, rating.name, rating.comment);
    }
    Ok(true)
}

/// `featured`
pub async fn featured(ctx: &CliContext, paging: &Paging) -> Result<bool> {
    let currency = ctx.session.currency().await?;
    let result = ctx.session.api().featured_products(ctx.page(paging)).await;
    let Some(page) = report(ctx.notifier.as_ref(), "load featured products", result) else {
        return Ok(false);
    };
    println!("{}", render::products(&page.items, currency, page.usd_to_inr_rate));
    Ok(true)
}

/// `top-sellers`
pub async fn top_sellers(ctx: &CliContext, paging: &Paging) -> Result<bool> {
    let result = ctx.session.api().top_sellers(ctx.page(paging)).await;
    let Some(page) = report(ctx.notifier.as_ref(), "load top sellers", result) else {
        return Ok(false);
    };
    println!("{}", render::users(&page.items));
    Ok(true)
}

/// `seller-products`: a seller's other products next to one of theirs.
pub async fn showcase(
    ctx: &CliContext,
    seller_id: &str,
    product_id: &str,
    paging: &Paging,
) -> Result<bool> {
    let currency = ctx.session.currency().await?;
    let result = ctx
        .session
        .api()
        .seller_showcase(seller_id, product_id, ctx.page(paging))
        .await;
    let Some(showcase) = report(ctx.notifier.as_ref(), "load seller products", result) else {
        return Ok(false);
    };
    if let Some(seller) = &showcase.seller {
        println!("{} - {}", seller.username, seller.company);
    }
    let products = &showcase.products;
    println!("{}", render::products(&products.items, currency, products.usd_to_inr_rate));
    Ok(true)
}

/// `more-products`
pub async fn more_products(ctx: &CliContext, seller_id: &str, paging: &Paging) -> Result<bool> {
    let currency = ctx.session.currency().await?;
    let result = ctx
        .session
        .api()
        .more_products(seller_id, ctx.page(paging))
        .await;
    let Some(page) = report(ctx.notifier.as_ref(), "load more products", result) else {
        return Ok(false);
    };
    println!("{}", render::products(&page.items, currency, page.usd_to_inr_rate));
    Ok(true)
}

/// `buy`: places the order and prints the seller link. Succeeds once the order is placed, with or without a link.
pub async fn buy(ctx: &CliContext, args: BuyArgs) -> Result<bool> {
    let mut view = ProductDetailView::new(ctx.session.clone(), ctx.notifier.clone());
    if !view.load(&args.product_id).await {
        return Ok(false);
    }
    let Some(detail) = view.detail else {
        return Ok(false);
    };
    let form = BuyForm {
        name: args.name,
        country_code: args.country_code,
        contact: args.contact,
        contact_method: args.method,
        quantity: args.quantity,
        note: args.note,
    };
    let screens = FormScreens::new(ctx.session.clone(), ctx.notifier.clone());
    let purchase = screens.buy(&detail.product, &form, args.reach_via).await;
    if let Some(link) = purchase.seller_link() {
        println!("{link}");
    }
    Ok(purchase.is_placed())
}

/// `rate`: submits a review and prints the new average.
pub async fn rate(ctx: &CliContext, args: RateArgs) -> Result<bool> {
    let mut view = ProductDetailView::new(ctx.session.clone(), ctx.notifier.clone());
    if !view.load(&args.product_id).await {
        return Ok(false);
    }
    let form = RatingForm {
        rating: args.rating,
        comment: args.comment,
        name: args.name,
        email: args.email,
    };
    if !view.rate(&form).await {
        return Ok(false);
    }
    println!(
        "Rating: {} from {} reviews",
        view.summary.display_average(),
        view.summary.count
    );
    Ok(true)
}

/// `contact`: prints the support link. Nothing is sent.
pub fn contact(ctx: &CliContext, args: ContactArgs) -> bool {
    let form = ContactForm {
        name: args.name,
        email: args.email,
        subject: args.subject,
        message: args.message,
    };
    let screens = FormScreens::new(ctx.session.clone(), ctx.notifier.clone());
    let Some(link) = screens.contact(&form, args.method) else {
        return false;
    };
    println!("{link}");
    true
}

/// `inquiry` subcommands.
pub async fn inquiry(ctx: &CliContext, command: InquiryCommand) -> Result<bool> {
    let mut board = InquiryBoard::new(ctx.session.clone(), ctx.notifier.clone());
    let ok = match command {
        InquiryCommand::List { oldest, paging } => {
            board.query = BoardQuery::Latest(if oldest {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            });
            board.load(ctx.page(&paging)).await
        }
        InquiryCommand::Search { query, paging } => {
            board.pages.limit = ctx.page(&paging).limit;
            board.search(&query).await
        }
        InquiryCommand::Submit(args) => {
            let submitted = board.submit(&args.into()).await;
            return Ok(submitted);
        }
        InquiryCommand::Mine => {
            if !board.load_mine().await {
                return Ok(false);
            }
            if board.mine.is_empty() {
                println!("No requests submitted from this machine yet");
            } else {
                println!("{}", render::requests(&board.mine));
            }
            return Ok(true);
        }
    };
    if ok {
        println!("{}", render::paged(&render::requests(&board.requests), &board.pages));
    }
    Ok(ok)
}
