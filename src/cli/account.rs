use super::CliContext;
use crate::core::forms::{LoginForm, SignupForm};
use crate::errors::Result;
use crate::models::Currency;
use crate::models::de::split_list;
use crate::views::FormScreens;
use clap::Args;

/// Seller registration fields.
#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    /// Username
    #[arg(long)]
    pub name: String,
    /// Login email
    #[arg(long)]
    pub email: String,
    /// Login password
    #[arg(long)]
    pub password: String,
    /// Dialing prefix of the phone number
    #[arg(long, default_value = "+91")]
    pub country_code: String,
    /// Phone number without the prefix
    #[arg(long)]
    pub phone: String,
    /// Company name
    #[arg(long)]
    pub company: String,
    /// About the company
    #[arg(long, default_value = "")]
    pub description: String,
    /// Comma-separated specialities, e.g. "reactive dyes, pigments"
    #[arg(long, default_value = "")]
    pub speciality: String,
}

impl From<RegisterArgs> for SignupForm {
    fn from(args: RegisterArgs) -> Self {
        Self {
            speciality: split_list(&args.speciality),
            name: args.name,
            email: args.email,
            password: args.password,
            country_code: args.country_code,
            phone: args.phone,
            company: args.company,
            description: args.description,
        }
    }
}

fn screens(ctx: &CliContext) -> FormScreens {
    FormScreens::new(ctx.session.clone(), ctx.notifier.clone())
}

/// `login`
pub async fn login(ctx: &CliContext, email: String, password: String) -> Result<bool> {
    Ok(screens(ctx).login(&LoginForm { email, password }).await)
}

/// `register`
pub async fn register(ctx: &CliContext, args: RegisterArgs) -> Result<bool> {
    Ok(screens(ctx).signup(&args.into()).await)
}

/// `logout`
pub async fn logout(ctx: &CliContext) -> Result<bool> {
    Ok(screens(ctx).logout().await)
}

/// `whoami`: prints the stored session.
pub async fn whoami(ctx: &CliContext) -> Result<bool> {
    let snapshot = ctx.session.snapshot().await?;
    match snapshot.user.filter(|_| snapshot.is_authenticated) {
        Some(user) => {
            println!("{} <{}> ({})", user.username, user.email, user.role);
            if !user.company.is_empty() {
                println!("Company: {}", user.company);
            }
            if snapshot.requests_count > 0 {
                println!("Assigned requests: {}", snapshot.requests_count);
            }
        }
        None => println!("Not logged in"),
    }
    println!("Currency: {}", snapshot.currency);
    if !snapshot.requests.is_empty() {
        println!("Tracked requests: {}", snapshot.requests.join(", "));
    }
    Ok(true)
}

/// `currency`: sets the display currency, or toggles it when none is given.
pub async fn currency(ctx: &CliContext, currency: Option<Currency>) -> Result<bool> {
    let current = match currency {
        Some(currency) => {
            ctx.session.switch_currency(currency).await?;
            currency
        }
        None => ctx.session.toggle_currency().await?,
    };
    ctx.notifier
        .success(&format!("Prices are shown in {current} ({})", current.symbol()));
    Ok(true)
}
