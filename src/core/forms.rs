//! Form models and their local validation.
//!
//! Every form is checked before anything is sent: a failed check returns
//! [`Error::Validation`] with the message shown to the user, and the backend is
//! never contacted. The backend repeats its own checks; these only save a round
//! trip.

use crate::api::transport::{FormField, image_field};
use crate::errors::{Error, Result};
use crate::models::{ContactMethod, Currency, StockUnit};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Implemented by every submittable form.
pub trait Validate {
    /// Checks required fields in display order and reports the first failure.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] naming the offending field.
    fn validate(&self) -> Result<()>;
}

fn require(field: &'static str, value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::validation(field, message))
    } else {
        Ok(())
    }
}

fn optional_text(value: Option<&String>) -> Value {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map_or(Value::Null, |s| Value::String(s.to_string()))
}

/// Image attached to a product or request: a remote URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageInput {
    /// No image
    #[default]
    None,
    /// Remote image URL
    Url(String),
    /// Local file to upload
    File(PathBuf),
}

impl ImageInput {
    /// Interprets a user-supplied value: `http(s)://` means a URL, anything else
    /// a local file path.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Self::None,
            Some(v) if v.starts_with("http://") || v.starts_with("https://") => {
                Self::Url(v.to_string())
            }
            Some(v) => Self::File(PathBuf::from(v)),
        }
    }

    /// Whether no image was given.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Reads a local file into an upload field, or passes a URL through.
    pub(crate) async fn resolve(&self) -> Result<(Option<FormField>, Option<String>)> {
        match self {
            Self::None => Ok((None, None)),
            Self::Url(url) => Ok((None, Some(url.clone()))),
            Self::File(path) => Ok((Some(image_field("image", path).await?), None)),
        }
    }
}

/// Add / edit product form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductForm {
    /// Product name
    pub name: String,
    /// Free text description
    pub description: String,
    /// Unit price
    pub price: f64,
    /// Currency of the price
    pub currency: Currency,
    /// Shade
    pub tone: String,
    /// Colour Index number
    pub ci: String,
    /// Quantity in stock
    pub stock: f64,
    /// Unit of the stock quantity
    pub stock_unit: StockUnit,
    /// Product image
    pub image: ImageInput,
}

impl Validate for ProductForm {
    fn validate(&self) -> Result<()> {
        require("name", &self.name, "Product name is required")?;
        require("description", &self.description, "Description is required")?;
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(Error::validation("price", "Price must be greater than zero"));
        }
        if !self.stock.is_finite() || self.stock < 0.0 {
            return Err(Error::validation("stock", "Stock cannot be negative"));
        }
        Ok(())
    }
}

impl ProductForm {
    /// Wire fields, in the order the backend's form parser expects.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name.trim())),
            ("description", json!(self.description.trim())),
            ("price", json!(self.price)),
            ("currency", json!(self.currency.to_string())),
            ("tone", json!(self.tone.trim())),
            ("ci", json!(self.ci.trim())),
            ("stock", json!(self.stock)),
            ("stockUnit", json!(self.stock_unit.to_string())),
        ]
    }
}

/// Buyer stock request form, also used by admins to edit a request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestForm {
    /// Product wanted
    pub name: String,
    /// Quantity wanted
    pub quantity: f64,
    /// Unit of the quantity
    pub stock_unit: StockUnit,
    /// Colour Index number
    pub ci: Option<String>,
    /// Shade
    pub tone: Option<String>,
    /// Buyer's phone number or email
    pub contact: String,
    /// How the buyer wants to be reached
    pub contact_method: ContactMethod,
    /// Free text details
    pub description: Option<String>,
    /// Reference image
    pub image: ImageInput,
}

impl Validate for RequestForm {
    fn validate(&self) -> Result<()> {
        require("name", &self.name, "Product name is required")?;
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(Error::validation(
                "quantity",
                "Quantity must be greater than zero",
            ));
        }
        require("contact", &self.contact, "Contact is required")
    }
}

impl RequestForm {
    /// Wire fields. The description travels as `note`.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("name", json!(self.name.trim())),
            ("note", optional_text(self.description.as_ref())),
            ("quantity", json!(self.quantity)),
            ("stockUnit", json!(self.stock_unit.to_string())),
            ("ci", optional_text(self.ci.as_ref())),
            ("tone", optional_text(self.tone.as_ref())),
            ("contact", json!(self.contact.trim())),
            ("contactMethod", json!(self.contact_method.to_string())),
        ]
    }
}

/// Checkout form on a product's buy page.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyForm {
    /// Buyer name
    pub name: String,
    /// Dialing prefix, added to phone contacts
    pub country_code: String,
    /// Phone number or email
    pub contact: String,
    /// How the buyer wants to be reached
    pub contact_method: ContactMethod,
    /// Quantity ordered
    pub quantity: f64,
    /// Note for the seller
    pub note: String,
}

impl Default for BuyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            country_code: "+91".to_string(),
            contact: String::new(),
            contact_method: ContactMethod::Whatsapp,
            quantity: 1.0,
            note: String::new(),
        }
    }
}

impl Validate for BuyForm {
    fn validate(&self) -> Result<()> {
        require("name", &self.name, "Name is required")?;
        require("contact", &self.contact, "Contact detail is required")?;
        if !self.quantity.is_finite() || self.quantity < 1.0 {
            return Err(Error::validation("quantity", "Quantity must be at least 1"));
        }
        Ok(())
    }
}

impl BuyForm {
    /// Contact as sent to the backend. Phone-style contacts carry the country code.
    #[must_use]
    pub fn buyer_contact(&self) -> String {
        match self.contact_method {
            ContactMethod::Email => self.contact.trim().to_string(),
            ContactMethod::Whatsapp | ContactMethod::Phone => {
                format!("{}{}", self.country_code.trim(), self.contact.trim())
            }
        }
    }

    /// JSON body of the order.
    #[must_use]
    pub fn payload(&self) -> Value {
        json!({
            "buyerName": self.name.trim(),
            "buyerContact": self.buyer_contact(),
            "contactMethod": self.contact_method.to_string(),
            "quantity": self.quantity,
            "note": self.note.trim(),
        })
    }
}

/// Seller signup form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignupForm {
    /// Username
    pub name: String,
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
    /// Dialing prefix of the phone number
    pub country_code: String,
    /// Phone number without the prefix
    pub phone: String,
    /// Company name
    pub company: String,
    /// About the company
    pub description: String,
    /// Product families the seller deals in
    pub speciality: Vec<String>,
}

impl Validate for SignupForm {
    fn validate(&self) -> Result<()> {
        require("name", &self.name, "Name is required")?;
        require("email", &self.email, "Email is required")?;
        require("password", &self.password, "Password is required")?;
        require("phone", &self.phone, "Phone number is required")?;
        require("company", &self.company, "Company name is required")
    }
}

impl SignupForm {
    /// JSON body of the registration.
    #[must_use]
    pub fn payload(&self) -> Value {
        json!({
            "username": self.name.trim(),
            "email": self.email.trim(),
            "password": self.password,
            "countryCode": self.country_code.trim(),
            "phoneNumber": self.phone.trim(),
            "company": self.company.trim(),
            "description": self.description.trim(),
            "speciality": self.speciality.join(","),
        })
    }
}

/// Admin and seller login form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> Result<()> {
        require("email", &self.email, "Email is required")?;
        require("password", &self.password, "Password is required")
    }
}

/// Review form on the product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RatingForm {
    /// 0 means "not selected"
    pub rating: u8,
    /// Review text
    pub comment: String,
    /// Reviewer name
    pub name: String,
    /// Reviewer email
    pub email: String,
}

impl Validate for RatingForm {
    fn validate(&self) -> Result<()> {
        if self.rating == 0 {
            return Err(Error::validation("rating", "Please select a rating"));
        }
        if self.rating > 5 {
            return Err(Error::validation("rating", "Rating must be between 1 and 5"));
        }
        require("comment", &self.comment, "Please enter a review")?;
        require("name", &self.name, "Please enter your name")?;
        require("email", &self.email, "Please enter your email")
    }
}

/// Public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactForm {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Message text
    pub message: String,
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<()> {
        require("name", &self.name, "Name is required")?;
        require("email", &self.email, "Email is required")?;
        require("subject", &self.subject, "Subject is required")?;
        require("message", &self.message, "Message is required")
    }
}
