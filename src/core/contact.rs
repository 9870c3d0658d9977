//! Deep links that hand a conversation over to WhatsApp, mail, or the phone.

use super::forms::ContactForm;
use crate::models::{ContactMethod, Currency, SellerContact};

/// Marketplace support line, also the WhatsApp number.
pub const SUPPORT_PHONE: &str = "917359381236";
/// Marketplace support mailbox.
pub const SUPPORT_EMAIL: &str = "chemstock74@gmail.com";

// wa.me and tel: take the number without '+' or separators.
fn dial_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Builds the link that opens `method` addressed to `phone` or `email`.
#[must_use]
pub fn deep_link(
    method: ContactMethod,
    phone: &str,
    email: &str,
    subject: &str,
    message: &str,
) -> String {
    match method {
        ContactMethod::Whatsapp => format!(
            "https://wa.me/{}?text={}",
            dial_digits(phone),
            urlencoding::encode(message)
        ),
        ContactMethod::Email => format!(
            "mailto:{}?subject={}&body={}",
            email.trim(),
            urlencoding::encode(subject),
            urlencoding::encode(message)
        ),
        ContactMethod::Phone => format!("tel:{}", dial_digits(phone)),
    }
}

/// Link for reaching a buyer from the order or request tables, where only
/// one contact string is known.
#[must_use]
pub fn reach_buyer(method: ContactMethod, contact: &str) -> String {
    deep_link(method, contact, contact, "", "Hello")
}

impl ContactForm {
    /// Text sent to support.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nSubject: {}\nMessage: {}",
            self.name.trim(),
            self.email.trim(),
            self.subject.trim(),
            self.message.trim()
        )
    }

    /// Link that opens the support conversation over `method`.
    #[must_use]
    pub fn support_link(&self, method: ContactMethod) -> String {
        deep_link(
            method,
            SUPPORT_PHONE,
            SUPPORT_EMAIL,
            self.subject.trim(),
            &self.message(),
        )
    }
}

/// Summary of a placed order, forwarded to the seller.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Ordered product
    pub product_id: String,
    /// Its name
    pub product_name: String,
    /// Quantity ordered
    pub quantity: f64,
    /// Buyer name
    pub customer: String,
    /// How the buyer wants to be reached
    pub contact_method: ContactMethod,
    /// Buyer's phone number or email
    pub contact: String,
    /// Buyer's note
    pub notes: String,
    /// Currency of the unit price
    pub currency: Currency,
    /// Price per unit
    pub unit_price: f64,
}

impl OrderSummary {
    /// Unit price times quantity, in the product's own currency.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity
    }

    /// Message text forwarded to the seller.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "New Order:\nProduct ID: {}\nProduct Name: {}\nQuantity: {}\nCustomer: {}\nContact: {} - {}\nNotes: {}\nSubtotal: {}{:.2}",
            self.product_id,
            self.product_name,
            super::currency::plain_number(self.quantity),
            self.customer,
            self.contact_method,
            self.contact,
            self.notes,
            self.currency.symbol(),
            self.subtotal()
        )
    }

    /// Link that forwards the summary to the seller over `method`.
    #[must_use]
    pub fn seller_link(&self, method: ContactMethod, seller: &SellerContact) -> String {
        let phone = format!("{}{}", seller.country_code, seller.phone_number);
        deep_link(method, &phone, &seller.email, "New Order", &self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_form() -> ContactForm {
        ContactForm {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            subject: "Bulk order".to_string(),
            message: "Need 2 tons".to_string(),
        }
    }

    #[test]
    fn test_support_links() {
        let form = contact_form();
        assert_eq!(
            form.message(),
            "Name: Asha\nEmail: asha@example.com\nSubject: Bulk order\nMessage: Need 2 tons"
        );
        assert_eq!(
            form.support_link(ContactMethod::Whatsapp),
            format!(
                "https://wa.me/917359381236?text={}",
                urlencoding::encode(&form.message())
            )
        );
        assert!(
            form.support_link(ContactMethod::Email)
                .starts_with("mailto:chemstock74@gmail.com?subject=Bulk%20order&body=Name%3A%20Asha")
        );
        assert_eq!(form.support_link(ContactMethod::Phone), "tel:917359381236");
    }

    #[test]
    fn test_reach_buyer_strips_separators() {
        assert_eq!(
            reach_buyer(ContactMethod::Whatsapp, "+91 98765-43210"),
            "https://wa.me/919876543210?text=Hello"
        );
        assert_eq!(reach_buyer(ContactMethod::Phone, "+1 555 0100"), "tel:15550100");
        assert_eq!(
            reach_buyer(ContactMethod::Email, "kiran@example.com"),
            "mailto:kiran@example.com?subject=&body=Hello"
        );
    }

    #[test]
    fn test_order_summary() {
        let summary = OrderSummary {
            product_id: "p1".to_string(),
            product_name: "Acid Red 88".to_string(),
            quantity: 3.0,
            customer: "Kiran".to_string(),
            contact_method: ContactMethod::Phone,
            contact: "+919876543210".to_string(),
            notes: String::new(),
            currency: Currency::Usd,
            unit_price: 12.5,
        };
        assert!((summary.subtotal() - 37.5).abs() < f64::EPSILON);
        assert_eq!(
            summary.message(),
            "New Order:\nProduct ID: p1\nProduct Name: Acid Red 88\nQuantity: 3\nCustomer: Kiran\nContact: phone - +919876543210\nNotes: \nSubtotal: $37.50"
        );

        let seller = SellerContact {
            email: "sales@acme.example".to_string(),
            country_code: "+91".to_string(),
            phone_number: "9000000000".to_string(),
            ..SellerContact::default()
        };
        assert!(summary
            .seller_link(ContactMethod::Whatsapp, &seller)
            .starts_with("https://wa.me/919000000000?text=New%20Order%3A"));
        assert!(summary
            .seller_link(ContactMethod::Email, &seller)
            .starts_with("mailto:sales@acme.example?subject=New%20Order&body="));
    }
}
