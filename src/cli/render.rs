use crate::core::currency::{display_price, plain_number};
use crate::core::listing::PageState;
use crate::models::{Currency, Order, Product, StockRequest, User};

/// Left-aligned columns padded to their widest cell.
#[must_use]
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = vec![
        line(headers.iter().copied(), &widths),
        line(rule.iter().map(String::as_str), &widths),
    ];
    for row in rows {
        out.push(line(row.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Price in the display currency, or as stored when no usable rate is known.
#[must_use]
pub fn price(amount: f64, from: Currency, to: Currency, rate: Option<f64>) -> String {
    rate.and_then(|rate| display_price(amount, from, to, rate).ok())
        .unwrap_or_else(|| format!("{} {}", from.symbol(), plain_number(amount)))
}

fn flag(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

/// Product rows with prices in the display currency.
#[must_use]
pub fn products(products: &[Product], currency: Currency, rate: Option<f64>) -> String {
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                price(p.price, p.currency, currency, rate),
                format!("{} {}", plain_number(p.stock), p.stock_unit),
                p.seller.as_ref().map(|s| s.company.clone()).unwrap_or_default(),
                p.status.to_string(),
                flag(p.is_visible),
                flag(p.is_featured),
                flag(p.is_verified),
            ]
        })
        .collect();
    table(
        &["ID", "NAME", "PRICE", "STOCK", "COMPANY", "STATUS", "VISIBLE", "FEATURED", "VERIFIED"],
        &rows,
    )
}

/// Seller rows.
#[must_use]
pub fn users(users: &[User]) -> String {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                u.id.clone(),
                u.username.clone(),
                u.company.clone(),
                u.email.clone(),
                u.phone(),
                flag(u.is_active),
                flag(u.is_verified),
            ]
        })
        .collect();
    table(
        &["ID", "NAME", "COMPANY", "EMAIL", "PHONE", "ACTIVE", "VERIFIED"],
        &rows,
    )
}

/// Order rows with totals in the display currency.
#[must_use]
pub fn orders(orders: &[Order], currency: Currency, rate: Option<f64>) -> String {
    let rows: Vec<Vec<String>> = orders
        .iter()
        .map(|o| {
            vec![
                o.id.clone(),
                o.product_name.clone(),
                o.buyer_name.clone(),
                format!("{} ({})", o.buyer_contact, o.contact_method),
                plain_number(o.quantity),
                price(o.total_amount, o.currency, currency, rate),
                o.status.to_string(),
            ]
        })
        .collect();
    table(
        &["ID", "PRODUCT", "BUYER", "CONTACT", "QTY", "TOTAL", "STATUS"],
        &rows,
    )
}

/// Stock request rows.
#[must_use]
pub fn requests(requests: &[StockRequest]) -> String {
    let rows: Vec<Vec<String>> = requests
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.name.clone(),
                format!("{} {}", plain_number(r.quantity), r.stock_unit),
                format!("{} ({})", r.contact, r.contact_method),
                r.seller_name.clone(),
                flag(r.is_verified),
                r.status.to_string(),
            ]
        })
        .collect();
    table(
        &["ID", "NAME", "QUANTITY", "CONTACT", "SELLER", "VERIFIED", "STATUS"],
        &rows,
    )
}

/// Table followed by the pagination footer.
#[must_use]
pub fn paged(body: &str, pages: &PageState) -> String {
    let mut footer = pages.summary();
    if pages.has_prev() {
        footer.push_str("  [--page ");
        footer.push_str(&(pages.page - 1).to_string());
        footer.push_str(" for previous]");
    }
    if pages.has_next() {
        footer.push_str("  [--page ");
        footer.push_str(&(pages.page + 1).to_string());
        footer.push_str(" for next]");
    }
    format!("{body}\n{footer}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_pads_columns() {
        let out = table(
            &["ID", "NAME"],
            &[
                vec!["p1".to_string(), "Acid Red 88".to_string()],
                vec!["p22".to_string(), "Vat".to_string()],
            ],
        );
        assert_eq!(out, "ID   NAME\n---  -----------\np1   Acid Red 88\np22  Vat");
    }

    #[test]
    fn test_price_without_rate_stays_in_own_currency() {
        assert_eq!(price(120.0, Currency::Inr, Currency::Usd, None), "₹ 120");
        assert_eq!(price(120.0, Currency::Inr, Currency::Inr, None), "₹ 120");
        assert_eq!(price(840.0, Currency::Inr, Currency::Usd, Some(84.0)), "$ 10.00");
        assert_eq!(price(2.5, Currency::Usd, Currency::Inr, Some(0.0)), "$ 2.5");
    }

    #[test]
    fn test_footer_points_to_neighbours() {
        let pages = PageState {
            page: 2,
            limit: 25,
            count: 25,
            total: 80,
            total_pages: 4,
        };
        assert_eq!(
            paged("rows", &pages),
            "rows\nPage 2 of 4 (80 total)  [--page 1 for previous]  [--page 3 for next]"
        );
    }
}
