use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A buyer's review of a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    /// Reviewer name
    pub name: String,
    /// Reviewer email
    pub email: String,
    /// Stars, 1 to 5
    pub rating: u8,
    /// Review text
    pub comment: String,
    /// When the review was left
    pub created_at: Option<DateTime<Utc>>,
}

/// Running rating aggregate for one product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingSummary {
    /// Number of ratings
    pub count: u32,
    /// Sum of all stars
    pub sum: f64,
    /// Mean stars, 0 when there are none
    pub average: f64,
}

impl RatingSummary {
    /// Aggregates a list of ratings.
    pub fn from_ratings<'a>(ratings: impl IntoIterator<Item = &'a Rating>) -> Self {
        let mut summary = Self::default();
        for rating in ratings {
            summary.record(rating.rating);
        }
        summary
    }

    /// Adds one rating to the aggregate.
    pub fn record(&mut self, stars: u8) {
        self.count += 1;
        self.sum += f64::from(stars);
        self.average = self.sum / f64::from(self.count);
    }

    /// Average rounded to one decimal, as displayed next to the stars.
    #[must_use]
    pub fn display_average(&self) -> String {
        format!("{:.1}", self.average)
    }
}
