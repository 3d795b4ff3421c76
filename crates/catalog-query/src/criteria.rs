//! The declarative shape of a search/filter request.

use common::PriceValue;
use serde::{Deserialize, Serialize};

/// What the user asked to see.
///
/// Every field is optional. `category_id <= 0` means "any category";
/// a price range is only applied when `lower_price` is set and
/// `higher_price >= lower_price`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Barcode must start with this text.
    pub barcode_prefix: Option<String>,

    /// Name must contain this text, ignoring case.
    pub name_contains: Option<String>,

    /// Exact category; zero or negative disables the filter.
    pub category_id: i64,

    /// Inclusive lower price bound.
    pub lower_price: Option<PriceValue>,

    /// Inclusive upper price bound.
    pub higher_price: Option<PriceValue>,
}

impl FilterCriteria {
    /// Creates criteria that match everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria for a single category.
    pub fn for_category(category_id: i64) -> Self {
        Self {
            category_id,
            ..Default::default()
        }
    }

    /// Filters by barcode prefix.
    pub fn barcode_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.barcode_prefix = Some(prefix.into());
        self
    }

    /// Filters by a case-insensitive name fragment.
    pub fn name_contains(mut self, text: impl Into<String>) -> Self {
        self.name_contains = Some(text.into());
        self
    }

    /// Filters by category.
    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = category_id;
        self
    }

    /// Filters by an inclusive price range.
    pub fn price_range(mut self, lower: PriceValue, higher: PriceValue) -> Self {
        self.lower_price = Some(lower);
        self.higher_price = Some(higher);
        self
    }

    /// Returns true if no criterion would produce a clause.
    pub fn is_unfiltered(&self) -> bool {
        crate::QueryBuilder::build(self).is_match_all()
    }
}
