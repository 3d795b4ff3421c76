//! Translates [`FilterCriteria`] into a store [`Predicate`].

use catalog_store::{Clause, Predicate};
use common::CategoryId;

use crate::FilterCriteria;

/// Builds store predicates from filter criteria.
///
/// Each criterion maps to at most one [`Clause`]; the clauses that are
/// present are folded into one conjunctive [`Predicate`]. Criteria that are
/// absent, blank or degenerate contribute nothing.
pub struct QueryBuilder;

impl QueryBuilder {
    /// Builds the predicate for `criteria`.
    pub fn build(criteria: &FilterCriteria) -> Predicate {
        let clauses = [
            Self::barcode_clause(criteria),
            Self::name_clause(criteria),
            Self::category_clause(criteria),
            Self::price_clause(criteria),
        ];

        let predicate = clauses
            .into_iter()
            .flatten()
            .fold(Predicate::new(), Predicate::and);

        tracing::debug!(clauses = predicate.clauses().len(), "built predicate");
        predicate
    }

    /// Predicate matching every product.
    pub fn show_all() -> Predicate {
        Predicate::match_all()
    }

    /// Predicate for a single category. `category_id <= 0` matches everything.
    pub fn for_category(category_id: i64) -> Predicate {
        Self::build(&FilterCriteria::for_category(category_id))
    }

    /// Prefix match on barcode when the prefix is non-blank.
    pub fn barcode_clause(criteria: &FilterCriteria) -> Option<Clause> {
        non_blank(criteria.barcode_prefix.as_deref())
            .map(|prefix| Clause::BarcodePrefix(prefix.to_string()))
    }

    /// Case-insensitive substring match on name when the text is non-blank.
    pub fn name_clause(criteria: &FilterCriteria) -> Option<Clause> {
        non_blank(criteria.name_contains.as_deref())
            .map(|text| Clause::NameContains(text.to_string()))
    }

    /// Exact category match when the id is positive.
    pub fn category_clause(criteria: &FilterCriteria) -> Option<Clause> {
        (criteria.category_id > 0).then(|| Clause::Category(CategoryId::new(criteria.category_id)))
    }

    /// Inclusive price range when both bounds are set and ordered.
    ///
    /// An inverted range is dropped rather than rejected.
    pub fn price_clause(criteria: &FilterCriteria) -> Option<Clause> {
        let low = criteria.lower_price?.to_minor_units();
        let high = criteria.higher_price?.to_minor_units();
        if high < low {
            tracing::debug!(low, high, "ignoring inverted price range");
            return None;
        }
        Some(Clause::PriceRange { low, high })
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}
