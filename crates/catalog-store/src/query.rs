use common::{CategoryId, PriceValue, ProductView};

/// A single match condition over a joined product view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Barcode starts with this prefix. Products without a barcode never match.
    BarcodePrefix(String),

    /// Name contains this text, ignoring case.
    NameContains(String),

    /// Product belongs to exactly this category.
    Category(CategoryId),

    /// Price lies in `[low, high]`, both in minor units.
    PriceRange { low: i64, high: i64 },
}

impl Clause {
    /// Returns true if the view satisfies this clause.
    pub fn matches(&self, view: &ProductView) -> bool {
        match self {
            Clause::BarcodePrefix(prefix) => view
                .product
                .barcode
                .as_deref()
                .is_some_and(|barcode| barcode.starts_with(prefix.as_str())),
            Clause::NameContains(text) => view
                .name()
                .to_lowercase()
                .contains(&text.to_lowercase()),
            Clause::Category(id) => view.product.category_id == *id,
            Clause::PriceRange { low, high } => {
                let units = view.price().to_minor_units();
                *low <= units && units <= *high
            }
        }
    }
}

/// A conjunction of [`Clause`]s understood by the store.
///
/// An empty predicate matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// Creates a predicate that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`Predicate::new`], named for call sites that mean "show all".
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Adds a clause.
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Requires the barcode to start with `prefix`.
    pub fn barcode_prefix(self, prefix: impl Into<String>) -> Self {
        self.and(Clause::BarcodePrefix(prefix.into()))
    }

    /// Requires the name to contain `text`, ignoring case.
    pub fn name_contains(self, text: impl Into<String>) -> Self {
        self.and(Clause::NameContains(text.into()))
    }

    /// Requires an exact category.
    pub fn category(self, id: CategoryId) -> Self {
        self.and(Clause::Category(id))
    }

    /// Requires the price to lie in `[low, high]`.
    pub fn price_range(self, low: PriceValue, high: PriceValue) -> Self {
        self.and(Clause::PriceRange {
            low: low.to_minor_units(),
            high: high.to_minor_units(),
        })
    }

    /// Returns the clauses in insertion order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if this predicate has no clauses.
    pub fn is_match_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns true if the view satisfies every clause.
    pub fn matches(&self, view: &ProductView) -> bool {
        self.clauses.iter().all(|clause| clause.matches(view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{NewProduct, ProductId};

    fn view(name: &str, barcode: Option<&str>, units: i64, category: i64) -> ProductView {
        let mut product = NewProduct::new(name, PriceValue::from_minor_units(units))
            .category(CategoryId::new(category));
        product.barcode = barcode.map(String::from);
        ProductView::join(product.with_id(ProductId::new(1)), None)
    }

    #[test]
    fn empty_predicate_matches_everything() {
        let predicate = Predicate::new();
        assert!(predicate.is_match_all());
        assert!(predicate.matches(&view("Taps", None, 599, 1)));
    }

    #[test]
    fn barcode_prefix_requires_barcode() {
        let clause = Clause::BarcodePrefix("123".to_string());
        assert!(clause.matches(&view("Taps", Some("1234567890123"), 599, 1)));
        assert!(!clause.matches(&view("Sink", Some("3210987654321"), 1099, 1)));
        assert!(!clause.matches(&view("Sweets", None, 99, 0)));
    }

    #[test]
    fn name_contains_ignores_case() {
        let clause = Clause::NameContains("ILL".to_string());
        assert!(clause.matches(&view("Pillows", None, 1899, 2)));
        assert!(!clause.matches(&view("Taps", None, 599, 1)));
    }

    #[test]
    fn price_range_is_inclusive() {
        let clause = Clause::PriceRange {
            low: 599,
            high: 1899,
        };
        assert!(clause.matches(&view("Taps", None, 599, 1)));
        assert!(clause.matches(&view("Pillows", None, 1899, 2)));
        assert!(!clause.matches(&view("Sweets", None, 99, 0)));
    }

    #[test]
    fn clauses_are_conjunctive() {
        let predicate = Predicate::new()
            .category(CategoryId::new(1))
            .name_contains("sink");

        assert_eq!(predicate.clauses().len(), 2);
        assert!(predicate.matches(&view("Sink", None, 1099, 1)));
        assert!(!predicate.matches(&view("Taps", None, 599, 1)));
        assert!(!predicate.matches(&view("Sink", None, 1099, 2)));
    }

    #[test]
    fn price_range_builder_uses_minor_units() {
        let predicate = Predicate::new().price_range(
            PriceValue::new(5, 99).unwrap(),
            PriceValue::new(18, 99).unwrap(),
        );
        assert_eq!(
            predicate.clauses(),
            &[Clause::PriceRange {
                low: 599,
                high: 1899
            }]
        );
    }
}
