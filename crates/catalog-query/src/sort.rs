//! Named orderings over the joined product view.

use std::cmp::Ordering;
use std::str::FromStr;

use common::ProductView;
use serde::{Deserialize, Serialize};

use crate::QueryError;

/// One of the orderings a user can pick for the product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortKey {
    /// The natural ordering, restored whenever the match set changes.
    #[default]
    NameAsc,
    NameDesc,
    BarcodeAsc,
    BarcodeDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Every ordering, in declaration order.
    pub const ALL: [SortKey; 6] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::BarcodeAsc,
        SortKey::BarcodeDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
    ];

    /// Returns the natural ordering.
    pub const fn natural() -> Self {
        SortKey::NameAsc
    }

    /// Returns the wire name, e.g. `"PRICE_DESC"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NameAsc => "NAME_ASC",
            SortKey::NameDesc => "NAME_DESC",
            SortKey::BarcodeAsc => "BARCODE_ASC",
            SortKey::BarcodeDesc => "BARCODE_DESC",
            SortKey::PriceAsc => "PRICE_ASC",
            SortKey::PriceDesc => "PRICE_DESC",
        }
    }

    fn comparator(self) -> Comparator {
        match self {
            SortKey::NameAsc => by_name,
            SortKey::NameDesc => by_name_desc,
            SortKey::BarcodeAsc => by_barcode,
            SortKey::BarcodeDesc => by_barcode_desc,
            SortKey::PriceAsc => by_price,
            SortKey::PriceDesc => by_price_desc,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QueryError::UnknownSortKey(s.to_string()))
    }
}

type Comparator = fn(&ProductView, &ProductView) -> Ordering;

fn by_name(a: &ProductView, b: &ProductView) -> Ordering {
    a.name().cmp(b.name())
}

fn by_name_desc(a: &ProductView, b: &ProductView) -> Ordering {
    by_name(b, a)
}

fn by_barcode(a: &ProductView, b: &ProductView) -> Ordering {
    a.barcode_str().cmp(b.barcode_str())
}

fn by_barcode_desc(a: &ProductView, b: &ProductView) -> Ordering {
    by_barcode(b, a)
}

fn by_price(a: &ProductView, b: &ProductView) -> Ordering {
    a.price().cmp(&b.price())
}

fn by_price_desc(a: &ProductView, b: &ProductView) -> Ordering {
    by_price(b, a)
}

/// Applies a [`SortKey`] to product views.
///
/// All sorts are stable: views that compare equal under the key keep
/// their input order.
pub struct SortPolicy;

impl SortPolicy {
    /// Compares two views under `key`.
    pub fn compare(a: &ProductView, b: &ProductView, key: SortKey) -> Ordering {
        (key.comparator())(a, b)
    }

    /// Sorts `views` in place.
    pub fn sort(views: &mut [ProductView], key: SortKey) {
        views.sort_by(key.comparator());
    }

    /// Returns a sorted copy of `views`, leaving the input untouched.
    pub fn sorted(views: &[ProductView], key: SortKey) -> Vec<ProductView> {
        let mut copy = views.to_vec();
        Self::sort(&mut copy, key);
        copy
    }
}
