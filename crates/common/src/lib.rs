//! Shared types for the catalog browser.
//!
//! Identifiers, the fixed-point [`PriceValue`], the persisted records and
//! the joined [`ProductView`] that the view pipeline filters and sorts.

pub mod price;
pub mod record;
pub mod types;

pub use price::{PriceError, PriceValue};
pub use record::{CategoryRecord, NewCategory, NewProduct, ProductRecord, ProductView};
pub use types::{CategoryId, ProductId};
