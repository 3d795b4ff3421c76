//! Fixed-point price value.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a [`PriceValue`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The minor part of a price built from parts was outside `0..=99`.
    #[error("Minor units must be between 0 and 99, got {0}")]
    MinorOutOfRange(i64),

    /// The price does not fit in a minor-unit count.
    #[error("Price {major} major, {minor} minor units is out of range")]
    OutOfRange { major: i64, minor: i64 },

    /// A textual price could not be parsed.
    #[error("Invalid price '{0}'")]
    Parse(String),
}

/// A price split into major and minor units (e.g. pounds and pence).
///
/// Ordering compares `major` first, then `minor`. Negative values are
/// kept exactly as decomposed: a minor-unit count of `-5` becomes
/// `{ major: 0, minor: -5 }` and is never folded into the major part.
///
/// Every value converts to a minor-unit count without overflow.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawPrice")]
pub struct PriceValue {
    major: i64,
    minor: i64,
}

/// Unchecked wire form of a [`PriceValue`].
#[derive(Deserialize)]
struct RawPrice {
    major: i64,
    minor: i64,
}

impl TryFrom<RawPrice> for PriceValue {
    type Error = PriceError;

    fn try_from(raw: RawPrice) -> Result<Self, Self::Error> {
        Self::checked(raw.major, raw.minor)
    }
}

impl PriceValue {
    /// Creates a price from its parts. `minor` must be in `0..=99`.
    pub fn new(major: i64, minor: i64) -> Result<Self, PriceError> {
        if !(0..=99).contains(&minor) {
            return Err(PriceError::MinorOutOfRange(minor));
        }
        Self::checked(major, minor)
    }

    /// Accepts `new`'s parts plus the negative decomposition produced by
    /// [`from_minor_units`](Self::from_minor_units): `minor` in `-99..=-1`
    /// with `major <= 0`.
    fn checked(major: i64, minor: i64) -> Result<Self, PriceError> {
        let negative_part = (-99..=-1).contains(&minor) && major <= 0;
        if !(0..=99).contains(&minor) && !negative_part {
            return Err(PriceError::MinorOutOfRange(minor));
        }
        if major
            .checked_mul(100)
            .and_then(|units| units.checked_add(minor))
            .is_none()
        {
            return Err(PriceError::OutOfRange { major, minor });
        }
        Ok(Self { major, minor })
    }

    /// Creates a price from a count of minor units (`major * 100 + minor`).
    pub fn from_minor_units(units: i64) -> Self {
        Self {
            major: units / 100,
            minor: units % 100,
        }
    }

    /// Returns a zero price.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the major part.
    pub fn major(&self) -> i64 {
        self.major
    }

    /// Returns the minor part.
    pub fn minor(&self) -> i64 {
        self.minor
    }

    /// Returns the price as a count of minor units.
    pub fn to_minor_units(&self) -> i64 {
        self.major * 100 + self.minor
    }
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.major == 0 && self.minor < 0 {
            write!(f, "-0.{:02}", self.minor.abs())
        } else {
            write!(f, "{}.{:02}", self.major, self.minor.abs())
        }
    }
}

impl FromStr for PriceValue {
    type Err = PriceError;

    /// Parses `"12"`, `"12.5"` or `"12.50"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || PriceError::Parse(s.to_string());

        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, "0"),
        };
        if minor.is_empty() || minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major.parse().map_err(|_| invalid())?;
        let mut minor: i64 = minor.parse().map_err(|_| invalid())?;
        if s.split_once('.').is_some_and(|(_, m)| m.len() == 1) {
            minor *= 10;
        }
        if s.starts_with('-') {
            minor = -minor;
        }

        Self::checked(major, minor).map_err(|_| invalid())
    }
}

impl From<PriceValue> for i64 {
    fn from(price: PriceValue) -> Self {
        price.to_minor_units()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_valid_minor() {
        let price = PriceValue::new(5, 99).unwrap();
        assert_eq!(price.major(), 5);
        assert_eq!(price.minor(), 99);
    }

    #[test]
    fn new_rejects_minor_out_of_range() {
        assert_eq!(
            PriceValue::new(5, 100),
            Err(PriceError::MinorOutOfRange(100))
        );
        assert_eq!(PriceValue::new(5, -1), Err(PriceError::MinorOutOfRange(-1)));
    }

    #[test]
    fn minor_units_roundtrip() {
        for major in [0, 1, 5, 10, 18, 12_345] {
            for minor in [0, 1, 9, 50, 99] {
                let price = PriceValue::new(major, minor).unwrap();
                assert_eq!(PriceValue::from_minor_units(price.to_minor_units()), price);
            }
        }
    }

    #[test]
    fn to_minor_units_combines_parts() {
        assert_eq!(PriceValue::new(5, 99).unwrap().to_minor_units(), 599);
        assert_eq!(PriceValue::new(0, 99).unwrap().to_minor_units(), 99);
    }

    #[test]
    fn negative_units_are_not_normalised() {
        let price = PriceValue::from_minor_units(-5);
        assert_eq!(price.major(), 0);
        assert_eq!(price.minor(), -5);
        assert_eq!(price.to_minor_units(), -5);

        let price = PriceValue::from_minor_units(-1_050);
        assert_eq!(price.major(), -10);
        assert_eq!(price.minor(), -50);
        assert_eq!(PriceValue::from_minor_units(price.to_minor_units()), price);
    }

    #[test]
    fn ordering_compares_major_then_minor() {
        let cheap = PriceValue::new(0, 99).unwrap();
        let mid = PriceValue::new(5, 99).unwrap();
        let dear = PriceValue::new(10, 0).unwrap();
        assert!(cheap < mid);
        assert!(mid < dear);
        assert!(PriceValue::new(5, 10).unwrap() > PriceValue::new(5, 9).unwrap());
    }

    #[test]
    fn display_pads_minor() {
        assert_eq!(PriceValue::new(5, 99).unwrap().to_string(), "5.99");
        assert_eq!(PriceValue::new(10, 5).unwrap().to_string(), "10.05");
        assert_eq!(PriceValue::from_minor_units(-5).to_string(), "-0.05");
    }

    #[test]
    fn parse_accepts_common_forms() {
        assert_eq!("5.99".parse(), Ok(PriceValue::new(5, 99).unwrap()));
        assert_eq!("18".parse(), Ok(PriceValue::new(18, 0).unwrap()));
        assert_eq!("0.5".parse(), Ok(PriceValue::new(0, 50).unwrap()));
        assert_eq!(" 10.99 ".parse(), Ok(PriceValue::new(10, 99).unwrap()));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("abc".parse::<PriceValue>().is_err());
        assert!("5.999".parse::<PriceValue>().is_err());
        assert!("5.".parse::<PriceValue>().is_err());
        assert!("5.x".parse::<PriceValue>().is_err());
    }

    #[test]
    fn new_rejects_major_that_overflows_minor_units() {
        assert_eq!(
            PriceValue::new(i64::MAX / 100 + 1, 0),
            Err(PriceError::OutOfRange {
                major: i64::MAX / 100 + 1,
                minor: 0
            })
        );
        assert!(PriceValue::new(i64::MIN, 0).is_err());
        assert!(PriceValue::new(i64::MAX / 100, 8).is_err());
        assert_eq!(
            PriceValue::new(i64::MAX / 100, 7).unwrap().to_minor_units(),
            i64::MAX
        );
    }

    #[test]
    fn parse_rejects_major_that_overflows_minor_units() {
        assert!(matches!(
            "99999999999999999".parse::<PriceValue>(),
            Err(PriceError::Parse(_))
        ));
        assert!("-99999999999999999.50".parse::<PriceValue>().is_err());
        assert!("92233720368547758.07".parse::<PriceValue>().is_ok());
    }

    #[test]
    fn minor_units_extremes_roundtrip() {
        for units in [i64::MAX, i64::MIN, i64::MAX - 1, i64::MIN + 1] {
            let price = PriceValue::from_minor_units(units);
            assert_eq!(price.to_minor_units(), units);
            let json = serde_json::to_value(price).unwrap();
            assert_eq!(serde_json::from_value::<PriceValue>(json).unwrap(), price);
        }
    }

    #[test]
    fn parse_negative_values() {
        assert_eq!(
            "-0.05".parse::<PriceValue>().unwrap(),
            PriceValue::from_minor_units(-5)
        );
        assert_eq!(
            "-10.50".parse::<PriceValue>().unwrap(),
            PriceValue::from_minor_units(-1_050)
        );
    }

    #[test]
    fn deserialize_rejects_minor_out_of_range() {
        for raw in [
            serde_json::json!({"major": 0, "minor": 150}),
            serde_json::json!({"major": 5, "minor": 100}),
            serde_json::json!({"major": 0, "minor": -100}),
            serde_json::json!({"major": 5, "minor": -5}),
        ] {
            assert!(
                serde_json::from_value::<PriceValue>(raw.clone()).is_err(),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn deserialize_rejects_major_that_overflows_minor_units() {
        let raw = serde_json::json!({"major": i64::MAX, "minor": 0});
        assert!(serde_json::from_value::<PriceValue>(raw).is_err());
    }

    #[test]
    fn deserialize_accepts_negative_decomposition() {
        let raw = serde_json::json!({"major": -10, "minor": -50});
        assert_eq!(
            serde_json::from_value::<PriceValue>(raw).unwrap(),
            PriceValue::from_minor_units(-1_050)
        );
    }

    #[test]
    fn serialization_roundtrip() {
        let price = PriceValue::new(10, 99).unwrap();
        let json = serde_json::to_value(price).unwrap();
        assert_eq!(json, serde_json::json!({"major": 10, "minor": 99}));
        let back: PriceValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, price);
    }
}
