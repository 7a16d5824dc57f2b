// cartstore/src/model/price.rs

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

const SUB_CENT_TOLERANCE: f64 = 1e-6;

/// A money amount held as integer cents.
///
/// Catalog payloads and the persisted cart carry prices as JSON decimals
/// (`179.9`); conversion happens at the serde boundary so arithmetic on
/// subtotals and totals stays exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
  cents: i64,
}

impl Price {
  pub const ZERO: Price = Price { cents: 0 };

  pub const fn from_cents(cents: i64) -> Self {
    Price { cents }
  }

  pub const fn cents(self) -> i64 {
    self.cents
  }

  /// Rounds a decimal amount to the nearest cent. `None` for NaN, infinities
  /// and values outside the representable range.
  pub fn from_decimal(value: f64) -> Option<Self> {
    if !value.is_finite() {
      return None;
    }
    let cents = (value * 100.0).round();
    if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
      return None;
    }
    Some(Price { cents: cents as i64 })
  }

  /// Like [`Price::from_decimal`], but `None` when `value` carries a fraction
  /// of a cent (`19.999`). Binary float noise (`179.9 × 100`) is tolerated.
  pub fn from_exact_decimal(value: f64) -> Option<Self> {
    let scaled = value * 100.0;
    if (scaled - scaled.round()).abs() > SUB_CENT_TOLERANCE {
      return None;
    }
    Self::from_decimal(value)
  }

  pub fn as_decimal(self) -> f64 {
    self.cents as f64 / 100.0
  }

  /// `self × quantity`, saturating at the bounds of `i64`.
  pub fn times(self, quantity: u32) -> Self {
    Price {
      cents: self.cents.saturating_mul(i64::from(quantity)),
    }
  }
}

impl Add for Price {
  type Output = Price;

  fn add(self, rhs: Price) -> Price {
    Price {
      cents: self.cents.saturating_add(rhs.cents),
    }
  }
}

impl Sum for Price {
  fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
    iter.fold(Price::ZERO, Add::add)
  }
}

impl fmt::Display for Price {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sign = if self.cents < 0 { "-" } else { "" };
    let abs = self.cents.unsigned_abs();
    f.pad(&format!("{}{}.{:02}", sign, abs / 100, abs % 100))
  }
}

impl Serialize for Price {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.as_decimal())
  }
}

impl<'de> Deserialize<'de> for Price {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Price::from_exact_decimal(raw)
      .ok_or_else(|| de::Error::custom(format!("price {} is not a whole number of cents", raw)))
  }
}
