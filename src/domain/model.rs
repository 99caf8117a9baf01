use crate::domain::interval::DayTimeInterval;
use crate::utils::error::{BillingError, Result};
use crate::utils::validation::validate_fraction;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type RateId = u32;
pub type CustomerId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub vip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    Basic,
    Special(DayTimeInterval),
}

/// A per-minute charge. `id` is `None` until the rate has been stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Rate {
    pub id: Option<RateId>,
    pub minute_rate: Decimal,
    pub kind: RateKind,
}

impl Rate {
    pub fn basic(minute_rate: Decimal) -> Self {
        Self {
            id: None,
            minute_rate,
            kind: RateKind::Basic,
        }
    }

    pub fn special(minute_rate: Decimal, window: DayTimeInterval) -> Self {
        Self {
            id: None,
            minute_rate,
            kind: RateKind::Special(window),
        }
    }

    pub fn with_id(mut self, id: RateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_basic(&self) -> bool {
        matches!(self.kind, RateKind::Basic)
    }

    pub fn window(&self) -> Option<DayTimeInterval> {
        match self.kind {
            RateKind::Special(window) => Some(window),
            RateKind::Basic => None,
        }
    }

    /// Two rates are the same catalog entry only if both have been stored
    /// under the same id.
    pub fn shares_identity(&self, other: &Rate) -> bool {
        self.id.is_some() && self.id == other.id
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = self.id {
            write!(f, "#{} ", id)?;
        }
        match self.kind {
            RateKind::Basic => write!(f, "Basic rate: {}/min", self.minute_rate),
            RateKind::Special(window) => {
                write!(f, "Special rate: {}/min, window {}", self.minute_rate, window)
            }
        }
    }
}

/// Partial rate description used when creating or updating a rate.
/// Both hours present means a special rate, both absent a basic one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateDraft {
    pub id: Option<RateId>,
    pub minute_rate: Option<Decimal>,
    pub start_hour: Option<NaiveTime>,
    pub end_hour: Option<NaiveTime>,
}

impl RateDraft {
    pub fn basic(minute_rate: Decimal) -> Self {
        Self {
            minute_rate: Some(minute_rate),
            ..Default::default()
        }
    }

    pub fn special(minute_rate: Decimal, start_hour: NaiveTime, end_hour: NaiveTime) -> Self {
        Self {
            minute_rate: Some(minute_rate),
            start_hour: Some(start_hour),
            end_hour: Some(end_hour),
            ..Default::default()
        }
    }
}

/// Fractional price reduction for VIP customers, within `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VipDiscount(Decimal);

impl VipDiscount {
    pub fn new(fraction: Decimal) -> Result<Self> {
        validate_fraction("vip_discount", fraction)?;
        Ok(Self(fraction))
    }

    pub fn none() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn fraction(&self) -> Decimal {
        self.0
    }

    pub fn apply(&self, total: Decimal) -> Decimal {
        total * (Decimal::ONE - self.0)
    }
}

impl FromStr for VipDiscount {
    type Err = BillingError;

    /// Accepts `"10%"`, `"12.5%"` or a plain fraction such as `"0.1"`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let invalid = |reason: String| BillingError::InvalidValueError {
            field: "vip_discount".to_string(),
            value: s.to_string(),
            reason,
        };

        let fraction = match trimmed.strip_suffix('%') {
            Some(percent) => {
                Decimal::from_str(percent.trim()).map_err(|e| invalid(e.to_string()))?
                    / Decimal::ONE_HUNDRED
            }
            None => Decimal::from_str(trimmed).map_err(|e| invalid(e.to_string()))?,
        };
        Self::new(fraction)
    }
}

impl fmt::Display for VipDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}
