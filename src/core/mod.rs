pub mod calculator;
pub mod intersection;
pub mod overlap;
pub mod rate_service;

pub use crate::domain::interval::{DayTimeInterval, SessionInterval};
pub use crate::domain::model::{Customer, CustomerId, Rate, RateDraft, RateId, RateKind, VipDiscount};
pub use crate::domain::ports::{CustomerDirectory, RateCatalog, RateRepository};
pub use crate::utils::error::Result;
