pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::BillingApp;
pub use config::BillingConfig;
pub use crate::core::calculator::{PriceCalculator, Quote};
pub use crate::core::overlap::OverlapValidator;
pub use crate::core::rate_service::RateService;
pub use domain::interval::{DayTimeInterval, SessionInterval};
pub use domain::model::{Customer, CustomerId, Rate, RateDraft, RateId, RateKind, VipDiscount};
pub use utils::error::{BillingError, ErrorKind, Result};
