use crate::adapters::{InMemoryCustomerDirectory, InMemoryRateRepository};
use crate::config::BillingConfig;
use crate::core::calculator::{PriceCalculator, Quote};
use crate::core::rate_service::RateService;
use crate::domain::interval::SessionInterval;
use crate::domain::model::{CustomerId, RateDraft, VipDiscount};
use crate::utils::error::{BillingError, Result};
use crate::utils::time_format::parse_timestamp;

pub type AppCalculator<'a> =
    PriceCalculator<&'a RateService<InMemoryRateRepository>, &'a InMemoryCustomerDirectory>;

/// Wires the in-memory catalog, the customer directory and the configured
/// discount into a ready-to-use pricing engine.
pub struct BillingApp {
    rates: RateService<InMemoryRateRepository>,
    customers: InMemoryCustomerDirectory,
    vip_discount: VipDiscount,
}

impl BillingApp {
    pub fn new(customers: InMemoryCustomerDirectory, vip_discount: VipDiscount) -> Self {
        Self {
            rates: RateService::new(InMemoryRateRepository::new()),
            customers,
            vip_discount,
        }
    }

    /// Loads customers and seeds the configured rates. Seeding goes through
    /// the rate service, so a conflicting configuration fails here.
    pub fn from_config(config: &BillingConfig) -> Result<Self> {
        let customers = match &config.customers.file {
            Some(file) => InMemoryCustomerDirectory::from_json_file(file)?,
            None => {
                tracing::warn!("No customers file configured, every quote will fail");
                InMemoryCustomerDirectory::default()
            }
        };

        let app = Self::new(customers, config.vip_discount()?);
        let seeded = app.seed_rates(config.rate_drafts()?)?;
        tracing::info!("{} rates loaded, VIP discount {}", seeded, app.vip_discount);
        Ok(app)
    }

    pub fn seed_rates(&self, drafts: Vec<RateDraft>) -> Result<usize> {
        let count = drafts.len();
        for draft in drafts {
            self.rates.create(draft)?;
        }
        Ok(count)
    }

    pub fn rate_service(&self) -> &RateService<InMemoryRateRepository> {
        &self.rates
    }

    pub fn calculator(&self) -> AppCalculator<'_> {
        PriceCalculator::new(&self.rates, &self.customers, self.vip_discount)
    }

    /// Prices a session given boundary timestamps such as `20190405T1000`.
    pub fn quote(&self, customer_id: CustomerId, start: &str, end: &str) -> Result<Quote> {
        let session = SessionInterval::new(
            parse_timestamp("start", start)?,
            parse_timestamp("end", end)?,
        )?;
        self.calculator().quote(customer_id, &session)
    }
}

/// Seeds every draft into an empty catalog and returns the ones rejected,
/// by position, instead of stopping at the first failure.
pub fn check_rate_drafts(drafts: Vec<RateDraft>) -> Vec<(usize, BillingError)> {
    let service = RateService::new(InMemoryRateRepository::new());
    drafts
        .into_iter()
        .enumerate()
        .filter_map(|(index, draft)| service.create(draft).err().map(|e| (index, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Customer;
    use crate::utils::error::ErrorKind;
    use chrono::NaiveTime;
    use rust_decimal_macros::dec;

    fn hm(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    fn app() -> BillingApp {
        let customers = InMemoryCustomerDirectory::new([
            Customer { id: 1, vip: false },
            Customer { id: 2, vip: true },
        ]);
        BillingApp::new(customers, VipDiscount::new(dec!(0.1)).unwrap())
    }

    #[test]
    fn test_quote_from_boundary_timestamps() {
        let app = app();
        app.seed_rates(vec![
            RateDraft::basic(dec!(0.1)),
            RateDraft::special(dec!(0.08), hm(15), hm(22)),
        ])
        .unwrap();

        let quote = app.quote(1, "20190405T1000", "20190405T2000").unwrap();
        assert_eq!(quote.total, dec!(54.0));
    }

    #[test]
    fn test_quote_rejects_reversed_session() {
        let app = app();
        app.seed_rates(vec![RateDraft::basic(dec!(0.1))]).unwrap();

        let err = app.quote(1, "20190405T2000", "20190405T1000").unwrap_err();
        assert!(matches!(err, BillingError::InvalidRange { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_quote_rejects_malformed_timestamp() {
        let app = app();
        assert!(matches!(
            app.quote(1, "2019-04-05", "20190405T1000"),
            Err(BillingError::InvalidValueError { .. })
        ));
    }

    #[test]
    fn test_quote_without_basic_rate_is_not_ready() {
        let app = app();
        let err = app.quote(2, "20190405T1000", "20190405T2000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotReady);
    }

    #[test]
    fn test_check_reports_every_rejected_draft() {
        let problems = check_rate_drafts(vec![
            RateDraft::basic(dec!(0.1)),
            RateDraft::basic(dec!(0.2)),
            RateDraft::special(dec!(0.08), hm(1), hm(3)),
            RateDraft::special(dec!(0.08), hm(2), hm(4)),
            RateDraft::special(dec!(0.08), hm(3), hm(5)),
        ]);

        let rejected: Vec<usize> = problems.iter().map(|(index, _)| *index).collect();
        assert_eq!(rejected, vec![1, 3]);
        assert!(matches!(problems[0].1, BillingError::DuplicateBasicRate));
    }
}
