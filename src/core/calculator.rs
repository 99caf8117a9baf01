use crate::core::intersection::session_overlap_minutes;
use crate::domain::interval::SessionInterval;
use crate::domain::model::{CustomerId, Rate, VipDiscount};
use crate::domain::ports::{CustomerDirectory, RateCatalog};
use crate::utils::error::{BillingError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Cost breakdown of one charging session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub customer_id: CustomerId,
    pub vip: bool,
    pub total_minutes: i64,
    pub special_minutes: i64,
    pub basic_minutes: i64,
    pub special_cost: Decimal,
    pub basic_cost: Decimal,
    /// Fraction taken off the undiscounted cost, zero for regular customers.
    pub discount: Decimal,
    /// Rounded to two decimal places.
    pub total: Decimal,
}

/// Prices charging sessions against the rate catalog. Holds no mutable
/// state; every call reads a fresh catalog snapshot.
pub struct PriceCalculator<R: RateCatalog, C: CustomerDirectory> {
    rates: R,
    customers: C,
    vip_discount: VipDiscount,
}

impl<R: RateCatalog, C: CustomerDirectory> PriceCalculator<R, C> {
    pub fn new(rates: R, customers: C, vip_discount: VipDiscount) -> Self {
        Self {
            rates,
            customers,
            vip_discount,
        }
    }

    /// Total cost of the session, rounded half-up to two decimal places.
    pub fn calculate(&self, customer_id: CustomerId, session: &SessionInterval) -> Result<Decimal> {
        Ok(self.quote(customer_id, session)?.total)
    }

    pub fn quote(&self, customer_id: CustomerId, session: &SessionInterval) -> Result<Quote> {
        let customer = self
            .customers
            .find_customer(customer_id)?
            .ok_or(BillingError::NoSuchCustomer { id: customer_id })?;

        let rates = self.rates.all_rates()?;

        let mut special_minutes = 0;
        let mut special_cost = Decimal::ZERO;
        for rate in &rates {
            if let Some(window) = rate.window() {
                let minutes = session_overlap_minutes(session, &window);
                tracing::debug!("{} minutes charged at {}", minutes, rate);
                special_minutes += minutes;
                special_cost += Decimal::from(minutes) * rate.minute_rate;
            }
        }

        let basic_rate = basic_rate(&rates)?;
        let total_minutes = session.total_minutes();
        let mut basic_minutes = total_minutes - special_minutes;
        if basic_minutes < 0 {
            tracing::warn!(
                "Special windows cover {} of {} session minutes; catalog has overlapping windows",
                special_minutes,
                total_minutes
            );
            basic_minutes = 0;
        }
        let basic_cost = Decimal::from(basic_minutes) * basic_rate;

        let undiscounted = special_cost + basic_cost;
        let (discount, discounted) = if customer.vip {
            (self.vip_discount.fraction(), self.vip_discount.apply(undiscounted))
        } else {
            (Decimal::ZERO, undiscounted)
        };
        let total = round_money(discounted);

        tracing::debug!(
            "Customer {} charged {} for {} minutes ({} special)",
            customer_id,
            total,
            total_minutes,
            special_minutes
        );

        Ok(Quote {
            customer_id,
            vip: customer.vip,
            total_minutes,
            special_minutes,
            basic_minutes,
            special_cost,
            basic_cost,
            discount,
            total,
        })
    }
}

fn basic_rate(rates: &[Rate]) -> Result<Decimal> {
    rates
        .iter()
        .find(|rate| rate.is_basic())
        .map(|rate| rate.minute_rate)
        .ok_or_else(|| BillingError::RateDataIncomplete {
            message: "Basic rate is missing".to_string(),
        })
}

/// Two decimal places, halves rounded away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interval::DayTimeInterval;
    use crate::domain::model::Customer;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    struct FixedRates(Vec<Rate>);

    impl RateCatalog for FixedRates {
        fn all_rates(&self) -> Result<Vec<Rate>> {
            Ok(self.0.clone())
        }
    }

    struct FixedCustomers(HashMap<CustomerId, Customer>);

    impl FixedCustomers {
        fn regular_and_vip() -> Self {
            Self(HashMap::from([
                (1, Customer { id: 1, vip: false }),
                (2, Customer { id: 2, vip: true }),
            ]))
        }
    }

    impl CustomerDirectory for FixedCustomers {
        fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
            Ok(self.0.get(&id).cloned())
        }
    }

    /// Counts catalog reads.
    struct CountingRates {
        reads: std::sync::atomic::AtomicUsize,
    }

    impl RateCatalog for CountingRates {
        fn all_rates(&self) -> Result<Vec<Rate>> {
            self.reads.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 4, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn ten_hours() -> SessionInterval {
        SessionInterval::new(at(10, 0), at(20, 0)).unwrap()
    }

    fn special(rate: Decimal, start: u32, end: u32) -> Rate {
        Rate::special(
            rate,
            DayTimeInterval::new(
                NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
            ),
        )
    }

    fn calculator(rates: Vec<Rate>) -> PriceCalculator<FixedRates, FixedCustomers> {
        PriceCalculator::new(
            FixedRates(rates),
            FixedCustomers::regular_and_vip(),
            VipDiscount::new(dec!(0.1)).unwrap(),
        )
    }

    #[test]
    fn test_unknown_customer() {
        let rates = CountingRates {
            reads: Default::default(),
        };
        let calc = PriceCalculator::new(&rates, FixedCustomers::regular_and_vip(), VipDiscount::none());

        let err = calc.calculate(99, &ten_hours()).unwrap_err();
        assert_eq!(err.to_string(), "Customer with id 99 does not exist");
        assert_eq!(rates.reads.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_basic_rate() {
        let calc = calculator(vec![]);
        assert!(matches!(
            calc.calculate(1, &ten_hours()),
            Err(BillingError::RateDataIncomplete { .. })
        ));
    }

    #[test]
    fn test_missing_basic_rate_even_when_specials_cover_session() {
        let calc = calculator(vec![special(dec!(0.08), 9, 21)]);
        assert!(matches!(
            calc.calculate(1, &ten_hours()),
            Err(BillingError::RateDataIncomplete { .. })
        ));
    }

    #[test]
    fn test_basic_rate_only() {
        let calc = calculator(vec![Rate::basic(dec!(0.1))]);
        assert_eq!(calc.calculate(1, &ten_hours()).unwrap(), dec!(60.0));
    }

    #[test]
    fn test_basic_and_special_rate() {
        let calc = calculator(vec![Rate::basic(dec!(0.1)), special(dec!(0.08), 15, 22)]);
        let quote = calc.quote(1, &ten_hours()).unwrap();

        assert_eq!(quote.special_minutes, 300);
        assert_eq!(quote.basic_minutes, 300);
        assert_eq!(quote.total, dec!(54.0));
    }

    #[test]
    fn test_vip_discount() {
        let calc = calculator(vec![Rate::basic(dec!(0.24))]);
        let quote = calc.quote(2, &ten_hours()).unwrap();

        assert!(quote.vip);
        assert_eq!(quote.discount, dec!(0.1));
        assert_eq!(quote.total, dec!(129.6));
    }

    #[test]
    fn test_discount_is_injected() {
        let calc = PriceCalculator::new(
            FixedRates(vec![Rate::basic(dec!(0.24))]),
            FixedCustomers::regular_and_vip(),
            VipDiscount::new(dec!(0.25)).unwrap(),
        );
        assert_eq!(calc.calculate(2, &ten_hours()).unwrap(), dec!(108));
        assert_eq!(calc.calculate(1, &ten_hours()).unwrap(), dec!(144));
    }

    #[test]
    fn test_special_rate_across_midnight_and_days() {
        let calc = calculator(vec![Rate::basic(dec!(0.2)), special(dec!(0.05), 22, 6)]);
        let start = NaiveDate::from_ymd_opt(2019, 4, 5)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 4, 7)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let session = SessionInterval::new(start, end).unwrap();

        let quote = calc.quote(1, &session).unwrap();
        assert_eq!(quote.total_minutes, 36 * 60);
        assert_eq!(quote.special_minutes, 16 * 60);
        // 960 * 0.05 + 1200 * 0.2
        assert_eq!(quote.total, dec!(288));
    }

    #[test]
    fn test_session_with_seconds_counts_whole_minutes() {
        let calc = calculator(vec![Rate::basic(dec!(0.1)), special(dec!(1.0), 10, 11)]);
        let start = NaiveDate::from_ymd_opt(2019, 4, 5)
            .unwrap()
            .and_hms_opt(10, 0, 59)
            .unwrap();
        let session = SessionInterval::new(start, at(10, 2)).unwrap();

        let quote = calc.quote(1, &session).unwrap();
        assert_eq!(quote.total_minutes, 2);
        assert_eq!(quote.special_minutes, 2);
        assert_eq!(quote.basic_minutes, 0);
        assert_eq!(quote.total, dec!(2));
    }

    #[test]
    fn test_rounding_half_up() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(1.0049)), dec!(1.00));
        assert_eq!(round_money(dec!(2.675)), dec!(2.68));
    }

    #[test]
    fn test_inconsistent_catalog_never_charges_negative_basic_minutes() {
        let calc = calculator(vec![
            Rate::basic(dec!(0.1)),
            special(dec!(0.01), 9, 21),
            special(dec!(0.01), 8, 22),
        ]);
        let quote = calc.quote(1, &ten_hours()).unwrap();
        assert_eq!(quote.basic_minutes, 0);
        assert_eq!(quote.total, dec!(12));
    }
}
