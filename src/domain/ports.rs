use crate::domain::model::{Customer, CustomerId, Rate, RateId};
use crate::utils::error::Result;

/// Read side of the rate catalog. Each call returns a consistent snapshot.
pub trait RateCatalog: Send + Sync {
    fn all_rates(&self) -> Result<Vec<Rate>>;
}

/// Write side of the rate catalog, used by the rate service only.
pub trait RateRepository: RateCatalog {
    fn find_rate(&self, id: RateId) -> Result<Option<Rate>>;

    /// Stores the rate, assigning an id when it has none, and returns the
    /// stored value.
    fn save_rate(&self, rate: Rate) -> Result<Rate>;

    /// Returns whether a rate was removed.
    fn delete_rate(&self, id: RateId) -> Result<bool>;
}

pub trait CustomerDirectory: Send + Sync {
    fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>>;
}

impl<T: RateCatalog + ?Sized> RateCatalog for &T {
    fn all_rates(&self) -> Result<Vec<Rate>> {
        (**self).all_rates()
    }
}

impl<T: CustomerDirectory + ?Sized> CustomerDirectory for &T {
    fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        (**self).find_customer(id)
    }
}
