use crate::domain::model::{Customer, CustomerId};
use crate::domain::ports::CustomerDirectory;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerDirectory {
    customers: HashMap<CustomerId, Customer>,
}

impl InMemoryCustomerDirectory {
    pub fn new(customers: impl IntoIterator<Item = Customer>) -> Self {
        Self {
            customers: customers.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Loads a JSON array such as `[{"id": 1, "vip": true}]`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let directory = Self::from_json_str(&content)?;
        tracing::info!(
            "{} customers loaded from {}",
            directory.len(),
            path.as_ref().display()
        );
        Ok(directory)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let customers: Vec<Customer> = serde_json::from_str(content)?;
        Ok(Self::new(customers))
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerDirectory for InMemoryCustomerDirectory {
    fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.get(&id).cloned())
    }
}
