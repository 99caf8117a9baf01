use crate::domain::model::{Rate, RateId};
use crate::domain::ports::{RateCatalog, RateRepository};
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct RateTable {
    rates: BTreeMap<RateId, Rate>,
    last_id: RateId,
}

/// Rate repository kept in process memory. Ids are assigned in increasing
/// order and never reused.
#[derive(Debug, Default)]
pub struct InMemoryRateRepository {
    table: RwLock<RateTable>,
}

impl InMemoryRateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RateTable> {
        self.table.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RateTable> {
        self.table.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RateCatalog for InMemoryRateRepository {
    fn all_rates(&self) -> Result<Vec<Rate>> {
        Ok(self.read().rates.values().cloned().collect())
    }
}

impl RateRepository for InMemoryRateRepository {
    fn find_rate(&self, id: RateId) -> Result<Option<Rate>> {
        Ok(self.read().rates.get(&id).cloned())
    }

    fn save_rate(&self, mut rate: Rate) -> Result<Rate> {
        let mut table = self.write();
        let id = match rate.id {
            Some(id) => {
                table.last_id = table.last_id.max(id);
                id
            }
            None => {
                table.last_id += 1;
                table.last_id
            }
        };
        rate.id = Some(id);
        table.rates.insert(id, rate.clone());
        Ok(rate)
    }

    fn delete_rate(&self, id: RateId) -> Result<bool> {
        Ok(self.write().rates.remove(&id).is_some())
    }
}
