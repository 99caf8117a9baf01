use crate::core::overlap::OverlapValidator;
use crate::domain::interval::DayTimeInterval;
use crate::domain::model::{Rate, RateDraft, RateId, RateKind};
use crate::domain::ports::{RateCatalog, RateRepository};
use crate::utils::error::{BillingError, Result};
use crate::utils::validation::{validate_non_negative, validate_paired, validate_required_field};
use std::sync::{Mutex, MutexGuard};

/// Creates, updates and deletes rates, checking catalog integrity before
/// every write.
pub struct RateService<R: RateRepository> {
    repository: R,
    validator: OverlapValidator,
    // Held across validate-then-save so concurrent writers never validate
    // against the same snapshot.
    write_lock: Mutex<()>,
}

impl<R: RateRepository> RateService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            validator: OverlapValidator::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn rates(&self) -> Result<Vec<Rate>> {
        self.repository.all_rates()
    }

    pub fn create(&self, draft: RateDraft) -> Result<Rate> {
        if let Some(id) = draft.id {
            return Err(BillingError::InvalidValueError {
                field: "id".to_string(),
                value: id.to_string(),
                reason: "New rates must not carry an id, use update instead".to_string(),
            });
        }
        let minute_rate = *validate_required_field("minute_rate", &draft.minute_rate)?;
        validate_non_negative("minute_rate", minute_rate)?;
        validate_paired("start_hour", &draft.start_hour, "end_hour", &draft.end_hour)?;

        let rate = match (draft.start_hour, draft.end_hour) {
            (Some(start), Some(end)) => {
                Rate::special(minute_rate, DayTimeInterval::new(start, end))
            }
            _ => Rate::basic(minute_rate),
        };

        let _guard = self.lock();
        self.validator.validate(&rate, &self.repository.all_rates()?)?;
        let saved = self.repository.save_rate(rate)?;
        tracing::info!("Created {}", saved);
        Ok(saved)
    }

    /// Applies the fields present in `draft` to the stored rate `id`. Hours
    /// are ignored for basic rates; the kind of a rate never changes.
    pub fn update(&self, id: RateId, draft: RateDraft) -> Result<Rate> {
        if let Some(minute_rate) = draft.minute_rate {
            validate_non_negative("minute_rate", minute_rate)?;
        }

        let _guard = self.lock();
        let mut rate = self
            .repository
            .find_rate(id)?
            .ok_or(BillingError::NoSuchRate { id })?;

        if let Some(minute_rate) = draft.minute_rate {
            rate.minute_rate = minute_rate;
        }
        if let RateKind::Special(window) = rate.kind {
            rate.kind = RateKind::Special(DayTimeInterval::new(
                draft.start_hour.unwrap_or(window.start()),
                draft.end_hour.unwrap_or(window.end()),
            ));
        }

        self.validator.validate(&rate, &self.repository.all_rates()?)?;
        let saved = self.repository.save_rate(rate)?;
        tracing::info!("Updated {}", saved);
        Ok(saved)
    }

    /// Deleting an unknown id is not an error.
    pub fn delete(&self, id: RateId) -> Result<bool> {
        let _guard = self.lock();
        let removed = self.repository.delete_rate(id)?;
        if removed {
            tracing::info!("Deleted rate #{}", id);
        } else {
            tracing::debug!("Rate #{} not found, nothing deleted", id);
        }
        Ok(removed)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<R: RateRepository> RateCatalog for RateService<R> {
    fn all_rates(&self) -> Result<Vec<Rate>> {
        self.repository.all_rates()
    }
}
