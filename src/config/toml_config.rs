use crate::domain::model::{RateDraft, VipDiscount};
use crate::utils::error::{BillingError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::time_format::parse_clock;
use crate::utils::validation::{validate_non_negative, validate_paired, validate_path, Validate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingConfig {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub customers: CustomersConfig,
    #[serde(default)]
    pub rates: Vec<RateConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// `"10%"` or a plain fraction such as `"0.1"`.
    pub vip_discount: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            vip_discount: "0%".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomersConfig {
    /// JSON array of customers loaded at startup.
    pub file: Option<String>,
}

/// A rate seeded into the catalog at startup. `start` and `end` (`HH:MM`)
/// make it a special rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateConfig {
    pub minute_rate: Decimal,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RateConfig {
    pub fn to_draft(&self, index: usize) -> Result<RateDraft> {
        let field = |name: &str| format!("rates[{}].{}", index, name);

        validate_non_negative(&field("minute_rate"), self.minute_rate)?;
        validate_paired(&field("start"), &self.start, &field("end"), &self.end)?;

        Ok(RateDraft {
            id: None,
            minute_rate: Some(self.minute_rate),
            start_hour: self
                .start
                .as_deref()
                .map(|s| parse_clock(&field("start"), s))
                .transpose()?,
            end_hour: self
                .end
                .as_deref()
                .map(|s| parse_clock(&field("end"), s))
                .transpose()?,
        })
    }
}

impl BillingConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BillingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from TOML text, substituting `${VAR}` first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BillingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BillingError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn vip_discount(&self) -> Result<VipDiscount> {
        self.pricing.vip_discount.parse()
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        LogFormat::from_name(&self.logging.format).ok_or_else(|| BillingError::InvalidValueError {
            field: "logging.format".to_string(),
            value: self.logging.format.clone(),
            reason: "Valid formats: compact, json".to_string(),
        })
    }

    pub fn rate_drafts(&self) -> Result<Vec<RateDraft>> {
        self.rates
            .iter()
            .enumerate()
            .map(|(index, rate)| rate.to_draft(index))
            .collect()
    }

    /// Checks every field that can be checked without touching the catalog.
    pub fn validate_config(&self) -> Result<()> {
        self.vip_discount()?;
        self.log_format()?;

        if let Some(file) = &self.customers.file {
            validate_path("customers.file", file)?;
        }

        self.rate_drafts()?;
        Ok(())
    }
}

impl Validate for BillingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
