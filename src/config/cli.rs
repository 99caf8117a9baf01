use crate::domain::model::CustomerId;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ecar-billing")]
#[command(about = "Prices electric-vehicle charging sessions")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "billing.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Price one charging session
    Quote {
        #[arg(long)]
        customer_id: CustomerId,

        /// Session start, e.g. 20190405T1000
        #[arg(long)]
        start: String,

        /// Session end, e.g. 20190405T2000
        #[arg(long)]
        end: String,

        /// Print the full breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the configured rates
    Rates,
    /// Check the configured rates for conflicts
    Check,
}
