use anyhow::Context;
use clap::Parser;
use ecar_billing::app::check_rate_drafts;
use ecar_billing::config::Command;
use ecar_billing::utils::{logger, validation::Validate};
use ecar_billing::{BillingApp, BillingConfig, BillingError, CliConfig, ErrorKind};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Load configuration
    let config = BillingConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load config file '{}'", cli.config))?;

    // Logging
    let format = config.log_format().unwrap_or_default();
    logger::init_logger(&config.logging.level, cli.verbose, format);
    tracing::debug!("CLI config: {:?}", cli);

    // Validate configuration
    if let Err(e) = config.validate() {
        fail(&e);
    }

    match cli.command {
        Command::Check => {
            let problems = check_rate_drafts(config.rate_drafts()?);
            if problems.is_empty() {
                println!("✅ {} rates, no conflicts", config.rates.len());
                return Ok(());
            }
            for (index, e) in &problems {
                eprintln!("❌ rates[{}]: {}", index, e);
            }
            std::process::exit(exit_code(ErrorKind::Integrity));
        }
        Command::Rates => {
            let app = BillingApp::from_config(&config).unwrap_or_else(|e| fail(&e));
            for rate in app.rate_service().rates()? {
                println!("{}", rate);
            }
        }
        Command::Quote {
            customer_id,
            start,
            end,
            json,
        } => {
            let app = BillingApp::from_config(&config).unwrap_or_else(|e| fail(&e));
            match app.quote(customer_id, &start, &end) {
                Ok(quote) if json => println!("{}", serde_json::to_string_pretty(&quote)?),
                Ok(quote) => println!("{}", quote.total),
                Err(e) => fail(&e),
            }
        }
    }

    Ok(())
}

fn fail(e: &BillingError) -> ! {
    tracing::error!("❌ {} (Kind: {:?})", e, e.kind());
    eprintln!("❌ {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.kind()));
}

fn exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::InvalidInput | ErrorKind::Integrity => 1,
        ErrorKind::NotFound => 2,
        ErrorKind::NotReady => 3,
        ErrorKind::Configuration => 4,
        ErrorKind::System => 5,
    }
}
