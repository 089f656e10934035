//! buy-btc - Main Entry Point
//!
//! Runs one buy invocation against bitFlyer and prints the response.

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use std::ffi::OsString;
use std::path::Path;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use buy_btc::config::{load_config, EnvSecretProvider};
use buy_btc::{handle_invocation, InvocationRequest, ProductCode, StrategyRegistry};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Quote-currency amount to spend
    #[arg(long, env = "BUY_BTC_BUDGET")]
    budget: Option<Decimal>,

    /// Pricing strategy id (1 = 98.5% of last trade, anything else = best ask)
    #[arg(long, env = "BUY_BTC_STRATEGY")]
    strategy: Option<u32>,

    /// Product code, e.g. BTC_JPY
    #[arg(long, env = "BUY_BTC_PRODUCT_CODE")]
    product: Option<ProductCode>,

    /// Compute the order but do not submit it
    #[arg(long)]
    dry_run: bool,
}

/// Load `.env` and then parse arguments, so `env` fallbacks can come from the file
fn load_args<I, T>(env_file: Option<&Path>, argv: I) -> std::result::Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match env_file {
        Some(path) => {
            dotenvy::from_path(path).ok();
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    Args::try_parse_from(argv)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = load_args(None, std::env::args_os()).unwrap_or_else(|e| e.exit());

    let mut config = load_config(Some(&args.config))?;
    if let Some(budget) = args.budget {
        config.buy.budget = Some(budget);
    }
    if let Some(strategy) = args.strategy {
        config.buy.strategy = strategy;
    }
    if let Some(product) = args.product {
        config.buy.product_code = product;
    }

    // Initialize logging
    let log_level = args.log_level.as_deref().unwrap_or(&config.settings.log_level);
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting buy-btc");
    info!("Configuration file: {}", args.config);

    // Resolve the strategy once, before touching the network
    let registry = StrategyRegistry::builtin();
    if !registry.contains(config.buy.strategy) {
        warn!(
            strategy_id = config.buy.strategy,
            "Strategy id is not registered, best-ask will be used"
        );
    }

    let mut request = InvocationRequest::from_config(&config)?;
    request.dry_run = args.dry_run;

    let secrets = EnvSecretProvider::new();
    let response = handle_invocation(&config, &secrets, &registry, &request).await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_env_file_feeds_arg_fallbacks() {
        let path = std::env::temp_dir().join(format!("buy_btc_env_{}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "BUY_BTC_BUDGET=4321").unwrap();
        writeln!(file, "BUY_BTC_PRODUCT_CODE=ETH_JPY").unwrap();

        let args = load_args(Some(path.as_path()), ["buy_btc"]).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(args.budget, Some(dec!(4321)));
        assert_eq!(args.product, Some(ProductCode::EthJpy));
    }

    #[test]
    fn test_flags_take_precedence() {
        let args = Args::try_parse_from(["buy_btc", "--budget", "5000", "--strategy", "0", "--dry-run"]).unwrap();
        assert_eq!(args.budget, Some(dec!(5000)));
        assert_eq!(args.strategy, Some(0));
        assert!(args.dry_run);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Args::try_parse_from(["buy_btc", "--strategy", "abc"]).is_err());
        assert!(Args::try_parse_from(["buy_btc", "--budget", "four"]).is_err());
        assert!(Args::try_parse_from(["buy_btc", "--product", "DOGE_JPY"]).is_err());
    }
}
