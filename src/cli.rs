use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dk-wage", version, about = "Danish hourly wage calculator")]
pub struct Cli {
    /// Configuration directory
    #[arg(short, long, default_value = "./config/default", global = true, env = "DK_WAGE_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Bind address, overriding server.yaml
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Calculate a single payslip and print the breakdown
    Calculate(CalculateArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct CalculateArgs {
    /// Whole hours worked
    #[arg(long)]
    pub hours: String,

    /// Additional minutes worked (0-59)
    #[arg(long, default_value = "0")]
    pub minutes: String,

    /// Hourly rate in DKK
    #[arg(long)]
    pub rate: String,

    /// Monthly personal deduction in DKK
    #[arg(long, default_value = "0")]
    pub deduction: String,

    /// Tips in DKK
    #[arg(long, default_value = "0")]
    pub tip: String,

    /// Other tax (e.g. church tax), percent of net
    #[arg(long, default_value = "0")]
    pub other_tax: String,

    /// Include holiday pay
    #[arg(long)]
    pub holiday: bool,

    /// Convert into this currency (DKK, USD, EUR, BDT)
    #[arg(long)]
    pub currency: Option<String>,

    /// Manual DKK exchange rate, used when the provider fails
    #[arg(long)]
    pub manual_rate: Option<Decimal>,

    /// Use the manual rate without contacting the provider
    #[arg(long, requires = "manual_rate")]
    pub prefer_manual: bool,

    /// Reject non-numeric input instead of treating it as zero
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Treat non-numeric input as zero
    #[arg(long)]
    pub lenient: bool,

    /// Print the calculation record as JSON instead of the breakdown
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calculate() {
        let cli = Cli::parse_from([
            "dk-wage", "calculate", "--hours", "37", "--minutes", "30", "--rate", "150",
            "--currency", "bdt", "--manual-rate", "17.1", "--holiday",
        ]);

        match cli.command {
            Commands::Calculate(args) => {
                assert_eq!(args.hours, "37");
                assert_eq!(args.minutes, "30");
                assert_eq!(args.deduction, "0");
                assert!(args.holiday);
                assert_eq!(args.currency.as_deref(), Some("bdt"));
                assert_eq!(args.manual_rate, Some(Decimal::new(171, 1)));
            }
            other => panic!("Expected Calculate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_with_bind() {
        let cli = Cli::parse_from(["dk-wage", "serve", "--bind", "0.0.0.0:8080"]);
        assert_eq!(cli.config, PathBuf::from("./config/default"));
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref b) } if b == "0.0.0.0:8080"));
    }

    #[test]
    fn test_strict_and_lenient_conflict() {
        let result = Cli::try_parse_from([
            "dk-wage", "calculate", "--hours", "1", "--rate", "1", "--strict", "--lenient",
        ]);
        assert!(result.is_err());
    }
}
