use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use dk_wage_engine::api::{AppState, create_router};
use dk_wage_engine::calculator::{CalculationOptions, ConversionOptions};
use dk_wage_engine::config::ConfigLoader;
use dk_wage_engine::format::Breakdown;
use dk_wage_engine::init_tracing;
use dk_wage_engine::models::{RawWageInput, ValidationPolicy};

mod cli;

use cli::{CalculateArgs, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let mut config = ConfigLoader::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?
        .into_config();

    match args.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server_mut().bind_address = bind;
            }
            serve(AppState::from_config(config)?).await
        }
        Commands::Calculate(calc_args) => {
            calculate(AppState::from_config(config)?, calc_args).await
        }
    }
}

async fn serve(state: AppState) -> Result<()> {
    let addr = state.config().server().bind_address.clone();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(address = %addr, "Wage engine API listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn calculate(state: AppState, args: CalculateArgs) -> Result<()> {
    let raw = RawWageInput {
        hours_worked: args.hours,
        minutes_worked: args.minutes,
        hourly_rate: args.rate,
        personal_deduction: args.deduction,
        tip: args.tip,
        other_tax_percent: args.other_tax,
    };

    let policy = if args.strict {
        Some(ValidationPolicy::Strict)
    } else if args.lenient {
        Some(ValidationPolicy::Lenient)
    } else {
        None
    };

    let conversion = match args.currency {
        Some(code) => Some(ConversionOptions {
            currency: code.parse()?,
            manual_rate: args.manual_rate,
            prefer_manual: args.prefer_manual,
            include_holiday_pay: args.holiday,
        }),
        None => None,
    };

    let options = CalculationOptions {
        policy,
        include_holiday_pay: args.holiday,
        conversion,
    };

    let calc = state.calculator().calculate(&raw, &options).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&calc)?);
    } else {
        print!("{}", Breakdown(&calc));
    }
    Ok(())
}
