mod watch;

use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use powerwatch_core::{AppConfig, ClassifierKeywords, SiteClock};
use powerwatch_monitor::{Monitor, PublishPolicy, RecheckDelay, StateStore};
use powerwatch_scraper::{ShutdownsClient, ShutdownsQuery};
use powerwatch_telegram::TelegramClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "powerwatch")]
#[command(about = "Power outage monitor with Telegram notifications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one polling cycle (the default)
    Run,
    /// Run cycles on the configured cron schedule until interrupted
    Watch,
    /// Fetch and classify the current status without notifying
    Status,
    /// Delete the stored notification state
    Reset,
}

pub(crate) type LiveMonitor = Monitor<ShutdownsClient, TelegramClient>;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run);

    if matches!(command, Commands::Reset) {
        return reset(&powerwatch_core::state_path_from_env());
    }

    let config = powerwatch_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Run => {
            let monitor = build_monitor(&config)?;
            match monitor.run_cycle().await {
                Ok(outcome) => {
                    tracing::info!(outcome = ?outcome, "cycle complete");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    tracing::error!(error = %e, "cycle failed");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Watch => {
            let monitor = build_monitor(&config)?;
            watch::run(monitor, &config.schedule).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status => {
            let monitor = build_monitor(&config)?;
            print_status(&monitor).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Reset => reset(&config.state_path),
    }
}

/// Delete the state file; needs nothing from the config but its path.
fn reset(state_path: &Path) -> anyhow::Result<ExitCode> {
    let store = StateStore::new(state_path);
    if store.clear()? {
        println!("removed {}", store.path().display());
    } else {
        println!("no state file at {}", store.path().display());
    }
    Ok(ExitCode::SUCCESS)
}

fn build_monitor(config: &AppConfig) -> anyhow::Result<LiveMonitor> {
    let keywords = match &config.keywords_path {
        Some(path) => powerwatch_core::load_keywords(path)?,
        None => ClassifierKeywords::default(),
    };

    let source = ShutdownsClient::new(
        &config.shutdowns_page,
        ShutdownsQuery {
            city: config.city.clone(),
            street: config.street.clone(),
            house: config.house.clone(),
        },
        config.request_timeout_secs,
        &config.user_agent,
        config.site_tz,
    )?;

    let transport = TelegramClient::with_base_url(
        &config.telegram_bot_token,
        &config.telegram_chat_id,
        config.request_timeout_secs,
        &config.telegram_api_base,
    )?;

    Ok(Monitor::new(
        source,
        transport,
        StateStore::new(&config.state_path),
        keywords,
        SiteClock::new(config.site_tz),
    )
    .with_recheck_delay(RecheckDelay::from_secs(
        config.recovery_delay_min_secs,
        config.recovery_delay_max_secs,
    ))
    .with_policy(PublishPolicy {
        new_message_each_day: config.new_message_each_day,
    }))
}

async fn print_status(monitor: &LiveMonitor) -> anyhow::Result<()> {
    let inspection = monitor.inspect().await?;
    let raw = &inspection.raw;

    println!("outage:       {}", inspection.signal.is_outage);
    println!("category:     {}", inspection.signal.category);
    println!("phase:        {:?}", inspection.phase);
    println!("next action:  {:?}", inspection.decision);
    println!("fingerprint:  {}", inspection.fingerprint);
    println!("sub type:     {}", raw.sub_type());
    println!("start:        {}", raw.start_date().unwrap_or("-"));
    println!("end:          {}", raw.end_date().unwrap_or("-"));
    println!(
        "updated:      {}",
        raw.update_timestamp.as_deref().unwrap_or("-")
    );
    println!(
        "live message: {}",
        inspection.state.message_id.as_deref().unwrap_or("-")
    );
    Ok(())
}
