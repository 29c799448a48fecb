// Main entry point
use chrono::{Local, NaiveTime};
use clap::Parser;
use colored::Colorize;
use dinefind::application;
use dinefind::domain::model::{time_of_day, SearchRequest};
use dinefind::domain::traits::CacheStore;
use dinefind::infrastructure::{self, config::load_config};
use dinefind::interfaces::cli::Cli;
use dinefind::presentation::{format::format_response, theme::Theme};
use dinefind::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nInterrupted, shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if cli.generate_config {
        infrastructure::config::generate_config_sample()?;
        return Ok(());
    }

    let db_path = infrastructure::config::get_database_path(&config);
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let db_conn = infrastructure::storage::db::init_database(&db_path).await?;
    let state = AppState::new(db_conn, config.clone());

    if let Some(path) = &cli.import {
        tokio::select! {
            result = application::import::import_file(&state.repository, path) => {
                let summary = result?;
                println!(
                    "Imported {} restaurants and {} menus",
                    summary.restaurants, summary.menus
                );
            }
            _ = shutdown_rx => {
                eprintln!("Import interrupted");
            }
        }
        return Ok(());
    }
    if cli.status {
        print_status(&state).await?;
        return Ok(());
    }

    let (Some(lat), Some(lon)) = (cli.lat, cli.lon) else {
        eprintln!("{}", "Please provide --lat and --lon".red());
        std::process::exit(1);
    };

    let current = match cli.at.as_deref() {
        Some(raw) => time_of_day::parse(raw)?,
        None => Local::now().time(),
    };

    let query = cli.query.join(" ");
    let mut request = SearchRequest::new(lat, lon);
    if !query.is_empty() {
        request = request.with_query(query.clone());
    }
    request.validate()?;

    let aggregator = state.aggregator(cli.nocache).await;
    let response = if query.is_empty() {
        aggregator.find_close_by(&request, current).await?
    } else if cli.mt {
        aggregator.search_concurrent(&request, current).await
    } else {
        aggregator.search(&request, current).await?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
        let theme = Theme::from_name(theme_name);
        let title = title_for(&query, current, aggregator.serving_radius(current));
        print!("{}", format_response(&title, &response, (lat, lon), &theme));
    }

    Ok(())
}

fn title_for(query: &str, current: NaiveTime, radius_km: f64) -> String {
    let at = time_of_day::format(&current);
    if query.is_empty() {
        format!("Open near you at {} within {} km", at, radius_km)
    } else {
        format!("\"{}\" at {} within {} km", query, at, radius_km)
    }
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &infrastructure::config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

async fn print_status(state: &AppState) -> anyhow::Result<()> {
    println!("{}", "dinefind Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = state.config.read().await;
    let db_path = infrastructure::config::get_database_path(&config);
    println!(
        "Database: {} ({} restaurants)",
        db_path.display(),
        state.repository.count_restaurants().await?
    );
    println!(
        "Cache: {:?}, ttl {}s ({} live entries)",
        config.cache.backend,
        config.cache.ttl_seconds,
        state.cache_store.entry_count().await?
    );
    println!(
        "Serving radius: {} km peak, {} km normal",
        config.search.peak_radius_km, config.search.normal_radius_km
    );
    println!(
        "Config: {}",
        infrastructure::config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );

    Ok(())
}
