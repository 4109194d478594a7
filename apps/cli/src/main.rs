mod args;
mod config;
mod dirs;
mod logging;

use std::io;
use std::net::SocketAddr;

use app_api::AppContext;
use http_api::{HttpState, generate_token};
use optimizer_app::{AppConfig, AppPaths, AppState, ensure_app_data_dir};
use optimizer_core::{GridQuery, MAX_PAGE_LENGTH};

use args::{Command, ReportKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let args = args::parse_args();

    let loaded = config::load_or_create(args.config.as_deref()).map_err(io::Error::other)?;
    if loaded.created {
        tracing::info!(
            path = %loaded.file.display(),
            port = loaded.config.port,
            "created default config"
        );
    }
    let config = loaded.config;

    let data_dir = dirs::resolve_data_dir(args.data_dir.clone().or_else(|| config.data_dir()))
        .map_err(io::Error::other)?;
    if data_dir.matched_existing {
        tracing::info!(dir = %data_dir.dir.display(), "using existing data dir");
    } else {
        tracing::info!(dir = %data_dir.dir.display(), "using new data dir");
    }

    let paths = AppPaths::new(data_dir.dir.clone());
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;

    let mut app_config = AppConfig::new(paths.db_path);
    app_config.known_plugins_path = config.known_plugins_path();
    let app_state = AppState::new(app_config).map_err(|err| io::Error::other(err.to_string()))?;
    if let Err(err) = app_state.setup_db() {
        return Err(io::Error::other(format!("failed to initialize database: {}", err)).into());
    }

    match args.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            let context = AppContext { app_state };
            serve(context, &config, port.unwrap_or(config.port)).await?;
        }
        Command::Activate => {
            let created = app_state
                .services
                .usage
                .activate()
                .map_err(|err| io::Error::other(err.to_string()))?;
            if created {
                println!("Usage tracking activated.");
            } else {
                println!("Usage tracking was already set up; record is autoloaded again.");
            }
        }
        Command::Deactivate => {
            let updated = app_state
                .services
                .usage
                .deactivate()
                .map_err(|err| io::Error::other(err.to_string()))?;
            if updated {
                println!("Usage record kept but no longer autoloaded.");
            } else {
                println!("No usage record to deactivate.");
            }
        }
        Command::Reset => {
            let record = app_state
                .services
                .usage
                .reset()
                .map_err(|err| io::Error::other(err.to_string()))?;
            println!("Usage record reset at {}.", record.starting_point_date);
        }
        Command::Report { kind, length } => {
            let query = GridQuery {
                length: usize::try_from(length)
                    .ok()
                    .map(|length| length.min(MAX_PAGE_LENGTH)),
                ..GridQuery::default()
            };
            let reports = &app_state.services.reports;
            let json = match kind {
                ReportKind::Unused => serde_json::to_string_pretty(
                    &reports
                        .unused_options(&query)
                        .map_err(|err| io::Error::other(err.to_string()))?,
                )?,
                ReportKind::UsedNotAutoloaded => serde_json::to_string_pretty(
                    &reports
                        .used_not_autoloaded(&query)
                        .map_err(|err| io::Error::other(err.to_string()))?,
                )?,
                ReportKind::Missing => serde_json::to_string_pretty(
                    &reports
                        .options_that_do_not_exist(&query)
                        .map_err(|err| io::Error::other(err.to_string()))?,
                )?,
            };
            println!("{json}");
        }
    }

    Ok(())
}

async fn serve(
    context: AppContext,
    config: &config::CliConfig,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let admin_token = match &config.admin_token {
        Some(token) => token.clone(),
        None => {
            let token = generate_token();
            println!("Admin token for this run: {token}");
            token
        }
    };
    let state = HttpState::new(context, admin_token, generate_token());
    let router = http_api::router(state);

    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    if used_fallback {
        tracing::warn!(
            configured = port,
            actual = actual_port,
            "configured port was unavailable"
        );
    }

    tracing::info!(url = %format!("http://127.0.0.1:{actual_port}/api"), "option optimizer is running");
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
