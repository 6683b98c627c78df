use crate::app_config::AppConfig;
use crate::directory::ProviderDirectory;
use crate::gateway::HttpGateway;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};
use tracing::{info, warn};

mod app_config;
mod directory;
mod domain;
mod fetch_state;
mod gateway;
mod group_view;
mod lamp_control;
mod ordering;
mod session;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load();
    info!("✅  Loaded configuration");

    let client = gateway::new_client()?;
    let gateway = HttpGateway::new(client, &config);

    let mut directory = ProviderDirectory::new();
    directory.mount(&gateway).await;
    for session in directory.sessions_mut() {
        session.mount(&gateway).await;
    }
    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    print_panel(&directory);
    println!("commands: list | toggle <provider> <lamp> | all <provider> on|off | refresh <provider> | retry [<provider>] | quit");

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let parts = line.split_whitespace().collect::<Vec<_>>();
        match parts.as_slice() {
            [] => {}
            ["quit"] | ["exit"] => break,
            ["list"] => print_panel(&directory),
            ["toggle", provider_id, lamp_id] => match directory.session(provider_id) {
                Some(session) => {
                    if let Err(e) = session.toggle(&gateway, lamp_id).await {
                        warn!("⚠️ Toggle failed: {}", e);
                    }
                }
                None => warn!("⚠️ Unknown provider '{}'", provider_id),
            },
            ["all", provider_id, state @ ("on" | "off")] => match directory.session(provider_id) {
                Some(session) => {
                    if let Err(e) = session.apply_all(&gateway, *state == "on").await {
                        warn!("⚠️ Bulk apply failed: {}", e);
                    }
                }
                None => warn!("⚠️ Unknown provider '{}'", provider_id),
            },
            ["refresh", provider_id] => match directory.session(provider_id) {
                Some(session) => {
                    if let Err(e) = session.refresh(&gateway).await {
                        warn!("⚠️ Refresh failed: {}", e);
                    }
                }
                None => warn!("⚠️ Unknown provider '{}'", provider_id),
            },
            ["retry"] => {
                directory.retry(&gateway).await;
                for session in directory.sessions_mut() {
                    session.mount(&gateway).await;
                }
            }
            ["retry", provider_id] => match directory.session(provider_id) {
                Some(session) => session.retry(&gateway).await,
                None => warn!("⚠️ Unknown provider '{}'", provider_id),
            },
            _ => warn!("⚠️ Unknown command '{}'", line),
        }
    }

    Ok(())
}

fn print_panel(directory: &ProviderDirectory) {
    if directory.sessions().is_empty() {
        println!("(no providers, directory is {})", directory.state());
        return;
    }
    for session in directory.sessions() {
        let provider = session.provider();
        println!("{} ({}): {}", provider.name, provider.id, session.state());
        for group in session.groups() {
            println!("  {}", group.name);
            for lamp in session.lamps_in(&group) {
                let on = session.lamp_state(&lamp.id).unwrap_or(lamp.state);
                println!("    [{}] {} ({})", if on { "on " } else { "off" }, lamp.name, lamp.id);
            }
        }
    }
}
