use filmorate::logger::*;
use filmorate::server::*;
use filmorate::settings::*;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let server = Server::try_new(&project_settings).await?;

    let genres = server.lookup_service.list_genres().await?;
    let ratings = server.lookup_service.list_mpa().await?;
    info!(
        genres = genres.len(),
        ratings = ratings.len(),
        "lookup data available"
    );

    signal::ctrl_c().await?;

    let shutdown_timeout = std::time::Duration::from_secs(10);
    match tokio::time::timeout(shutdown_timeout, server.shutdown()).await {
        Ok(_) => info!("server shutdown successfully"),
        Err(_) => error!("server shutdown timed out"),
    }

    Ok(())
}
