use std::time::Duration;

use anyhow::Result;
use tracing::info;

use stockwatch::config::AppConfig;
use stockwatch::notify::EmailNotifier;
use stockwatch::poller::PollLoop;
use stockwatch::scraper::AggregateScraper;
use stockwatch::sites;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("stockwatch=info".parse()?),
        )
        .init();

    info!("Starting Stockwatch...");

    let config = AppConfig::from_env()?;

    let client = reqwest::Client::builder()
        .user_agent(config.scraper.user_agent.as_str())
        .timeout(Duration::from_secs(config.scraper.request_timeout))
        .build()?;

    let adapters = sites::build_adapters(&config, &client)?;
    let scraper = AggregateScraper::new(adapters);
    let site_count = scraper.site_count();
    let notifier = Box::new(EmailNotifier::new(&config)?);

    let interval = Duration::from_secs(config.watcher.poll_interval_minutes * 60);
    let poller = PollLoop::initialize(
        scraper,
        notifier,
        config.watcher.email_subject.clone(),
        interval,
    )
    .await?;

    info!(
        "Baseline established, watching {} site(s) every {} minute(s)",
        site_count,
        config.watcher.poll_interval_minutes
    );

    poller.run().await;
    Ok(())
}
