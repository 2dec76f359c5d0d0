use anyhow::Result;
use mailsweep::config::{MailboxSelectors, SweepConfig};
use mailsweep::credentials::Credentials;
use mailsweep::driver::webdriver::WebDriverBrowser;
use mailsweep::engine::{RunOutcome, TraversalEngine};
use mailsweep::error::DriverError;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = SweepConfig::from_env()?;
    let selectors = MailboxSelectors::default();

    eprintln!("mailsweep v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Mailbox: {}", config.mail_url);
    eprintln!("   Folder:  {}", config.folder_name);
    eprintln!("   Skipping: {}", config.skip_extensions.join(", "));

    let credentials = tokio::task::spawn_blocking(Credentials::resolve).await??;

    let browser = match WebDriverBrowser::connect(&config).await {
        Ok(browser) => browser,
        Err(e @ DriverError::SessionNotCreated(_)) => {
            // No session means no run: point the user at a driver build
            // that matches their browser, then bail out.
            error!("{e}");
            info!("Opening the driver download page in the default browser");
            if let Err(open_err) = opener::open(&config.driver_download_url) {
                warn!("Could not open {}: {open_err}", config.driver_download_url);
            }
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let engine = TraversalEngine::new(Box::new(browser), config, selectors, credentials);
    let report = engine.run().await?;

    match report.outcome {
        RunOutcome::FolderExhausted => info!(
            messages = report.messages_opened,
            attachments = report.attachments_downloaded,
            "Sweep complete"
        ),
        RunOutcome::SignInFailed => error!("Sweep aborted: sign-in failed"),
    }

    Ok(())
}
