//! Mailbox traversal engine.
//!
//! Drives one full sweep of a folder: sign in, open the folder, then loop
//! between message selection and attachment extraction until no
//! unprocessed message remains on any page. The engine owns the browser
//! session exclusively and closes it on every exit path.

pub mod marker;

use secrecy::ExposeSecret;
use tracing::{debug, error, info, warn};

use crate::config::{MailboxSelectors, SweepConfig};
use crate::credentials::Credentials;
use crate::driver::{Browser, Selector};
use crate::error::{DriverError, Error, TraversalError};
use crate::filter::should_skip;
use crate::pagination::PageCursor;

use marker::find_next_unprocessed;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every page of the folder was drained of unprocessed messages.
    FolderExhausted,
    /// The sign-in form rejected the credentials; nothing was swept.
    SignInFailed,
}

/// Tally of one completed run.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub messages_opened: u64,
    pub attachments_downloaded: u64,
}

impl RunReport {
    fn new(outcome: RunOutcome) -> Self {
        Self {
            outcome,
            messages_opened: 0,
            attachments_downloaded: 0,
        }
    }
}

/// The sweep state machine over one exclusive browser session.
pub struct TraversalEngine {
    browser: Box<dyn Browser>,
    config: SweepConfig,
    selectors: MailboxSelectors,
    credentials: Credentials,
}

impl TraversalEngine {
    pub fn new(
        browser: Box<dyn Browser>,
        config: SweepConfig,
        selectors: MailboxSelectors,
        credentials: Credentials,
    ) -> Self {
        Self {
            browser,
            config,
            selectors,
            credentials,
        }
    }

    /// Run the sweep to completion. The browser session is closed whether
    /// the run succeeds or fails.
    pub async fn run(mut self) -> Result<RunReport, Error> {
        let result = self.run_inner().await;
        if let Err(e) = self.browser.quit().await {
            warn!("Failed to close the browser session: {e}");
        }
        result
    }

    async fn run_inner(&mut self) -> Result<RunReport, Error> {
        self.browser.goto(&self.config.mail_url).await?;
        tokio::time::sleep(self.config.landing_delay).await;
        self.dismiss_consent().await?;

        if !self.sign_in().await? {
            return Ok(RunReport::new(RunOutcome::SignInFailed));
        }

        self.open_folder().await?;
        let url = self.browser.current_url().await?;
        let mut cursor = PageCursor::parse(&url)?;

        let mut report = RunReport::new(RunOutcome::FolderExhausted);
        let mut opened_on_page = false;
        let mut stale_streak: u32 = 0;

        loop {
            self.browser.goto(&cursor.address()).await?;

            match self.visit_next_message().await {
                Ok(Some(downloaded)) => {
                    opened_on_page = true;
                    stale_streak = 0;
                    report.messages_opened += 1;
                    report.attachments_downloaded += downloaded;
                }
                Ok(None) => {
                    if opened_on_page {
                        // Messages were opened here, so the page may have
                        // been re-rendering page 1 over and over; the next
                        // page can still hold unflagged mail.
                        cursor = cursor.advance();
                        opened_on_page = false;
                        debug!(page = cursor.page(), "Page drained, advancing");
                    } else {
                        info!(page = cursor.page(), "Folder exhausted");
                        break;
                    }
                }
                Err(Error::Driver(DriverError::Stale(msg))) => {
                    // The list re-rendered between locating an element and
                    // acting on it. The condition resolves itself on the
                    // next read, so re-enter selection.
                    error!("Stale element reference, retrying selection: {msg}");
                    stale_streak += 1;
                    if let Some(cap) = self.config.max_stale_retries
                        && stale_streak >= cap
                    {
                        return Err(TraversalError::StaleRetriesExhausted {
                            attempts: stale_streak,
                        }
                        .into());
                    }
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    async fn dismiss_consent(&self) -> Result<(), Error> {
        match self
            .browser
            .find(&Selector::css(self.selectors.consent_button.as_str()))
            .await
        {
            Ok(button) => {
                button.click().await?;
                info!("Closed the cookie-consent modal");
            }
            Err(DriverError::NotFound { .. }) => debug!("No consent modal present"),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    /// Submit credentials once. Returns `false` on rejection; there is no
    /// retry, since resubmitting identical credentials cannot succeed.
    async fn sign_in(&self) -> Result<bool, Error> {
        let username_input = Selector::id(self.selectors.username_input.as_str());

        self.browser
            .find(&username_input)
            .await?
            .send_keys(&self.credentials.username)
            .await?;
        self.browser
            .find(&Selector::id(self.selectors.password_input.as_str()))
            .await?
            .send_keys(self.credentials.password.expose_secret())
            .await?;
        self.browser
            .find(&Selector::id(self.selectors.login_button.as_str()))
            .await?
            .click()
            .await?;

        // The credential input disappearing is the only success signal the
        // page gives.
        if !self.browser.find_all(&username_input).await?.is_empty() {
            error!("Sign-in failed, the mail service rejected the credentials");
            return Ok(false);
        }

        info!(username = %self.credentials.username, "Signed in");
        Ok(true)
    }

    /// Locate the target folder row by visible-text substring and click it.
    ///
    /// Whether the click actually switched views is not verified; the
    /// folder page address is read back immediately after, and a malformed
    /// address aborts the run.
    async fn open_folder(&self) -> Result<(), Error> {
        let rows = self
            .browser
            .find_all(&Selector::css(self.selectors.folder_row.as_str()))
            .await?;
        for row in rows {
            if row.text().await?.contains(&self.config.folder_name) {
                row.click().await?;
                info!(folder = %self.config.folder_name, "Opened folder");
                return Ok(());
            }
        }
        Err(TraversalError::FolderNotFound {
            name: self.config.folder_name.clone(),
        }
        .into())
    }

    /// One selection pass: flag the next unprocessed message, open it, and
    /// extract its attachments. `Ok(None)` means this page has none left.
    async fn visit_next_message(&self) -> Result<Option<u64>, Error> {
        tokio::time::sleep(self.config.settle_delay).await;

        let Some(message) = find_next_unprocessed(self.browser.as_ref(), &self.selectors).await?
        else {
            return Ok(None);
        };

        // Flag first: the marker is the durable progress record, and the
        // click may re-render the row before the open control is located.
        message.mark_processed().await?;
        self.open_message(&message.row_key).await?;
        let downloaded = self.extract_attachments().await?;

        Ok(Some(downloaded))
    }

    /// Re-locate the flagged message's row by its key and open it.
    async fn open_message(&self, row_key: &str) -> Result<(), Error> {
        let row_selector = Selector::css(format!(
            "{}[{}=\"{}\"]",
            self.selectors.message_row, self.selectors.row_key_attr, row_key
        ));
        self.browser
            .find(&row_selector)
            .await?
            .find(&Selector::css(self.selectors.message_open.as_str()))
            .await?
            .click()
            .await?;
        debug!(row = row_key, "Opened message");
        Ok(())
    }

    /// Download every attachment on the opened message that survives the
    /// skip filter. Download completion is the browser's concern, not ours.
    async fn extract_attachments(&self) -> Result<u64, Error> {
        let items = self
            .browser
            .find_all(&Selector::css(self.selectors.attachment_item.as_str()))
            .await?;

        let mut downloaded = 0u64;
        for item in items {
            let name = item
                .find(&Selector::css(self.selectors.attachment_name.as_str()))
                .await?
                .text()
                .await?;
            let label = name.replace('\n', " ");

            if should_skip(&name, &self.config.skip_extensions) {
                debug!(file = %label, "Skipped attachment");
                continue;
            }

            item.find(&Selector::css(self.selectors.attachment_download.as_str()))
                .await?
                .click()
                .await?;
            info!(file = %label, "Downloaded attachment");
            downloaded += 1;
        }

        Ok(downloaded)
    }
}
