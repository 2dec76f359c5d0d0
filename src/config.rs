//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Sweep run configuration.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Webmail landing page.
    pub mail_url: String,
    /// Display name of the folder to sweep (substring match, case-sensitive).
    pub folder_name: String,
    /// Attachments whose display name contains any of these (case-folded)
    /// are never downloaded.
    pub skip_extensions: Vec<String>,
    /// Address of the running WebDriver server (e.g. chromedriver).
    pub webdriver_url: String,
    /// Run the browser headless.
    pub headless: bool,
    /// Implicit wait applied uniformly to every element lookup.
    pub implicit_wait: Duration,
    /// Pause after the initial navigation, before the consent dismissal.
    pub landing_delay: Duration,
    /// Settle delay before each message-selection attempt, tolerating
    /// asynchronous list re-rendering the implicit wait does not cover.
    pub settle_delay: Duration,
    /// Cap on consecutive stale-reference retries. `None` retries
    /// indefinitely, which matches the condition being self-resolving on
    /// the next UI read.
    pub max_stale_retries: Option<u32>,
    /// Page opened in the user's browser when no driver session can be
    /// created, pointing at a driver build to download.
    pub driver_download_url: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            mail_url: "https://abv.bg".to_string(),
            folder_name: "UBB".to_string(),
            skip_extensions: vec![".p7s".to_string()],
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            implicit_wait: Duration::from_secs(10),
            landing_delay: Duration::from_secs(10),
            settle_delay: Duration::from_secs(2), // tuned empirically
            max_stale_retries: None,
            driver_download_url: "https://chromedriver.chromium.org/downloads".to_string(),
        }
    }
}

impl SweepConfig {
    /// Build a config from defaults overlaid with `MAILSWEEP_*` env vars.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MAILSWEEP_URL") {
            config.mail_url = url;
        }
        if let Ok(folder) = std::env::var("MAILSWEEP_FOLDER") {
            config.folder_name = folder;
        }
        if let Ok(exts) = std::env::var("MAILSWEEP_SKIP_EXTENSIONS") {
            config.skip_extensions = parse_extension_list(&exts);
        }
        if let Ok(url) = std::env::var("MAILSWEEP_WEBDRIVER_URL") {
            config.webdriver_url = url;
        }
        if let Ok(headless) = std::env::var("MAILSWEEP_HEADLESS") {
            config.headless = headless.to_lowercase() != "false";
        }
        if let Some(ms) = env_u64("MAILSWEEP_SETTLE_MS")? {
            config.settle_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = env_u64("MAILSWEEP_LANDING_MS")? {
            config.landing_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = env_u64("MAILSWEEP_IMPLICIT_WAIT_SECS")? {
            config.implicit_wait = Duration::from_secs(secs);
        }
        if let Some(cap) = env_u64("MAILSWEEP_MAX_STALE_RETRIES")? {
            config.max_stale_retries = Some(cap as u32);
        }

        Ok(config)
    }
}

/// Split a comma-separated extension list, dropping empty entries.
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// CSS/attribute hooks into the webmail UI.
///
/// Kept as one struct so a markup change on the provider's side is a
/// one-place edit. Defaults target abv.bg's GWT-rendered mail view.
#[derive(Debug, Clone)]
pub struct MailboxSelectors {
    /// Cookie-consent accept control on the landing page.
    pub consent_button: String,
    /// Username input id.
    pub username_input: String,
    /// Password input id.
    pub password_input: String,
    /// Login submit control id.
    pub login_button: String,
    /// One row per folder in the folder list.
    pub folder_row: String,
    /// One row per message in the folder view.
    pub message_row: String,
    /// Attribute on a message row holding its opaque row key.
    pub row_key_attr: String,
    /// Marker element present only on unprocessed messages.
    pub unprocessed_marker: String,
    /// Control inside a message row that opens the message.
    pub message_open: String,
    /// One container per attachment in the opened message.
    pub attachment_item: String,
    /// Display-name element inside an attachment container.
    pub attachment_name: String,
    /// Download control inside an attachment container.
    pub attachment_download: String,
}

impl Default for MailboxSelectors {
    fn default() -> Self {
        Self {
            consent_button: ".fc-cta-consent".to_string(),
            username_input: "username".to_string(),
            password_input: "password".to_string(),
            login_button: "loginBut".to_string(),
            folder_row: ".foldersRow".to_string(),
            message_row: ".inbox-row".to_string(),
            row_key_attr: "__gwt_row".to_string(),
            unprocessed_marker: ".icon-flag-off".to_string(),
            message_open: ".inbox-cellTableSecondColumn".to_string(),
            attachment_item: ".attachmentItem".to_string(),
            attachment_name: ".attachmentName".to_string(),
            attachment_download: ".attachmentDownload".to_string(),
        }
    }
}
