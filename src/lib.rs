//! Mailsweep — webmail attachment sweeper driven over WebDriver.
//!
//! Signs in to a webmail account, opens one folder, and walks its message
//! list: every message still carrying the "unprocessed" flag marker is
//! flagged, opened, and its attachments downloaded (minus a configurable
//! skip-extension set). Progress lives entirely in the remote mailbox's
//! marker state, so an interrupted run resumes for free.

pub mod config;
pub mod credentials;
pub mod driver;
pub mod engine;
pub mod error;
pub mod filter;
pub mod pagination;
