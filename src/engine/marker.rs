//! Marker-based progress tracking.
//!
//! A message's flag marker is the sole processed-state signal: messages
//! still showing the "unflagged" marker are the ones left to visit, and
//! clicking the marker records progress in the mailbox itself (assumed,
//! not verified, to persist across reloads).

use tracing::info;

use crate::config::MailboxSelectors;
use crate::driver::{Browser, Element, Selector};
use crate::error::{DriverError, Error, TraversalError};

/// An unprocessed message located in the current list view.
///
/// Carries both the live marker handle and the opaque row key so the
/// message-open control can be relocated independently after the marker
/// click mutates the row's visible attributes.
pub struct MessageRef {
    pub row_key: String,
    marker: Box<dyn Element>,
}

impl MessageRef {
    /// Click the marker, transitioning the message to processed state.
    pub async fn mark_processed(&self) -> Result<(), DriverError> {
        self.marker.click().await
    }
}

/// Find the first message in the current view still carrying the
/// unprocessed marker.
///
/// `Ok(None)` is the normal exhaustion signal for the page, not a failure.
pub async fn find_next_unprocessed(
    browser: &dyn Browser,
    selectors: &MailboxSelectors,
) -> Result<Option<MessageRef>, Error> {
    let marker = match browser
        .find(&Selector::css(selectors.unprocessed_marker.as_str()))
        .await
    {
        Ok(marker) => marker,
        Err(DriverError::NotFound { .. }) => {
            info!("No more unflagged messages found");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    // The row key lives on an ancestor of the marker, found via the
    // nearest ancestor carrying the key attribute.
    let row = marker
        .find(&Selector::xpath(format!(
            "./ancestor::*[@{}][1]",
            selectors.row_key_attr
        )))
        .await?;
    let row_key = row
        .attr(&selectors.row_key_attr)
        .await?
        .ok_or_else(|| TraversalError::RowKeyMissing {
            attr: selectors.row_key_attr.clone(),
        })?;

    Ok(Some(MessageRef { row_key, marker }))
}
