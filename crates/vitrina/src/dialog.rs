//! One-shot native dialog observation.
//!
//! Alerts and confirms are a cross-cutting browser event, not a return
//! value. They are modeled here as an explicit observer object: registered
//! immediately before the action that triggers the dialog, consumed exactly
//! once by value, and deregistered when the underlying event stream drops.
//! Registering after the click risks a missed dialog; the page layer always
//! arms the observer first.

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::{
    DialogType as CdpDialogType, EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use chromiumoxide::Page;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::result::{VitrinaError, VitrinaResult};

/// Kind of native browser dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogKind {
    /// Alert dialog (OK button only)
    Alert,
    /// Confirm dialog (OK/Cancel)
    Confirm,
    /// Prompt dialog (text input + OK/Cancel)
    Prompt,
    /// Before-unload dialog (Leave/Stay)
    BeforeUnload,
}

impl From<CdpDialogType> for DialogKind {
    fn from(kind: CdpDialogType) -> Self {
        match kind {
            CdpDialogType::Alert => Self::Alert,
            CdpDialogType::Confirm => Self::Confirm,
            CdpDialogType::Prompt => Self::Prompt,
            CdpDialogType::Beforeunload => Self::BeforeUnload,
        }
    }
}

impl std::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert => write!(f, "alert"),
            Self::Confirm => write!(f, "confirm"),
            Self::Prompt => write!(f, "prompt"),
            Self::BeforeUnload => write!(f, "beforeunload"),
        }
    }
}

/// A dialog captured and settled by a one-shot observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedDialog {
    /// Kind of dialog that fired
    pub kind: DialogKind,
    /// Message text the dialog carried
    pub message: String,
}

impl ObservedDialog {
    /// Whether the dialog text contains the given substring.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.message.contains(needle)
    }
}

/// One-shot observer for the next native dialog on a page.
///
/// `accept` and `dismiss` take `self` by value, so a fired observer cannot
/// be reused; an unused observer deregisters on drop.
pub struct DialogObserver {
    page: Arc<Page>,
    events: BoxStream<'static, Arc<EventJavascriptDialogOpening>>,
}

impl std::fmt::Debug for DialogObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogObserver").finish_non_exhaustive()
    }
}

impl DialogObserver {
    /// Subscribe to the page's dialog events.
    pub(crate) async fn register(page: Arc<Page>) -> VitrinaResult<Self> {
        let events = page
            .event_listener::<EventJavascriptDialogOpening>()
            .await?
            .boxed();
        Ok(Self { page, events })
    }

    /// Wait for the dialog and accept it.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::DialogTimeout`] if no dialog fires within the
    /// budget.
    pub async fn accept(self, timeout: Duration) -> VitrinaResult<ObservedDialog> {
        self.settle(timeout, true).await
    }

    /// Wait for the dialog and dismiss it.
    ///
    /// # Errors
    ///
    /// Returns [`VitrinaError::DialogTimeout`] if no dialog fires within the
    /// budget.
    pub async fn dismiss(self, timeout: Duration) -> VitrinaResult<ObservedDialog> {
        self.settle(timeout, false).await
    }

    async fn settle(mut self, timeout: Duration, accept: bool) -> VitrinaResult<ObservedDialog> {
        let ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let event = tokio::time::timeout(timeout, self.events.next())
            .await
            .map_err(|_| VitrinaError::DialogTimeout { ms })?
            .ok_or(VitrinaError::DialogTimeout { ms })?;

        let dialog = ObservedDialog {
            kind: event.r#type.clone().into(),
            message: event.message.clone(),
        };

        let params = HandleJavaScriptDialogParams::builder()
            .accept(accept)
            .build()
            .map_err(|message| VitrinaError::Driver { message })?;
        self.page.execute(params).await?;

        tracing::debug!(kind = %dialog.kind, message = %dialog.message, accept, "settled dialog");
        Ok(dialog)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_maps_from_cdp() {
        assert_eq!(DialogKind::from(CdpDialogType::Alert), DialogKind::Alert);
        assert_eq!(DialogKind::from(CdpDialogType::Confirm), DialogKind::Confirm);
        assert_eq!(DialogKind::from(CdpDialogType::Prompt), DialogKind::Prompt);
        assert_eq!(
            DialogKind::from(CdpDialogType::Beforeunload),
            DialogKind::BeforeUnload
        );
    }

    #[test]
    fn kind_display() {
        assert_eq!(DialogKind::Alert.to_string(), "alert");
        assert_eq!(DialogKind::BeforeUnload.to_string(), "beforeunload");
    }

    #[test]
    fn observed_dialog_contains() {
        let dialog = ObservedDialog {
            kind: DialogKind::Alert,
            message: "Product added".to_string(),
        };
        assert!(dialog.contains("Product added"));
        assert!(dialog.contains("added"));
        assert!(!dialog.contains("removed"));
    }
}
