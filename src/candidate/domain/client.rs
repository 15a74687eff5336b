//! Client display metadata from the client registry.

use super::ClientId;
use serde::{Deserialize, Serialize};

/// Display metadata for a client, as listed in the client registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Short client name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Header shown on the client dashboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_title: Option<String>,
}

impl ClientProfile {
    /// Creates a profile with only a display name.
    #[must_use]
    pub fn displayed_as(display_name: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            ..Self::default()
        }
    }

    /// Returns the dashboard header for `client_id`.
    ///
    /// Prefers the dashboard title, then the display name, then the short
    /// name, and finally the upper-cased identifier.
    #[must_use]
    pub fn title(&self, client_id: &ClientId) -> String {
        self.dashboard_title
            .as_deref()
            .or(self.display_name.as_deref())
            .or(self.name.as_deref())
            .map_or_else(|| client_id.as_str().to_uppercase(), str::to_owned)
    }

    /// Returns the label used when listing available clients.
    #[must_use]
    pub fn listing_label(&self, client_id: &ClientId) -> String {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .map_or_else(|| client_id.as_str().to_owned(), str::to_owned)
    }
}
