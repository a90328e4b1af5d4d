//! HTTP DTOs for the settings endpoints.

use serde::Deserialize;

use crate::domain::draft::{CompanyProfile, SenderIdentity, StylePreferences};
use crate::ports::SavedSettings;

/// Partial settings update. Absent sections keep their saved value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettingsRequest {
    pub company: Option<CompanyProfile>,
    pub sender: Option<SenderIdentity>,
    pub style: Option<StylePreferences>,
}

impl UpdateSettingsRequest {
    /// Applies the present sections on top of `current`.
    pub fn apply(self, current: SavedSettings) -> SavedSettings {
        SavedSettings {
            company: self.company.unwrap_or(current.company),
            sender: self.sender.unwrap_or(current.sender),
            style: self.style.unwrap_or(current.style),
        }
    }
}
