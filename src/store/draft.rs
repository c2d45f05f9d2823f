use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Result;
use crate::session::FormState;

use super::medium::{StorageMedium, DRAFT_KEY};

/// Non-authoritative crash-recovery snapshot of unsaved form input,
/// overwrite-only and distinct from the committed record list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDraft {
    pub form: FormState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_id: Option<Uuid>,
    pub saved_at: DateTime<Utc>,
}

impl FormDraft {
    pub fn new(form: FormState, active_id: Option<Uuid>) -> Self {
        Self {
            form,
            active_id,
            saved_at: Utc::now(),
        }
    }
}

/// Keyed slot for the autosave draft on the persistence medium.
pub struct DraftStore {
    medium: Box<dyn StorageMedium>,
}

impl DraftStore {
    pub fn new(medium: Box<dyn StorageMedium>) -> Self {
        Self { medium }
    }

    pub fn save(&self, draft: &FormDraft) -> Result<()> {
        let json = serde_json::to_string_pretty(draft)?;
        self.medium.write(DRAFT_KEY, &json)
    }

    /// Returns the stored draft, if any. A draft that no longer parses is
    /// treated as absent; it is recovery data, never authoritative.
    pub fn load(&self) -> Result<Option<FormDraft>> {
        let Some(text) = self.medium.read(DRAFT_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(draft) => Ok(Some(draft)),
            Err(err) => {
                tracing::debug!(%err, "discarding unreadable draft");
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> Result<()> {
        self.medium.remove(DRAFT_KEY)
    }
}
