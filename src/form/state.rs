use crate::core::FieldId;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorVisibility {
    /// Known but not yet shown: the field is untouched and no submit happened.
    Hidden,
    Inline,
}

#[derive(Debug, Clone)]
pub struct ValidationEntry {
    pub error: String,
    pub visibility: ErrorVisibility,
}

#[derive(Debug, Default, Clone)]
pub struct ValidationState {
    entries: HashMap<FieldId, ValidationEntry>,
}

impl ValidationState {
    pub fn set_error(
        &mut self,
        id: impl Into<FieldId>,
        error: impl Into<String>,
        visibility: ErrorVisibility,
    ) {
        self.entries.insert(
            id.into(),
            ValidationEntry {
                error: error.into(),
                visibility,
            },
        );
    }

    /// Returns whether an error was present.
    pub fn clear_error(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn has_error(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn visible_error(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(|entry| {
            matches!(entry.visibility, ErrorVisibility::Inline).then_some(entry.error.as_str())
        })
    }

    pub fn set_visibility(&mut self, id: &str, visibility: ErrorVisibility) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.visibility = visibility;
        }
    }

    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }
}
