// ABOUTME: Derives resource identifiers from user-facing names
// Keeps the id in step with the name until the user edits the id by hand

use lazy_static::lazy_static;
use regex::Regex;

/// Longest identifier the platform accepts
pub const MAX_RESOURCE_ID_LEN: usize = 63;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").expect("valid slug regex");
}

/// Turn a display name into a resource id slug
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-`, trims leading/trailing dashes and caps the length.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_ascii_lowercase();
    let replaced = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');

    if trimmed.len() <= MAX_RESOURCE_ID_LEN {
        return trimmed.to_string();
    }
    // Only ASCII survives the regex, so byte slicing is safe
    trimmed[..MAX_RESOURCE_ID_LEN].trim_end_matches('-').to_string()
}

/// Tracks whether the resource id is still derived from the name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdDerivation {
    manually_edited: bool,
}

impl IdDerivation {
    pub fn is_manually_edited(&self) -> bool {
        self.manually_edited
    }

    /// Id to store after the name changed, or None to leave the id alone
    pub fn on_name_changed(&self, name: &str) -> Option<String> {
        if self.manually_edited {
            None
        } else {
            Some(slugify(name))
        }
    }

    /// Record a direct edit of the id
    ///
    /// An id equal to the name's slug, or an empty id, hands control back to
    /// the name.
    pub fn on_id_edited(&mut self, id: &str, current_name: &str) {
        self.manually_edited = !id.is_empty() && id != slugify(current_name);
    }
}
