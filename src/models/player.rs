//! Player identity as delivered by the extraction layer.

use serde::{Deserialize, Serialize};

/// Identity of one competitor, scraped from the match page.
///
/// `slug` is the site's URL identifier and is what home/away hints are
/// matched against; `external_id` is the site's opaque id kept for
/// persistence joins; `display_name` is the rendered name (server-icon hints
/// show names rather than slugs, so both are matchable).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub slug: String,
    pub external_id: String,
    pub display_name: String,
}

impl PlayerIdentity {
    /// Create an identity from its three scraped parts.
    pub fn new(
        slug: impl Into<String>,
        external_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            external_id: external_id.into(),
            display_name: display_name.into(),
        }
    }

    /// True when the extractor produced nothing usable for this row.
    pub fn is_blank(&self) -> bool {
        self.slug.trim().is_empty() && self.display_name.trim().is_empty()
    }

    /// Case-insensitive match against a slug hint (trimmed).
    pub fn matches_slug(&self, hint: &str) -> bool {
        let hint = hint.trim();
        !hint.is_empty() && self.slug.trim().eq_ignore_ascii_case(hint)
    }

    /// Case-insensitive match against a rendered name or slug.
    pub fn matches_name_or_slug(&self, hint: &str) -> bool {
        let hint = hint.trim();
        if hint.is_empty() {
            return false;
        }
        self.slug.trim().eq_ignore_ascii_case(hint)
            || self.display_name.trim().eq_ignore_ascii_case(hint)
    }
}
