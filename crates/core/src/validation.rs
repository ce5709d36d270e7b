//! Business rules for submitted application metadata.
//!
//! [`validate_metadata`] is pure: it never short-circuits and returns every
//! violation as a human-readable message. Message order follows the rule
//! order below and clients render the list as-is, so keep it stable.

use crate::application::{ApplicationMetadata, ProjectLink};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of `brief`, in Unicode scalar values.
pub const MAX_BRIEF_CHARS: usize = 20;

/// URL prefixes accepted for `author_link` and link URLs.
const ALLOWED_URL_SCHEMES: &[&str] = &["http://", "https://"];

pub const MSG_PROJECT_NAME_EMPTY: &str = "project_name must not be empty";
pub const MSG_AUTHOR_NAME_EMPTY: &str = "author_name must not be empty";
pub const MSG_AUTHOR_LINK_EMPTY: &str = "author_link must not be empty";
pub const MSG_AUTHOR_LINK_SCHEME: &str = "author_link must be a valid http(s) URL";
pub const MSG_BRIEF_EMPTY: &str = "brief must not be empty";
pub const MSG_BRIEF_TOO_LONG: &str = "brief must not exceed 20 characters";
pub const MSG_LINKS_EMPTY: &str = "at least one project link is required";
pub const MSG_DEFAULT_LINK_COUNT: &str = "exactly one link must be marked as default";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate submitted metadata. An empty result means the metadata is valid.
pub fn validate_metadata(meta: &ApplicationMetadata) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(&meta.project_name) {
        errors.push(MSG_PROJECT_NAME_EMPTY.to_string());
    }

    if is_blank(&meta.author_name) {
        errors.push(MSG_AUTHOR_NAME_EMPTY.to_string());
    }

    if is_blank(&meta.author_link) {
        errors.push(MSG_AUTHOR_LINK_EMPTY.to_string());
    } else if !has_web_scheme(&meta.author_link) {
        errors.push(MSG_AUTHOR_LINK_SCHEME.to_string());
    }

    if is_blank(&meta.brief) {
        errors.push(MSG_BRIEF_EMPTY.to_string());
    } else if meta.brief.chars().count() > MAX_BRIEF_CHARS {
        errors.push(MSG_BRIEF_TOO_LONG.to_string());
    }

    if meta.links.is_empty() {
        errors.push(MSG_LINKS_EMPTY.to_string());
    } else {
        errors.extend(validate_links(&meta.links));
    }

    errors
}

/// Per-link URL checks followed by the single default-count check.
fn validate_links(links: &[ProjectLink]) -> Vec<String> {
    let mut errors: Vec<String> = links
        .iter()
        .enumerate()
        .filter_map(|(i, link)| {
            let position = i + 1;
            if is_blank(&link.url) {
                Some(format!("link {position}: url must not be empty"))
            } else if !has_web_scheme(&link.url) {
                Some(format!("link {position}: url must be a valid http(s) URL"))
            } else {
                None
            }
        })
        .collect();

    let defaults = links.iter().filter(|l| l.is_marked_default()).count();
    if defaults != 1 {
        errors.push(MSG_DEFAULT_LINK_COUNT.to_string());
    }

    errors
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Whether `url` starts with `http://` or `https://`.
pub fn has_web_scheme(url: &str) -> bool {
    ALLOWED_URL_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
