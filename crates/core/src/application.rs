//! Project application data model.
//!
//! [`ApplicationMetadata`] is what a submitter sends in the `meta` form
//! field; [`ProjectApplication`] is the record written to `meta.json` once
//! a submission has been accepted.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single link to where the project can be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLink {
    /// Short free-text label, e.g. `"web"` or `"bilibili"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Tri-state: absent, explicitly `false`, or `true`. Only `Some(true)`
    /// counts towards the default-link rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl ProjectLink {
    pub fn is_marked_default(&self) -> bool {
        self.is_default == Some(true)
    }
}

/// Submitter-provided metadata, decoded from the `meta` multipart field.
///
/// Missing and `null` fields decode to their empty value so they surface
/// as validation messages instead of a JSON decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brief: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Vec<ProjectLink>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The persisted record of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectApplication {
    pub application_id: Uuid,
    /// RFC3339, UTC, second precision (see [`format_submitted_at`]).
    pub submitted_at: String,
    pub meta: ApplicationMetadata,
    pub cover_path: String,
    pub avatar_path: String,
}

/// Identifier and timestamp handed back to the submitter on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedApplication {
    pub application_id: Uuid,
    pub submitted_at: String,
}

impl From<&ProjectApplication> for AcceptedApplication {
    fn from(app: &ProjectApplication) -> Self {
        Self {
            application_id: app.application_id,
            submitted_at: app.submitted_at.clone(),
        }
    }
}

/// Format an acceptance time as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_submitted_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
