//! Lookup of approved project images served by numeric id.
//!
//! Layout under the display root: `avatar/<id>.png` and `poster/<id>.png`.
//! Ids must parse as integers before any path is built, so a request can
//! never name a file outside those two directories. The file name keeps the
//! id text as sent: `?id=007` resolves to `007.png`.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Which display image family is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    Avatar,
    Poster,
}

impl DisplayKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Avatar => "avatar",
            Self::Poster => "poster",
        }
    }
}

/// An `id` query value that is known to be an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayId {
    raw: String,
    value: i64,
}

impl DisplayId {
    /// The id text as sent by the client.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

/// Parse the `id` query parameter.
pub fn parse_display_id(raw: Option<&str>) -> Result<DisplayId, CoreError> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Err(CoreError::Validation("id parameter is required".into())),
    };

    let value = raw
        .parse::<i64>()
        .map_err(|_| CoreError::Validation("id must be a valid number".into()))?;
    Ok(DisplayId {
        raw: raw.to_string(),
        value,
    })
}

/// Read-only view of the display image directory.
#[derive(Debug, Clone)]
pub struct DisplayStore {
    root: PathBuf,
}

impl DisplayStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an image of `kind` with `id` would live at.
    pub fn image_path(&self, kind: DisplayKind, id: &DisplayId) -> PathBuf {
        self.root
            .join(kind.dir_name())
            .join(format!("{}.png", id.as_str()))
    }

    /// Resolve an existing image, or `NotFound`.
    pub async fn locate(&self, kind: DisplayKind, id: &DisplayId) -> Result<PathBuf, CoreError> {
        let path = self.image_path(kind, id);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(CoreError::NotFound {
                entity: kind.dir_name(),
                id: id.value(),
            }),
        }
    }
}
