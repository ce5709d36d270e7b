//! Filesystem store for accepted project applications.
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/<application_id>/
//!     cover<ext>
//!     avatar<ext>
//!     meta.json
//! ```
//!
//! `meta.json` is always written last, so a directory without it is an
//! incomplete submission that was never reported as accepted.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use uuid::Uuid;

use crate::application::{format_submitted_at, ApplicationMetadata, ProjectApplication};
use crate::upload::ImageKind;

/// File name of the application record inside its directory.
pub const METADATA_FILE: &str = "meta.json";

const METADATA_TMP_FILE: &str = "meta.json.tmp";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The step of [`ApplicationStore::persist`] that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageStage {
    CreateDirectory,
    WriteCover,
    WriteAvatar,
    WriteMetadata,
}

impl StorageStage {
    fn for_image(kind: ImageKind) -> Self {
        match kind {
            ImageKind::Cover => Self::WriteCover,
            ImageKind::Avatar => Self::WriteAvatar,
        }
    }
}

impl fmt::Display for StorageStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateDirectory => "create application directory",
            Self::WriteCover => "save cover image",
            Self::WriteAvatar => "save avatar image",
            Self::WriteMetadata => "save application metadata",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to initialise storage root {}: {source}", .path.display())]
    Init {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to {stage}: {source}")]
    Persist {
        stage: StorageStage,
        #[source]
        source: io::Error,
    },

    #[error("failed to load application {id}: {source}")]
    Load {
        id: Uuid,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn persist(stage: StorageStage) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Persist { stage, source }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// One image to be streamed into an application directory.
pub struct ImageSource<'a, R> {
    pub reader: R,
    /// Extension of the uploaded filename, including the dot, case preserved.
    pub extension: &'a str,
}

/// Writes each accepted submission into its own directory under `root`.
///
/// Cheap to clone. Concurrent `persist` calls never share a directory
/// because every call mints a fresh v4 UUID.
#[derive(Debug, Clone)]
pub struct ApplicationStore {
    root: PathBuf,
}

impl ApplicationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the storage root exists. Idempotent; call once at startup.
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StorageError::Init {
                path: self.root.clone(),
                source,
            })
    }

    /// Whether the storage root currently exists as a directory.
    pub async fn is_ready(&self) -> bool {
        fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Directory that holds (or would hold) the given application.
    pub fn application_dir(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }

    /// Persist a validated submission and return the written record.
    ///
    /// The root must already exist (see [`init`](Self::init)); it is never
    /// recreated here. On error the returned id is never exposed; the
    /// directory may hold partial image files but no `meta.json`.
    pub async fn persist<C, A>(
        &self,
        meta: &ApplicationMetadata,
        cover: ImageSource<'_, C>,
        avatar: ImageSource<'_, A>,
    ) -> Result<ProjectApplication, StorageError>
    where
        C: AsyncRead + Unpin,
        A: AsyncRead + Unpin,
    {
        let application_id = Uuid::new_v4();
        let dir = self.application_dir(application_id);

        fs::create_dir(&dir)
            .await
            .map_err(StorageError::persist(StorageStage::CreateDirectory))?;

        let cover_path = write_image(&dir, ImageKind::Cover, cover).await?;
        let avatar_path = write_image(&dir, ImageKind::Avatar, avatar).await?;

        let application = ProjectApplication {
            application_id,
            submitted_at: format_submitted_at(Utc::now()),
            meta: meta.clone(),
            cover_path: cover_path.display().to_string(),
            avatar_path: avatar_path.display().to_string(),
        };

        write_metadata(&dir, &application)
            .await
            .map_err(StorageError::persist(StorageStage::WriteMetadata))?;

        tracing::debug!(
            %application_id,
            dir = %dir.display(),
            "Application persisted"
        );

        Ok(application)
    }

    /// Read back the record of a previously persisted application.
    pub async fn load(&self, id: Uuid) -> Result<ProjectApplication, StorageError> {
        let path = self.application_dir(id).join(METADATA_FILE);
        let load_err = |source: io::Error| StorageError::Load { id, source };

        let bytes = fs::read(&path).await.map_err(load_err)?;
        serde_json::from_slice(&bytes).map_err(|e| load_err(e.into()))
    }
}

/// Stream one image into `dir` and return its path.
async fn write_image<R>(
    dir: &Path,
    kind: ImageKind,
    source: ImageSource<'_, R>,
) -> Result<PathBuf, StorageError>
where
    R: AsyncRead + Unpin,
{
    let path = dir.join(kind.stored_file_name(source.extension));
    copy_to_file(&path, source.reader)
        .await
        .map_err(StorageError::persist(StorageStage::for_image(kind)))?;
    Ok(path)
}

async fn copy_to_file<R>(path: &Path, mut reader: R) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut file = fs::File::create(path).await?;
    tokio::io::copy(&mut reader, &mut file).await?;
    file.sync_all().await
}

/// Write `meta.json` via a temp file and rename, so readers never observe
/// a half-written record.
async fn write_metadata(dir: &Path, application: &ProjectApplication) -> io::Result<()> {
    let json = serde_json::to_vec_pretty(application)?;
    let tmp = dir.join(METADATA_TMP_FILE);

    let mut file = fs::File::create(&tmp).await?;
    file.write_all(&json).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&tmp, dir.join(METADATA_FILE)).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
