//! Constraints on the two image uploads that accompany a submission.
//!
//! Only the filename extension is inspected; image content is stored as-is.

use std::fmt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MIB: usize = 1024 * 1024;

/// Maximum cover image size (5 MiB).
pub const MAX_COVER_BYTES: usize = 5 * MIB;

/// Maximum avatar image size (2 MiB).
pub const MAX_AVATAR_BYTES: usize = 2 * MIB;

/// Ceiling for the whole multipart body (10 MiB).
pub const MAX_REQUEST_BYTES: usize = 10 * MIB;

/// Accepted image extensions, lowercase and including the dot.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

// ---------------------------------------------------------------------------
// Image kinds
// ---------------------------------------------------------------------------

/// Which of the two submission images a file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Cover,
    Avatar,
}

impl ImageKind {
    /// Multipart field name, also used as the stored file stem.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Avatar => "avatar",
        }
    }

    /// Capitalised label for user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cover => "Cover",
            Self::Avatar => "Avatar",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            Self::Cover => MAX_COVER_BYTES,
            Self::Avatar => MAX_AVATAR_BYTES,
        }
    }

    /// Size ceiling in whole MiB, for messages.
    pub fn max_mib(self) -> usize {
        self.max_bytes() / MIB
    }

    /// `"cover.png"`, `"avatar.JPG"`, ...
    pub fn stored_file_name(self, extension: &str) -> String {
        format!("{}{extension}", self.field_name())
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// A file-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadViolation {
    #[error("{} image exceeds maximum size of {}MB", .0.label(), .0.max_mib())]
    TooLarge(ImageKind),

    #[error("{} image must be jpg, jpeg, png, or webp format", .0.label())]
    UnsupportedType(ImageKind),
}

impl UploadViolation {
    pub fn kind(&self) -> ImageKind {
        match self {
            Self::TooLarge(kind) | Self::UnsupportedType(kind) => *kind,
        }
    }
}

/// Reject a file larger than the ceiling for its kind.
pub fn check_size(kind: ImageKind, len: usize) -> Result<(), UploadViolation> {
    if len > kind.max_bytes() {
        Err(UploadViolation::TooLarge(kind))
    } else {
        Ok(())
    }
}

/// Reject a file whose extension is not in [`ALLOWED_IMAGE_EXTENSIONS`].
pub fn check_extension(kind: ImageKind, file_name: &str) -> Result<(), UploadViolation> {
    if is_supported_image(file_name) {
        Ok(())
    } else {
        Err(UploadViolation::UnsupportedType(kind))
    }
}

/// Case-insensitive extension allow-list check.
pub fn is_supported_image(file_name: &str) -> bool {
    let ext = file_extension(file_name).to_ascii_lowercase();
    ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Extension of the final path element, from its last dot, case preserved.
///
/// Returns `""` when the final element has no dot.
pub fn file_extension(file_name: &str) -> &str {
    let base = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name);
    base.rfind('.').map_or("", |i| &base[i..])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
