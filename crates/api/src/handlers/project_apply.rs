//! Handler for project application submissions.
//!
//! Steps run in a fixed order and the first failure decides the response:
//! decode form, decode `meta`, validate metadata, require both images,
//! size ceilings, extension allow-list, persist.

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::Json;
use sjaplus_core::application::{AcceptedApplication, ApplicationMetadata};
use sjaplus_core::storage::ImageSource;
use sjaplus_core::upload::{self, ImageKind, UploadViolation};
use sjaplus_core::validation::validate_metadata;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const FIELD_META: &str = "meta";

const MSG_ACCEPTED: &str = "Application submitted, pending review";

// ---------------------------------------------------------------------------
// Form decoding
// ---------------------------------------------------------------------------

/// An uploaded image part.
#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedImage {
    fn source(&self) -> ImageSource<'_, &[u8]> {
        ImageSource {
            reader: &self.data[..],
            extension: upload::file_extension(&self.file_name),
        }
    }
}

/// The parts of a submission form this endpoint cares about.
///
/// Unknown fields are skipped. When a field repeats, the first one wins.
/// File fields only count when the part carries a non-empty filename;
/// browsers send `filename=""` for an unpicked file input.
#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub meta: Option<String>,
    pub cover: Option<UploadedImage>,
    pub avatar: Option<UploadedImage>,
}

impl ApplicationForm {
    /// Drain the multipart stream. Exceeding the body limit surfaces here.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed_form)? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                FIELD_META if form.meta.is_none() => {
                    form.meta = Some(field.text().await.map_err(malformed_form)?);
                }
                "cover" | "avatar" => {
                    let Some(file_name) = field
                        .file_name()
                        .filter(|n| !n.is_empty())
                        .map(str::to_string)
                    else {
                        continue;
                    };
                    let slot = if name == "cover" {
                        &mut form.cover
                    } else {
                        &mut form.avatar
                    };
                    if slot.is_some() {
                        continue;
                    }
                    let data = field.bytes().await.map_err(malformed_form)?;
                    *slot = Some(UploadedImage { file_name, data });
                }
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }

    /// Decode the `meta` field. Absent or empty counts as missing.
    pub fn metadata(&self) -> AppResult<ApplicationMetadata> {
        let raw = self
            .meta
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(AppError::MissingField(FIELD_META))?;

        serde_json::from_str(raw).map_err(|e| AppError::MalformedRequest {
            summary: "meta field is not valid JSON",
            detail: format!("Invalid JSON format: {e}"),
        })
    }

    /// Take an image part out of the form, or report it missing.
    fn take_image(&mut self, kind: ImageKind) -> AppResult<UploadedImage> {
        let slot = match kind {
            ImageKind::Cover => &mut self.cover,
            ImageKind::Avatar => &mut self.avatar,
        };
        slot.take().ok_or(AppError::MissingField(kind.field_name()))
    }
}

fn malformed_form(err: impl std::fmt::Display) -> AppError {
    AppError::MalformedRequest {
        summary: "Could not parse form data",
        detail: err.to_string(),
    }
}

/// Size ceilings for both files, then the extension allow-list for both.
fn check_images(cover: &UploadedImage, avatar: &UploadedImage) -> Result<(), UploadViolation> {
    upload::check_size(ImageKind::Cover, cover.data.len())?;
    upload::check_size(ImageKind::Avatar, avatar.data.len())?;
    upload::check_extension(ImageKind::Cover, &cover.file_name)?;
    upload::check_extension(ImageKind::Avatar, &avatar.file_name)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /project/apply
///
/// Multipart fields: `meta` (JSON text), `cover` and `avatar` (files).
/// Two identical submissions produce two independent applications.
pub async fn submit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DataResponse<AcceptedApplication>>> {
    let multipart = multipart.map_err(malformed_form)?;
    let mut form = ApplicationForm::read(multipart).await?;

    let meta = form.metadata()?;

    let errors = validate_metadata(&meta);
    if !errors.is_empty() {
        tracing::warn!(error_count = errors.len(), "Application metadata rejected");
        return Err(AppError::ValidationFailed(errors));
    }

    let cover = form.take_image(ImageKind::Cover)?;
    let avatar = form.take_image(ImageKind::Avatar)?;

    if let Err(violation) = check_images(&cover, &avatar) {
        tracing::warn!(
            file = %violation.kind(),
            %violation,
            "Application upload rejected"
        );
        return Err(violation.into());
    }

    let application = state
        .applications
        .persist(&meta, cover.source(), avatar.source())
        .await?;

    tracing::info!(
        application_id = %application.application_id,
        project = %application.meta.project_name,
        "Project application accepted"
    );

    Ok(Json(DataResponse::ok(
        MSG_ACCEPTED,
        AcceptedApplication::from(&application),
    )))
}
