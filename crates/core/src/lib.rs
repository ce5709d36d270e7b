//! Domain logic for the project application service.
//!
//! Holds the submission data model, the metadata validator, upload
//! constraints, and the filesystem stores. Nothing here knows about HTTP,
//! so the rules can be exercised directly from unit tests.

pub mod application;
pub mod display;
pub mod error;
pub mod storage;
pub mod upload;
pub mod validation;
