//! Pipeline stages for one translation job.
//!
//! Each submodule implements exactly one step of the job lifecycle, so each
//! can be tested against a mock server on its own.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ submit ──▶ poll ──▶ download
//! (path)    (upload)   (status)  (CDN → file)
//! ```
//!
//! 1. [`input`]   : validate the local document and load it for upload
//! 2. [`submit`]  : `POST /translate/{tier}`; yields the job id
//! 3. [`poll`]    : `GET /status/{job_id}` until a terminal status
//! 4. [`download`]: fetch the artifact URL and write the output file
//!
//! [`request`] is the shared helper every API call goes through: fixed
//! headers, status classification, retry on timeout.

pub mod download;
pub mod input;
pub mod poll;
pub mod request;
pub mod submit;
