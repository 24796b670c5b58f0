//! Project context extraction from uploaded files
//!
//! Builds the textual snapshot sent to the model: a manifest plus a handful of
//! sampled text files for zip archives, a preview for single text files, and
//! a one-line description for anything else. Inspection is best-effort and
//! bounded by [`AnalysisConfig`] limits.

use std::io::{Cursor, Read};
use std::path::Path;

use axum::body::Bytes;
use krimson_core::config::AnalysisConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::task::JoinError;
use tracing::{debug, warn};
use zip::ZipArchive;
use zip::result::ZipError;

/// Context used when an archive cannot be read
pub const UNREADABLE_ARCHIVE_CONTEXT: &str = "Unable to inspect archive contents.";

const EMPTY_PREVIEW: &str = "No readable content available.";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

static TEXT_EXTENSIONS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\.(js|ts|jsx|tsx|py|rb|java|cs|json|md|txt|html|css|scss|sass|less|yaml|yml)$")
        .expect("text extension pattern is valid")
});

/// A file received through the upload endpoint
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// File name without its final extension
    pub fn stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn is_zip(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
    }
}

/// Counters gathered while inspecting an upload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextStats {
    /// Number of files seen; `None` when the upload could not be inspected
    pub files: Option<u64>,
}

/// Textual project snapshot handed to the LLM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub context: String,
    pub stats: ContextStats,
}

impl ProjectContext {
    fn single_file(context: String) -> Self {
        Self {
            context,
            stats: ContextStats { files: Some(1) },
        }
    }

    fn unreadable() -> Self {
        Self {
            context: UNREADABLE_ARCHIVE_CONTEXT.to_string(),
            stats: ContextStats::default(),
        }
    }
}

/// Whether `name` looks like a text source file
pub fn is_text_like(name: &str) -> bool {
    TEXT_EXTENSIONS.is_match(name)
}

/// Builds [`ProjectContext`] values from uploads
#[derive(Debug, Clone)]
pub struct ProjectContextBuilder {
    limits: AnalysisConfig,
}

impl ProjectContextBuilder {
    pub fn new(limits: AnalysisConfig) -> Self {
        Self { limits }
    }

    /// Inspect the upload on the blocking pool
    pub async fn build(&self, upload: &UploadedFile) -> Result<ProjectContext, JoinError> {
        let builder = self.clone();
        let upload = upload.clone();
        tokio::task::spawn_blocking(move || builder.build_blocking(&upload)).await
    }

    /// Inspect the upload on the current thread
    pub fn build_blocking(&self, upload: &UploadedFile) -> ProjectContext {
        if upload.is_zip() {
            return match self.inspect_archive(&upload.bytes) {
                Ok(context) => context,
                Err(e) => {
                    warn!(file_name = %upload.file_name, error = %e, "Failed to inspect archive");
                    ProjectContext::unreadable()
                }
            };
        }

        if is_text_like(&upload.file_name) {
            let preview = lossy_prefix(&upload.bytes, self.limits.preview_bytes);
            let preview = if preview.is_empty() {
                EMPTY_PREVIEW.to_string()
            } else {
                preview
            };
            return ProjectContext::single_file(format!("Primary file preview:\n{preview}"));
        }

        ProjectContext::single_file(format!(
            "Uploaded file {} ({}, {} bytes).",
            upload.file_name,
            upload.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE),
            upload.size()
        ))
    }

    fn inspect_archive(&self, bytes: &Bytes) -> Result<ProjectContext, ZipError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes.clone()))?;
        let total = archive.len();

        let mut manifest = Vec::with_capacity(total.min(self.limits.manifest_entry_limit));
        let mut sample_indices = Vec::with_capacity(self.limits.sample_file_limit);

        for index in 0..total {
            let entry = archive.by_index_raw(index)?;
            let name = entry.name();

            if manifest.len() < self.limits.manifest_entry_limit {
                manifest.push(name.to_string());
            }

            if sample_indices.len() < self.limits.sample_file_limit
                && !entry.is_dir()
                && is_text_like(name)
                && entry.size() > 0
                && entry.size() < self.limits.sample_file_max_bytes
            {
                sample_indices.push(index);
            }
        }

        let samples: Vec<String> = sample_indices
            .into_iter()
            .filter_map(|index| self.read_sample(&mut archive, index))
            .collect();

        debug!(
            entries = total,
            samples = samples.len(),
            "Inspected uploaded archive"
        );

        Ok(ProjectContext {
            context: format!(
                "Project manifest:\n{}\n\nSample files:\n{}",
                manifest.join("\n"),
                samples.join("\n----\n")
            ),
            stats: ContextStats {
                files: Some(total as u64),
            },
        })
    }

    fn read_sample(&self, archive: &mut ZipArchive<Cursor<Bytes>>, index: usize) -> Option<String> {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(index, error = %e, "Skipping unreadable archive entry");
                return None;
            }
        };

        let mut buffer = Vec::with_capacity(self.limits.sample_snippet_bytes);
        let limit = self.limits.sample_snippet_bytes as u64;
        if let Err(e) = (&mut entry).take(limit).read_to_end(&mut buffer) {
            debug!(name = entry.name(), error = %e, "Skipping unreadable archive entry");
            return None;
        }

        Some(format!(
            "File: {}\n{}",
            entry.name(),
            String::from_utf8_lossy(&buffer)
        ))
    }
}

/// First `limit` bytes decoded as UTF-8, replacing invalid sequences
fn lossy_prefix(bytes: &[u8], limit: usize) -> String {
    String::from_utf8_lossy(&bytes[..bytes.len().min(limit)]).into_owned()
}
