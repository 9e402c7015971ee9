// src/source.rs
//! Where raw page text comes from. The runner only ever sees a `PageSource`;
//! fetching finishes before any parsing starts.

use std::fs;
use std::path::PathBuf;

use crate::core::net;
use crate::error::{AnalysisError, Result};

pub trait PageSource {
    /// Raw page text (JSON, or HTML wrapping JSON).
    fn fetch(&self) -> Result<String>;

    /// Human label for logs and errors.
    fn describe(&self) -> String;
}

/// A local file.
pub struct FileSource(pub PathBuf);

impl PageSource for FileSource {
    fn fetch(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.0)?)
    }

    fn describe(&self) -> String {
        format!("file {}", self.0.display())
    }
}

/// An http(s) URL.
pub struct HttpSource(pub String);

impl PageSource for HttpSource {
    fn fetch(&self) -> Result<String> {
        logf!("Fetch: GET {}", self.0);
        net::http_get(&self.0).map_err(|e| AnalysisError::fetch(&self.0, e))
    }

    fn describe(&self) -> String {
        format!("URL {}", self.0)
    }
}

/// Text already in memory (pre-fetched pages, tests).
pub struct TextSource(pub String);

impl PageSource for TextSource {
    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        s!("in-memory document")
    }
}
