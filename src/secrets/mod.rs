//! Secret masking.
//!
//! Secrets handed to a workflow run must never show up in a trace or a log
//! except as `***`, the way the hosted runner masks them.
//!
//! - [`SecretMasker`] - replaces registered values in text
//! - [`MaskingWriter`] - line-buffered writer applying a masker
//! - [`looks_secret`] - flags env var names that hold credentials
//!
//! # Example
//!
//! ```
//! use workflow_fixtures::secrets::SecretMasker;
//!
//! let mut masker = SecretMasker::new();
//! masker.add_secret("ghp_abc123");
//! assert_eq!(masker.mask("token=ghp_abc123"), "token=***");
//! ```

use regex::Regex;
use std::io::{self, Write};
use std::sync::LazyLock;

use crate::step::line::escape_value;

/// Replacement for every secret value.
pub const MASK: &str = "***";

static SECRET_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(API_?KEY|SECRET|TOKEN|PASSWORD|PASSWD|CREDENTIAL|PRIVATE_KEY|WEBHOOK)")
        .expect("SECRET_NAME_REGEX must compile")
});

/// Whether an environment variable name looks like it holds a credential.
///
/// ```
/// use workflow_fixtures::secrets::looks_secret;
///
/// assert!(looks_secret("GITHUB_TOKEN"));
/// assert!(looks_secret("SLACK_WEBHOOK"));
/// assert!(!looks_secret("NODE_ENV"));
/// ```
pub fn looks_secret(name: &str) -> bool {
    SECRET_NAME_REGEX.is_match(name)
}

/// Masks registered secret values.
#[derive(Debug, Clone, Default)]
pub struct SecretMasker {
    /// Longest first, so a secret containing another is masked whole.
    secrets: Vec<String>,
}

impl SecretMasker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a secret value. Empty strings and duplicates are ignored.
    ///
    /// The form a mock line prints the value in is registered too.
    pub fn add_secret(&mut self, value: impl Into<String>) {
        let value = value.into();
        let escaped = escape_value(&value);
        if escaped != value {
            self.insert(escaped);
        }
        self.insert(value);
    }

    fn insert(&mut self, value: String) {
        if value.is_empty() || self.secrets.contains(&value) {
            return;
        }
        let at = self
            .secrets
            .iter()
            .position(|s| s.len() < value.len())
            .unwrap_or(self.secrets.len());
        self.secrets.insert(at, value);
    }

    /// Register several secret values.
    pub fn add_secrets(&mut self, values: impl IntoIterator<Item = impl Into<String>>) {
        for value in values {
            self.add_secret(value);
        }
    }

    /// Replace every registered value with [`MASK`].
    pub fn mask(&self, input: &str) -> String {
        let mut result = input.to_string();
        for secret in &self.secrets {
            result = result.replace(secret.as_str(), MASK);
        }
        result
    }

    pub fn secret_count(&self) -> usize {
        self.secrets.len()
    }

    /// Wrap a writer so everything written through it is masked.
    ///
    /// Masking is applied per line, so a secret split across two `write`
    /// calls is still caught.
    pub fn writer<W: Write>(&self, inner: W) -> MaskingWriter<'_, W> {
        MaskingWriter {
            inner,
            masker: self,
            buffer: String::new(),
        }
    }
}

/// A writer that masks secret values line by line.
pub struct MaskingWriter<'a, W: Write> {
    inner: W,
    masker: &'a SecretMasker,
    buffer: String,
}

impl<W: Write> Write for MaskingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.push_str(&String::from_utf8_lossy(buf));

        while let Some(newline_pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline_pos).collect();
            self.inner.write_all(self.masker.mask(&line).as_bytes())?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let masked = self.masker.mask(&self.buffer);
            self.inner.write_all(masked.as_bytes())?;
            self.buffer.clear();
        }
        self.inner.flush()
    }
}
