//! File-backed cookie jar
//!
//! Holds the session `token` and the recent `skinTestResults`. Cookies carry
//! an optional expiry and are dropped when read after it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::quiz::SkinTestResult;

pub const TOKEN_COOKIE: &str = "token";
pub const SKIN_TEST_COOKIE: &str = "skinTestResults";

const MAX_SKIN_TEST_RESULTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Cookie {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

#[derive(Debug, Clone)]
pub struct CookieStore {
    path: PathBuf,
    cookies: BTreeMap<String, Cookie>,
}

impl CookieStore {
    /// Open the jar at `path`; a missing file is an empty jar
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cookies = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, cookies })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the jar back, creating parent directories as needed
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.cookies)?)?;
        tracing::debug!(path = %self.path.display(), "saved cookies");
        Ok(())
    }

    /// Value of `name`, dropping it first if it has expired
    pub fn get(&mut self, name: &str, now: DateTime<Utc>) -> Option<&str> {
        if self.cookies.get(name).is_some_and(|c| c.is_expired(now)) {
            self.cookies.remove(name);
        }
        self.cookies.get(name).map(|c| c.value.as_str())
    }

    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.cookies.insert(
            name.into(),
            Cookie {
                value: value.into(),
                expires_at,
            },
        );
    }

    pub fn remove(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    pub fn token(&mut self) -> Option<String> {
        self.get(TOKEN_COOKIE, Utc::now()).map(ToString::to_string)
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.set(TOKEN_COOKIE, token, None);
    }

    pub fn clear_token(&mut self) {
        self.remove(TOKEN_COOKIE);
    }

    /// Recent quiz results, newest first. A corrupt cookie reads as empty.
    pub fn skin_test_results(&mut self, now: DateTime<Utc>) -> Vec<SkinTestResult> {
        self.get(SKIN_TEST_COOKIE, now)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    /// Prepend `result`, keep the newest five and restart the 24 hour expiry
    ///
    /// # Errors
    /// Returns an error if the results cannot be serialized.
    pub fn push_skin_test_result(
        &mut self,
        result: SkinTestResult,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut results = self.skin_test_results(now);
        results.insert(0, result);
        results.truncate(MAX_SKIN_TEST_RESULTS);
        self.set(
            SKIN_TEST_COOKIE,
            serde_json::to_string(&results)?,
            Some(now + Duration::hours(24)),
        );
        Ok(())
    }
}
