/*!
 * Credential loading for the translation backends.
 *
 * Credentials come from the process environment, overlaid with the
 * assignments of a `.env`-style dotfile. The merged map is never written
 * back into the process environment; backends receive typed credential
 * structs built from it and fail at construction when a key is absent.
 */

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::errors::ProviderError;

/// User identifier for the Bhashini pipeline API
pub const BHASHINI_USER_ID: &str = "BHASHINI_USER_ID";
/// API key for the Bhashini pipeline API
pub const BHASHINI_API_KEY: &str = "BHASHINI_API_KEY";
/// API key for Google Cloud Translation
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
/// OAuth access token used when no API key is configured
pub const GOOGLE_OAUTH_ACCESS_TOKEN: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Merged key/value credential store
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    values: HashMap<String, String>,
}

impl Credentials {
    /// Build a store from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Snapshot of the process environment
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    /// Process environment overlaid with the dotfile, if it exists
    pub fn load<P: AsRef<Path>>(env_file: P) -> Result<Self> {
        let mut credentials = Self::from_env();
        credentials.merge_dotfile(env_file)?;
        Ok(credentials)
    }

    /// Merge the assignments of a dotfile, overriding existing values.
    ///
    /// A missing file is not an error. Lines that do not parse as an
    /// assignment are logged and skipped.
    pub fn merge_dotfile<P: AsRef<Path>>(&mut self, env_file: P) -> Result<usize> {
        let path = env_file.as_ref();

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if e.not_found() => {
                debug!("No credentials file at {:?}", path);
                return Ok(0);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open credentials file: {:?}", path));
            }
        };

        let mut merged = 0;
        for item in iter {
            match item {
                Ok((key, value)) => {
                    self.values.insert(key, value);
                    merged += 1;
                }
                Err(e) => warn!("Ignoring malformed line in {:?}: {}", path, e),
            }
        }

        debug!("Loaded {} credential(s) from {:?}", merged, path);
        Ok(merged)
    }

    /// Value for a key, treating empty strings as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Value for a key, or a missing credential error
    pub fn require(&self, key: &str) -> Result<&str, ProviderError> {
        self.get(key)
            .ok_or_else(|| ProviderError::MissingCredential(key.to_string()))
    }
}

/// Credentials for the Bhashini pipeline API
#[derive(Debug, Clone)]
pub struct BhashiniCredentials {
    pub user_id: String,
    pub api_key: String,
}

impl BhashiniCredentials {
    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ProviderError> {
        Ok(Self {
            user_id: credentials.require(BHASHINI_USER_ID)?.to_string(),
            api_key: credentials.require(BHASHINI_API_KEY)?.to_string(),
        })
    }
}

/// Authentication for Google Cloud Translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleCloudAuth {
    /// `key` query parameter
    ApiKey(String),
    /// Bearer token from ambient service credentials
    AccessToken(String),
}

impl GoogleCloudAuth {
    /// API key first, then ambient access token
    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ProviderError> {
        if let Some(key) = credentials.get(GOOGLE_API_KEY) {
            return Ok(Self::ApiKey(key.to_string()));
        }

        warn!("{} not found. Attempting to use ambient access token...", GOOGLE_API_KEY);
        credentials
            .get(GOOGLE_OAUTH_ACCESS_TOKEN)
            .map(|token| Self::AccessToken(token.to_string()))
            .ok_or_else(|| {
                ProviderError::MissingCredential(format!(
                    "{} or {}",
                    GOOGLE_API_KEY, GOOGLE_OAUTH_ACCESS_TOKEN
                ))
            })
    }
}

/// Mask a secret for display, keeping the first and last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}
