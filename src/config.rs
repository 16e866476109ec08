// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;

/// How caller identity is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Trust the `x-naive-auth` header verbatim. UNSAFE, local/testing only.
    Naive,
    /// Verify an HS256 JWT from the Authorization header.
    Bearer,
}

/// Which storage backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// In-memory store, nothing survives a restart.
    Memory,
    /// Firestore document store.
    Firestore,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore backend)
    pub gcp_project_id: String,
    /// Identity resolution strategy
    pub auth_mode: AuthMode,
    /// Storage backend
    pub storage: StorageBackend,
    /// JWT signing key for session tokens (raw bytes, bearer mode)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let auth_mode = match env::var("AUTH_MODE").as_deref() {
            Ok("naive") => AuthMode::Naive,
            Ok("bearer") | Err(_) => AuthMode::Bearer,
            Ok(other) => return Err(ConfigError::Invalid("AUTH_MODE", other.to_string())),
        };

        let storage = match env::var("STORAGE").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            Ok("firestore") | Err(_) => StorageBackend::Firestore,
            Ok(other) => return Err(ConfigError::Invalid("STORAGE", other.to_string())),
        };

        // The signing key is only meaningful for bearer auth.
        let jwt_signing_key = match auth_mode {
            AuthMode::Bearer => env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            AuthMode::Naive => env::var("JWT_SIGNING_KEY")
                .map(String::into_bytes)
                .unwrap_or_default(),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            auth_mode,
            storage,
            jwt_signing_key,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            auth_mode: AuthMode::Naive,
            storage: StorageBackend::Memory,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
