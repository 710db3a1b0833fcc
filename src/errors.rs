//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The core math and animation logic is total and never fails. The fallible
//! surface is the outer shell:
//! - Asset loading and decoding errors
//! - Configuration file errors
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, SimError>`.
//!
//! ```rust,ignore
//! use shadow_sim::errors::Result;
//!
//! fn load_config() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the shadow simulator.
#[derive(Error, Debug)]
pub enum SimError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    /// The asset decoded, but contains nothing usable.
    #[error("Empty asset: {0}")]
    EmptyAsset(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<gltf::Error> for SimError {
    fn from(err: gltf::Error) -> Self {
        match err {
            gltf::Error::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                SimError::AssetNotFound(io.to_string())
            }
            other => SimError::GltfError(other.to_string()),
        }
    }
}

/// Alias for `Result<T, SimError>`.
pub type Result<T> = std::result::Result<T, SimError>;
