// src/error.rs

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::platform::api::PlatformResult;

#[derive(Debug, Error)]
pub enum AppError {
    /// A required subsystem, window or renderer could not be brought up.
    #[error("{stage} failed: {reason}")]
    Initialization { stage: &'static str, reason: String },

    /// An image could not be decoded or uploaded.
    #[error("failed to load image texture {}: {reason}", .path.display())]
    ResourceLoad { path: PathBuf, reason: String },

    #[cfg(feature = "sdl")]
    #[error("libloading: {0}")]
    Lib(#[from] libloading::Error), // shared library or symbol missing
}

impl AppError {
    pub fn initialization(stage: &'static str, reason: impl Into<String>) -> Self {
        Self::Initialization {
            stage,
            reason: reason.into(),
        }
    }

    pub fn resource_load(path: &Path, reason: impl Into<String>) -> Self {
        Self::ResourceLoad {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Lifts a raw platform result into an [`AppError`] with context.
pub trait PlatformResultExt<T> {
    fn or_init_error(self, stage: &'static str) -> Result<T>;
    fn or_load_error(self, path: &Path) -> Result<T>;
}

impl<T> PlatformResultExt<T> for PlatformResult<T> {
    fn or_init_error(self, stage: &'static str) -> Result<T> {
        self.map_err(|reason| AppError::Initialization { stage, reason })
    }

    fn or_load_error(self, path: &Path) -> Result<T> {
        self.map_err(|reason| AppError::ResourceLoad {
            path: path.to_path_buf(),
            reason,
        })
    }
}
