// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Temporary directory management for integration tests.
//!
//! This module provides utilities for creating and managing temporary
//! directories with automatic cleanup on drop.

use std::path::PathBuf;
use tokio::fs;

/// Temporary directories used for testing.
///
/// Automatically cleans up all created directories when dropped.
#[derive(Debug)]
pub struct TempDirs {
    /// Data directory for event documents.
    pub data_dir: PathBuf,
}

impl TempDirs {
    /// Creates new temporary directories for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let base = tempfile::tempdir()?.keep();
        let data_dir = base.join("data");
        fs::create_dir_all(&data_dir).await?;
        Ok(Self { data_dir })
    }

    /// Gets the base temporary directory.
    #[must_use]
    pub fn base(&self) -> PathBuf {
        self.data_dir
            .parent()
            .expect("temp directories should have a parent")
            .to_path_buf()
    }
}

/// Sets up temporary directories for integration tests.
///
/// This is a convenience wrapper around [`TempDirs::new`].
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub async fn setup_temp_dirs() -> Result<TempDirs, Box<dyn std::error::Error>> {
    TempDirs::new().await
}

impl Drop for TempDirs {
    fn drop(&mut self) {
        let base = self.base();
        if let Err(e) = std::fs::remove_dir_all(&base) {
            tracing::warn!(path = %base.display(), err = %e, "failed to clean up temp directory");
        }
    }
}
