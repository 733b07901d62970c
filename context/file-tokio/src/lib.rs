// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Tokio-based file access implementation for tokenbridge.
//!
//! This crate provides `TokioFile`, which implements both the `FileRead` and
//! `FileWrite` traits from `tokenbridge_core` using Tokio's file system operations.
//!
//! ## Example
//!
//! ```no_run
//! use tokenbridge_core::{Context, OsEnv};
//! use tokenbridge_file_tokio::TokioFile;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFile)
//!         .with_file_write(TokioFile)
//!         .with_env(OsEnv);
//!
//!     match ctx.file_write("/tmp/session", b"token").await {
//!         Ok(()) => println!("written"),
//!         Err(e) => eprintln!("Failed to write file: {}", e),
//!     }
//! }
//! ```

use async_trait::async_trait;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use tokenbridge_core::{Error, FileRead, FileWrite, Result};
use tokio::io::AsyncWriteExt;

/// Tokio-based implementation of the `FileRead` and `FileWrite` traits.
///
/// Written files end up with mode `0600` on unix, including files that already
/// existed with wider permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFile;

#[async_trait]
impl FileRead for TokioFile {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| Error::unexpected(format!("failed to read file {path}")).with_source(e))
    }
}

#[async_trait]
impl FileWrite for TokioFile {
    async fn create_dir_all(&self, path: &str) -> Result<()> {
        tokio::fs::create_dir_all(path).await.map_err(|e| {
            Error::filesystem_failed(format!("failed to create directory {path}")).with_source(e)
        })
    }

    async fn file_write(&self, path: &str, content: &[u8]) -> Result<()> {
        let mut opts = tokio::fs::OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        #[cfg(unix)]
        opts.mode(0o600);

        let write = async {
            let mut f = opts.open(path).await?;
            // `mode` only applies on creation, so tighten existing files before writing.
            #[cfg(unix)]
            f.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await?;
            f.write_all(content).await?;
            f.flush().await
        };
        write.await.map_err(|e| {
            Error::filesystem_failed(format!("failed to write file {path}")).with_source(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenbridge_core::ErrorKind;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join(".oci");
        let nested = nested.to_str().unwrap();

        TokioFile.create_dir_all(nested).await.unwrap();
        // Idempotent.
        TokioFile.create_dir_all(nested).await.unwrap();

        let path = format!("{nested}/config");
        TokioFile.file_write(&path, b"first version").await.unwrap();
        TokioFile.file_write(&path, b"second").await.unwrap();

        assert_eq!(TokioFile.file_read(&path).await.unwrap(), b"second");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_new_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private_key.pem");
        let path = path.to_str().unwrap();

        TokioFile.file_write(path, b"pem").await.unwrap();

        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_overwrite_tightens_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("private_key.pem");
        std::fs::write(&path, b"old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        TokioFile
            .file_write(path.to_str().unwrap(), b"new pem")
            .await
            .unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read(&path).unwrap(), b"new pem");
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("session");

        let err = TokioFile
            .file_write(path.to_str().unwrap(), b"token")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FilesystemFailed);
    }
}
