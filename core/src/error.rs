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

use std::fmt;
use thiserror::Error;

/// The error type for tokenbridge operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input is missing or invalid
    ConfigInvalid,

    /// No identity token could be obtained from the CI host or an override
    IdentityUnavailable,

    /// Key generation or key encoding failed
    KeyInvalid,

    /// The token exchange call failed (network, status, body)
    ExchangeFailed,

    /// Creating a directory or writing a file failed
    FilesystemFailed,

    /// An external command is missing or exited unsuccessfully
    CommandUnavailable,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Render the message followed by every source in the chain.
    ///
    /// This is the single line reported to the CI host.
    pub fn report(&self) -> String {
        let mut out = self.message.clone();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            out.push_str(": ");
            out.push_str(&err.to_string());
            source = err.source();
        }
        out
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an identity unavailable error
    pub fn identity_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IdentityUnavailable, message)
    }

    /// Create a key invalid error
    pub fn key_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeyInvalid, message)
    }

    /// Create an exchange failed error
    pub fn exchange_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExchangeFailed, message)
    }

    /// Create a filesystem failed error
    pub fn filesystem_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::FilesystemFailed, message)
    }

    /// Create a command unavailable error
    pub fn command_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CommandUnavailable, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::IdentityUnavailable => write!(f, "identity token unavailable"),
            ErrorKind::KeyInvalid => write!(f, "invalid key material"),
            ErrorKind::ExchangeFailed => write!(f, "token exchange failed"),
            ErrorKind::FilesystemFailed => write!(f, "filesystem error"),
            ErrorKind::CommandUnavailable => write!(f, "command unavailable"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::unexpected("failed to build http request").with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_includes_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err = Error::filesystem_failed("failed to write file").with_source(io);

        assert_eq!(err.kind(), ErrorKind::FilesystemFailed);
        assert_eq!(err.to_string(), "failed to write file");
        assert_eq!(err.report(), "failed to write file: permission denied");
    }

    #[test]
    fn test_report_without_source() {
        let err = Error::identity_unavailable("Unable to obtain OIDC token");
        assert_eq!(err.report(), "Unable to obtain OIDC token");
    }
}
