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

use log::debug;
use std::fmt;
use std::str::FromStr;
use tokenbridge_core::{Context, Error, Result};

/// CliCheck decides whether the `oci` presence check runs and what a failure means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CliCheck {
    /// Do not probe the CLI.
    #[default]
    Skip,
    /// Probe and log a warning on failure, then continue.
    Warn,
    /// Probe and fail the run on failure.
    Require,
}

impl FromStr for CliCheck {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "false" | "off" => Ok(CliCheck::Skip),
            "warn" => Ok(CliCheck::Warn),
            "require" | "true" | "on" => Ok(CliCheck::Require),
            v => Err(Error::config_invalid(format!(
                "invalid cli_check {v:?}, expected one of skip, warn, require"
            ))),
        }
    }
}

impl fmt::Display for CliCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliCheck::Skip => write!(f, "skip"),
            CliCheck::Warn => write!(f, "warn"),
            CliCheck::Require => write!(f, "require"),
        }
    }
}

/// Run `<program> --version` and return the reported version.
///
/// Fails with a command unavailable error if the program cannot be spawned or exits
/// unsuccessfully.
pub async fn validate_cli_installed(ctx: &Context, program: &str) -> Result<String> {
    let output = ctx
        .command_execute(program, &["--version"])
        .await
        .map_err(|e| {
            Error::command_unavailable("OCI CLI is not installed or not configured").with_source(e)
        })?;

    if !output.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::command_unavailable(format!(
            "OCI CLI is not installed or not configured: {program} --version exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!("{program} --version reported {version}");
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use tokenbridge_core::{CommandExecute, CommandOutput, ErrorKind};

    #[derive(Debug)]
    struct MockCommand(Option<CommandOutput>);

    #[async_trait]
    impl CommandExecute for MockCommand {
        async fn command_execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
            assert_eq!(program, "oci");
            assert_eq!(args, &["--version"]);
            self.0
                .clone()
                .ok_or_else(|| Error::command_unavailable("No such file or directory"))
        }
    }

    #[test_case("skip", CliCheck::Skip)]
    #[test_case("WARN", CliCheck::Warn)]
    #[test_case(" require ", CliCheck::Require)]
    #[test_case("true", CliCheck::Require)]
    fn test_cli_check_from_str(input: &str, expected: CliCheck) {
        assert_eq!(input.parse::<CliCheck>().unwrap(), expected);
    }

    #[test]
    fn test_cli_check_invalid() {
        let err = "sometimes".parse::<CliCheck>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_cli_installed() {
        let ctx = Context::new().with_command_execute(MockCommand(Some(CommandOutput {
            status: 0,
            stdout: b"3.45.2\n".to_vec(),
            stderr: vec![],
        })));

        assert_eq!(validate_cli_installed(&ctx, "oci").await.unwrap(), "3.45.2");
    }

    #[tokio::test]
    async fn test_cli_missing() {
        let ctx = Context::new().with_command_execute(MockCommand(None));

        let err = validate_cli_installed(&ctx, "oci").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CommandUnavailable);
        assert_eq!(err.to_string(), "OCI CLI is not installed or not configured");
    }

    #[tokio::test]
    async fn test_cli_non_zero_exit() {
        let ctx = Context::new().with_command_execute(MockCommand(Some(CommandOutput {
            status: 2,
            stdout: vec![],
            stderr: b"config file not found".to_vec(),
        })));

        let err = validate_cli_installed(&ctx, "oci").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CommandUnavailable);
        assert!(err.to_string().contains("config file not found"));
    }
}
