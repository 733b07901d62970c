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

use crate::constants::*;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokenbridge_core::utils::{non_empty, Redact};
use tokenbridge_core::{Context, Error, Result};
use tokenbridge_oracle::{CliCheck, OciIdentity, TokenExchange};

/// Config for a bridge run.
///
/// Explicit values win. [`Config::load_env`] fills whatever is still unset from
/// the action inputs the runner exports.
#[derive(Clone, Default)]
pub struct Config {
    /// OAuth client id of the identity domain confidential application.
    pub client_id: Option<String>,
    /// OAuth client secret of the identity domain confidential application.
    pub client_secret: Option<String>,
    /// Base url of the identity domain, for example `https://idcs-xxx.identity.oraclecloud.com`.
    pub domain_base_url: Option<String>,
    /// OCID of the OCI user written to the profile.
    pub oci_user: Option<String>,
    /// OCID of the OCI tenancy written to the profile.
    pub oci_tenancy: Option<String>,
    /// OCI region written to the profile.
    pub oci_region: Option<String>,
    /// Subject token to use instead of the one issued by the CI host.
    pub test_token: Option<String>,
    /// Audience requested from the CI host.
    pub audience: Option<String>,
    /// File holding an identity token, for hosts that project it to disk.
    pub id_token_file: Option<String>,
    /// Timeout of every HTTP call.
    pub timeout: Option<Duration>,
    /// Whether to probe the `oci` CLI before the exchange.
    pub cli_check: Option<CliCheck>,
    /// Directory the credential bundle is written below.
    pub workspace: Option<PathBuf>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &Redact::from(&self.client_secret))
            .field("domain_base_url", &self.domain_base_url)
            .field("oci_user", &self.oci_user)
            .field("oci_tenancy", &self.oci_tenancy)
            .field("oci_region", &self.oci_region)
            .field("test_token", &Redact::from(&self.test_token))
            .field("audience", &self.audience)
            .field("id_token_file", &self.id_token_file)
            .field("timeout", &self.timeout)
            .field("cli_check", &self.cli_check)
            .field("workspace", &self.workspace)
            .finish()
    }
}

impl Config {
    /// Fill unset fields from the environment.
    ///
    /// Empty values count as unset. Fails only on values that are present but
    /// malformed; missing required inputs are reported when the bridge runs.
    pub fn load_env(mut self, ctx: &Context) -> Result<Self> {
        let env = |key: &str| non_empty(ctx.env_var(key));

        self.client_id = non_empty(self.client_id).or_else(|| env(INPUT_CLIENT_ID));
        self.client_secret = non_empty(self.client_secret).or_else(|| env(INPUT_CLIENT_SECRET));
        self.domain_base_url =
            non_empty(self.domain_base_url).or_else(|| env(INPUT_DOMAIN_BASE_URL));
        self.oci_user = non_empty(self.oci_user).or_else(|| env(INPUT_OCI_USER));
        self.oci_tenancy = non_empty(self.oci_tenancy).or_else(|| env(INPUT_OCI_TENANCY));
        self.oci_region = non_empty(self.oci_region).or_else(|| env(INPUT_OCI_REGION));
        self.test_token = non_empty(self.test_token).or_else(|| env(INPUT_TEST_TOKEN));
        self.audience = non_empty(self.audience).or_else(|| env(INPUT_AUDIENCE));
        self.id_token_file = non_empty(self.id_token_file).or_else(|| env(INPUT_ID_TOKEN_FILE));

        if self.timeout.is_none() {
            if let Some(v) = env(INPUT_TIMEOUT) {
                let secs: u64 = v.trim().parse().map_err(|e| {
                    Error::config_invalid(format!("invalid timeout {v:?}, expected seconds"))
                        .with_source(e)
                })?;
                self.timeout = Some(Duration::from_secs(secs));
            }
        }

        if self.cli_check.is_none() {
            if let Some(v) = env(INPUT_CLI_CHECK) {
                self.cli_check = Some(v.parse()?);
            }
        }

        if self.workspace.is_none() {
            self.workspace = env(GITHUB_WORKSPACE).map(PathBuf::from);
        }

        Ok(self)
    }

    /// Timeout of every HTTP call.
    pub fn timeout(&self) -> Duration {
        self.timeout
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Whether and how the `oci` CLI is probed.
    pub fn cli_check(&self) -> CliCheck {
        self.cli_check.unwrap_or_default()
    }

    /// Build the token exchange client from the client credentials and domain.
    pub fn token_exchange(&self) -> Result<TokenExchange> {
        Ok(TokenExchange::new(
            required("domain_base_url", &self.domain_base_url)?,
            required("client_id", &self.client_id)?,
            required("client_secret", &self.client_secret)?,
        ))
    }

    /// The OCI identity written to the profile.
    pub fn oci_identity(&self) -> Result<OciIdentity> {
        Ok(OciIdentity {
            user: required("oci_user", &self.oci_user)?.to_string(),
            tenancy: required("oci_tenancy", &self.oci_tenancy)?.to_string(),
            region: required("oci_region", &self.oci_region)?.to_string(),
        })
    }

    /// Resolve the workspace to an absolute path.
    ///
    /// Defaults to the current directory. A leading `~` is expanded against the
    /// home directory known to `ctx`.
    pub fn workspace(&self, ctx: &Context) -> Result<PathBuf> {
        let Some(path) = &self.workspace else {
            return current_dir();
        };

        let path = path.to_str().ok_or_else(|| {
            Error::config_invalid(format!("workspace {path:?} is not valid utf-8"))
        })?;
        let expanded = ctx.expand_home_dir(path).ok_or_else(|| {
            Error::config_invalid(format!(
                "workspace {path:?} refers to the home directory, which is unknown"
            ))
        })?;

        absolute(Path::new(&expanded))
    }
}

fn required<'a>(name: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::config_invalid(format!(
            "Input required and not supplied: {name}"
        ))),
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        Error::config_invalid("failed to resolve the current directory").with_source(e)
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(current_dir()?.join(path))
}
