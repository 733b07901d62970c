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
use crate::{KeyPair, SessionCredential};
use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use log::{debug, info};
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use tokenbridge_core::utils::Redact;
use tokenbridge_core::{Context, Error, Result};

/// OciIdentity names the OCI principal the profile is written for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OciIdentity {
    /// User OCID.
    pub user: String,
    /// Tenancy OCID.
    pub tenancy: String,
    /// Region identifier, like `us-ashburn-1`.
    pub region: String,
}

/// Profile is the `[DEFAULT]` section of the OCI CLI config file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// User OCID.
    pub user: String,
    /// Fingerprint of the public key bound to the session token.
    pub fingerprint: String,
    /// Absolute path of the private key file.
    pub key_file: String,
    /// Tenancy OCID.
    pub tenancy: String,
    /// Region identifier.
    pub region: String,
    /// The session token itself.
    pub security_token: String,
}

impl Debug for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("user", &self.user)
            .field("fingerprint", &self.fingerprint)
            .field("key_file", &self.key_file)
            .field("tenancy", &self.tenancy)
            .field("region", &self.region)
            .field("security_token", &Redact::from(&self.security_token))
            .finish()
    }
}

impl Profile {
    /// Render the config file: one `[DEFAULT]` section, `key=value` lines, values verbatim.
    pub fn to_ini_string(&self) -> Result<String> {
        let mut ini = Ini::new();
        ini.with_section(Some(ORACLE_DEFAULT_PROFILE))
            .set("user", &self.user)
            .set("fingerprint", &self.fingerprint)
            .set("key_file", &self.key_file)
            .set("tenancy", &self.tenancy)
            .set("region", &self.region)
            .set("security_token", &self.security_token);

        let mut buf = Vec::new();
        let opt = WriteOption {
            escape_policy: EscapePolicy::Nothing,
            ..Default::default()
        };
        ini.write_to_opt(&mut buf, opt).map_err(|e| {
            Error::filesystem_failed("failed to render OCI config file").with_source(e)
        })?;
        String::from_utf8(buf).map_err(|e| {
            Error::filesystem_failed("OCI config file is not valid utf-8").with_source(e)
        })
    }

    /// Parse the `[DEFAULT]` section of a config file.
    pub fn parse(content: &str) -> Result<Self> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        };
        let ini = Ini::load_from_str_opt(content, opt).map_err(|e| {
            Error::config_invalid(format!("failed to parse OCI config file: {e}"))
        })?;
        let section = ini.section(Some(ORACLE_DEFAULT_PROFILE)).ok_or_else(|| {
            Error::config_invalid(format!(
                "profile {ORACLE_DEFAULT_PROFILE} not found in OCI config file"
            ))
        })?;

        let get = |key: &str| -> Result<String> {
            section.get(key).map(|v| v.to_string()).ok_or_else(|| {
                Error::config_invalid(format!("OCI config file is missing {key}"))
            })
        };

        Ok(Self {
            user: get("user")?,
            fingerprint: get("fingerprint")?,
            key_file: get("key_file")?,
            tenancy: get("tenancy")?,
            region: get("region")?,
            security_token: get("security_token")?,
        })
    }
}

/// CredentialLayout fixes where each file of the bundle lives below the workspace.
///
/// ```text
/// <workspace>/.oci/config
/// <workspace>/private_key.pem
/// <workspace>/public_key.pem
/// <workspace>/session
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialLayout {
    workspace: PathBuf,
}

impl CredentialLayout {
    /// Create a layout rooted at `workspace`, which should be absolute.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
        }
    }

    /// The workspace root.
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// `<workspace>/.oci`
    pub fn config_dir(&self) -> PathBuf {
        self.workspace.join(ORACLE_CONFIG_DIR)
    }

    /// `<workspace>/.oci/config`
    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join(ORACLE_CONFIG_FILE_NAME)
    }

    /// `<workspace>/private_key.pem`
    pub fn private_key_file(&self) -> PathBuf {
        self.workspace.join(PRIVATE_KEY_FILE_NAME)
    }

    /// `<workspace>/public_key.pem`
    pub fn public_key_file(&self) -> PathBuf {
        self.workspace.join(PUBLIC_KEY_FILE_NAME)
    }

    /// `<workspace>/session`
    pub fn session_file(&self) -> PathBuf {
        self.workspace.join(SESSION_FILE_NAME)
    }
}

/// CredentialBundle describes the files written by a successful run.
///
/// The bundle outlives the process; nothing here cleans it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialBundle {
    /// Path of the OCI CLI config file.
    pub config_file: PathBuf,
    /// Path of the PKCS#1 private key, identical to `key_file` in the config.
    pub private_key_file: PathBuf,
    /// Path of the SubjectPublicKeyInfo public key.
    pub public_key_file: PathBuf,
    /// Path of the raw session token.
    pub session_file: PathBuf,
    /// Fingerprint recorded in the config.
    pub fingerprint: String,
}

/// Materializer writes the credential bundle to disk.
///
/// Each write must succeed before the next starts. Partial bundles are not rolled
/// back, and concurrent runs against the same workspace may interleave.
#[derive(Debug, Clone)]
pub struct Materializer {
    layout: CredentialLayout,
    identity: OciIdentity,
}

impl Materializer {
    /// Create a materializer for `identity` writing below `layout`.
    pub fn new(layout: CredentialLayout, identity: OciIdentity) -> Self {
        Self { layout, identity }
    }

    /// The layout files are written to.
    pub fn layout(&self) -> &CredentialLayout {
        &self.layout
    }

    /// Write config, private key, public key and session token, in that order.
    pub async fn materialize(
        &self,
        ctx: &Context,
        key_pair: &KeyPair,
        fingerprint: &str,
        credential: &SessionCredential,
    ) -> Result<CredentialBundle> {
        let config_dir = path_to_str(self.layout.config_dir())?;
        let config_file = path_to_str(self.layout.config_file())?;
        let private_key_file = path_to_str(self.layout.private_key_file())?;
        let public_key_file = path_to_str(self.layout.public_key_file())?;
        let session_file = path_to_str(self.layout.session_file())?;

        let profile = Profile {
            user: self.identity.user.clone(),
            fingerprint: fingerprint.to_string(),
            key_file: private_key_file.clone(),
            tenancy: self.identity.tenancy.clone(),
            region: self.identity.region.clone(),
            security_token: credential.access_token.clone(),
        };
        debug!("materializing OCI profile: {profile:?}");

        ctx.create_dir_all(&config_dir).await?;
        ctx.file_write(&config_file, profile.to_ini_string()?.as_bytes())
            .await?;

        let private_pem = key_pair.private_key_pkcs1_pem()?;
        ctx.file_write(&profile.key_file, private_pem.as_bytes())
            .await?;

        let public_pem = key_pair.public_key_pem()?;
        ctx.file_write(&public_key_file, public_pem.as_bytes())
            .await?;

        ctx.file_write(&session_file, credential.access_token.as_bytes())
            .await?;

        info!("OCI CLI profile written to {config_file}");
        Ok(CredentialBundle {
            config_file: config_file.into(),
            private_key_file: private_key_file.into(),
            public_key_file: public_key_file.into(),
            session_file: session_file.into(),
            fingerprint: profile.fingerprint,
        })
    }
}

fn path_to_str(path: PathBuf) -> Result<String> {
    path.into_os_string().into_string().map_err(|p| {
        Error::filesystem_failed(format!("path is not valid utf-8: {}", p.to_string_lossy()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile() -> Profile {
        Profile {
            user: "ocid1.user.oc1..aaaa".to_string(),
            fingerprint: "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=".to_string(),
            key_file: "/home/runner/work/repo/private_key.pem".to_string(),
            tenancy: "ocid1.tenancy.oc1..bbbb".to_string(),
            region: "us-ashburn-1".to_string(),
            security_token: "abc123".to_string(),
        }
    }

    #[test]
    fn test_profile_format() {
        let content = profile().to_ini_string().unwrap();
        let lines: Vec<&str> = content.lines().filter(|l| !l.is_empty()).collect();

        assert_eq!(
            lines,
            vec![
                "[DEFAULT]",
                "user=ocid1.user.oc1..aaaa",
                "fingerprint=LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=",
                "key_file=/home/runner/work/repo/private_key.pem",
                "tenancy=ocid1.tenancy.oc1..bbbb",
                "region=us-ashburn-1",
                "security_token=abc123",
            ]
        );
    }

    #[test]
    fn test_profile_parse_roundtrip() {
        let expected = profile();
        let parsed = Profile::parse(&expected.to_ini_string().unwrap()).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_profile_parse_missing_field() {
        let err = Profile::parse("[DEFAULT]\nuser=u\n").unwrap_err();
        assert!(err.to_string().contains("fingerprint"));

        let err = Profile::parse("[other]\nuser=u\n").unwrap_err();
        assert!(err.to_string().contains("DEFAULT"));
    }

    #[test]
    fn test_profile_debug_redacts_token() {
        let mut p = profile();
        p.security_token = "very-secret-session-token".to_string();
        assert!(!format!("{p:?}").contains("very-secret-session-token"));
    }

    #[test]
    fn test_layout() {
        let layout = CredentialLayout::new("/home/runner/work/repo");

        assert_eq!(
            layout.config_file(),
            PathBuf::from("/home/runner/work/repo/.oci/config")
        );
        assert_eq!(
            layout.private_key_file(),
            PathBuf::from("/home/runner/work/repo/private_key.pem")
        );
        assert_eq!(
            layout.public_key_file(),
            PathBuf::from("/home/runner/work/repo/public_key.pem")
        );
        assert_eq!(
            layout.session_file(),
            PathBuf::from("/home/runner/work/repo/session")
        );
    }
}
