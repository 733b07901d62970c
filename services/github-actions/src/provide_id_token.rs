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
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION};
use log::{debug, error};
use serde::Deserialize;
use tokenbridge_core::utils::non_empty;
use tokenbridge_core::{Context, Error, IdToken, ProvideIdToken, Result};

/// The JSON payload returned by the GitHub ID token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    value: String,
}

/// GithubActionsIdTokenProvider fetches the job's OIDC token from the Actions runtime.
///
/// Returns `None` outside GitHub Actions or when the job lacks `id-token: write`.
#[derive(Debug, Clone, Default)]
pub struct GithubActionsIdTokenProvider {
    audience: Option<String>,
}

impl GithubActionsIdTokenProvider {
    /// Create a provider using the endpoint's default audience.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a token for a specific audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = non_empty(Some(audience.into()));
        self
    }

    fn request_url(&self, base: &str) -> String {
        match &self.audience {
            None => base.to_string(),
            Some(aud) => {
                let sep = if base.contains('?') { '&' } else { '?' };
                let aud: String = form_urlencoded::byte_serialize(aud.as_bytes()).collect();
                format!("{base}{sep}audience={aud}")
            }
        }
    }
}

#[async_trait]
impl ProvideIdToken for GithubActionsIdTokenProvider {
    async fn provide_id_token(&self, ctx: &Context) -> Result<Option<IdToken>> {
        let url = non_empty(ctx.env_var(ACTIONS_ID_TOKEN_REQUEST_URL));
        let token = non_empty(ctx.env_var(ACTIONS_ID_TOKEN_REQUEST_TOKEN));

        let (url, token) = match (url, token) {
            (Some(url), Some(token)) => (url, token),
            _ => {
                if ctx.env_var(GITHUB_ACTIONS).as_deref() == Some("true") {
                    debug!("running in GitHub Actions without id-token: write permission");
                } else {
                    debug!("not running in GitHub Actions");
                }
                return Ok(None);
            }
        };

        let url = self.request_url(&url);
        debug!("requesting OIDC token from GitHub Actions");

        let req = http::Request::get(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/json")
            .body(Bytes::new())
            .map_err(|e| {
                Error::identity_unavailable("failed to build OIDC token request").with_source(e)
            })?;

        let resp = ctx.http_send(req).await.map_err(|e| {
            Error::identity_unavailable("failed to request OIDC token from GitHub Actions")
                .with_source(e)
        })?;

        if !resp.status().is_success() {
            error!("OIDC token request got unexpected response: {}", resp.status());
            let body = String::from_utf8_lossy(resp.body());
            return Err(Error::identity_unavailable(format!(
                "OIDC token request failed ({}): {body}",
                resp.status()
            )));
        }

        let resp: TokenResponse = serde_json::from_slice(resp.body()).map_err(|e| {
            Error::identity_unavailable("failed to parse OIDC token response").with_source(e)
        })?;

        Ok(non_empty(Some(resp.value)).map(IdToken::new))
    }
}
