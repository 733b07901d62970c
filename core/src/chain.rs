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

use crate::{Context, Error, IdToken, ProvideIdToken, Result};
use async_trait::async_trait;
use std::fmt::{self, Debug};

/// A chain of identity token providers that will be tried in order.
///
/// The first provider returning a token wins. Provider errors are logged and the
/// chain moves on; if no provider yields a token, the last error seen is returned
/// so the failure report still explains why.
pub struct ProvideIdTokenChain {
    providers: Vec<Box<dyn ProvideIdToken>>,
}

impl ProvideIdTokenChain {
    /// Create a new empty provider chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a provider to the chain.
    pub fn push(mut self, provider: impl ProvideIdToken) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Whether the chain has no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProvideIdTokenChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ProvideIdTokenChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvideIdTokenChain")
            .field("providers", &self.providers)
            .finish()
    }
}

#[async_trait]
impl ProvideIdToken for ProvideIdTokenChain {
    async fn provide_id_token(&self, ctx: &Context) -> Result<Option<IdToken>> {
        let mut last_err = None;

        for provider in &self.providers {
            log::debug!("trying identity token provider: {provider:?}");

            match provider.provide_id_token(ctx).await {
                Ok(Some(token)) => {
                    log::debug!("loaded identity token from provider: {provider:?}");
                    return Ok(Some(token));
                }
                Ok(None) => {
                    log::debug!("no identity token found in provider: {provider:?}");
                }
                Err(e) => {
                    log::warn!("error loading identity token from provider {provider:?}: {e}");
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(e) => {
                Err(Error::identity_unavailable("Unable to obtain OIDC token").with_source(e))
            }
            None => Ok(None),
        }
    }
}
