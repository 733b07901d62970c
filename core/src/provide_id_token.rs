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

use crate::utils::non_empty;
use crate::{Context, IdToken, ProvideIdToken, Result};
use async_trait::async_trait;
use log::debug;

/// StaticIdTokenProvider returns a token supplied up front.
///
/// Used for the `test_token` override, which lets the bridge run outside a live
/// OIDC context. An empty token yields `None` so the chain falls through.
#[derive(Debug, Clone, Default)]
pub struct StaticIdTokenProvider {
    token: Option<IdToken>,
}

impl StaticIdTokenProvider {
    /// Create a new StaticIdTokenProvider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: non_empty(Some(token.into())).map(IdToken::new),
        }
    }
}

#[async_trait]
impl ProvideIdToken for StaticIdTokenProvider {
    async fn provide_id_token(&self, _: &Context) -> Result<Option<IdToken>> {
        if self.token.is_some() {
            debug!("using override identity token");
        }
        Ok(self.token.clone())
    }
}

/// FileIdTokenProvider reads the identity token from a file.
///
/// Some CI platforms project the OIDC token to disk instead of serving it over HTTP.
/// The path may start with `~`. Missing or empty files yield `None`.
#[derive(Debug, Clone, Default)]
pub struct FileIdTokenProvider {
    path: Option<String>,
}

impl FileIdTokenProvider {
    /// Create a new FileIdTokenProvider; `None` disables it.
    pub fn new(path: Option<String>) -> Self {
        Self {
            path: non_empty(path),
        }
    }
}

#[async_trait]
impl ProvideIdToken for FileIdTokenProvider {
    async fn provide_id_token(&self, ctx: &Context) -> Result<Option<IdToken>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let Some(path) = ctx.expand_home_dir(path) else {
            debug!("cannot expand home dir for identity token file {path}");
            return Ok(None);
        };

        let content = match ctx.file_read_as_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                debug!("identity token file {path} not readable: {e}");
                return Ok(None);
            }
        };

        Ok(non_empty(Some(content.trim().to_string())).map(IdToken::new))
    }
}
