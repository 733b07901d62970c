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

use crate::utils::Redact;
use crate::{Context, Result};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// IdToken is the subject token traded during the exchange.
///
/// Usually an OIDC JWT issued by the CI host, or an operator supplied override.
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the raw token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Debug for IdToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IdToken").field(&Redact::from(&self.0)).finish()
    }
}

/// ProvideIdToken is the trait used by the bridge to obtain a subject token.
///
/// Different CI platforms hand out identity tokens differently: GitHub Actions via
/// an HTTP endpoint, others by projecting the token into a file or variable.
///
/// Returning `Ok(None)` means this source does not apply to the current environment.
#[async_trait::async_trait]
pub trait ProvideIdToken: Debug + Send + Sync + 'static {
    /// Load the identity token from current env.
    async fn provide_id_token(&self, ctx: &Context) -> Result<Option<IdToken>>;
}

#[async_trait::async_trait]
impl<T: ProvideIdToken + ?Sized> ProvideIdToken for Arc<T> {
    async fn provide_id_token(&self, ctx: &Context) -> Result<Option<IdToken>> {
        self.as_ref().provide_id_token(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_token_debug_is_redacted() {
        let token = IdToken::new("eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiJyZXBvIn0.c2ln");
        let debug = format!("{token:?}");

        assert_eq!(debug, "IdToken(eyJ***2ln)");
        assert_eq!(token.as_str().len(), 45);
    }
}
