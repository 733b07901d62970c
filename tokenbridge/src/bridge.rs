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

use crate::config::Config;
use crate::report::add_mask;
use log::{debug, info, warn};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tokenbridge_core::{
    Context, Error, FileIdTokenProvider, ProvideIdToken, ProvideIdTokenChain, Result,
    StaticIdTokenProvider,
};
use tokenbridge_github_actions::{GithubActionsIdTokenProvider, GITHUB_ACTIONS};
use tokenbridge_oracle::{
    validate_cli_installed, CliCheck, CredentialBundle, CredentialLayout, KeyPair, Materializer,
    ORACLE_CLI,
};

type KeyGenerator = Arc<dyn Fn() -> Result<KeyPair> + Send + Sync>;

/// Bridge runs one identity token to session credential exchange.
///
/// The subject token is taken from, in order:
///
/// 1. the configured `test_token`
/// 2. the CI host, GitHub Actions unless replaced with [`Bridge::with_id_token_provider`]
/// 3. the configured `id_token_file`
pub struct Bridge {
    ctx: Context,
    id_token_provider: Option<Arc<dyn ProvideIdToken>>,
    key_generator: KeyGenerator,
}

impl Debug for Bridge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("ctx", &self.ctx)
            .field("id_token_provider", &self.id_token_provider)
            .finish_non_exhaustive()
    }
}

impl Bridge {
    /// Create a bridge over `ctx`.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            id_token_provider: None,
            key_generator: Arc::new(KeyPair::generate),
        }
    }

    /// Replace the CI host identity token provider.
    pub fn with_id_token_provider(mut self, provider: impl ProvideIdToken) -> Self {
        self.id_token_provider = Some(Arc::new(provider));
        self
    }

    /// Replace the key pair generator.
    pub fn with_key_generator(
        mut self,
        generator: impl Fn() -> Result<KeyPair> + Send + Sync + 'static,
    ) -> Self {
        self.key_generator = Arc::new(generator);
        self
    }

    fn id_token_chain(&self, config: &Config) -> ProvideIdTokenChain {
        let chain = ProvideIdTokenChain::new().push(StaticIdTokenProvider::new(
            config.test_token.clone().unwrap_or_default(),
        ));

        let chain = match &self.id_token_provider {
            Some(provider) => chain.push(provider.clone()),
            None => {
                let mut provider = GithubActionsIdTokenProvider::new();
                if let Some(audience) = &config.audience {
                    provider = provider.with_audience(audience);
                }
                chain.push(provider)
            }
        };

        chain.push(FileIdTokenProvider::new(config.id_token_file.clone()))
    }

    fn mask(&self, secret: &str) {
        if self.ctx.env_var(GITHUB_ACTIONS).as_deref() == Some("true") {
            add_mask(secret);
        }
    }

    /// Run the bridge and return the written credential bundle.
    ///
    /// Inputs are validated before any key, network or filesystem work, and the
    /// key pair is generated before any network call. Files written before a
    /// failure are left in place.
    pub async fn run(&self, config: &Config) -> Result<CredentialBundle> {
        debug!("running bridge with config: {config:?}");

        let exchange = config.token_exchange()?;
        let identity = config.oci_identity()?;
        let workspace = config.workspace(&self.ctx)?;
        let materializer = Materializer::new(CredentialLayout::new(workspace), identity);

        match config.cli_check() {
            CliCheck::Skip => debug!("skipping OCI CLI presence check"),
            CliCheck::Warn => match validate_cli_installed(&self.ctx, ORACLE_CLI).await {
                Ok(version) => info!("found OCI CLI {version}"),
                Err(e) => warn!("{}", e.report()),
            },
            CliCheck::Require => {
                let version = validate_cli_installed(&self.ctx, ORACLE_CLI).await?;
                info!("found OCI CLI {version}");
            }
        }

        let key_pair = (self.key_generator)()?;
        let fingerprint = key_pair.fingerprint()?;
        let public_key = key_pair.public_key_der_base64()?;
        info!("generated session key pair with fingerprint {fingerprint}");

        let id_token = self
            .id_token_chain(config)
            .provide_id_token(&self.ctx)
            .await?
            .ok_or_else(|| Error::identity_unavailable("Unable to obtain OIDC token"))?;
        self.mask(id_token.as_str());
        debug!("obtained identity token: {id_token:?}");

        let credential = exchange
            .exchange(&self.ctx, &public_key, id_token.as_str())
            .await?;
        self.mask(&credential.access_token);

        materializer
            .materialize(&self.ctx, &key_pair, &fingerprint, &credential)
            .await
    }
}
