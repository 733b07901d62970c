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

use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokenbridge::oracle::CliCheck;
use tokenbridge::{default_context, report_failure, Bridge, Config, Context, OsEnv, Result};

/// Exchange the CI OIDC token for an OCI session token and write an `oci` CLI profile.
///
/// Every flag falls back to the matching `INPUT_*` variable set by the Actions runner.
#[derive(Parser, Debug)]
#[command(name = "tokenbridge", version, about)]
struct Args {
    /// OAuth client id of the identity domain application.
    #[arg(long)]
    client_id: Option<String>,

    /// OAuth client secret of the identity domain application.
    #[arg(long)]
    client_secret: Option<String>,

    /// Base url of the identity domain.
    #[arg(long)]
    domain_base_url: Option<String>,

    /// OCID of the OCI user.
    #[arg(long)]
    oci_user: Option<String>,

    /// OCID of the OCI tenancy.
    #[arg(long)]
    oci_tenancy: Option<String>,

    /// OCI region.
    #[arg(long)]
    oci_region: Option<String>,

    /// Identity token to exchange instead of the one issued by the CI host.
    #[arg(long)]
    test_token: Option<String>,

    /// Audience requested from the CI host.
    #[arg(long)]
    audience: Option<String>,

    /// File holding an identity token.
    #[arg(long)]
    id_token_file: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Probe the `oci` CLI before the exchange: skip, warn or require.
    #[arg(long)]
    cli_check: Option<CliCheck>,

    /// Directory to write the credential bundle below [default: $GITHUB_WORKSPACE or cwd].
    #[arg(long)]
    workspace: Option<PathBuf>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            client_id: args.client_id,
            client_secret: args.client_secret,
            domain_base_url: args.domain_base_url,
            oci_user: args.oci_user,
            oci_tenancy: args.oci_tenancy,
            oci_region: args.oci_region,
            test_token: args.test_token,
            audience: args.audience,
            id_token_file: args.id_token_file,
            timeout: args.timeout.map(Duration::from_secs),
            cli_check: args.cli_check,
            workspace: args.workspace,
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = Config::from(args).load_env(&Context::new().with_env(OsEnv))?;
    debug!("loaded config: {config:?}");

    let ctx = default_context(config.timeout())?;
    let bundle = Bridge::new(ctx).run(&config).await?;

    info!(
        "OCI CLI profile ready: config={} key={} session={}",
        bundle.config_file.display(),
        bundle.private_key_file.display(),
        bundle.session_file.display()
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}
