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

//! Exchange CI OIDC identity tokens for OCI session credentials.
//!
//! `tokenbridge` trades the identity token a CI job receives for an OCI user
//! principal session token (UPST) bound to a freshly generated RSA key, then
//! writes the profile bundle the `oci` CLI expects below the job workspace.
//!
//! ## Example
//!
//! ```no_run
//! use tokenbridge::{default_context, Bridge, Config};
//!
//! # async fn example() -> tokenbridge::Result<()> {
//! let ctx = default_context(std::time::Duration::from_secs(30))?;
//! let config = Config::default().load_env(&ctx)?;
//!
//! let bundle = Bridge::new(ctx).run(&config).await?;
//! println!("profile written to {}", bundle.config_file.display());
//! # Ok(())
//! # }
//! ```

pub use tokenbridge_core::*;

/// Oracle Cloud Infrastructure key, exchange and profile support.
pub mod oracle {
    pub use tokenbridge_oracle::*;
}

/// GitHub Actions identity token support.
pub mod github_actions {
    pub use tokenbridge_github_actions::*;
}

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod context;
pub use context::default_context;

mod bridge;
pub use bridge::Bridge;

mod report;
pub use report::{add_mask, error_command, report_failure};
