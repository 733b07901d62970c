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

//! Oracle Cloud Infrastructure session credential bridge.
//!
//! Trades a CI identity token for a user principal session token (UPST) bound to a
//! freshly generated RSA key, then writes the profile bundle the `oci` CLI reads.
//!
//! - [`KeyPair`]: per-run RSA key pair and its fingerprint
//! - [`TokenExchange`]: OAuth2 token exchange against an identity domain
//! - [`Materializer`]: writes `.oci/config`, the key files and the session token
//! - [`validate_cli_installed`]: probes the `oci` binary

mod constants;
pub use constants::*;

mod key;
pub use key::{fingerprint, public_key_from_der_base64, KeyPair};

mod credential;
pub use credential::SessionCredential;

mod exchange;
pub use exchange::TokenExchange;

mod profile;
pub use profile::{CredentialBundle, CredentialLayout, Materializer, OciIdentity, Profile};

mod cli;
pub use cli::{validate_cli_installed, CliCheck};
