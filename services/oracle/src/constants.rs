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

/// Size of the generated RSA key.
pub const KEY_BITS: usize = 2048;

/// Token endpoint path below the identity domain base url.
pub const TOKEN_ENDPOINT_PATH: &str = "/oauth2/v1/token";
/// OAuth2 token exchange grant.
pub const GRANT_TYPE_TOKEN_EXCHANGE: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
/// Requested token type for a user principal session token.
pub const REQUESTED_TOKEN_TYPE_UPST: &str = "urn:oci:token-type:oci-upst";
/// Subject token type sent with the identity token.
pub const SUBJECT_TOKEN_TYPE_JWT: &str = "jwt";

/// Profile written into the config file.
pub const ORACLE_DEFAULT_PROFILE: &str = "DEFAULT";
/// Config directory below the workspace.
pub const ORACLE_CONFIG_DIR: &str = ".oci";
/// Config file name inside [`ORACLE_CONFIG_DIR`].
pub const ORACLE_CONFIG_FILE_NAME: &str = "config";
/// Private key file name below the workspace.
pub const PRIVATE_KEY_FILE_NAME: &str = "private_key.pem";
/// Public key file name below the workspace.
pub const PUBLIC_KEY_FILE_NAME: &str = "public_key.pem";
/// Session token file name below the workspace.
pub const SESSION_FILE_NAME: &str = "session";

/// The OCI command line tool.
pub const ORACLE_CLI: &str = "oci";
