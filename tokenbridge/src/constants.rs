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

// Action inputs, exposed by the runner as `INPUT_<NAME>`.
pub const INPUT_CLIENT_ID: &str = "INPUT_CLIENT_ID";
pub const INPUT_CLIENT_SECRET: &str = "INPUT_CLIENT_SECRET";
pub const INPUT_DOMAIN_BASE_URL: &str = "INPUT_DOMAIN_BASE_URL";
pub const INPUT_OCI_USER: &str = "INPUT_OCI_USER";
pub const INPUT_OCI_TENANCY: &str = "INPUT_OCI_TENANCY";
pub const INPUT_OCI_REGION: &str = "INPUT_OCI_REGION";
pub const INPUT_TEST_TOKEN: &str = "INPUT_TEST_TOKEN";
pub const INPUT_AUDIENCE: &str = "INPUT_AUDIENCE";
pub const INPUT_TIMEOUT: &str = "INPUT_TIMEOUT";
pub const INPUT_CLI_CHECK: &str = "INPUT_CLI_CHECK";
pub const INPUT_ID_TOKEN_FILE: &str = "INPUT_ID_TOKEN_FILE";

// Runner environment.
pub const GITHUB_WORKSPACE: &str = "GITHUB_WORKSPACE";

/// Timeout applied to every HTTP call unless configured otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
