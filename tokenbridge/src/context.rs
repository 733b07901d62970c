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

use std::time::Duration;
use tokenbridge_command_execute_tokio::TokioCommandExecute;
use tokenbridge_core::{Context, Error, OsEnv, Result};
use tokenbridge_file_tokio::TokioFile;
use tokenbridge_http_send_reqwest::ReqwestHttpSend;

/// Create a context backed by the real runtime.
///
/// - Tokio for file access and command execution
/// - reqwest for HTTP, every request bounded by `timeout`
/// - the process environment
pub fn default_context(timeout: Duration) -> Result<Context> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| Error::unexpected("failed to build http client").with_source(e))?;

    Ok(Context::new()
        .with_file_read(TokioFile)
        .with_file_write(TokioFile)
        .with_http_send(ReqwestHttpSend::new(client))
        .with_command_execute(TokioCommandExecute)
        .with_env(OsEnv))
}
