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

//! Workflow commands understood by the GitHub Actions runner.

use tokenbridge_core::Error;

/// Escape data the way the runner expects inside a workflow command.
fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Ask the runner to mask `secret` in all later log output.
pub fn add_mask(secret: &str) {
    if secret.trim().is_empty() {
        return;
    }
    println!("::add-mask::{}", escape_data(secret));
}

/// Render `err` as a single `::error::` workflow command.
pub fn error_command(err: &Error) -> String {
    format!(
        "::error::{}",
        escape_data(&format!("Action failed with error: {}", err.report()))
    )
}

/// Print `err` as a workflow error annotation.
pub fn report_failure(err: &Error) {
    println!("{}", error_command(err));
}
