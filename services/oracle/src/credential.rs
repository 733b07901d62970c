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

use serde::Deserialize;
use std::fmt::{Debug, Formatter};
use tokenbridge_core::utils::Redact;
use tokenbridge_core::{Error, Result};

/// SessionCredential is the token exchange response.
///
/// The session token is opaque and short-lived. It is consumed right away by the
/// materializer and never refreshed.
#[derive(Clone, Default, Deserialize)]
pub struct SessionCredential {
    /// The user principal session token.
    #[serde(alias = "token")]
    pub access_token: String,
    /// Token type reported by the identity domain, if any.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds reported by the identity domain, if any.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl Debug for SessionCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCredential")
            .field("access_token", &Redact::from(&self.access_token))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl SessionCredential {
    /// Parse the JSON body returned by the token endpoint.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let cred: SessionCredential = serde_json::from_slice(body).map_err(|e| {
            Error::exchange_failed("failed to parse token exchange response").with_source(e)
        })?;

        if cred.access_token.is_empty() {
            return Err(Error::exchange_failed(
                "token exchange response contains an empty session token",
            ));
        }
        Ok(cred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokenbridge_core::ErrorKind;

    #[test]
    fn test_parse_access_token() {
        let cred = SessionCredential::from_slice(
            br#"{"access_token":"abc123","token_type":"Bearer","expires_in":3600}"#,
        )
        .unwrap();

        assert_eq!(cred.access_token, "abc123");
        assert_eq!(cred.token_type.as_deref(), Some("Bearer"));
        assert_eq!(cred.expires_in, Some(3600));
    }

    #[test]
    fn test_parse_token_alias() {
        let cred = SessionCredential::from_slice(br#"{"token":"upst-value"}"#).unwrap();
        assert_eq!(cred.access_token, "upst-value");
        assert_eq!(cred.expires_in, None);
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        let bodies: [&[u8]; 3] = [
            b"<html>bad gateway</html>",
            br#"{"error":"invalid_grant"}"#,
            br#"{"access_token":""}"#,
        ];
        for body in bodies {
            let err = SessionCredential::from_slice(body).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ExchangeFailed);
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let cred = SessionCredential {
            access_token: "eyJraWQiOiJhc3cifQ.session.signature".to_string(),
            ..Default::default()
        };
        assert!(!format!("{cred:?}").contains("session"));
    }
}
