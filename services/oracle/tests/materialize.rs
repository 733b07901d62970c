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

//! Integration tests for writing the OCI credential bundle to disk.

use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::path::Path;
use tokenbridge_core::{Context, ErrorKind};
use tokenbridge_file_tokio::TokioFile;
use tokenbridge_oracle::{
    CredentialLayout, KeyPair, Materializer, OciIdentity, Profile, SessionCredential,
};

static KEY_PAIR: Lazy<KeyPair> = Lazy::new(|| KeyPair::generate().unwrap());

fn init() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();
    Context::new()
        .with_file_read(TokioFile)
        .with_file_write(TokioFile)
}

fn identity() -> OciIdentity {
    OciIdentity {
        user: "ocid1.user.oc1..aaaa".to_string(),
        tenancy: "ocid1.tenancy.oc1..bbbb".to_string(),
        region: "eu-frankfurt-1".to_string(),
    }
}

fn credential(token: &str) -> SessionCredential {
    SessionCredential {
        access_token: token.to_string(),
        ..Default::default()
    }
}

async fn read(ctx: &Context, path: &Path) -> String {
    ctx.file_read_as_string(path.to_str().unwrap()).await.unwrap()
}

#[tokio::test]
async fn test_materialize_bundle() {
    let ctx = init();
    let dir = tempfile::tempdir().unwrap();
    let layout = CredentialLayout::new(dir.path());
    let fingerprint = KEY_PAIR.fingerprint().unwrap();

    let bundle = Materializer::new(layout.clone(), identity())
        .materialize(&ctx, &KEY_PAIR, &fingerprint, &credential("abc123"))
        .await
        .unwrap();

    assert_eq!(bundle.config_file, layout.config_file());
    assert_eq!(bundle.fingerprint, fingerprint);

    let profile = Profile::parse(&read(&ctx, &bundle.config_file).await).unwrap();
    assert_eq!(profile.user, "ocid1.user.oc1..aaaa");
    assert_eq!(profile.tenancy, "ocid1.tenancy.oc1..bbbb");
    assert_eq!(profile.region, "eu-frankfurt-1");
    assert_eq!(profile.fingerprint, fingerprint);
    assert_eq!(profile.security_token, "abc123");

    // key_file must point at the file that was actually written.
    assert_eq!(
        profile.key_file.as_bytes(),
        bundle.private_key_file.to_str().unwrap().as_bytes()
    );
    assert!(Path::new(&profile.key_file).is_absolute());

    let private_key = RsaPrivateKey::from_pkcs1_pem(&read(&ctx, Path::new(&profile.key_file)).await)
        .unwrap();
    assert_eq!(&private_key, KEY_PAIR.private_key());

    let public_key = RsaPublicKey::from_public_key_pem(&read(&ctx, &bundle.public_key_file).await)
        .unwrap();
    assert_eq!(&public_key, KEY_PAIR.public_key());
    assert_eq!(
        tokenbridge_oracle::fingerprint(&public_key).unwrap(),
        profile.fingerprint
    );

    assert_eq!(read(&ctx, &bundle.session_file).await, "abc123");
}

#[tokio::test]
async fn test_materialize_overwrites_previous_bundle() {
    let ctx = init();
    let dir = tempfile::tempdir().unwrap();
    let materializer = Materializer::new(CredentialLayout::new(dir.path()), identity());
    let fingerprint = KEY_PAIR.fingerprint().unwrap();

    materializer
        .materialize(&ctx, &KEY_PAIR, &fingerprint, &credential("a-much-longer-first-token"))
        .await
        .unwrap();
    let bundle = materializer
        .materialize(&ctx, &KEY_PAIR, &fingerprint, &credential("second"))
        .await
        .unwrap();

    assert_eq!(read(&ctx, &bundle.session_file).await, "second");
}

#[tokio::test]
async fn test_materialize_fails_without_writer() {
    let ctx = Context::new();
    let dir = tempfile::tempdir().unwrap();
    let fingerprint = KEY_PAIR.fingerprint().unwrap();

    let err = Materializer::new(CredentialLayout::new(dir.path()), identity())
        .materialize(&ctx, &KEY_PAIR, &fingerprint, &credential("abc123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FilesystemFailed);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_materialize_into_readonly_workspace() {
    use std::os::unix::fs::PermissionsExt;

    let ctx = init();
    let dir = tempfile::tempdir().unwrap();
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o500)).unwrap();

    // Root ignores directory permissions.
    if std::fs::create_dir(dir.path().join("probe")).is_ok() {
        return;
    }

    let fingerprint = KEY_PAIR.fingerprint().unwrap();
    let err = Materializer::new(CredentialLayout::new(dir.path()), identity())
        .materialize(&ctx, &KEY_PAIR, &fingerprint, &credential("abc123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::FilesystemFailed);
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o700)).unwrap();
}
