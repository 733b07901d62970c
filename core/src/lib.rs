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

//! Core components for bridging CI identity tokens into cloud credentials.
//!
//! This crate provides the foundational types and traits for the tokenbridge
//! ecosystem. Provider-specific logic lives in the service crates, runtime
//! implementations live in the context crates.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file access, HTTP sending,
//!   command execution and environment access
//! - **Traits**: Abstract interfaces for obtaining an identity token (`ProvideIdToken`)
//! - **Error**: A single error type whose [`ErrorKind`] names the stage that failed
//!
//! ## Example
//!
//! ```no_run
//! use tokenbridge_core::{Context, IdToken, ProvideIdToken, ProvideIdTokenChain, Result};
//! use tokenbridge_core::StaticIdTokenProvider;
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideIdToken for MyProvider {
//!     async fn provide_id_token(&self, _: &Context) -> Result<Option<IdToken>> {
//!         Ok(Some(IdToken::new("eyJhbGciOi...")))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//! let chain = ProvideIdTokenChain::new()
//!     .push(StaticIdTokenProvider::new(""))
//!     .push(MyProvider);
//!
//! let token = chain.provide_id_token(&ctx).await?;
//! assert!(token.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Hashing and base64 helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod utils;

mod context;
pub use context::CommandExecute;
pub use context::CommandOutput;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::FileWrite;
pub use context::HttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{IdToken, ProvideIdToken};
mod chain;
pub use chain::ProvideIdTokenChain;
mod provide_id_token;
pub use provide_id_token::{FileIdTokenProvider, StaticIdTokenProvider};
