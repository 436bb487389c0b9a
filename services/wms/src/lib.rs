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

//! Wildix WMS5 PBX API signer and client.
//!
//! Requests are authorized by a bearer token that is valid for 60 seconds and
//! carries the SHA-256 of a canonical form of the request. The token is an
//! HS256 JWT keyed by the app secret.
//!
//! ```no_run
//! use pbxsign_core::{Context, OsEnv};
//! use pbxsign_http_send_reqwest::ReqwestHttpSend;
//! use pbxsign_wms::{Client, EnvCredentialProvider, RequestOptions};
//!
//! # async fn example() -> pbxsign_core::Result<()> {
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let client = Client::from_provider(ctx, EnvCredentialProvider::new()).await?;
//!
//! let options = RequestOptions::new()
//!     .with("fields", "id,name")
//!     .with("count", 10);
//! let resp = client.get("/api/v1/Colleagues", &options).await?;
//! println!("{}", resp.status());
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod options;
pub use options::{OptionValue, RequestOptions};

mod sign_request;
pub use sign_request::RequestSigner;

mod client;
pub use client::Client;

mod provide_credential;
pub use provide_credential::{EnvCredentialProvider, StaticCredentialProvider};
