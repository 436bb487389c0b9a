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

use crate::{Credential, RequestOptions, RequestSigner};
use bytes::Bytes;
use http::Method;
use log::debug;
use pbxsign_core::{Context, Error, ProvideCredential, Result};

/// Client sends signed requests to a WMS5 PBX.
///
/// Every call signs a fresh token and performs exactly one
/// [`pbxsign_core::HttpSend`] call. Responses are returned as received:
/// non-2xx statuses are not turned into errors and nothing is retried.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    signer: RequestSigner,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, credential: Credential) -> Self {
        Self {
            ctx,
            signer: RequestSigner::new(credential),
        }
    }

    /// Create a new client with the credential resolved by `provider`.
    ///
    /// The provider is asked once; a provider with nothing to offer is a
    /// configuration error.
    pub async fn from_provider(
        ctx: Context,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let credential = provider
            .provide_credential(&ctx)
            .await?
            .ok_or_else(|| Error::config_invalid("no WMS credential found"))?;

        Ok(Self::new(ctx, credential))
    }

    /// Signer used by this client.
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Send a signed GET request, options go into the query string.
    pub async fn get(&self, path: &str, options: &RequestOptions) -> Result<http::Response<Bytes>> {
        self.send(Method::GET, path, options).await
    }

    /// Send a signed POST request, options go into a form body.
    pub async fn post(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<http::Response<Bytes>> {
        self.send(Method::POST, path, options).await
    }

    /// Send a signed request whose target path is the `url` option.
    ///
    /// The `url` option is removed before signing.
    pub async fn execute(
        &self,
        method: Method,
        mut options: RequestOptions,
    ) -> Result<http::Response<Bytes>> {
        let path = options.take_target_path()?;
        self.send(method, &path, &options).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<http::Response<Bytes>> {
        let req = self.signer.sign(method, path, options)?;
        debug!("sending {} {}", req.method(), req.uri());

        let resp = self.ctx.http_send(req).await?;
        debug!("got response with status {}", resp.status());
        Ok(resp)
    }
}
