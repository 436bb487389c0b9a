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

use crate::{Config, Credential};
use async_trait::async_trait;
use log::debug;
use pbxsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads WMS credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `WMS_PBX_SECRET_KEY`: The secret generated on the WMS admin panel
/// - `WMS_APP_ID`: The app ID
/// - `WMS_APP_NAME`: The app name
/// - `WMS_PBX_HOST`: The PBX hostname
///
/// Returns `None` when none of them is set. A partial set is reported as a
/// configuration error instead of being skipped.
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider {}

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let cfg = Config::from_env(ctx);
        if cfg.is_empty() {
            debug!("no WMS credential found in environment");
            return Ok(None);
        }

        debug!("loading WMS credential from environment: {cfg:?}");
        Credential::try_from(cfg).map(Some)
    }
}
