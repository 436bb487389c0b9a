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
use pbxsign_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides credentials given at initialization time.
///
/// Values are validated when the credential is provided, not here.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    config: Config,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with the given values.
    pub fn new(secret: &str, app_id: &str, app_name: &str, host: &str) -> Self {
        Self {
            config: Config {
                secret: Some(secret.to_string()),
                app_id: Some(app_id.to_string()),
                app_name: Some(app_name.to_string()),
                host: Some(host.to_string()),
            },
        }
    }

    /// Create a new StaticCredentialProvider from a config.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        Credential::try_from(self.config.clone()).map(Some)
    }
}
