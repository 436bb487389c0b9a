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

use crate::constants::*;
use pbxsign_core::utils::Redact;
use pbxsign_core::Context;
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Config for the WMS5 client.
///
/// Every field is optional here; [`crate::Credential`] is where presence is enforced.
#[derive(Clone, Default, Deserialize)]
pub struct Config {
    /// Secret generated on the WMS admin panel, used as the HMAC key.
    #[serde(rename = "pbx_secret_key")]
    pub secret: Option<String>,
    /// ID of the app generated on the WMS admin panel.
    pub app_id: Option<String>,
    /// Name of the app generated on the WMS admin panel.
    pub app_name: Option<String>,
    /// Hostname of the PBX.
    #[serde(rename = "pbx_host")]
    pub host: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret", &Redact::from(&self.secret))
            .field("app_id", &self.app_id)
            .field("app_name", &self.app_name)
            .field("host", &self.host)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    ///
    /// - `WMS_PBX_SECRET_KEY`
    /// - `WMS_APP_ID`
    /// - `WMS_APP_NAME`
    /// - `WMS_PBX_HOST`
    pub fn from_env(ctx: &Context) -> Self {
        Self {
            secret: ctx.env_var(WMS_PBX_SECRET_KEY),
            app_id: ctx.env_var(WMS_APP_ID),
            app_name: ctx.env_var(WMS_APP_NAME),
            host: ctx.env_var(WMS_PBX_HOST),
        }
    }

    /// Returns true if no field is set at all.
    pub fn is_empty(&self) -> bool {
        self.secret.is_none()
            && self.app_id.is_none()
            && self.app_name.is_none()
            && self.host.is_none()
    }
}
