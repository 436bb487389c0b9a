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

use crate::Config;
use pbxsign_core::utils::Redact;
use pbxsign_core::{Error, Result};
use std::fmt::{Debug, Formatter};

/// Credential used to sign every request sent to a PBX.
///
/// All four fields are checked to be non-empty when the credential is built
/// and can't be changed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret: String,
    app_id: String,
    app_name: String,
    host: String,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret", &Redact::from(&self.secret))
            .field("app_id", &self.app_id)
            .field("app_name", &self.app_name)
            .field("host", &self.host)
            .finish()
    }
}

impl Credential {
    /// Build a credential, failing with [`pbxsign_core::ErrorKind::ConfigInvalid`]
    /// if any field is empty.
    pub fn new(
        secret: impl Into<String>,
        app_id: impl Into<String>,
        app_name: impl Into<String>,
        host: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            secret: require("secret key", secret.into())?,
            app_id: require("app id", app_id.into())?,
            app_name: require("app name", app_name.into())?,
            host: require("pbx host", host.into())?,
        })
    }

    /// Secret used as the HMAC key of signed tokens.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// App ID sent as `X-APP-ID`.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// App name used as token issuer.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// PBX hostname.
    pub fn host(&self) -> &str {
        &self.host
    }
}

fn require(field: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(Error::config_invalid(format!(
            "{field} not found, verify config parameters"
        )));
    }
    Ok(value)
}

impl TryFrom<Config> for Credential {
    type Error = Error;

    fn try_from(cfg: Config) -> Result<Self> {
        Credential::new(
            cfg.secret.unwrap_or_default(),
            cfg.app_id.unwrap_or_default(),
            cfg.app_name.unwrap_or_default(),
            cfg.host.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbxsign_core::ErrorKind;
    use test_case::test_case;

    #[test]
    fn test_credential_new() {
        let cred = Credential::new("k", "A1", "App", "pbx.example.com").expect("must be valid");
        assert_eq!(cred.secret(), "k");
        assert_eq!(cred.app_id(), "A1");
        assert_eq!(cred.app_name(), "App");
        assert_eq!(cred.host(), "pbx.example.com");
    }

    #[test_case("", "A1", "App", "pbx.example.com", "secret key"; "empty secret")]
    #[test_case("k", "", "App", "pbx.example.com", "app id"; "empty app id")]
    #[test_case("k", "A1", "", "pbx.example.com", "app name"; "empty app name")]
    #[test_case("k", "A1", "App", "", "pbx host"; "empty host")]
    fn test_credential_rejects_empty_field(
        secret: &str,
        app_id: &str,
        app_name: &str,
        host: &str,
        field: &str,
    ) {
        let err = Credential::new(secret, app_id, app_name, host).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.message().starts_with(field), "{err}");
    }

    #[test]
    fn test_credential_from_partial_config() {
        let cfg = Config {
            secret: Some("k".to_string()),
            app_id: Some("A1".to_string()),
            app_name: Some("App".to_string()),
            host: None,
        };
        let err = Credential::try_from(cfg).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_credential_debug_redacts_secret() {
        let cred = Credential::new("k", "A1", "App", "pbx.example.com").expect("must be valid");
        let s = format!("{cred:?}");
        assert!(s.contains("secret: ***"), "{s}");
        assert!(s.contains("A1"));
    }
}
