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
use crate::{Credential, RequestOptions};
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE, HOST};
use http::{HeaderMap, HeaderValue, Method};
use jsonwebtoken::{Algorithm, EncodingKey, Header as JwtHeader};
use log::debug;
use pbxsign_core::hash::hex_sha256;
use pbxsign_core::time::{now, unix_seconds, DateTime};
use pbxsign_core::{Error, Result};
use percent_encoding::utf8_percent_encode;
use serde::Serialize;

/// Claims carried by a WMS signed token.
#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    iat: i64,
    exp: i64,
    sign: SignClaim,
}

/// Describes what the token's hash covers.
#[derive(Debug, Serialize)]
struct SignClaim {
    alg: &'static str,
    headers: SignedHeaders,
    hash: String,
}

#[derive(Debug, Serialize)]
struct SignedHeaders {
    #[serde(rename = "0")]
    host: &'static str,
    #[serde(rename = "1")]
    app_id: &'static str,
}

impl<'a> Claims<'a> {
    fn new(issuer: &'a str, canonical: &str, now: DateTime) -> Self {
        let iat = unix_seconds(now);

        Claims {
            iss: issuer,
            iat,
            exp: iat + TOKEN_TTL_SECS,
            sign: SignClaim {
                alg: SIGN_ALGORITHM,
                headers: SignedHeaders {
                    host: SIGNED_HEADER_HOST,
                    app_id: SIGNED_HEADER_APP_ID,
                },
                hash: hex_sha256(canonical.as_bytes()),
            },
        }
    }
}

/// RequestSigner builds signed requests for the WMS5 PBX API.
///
/// Each request is signed by a short-lived HS256 token whose payload carries
/// the SHA-256 of a canonical string:
///
/// ```text
/// {method}{path}host:{host};x-app-id:{app_id};{key}:{value};...
/// ```
///
/// Options are listed in ascending key order and mapping values are left out.
/// The signer keeps no per-request state, so one instance can be shared
/// between concurrent callers.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
}

impl RequestSigner {
    /// Create a new signer for the given credential.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    /// Credential this signer signs with.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Build the canonical string whose hash is embedded in the token.
    pub fn build_canonical_string(
        &self,
        method: &Method,
        path: &str,
        options: &RequestOptions,
    ) -> String {
        // 256 is specially chosen to avoid reallocation for most requests.
        let mut f = String::with_capacity(256);

        f.push_str(method.as_str());
        f.push_str(path);
        f.push_str("host:");
        f.push_str(self.credential.host());
        f.push_str(";x-app-id:");
        f.push_str(self.credential.app_id());
        f.push(';');

        for (k, v) in options.scalars() {
            f.push_str(k);
            f.push(':');
            f.push_str(&v);
            f.push(';');
        }

        debug!("canonical string: {f}");
        f
    }

    /// Build a signed token for the canonical string, issued now.
    pub fn build_signed_token(&self, canonical: &str) -> Result<String> {
        self.build_signed_token_at(canonical, now())
    }

    /// Build a signed token for the canonical string, issued at `now`.
    ///
    /// The token expires exactly 60 seconds after `now`.
    pub fn build_signed_token_at(&self, canonical: &str, now: DateTime) -> Result<String> {
        let claims = Claims::new(self.credential.app_name(), canonical, now);

        jsonwebtoken::encode(
            &JwtHeader::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.credential.secret().as_bytes()),
        )
        .map_err(|e| Error::credential_invalid("failed to encode signed token").with_source(e))
    }

    /// Build the GET url: `https://{host}{path}?` followed by the sorted query.
    pub fn build_url(&self, path: &str, options: &RequestOptions) -> String {
        let mut url = format!("https://{}{}?", self.credential.host(), path);

        for (idx, (k, v)) in options.scalars().enumerate() {
            if idx != 0 {
                url.push('&');
            }
            url.extend(utf8_percent_encode(k, &WMS_QUERY_ENCODE_SET));
            url.push('=');
            url.extend(utf8_percent_encode(&v, &WMS_QUERY_ENCODE_SET));
        }

        debug!("request url: {url}");
        url
    }

    /// Build the POST url, options travel in the body instead.
    pub fn build_post_url(&self, path: &str) -> String {
        format!("https://{}{}", self.credential.host(), path)
    }

    /// Build the headers every signed request carries.
    pub fn build_headers(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(3);

        headers.insert(HOST, HeaderValue::from_str(self.credential.host())?);
        headers.insert(X_APP_ID, HeaderValue::from_str(self.credential.app_id())?);
        headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = format!("Bearer {token}").parse()?;
            value.set_sensitive(true);
            value
        });

        Ok(headers)
    }

    /// Encode scalar options as an `application/x-www-form-urlencoded` body.
    pub fn build_form_body(&self, options: &RequestOptions) -> Bytes {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in options.scalars() {
            serializer.append_pair(k, &v);
        }
        Bytes::from(serializer.finish())
    }

    /// Build a complete signed request.
    ///
    /// `GET` puts the options in the query string, `POST` sends them as a
    /// form body. Any other method is rejected.
    pub fn sign(
        &self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<http::Request<Bytes>> {
        check_path(path)?;

        let (url, body) = match method {
            Method::GET => (self.build_url(path, options), None),
            Method::POST => (self.build_post_url(path), Some(self.build_form_body(options))),
            _ => {
                return Err(Error::request_invalid(format!(
                    "method {method} is not supported by WMS API"
                )))
            }
        };

        let canonical = self.build_canonical_string(&method, path, options);
        let token = self.build_signed_token(&canonical)?;
        let headers = self.build_headers(&token)?;

        let mut req = http::Request::builder().method(method).uri(url);
        if let Some(h) = req.headers_mut() {
            h.extend(headers);
            if body.is_some() {
                h.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
            }
        }

        Ok(req.body(body.unwrap_or_default())?)
    }
}

fn check_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::parameter_missing("target path is required"));
    }
    if !path.starts_with('/') {
        return Err(Error::request_invalid(format!(
            "target path must start with '/', got {path:?}"
        )));
    }
    Ok(())
}
