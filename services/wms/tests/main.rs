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

//! End-to-end tests of the WMS client against a recording transport.

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bytes::Bytes;
use hmac::{Hmac, Mac};
use http::header::{AUTHORIZATION, HOST};
use http::{HeaderMap, Method, StatusCode};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use pbxsign_core::hash::hex_sha256;
use pbxsign_core::{Context, ErrorKind, HttpSend, Result, StaticEnv};
use pbxsign_wms::{Client, Credential, EnvCredentialProvider, RequestOptions};
use pretty_assertions::assert_eq;
use sha2::Sha256;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Snapshot of a request as it reached the transport.
#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
}

/// Transport that records every request and answers with a fixed response.
#[derive(Debug, Clone)]
struct RecordingHttpSend {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingHttpSend {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpSend for RecordingHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push(Recorded {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });
        Ok(http::Response::builder()
            .status(self.status)
            .header("x-pbx", "test")
            .body(Bytes::from_static(self.body.as_bytes()))
            .unwrap())
    }
}

fn init() -> (RecordingHttpSend, Client) {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = RecordingHttpSend::new(StatusCode::OK, r#"{"type":"result"}"#);
    let ctx = Context::new().with_http_send(http.clone());
    let cred = Credential::new("k", "A1", "App", "pbx.example.com").unwrap();

    (http, Client::new(ctx, cred))
}

fn bearer_claims(req: &Recorded) -> serde_json::Value {
    let auth = req.headers[AUTHORIZATION].to_str().unwrap();
    let token = auth.strip_prefix("Bearer ").unwrap();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    jsonwebtoken::decode::<serde_json::Value>(
        token,
        &DecodingKey::from_secret(b"k"),
        &validation,
    )
    .unwrap()
    .claims
}

#[tokio::test]
async fn test_get_users() {
    let (http, client) = init();
    let options: RequestOptions =
        serde_json::from_value(serde_json::json!({"fields": "id,name", "count": 10})).unwrap();

    let resp = client.get("/api/users", &options).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body(), &Bytes::from_static(br#"{"type":"result"}"#));

    let reqs = http.requests();
    assert_eq!(reqs.len(), 1);
    let req = &reqs[0];
    assert_eq!(req.method, Method::GET);
    assert_eq!(
        req.uri,
        "https://pbx.example.com/api/users?count=10&fields=id,name"
    );
    assert_eq!(req.headers[HOST], "pbx.example.com");
    assert_eq!(req.headers["X-APP-ID"], "A1");

    let claims = bearer_claims(req);
    assert_eq!(claims["iss"], "App");
    assert_eq!(
        claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(),
        60
    );
    assert_eq!(claims["sign"]["alg"], "sha256");
    assert_eq!(
        claims["sign"]["headers"],
        serde_json::json!({"0": "Host", "1": "X-APP-ID"})
    );
    assert_eq!(
        claims["sign"]["hash"],
        hex_sha256(b"GET/api/usershost:pbx.example.com;x-app-id:A1;count:10;fields:id,name;")
    );
}

#[tokio::test]
async fn test_get_skips_nested_options() {
    let (http, client) = init();
    let options: RequestOptions =
        serde_json::from_value(serde_json::json!({"nested": {"a": 1}, "z": "v"})).unwrap();

    client.get("/api/users", &options).await.unwrap();

    let req = &http.requests()[0];
    assert_eq!(req.uri, "https://pbx.example.com/api/users?z=v");
    assert_eq!(
        bearer_claims(req)["sign"]["hash"],
        hex_sha256(b"GET/api/usershost:pbx.example.com;x-app-id:A1;z:v;")
    );
}

#[tokio::test]
async fn test_post_sends_form_body() {
    let (http, client) = init();
    let options = RequestOptions::new()
        .with("name", "Front desk")
        .with("extension", 101);

    client.post("/api/users", &options).await.unwrap();

    let reqs = http.requests();
    assert_eq!(reqs.len(), 1);
    let req = &reqs[0];
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.uri, "https://pbx.example.com/api/users");
    assert_eq!(&req.body, &Bytes::from_static(b"extension=101&name=Front+desk"));
    assert_eq!(
        bearer_claims(req)["sign"]["hash"],
        hex_sha256(b"POST/api/usershost:pbx.example.com;x-app-id:A1;extension:101;name:Front desk;")
    );
}

#[tokio::test]
async fn test_error_status_returned_unmodified() {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = RecordingHttpSend::new(StatusCode::UNAUTHORIZED, "denied");
    let ctx = Context::new().with_http_send(http.clone());
    let client = Client::new(
        ctx,
        Credential::new("k", "A1", "App", "pbx.example.com").unwrap(),
    );

    let resp = client
        .get("/api/users", &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers()["x-pbx"], "test");
    assert_eq!(resp.body(), &Bytes::from_static(b"denied"));
    assert_eq!(http.requests().len(), 1);
}

#[tokio::test]
async fn test_missing_path_makes_no_call() {
    let (http, client) = init();

    let err = client.get("", &RequestOptions::new()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterMissing);

    let err = client
        .execute(Method::GET, RequestOptions::new().with("count", 10))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParameterMissing);

    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_execute_uses_url_option() {
    let (http, client) = init();
    let options = RequestOptions::new()
        .with("url", "/api/users")
        .with("count", 10);

    client.execute(Method::GET, options).await.unwrap();

    let req = &http.requests()[0];
    assert_eq!(req.uri, "https://pbx.example.com/api/users?count=10");
    assert_eq!(
        bearer_claims(req)["sign"]["hash"],
        hex_sha256(b"GET/api/usershost:pbx.example.com;x-app-id:A1;count:10;")
    );
}

#[tokio::test]
async fn test_each_call_signs_fresh_token() {
    let (http, client) = init();

    client.get("/api/users", &RequestOptions::new()).await.unwrap();
    client
        .get("/api/users", &RequestOptions::new().with("count", 1))
        .await
        .unwrap();

    let reqs = http.requests();
    assert_eq!(reqs.len(), 2);
    assert_ne!(
        bearer_claims(&reqs[0])["sign"]["hash"],
        bearer_claims(&reqs[1])["sign"]["hash"]
    );
}

#[tokio::test]
async fn test_concurrent_calls_share_client() {
    let (http, client) = init();

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let options = RequestOptions::new().with("page", i);
            client.get("/api/users", &options).await.map(|r| r.status())
        }));
    }
    for h in handles {
        assert_eq!(h.await.unwrap().unwrap(), StatusCode::OK);
    }

    let mut uris: Vec<String> = http.requests().iter().map(|r| r.uri.clone()).collect();
    uris.sort();
    let mut expected: Vec<String> = (0..8)
        .map(|i| format!("https://pbx.example.com/api/users?page={i}"))
        .collect();
    expected.sort();
    assert_eq!(uris, expected);
}

#[tokio::test]
async fn test_client_from_env_provider() {
    let http = RecordingHttpSend::new(StatusCode::OK, "");
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_env(StaticEnv {
            envs: HashMap::from([
                ("WMS_PBX_SECRET_KEY".to_string(), "k".to_string()),
                ("WMS_APP_ID".to_string(), "A1".to_string()),
                ("WMS_APP_NAME".to_string(), "App".to_string()),
                ("WMS_PBX_HOST".to_string(), "pbx.example.com".to_string()),
            ]),
        });

    let client = Client::from_provider(ctx, EnvCredentialProvider::new())
        .await
        .unwrap();
    assert_eq!(client.signer().credential().host(), "pbx.example.com");

    client.get("/api/users", &RequestOptions::new()).await.unwrap();
    assert_eq!(bearer_claims(&http.requests()[0])["iss"], "App");
}

#[tokio::test]
async fn test_client_from_empty_env_fails() {
    let err = Client::from_provider(Context::new(), EnvCredentialProvider::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
}

#[tokio::test]
async fn test_token_verifies_with_plain_hmac() {
    let (http, client) = init();
    client
        .get("/api/users", &RequestOptions::new().with("fields", "id"))
        .await
        .unwrap();

    let req = &http.requests()[0];
    let auth = req.headers[AUTHORIZATION].to_str().unwrap();
    let token = auth.strip_prefix("Bearer ").unwrap();
    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);

    let header: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0]).unwrap()).unwrap();
    assert_eq!(header["alg"], "HS256");

    let payload: serde_json::Value =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
    assert_eq!(payload, bearer_claims(req));

    let mut mac = Hmac::<Sha256>::new_from_slice(b"k").unwrap();
    mac.update(format!("{}.{}", segments[0], segments[1]).as_bytes());
    mac.verify_slice(&URL_SAFE_NO_PAD.decode(segments[2]).unwrap())
        .unwrap();
}
