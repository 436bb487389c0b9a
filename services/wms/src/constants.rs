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

use http::HeaderName;
use percent_encoding::{AsciiSet, CONTROLS};

// Env values used to configure the WMS client.
pub const WMS_PBX_SECRET_KEY: &str = "WMS_PBX_SECRET_KEY";
pub const WMS_APP_ID: &str = "WMS_APP_ID";
pub const WMS_APP_NAME: &str = "WMS_APP_NAME";
pub const WMS_PBX_HOST: &str = "WMS_PBX_HOST";

// Headers used in WMS requests.
pub const X_APP_ID: HeaderName = HeaderName::from_static("x-app-id");

/// Header names as listed in the token's `sign.headers` claim.
pub const SIGNED_HEADER_HOST: &str = "Host";
pub const SIGNED_HEADER_APP_ID: &str = "X-APP-ID";

/// Digest algorithm tag of the canonical string hash.
pub const SIGN_ALGORITHM: &str = "sha256";

/// Validity window of a signed token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60;

/// Option key that carries the target path in [`crate::Client::execute`].
pub const TARGET_PATH_KEY: &str = "url";

/// AsciiSet for query keys and values.
///
/// Only bytes that cannot stay literal in a query component, or that would
/// break `key=value&` framing, are encoded. `,` `/` `:` stay as they are.
pub static WMS_QUERY_ENCODE_SET: AsciiSet = CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');
