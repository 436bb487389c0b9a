//! Example of listing colleagues from a PBX with credentials from the environment.
//!
//! ```shell
//! WMS_PBX_SECRET_KEY=... WMS_APP_ID=... WMS_APP_NAME=... WMS_PBX_HOST=pbx.example.com \
//!     RUST_LOG=debug cargo run --example list_colleagues
//! ```

use log::info;
use pbxsign_core::{Context, OsEnv, Result};
use pbxsign_http_send_reqwest::ReqwestHttpSend;
use pbxsign_wms::{Client, EnvCredentialProvider, RequestOptions};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_provider(ctx, EnvCredentialProvider::new()).await?;
    info!("loaded credential: {:?}", client.signer().credential());

    let options = RequestOptions::new()
        .with("fields", "id,name,extension")
        .with("count", 10);
    let resp = client.get("/api/v1/Colleagues", &options).await?;

    info!("status: {}", resp.status());
    println!("{}", String::from_utf8_lossy(resp.body()));
    Ok(())
}
