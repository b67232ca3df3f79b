//! Validates a configuration, shows the call an Android runtime would receive, and revokes a
//! token against the authority named on the command line.
//!
//! ```sh
//! cargo run --example revoke_token -- https://idp.example my-client my-token
//! ```

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use appauth_bridge::{
	config::{AuthConfig, RawConfig},
	flows::{ReqwestAppAuth, RevokeRequest},
	normalize::{self, NativeCall},
	runtime::{AuthorizationRuntime, RuntimeFuture, RuntimeResponse},
	serde_json::json,
	shaper::AndroidArgumentShaper,
};

/// Runtime that prints what it would have executed.
struct PrintingRuntime;
impl AuthorizationRuntime for PrintingRuntime {
	fn invoke(&self, call: NativeCall) -> RuntimeFuture<'_> {
		println!("Runtime call `{}` with {:?}.", call.method, call.arguments.names());

		Box::pin(async { Ok(RuntimeResponse::default()) })
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut args = env::args().skip(1);
	let issuer =
		args.next().ok_or_else(|| eyre!("Usage: revoke_token <issuer> <client-id> <token>"))?;
	let client_id = args.next().ok_or_else(|| eyre!("Missing client id."))?;
	let token = args.next().ok_or_else(|| eyre!("Missing token to revoke."))?;
	let config = RawConfig::from_value(json!({
		"issuer": issuer,
		"clientId": client_id,
		"redirectUrl": "com.example.app:/oauth2redirect",
		"scopes": ["openid", "profile"],
		"customHeaders": { "token": { "X-Demo": "1" } },
	}))?;
	let shaper = Arc::new(AndroidArgumentShaper);
	let preview = normalize::authorize_only(&AuthConfig::resolve(&config)?, shaper.as_ref());

	println!("Authorize-only would send {} arguments:", preview.arguments.len());

	for (name, value) in preview.arguments.iter() {
		println!("  {name} = {value}");
	}

	let client: ReqwestAppAuth<PrintingRuntime> = ReqwestAppAuth::new(PrintingRuntime, shaper)?;

	client.prefetch_configuration(&config).await?;
	client.revoke(&config, RevokeRequest::new(token).with_send_client_id(true)).await?;

	println!("Token revoked.");

	Ok(())
}
