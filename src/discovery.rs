//! OpenID Connect discovery for flows that resolve endpoints just in time.

// crates.io
use oauth2::http::{Method, Request, header::ACCEPT};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DiscoveryError},
	http::{self, HttpTransport},
};

/// Well-known path appended to the issuer.
pub const DISCOVERY_PATH: &str = "/.well-known/openid-configuration";

/// Provider metadata published at the issuer's discovery endpoint.
///
/// Every field is optional; flows check for the ones they consume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
	/// Issuer identifier.
	#[serde(default)]
	pub issuer: Option<String>,
	/// Authorization endpoint.
	#[serde(default)]
	pub authorization_endpoint: Option<String>,
	/// Token endpoint.
	#[serde(default)]
	pub token_endpoint: Option<String>,
	/// Token revocation endpoint.
	#[serde(default)]
	pub revocation_endpoint: Option<String>,
	/// Dynamic client registration endpoint.
	#[serde(default)]
	pub registration_endpoint: Option<String>,
	/// UserInfo endpoint.
	#[serde(default)]
	pub userinfo_endpoint: Option<String>,
	/// JSON Web Key Set document.
	#[serde(default)]
	pub jwks_uri: Option<String>,
}

/// Builds the discovery URL for `issuer`, dropping one trailing slash.
pub fn discovery_url(issuer: &str) -> String {
	let base = issuer.strip_suffix('/').unwrap_or(issuer);

	format!("{base}{DISCOVERY_PATH}")
}

/// Fetches and parses the discovery document for `issuer`.
///
/// Exactly one GET is issued. Non-success statuses and malformed bodies are reported as
/// [`DiscoveryError`]s; nothing is retried.
pub async fn fetch_discovery_document<C>(
	http_client: &C,
	issuer: &str,
	timeout: Option<Duration>,
	allow_insecure: bool,
) -> Result<DiscoveryDocument>
where
	C: ?Sized + HttpTransport,
{
	let url = discovery_url(issuer);

	http::parse_endpoint("issuer", &url, allow_insecure)?;

	let request = Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(ACCEPT, "application/json")
		.body(Vec::new())
		.map_err(ConfigError::from)?;
	let response = http::execute(http_client, timeout, request)
		.await
		.map_err(|e| DiscoveryError::Fetch { url: url.clone(), source: Box::new(e) })?;
	let status = response.status();

	if !status.is_success() {
		return Err(DiscoveryError::Status { url, status: status.as_u16() }.into());
	}

	let mut deserializer = serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DiscoveryError::Parse { url, source }.into())
}
