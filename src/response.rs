//! Typed views over runtime results.
//!
//! The runtime answers with loosely-typed JSON. These structs document the fields the common
//! runtimes return and are obtained through
//! [`RuntimeResponse::deserialize`](crate::runtime::RuntimeResponse::deserialize). Unknown
//! fields are ignored; token material is wrapped in [`TokenSecret`] so it never leaks through
//! `Debug`.

// crates.io
use time::format_description::well_known::Rfc3339;
// self
use crate::{_prelude::*, secret::TokenSecret};

/// Result of an authorization request without the code exchange.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeResult {
	/// Authorization code to exchange later.
	pub authorization_code: TokenSecret,
	/// State echoed by the authority.
	#[serde(default)]
	pub state: Option<String>,
	/// Scopes granted by the authority.
	#[serde(default)]
	pub scopes: Vec<String>,
	/// Extra response parameters.
	#[serde(default)]
	pub additional_parameters: JsonMap<String, Value>,
}

/// Result of a token exchange, combined authorization, or refresh.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResult {
	/// Access token.
	pub access_token: TokenSecret,
	/// Expiration instant in RFC 3339 form, when reported.
	#[serde(default, alias = "accessTokenExpirationDate")]
	pub access_token_expiration_time: Option<String>,
	/// OpenID Connect ID token, when issued.
	#[serde(default)]
	pub id_token: Option<TokenSecret>,
	/// Refresh token, when issued.
	#[serde(default)]
	pub refresh_token: Option<TokenSecret>,
	/// Token type, usually `Bearer`.
	#[serde(default)]
	pub token_type: Option<String>,
	/// Scopes granted by the authority.
	#[serde(default)]
	pub scopes: Vec<String>,
	/// Extra response parameters.
	#[serde(default)]
	pub additional_parameters: JsonMap<String, Value>,
}
impl TokenResult {
	/// Parses the reported expiration, returning `None` when the runtime omitted it.
	pub fn expires_at(&self) -> Result<Option<OffsetDateTime>, time::error::Parse> {
		self.access_token_expiration_time
			.as_deref()
			.map(|raw| OffsetDateTime::parse(raw, &Rfc3339))
			.transpose()
	}
}

/// Result of the combined authorization and code exchange.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeAndTokenResult {
	/// Authorization leg.
	pub authorize_result: AuthorizeResult,
	/// Code exchange leg.
	pub token_result: TokenResult,
}

/// Result of a dynamic client registration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
	/// Issued client identifier.
	pub client_id: String,
	/// Issued client secret.
	#[serde(default)]
	pub client_secret: Option<TokenSecret>,
	/// Issue instant as reported by the authority.
	#[serde(default)]
	pub client_id_issued_at: Option<String>,
	/// Secret expiry as reported by the authority.
	#[serde(default)]
	pub client_secret_expires_at: Option<String>,
	/// Token for the client configuration endpoint.
	#[serde(default)]
	pub registration_access_token: Option<TokenSecret>,
	/// Client configuration endpoint.
	#[serde(default)]
	pub registration_client_uri: Option<String>,
	/// Authentication method the authority assigned.
	#[serde(default)]
	pub token_endpoint_auth_method: Option<String>,
	/// Extra response parameters.
	#[serde(default)]
	pub additional_parameters: JsonMap<String, Value>,
}
