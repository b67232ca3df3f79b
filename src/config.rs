//! Loosely-typed client configuration and its resolved, fully-defaulted per-flow forms.
//!
//! Callers hand the crate a [`RawConfig`], usually parsed from JSON. Each flow resolves it into
//! an immutable value ([`AuthConfig`], [`TokenExchangeConfig`], [`RegistrationConfig`],
//! [`PrefetchConfig`], or [`RevokeConfig`]) after the [`validate`](crate::validate) predicates
//! have passed. Resolution is the only place defaults are applied; nothing downstream ever
//! re-reads the raw map.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	validate::{self, RequiredEndpoints},
};

/// Client configuration exactly as the application declared it.
///
/// Keys use the camelCase names from the configuration schema (`issuer`, `clientId`,
/// `serviceConfiguration`, ...). A JSON `null` behaves like an absent key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfig(JsonMap<String, Value>);
impl RawConfig {
	/// Wraps a JSON value, which must be an object.
	pub fn from_value(value: Value) -> Result<Self, ConfigError> {
		match value {
			Value::Object(map) => Ok(Self(map)),
			_ => Err(ConfigError::NotAnObject),
		}
	}

	/// Parses configuration text.
	pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
		let value = serde_json::from_str(text).map_err(|source| ConfigError::InvalidJson { source })?;

		Self::from_value(value)
	}

	/// Returns the value stored under `key`, treating `null` as absent.
	pub fn get(&self, key: &str) -> Option<&Value> {
		validate::present(self.0.get(key))
	}

	/// Sets (or replaces) a key, returning the updated configuration.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(key.into(), value.into());

		self
	}

	/// Removes a key, returning the updated configuration.
	pub fn without(mut self, key: &str) -> Self {
		self.0.remove(key);

		self
	}

	/// Borrows the underlying map.
	pub fn as_map(&self) -> &JsonMap<String, Value> {
		&self.0
	}
}
impl TryFrom<Value> for RawConfig {
	type Error = ConfigError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		Self::from_value(value)
	}
}

/// Client authentication method used at the token endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// HTTP Basic with `client_id`/`client_secret`.
	Basic,
	/// Form POST body parameters for `client_id`/`client_secret`.
	Post,
}
impl ClientAuthMethod {
	/// Returns the configuration label (`basic` or `post`).
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Basic => "basic",
			Self::Post => "post",
		}
	}
}
impl Display for ClientAuthMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Explicit endpoint overrides that bypass issuer-based discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfiguration {
	/// Authorization endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub authorization_endpoint: Option<String>,
	/// Token endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token_endpoint: Option<String>,
	/// Token revocation endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub revocation_endpoint: Option<String>,
	/// Dynamic client registration endpoint.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub registration_endpoint: Option<String>,
}
impl ServiceConfiguration {
	/// Renders the configuration as the JSON object handed to the runtime.
	pub fn to_value(&self) -> Value {
		let mut map = JsonMap::new();
		let fields = [
			("authorizationEndpoint", &self.authorization_endpoint),
			("tokenEndpoint", &self.token_endpoint),
			("revocationEndpoint", &self.revocation_endpoint),
			("registrationEndpoint", &self.registration_endpoint),
		];

		for (key, value) in fields {
			if let Some(value) = value {
				map.insert(key.into(), Value::String(value.clone()));
			}
		}

		Value::Object(map)
	}
}

/// Flows that accept HTTP header overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderFlow {
	/// Token endpoint requests.
	Token,
	/// Authorization requests.
	Authorize,
	/// Registration requests.
	Register,
}
impl HeaderFlow {
	/// Returns the `customHeaders` key for the flow.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Token => "token",
			Self::Authorize => "authorize",
			Self::Register => "register",
		}
	}
}

/// Per-flow HTTP header overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHeaders {
	/// Headers sent with token endpoint requests.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<BTreeMap<String, String>>,
	/// Headers sent with authorization requests.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub authorize: Option<BTreeMap<String, String>>,
	/// Headers sent with registration requests.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub register: Option<BTreeMap<String, String>>,
}
impl CustomHeaders {
	/// Returns the header overrides configured for `flow`.
	pub fn for_flow(&self, flow: HeaderFlow) -> Option<&BTreeMap<String, String>> {
		match flow {
			HeaderFlow::Token => self.token.as_ref(),
			HeaderFlow::Authorize => self.authorize.as_ref(),
			HeaderFlow::Register => self.register.as_ref(),
		}
	}

	/// Renders the overrides as the JSON object handed to the runtime.
	pub fn to_value(&self) -> Value {
		let map = [HeaderFlow::Token, HeaderFlow::Authorize, HeaderFlow::Register]
			.into_iter()
			.filter_map(|flow| {
				self.for_flow(flow).map(|headers| (flow.as_str().to_owned(), string_map_value(headers)))
			})
			.collect();

		Value::Object(map)
	}
}

/// Resolved configuration for authorize-only, authorize, and refresh flows.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthConfig {
	/// Authority base URL.
	pub issuer: Option<String>,
	/// Redirect target registered for the client.
	pub redirect_url: String,
	/// OAuth client identifier.
	pub client_id: String,
	/// Optional confidential client secret.
	pub client_secret: Option<String>,
	/// Requested scopes, empty when none were configured.
	pub scopes: Vec<String>,
	/// Opaque parameters passed through to the authority.
	pub additional_parameters: Option<BTreeMap<String, String>>,
	/// Explicit endpoint overrides.
	pub service_configuration: Option<ServiceConfiguration>,
	/// Token endpoint client authentication, defaults to `basic`.
	pub client_auth_method: ClientAuthMethod,
	/// Permits non-TLS endpoints, defaults to `false`.
	pub dangerously_allow_insecure_http_requests: bool,
	/// Per-flow header overrides.
	pub custom_headers: Option<CustomHeaders>,
	/// Requests a nonce from the runtime, defaults to `true`.
	pub use_nonce: bool,
	/// Requests PKCE from the runtime, defaults to `true`.
	pub use_pkce: bool,
}
impl AuthConfig {
	/// Validates `raw` for the authorize/refresh flows and applies defaults.
	pub fn resolve(raw: &RawConfig) -> Result<Self, ConfigError> {
		validate::validate_identity_source(
			raw.get("issuer"),
			raw.get("serviceConfiguration"),
			RequiredEndpoints::AuthorizationAndToken,
		)?;
		validate::validate_client_id(raw.get("clientId"))?;
		validate::validate_redirect_url(raw.get("redirectUrl"))?;
		validate::validate_custom_headers(raw.get("customHeaders"))?;
		validate::validate_additional_parameters(raw.get("additionalParameters"))?;

		Ok(Self {
			issuer: optional_string(raw, "issuer")?,
			redirect_url: required_string(raw, "redirectUrl")?,
			client_id: required_string(raw, "clientId")?,
			client_secret: optional_string(raw, "clientSecret")?,
			scopes: string_list(raw, "scopes")?,
			additional_parameters: additional_parameters(raw),
			service_configuration: service_configuration(raw)?,
			client_auth_method: client_auth_method(raw)?,
			dangerously_allow_insecure_http_requests: flag(
				raw,
				"dangerouslyAllowInsecureHttpRequests",
				false,
			)?,
			custom_headers: custom_headers(raw),
			use_nonce: flag(raw, "useNonce", true)?,
			use_pkce: flag(raw, "usePKCE", true)?,
		})
	}
}

/// Resolved configuration for the bare token exchange, which needs no client identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenExchangeConfig {
	/// Optional confidential client secret.
	pub client_secret: Option<String>,
	/// Opaque parameters passed through to the authority.
	pub additional_parameters: Option<BTreeMap<String, String>>,
	/// Permits non-TLS endpoints, defaults to `false`.
	pub dangerously_allow_insecure_http_requests: bool,
	/// Per-flow header overrides.
	pub custom_headers: Option<CustomHeaders>,
}
impl TokenExchangeConfig {
	/// Validates `raw` for the token exchange and applies defaults.
	pub fn resolve(raw: &RawConfig) -> Result<Self, ConfigError> {
		validate::validate_custom_headers(raw.get("customHeaders"))?;
		validate::validate_additional_parameters(raw.get("additionalParameters"))?;

		Ok(Self {
			client_secret: optional_string(raw, "clientSecret")?,
			additional_parameters: additional_parameters(raw),
			dangerously_allow_insecure_http_requests: flag(
				raw,
				"dangerouslyAllowInsecureHttpRequests",
				false,
			)?,
			custom_headers: custom_headers(raw),
		})
	}
}

/// Resolved configuration for dynamic client registration.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationConfig {
	/// Authority base URL.
	pub issuer: Option<String>,
	/// Redirect targets to register.
	pub redirect_urls: Vec<String>,
	/// Requested `response_types`.
	pub response_types: Option<Vec<String>>,
	/// Requested `grant_types`.
	pub grant_types: Option<Vec<String>>,
	/// Requested `subject_type`.
	pub subject_type: Option<String>,
	/// Requested `token_endpoint_auth_method`.
	pub token_endpoint_auth_method: Option<String>,
	/// Opaque registration metadata (`client_name`, `logo_uri`, ...).
	pub additional_parameters: Option<BTreeMap<String, String>>,
	/// Explicit endpoint overrides.
	pub service_configuration: Option<ServiceConfiguration>,
	/// Permits non-TLS endpoints, defaults to `false`.
	pub dangerously_allow_insecure_http_requests: bool,
	/// Per-flow header overrides.
	pub custom_headers: Option<CustomHeaders>,
}
impl RegistrationConfig {
	/// Validates `raw` for registration and applies defaults.
	pub fn resolve(raw: &RawConfig) -> Result<Self, ConfigError> {
		validate::validate_identity_source(
			raw.get("issuer"),
			raw.get("serviceConfiguration"),
			RequiredEndpoints::Registration,
		)?;
		validate::validate_custom_headers(raw.get("customHeaders"))?;
		validate::validate_redirect_urls(raw.get("redirectUrls"))?;
		validate::validate_string_array_if_present("responseTypes", raw.get("responseTypes"))?;
		validate::validate_string_array_if_present("grantTypes", raw.get("grantTypes"))?;
		validate::validate_string_if_present("subjectType", raw.get("subjectType"))?;
		validate::validate_string_if_present(
			"tokenEndpointAuthMethod",
			raw.get("tokenEndpointAuthMethod"),
		)?;
		validate::validate_additional_parameters(raw.get("additionalParameters"))?;

		Ok(Self {
			issuer: optional_string(raw, "issuer")?,
			redirect_urls: string_list(raw, "redirectUrls")?,
			response_types: optional_string_list(raw, "responseTypes")?,
			grant_types: optional_string_list(raw, "grantTypes")?,
			subject_type: optional_string(raw, "subjectType")?,
			token_endpoint_auth_method: optional_string(raw, "tokenEndpointAuthMethod")?,
			additional_parameters: additional_parameters(raw),
			service_configuration: service_configuration(raw)?,
			dangerously_allow_insecure_http_requests: flag(
				raw,
				"dangerouslyAllowInsecureHttpRequests",
				false,
			)?,
			custom_headers: custom_headers(raw),
		})
	}
}

/// Resolved configuration for warming the runtime's browser and prefetching discovery.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefetchConfig {
	/// Warms up the custom-tab browser before the authorization request.
	pub warm_and_prefetch_chrome: bool,
	/// Authority base URL.
	pub issuer: Option<String>,
	/// Redirect target registered for the client.
	pub redirect_url: String,
	/// OAuth client identifier.
	pub client_id: String,
	/// Requested scopes, empty when none were configured.
	pub scopes: Vec<String>,
	/// Explicit endpoint overrides.
	pub service_configuration: Option<ServiceConfiguration>,
	/// Permits non-TLS endpoints, defaults to `false`.
	pub dangerously_allow_insecure_http_requests: bool,
	/// Per-flow header overrides.
	pub custom_headers: Option<CustomHeaders>,
}
impl PrefetchConfig {
	/// Validates `raw` for prefetching and applies defaults.
	pub fn resolve(raw: &RawConfig) -> Result<Self, ConfigError> {
		validate::validate_identity_source(
			raw.get("issuer"),
			raw.get("serviceConfiguration"),
			RequiredEndpoints::AuthorizationAndToken,
		)?;
		validate::validate_client_id(raw.get("clientId"))?;
		validate::validate_redirect_url(raw.get("redirectUrl"))?;
		validate::validate_custom_headers(raw.get("customHeaders"))?;

		Ok(Self {
			warm_and_prefetch_chrome: flag(raw, "warmAndPrefetchChrome", false)?,
			issuer: optional_string(raw, "issuer")?,
			redirect_url: required_string(raw, "redirectUrl")?,
			client_id: required_string(raw, "clientId")?,
			scopes: string_list(raw, "scopes")?,
			service_configuration: service_configuration(raw)?,
			dangerously_allow_insecure_http_requests: flag(
				raw,
				"dangerouslyAllowInsecureHttpRequests",
				false,
			)?,
			custom_headers: custom_headers(raw),
		})
	}
}

/// Resolved configuration for token revocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RevokeConfig {
	/// OAuth client identifier.
	pub client_id: String,
	/// Optional client secret, required only for Basic authentication.
	pub client_secret: Option<String>,
	/// Authority base URL used for discovery.
	pub issuer: Option<String>,
	/// Explicit endpoint overrides.
	pub service_configuration: Option<ServiceConfiguration>,
	/// Permits non-TLS endpoints, defaults to `false`.
	pub dangerously_allow_insecure_http_requests: bool,
}
impl RevokeConfig {
	/// Validates `raw` for revocation and applies defaults.
	pub fn resolve(raw: &RawConfig) -> Result<Self, ConfigError> {
		validate::validate_client_id(raw.get("clientId"))?;
		validate::validate_identity_source(
			raw.get("issuer"),
			raw.get("serviceConfiguration"),
			RequiredEndpoints::Revocation,
		)?;

		Ok(Self {
			client_id: required_string(raw, "clientId")?,
			client_secret: optional_string(raw, "clientSecret")?,
			issuer: optional_string(raw, "issuer")?,
			service_configuration: service_configuration(raw)?,
			dangerously_allow_insecure_http_requests: flag(
				raw,
				"dangerouslyAllowInsecureHttpRequests",
				false,
			)?,
		})
	}

	/// Returns the explicit revocation endpoint, if configured; an empty string counts as absent.
	pub fn revocation_endpoint(&self) -> Option<&str> {
		self.service_configuration
			.as_ref()?
			.revocation_endpoint
			.as_deref()
			.filter(|endpoint| !endpoint.is_empty())
	}
}

pub(crate) fn string_map_value(map: &BTreeMap<String, String>) -> Value {
	Value::Object(map.iter().map(|(key, value)| (key.clone(), Value::String(value.clone()))).collect())
}

fn required_string(raw: &RawConfig, field: &'static str) -> Result<String, ConfigError> {
	match raw.get(field) {
		Some(Value::String(value)) => Ok(value.clone()),
		_ => Err(ConfigError::InvalidField { field, expected: "a string" }),
	}
}

fn optional_string(raw: &RawConfig, field: &'static str) -> Result<Option<String>, ConfigError> {
	match raw.get(field) {
		None => Ok(None),
		Some(Value::String(value)) => Ok(Some(value.clone())),
		Some(_) => Err(ConfigError::InvalidField { field, expected: "a string when provided" }),
	}
}

fn optional_string_list(
	raw: &RawConfig,
	field: &'static str,
) -> Result<Option<Vec<String>>, ConfigError> {
	let Some(value) = raw.get(field) else {
		return Ok(None);
	};
	let invalid = || ConfigError::InvalidField { field, expected: "an array of strings" };

	value
		.as_array()
		.ok_or_else(invalid)?
		.iter()
		.map(|item| item.as_str().map(str::to_owned).ok_or_else(invalid))
		.collect::<Result<Vec<_>, _>>()
		.map(Some)
}

fn string_list(raw: &RawConfig, field: &'static str) -> Result<Vec<String>, ConfigError> {
	optional_string_list(raw, field).map(Option::unwrap_or_default)
}

fn flag(raw: &RawConfig, field: &'static str, default: bool) -> Result<bool, ConfigError> {
	match raw.get(field) {
		None => Ok(default),
		Some(Value::Bool(value)) => Ok(*value),
		Some(_) => Err(ConfigError::InvalidField { field, expected: "a boolean when provided" }),
	}
}

fn client_auth_method(raw: &RawConfig) -> Result<ClientAuthMethod, ConfigError> {
	match raw.get("clientAuthMethod").map(|value| value.as_str()) {
		None => Ok(ClientAuthMethod::default()),
		Some(Some("basic")) => Ok(ClientAuthMethod::Basic),
		Some(Some("post")) => Ok(ClientAuthMethod::Post),
		Some(_) => Err(ConfigError::InvalidField {
			field: "clientAuthMethod",
			expected: "either \"basic\" or \"post\"",
		}),
	}
}

fn service_configuration(raw: &RawConfig) -> Result<Option<ServiceConfiguration>, ConfigError> {
	let Some(value) = raw.get("serviceConfiguration") else {
		return Ok(None);
	};
	let map = value.as_object().ok_or(ConfigError::InvalidField {
		field: "serviceConfiguration",
		expected: "an object when provided",
	})?;
	let endpoint = |key: &str, field: &'static str| match validate::present(map.get(key)) {
		None => Ok(None),
		Some(Value::String(url)) => Ok(Some(url.clone())),
		Some(_) => Err(ConfigError::InvalidField { field, expected: "a string when provided" }),
	};

	Ok(Some(ServiceConfiguration {
		authorization_endpoint: endpoint(
			"authorizationEndpoint",
			"serviceConfiguration.authorizationEndpoint",
		)?,
		token_endpoint: endpoint("tokenEndpoint", "serviceConfiguration.tokenEndpoint")?,
		revocation_endpoint: endpoint(
			"revocationEndpoint",
			"serviceConfiguration.revocationEndpoint",
		)?,
		registration_endpoint: endpoint(
			"registrationEndpoint",
			"serviceConfiguration.registrationEndpoint",
		)?,
	}))
}

// Callers run `validate_additional_parameters` first, so non-string entries never reach here.
fn additional_parameters(raw: &RawConfig) -> Option<BTreeMap<String, String>> {
	raw.get("additionalParameters")?.as_object().map(|map| {
		map.iter()
			.filter_map(|(key, value)| value.as_str().map(|value| (key.clone(), value.to_owned())))
			.collect()
	})
}

// Callers run `validate_custom_headers` first, so every present flow entry is a string map.
fn custom_headers(raw: &RawConfig) -> Option<CustomHeaders> {
	let map = raw.get("customHeaders")?.as_object()?;
	let headers_for = |flow: HeaderFlow| {
		map.get(flow.as_str()).and_then(Value::as_object).map(|headers| {
			headers
				.iter()
				.filter_map(|(name, value)| value.as_str().map(|value| (name.clone(), value.to_owned())))
				.collect::<BTreeMap<_, _>>()
		})
	};

	Some(CustomHeaders {
		token: headers_for(HeaderFlow::Token),
		authorize: headers_for(HeaderFlow::Authorize),
		register: headers_for(HeaderFlow::Register),
	})
}
