//! Per-flow request normalization into ordered platform-call arguments.
//!
//! Each builder takes an already-resolved configuration and produces a [`NativeCall`]: the
//! runtime method name plus an [`ArgumentSet`] whose order matches the runtime's positional
//! signature. Base arguments are fixed per flow; the [`ArgumentShaper`] appends whatever the
//! target environment needs on top. `null` stands in for an absent optional argument.

// self
use crate::{
	_prelude::*,
	config::{
		AuthConfig, CustomHeaders, PrefetchConfig, RegistrationConfig, ServiceConfiguration,
		TokenExchangeConfig,
	},
	secret::TokenSecret,
	shaper::ArgumentShaper,
};

/// Methods exposed by the platform authorization runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeMethod {
	/// Authorization request followed by the code exchange.
	Authorize,
	/// Authorization request only; the code exchange happens later.
	OnlyAuthorize,
	/// Code exchange for a previously completed authorization request.
	OnlyTokenExchange,
	/// Refresh token grant.
	Refresh,
	/// Dynamic client registration.
	Register,
	/// Browser warm-up and discovery prefetch.
	PrefetchConfiguration,
}
impl NativeMethod {
	/// Returns the runtime's method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Authorize => "authorize",
			Self::OnlyAuthorize => "onlyAuthorize",
			Self::OnlyTokenExchange => "onlyTokenExchange",
			Self::Refresh => "refresh",
			Self::Register => "register",
			Self::PrefetchConfiguration => "prefetchConfiguration",
		}
	}
}
impl Display for NativeMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ordered, named positional arguments for one runtime call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgumentSet(Vec<(&'static str, Value)>);
impl ArgumentSet {
	/// Appends an argument after every argument pushed so far.
	pub fn push(&mut self, name: &'static str, value: impl Into<Value>) {
		self.0.push((name, value.into()));
	}

	/// Appends an optional argument, using `null` when it is absent.
	pub fn push_optional<T>(&mut self, name: &'static str, value: Option<T>)
	where
		T: Into<Value>,
	{
		self.push(name, value.map_or(Value::Null, Into::into));
	}

	/// Argument names in call order.
	pub fn names(&self) -> Vec<&'static str> {
		self.0.iter().map(|(name, _)| *name).collect()
	}

	/// Looks up an argument by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.iter().find(|(candidate, _)| *candidate == name).map(|(_, value)| value)
	}

	/// Iterates over `(name, value)` pairs in call order.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
		self.0.iter().map(|(name, value)| (*name, value))
	}

	/// Number of arguments.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no arguments were pushed.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Drops the names, leaving the positional values.
	pub fn into_values(self) -> Vec<Value> {
		self.0.into_iter().map(|(_, value)| value).collect()
	}
}

/// A fully-shaped runtime invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeCall {
	/// Runtime method to invoke.
	pub method: NativeMethod,
	/// Positional arguments in call order.
	pub arguments: ArgumentSet,
}

/// Shapes the authorization-only request.
pub fn authorize_only(config: &AuthConfig, shaper: &dyn ArgumentShaper) -> NativeCall {
	authorization_call(NativeMethod::OnlyAuthorize, config, shaper)
}

/// Shapes the combined authorization + code exchange request.
pub fn authorize(config: &AuthConfig, shaper: &dyn ArgumentShaper) -> NativeCall {
	authorization_call(NativeMethod::Authorize, config, shaper)
}

/// Shapes the bare code exchange request.
pub fn token_exchange_only(
	config: &TokenExchangeConfig,
	shaper: &dyn ArgumentShaper,
) -> NativeCall {
	let mut arguments = ArgumentSet::default();

	arguments.push_optional("clientSecret", config.client_secret.clone());
	arguments.push_optional(
		"additionalParameters",
		additional_parameters(&config.additional_parameters),
	);
	shaper.shape_token_exchange(config, &mut arguments);

	NativeCall { method: NativeMethod::OnlyTokenExchange, arguments }
}

/// Shapes the refresh grant request for the supplied refresh token.
pub fn refresh(
	config: &AuthConfig,
	refresh_token: &TokenSecret,
	shaper: &dyn ArgumentShaper,
) -> NativeCall {
	let mut arguments = ArgumentSet::default();

	arguments.push_optional("issuer", config.issuer.clone());
	arguments.push("redirectUrl", config.redirect_url.clone());
	arguments.push("clientId", config.client_id.clone());
	arguments.push_optional("clientSecret", config.client_secret.clone());
	arguments.push("refreshToken", refresh_token.expose());
	arguments.push("scopes", config.scopes.clone());
	arguments.push_optional(
		"additionalParameters",
		additional_parameters(&config.additional_parameters),
	);
	arguments.push_optional(
		"serviceConfiguration",
		service_configuration(&config.service_configuration),
	);
	shaper.shape_refresh(config, &mut arguments);

	NativeCall { method: NativeMethod::Refresh, arguments }
}

/// Shapes the dynamic client registration request.
pub fn register(config: &RegistrationConfig, shaper: &dyn ArgumentShaper) -> NativeCall {
	let mut arguments = ArgumentSet::default();

	arguments.push_optional("issuer", config.issuer.clone());
	arguments.push("redirectUrls", config.redirect_urls.clone());
	arguments.push_optional("responseTypes", config.response_types.clone());
	arguments.push_optional("grantTypes", config.grant_types.clone());
	arguments.push_optional("subjectType", config.subject_type.clone());
	arguments.push_optional("tokenEndpointAuthMethod", config.token_endpoint_auth_method.clone());
	arguments.push_optional(
		"additionalParameters",
		additional_parameters(&config.additional_parameters),
	);
	arguments.push_optional(
		"serviceConfiguration",
		service_configuration(&config.service_configuration),
	);
	shaper.shape_register(config, &mut arguments);

	NativeCall { method: NativeMethod::Register, arguments }
}

/// Shapes the prefetch request.
///
/// Every argument is part of the base set; callers consult
/// [`ArgumentShaper::supports_prefetch`] before dispatching.
pub fn prefetch_configuration(config: &PrefetchConfig) -> NativeCall {
	let mut arguments = ArgumentSet::default();

	arguments.push("warmAndPrefetchChrome", config.warm_and_prefetch_chrome);
	arguments.push_optional("issuer", config.issuer.clone());
	arguments.push("redirectUrl", config.redirect_url.clone());
	arguments.push("clientId", config.client_id.clone());
	arguments.push("scopes", config.scopes.clone());
	arguments.push_optional(
		"serviceConfiguration",
		service_configuration(&config.service_configuration),
	);
	arguments.push(
		"dangerouslyAllowInsecureHttpRequests",
		config.dangerously_allow_insecure_http_requests,
	);
	arguments.push_optional("customHeaders", custom_headers(&config.custom_headers));

	NativeCall { method: NativeMethod::PrefetchConfiguration, arguments }
}

pub(crate) fn custom_headers(headers: &Option<CustomHeaders>) -> Option<Value> {
	headers.as_ref().map(CustomHeaders::to_value)
}

fn authorization_call(
	method: NativeMethod,
	config: &AuthConfig,
	shaper: &dyn ArgumentShaper,
) -> NativeCall {
	let mut arguments = ArgumentSet::default();

	arguments.push_optional("issuer", config.issuer.clone());
	arguments.push("redirectUrl", config.redirect_url.clone());
	arguments.push("clientId", config.client_id.clone());
	arguments.push_optional("clientSecret", config.client_secret.clone());
	arguments.push("scopes", config.scopes.clone());
	arguments.push_optional(
		"additionalParameters",
		additional_parameters(&config.additional_parameters),
	);
	arguments.push_optional(
		"serviceConfiguration",
		service_configuration(&config.service_configuration),
	);
	shaper.shape_authorize(config, &mut arguments);

	NativeCall { method, arguments }
}

fn additional_parameters(parameters: &Option<BTreeMap<String, String>>) -> Option<Value> {
	parameters.as_ref().map(crate::config::string_map_value)
}

fn service_configuration(configuration: &Option<ServiceConfiguration>) -> Option<Value> {
	configuration.as_ref().map(ServiceConfiguration::to_value)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{
		config::RawConfig,
		shaper::IosArgumentShaper,
	};

	fn auth_config(value: Value) -> AuthConfig {
		let raw = RawConfig::from_value(value).expect("Fixture should be a JSON object.");

		AuthConfig::resolve(&raw).expect("Fixture should resolve.")
	}

	#[test]
	fn authorize_only_matches_the_documented_tuple() {
		let config = auth_config(json!({
			"issuer": "https://idp.example",
			"clientId": "c1",
			"redirectUrl": "app://cb",
			"scopes": ["openid"],
			"serviceConfiguration": null,
		}));
		let call = authorize_only(&config, &IosArgumentShaper);

		assert_eq!(call.method, NativeMethod::OnlyAuthorize);
		assert_eq!(
			call.arguments.into_values(),
			vec![
				json!("https://idp.example"),
				json!("app://cb"),
				json!("c1"),
				Value::Null,
				json!(["openid"]),
				Value::Null,
				Value::Null,
				json!(true),
				json!(true),
			]
		);
	}

	#[test]
	fn refresh_places_the_token_after_the_client_secret() {
		let config = auth_config(json!({
			"issuer": "https://idp.example",
			"clientId": "c1",
			"clientSecret": "s1",
			"redirectUrl": "app://cb",
		}));
		let call = refresh(&config, &TokenSecret::new("tok"), &IosArgumentShaper);

		assert_eq!(call.arguments.names(), vec![
			"issuer",
			"redirectUrl",
			"clientId",
			"clientSecret",
			"refreshToken",
			"scopes",
			"additionalParameters",
			"serviceConfiguration",
		]);
		assert_eq!(call.arguments.get("refreshToken"), Some(&json!("tok")));
	}

	#[test]
	fn prefetch_carries_transport_overrides_in_the_base_set() {
		let raw = RawConfig::from_value(json!({
			"issuer": "https://idp.example",
			"clientId": "c1",
			"redirectUrl": "app://cb",
		}))
		.expect("Fixture should be a JSON object.");
		let config = PrefetchConfig::resolve(&raw).expect("Fixture should resolve.");
		let call = prefetch_configuration(&config);

		assert_eq!(call.method, NativeMethod::PrefetchConfiguration);
		assert_eq!(call.arguments.names(), vec![
			"warmAndPrefetchChrome",
			"issuer",
			"redirectUrl",
			"clientId",
			"scopes",
			"serviceConfiguration",
			"dangerouslyAllowInsecureHttpRequests",
			"customHeaders",
		]);
		assert_eq!(call.arguments.get("warmAndPrefetchChrome"), Some(&json!(false)));
	}
}
