//! Target-environment argument shaping.
//!
//! The normalizer builds the base arguments every environment shares and then hands the
//! [`ArgumentSet`] to an [`ArgumentShaper`], which appends the environment-specific trailer.
//! Supporting a new environment means adding an implementation, not another branch in the
//! normalizer.

// self
use crate::{
	config::{AuthConfig, CustomHeaders, RegistrationConfig, TokenExchangeConfig},
	normalize::{self, ArgumentSet},
};

/// Strategy hook that appends environment-specific arguments to a runtime call.
///
/// Every hook defaults to a no-op, so implementations override only the flows where their
/// runtime expects extra positional arguments.
pub trait ArgumentShaper: Send + Sync {
	/// Stable label for the target environment, used in spans and logs.
	fn target(&self) -> &'static str;

	/// Extends the authorize and authorize-only arguments.
	fn shape_authorize(&self, _config: &AuthConfig, _arguments: &mut ArgumentSet) {}

	/// Extends the token-exchange-only arguments.
	fn shape_token_exchange(&self, _config: &TokenExchangeConfig, _arguments: &mut ArgumentSet) {}

	/// Extends the refresh arguments.
	fn shape_refresh(&self, _config: &AuthConfig, _arguments: &mut ArgumentSet) {}

	/// Extends the registration arguments.
	fn shape_register(&self, _config: &RegistrationConfig, _arguments: &mut ArgumentSet) {}

	/// Returns true when the runtime can warm its browser and prefetch discovery.
	fn supports_prefetch(&self) -> bool {
		false
	}
}

/// Shaper for Android runtimes, which receive transport overrides with every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct AndroidArgumentShaper;
impl ArgumentShaper for AndroidArgumentShaper {
	fn target(&self) -> &'static str {
		"android"
	}

	fn shape_authorize(&self, config: &AuthConfig, arguments: &mut ArgumentSet) {
		arguments.push("usePKCE", config.use_pkce);
		arguments.push("clientAuthMethod", config.client_auth_method.as_str());
		push_transport_overrides(
			arguments,
			config.dangerously_allow_insecure_http_requests,
			&config.custom_headers,
		);
	}

	fn shape_token_exchange(&self, config: &TokenExchangeConfig, arguments: &mut ArgumentSet) {
		push_transport_overrides(
			arguments,
			config.dangerously_allow_insecure_http_requests,
			&config.custom_headers,
		);
	}

	fn shape_refresh(&self, config: &AuthConfig, arguments: &mut ArgumentSet) {
		arguments.push("clientAuthMethod", config.client_auth_method.as_str());
		push_transport_overrides(
			arguments,
			config.dangerously_allow_insecure_http_requests,
			&config.custom_headers,
		);
	}

	fn shape_register(&self, config: &RegistrationConfig, arguments: &mut ArgumentSet) {
		push_transport_overrides(
			arguments,
			config.dangerously_allow_insecure_http_requests,
			&config.custom_headers,
		);
	}

	fn supports_prefetch(&self) -> bool {
		true
	}
}

/// Shaper for iOS runtimes, which only take nonce/PKCE toggles on authorization.
#[derive(Clone, Copy, Debug, Default)]
pub struct IosArgumentShaper;
impl ArgumentShaper for IosArgumentShaper {
	fn target(&self) -> &'static str {
		"ios"
	}

	fn shape_authorize(&self, config: &AuthConfig, arguments: &mut ArgumentSet) {
		arguments.push("useNonce", config.use_nonce);
		arguments.push("usePKCE", config.use_pkce);
	}
}

fn push_transport_overrides(
	arguments: &mut ArgumentSet,
	dangerously_allow_insecure_http_requests: bool,
	custom_headers: &Option<CustomHeaders>,
) {
	arguments.push("dangerouslyAllowInsecureHttpRequests", dangerously_allow_insecure_http_requests);
	arguments.push_optional("customHeaders", normalize::custom_headers(custom_headers));
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::config::RawConfig;

	fn raw() -> RawConfig {
		RawConfig::from_value(json!({
			"issuer": "https://idp.example",
			"clientId": "c1",
			"clientSecret": "s1",
			"redirectUrl": "app://cb",
			"redirectUrls": ["app://cb"],
			"scopes": ["openid", "profile"],
			"additionalParameters": { "prompt": "login" },
			"clientAuthMethod": "post",
			"useNonce": false,
			"customHeaders": { "token": { "X-Tenant": "acme" } },
		}))
		.expect("Fixture should be a JSON object.")
	}

	const AUTHORIZE_BASE: [&str; 7] = [
		"issuer",
		"redirectUrl",
		"clientId",
		"clientSecret",
		"scopes",
		"additionalParameters",
		"serviceConfiguration",
	];

	#[test]
	fn authorize_trailers_differ_per_environment() {
		let config = AuthConfig::resolve(&raw()).expect("Fixture should resolve.");
		let android = normalize::authorize_only(&config, &AndroidArgumentShaper);
		let ios = normalize::authorize_only(&config, &IosArgumentShaper);
		let android_again = normalize::authorize_only(&config, &AndroidArgumentShaper);

		assert_eq!(android.arguments.names()[..7], AUTHORIZE_BASE);
		assert_eq!(android.arguments.names()[7..], [
			"usePKCE",
			"clientAuthMethod",
			"dangerouslyAllowInsecureHttpRequests",
			"customHeaders",
		]);
		assert_eq!(ios.arguments.names()[..7], AUTHORIZE_BASE);
		assert_eq!(ios.arguments.names()[7..], ["useNonce", "usePKCE"]);
		assert_eq!(ios.arguments.get("useNonce"), Some(&json!(false)));
		assert_eq!(android.arguments.get("clientAuthMethod"), Some(&json!("post")));
		assert_eq!(
			android.arguments.get("customHeaders"),
			Some(&json!({ "token": { "X-Tenant": "acme" } }))
		);
		assert_eq!(android, android_again);
	}

	#[test]
	fn token_exchange_and_register_only_grow_on_android() {
		let exchange = TokenExchangeConfig::resolve(&raw()).expect("Fixture should resolve.");

		assert_eq!(
			normalize::token_exchange_only(&exchange, &AndroidArgumentShaper).arguments.names(),
			vec![
				"clientSecret",
				"additionalParameters",
				"dangerouslyAllowInsecureHttpRequests",
				"customHeaders",
			]
		);
		assert_eq!(
			normalize::token_exchange_only(&exchange, &IosArgumentShaper).arguments.names(),
			vec!["clientSecret", "additionalParameters"]
		);

		let registration = RegistrationConfig::resolve(&raw()).expect("Fixture should resolve.");

		assert_eq!(normalize::register(&registration, &IosArgumentShaper).arguments.len(), 8);
		assert_eq!(
			normalize::register(&registration, &AndroidArgumentShaper).arguments.names()[8..],
			["dangerouslyAllowInsecureHttpRequests", "customHeaders"]
		);
	}

	#[test]
	fn refresh_trailer_only_exists_on_android() {
		let config = AuthConfig::resolve(&raw()).expect("Fixture should resolve.");
		let token = crate::secret::TokenSecret::new("tok");

		assert_eq!(normalize::refresh(&config, &token, &IosArgumentShaper).arguments.len(), 8);
		assert_eq!(
			normalize::refresh(&config, &token, &AndroidArgumentShaper).arguments.names()[8..],
			["clientAuthMethod", "dangerouslyAllowInsecureHttpRequests", "customHeaders"]
		);
	}
}
