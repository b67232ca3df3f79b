//! Pure configuration predicates checked before any runtime or network call.
//!
//! Every check borrows the loosely-typed value exactly as it arrived, never mutates it, and either
//! passes silently or returns a [`ConfigError`] naming the offending field and the accepted shape.
//! A JSON `null` is treated the same as an absent key. Checks are independent of each other, so
//! callers may run them in any order; flows run them fail-fast.

// self
use crate::{
	_prelude::*,
	error::{ConfigError, CustomHeadersError},
};

/// Header-override keys accepted inside `customHeaders`.
pub const CUSTOM_HEADER_FLOWS: [&str; 3] = ["token", "authorize", "register"];

/// Endpoint fields a flow needs in `serviceConfiguration` when no issuer is supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequiredEndpoints {
	/// Authorize, refresh, and prefetch need both authorization and token endpoints.
	AuthorizationAndToken,
	/// Dynamic client registration needs the registration endpoint.
	Registration,
	/// Revocation needs the revocation endpoint.
	Revocation,
}
impl RequiredEndpoints {
	/// Returns the `serviceConfiguration` keys that must hold strings.
	pub const fn fields(self) -> &'static [&'static str] {
		match self {
			Self::AuthorizationAndToken => &["authorizationEndpoint", "tokenEndpoint"],
			Self::Registration => &["registrationEndpoint"],
			Self::Revocation => &["revocationEndpoint"],
		}
	}

	/// Returns a short description used in error messages.
	pub const fn describe(self) -> &'static str {
		match self {
			Self::AuthorizationAndToken => "service endpoints (authorizationEndpoint, tokenEndpoint)",
			Self::Registration => "a registration endpoint",
			Self::Revocation => "a revocation endpoint",
		}
	}
}

/// Passes when `issuer` is a string or `service_configuration` carries the required endpoints.
pub fn validate_identity_source(
	issuer: Option<&Value>,
	service_configuration: Option<&Value>,
	required: RequiredEndpoints,
) -> Result<(), ConfigError> {
	if matches!(issuer, Some(Value::String(_))) {
		return Ok(());
	}

	let endpoints_present = present(service_configuration)
		.and_then(Value::as_object)
		.is_some_and(|map| {
			required.fields().iter().all(|field| matches!(map.get(*field), Some(Value::String(_))))
		});

	if endpoints_present {
		Ok(())
	} else {
		Err(ConfigError::MissingIdentitySource { required })
	}
}

/// Passes when `clientId` is a string.
pub fn validate_client_id(value: Option<&Value>) -> Result<(), ConfigError> {
	require_string("clientId", value)
}

/// Passes when `redirectUrl` is a string.
pub fn validate_redirect_url(value: Option<&Value>) -> Result<(), ConfigError> {
	require_string("redirectUrl", value)
}

/// Passes when `redirectUrls` is a sequence whose every element is a string.
pub fn validate_redirect_urls(value: Option<&Value>) -> Result<(), ConfigError> {
	if present(value).is_some_and(is_string_array) {
		Ok(())
	} else {
		Err(ConfigError::InvalidField { field: "redirectUrls", expected: "an array of strings" })
	}
}

/// Passes when the optional array field is absent or an all-string sequence.
pub fn validate_string_array_if_present(
	name: &'static str,
	value: Option<&Value>,
) -> Result<(), ConfigError> {
	match present(value) {
		None => Ok(()),
		Some(value) if is_string_array(value) => Ok(()),
		Some(_) => Err(ConfigError::InvalidField {
			field: name,
			expected: "an array of strings when provided",
		}),
	}
}

/// Passes when the optional scalar field is absent or a string.
pub fn validate_string_if_present(
	name: &'static str,
	value: Option<&Value>,
) -> Result<(), ConfigError> {
	match present(value) {
		None | Some(Value::String(_)) => Ok(()),
		Some(_) =>
			Err(ConfigError::InvalidField { field: name, expected: "a string when provided" }),
	}
}

/// Checks the `customHeaders` map shape.
///
/// Absent headers pass. A present map must be non-empty, use only the keys in
/// [`CUSTOM_HEADER_FLOWS`], and hold flat string-to-string header maps.
pub fn validate_custom_headers(value: Option<&Value>) -> Result<(), ConfigError> {
	let Some(value) = present(value) else {
		return Ok(());
	};
	let map = value.as_object().ok_or(CustomHeadersError::NotAMap)?;

	if map.is_empty() {
		return Err(CustomHeadersError::Empty.into());
	}
	if let Some(key) = map.keys().find(|key| !CUSTOM_HEADER_FLOWS.contains(&key.as_str())) {
		return Err(CustomHeadersError::UnknownKey { key: key.clone() }.into());
	}

	for (flow, headers) in map {
		let headers = headers
			.as_object()
			.ok_or_else(|| CustomHeadersError::FlowNotAMap { flow: flow.clone() })?;

		if let Some((header, _)) = headers.iter().find(|(_, value)| !value.is_string()) {
			return Err(CustomHeadersError::NonStringValue {
				flow: flow.clone(),
				header: header.clone(),
			}
			.into());
		}
	}

	Ok(())
}

/// Passes when `additionalParameters` is absent or a flat string-to-string map.
pub fn validate_additional_parameters(value: Option<&Value>) -> Result<(), ConfigError> {
	let Some(value) = present(value) else {
		return Ok(());
	};
	let map = value.as_object().ok_or(ConfigError::InvalidField {
		field: "additionalParameters",
		expected: "an object of string values when provided",
	})?;

	match map.iter().find(|(_, value)| !value.is_string()) {
		Some((key, _)) => Err(ConfigError::InvalidAdditionalParameter { key: key.clone() }),
		None => Ok(()),
	}
}

/// Maps JSON `null` to an absent value.
pub(crate) fn present(value: Option<&Value>) -> Option<&Value> {
	value.filter(|value| !value.is_null())
}

fn require_string(field: &'static str, value: Option<&Value>) -> Result<(), ConfigError> {
	if matches!(value, Some(Value::String(_))) {
		Ok(())
	} else {
		Err(ConfigError::InvalidField { field, expected: "a string" })
	}
}

fn is_string_array(value: &Value) -> bool {
	value.as_array().is_some_and(|items| items.iter().all(Value::is_string))
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn identity_source_accepts_issuer_or_required_endpoints() {
		let issuer = json!("https://idp.example");
		let endpoints =
			json!({ "authorizationEndpoint": "https://a.example", "tokenEndpoint": "https://t.example" });

		assert!(
			validate_identity_source(Some(&issuer), None, RequiredEndpoints::AuthorizationAndToken)
				.is_ok()
		);
		assert!(
			validate_identity_source(None, Some(&endpoints), RequiredEndpoints::AuthorizationAndToken)
				.is_ok()
		);

		let partial = json!({ "authorizationEndpoint": "" });
		let err =
			validate_identity_source(None, Some(&partial), RequiredEndpoints::AuthorizationAndToken)
				.expect_err("A missing token endpoint should be rejected.");

		assert!(matches!(
			err,
			ConfigError::MissingIdentitySource { required: RequiredEndpoints::AuthorizationAndToken }
		));

		let not_a_string = json!(42);

		assert!(
			validate_identity_source(Some(&not_a_string), None, RequiredEndpoints::Revocation)
				.is_err()
		);
		assert!(
			validate_identity_source(None, Some(&endpoints), RequiredEndpoints::Registration)
				.is_err()
		);
	}

	#[test]
	fn custom_header_shapes_are_classified() {
		let cases = [
			(json!({}), Some(CustomHeadersError::Empty)),
			(
				json!({ "token": { "a": "b" }, "unknownKey": { "a": "b" } }),
				Some(CustomHeadersError::UnknownKey { key: "unknownKey".into() }),
			),
			(
				json!({ "token": "Bearer" }),
				Some(CustomHeadersError::FlowNotAMap { flow: "token".into() }),
			),
			(
				json!({ "authorize": { "X-Count": 1 } }),
				Some(CustomHeadersError::NonStringValue {
					flow: "authorize".into(),
					header: "X-Count".into(),
				}),
			),
			(json!(["token"]), Some(CustomHeadersError::NotAMap)),
			(
				json!({ "token": { "X-Tenant": "acme" }, "authorize": {}, "register": { "a": "b" } }),
				None,
			),
		];

		for (headers, expected) in cases {
			let result = validate_custom_headers(Some(&headers));

			match (result, expected) {
				(Ok(()), None) => {},
				(Err(ConfigError::InvalidCustomHeaders(actual)), Some(expected)) =>
					assert_eq!(actual, expected, "Unexpected violation for {headers}."),
				(other, expected) =>
					panic!("Unexpected outcome {other:?} for {headers}; wanted {expected:?}."),
			}
		}

		assert!(validate_custom_headers(None).is_ok());
		assert!(validate_custom_headers(Some(&Value::Null)).is_ok());
	}

	#[test]
	fn optional_fields_only_fail_when_present_and_malformed() {
		assert!(validate_string_array_if_present("grantTypes", None).is_ok());
		assert!(validate_string_array_if_present("grantTypes", Some(&json!(["code"]))).is_ok());
		assert!(validate_string_array_if_present("grantTypes", Some(&json!(["code", 1]))).is_err());
		assert!(validate_string_if_present("subjectType", Some(&Value::Null)).is_ok());
		assert!(validate_string_if_present("subjectType", Some(&json!(true))).is_err());
		assert!(validate_redirect_urls(Some(&json!(["app://cb", "app://alt"]))).is_ok());
		assert!(validate_redirect_urls(Some(&json!("app://cb"))).is_err());
		assert!(validate_redirect_urls(None).is_err());
	}

	#[test]
	fn additional_parameters_must_be_strings() {
		assert!(validate_additional_parameters(Some(&json!({ "prompt": "login" }))).is_ok());

		let err = validate_additional_parameters(Some(&json!({ "max_age": 300 })))
			.expect_err("Numeric parameters should be rejected.");

		assert!(matches!(err, ConfigError::InvalidAdditionalParameter { ref key } if key == "max_age"));
	}
}
