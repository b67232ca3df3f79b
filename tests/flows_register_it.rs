mod common;

// crates.io
use appauth_bridge::{
	error::{ConfigError, Error},
	normalize::NativeMethod,
	response::RegistrationResponse,
	serde_json::{Value, json},
};
// self
use common::{RecordingRuntime, android, ios, offline_client, raw};

fn registration_fixture() -> Value {
	json!({
		"serviceConfiguration": { "registrationEndpoint": "https://idp.example/register" },
		"redirectUrls": ["app://cb"],
		"grantTypes": ["authorization_code", "refresh_token"],
		"additionalParameters": { "client_name": "Demo" },
	})
}

#[tokio::test]
async fn register_passes_metadata_through() {
	let (client, runtime, _) = offline_client(
		RecordingRuntime::answering(json!({
			"clientId": "issued-client",
			"clientSecret": "issued-secret",
			"registrationClientUri": "https://idp.example/register/issued-client",
		})),
		ios(),
	);
	let response = client
		.register(&raw(registration_fixture()))
		.await
		.expect("Registration with an explicit endpoint should succeed.");
	let calls = runtime.calls();

	assert_eq!(calls[0].method, NativeMethod::Register);
	assert_eq!(calls[0].arguments.clone().into_values(), vec![
		Value::Null,
		json!(["app://cb"]),
		Value::Null,
		json!(["authorization_code", "refresh_token"]),
		Value::Null,
		Value::Null,
		json!({ "client_name": "Demo" }),
		json!({ "registrationEndpoint": "https://idp.example/register" }),
	]);

	let registration =
		response.deserialize::<RegistrationResponse>().expect("Registration result should be typed.");

	assert_eq!(registration.client_id, "issued-client");
	assert!(!format!("{registration:?}").contains("issued-secret"));
}

#[tokio::test]
async fn register_validates_optional_sequences() {
	let (client, runtime, _) = offline_client(RecordingRuntime::default(), android());
	let cases = [
		("redirectUrls", json!("app://cb"), "redirectUrls"),
		("responseTypes", json!(["code", 1]), "responseTypes"),
		("subjectType", json!(["public"]), "subjectType"),
		("tokenEndpointAuthMethod", json!(false), "tokenEndpointAuthMethod"),
	];

	for (key, value, field) in cases {
		let err = client
			.register(&raw(registration_fixture()).with(key, value))
			.await
			.expect_err("Malformed registration metadata should be rejected.");

		match err {
			Error::Config(err) => assert_eq!(err.field(), Some(field)),
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	let err = client
		.register(&raw(registration_fixture()).with("additionalParameters", json!({ "max": 1 })))
		.await
		.expect_err("Non-string parameters should be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidAdditionalParameter { .. })));
	assert!(runtime.calls().is_empty());
}
