//! Shared fixtures for the integration suites.

#![allow(dead_code)]

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};
// crates.io
use appauth_bridge::{
	config::RawConfig,
	error::RuntimeDelegationError,
	flows::AppAuth,
	http::HttpTransport,
	normalize::NativeCall,
	oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	runtime::{AuthorizationRuntime, RuntimeFuture, RuntimeResponse},
	serde_json::{Value, json},
	shaper::{AndroidArgumentShaper, ArgumentShaper, IosArgumentShaper},
};

/// Runtime double that records every call and answers with a canned result.
#[derive(Default)]
pub struct RecordingRuntime {
	calls: Mutex<Vec<NativeCall>>,
	response: Value,
	rejection: Option<(String, String)>,
}
impl RecordingRuntime {
	pub fn answering(response: Value) -> Self {
		Self { response, ..Default::default() }
	}

	pub fn rejecting(code: &str, message: &str) -> Self {
		Self { rejection: Some((code.into(), message.into())), ..Default::default() }
	}

	pub fn calls(&self) -> Vec<NativeCall> {
		self.calls.lock().expect("Runtime call log should not be poisoned.").clone()
	}
}
impl AuthorizationRuntime for RecordingRuntime {
	fn invoke(&self, call: NativeCall) -> RuntimeFuture<'_> {
		self.calls.lock().expect("Runtime call log should not be poisoned.").push(call);

		let outcome = match &self.rejection {
			Some((code, message)) =>
				Err(RuntimeDelegationError::new(message.clone()).with_code(code.clone())),
			None => Ok(RuntimeResponse::new(self.response.clone())),
		};

		Box::pin(async move { outcome })
	}
}

#[derive(Debug)]
pub struct OfflineError;
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Network is unreachable.")
	}
}
impl StdError for OfflineError {}

/// Transport double that counts requests and fails every one of them.
#[derive(Clone, Default)]
pub struct OfflineTransport {
	calls: Arc<AtomicUsize>,
	timeouts: Arc<Mutex<Vec<Option<Duration>>>>,
}
impl OfflineTransport {
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	pub fn timeouts(&self) -> Vec<Option<Duration>> {
		self.timeouts.lock().expect("Timeout log should not be poisoned.").clone()
	}
}
impl HttpTransport for OfflineTransport {
	type Handle = OfflineHandle;
	type TransportError = OfflineError;

	fn with_timeout(&self, timeout: Option<Duration>) -> Self::Handle {
		self.timeouts.lock().expect("Timeout log should not be poisoned.").push(timeout);

		OfflineHandle { calls: Arc::clone(&self.calls) }
	}
}

pub struct OfflineHandle {
	calls: Arc<AtomicUsize>,
}
impl<'c> AsyncHttpClient<'c> for OfflineHandle {
	type Error = HttpClientError<OfflineError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, _request: HttpRequest) -> Self::Future {
		self.calls.fetch_add(1, Ordering::SeqCst);

		Box::pin(async { Err(HttpClientError::Reqwest(Box::new(OfflineError))) })
	}
}

pub fn raw(value: Value) -> RawConfig {
	RawConfig::from_value(value).expect("Fixture should be a JSON object.")
}

pub fn auth_fixture() -> Value {
	json!({
		"issuer": "https://idp.example",
		"clientId": "c1",
		"redirectUrl": "app://cb",
		"scopes": ["openid"],
	})
}

pub fn ios() -> Arc<dyn ArgumentShaper> {
	Arc::new(IosArgumentShaper)
}

pub fn android() -> Arc<dyn ArgumentShaper> {
	Arc::new(AndroidArgumentShaper)
}

/// Client wired to a recording runtime and an offline transport.
pub fn offline_client(
	runtime: RecordingRuntime,
	shaper: Arc<dyn ArgumentShaper>,
) -> (AppAuth<RecordingRuntime, OfflineTransport>, Arc<RecordingRuntime>, OfflineTransport) {
	let runtime = Arc::new(runtime);
	let transport = OfflineTransport::default();
	let client = AppAuth::with_http_client(Arc::clone(&runtime), shaper, transport.clone());

	(client, runtime, transport)
}
