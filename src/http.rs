//! HTTP capability used by discovery and revocation.
//!
//! The module exposes [`HttpTransport`] so downstream crates can plug in custom HTTP clients,
//! and ships [`ReqwestHttpClient`] as the default implementation behind the `reqwest` feature.
//! Handles speak the `oauth2` crate's [`AsyncHttpClient`] contract, so any transport that
//! already serves an `oauth2` client works here unchanged.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")] use reqwest::redirect::Policy;
// self
use crate::{_prelude::*, error::ConfigError};

/// Abstraction over HTTP transports capable of executing discovery and revocation requests.
///
/// The trait is the crate's only dependency on an HTTP stack. Callers provide an
/// implementation (typically behind `Arc<T>`) and each flow requests a short-lived
/// [`AsyncHttpClient`] handle carrying the per-request timeout. Implementations must be
/// `Send + Sync + 'static` so they can be shared across clients without additional wrappers,
/// and the handles they return must own whatever state their request futures need.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle bound to one timeout budget.
	///
	/// The request future returned by [`AsyncHttpClient::call`] must be `Send` so flow futures
	/// can hop executors.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle whose requests give up after `timeout`; `None` leaves the transport's
	/// own default in place.
	fn with_timeout(&self, timeout: Option<Duration>) -> Self::Handle;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Discovery and revocation must not follow redirects: the endpoint that passed the TLS check
/// is the only one allowed to see the token. [`ReqwestHttpClient::new`] disables redirect
/// following; any client handed to [`ReqwestHttpClient::with_client`] should be configured with
/// [`Policy::none`] as well. A redirect that reaches a flow is reported as a non-success status.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a reqwest client that never follows redirects.
	pub fn new() -> Result<Self, ReqwestError> {
		let client = ReqwestClient::builder().redirect(Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn with_timeout(&self, timeout: Option<Duration>) -> Self::Handle {
		ReqwestHandle { client: self.0.clone(), timeout }
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`HttpTransport`].
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHandle {
	client: ReqwestClient,
	timeout: Option<Duration>,
}
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future = Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.client.clone();
		let timeout = self.timeout;

		Box::pin(async move {
			let mut request: reqwest::Request = request.try_into().map_err(Box::new)?;

			if timeout.is_some() {
				*request.timeout_mut() = timeout;
			}

			let response = client.execute(request).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Sends one request through a fresh handle.
pub(crate) async fn execute<C>(
	http_client: &C,
	timeout: Option<Duration>,
	request: HttpRequest,
) -> Result<HttpResponse, HttpClientError<C::TransportError>>
where
	C: ?Sized + HttpTransport,
{
	let handle = http_client.with_timeout(timeout);

	handle.call(request).await
}

/// Parses an endpoint URL and enforces TLS unless insecure requests were explicitly allowed.
pub(crate) fn parse_endpoint(
	field: &'static str,
	raw: &str,
	allow_insecure: bool,
) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { field, source })?;

	if url.scheme() != "https" && !allow_insecure {
		return Err(ConfigError::InsecureEndpoint { endpoint: field, url: raw.to_owned() });
	}

	Ok(url)
}
