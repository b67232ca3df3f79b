//! Public flow entry points.
//!
//! [`AppAuth`] owns the platform runtime, the target-environment [`ArgumentShaper`], and the
//! HTTP transport. Every delegated flow validates its configuration, resolves defaults, shapes
//! a [`NativeCall`], and hands it to the runtime; revocation is self-contained and talks to the
//! authority directly.

pub mod refresh;
pub mod revoke;

mod authorize;
mod register;

pub use refresh::*;
pub use revoke::*;

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	http::HttpTransport,
	normalize::NativeCall,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	runtime::{AuthorizationRuntime, RuntimeResponse},
	shaper::ArgumentShaper,
};

/// Client specialized for the crate's default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestAppAuth<R> = AppAuth<R, ReqwestHttpClient>;

/// Routes client flows to the platform runtime or, for revocation, to the authority.
///
/// Collaborators are held behind `Arc`, so cloning is cheap and clones share the same runtime
/// and transport.
pub struct AppAuth<R, C>
where
	R: ?Sized + AuthorizationRuntime,
	C: ?Sized + HttpTransport,
{
	/// Platform runtime receiving every delegated call.
	pub runtime: Arc<R>,
	/// Target-environment argument shaper.
	pub shaper: Arc<dyn ArgumentShaper>,
	/// HTTP transport used for discovery and revocation.
	pub http_client: Arc<C>,
	/// Per-request budget for discovery and revocation; `None` defers to the transport.
	pub revocation_timeout: Option<Duration>,
}
impl<R, C> AppAuth<R, C>
where
	R: ?Sized + AuthorizationRuntime,
	C: ?Sized + HttpTransport,
{
	/// Default budget applied to each discovery or revocation request.
	pub const DEFAULT_REVOCATION_TIMEOUT: Duration = Duration::from_secs(30);

	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		runtime: impl Into<Arc<R>>,
		shaper: Arc<dyn ArgumentShaper>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			runtime: runtime.into(),
			shaper,
			http_client: http_client.into(),
			revocation_timeout: Some(Self::DEFAULT_REVOCATION_TIMEOUT),
		}
	}

	/// Overrides the discovery and revocation request budget.
	pub fn with_revocation_timeout(mut self, timeout: Duration) -> Self {
		self.revocation_timeout = Some(timeout);

		self
	}

	/// Removes the crate-level budget so only the transport's own timeouts apply.
	pub fn without_revocation_timeout(mut self) -> Self {
		self.revocation_timeout = None;

		self
	}

	/// Runs a delegated flow: shape the call, hand it to the runtime, record the outcome.
	async fn delegate<F>(
		&self,
		kind: FlowKind,
		stage: &'static str,
		shape: F,
	) -> Result<RuntimeResponse>
	where
		F: FnOnce() -> Result<NativeCall>,
	{
		let target = self.shaper.target();
		let span = FlowSpan::new(kind, stage, target);

		obs::record_flow_outcome(kind, target, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let call = shape()?;

				obs::trace_native_call(&call);

				self.runtime.invoke(call).await.map_err(Error::from)
			})
			.await;

		obs::record_flow_result(kind, target, &result);

		result
	}
}
#[cfg(feature = "reqwest")]
impl<R> AppAuth<R, ReqwestHttpClient>
where
	R: ?Sized + AuthorizationRuntime,
{
	/// Creates a client backed by a reqwest transport that never follows redirects.
	pub fn new(
		runtime: impl Into<Arc<R>>,
		shaper: Arc<dyn ArgumentShaper>,
	) -> Result<Self, ReqwestError> {
		Ok(Self::with_http_client(runtime, shaper, ReqwestHttpClient::new()?))
	}
}
impl<R, C> Clone for AppAuth<R, C>
where
	R: ?Sized + AuthorizationRuntime,
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			runtime: Arc::clone(&self.runtime),
			shaper: Arc::clone(&self.shaper),
			http_client: Arc::clone(&self.http_client),
			revocation_timeout: self.revocation_timeout,
		}
	}
}
impl<R, C> Debug for AppAuth<R, C>
where
	R: ?Sized + AuthorizationRuntime,
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppAuth")
			.field("target", &self.shaper.target())
			.field("revocation_timeout", &self.revocation_timeout)
			.finish()
	}
}
