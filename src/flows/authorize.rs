//! Authorization, code exchange, and prefetch flows delegated to the platform runtime.

// self
use crate::{
	_prelude::*,
	config::{AuthConfig, PrefetchConfig, RawConfig, TokenExchangeConfig},
	flows::AppAuth,
	http::HttpTransport,
	normalize,
	obs::FlowKind,
	runtime::{AuthorizationRuntime, RuntimeResponse},
};

impl<R, C> AppAuth<R, C>
where
	R: ?Sized + AuthorizationRuntime,
	C: ?Sized + HttpTransport,
{
	/// Starts an authorization request without exchanging the returned code.
	///
	/// The result is usually read as [`AuthorizeResult`](crate::response::AuthorizeResult).
	pub async fn authorize_only(&self, config: &RawConfig) -> Result<RuntimeResponse> {
		self.delegate(FlowKind::AuthorizeOnly, "authorize_only", || {
			let config = AuthConfig::resolve(config)?;

			Ok(normalize::authorize_only(&config, self.shaper.as_ref()))
		})
		.await
	}

	/// Exchanges the code from a previous [`authorize_only`](Self::authorize_only) call.
	///
	/// No client identity is required; the runtime kept it from the authorization leg.
	pub async fn token_exchange_only(&self, config: &RawConfig) -> Result<RuntimeResponse> {
		self.delegate(FlowKind::TokenExchangeOnly, "token_exchange_only", || {
			let config = TokenExchangeConfig::resolve(config)?;

			Ok(normalize::token_exchange_only(&config, self.shaper.as_ref()))
		})
		.await
	}

	/// Runs the authorization request and the code exchange in one runtime call.
	///
	/// The result is usually read as
	/// [`AuthorizeAndTokenResult`](crate::response::AuthorizeAndTokenResult).
	pub async fn authorize(&self, config: &RawConfig) -> Result<RuntimeResponse> {
		self.delegate(FlowKind::Authorize, "authorize", || {
			let config = AuthConfig::resolve(config)?;

			Ok(normalize::authorize(&config, self.shaper.as_ref()))
		})
		.await
	}

	/// Warms the runtime's browser and prefetches discovery.
	///
	/// Targets without prefetch support return immediately without validating anything.
	pub async fn prefetch_configuration(&self, config: &RawConfig) -> Result<()> {
		if !self.shaper.supports_prefetch() {
			return Ok(());
		}

		self.delegate(FlowKind::PrefetchConfiguration, "prefetch_configuration", || {
			let config = PrefetchConfig::resolve(config)?;

			Ok(normalize::prefetch_configuration(&config))
		})
		.await
		.map(drop)
	}
}
