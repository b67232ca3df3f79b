//! Refresh token grant delegated to the platform runtime.

// self
use crate::{
	_prelude::*,
	config::{AuthConfig, RawConfig},
	error::MissingParameterError,
	flows::AppAuth,
	http::HttpTransport,
	normalize,
	obs::FlowKind,
	runtime::{AuthorizationRuntime, RuntimeResponse},
	secret::TokenSecret,
};

/// Per-call input for [`AppAuth::refresh`].
#[derive(Clone, Debug, Default)]
pub struct RefreshRequest {
	/// Refresh token to redeem; an empty value is rejected.
	pub refresh_token: TokenSecret,
}
impl RefreshRequest {
	/// Creates a request for `refresh_token`.
	pub fn new(refresh_token: impl Into<TokenSecret>) -> Self {
		Self { refresh_token: refresh_token.into() }
	}
}

impl<R, C> AppAuth<R, C>
where
	R: ?Sized + AuthorizationRuntime,
	C: ?Sized + HttpTransport,
{
	/// Redeems a refresh token through the runtime.
	///
	/// Configuration problems are reported before a missing refresh token.
	pub async fn refresh(
		&self,
		config: &RawConfig,
		request: RefreshRequest,
	) -> Result<RuntimeResponse> {
		self.delegate(FlowKind::Refresh, "refresh", || {
			let config = AuthConfig::resolve(config)?;

			if request.refresh_token.is_empty() {
				return Err(MissingParameterError::RefreshToken.into());
			}

			Ok(normalize::refresh(&config, &request.refresh_token, self.shaper.as_ref()))
		})
		.await
	}
}
