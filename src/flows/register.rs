//! Dynamic client registration delegated to the platform runtime.

// self
use crate::{
	_prelude::*,
	config::{RawConfig, RegistrationConfig},
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
	/// Registers a new client with the authority.
	///
	/// The result is usually read as
	/// [`RegistrationResponse`](crate::response::RegistrationResponse).
	pub async fn register(&self, config: &RawConfig) -> Result<RuntimeResponse> {
		self.delegate(FlowKind::Register, "register", || {
			let config = RegistrationConfig::resolve(config)?;

			Ok(normalize::register(&config, self.shaper.as_ref()))
		})
		.await
	}
}
