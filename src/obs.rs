//! Optional observability helpers for client flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `appauth.flow` with the `flow`, `stage` (call
//!   site), and `target` (runtime environment) fields, plus a debug event per runtime call.
//! - Enable `metrics` to increment the `appauth_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow`, `target`, and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Client flows observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization request without the code exchange.
	AuthorizeOnly,
	/// Code exchange following an earlier authorization request.
	TokenExchangeOnly,
	/// Authorization request plus code exchange.
	Authorize,
	/// Refresh token grant.
	Refresh,
	/// Dynamic client registration.
	Register,
	/// Token revocation.
	Revoke,
	/// Browser warm-up and discovery prefetch.
	PrefetchConfiguration,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AuthorizeOnly => "authorize_only",
			FlowKind::TokenExchangeOnly => "token_exchange_only",
			FlowKind::Authorize => "authorize",
			FlowKind::Refresh => "refresh",
			FlowKind::Register => "register",
			FlowKind::Revoke => "revoke",
			FlowKind::PrefetchConfiguration => "prefetch_configuration",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
