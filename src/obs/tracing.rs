// self
use crate::{_prelude::*, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span wrapper used by every client flow.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the flow kind, call site, and target environment.
	pub fn new(kind: FlowKind, stage: &'static str, target: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("appauth.flow", flow = kind.as_str(), stage, target);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage, target);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event describing a runtime call about to be dispatched.
///
/// Only the method and argument names are logged; values may carry secrets.
pub fn trace_native_call(call: &crate::normalize::NativeCall) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			method = call.method.as_str(),
			arguments = ?call.arguments.names(),
			"Dispatching runtime call."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = call;
	}
}
