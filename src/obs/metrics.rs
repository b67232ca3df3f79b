// self
use crate::obs::{FlowKind, FlowOutcome};

/// Records a flow outcome for one target environment via the global metrics recorder (when
/// enabled).
pub fn record_flow_outcome(kind: FlowKind, target: &'static str, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"appauth_flow_total",
			"flow" => kind.as_str(),
			"target" => target,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, target, outcome);
	}
}

/// Records the terminal outcome of a finished flow.
pub fn record_flow_result<T, E>(kind: FlowKind, target: &'static str, result: &Result<T, E>) {
	let outcome = if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure };

	record_flow_outcome(kind, target, outcome);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_flow_outcome_noop_without_metrics() {
		record_flow_outcome(FlowKind::Revoke, "ios", FlowOutcome::Attempt);
		record_flow_result::<(), ()>(FlowKind::Revoke, "ios", &Err(()));
	}
}
