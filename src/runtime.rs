//! Seam to the platform authorization runtime that performs the browser, PKCE, and token legs.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::RuntimeDelegationError, normalize::NativeCall};

/// Boxed future returned by [`AuthorizationRuntime::invoke`].
pub type RuntimeFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RuntimeResponse, RuntimeDelegationError>> + 'a + Send>>;

/// Platform runtime that executes shaped calls.
///
/// Implementations receive a fully validated [`NativeCall`] and report either the runtime's
/// JSON result or a [`RuntimeDelegationError`], which flows surface unmodified. The crate never
/// inspects the arguments after handing them over.
pub trait AuthorizationRuntime
where
	Self: 'static + Send + Sync,
{
	/// Executes `call` and resolves with the runtime's result.
	fn invoke(&self, call: NativeCall) -> RuntimeFuture<'_>;
}

/// Opaque JSON result produced by the runtime.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeResponse(Value);
impl RuntimeResponse {
	/// Wraps a runtime result.
	pub fn new(value: Value) -> Self {
		Self(value)
	}

	/// Borrows the raw result.
	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// Returns the raw result.
	pub fn into_value(self) -> Value {
		self.0
	}

	/// Reads the result as a typed view such as [`TokenResult`](crate::response::TokenResult).
	///
	/// Mismatches report the JSON path of the offending field.
	pub fn deserialize<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		serde_path_to_error::deserialize(&self.0).map_err(|source| Error::MalformedResponse { source })
	}
}
impl From<Value> for RuntimeResponse {
	fn from(value: Value) -> Self {
		Self(value)
	}
}
