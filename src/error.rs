//! Crate-level error taxonomy shared by the validator, normalizer, and flows.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Canonical error exposed by every public flow.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Static configuration violates an invariant; raised before any I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A required per-call argument is missing.
	#[error(transparent)]
	MissingParameter(#[from] MissingParameterError),
	/// The discovery document could not be fetched or lacks a required field.
	#[error(transparent)]
	Discovery(#[from] DiscoveryError),
	/// The revocation request failed at the transport or HTTP-status level.
	#[error(transparent)]
	Protocol(#[from] ProtocolError),
	/// The platform authorization runtime rejected the call.
	#[error(transparent)]
	Runtime(#[from] RuntimeDelegationError),

	/// A runtime result did not match the requested typed view.
	#[error("Runtime response does not match the expected shape.")]
	MalformedResponse {
		/// Path-aware deserialization failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Configuration failures raised synchronously before any network or runtime call.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration root is not a JSON object.
	#[error("Config error: configuration must be an object.")]
	NotAnObject,
	/// Configuration text is not valid JSON.
	#[error("Config error: configuration is not valid JSON.")]
	InvalidJson {
		/// Underlying parser failure.
		#[source]
		source: serde_json::Error,
	},
	/// Neither an issuer nor the flow's required service endpoints were supplied.
	#[error("Config error: you must provide either an issuer or {}.", .required.describe())]
	MissingIdentitySource {
		/// Endpoint set the flow needed in `serviceConfiguration`.
		required: crate::validate::RequiredEndpoints,
	},
	/// A field is present (or required) but has the wrong shape.
	#[error("Config error: {field} must be {expected}.")]
	InvalidField {
		/// Offending configuration key.
		field: &'static str,
		/// Human-readable description of the accepted shape.
		expected: &'static str,
	},
	/// `customHeaders` has an invalid shape.
	#[error(
		"Config error: customHeaders type must be {{ token?: {{ [key: string]: string }}, authorize?: {{ [key: string]: string }}, register?: {{ [key: string]: string }} }}: {0}"
	)]
	InvalidCustomHeaders(#[from] CustomHeadersError),
	/// An `additionalParameters` entry is not a string.
	#[error("Config error: additionalParameters.{key} must be a string.")]
	InvalidAdditionalParameter {
		/// Parameter name whose value was rejected.
		key: String,
	},
	/// An endpoint URL cannot be parsed.
	#[error("Config error: {field} is not a valid URL.")]
	InvalidUrl {
		/// Configuration key (or discovery field) holding the URL.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An endpoint uses plain HTTP while insecure requests are disallowed.
	#[error(
		"Config error: the {endpoint} endpoint must use HTTPS unless dangerouslyAllowInsecureHttpRequests is set: {url}."
	)]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Returns the configuration key the error refers to, when it names one.
	pub fn field(&self) -> Option<&str> {
		match self {
			Self::MissingIdentitySource { .. } => Some("issuer"),
			Self::InvalidField { field, .. }
			| Self::InvalidUrl { field, .. }
			| Self::InsecureEndpoint { endpoint: field, .. } => Some(*field),
			Self::InvalidCustomHeaders(_) => Some("customHeaders"),
			Self::InvalidAdditionalParameter { .. } => Some("additionalParameters"),
			Self::NotAnObject | Self::InvalidJson { .. } => None,
			Self::HttpRequest(_) => None,
		}
	}
}

/// Shape violations for the `customHeaders` map.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CustomHeadersError {
	/// The map is present but is not an object.
	#[error("customHeaders must be an object.")]
	NotAMap,
	/// The map is present but has no entries.
	#[error("customHeaders cannot be empty.")]
	Empty,
	/// A key outside `token`, `authorize`, and `register` was supplied.
	#[error("unknown customHeaders key `{key}`.")]
	UnknownKey {
		/// Rejected key.
		key: String,
	},
	/// A flow entry is not a header map.
	#[error("customHeaders.{flow} must be an object.")]
	FlowNotAMap {
		/// Flow key whose value was rejected.
		flow: String,
	},
	/// A header value is not a string.
	#[error("customHeaders.{flow}.{header} must be a string.")]
	NonStringValue {
		/// Flow key holding the header.
		flow: String,
		/// Header name whose value was rejected.
		header: String,
	},
}

/// Per-call arguments that must accompany a flow invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum MissingParameterError {
	/// `refresh` was called without a refresh token.
	#[error("Please pass in a refresh token.")]
	RefreshToken,
	/// `revoke` was called without a token to revoke.
	#[error("Please include the token to revoke.")]
	TokenToRevoke,
}

/// OIDC discovery failures; never retried.
#[derive(Debug, ThisError)]
pub enum DiscoveryError {
	/// The discovery document could not be fetched.
	#[error("Failed to fetch the discovery document from {url}.")]
	Fetch {
		/// Discovery document URL.
		url: String,
		/// Underlying transport failure.
		#[source]
		source: BoxError,
	},
	/// The discovery endpoint answered with a non-success status.
	#[error("Discovery document request to {url} returned HTTP {status}.")]
	Status {
		/// Discovery document URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},
	/// The discovery document is not valid JSON of the expected shape.
	#[error("Discovery document from {url} is malformed.")]
	Parse {
		/// Discovery document URL.
		url: String,
		/// Path-aware parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The document does not advertise a revocation endpoint.
	#[error("The openid config at {url} does not specify a revocation endpoint.")]
	MissingRevocationEndpoint {
		/// Discovery document URL.
		url: String,
	},
}

/// Revocation request failures; never retried.
#[derive(Debug, ThisError)]
pub enum ProtocolError {
	/// The transport failed before a response arrived.
	#[error("Failed to revoke token: request to {endpoint} failed.")]
	Transport {
		/// Revocation endpoint.
		endpoint: String,
		/// Underlying transport failure with its full cause chain.
		#[source]
		source: BoxError,
	},
	/// The revocation endpoint answered with a non-success status.
	#[error("Failed to revoke token: {endpoint} returned HTTP {status}.")]
	Status {
		/// Revocation endpoint.
		endpoint: String,
		/// HTTP status code.
		status: u16,
		/// Truncated response body, when one was returned.
		body_preview: Option<String>,
	},
}
impl ProtocolError {
	/// Wraps a transport-specific failure for the given endpoint.
	pub fn transport(endpoint: impl Into<String>, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Transport { endpoint: endpoint.into(), source: Box::new(src) }
	}
}

/// Rejection reported by the platform authorization runtime, passed through unmodified.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct RuntimeDelegationError {
	/// Runtime-specific error code (for example a cancellation code), when provided.
	pub code: Option<String>,
	/// Runtime-supplied message.
	pub message: String,
	/// Underlying runtime failure, when one exists.
	#[source]
	pub source: Option<BoxError>,
}
impl RuntimeDelegationError {
	/// Creates a rejection carrying only a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { code: None, message: message.into(), source: None }
	}

	/// Attaches a runtime error code.
	pub fn with_code(mut self, code: impl Into<String>) -> Self {
		self.code = Some(code.into());

		self
	}

	/// Attaches the underlying runtime failure.
	pub fn with_source(mut self, src: impl 'static + Send + Sync + StdError) -> Self {
		self.source = Some(Box::new(src));

		self
	}
}
