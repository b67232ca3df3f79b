//! Validate OAuth 2.0/OIDC client configuration, marshal it into platform authorization-runtime
//! calls, and revoke tokens with just-in-time discovery.
//!
//! Configuration arrives loosely typed ([`config::RawConfig`]), is checked by the pure predicates
//! in [`validate`], resolved into immutable per-flow values with every default applied, and then
//! shaped by [`normalize`] into a [`normalize::NativeCall`] for the platform runtime. The
//! [`shaper::ArgumentShaper`] seam decides which target-environment-specific arguments travel with
//! each call. Revocation is the only flow performing its own I/O; see [`flows::AppAuth::revoke`].

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod flows;
pub mod http;
pub mod normalize;
pub mod obs;
pub mod response;
pub mod runtime;
pub mod secret;
pub mod shaper;
pub mod validate;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
