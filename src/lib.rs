//! Synchronize a WAFv2 IP set with the CloudFront edge prefixes published in the
//! AWS IP Ranges JSON document.
//!
//! The crate is the shared core of two Lambda binaries: `wafipsync-fixed`, which
//! always fetches the canonical IP Ranges URL, and `wafipsync-sns`, which reads
//! the document URL from an SNS notification payload. Each invocation runs a
//! single fetch → filter → read-modify-write pass and reports a terminal
//! `{statusCode, body}` outcome.

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

pub mod core;
pub mod handler;

/*-------------------------------------------------------------------------------------------------
  Public Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::config::Config;
pub use crate::core::errors::{Error, Result};
pub use crate::core::fetch::{AWS_IP_RANGES_URL, CLOUDFRONT_SERVICE};
pub use crate::core::ipset::{IpSetState, IpSetStore, WafIpSetStore};
pub use crate::handler::Response;
