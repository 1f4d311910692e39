//! Build-time asset pipeline for the hangar ship viewer.
//!
//! Two jobs run before deployment:
//!
//! - [`compress`]: shrink every catalog model with Draco compression and
//!   report the savings together with deployment advice
//! - [`headers`]: emit the response headers that allow the viewer to be
//!   embedded by the listed origins

pub mod compress;
mod error;
pub mod headers;
pub mod report;

pub use compress::{CompressConfig, compress_all};
pub use error::{Error, Result};
pub use report::{DeploymentAdvice, Report};
