//! Embedding protection middleware.
//!
//! Emits a Content-Security-Policy `frame-ancestors` directive restricting
//! which origins may embed a page in a frame, delegating header assembly to
//! a generic directive-setting helper.

mod csp;
mod headers;

pub use csp::{CspDirective, CspSources, set_csp_directive};
pub use headers::{FrameAncestorsLayer, FrameAncestorsService};
