//! Seams between the `asset_path` tag and the host template engine.
//!
//! The host supplies markup sub-evaluation through [`MarkupEvaluator`] and dispatches tags by
//! name through a [`TagRegistry`] it builds during setup.

mod evaluator;
mod registry;

pub use evaluator::{MarkupEvaluator, VariableInterpolator, Verbatim};
pub use registry::{Tag, TagConstructor, TagRegistry};
