//! Code generation engine: sanitize -> synthesize -> materialize.

pub mod materialize;
pub mod sanitize;
pub mod synth;

pub use materialize::{MaterializeSummary, locate_package, materialize};
pub use synth::{SynthesizedOutput, synthesize};
