//! JSON configs for the demo tools in `src/bin`.
//!
//! Each tool reads one file naming its input image, how the edge mask is
//! built, the detector parameters and where to write results.

pub mod circle;
pub mod cross;
pub mod edge;
pub mod lines;
