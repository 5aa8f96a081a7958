//! Procedural multi-wave ocean surface parameters
//!
//! - [`wave`]: wave parameter types and the wave field source
//! - [`generator`]: deterministic generation and shader packing

pub mod generator;
pub mod wave;

pub use generator::{pack_waves, WaveFieldGenerator, WaveFieldResult};
pub use wave::{ProceduralWaves, Wave, WaveFieldSpec, MAX_WAVES, PACKED_SLOTS};
