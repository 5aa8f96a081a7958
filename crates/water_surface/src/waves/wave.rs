//! Wave parameter types

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec2, Vec4};

/// Largest number of waves the shading stage accepts
pub const MAX_WAVES: usize = 10;

/// Number of `Vec4` slots in the packed wave array
pub const PACKED_SLOTS: usize = MAX_WAVES * 2;

/// A single sinusoidal wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    /// Crest height in world units
    pub amplitude: f32,

    /// Travel direction in degrees, measured from +Z
    pub direction_degrees: f32,

    /// Crest-to-crest distance in world units
    pub wavelength: f32,

    /// Point the wave radiates from when omnidirectional
    #[serde(default = "Vec2::zeros")]
    pub origin: Vec2,

    /// Radiates from `origin` instead of travelling along a heading
    #[serde(default)]
    pub omnidirectional: bool,
}

impl Wave {
    /// Create a wave from all of its parameters
    pub fn new(amplitude: f32, direction_degrees: f32, wavelength: f32, origin: Vec2, omnidirectional: bool) -> Self {
        Self {
            amplitude,
            direction_degrees,
            wavelength,
            origin,
            omnidirectional,
        }
    }

    /// Directional wave travelling along `direction_degrees`
    pub fn directional(amplitude: f32, direction_degrees: f32, wavelength: f32) -> Self {
        Self::new(amplitude, direction_degrees, wavelength, Vec2::zeros(), false)
    }

    /// Wave radiating outward from `origin`
    pub fn omnidirectional(amplitude: f32, wavelength: f32, origin: Vec2) -> Self {
        Self::new(amplitude, 0.0, wavelength, origin, true)
    }

    /// Unit heading on the XZ plane as `(x, z)`
    pub fn direction_vector(&self) -> Vec2 {
        let radians = utils::deg_to_rad(self.direction_degrees);
        Vec2::new(radians.sin(), radians.cos())
    }

    /// First packed slot: `(amplitude, direction, wavelength, omni flag)`
    pub fn packed_params(&self) -> Vec4 {
        Vec4::new(
            self.amplitude,
            self.direction_degrees,
            self.wavelength,
            if self.omnidirectional { 1.0 } else { 0.0 },
        )
    }

    /// Second packed slot: `(origin.x, origin.y, 0, 0)`
    pub fn packed_origin(&self) -> Vec4 {
        Vec4::new(self.origin.x, self.origin.y, 0.0, 0.0)
    }

    /// Amplitude is non-negative and wavelength positive, both finite
    pub fn is_well_formed(&self) -> bool {
        self.amplitude.is_finite()
            && self.amplitude >= 0.0
            && self.wavelength.is_finite()
            && self.wavelength > 0.0
            && self.direction_degrees.is_finite()
            && self.origin.iter().all(|c| c.is_finite())
    }
}

/// Base parameters for a procedurally generated wave field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProceduralWaves {
    /// Seed of the per-call random stream
    pub seed: i32,

    /// Mean wave amplitude
    pub amplitude: f32,

    /// Mean travel direction in degrees
    pub direction_degrees: f32,

    /// Mean wavelength
    pub wavelength: f32,

    /// Number of waves to generate
    pub count: usize,
}

impl ProceduralWaves {
    /// Create procedural settings
    pub fn new(seed: i32, amplitude: f32, direction_degrees: f32, wavelength: f32, count: usize) -> Self {
        Self {
            seed,
            amplitude,
            direction_degrees,
            wavelength,
            count,
        }
    }
}

/// Source of a wave field: explicit waves or procedural settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WaveFieldSpec {
    /// Use these waves verbatim
    Custom(Vec<Wave>),

    /// Generate waves from a seed and base parameters
    Procedural(ProceduralWaves),
}
