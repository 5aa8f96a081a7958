//! # Wave Field Generator
//!
//! Turns a [`WaveFieldSpec`] into the wave list and packed shader parameters
//! for the water surface.
//!
//! ## Procedural generation
//! Wave `i` of `n` scales the base amplitude and wavelength by
//! `p = lerp(0.5, 1.5, i / n)` and jitters each value:
//!
//! - amplitude `* p * U[0.8, 1.2]`
//! - direction `+ U[-90, 90]` degrees
//! - wavelength `* p * U[0.6, 1.4]`
//!
//! The random stream is ChaCha8 seeded with `seed` and reseeded with
//! `seed + i + 1` after wave `i`. That reseed schedule is part of the output
//! contract: changing it changes every authored wave field.
//!
//! Each call owns its stream, so generation has no side effects on other
//! random consumers and identical inputs give bit-identical output.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{WaterError, WaterResult};
use crate::foundation::math::{utils, Vec2, Vec4};
use super::wave::{ProceduralWaves, Wave, WaveFieldSpec, MAX_WAVES, PACKED_SLOTS};

/// Generated waves plus the values the shading stage consumes
#[derive(Debug, Clone, PartialEq)]
pub struct WaveFieldResult {
    /// Waves in generation order
    pub waves: Vec<Wave>,

    /// Arithmetic mean of the wave amplitudes
    pub mean_amplitude: f32,

    /// Slot `i` holds wave `i`'s parameters, slot `i + 10` its origin
    pub packed_params: [Vec4; PACKED_SLOTS],
}

impl WaveFieldResult {
    /// Number of waves in the field
    pub fn count(&self) -> usize {
        self.waves.len()
    }

    /// Packed parameters as plain arrays for buffer uploads
    pub fn packed_arrays(&self) -> [[f32; 4]; PACKED_SLOTS] {
        let mut arrays = [[0.0; 4]; PACKED_SLOTS];
        for (slot, packed) in arrays.iter_mut().zip(self.packed_params.iter()) {
            *slot = [packed.x, packed.y, packed.z, packed.w];
        }
        arrays
    }

    /// Packed parameters as raw bytes in native endianness
    pub fn packed_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.packed_arrays()).to_vec()
    }
}

/// Stateless generator for wave fields
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveFieldGenerator;

impl WaveFieldGenerator {
    /// Create a generator
    pub fn new() -> Self {
        Self
    }

    /// Build the wave field described by `spec`
    ///
    /// # Errors
    /// - `InvalidCount` when the field would hold zero or more than
    ///   [`MAX_WAVES`] waves
    /// - `InvalidSpec` when a custom wave or the procedural base parameters
    ///   have a negative amplitude, a non-positive wavelength, or non-finite
    ///   values
    pub fn generate(&self, spec: &WaveFieldSpec) -> WaterResult<WaveFieldResult> {
        let waves = match spec {
            WaveFieldSpec::Custom(waves) => {
                validate_count(waves.len())?;
                if let Some((index, _)) = waves.iter().enumerate().find(|(_, w)| !w.is_well_formed()) {
                    log::warn!("Rejecting custom wave {}: {:?}", index, waves[index]);
                    return Err(WaterError::InvalidSpec(format!(
                        "custom wave {index} needs a finite amplitude >= 0 and wavelength > 0"
                    )));
                }
                waves.clone()
            }
            WaveFieldSpec::Procedural(settings) => procedural_waves(settings)?,
        };

        let mean_amplitude = waves.iter().map(|w| w.amplitude).sum::<f32>() / waves.len() as f32;
        let packed_params = pack_waves(&waves)?;

        log::debug!("Generated {} waves, mean amplitude {:.4}", waves.len(), mean_amplitude);
        Ok(WaveFieldResult {
            waves,
            mean_amplitude,
            packed_params,
        })
    }
}

/// Pack waves into the fixed shader layout; slots past the last wave stay zero
///
/// # Errors
/// `InvalidCount` when there are more than [`MAX_WAVES`] waves.
pub fn pack_waves(waves: &[Wave]) -> WaterResult<[Vec4; PACKED_SLOTS]> {
    if waves.len() > MAX_WAVES {
        return Err(WaterError::InvalidCount { count: waves.len(), max: MAX_WAVES });
    }

    let mut packed = [Vec4::zeros(); PACKED_SLOTS];
    for (i, wave) in waves.iter().enumerate() {
        packed[i] = wave.packed_params();
        packed[i + MAX_WAVES] = wave.packed_origin();
    }
    Ok(packed)
}

fn validate_count(count: usize) -> WaterResult<()> {
    if count == 0 || count > MAX_WAVES {
        log::warn!("Rejecting wave count {} (max {})", count, MAX_WAVES);
        return Err(WaterError::InvalidCount { count, max: MAX_WAVES });
    }
    Ok(())
}

#[allow(clippy::cast_sign_loss)]
fn seeded_stream(seed: i32) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(u64::from(seed as u32))
}

fn procedural_waves(settings: &ProceduralWaves) -> WaterResult<Vec<Wave>> {
    validate_count(settings.count)?;
    let base = Wave::directional(settings.amplitude, settings.direction_degrees, settings.wavelength);
    if !base.is_well_formed() {
        return Err(WaterError::InvalidSpec(format!(
            "procedural base parameters {settings:?} need a finite amplitude >= 0 and wavelength > 0"
        )));
    }

    let mut rng = seeded_stream(settings.seed);
    let step = 1.0 / settings.count as f32;
    let mut waves = Vec::with_capacity(settings.count);

    for i in 0..settings.count {
        let p = utils::lerp(0.5, 1.5, i as f32 * step);
        let amplitude = settings.amplitude * p * rng.gen_range(0.8..=1.2);
        let direction = settings.direction_degrees + rng.gen_range(-90.0..=90.0);
        let wavelength = settings.wavelength * p * rng.gen_range(0.6..=1.4);
        waves.push(Wave::new(amplitude, direction, wavelength, Vec2::zeros(), false));

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let next_seed = settings.seed.wrapping_add(i as i32).wrapping_add(1);
        rng = seeded_stream(next_seed);
    }

    Ok(waves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_settings() -> ProceduralWaves {
        ProceduralWaves::new(3234, 1.5, 45.0, 5.0, 6)
    }

    #[test]
    fn test_empty_custom_list_is_invalid_count() {
        let result = WaveFieldGenerator::new().generate(&WaveFieldSpec::Custom(Vec::new()));
        assert_eq!(result, Err(WaterError::InvalidCount { count: 0, max: MAX_WAVES }));
    }

    #[test]
    fn test_oversized_custom_list_is_invalid_count() {
        let waves = vec![Wave::directional(1.0, 0.0, 1.0); MAX_WAVES + 1];
        let result = WaveFieldGenerator::new().generate(&WaveFieldSpec::Custom(waves));
        assert_eq!(result, Err(WaterError::InvalidCount { count: 11, max: MAX_WAVES }));
    }

    #[test]
    fn test_procedural_count_bounds() {
        let generator = WaveFieldGenerator::new();
        for count in [0, MAX_WAVES + 1, 64] {
            let mut settings = reference_settings();
            settings.count = count;
            assert!(matches!(
                generator.generate(&WaveFieldSpec::Procedural(settings)),
                Err(WaterError::InvalidCount { .. })
            ));
        }
        let mut full = reference_settings();
        full.count = MAX_WAVES;
        assert_eq!(generator.generate(&WaveFieldSpec::Procedural(full)).unwrap().count(), MAX_WAVES);
    }

    #[test]
    fn test_malformed_waves_are_invalid_spec() {
        let generator = WaveFieldGenerator::new();
        let waves = vec![Wave::directional(1.0, 0.0, 1.0), Wave::directional(1.0, 0.0, -2.0)];
        assert!(matches!(
            generator.generate(&WaveFieldSpec::Custom(waves)),
            Err(WaterError::InvalidSpec(_))
        ));

        let mut settings = reference_settings();
        settings.amplitude = -1.0;
        assert!(matches!(
            generator.generate(&WaveFieldSpec::Procedural(settings)),
            Err(WaterError::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_procedural_generation_is_bit_reproducible() {
        let generator = WaveFieldGenerator::new();
        let spec = WaveFieldSpec::Procedural(reference_settings());
        let first = generator.generate(&spec).unwrap();
        let second = generator.generate(&spec).unwrap();

        assert_eq!(first, second);
        for (a, b) in first.waves.iter().zip(second.waves.iter()) {
            assert_eq!(a.amplitude.to_bits(), b.amplitude.to_bits());
            assert_eq!(a.direction_degrees.to_bits(), b.direction_degrees.to_bits());
            assert_eq!(a.wavelength.to_bits(), b.wavelength.to_bits());
        }
    }

    #[test]
    fn test_procedural_values_stay_in_jitter_bounds() {
        let settings = reference_settings();
        let field = WaveFieldGenerator::new().generate(&WaveFieldSpec::Procedural(settings)).unwrap();
        assert_eq!(field.count(), 6);

        for (i, wave) in field.waves.iter().enumerate() {
            let p = utils::lerp(0.5, 1.5, i as f32 / 6.0);
            let amp = settings.amplitude * p;
            let len = settings.wavelength * p;
            assert!(wave.amplitude >= amp * 0.8 - 1e-5 && wave.amplitude <= amp * 1.2 + 1e-5);
            assert!(wave.wavelength >= len * 0.6 - 1e-5 && wave.wavelength <= len * 1.4 + 1e-5);
            assert!(wave.direction_degrees >= -45.0 - 1e-4 && wave.direction_degrees <= 135.0 + 1e-4);
            assert_eq!(wave.origin, Vec2::zeros());
            assert!(!wave.omnidirectional);
        }
    }

    #[test]
    fn test_reseed_schedule_depends_only_on_seed_and_index() {
        // Wave i + 1 is drawn from a stream seeded with seed + i + 1, so the
        // jitter of wave 1 for seed s matches the jitter of wave 0 for seed s + 1
        // once the lerp factor is divided out.
        let generator = WaveFieldGenerator::new();
        let a = generator.generate(&WaveFieldSpec::Procedural(ProceduralWaves::new(7, 1.0, 0.0, 1.0, 2))).unwrap();
        let b = generator.generate(&WaveFieldSpec::Procedural(ProceduralWaves::new(8, 1.0, 0.0, 1.0, 1))).unwrap();

        let p1 = utils::lerp(0.5, 1.5, 0.5);
        let p0 = 0.5;
        assert_relative_eq!(a.waves[1].amplitude / p1, b.waves[0].amplitude / p0, epsilon = 1e-5);
        assert_relative_eq!(a.waves[1].direction_degrees, b.waves[0].direction_degrees, epsilon = 1e-5);
        assert_relative_eq!(a.waves[1].wavelength / p1, b.waves[0].wavelength / p0, epsilon = 1e-5);
    }

    #[test]
    fn test_different_seeds_differ() {
        let generator = WaveFieldGenerator::new();
        let a = generator.generate(&WaveFieldSpec::Procedural(reference_settings())).unwrap();
        let mut other = reference_settings();
        other.seed = 3235;
        let b = generator.generate(&WaveFieldSpec::Procedural(other)).unwrap();
        assert_ne!(a.waves, b.waves);
    }

    #[test]
    fn test_mean_amplitude_for_both_variants() {
        let generator = WaveFieldGenerator::new();

        let procedural = generator.generate(&WaveFieldSpec::Procedural(reference_settings())).unwrap();
        let expected = procedural.waves.iter().map(|w| w.amplitude).sum::<f32>() / procedural.count() as f32;
        assert_relative_eq!(procedural.mean_amplitude, expected, epsilon = 1e-6);

        let custom = generator
            .generate(&WaveFieldSpec::Custom(vec![
                Wave::directional(1.0, 0.0, 2.0),
                Wave::directional(0.5, 90.0, 3.0),
                Wave::omnidirectional(3.0, 4.0, Vec2::new(1.0, 1.0)),
            ]))
            .unwrap();
        assert_relative_eq!(custom.mean_amplitude, 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_custom_waves_are_kept_verbatim() {
        let waves = vec![
            Wave::directional(0.25, 12.0, 6.0),
            Wave::omnidirectional(0.75, 2.0, Vec2::new(-3.0, 5.0)),
        ];
        let field = WaveFieldGenerator::new().generate(&WaveFieldSpec::Custom(waves.clone())).unwrap();
        assert_eq!(field.waves, waves);
        assert_eq!(field.packed_params[1], Vec4::new(0.75, 0.0, 2.0, 1.0));
        assert_eq!(field.packed_params[11], Vec4::new(-3.0, 5.0, 0.0, 0.0));
    }

    #[test]
    fn test_packed_layout_is_zero_filled() {
        let generator = WaveFieldGenerator::new();
        for count in 1..=MAX_WAVES {
            let mut settings = reference_settings();
            settings.count = count;
            let field = generator.generate(&WaveFieldSpec::Procedural(settings)).unwrap();

            assert_eq!(field.packed_params.len(), PACKED_SLOTS);
            for i in 0..count {
                assert_eq!(field.packed_params[i], field.waves[i].packed_params());
                assert_eq!(field.packed_params[i + MAX_WAVES], field.waves[i].packed_origin());
            }
            for slot in (count..MAX_WAVES).chain(count + MAX_WAVES..PACKED_SLOTS) {
                assert_eq!(field.packed_params[slot], Vec4::zeros(), "slot {slot} for count {count}");
            }
        }
    }

    #[test]
    fn test_pack_waves_rejects_overflow() {
        let waves = vec![Wave::directional(1.0, 0.0, 1.0); MAX_WAVES + 1];
        assert_eq!(pack_waves(&waves), Err(WaterError::InvalidCount { count: 11, max: MAX_WAVES }));

        let packed = pack_waves(&waves[..MAX_WAVES]).unwrap();
        assert_eq!(packed[MAX_WAVES - 1], waves[0].packed_params());
        assert_eq!(packed[PACKED_SLOTS - 1], waves[0].packed_origin());
    }

    #[test]
    fn test_packed_bytes_cover_all_slots() {
        let field = WaveFieldGenerator::new()
            .generate(&WaveFieldSpec::Custom(vec![Wave::directional(2.0, 30.0, 8.0)]))
            .unwrap();
        let bytes = field.packed_bytes();
        assert_eq!(bytes.len(), PACKED_SLOTS * 4 * std::mem::size_of::<f32>());
        assert_eq!(&bytes[..4], &2.0_f32.to_ne_bytes());
    }

    #[test]
    fn test_calls_do_not_share_state() {
        let generator = WaveFieldGenerator::new();
        let procedural = WaveFieldSpec::Procedural(ProceduralWaves::new(1, 2.0, 0.0, 10.0, 3));
        let custom = WaveFieldSpec::Custom(vec![Wave::new(1.0, 0.0, 1.0, Vec2::zeros(), false)]);

        let p_first = generator.generate(&procedural).unwrap();
        let c_second = generator.generate(&custom).unwrap();
        let c_first = generator.generate(&custom).unwrap();
        let p_second = generator.generate(&procedural).unwrap();

        assert_eq!(p_first, p_second);
        assert_eq!(c_first, c_second);
    }
}
