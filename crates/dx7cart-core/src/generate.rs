//! Random voice generation.
//!
//! The generator samples field values and builds voices through the public
//! record type; every result is checked with [`VoiceRecord::validate`].
//! Randomness is injected as any [`rand::Rng`], so a seeded generator gives
//! reproducible cartridges.

use std::fmt;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cartridge::{Cartridge, CartridgeError, VOICE_COUNT};
use crate::voice::layout;
use crate::voice::{Envelope, Operator, VoiceError, VoiceRecord, fit_name};

const NAME_ADJECTIVES: [&str; 10] = [
    "HOT", "ZAP", "POP", "FUN", "JOY", "SKY", "RAD", "NEO", "ACE", "PEP",
];
const NAME_NOUNS: [&str; 10] = [
    "BEL", "KEY", "HIT", "RAY", "ORB", "FLY", "GEM", "TIK", "BOP", "ZIG",
];

/// Sampling strategy for generated voices.
///
/// # Examples
/// ```
/// use dx7cart_core::generate::{Profile, random_voice};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let voice = random_voice(&mut rng, Profile::Bright)?;
/// assert_eq!(voice.transpose, 24);
/// # Ok::<(), dx7cart_core::VoiceError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Every field uniform over its legal range.
    #[default]
    Uniform,
    /// Fast attacks, high levels and lively LFO settings.
    Bright,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Uniform => write!(f, "uniform"),
            Profile::Bright => write!(f, "bright"),
        }
    }
}

/// Generate one voice.
///
/// # Errors
/// Returns the validation error if a sampled value falls outside its legal
/// range.
pub fn random_voice<R: Rng>(rng: &mut R, profile: Profile) -> Result<VoiceRecord, VoiceError> {
    let voice = match profile {
        Profile::Uniform => uniform_voice(rng),
        Profile::Bright => bright_voice(rng),
    };
    voice.validate()?;
    Ok(voice)
}

/// Generate a full cartridge of 32 voices.
///
/// # Errors
/// `CartridgeError::Voice` naming the slot whose voice failed validation.
pub fn random_cartridge<R: Rng>(rng: &mut R, profile: Profile) -> Result<Cartridge, CartridgeError> {
    let mut voices = Vec::with_capacity(VOICE_COUNT);
    for slot in 0..VOICE_COUNT {
        let voice =
            random_voice(rng, profile).map_err(|source| CartridgeError::Voice { slot, source })?;
        voices.push(voice);
    }
    debug!("generated {VOICE_COUNT} {profile} voices");
    Cartridge::from_voices(voices)
}

fn uniform_voice<R: Rng>(rng: &mut R) -> VoiceRecord {
    let mut operators = [Operator::default(); layout::OPERATOR_COUNT];
    for operator in &mut operators {
        *operator = Operator {
            envelope: uniform_envelope(rng),
            break_point: rng.gen_range(0..=layout::MAX_SCALING_DEPTH),
            left_depth: rng.gen_range(0..=layout::MAX_SCALING_DEPTH),
            right_depth: rng.gen_range(0..=layout::MAX_SCALING_DEPTH),
            left_curve: rng.gen_range(0..=layout::MAX_CURVE),
            right_curve: rng.gen_range(0..=layout::MAX_CURVE),
            rate_scaling: rng.gen_range(0..=layout::MAX_RATE_SCALING),
            amp_mod_sensitivity: rng.gen_range(0..=layout::MAX_AMP_MOD_SENSITIVITY),
            key_velocity_sensitivity: rng.gen_range(0..=layout::MAX_KEY_VELOCITY_SENSITIVITY),
            output_level: rng.gen_range(0..=layout::MAX_OUTPUT_LEVEL),
        };
    }

    let name = (0..layout::NAME_LEN)
        .map(|_| char::from(b'A' + rng.gen_range(0..26u8)))
        .collect();

    VoiceRecord {
        operators,
        pitch_envelope: uniform_envelope(rng),
        algorithm: rng.gen_range(0..=layout::MAX_ALGORITHM),
        feedback: rng.gen_range(0..=layout::MAX_FEEDBACK),
        oscillator_sync: rng.gen_range(0..=layout::MAX_SWITCH),
        lfo_speed: rng.gen_range(0..=layout::MAX_LFO_PARAM),
        lfo_delay: rng.gen_range(0..=layout::MAX_LFO_PARAM),
        lfo_pitch_mod_depth: rng.gen_range(0..=layout::MAX_LFO_PARAM),
        lfo_amp_mod_depth: rng.gen_range(0..=layout::MAX_LFO_PARAM),
        lfo_sync: rng.gen_range(0..=layout::MAX_SWITCH),
        lfo_waveform: rng.gen_range(0..=layout::MAX_LFO_WAVEFORM),
        pitch_mod_sensitivity: rng.gen_range(0..=layout::MAX_PITCH_MOD_SENSITIVITY),
        transpose: rng.gen_range(0..=layout::MAX_TRANSPOSE),
        name,
        reserved: 0,
    }
}

fn uniform_envelope<R: Rng>(rng: &mut R) -> Envelope {
    Envelope {
        rates: std::array::from_fn(|_| rng.gen_range(0..=layout::MAX_EG)),
        levels: std::array::from_fn(|_| rng.gen_range(0..=layout::MAX_EG)),
    }
}

fn bright_voice<R: Rng>(rng: &mut R) -> VoiceRecord {
    let mut operators = [Operator::default(); layout::OPERATOR_COUNT];
    for operator in &mut operators {
        *operator = Operator {
            envelope: Envelope {
                rates: [
                    biased(rng, 99, 5, layout::MAX_EG),
                    biased(rng, 80, 10, layout::MAX_EG),
                    biased(rng, 60, 10, layout::MAX_EG),
                    biased(rng, 30, 10, layout::MAX_EG),
                ],
                levels: [
                    biased(rng, 99, 20, layout::MAX_EG),
                    biased(rng, 80, 10, layout::MAX_EG),
                    biased(rng, 60, 10, layout::MAX_EG),
                    biased(rng, 0, 10, layout::MAX_EG),
                ],
            },
            break_point: biased(rng, 60, 10, layout::MAX_SCALING_DEPTH),
            left_depth: biased(rng, 40, 10, layout::MAX_SCALING_DEPTH),
            right_depth: biased(rng, 40, 10, layout::MAX_SCALING_DEPTH),
            left_curve: if rng.gen_bool(0.5) { 1 } else { 2 },
            right_curve: if rng.gen_bool(0.5) { 1 } else { 2 },
            rate_scaling: rng.gen_range(0..=3),
            amp_mod_sensitivity: rng.gen_range(1..=layout::MAX_AMP_MOD_SENSITIVITY),
            key_velocity_sensitivity: rng.gen_range(0..=4),
            output_level: biased(rng, 90, 9, layout::MAX_OUTPUT_LEVEL),
        };
    }

    let pitch_envelope = Envelope {
        rates: [
            biased(rng, 80, 10, layout::MAX_EG),
            biased(rng, 60, 10, layout::MAX_EG),
            biased(rng, 50, 10, layout::MAX_EG),
            biased(rng, 20, 10, layout::MAX_EG),
        ],
        levels: [
            biased(rng, 70, 10, layout::MAX_EG),
            biased(rng, 50, 10, layout::MAX_EG),
            biased(rng, 30, 10, layout::MAX_EG),
            biased(rng, 0, 5, layout::MAX_EG),
        ],
    };

    let adjective = NAME_ADJECTIVES[rng.gen_range(0..NAME_ADJECTIVES.len())];
    let noun = NAME_NOUNS[rng.gen_range(0..NAME_NOUNS.len())];

    VoiceRecord {
        operators,
        pitch_envelope,
        algorithm: rng.gen_range(0..=layout::MAX_ALGORITHM),
        feedback: biased(rng, 5, 3, layout::MAX_FEEDBACK),
        oscillator_sync: rng.gen_range(0..=layout::MAX_SWITCH),
        lfo_speed: biased(rng, 70, 20, layout::MAX_LFO_PARAM),
        lfo_delay: biased(rng, 10, 5, layout::MAX_LFO_PARAM),
        lfo_pitch_mod_depth: biased(rng, 20, 10, layout::MAX_LFO_PARAM),
        lfo_amp_mod_depth: biased(rng, 15, 5, layout::MAX_LFO_PARAM),
        lfo_sync: rng.gen_range(0..=layout::MAX_SWITCH),
        lfo_waveform: rng.gen_range(0..=layout::MAX_LFO_WAVEFORM),
        pitch_mod_sensitivity: rng.gen_range(2..=layout::MAX_PITCH_MOD_SENSITIVITY),
        // Middle C.
        transpose: 24,
        name: fit_name(&format!("{adjective}{noun}")),
        reserved: 0,
    }
}

/// `base ± variation`, truncated toward zero and clamped to `0..=max`.
fn biased<R: Rng>(rng: &mut R, base: u8, variation: u8, max: u8) -> u8 {
    let offset = rng.gen_range(-1.0..=1.0) * f64::from(variation);
    let value = (f64::from(base) + offset) as i32;
    value.clamp(0, i32::from(max)) as u8
}
