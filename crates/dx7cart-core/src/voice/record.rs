use serde::{Deserialize, Serialize};

use super::error::VoiceError;
use super::layout;

/// Four-stage rate/level envelope, shared by operators and the pitch EG.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub rates: [u8; 4],
    pub levels: [u8; 4],
}

/// One of the six operators of a voice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub envelope: Envelope,
    pub break_point: u8,
    pub left_depth: u8,
    pub right_depth: u8,
    pub left_curve: u8,
    pub right_curve: u8,
    pub rate_scaling: u8,
    pub amp_mod_sensitivity: u8,
    pub key_velocity_sensitivity: u8,
    pub output_level: u8,
}

/// Structured view of one 128-byte voice.
///
/// Operators are stored in operator order (index 0 is operator 1). Switch
/// fields (`oscillator_sync`, `lfo_sync`) stay raw bytes so that decoding and
/// re-encoding never rewrites a value the hardware stored.
///
/// Decoding does not range-check fields: a record may hold values above the
/// hardware limits (say, an algorithm of 40). Call [`VoiceRecord::validate`]
/// before trusting a decoded record.
///
/// # Examples
/// ```
/// use dx7cart_core::VoiceRecord;
///
/// let voice = VoiceRecord::init();
/// assert_eq!(voice.name, "INIT");
/// assert!(voice.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceRecord {
    pub operators: [Operator; layout::OPERATOR_COUNT],
    pub pitch_envelope: Envelope,
    pub algorithm: u8,
    pub feedback: u8,
    pub oscillator_sync: u8,
    pub lfo_speed: u8,
    pub lfo_delay: u8,
    pub lfo_pitch_mod_depth: u8,
    pub lfo_amp_mod_depth: u8,
    pub lfo_sync: u8,
    pub lfo_waveform: u8,
    pub pitch_mod_sensitivity: u8,
    pub transpose: u8,
    /// Voice name without trailing padding.
    pub name: String,
    pub reserved: u8,
}

impl VoiceRecord {
    /// The voice the hardware loads on "voice init": a single sine carrier.
    pub fn init() -> Self {
        let operator = |output_level| Operator {
            envelope: Envelope {
                rates: [99, 99, 99, 99],
                levels: [99, 99, 99, 0],
            },
            break_point: 39,
            output_level,
            ..Operator::default()
        };
        let mut operators = [operator(0); layout::OPERATOR_COUNT];
        operators[0] = operator(99);

        Self {
            operators,
            pitch_envelope: Envelope {
                rates: [99, 99, 99, 99],
                levels: [50, 50, 50, 50],
            },
            algorithm: 0,
            feedback: 0,
            oscillator_sync: 1,
            lfo_speed: 35,
            lfo_delay: 0,
            lfo_pitch_mod_depth: 0,
            lfo_amp_mod_depth: 0,
            lfo_sync: 1,
            lfo_waveform: 0,
            pitch_mod_sensitivity: 3,
            transpose: 24,
            name: "INIT".to_string(),
            reserved: 0,
        }
    }

    /// Check every field against its legal hardware range.
    ///
    /// Returns the first offending field together with its byte offset.
    ///
    /// # Errors
    /// Returns `VoiceError::OutOfRange` for a field above its maximum, or a
    /// name error when the name cannot be encoded.
    pub fn validate(&self) -> Result<(), VoiceError> {
        for (index, operator) in self.operators.iter().enumerate() {
            operator.validate(layout::operator_base(index))?;
        }
        check_envelope(
            "pitch EG",
            &self.pitch_envelope,
            layout::PITCH_EG_RATES_RANGE.start,
            layout::PITCH_EG_LEVELS_RANGE.start,
        )?;

        let fields = [
            ("algorithm", layout::ALGORITHM_OFFSET, self.algorithm, layout::MAX_ALGORITHM),
            ("feedback", layout::FEEDBACK_OFFSET, self.feedback, layout::MAX_FEEDBACK),
            (
                "oscillator sync",
                layout::OSCILLATOR_SYNC_OFFSET,
                self.oscillator_sync,
                layout::MAX_SWITCH,
            ),
            ("LFO speed", layout::LFO_SPEED_OFFSET, self.lfo_speed, layout::MAX_LFO_PARAM),
            ("LFO delay", layout::LFO_DELAY_OFFSET, self.lfo_delay, layout::MAX_LFO_PARAM),
            (
                "LFO pitch-mod depth",
                layout::LFO_PITCH_MOD_DEPTH_OFFSET,
                self.lfo_pitch_mod_depth,
                layout::MAX_LFO_PARAM,
            ),
            (
                "LFO amp-mod depth",
                layout::LFO_AMP_MOD_DEPTH_OFFSET,
                self.lfo_amp_mod_depth,
                layout::MAX_LFO_PARAM,
            ),
            ("LFO sync", layout::LFO_SYNC_OFFSET, self.lfo_sync, layout::MAX_SWITCH),
            (
                "LFO waveform",
                layout::LFO_WAVEFORM_OFFSET,
                self.lfo_waveform,
                layout::MAX_LFO_WAVEFORM,
            ),
            (
                "pitch-mod sensitivity",
                layout::PITCH_MOD_SENSITIVITY_OFFSET,
                self.pitch_mod_sensitivity,
                layout::MAX_PITCH_MOD_SENSITIVITY,
            ),
            ("transpose", layout::TRANSPOSE_OFFSET, self.transpose, layout::MAX_TRANSPOSE),
            ("reserved", layout::RESERVED_OFFSET, self.reserved, layout::MAX_DATA_BYTE),
        ];
        for (field, offset, value, max) in fields {
            check(field, offset, value, max)?;
        }

        check_name(&self.name)
    }
}

impl Operator {
    fn validate(&self, base: usize) -> Result<(), VoiceError> {
        check_envelope(
            "operator EG",
            &self.envelope,
            base + layout::OP_RATES_RANGE.start,
            base + layout::OP_LEVELS_RANGE.start,
        )?;

        let fields = [
            (
                "break point",
                layout::OP_BREAK_POINT_OFFSET,
                self.break_point,
                layout::MAX_SCALING_DEPTH,
            ),
            (
                "left depth",
                layout::OP_LEFT_DEPTH_OFFSET,
                self.left_depth,
                layout::MAX_SCALING_DEPTH,
            ),
            (
                "right depth",
                layout::OP_RIGHT_DEPTH_OFFSET,
                self.right_depth,
                layout::MAX_SCALING_DEPTH,
            ),
            ("left curve", layout::OP_LEFT_CURVE_OFFSET, self.left_curve, layout::MAX_CURVE),
            ("right curve", layout::OP_RIGHT_CURVE_OFFSET, self.right_curve, layout::MAX_CURVE),
            (
                "rate scaling",
                layout::OP_RATE_SCALING_OFFSET,
                self.rate_scaling,
                layout::MAX_RATE_SCALING,
            ),
            (
                "amp-mod sensitivity",
                layout::OP_AMP_MOD_SENSITIVITY_OFFSET,
                self.amp_mod_sensitivity,
                layout::MAX_AMP_MOD_SENSITIVITY,
            ),
            (
                "key-velocity sensitivity",
                layout::OP_KEY_VELOCITY_SENSITIVITY_OFFSET,
                self.key_velocity_sensitivity,
                layout::MAX_KEY_VELOCITY_SENSITIVITY,
            ),
            (
                "output level",
                layout::OP_OUTPUT_LEVEL_OFFSET,
                self.output_level,
                layout::MAX_OUTPUT_LEVEL,
            ),
        ];
        for (field, offset, value, max) in fields {
            check(field, base + offset, value, max)?;
        }
        Ok(())
    }
}

/// Truncate and uppercase arbitrary text into a name that always encodes.
///
/// Characters outside printable ASCII are dropped.
///
/// # Examples
/// ```
/// use dx7cart_core::fit_name;
///
/// assert_eq!(fit_name("Bright Burst"), "BRIGHT");
/// assert_eq!(fit_name("zap"), "ZAP");
/// ```
pub fn fit_name(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(layout::NAME_LEN)
        .collect::<String>()
        .to_ascii_uppercase()
        .trim_end()
        .to_string()
}

pub(crate) fn check_name(name: &str) -> Result<(), VoiceError> {
    if let Some((index, value)) = name
        .bytes()
        .enumerate()
        .find(|(_, b)| !is_printable_ascii(*b))
    {
        return Err(VoiceError::NonAsciiName {
            offset: layout::NAME_RANGE.start + index,
            value,
        });
    }
    if name.len() > layout::NAME_LEN {
        return Err(VoiceError::NameTooLong {
            max: layout::NAME_LEN,
            actual: name.len(),
        });
    }
    Ok(())
}

pub(crate) fn is_printable_ascii(value: u8) -> bool {
    (0x20..=0x7E).contains(&value)
}

fn check_envelope(
    field: &'static str,
    envelope: &Envelope,
    rates_offset: usize,
    levels_offset: usize,
) -> Result<(), VoiceError> {
    for (i, rate) in envelope.rates.iter().enumerate() {
        check(field, rates_offset + i, *rate, layout::MAX_EG)?;
    }
    for (i, level) in envelope.levels.iter().enumerate() {
        check(field, levels_offset + i, *level, layout::MAX_EG)?;
    }
    Ok(())
}

fn check(field: &'static str, offset: usize, value: u8, max: u8) -> Result<(), VoiceError> {
    if value > max {
        return Err(VoiceError::OutOfRange {
            field,
            offset,
            value,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{VoiceRecord, fit_name};
    use crate::voice::error::VoiceError;

    #[test]
    fn init_voice_is_valid() {
        let voice = VoiceRecord::init();
        assert!(voice.validate().is_ok());
        assert_eq!(voice.operators[0].output_level, 99);
        assert!(voice.operators[1..].iter().all(|op| op.output_level == 0));
    }

    #[test]
    fn validate_reports_operator_offset() {
        let mut voice = VoiceRecord::init();
        voice.operators[2].left_curve = 4;
        let err = voice.validate().unwrap_err();
        assert_eq!(
            err,
            VoiceError::OutOfRange {
                field: "left curve",
                offset: 2 * 17 + 11,
                value: 4,
                max: 3,
            }
        );
    }

    #[test]
    fn validate_rejects_transpose_above_four_octaves() {
        let mut voice = VoiceRecord::init();
        voice.transpose = 49;
        let err = voice.validate().unwrap_err();
        assert!(err.to_string().contains("transpose out of range at offset 120"));
    }

    #[test]
    fn validate_rejects_pitch_envelope_level() {
        let mut voice = VoiceRecord::init();
        voice.pitch_envelope.levels[3] = 100;
        let err = voice.validate().unwrap_err();
        assert!(matches!(err, VoiceError::OutOfRange { offset: 109, .. }));
    }

    #[test]
    fn validate_rejects_long_name() {
        let mut voice = VoiceRecord::init();
        voice.name = "TOOLONG".to_string();
        assert_eq!(
            voice.validate().unwrap_err(),
            VoiceError::NameTooLong { max: 6, actual: 7 }
        );
    }

    #[test]
    fn json_uses_field_names_and_reads_back() {
        let mut voice = VoiceRecord::init();
        voice.operators[5].output_level = 42;
        let json = serde_json::to_value(&voice).unwrap();
        assert_eq!(json["name"], "INIT");
        assert_eq!(json["transpose"], 24);
        assert_eq!(json["operators"].as_array().unwrap().len(), 6);
        assert_eq!(json["operators"][5]["output_level"], 42);
        assert_eq!(json["pitch_envelope"]["levels"][0], 50);

        let back: VoiceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, voice);
    }

    #[test]
    fn fit_name_drops_non_ascii() {
        assert_eq!(fit_name("héllo"), "HLLO");
        assert_eq!(fit_name("ab    cd"), "AB");
    }
}
