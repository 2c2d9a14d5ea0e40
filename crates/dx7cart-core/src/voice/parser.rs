use log::trace;

use super::error::VoiceError;
use super::layout;
use super::reader::VoiceReader;
use super::record::{Envelope, Operator, VoiceRecord};
use crate::options::DecodeOptions;

/// Decode one 128-byte voice block.
///
/// Field values are taken as stored; range checks live in
/// [`VoiceRecord::validate`] so that any well-formed block round-trips.
///
/// # Examples
/// ```
/// use dx7cart_core::{DecodeOptions, decode_voice};
///
/// let mut block = [0u8; 128];
/// block[110] = 31;
/// block[121..127].copy_from_slice(b"BRASS ");
/// let voice = decode_voice(&block, &DecodeOptions::strict())?;
/// assert_eq!(voice.algorithm, 31);
/// assert_eq!(voice.name, "BRASS");
/// # Ok::<(), dx7cart_core::VoiceError>(())
/// ```
///
/// # Errors
/// `VoiceError::LengthMismatch` unless `data` is exactly 128 bytes;
/// `VoiceError::NonAsciiName` for a damaged name under strict options.
pub fn decode_voice(data: &[u8], options: &DecodeOptions) -> Result<VoiceRecord, VoiceError> {
    let reader = VoiceReader::new(data);
    reader.require_exact_len(layout::VOICE_SIZE)?;

    let mut operators = [Operator::default(); layout::OPERATOR_COUNT];
    for (index, operator) in operators.iter_mut().enumerate() {
        *operator = read_operator(&reader, layout::operator_base(index))?;
    }

    let pitch_envelope = Envelope {
        rates: reader.read_quad(layout::PITCH_EG_RATES_RANGE)?,
        levels: reader.read_quad(layout::PITCH_EG_LEVELS_RANGE)?,
    };
    let name = reader.read_name(layout::NAME_RANGE, options.names)?;
    trace!("decoded voice '{name}'");

    Ok(VoiceRecord {
        operators,
        pitch_envelope,
        algorithm: reader.read_u8(layout::ALGORITHM_OFFSET)?,
        feedback: reader.read_u8(layout::FEEDBACK_OFFSET)?,
        oscillator_sync: reader.read_u8(layout::OSCILLATOR_SYNC_OFFSET)?,
        lfo_speed: reader.read_u8(layout::LFO_SPEED_OFFSET)?,
        lfo_delay: reader.read_u8(layout::LFO_DELAY_OFFSET)?,
        lfo_pitch_mod_depth: reader.read_u8(layout::LFO_PITCH_MOD_DEPTH_OFFSET)?,
        lfo_amp_mod_depth: reader.read_u8(layout::LFO_AMP_MOD_DEPTH_OFFSET)?,
        lfo_sync: reader.read_u8(layout::LFO_SYNC_OFFSET)?,
        lfo_waveform: reader.read_u8(layout::LFO_WAVEFORM_OFFSET)?,
        pitch_mod_sensitivity: reader.read_u8(layout::PITCH_MOD_SENSITIVITY_OFFSET)?,
        transpose: reader.read_u8(layout::TRANSPOSE_OFFSET)?,
        name,
        reserved: reader.read_u8(layout::RESERVED_OFFSET)?,
    })
}

fn read_operator(reader: &VoiceReader<'_>, base: usize) -> Result<Operator, VoiceError> {
    let at = |offset: usize| base + offset;
    let range = |r: std::ops::Range<usize>| at(r.start)..at(r.end);
    Ok(Operator {
        envelope: Envelope {
            rates: reader.read_quad(range(layout::OP_RATES_RANGE))?,
            levels: reader.read_quad(range(layout::OP_LEVELS_RANGE))?,
        },
        break_point: reader.read_u8(at(layout::OP_BREAK_POINT_OFFSET))?,
        left_depth: reader.read_u8(at(layout::OP_LEFT_DEPTH_OFFSET))?,
        right_depth: reader.read_u8(at(layout::OP_RIGHT_DEPTH_OFFSET))?,
        left_curve: reader.read_u8(at(layout::OP_LEFT_CURVE_OFFSET))?,
        right_curve: reader.read_u8(at(layout::OP_RIGHT_CURVE_OFFSET))?,
        rate_scaling: reader.read_u8(at(layout::OP_RATE_SCALING_OFFSET))?,
        amp_mod_sensitivity: reader.read_u8(at(layout::OP_AMP_MOD_SENSITIVITY_OFFSET))?,
        key_velocity_sensitivity: reader
            .read_u8(at(layout::OP_KEY_VELOCITY_SENSITIVITY_OFFSET))?,
        output_level: reader.read_u8(at(layout::OP_OUTPUT_LEVEL_OFFSET))?,
    })
}

/// Sample block with every byte distinct from its neighbours, used by tests.
#[cfg(test)]
pub(crate) fn sample_block(seed: u8) -> [u8; layout::VOICE_SIZE] {
    let mut block: [u8; layout::VOICE_SIZE] =
        std::array::from_fn(|i| ((i as u8).wrapping_mul(7).wrapping_add(seed)) % 100);
    block[layout::NAME_RANGE].copy_from_slice(b"SLOT  ");
    block[layout::NAME_RANGE.start + 4] = b'0' + seed % 10;
    block
}

#[cfg(test)]
mod tests {
    use super::{decode_voice, sample_block};
    use crate::options::DecodeOptions;
    use crate::voice::error::VoiceError;
    use crate::voice::layout;
    use crate::voice::record::VoiceRecord;
    use crate::voice::writer::encode_voice;

    #[test]
    fn decode_maps_operator_fields() {
        let mut block = [0u8; layout::VOICE_SIZE];
        let base = layout::operator_base(5);
        block[base..base + 4].copy_from_slice(&[10, 20, 30, 40]);
        block[base + 4..base + 8].copy_from_slice(&[99, 80, 70, 0]);
        block[base + layout::OP_RIGHT_CURVE_OFFSET] = 3;
        block[base + layout::OP_OUTPUT_LEVEL_OFFSET] = 88;

        let voice = decode_voice(&block, &DecodeOptions::strict()).unwrap();
        let op6 = &voice.operators[5];
        assert_eq!(op6.envelope.rates, [10, 20, 30, 40]);
        assert_eq!(op6.envelope.levels, [99, 80, 70, 0]);
        assert_eq!(op6.right_curve, 3);
        assert_eq!(op6.output_level, 88);
        assert_eq!(voice.operators[4].output_level, 0);
    }

    #[test]
    fn decode_maps_global_fields() {
        let block = sample_block(3);
        let voice = decode_voice(&block, &DecodeOptions::strict()).unwrap();
        assert_eq!(voice.pitch_envelope.rates[0], block[102]);
        assert_eq!(voice.pitch_envelope.levels[3], block[109]);
        assert_eq!(voice.algorithm, block[110]);
        assert_eq!(voice.transpose, block[120]);
        assert_eq!(voice.name, "SLOT3");
        assert_eq!(voice.reserved, block[127]);
    }

    #[test]
    fn decode_leaves_range_checks_to_validate() {
        let mut block = encode_voice(&VoiceRecord::init()).unwrap();
        block[layout::ALGORITHM_OFFSET] = 40;
        let voice = decode_voice(&block, &DecodeOptions::strict()).unwrap();
        assert_eq!(voice.algorithm, 40);
        assert!(matches!(
            voice.validate(),
            Err(VoiceError::OutOfRange { offset: 110, .. })
        ));
    }

    #[test]
    fn decode_rejects_short_block() {
        let block = [0u8; 127];
        let err = decode_voice(&block, &DecodeOptions::strict()).unwrap_err();
        assert!(err.to_string().contains("expected 128 bytes, got 127"));
    }

    #[test]
    fn decode_lenient_survives_damaged_name() {
        let mut block = sample_block(0);
        block[layout::NAME_RANGE.start] = 0xFF;
        let strict = decode_voice(&block, &DecodeOptions::strict()).unwrap_err();
        assert!(matches!(strict, VoiceError::NonAsciiName { offset: 121, .. }));

        let voice = decode_voice(&block, &DecodeOptions::lenient()).unwrap();
        assert_eq!(voice.name, "?LOT0");
    }
}
