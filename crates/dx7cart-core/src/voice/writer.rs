use std::ops::Range;

use super::error::VoiceError;
use super::layout;
use super::record::{Envelope, Operator, VoiceRecord, check_name};

struct VoiceWriter {
    block: [u8; layout::VOICE_SIZE],
}

impl VoiceWriter {
    fn new() -> Self {
        Self {
            block: [0u8; layout::VOICE_SIZE],
        }
    }

    fn write_u8(&mut self, offset: usize, value: u8) {
        self.block[offset] = value;
    }

    fn write_quad(&mut self, range: Range<usize>, values: &[u8; 4]) {
        self.block[range].copy_from_slice(values);
    }

    fn write_envelope(&mut self, rates: Range<usize>, levels: Range<usize>, envelope: &Envelope) {
        self.write_quad(rates, &envelope.rates);
        self.write_quad(levels, &envelope.levels);
    }

    fn write_name(&mut self, range: Range<usize>, name: &str) -> Result<(), VoiceError> {
        check_name(name)?;
        let field = &mut self.block[range];
        field.fill(layout::NAME_PAD);
        field[..name.len()].copy_from_slice(name.as_bytes());
        Ok(())
    }

    /// Hand out the block once every byte is a 7-bit SysEx data byte.
    fn finish(self) -> Result<[u8; layout::VOICE_SIZE], VoiceError> {
        if let Some(offset) = self
            .block
            .iter()
            .position(|value| *value > layout::MAX_DATA_BYTE)
        {
            return Err(VoiceError::OutOfRange {
                field: "data byte",
                offset,
                value: self.block[offset],
                max: layout::MAX_DATA_BYTE,
            });
        }
        Ok(self.block)
    }

    fn write_operator(&mut self, base: usize, operator: &Operator) {
        let shifted = |r: Range<usize>| base + r.start..base + r.end;
        self.write_envelope(
            shifted(layout::OP_RATES_RANGE),
            shifted(layout::OP_LEVELS_RANGE),
            &operator.envelope,
        );
        let fields = [
            (layout::OP_BREAK_POINT_OFFSET, operator.break_point),
            (layout::OP_LEFT_DEPTH_OFFSET, operator.left_depth),
            (layout::OP_RIGHT_DEPTH_OFFSET, operator.right_depth),
            (layout::OP_LEFT_CURVE_OFFSET, operator.left_curve),
            (layout::OP_RIGHT_CURVE_OFFSET, operator.right_curve),
            (layout::OP_RATE_SCALING_OFFSET, operator.rate_scaling),
            (layout::OP_AMP_MOD_SENSITIVITY_OFFSET, operator.amp_mod_sensitivity),
            (
                layout::OP_KEY_VELOCITY_SENSITIVITY_OFFSET,
                operator.key_velocity_sensitivity,
            ),
            (layout::OP_OUTPUT_LEVEL_OFFSET, operator.output_level),
        ];
        for (offset, value) in fields {
            self.write_u8(base + offset, value);
        }
    }
}

/// Encode a voice into its 128-byte block.
///
/// The name is right-padded with spaces to the fixed field width. Field values
/// are written as stored; call [`VoiceRecord::validate`] to range-check them
/// against the hardware limits. Values above 0x7F are always rejected, since
/// they would break the SysEx frame.
///
/// # Examples
/// ```
/// use dx7cart_core::{VoiceRecord, encode_voice};
///
/// let block = encode_voice(&VoiceRecord::init())?;
/// assert_eq!(&block[121..127], b"INIT  ");
/// # Ok::<(), dx7cart_core::VoiceError>(())
/// ```
///
/// # Errors
/// `VoiceError::NonAsciiName` when the name holds anything but printable
/// ASCII, `VoiceError::NameTooLong` when it exceeds six bytes,
/// `VoiceError::OutOfRange` when a field does not fit in seven bits.
pub fn encode_voice(voice: &VoiceRecord) -> Result<[u8; layout::VOICE_SIZE], VoiceError> {
    let mut writer = VoiceWriter::new();

    for (index, operator) in voice.operators.iter().enumerate() {
        writer.write_operator(layout::operator_base(index), operator);
    }
    writer.write_envelope(
        layout::PITCH_EG_RATES_RANGE,
        layout::PITCH_EG_LEVELS_RANGE,
        &voice.pitch_envelope,
    );

    let fields = [
        (layout::ALGORITHM_OFFSET, voice.algorithm),
        (layout::FEEDBACK_OFFSET, voice.feedback),
        (layout::OSCILLATOR_SYNC_OFFSET, voice.oscillator_sync),
        (layout::LFO_SPEED_OFFSET, voice.lfo_speed),
        (layout::LFO_DELAY_OFFSET, voice.lfo_delay),
        (layout::LFO_PITCH_MOD_DEPTH_OFFSET, voice.lfo_pitch_mod_depth),
        (layout::LFO_AMP_MOD_DEPTH_OFFSET, voice.lfo_amp_mod_depth),
        (layout::LFO_SYNC_OFFSET, voice.lfo_sync),
        (layout::LFO_WAVEFORM_OFFSET, voice.lfo_waveform),
        (layout::PITCH_MOD_SENSITIVITY_OFFSET, voice.pitch_mod_sensitivity),
        (layout::TRANSPOSE_OFFSET, voice.transpose),
        (layout::RESERVED_OFFSET, voice.reserved),
    ];
    for (offset, value) in fields {
        writer.write_u8(offset, value);
    }
    writer.write_name(layout::NAME_RANGE, &voice.name)?;

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::encode_voice;
    use crate::options::DecodeOptions;
    use crate::voice::error::VoiceError;
    use crate::voice::layout;
    use crate::voice::parser::{decode_voice, sample_block};
    use crate::voice::record::VoiceRecord;

    #[test]
    fn encode_inverts_decode() {
        for seed in 0..10 {
            let block = sample_block(seed);
            let voice = decode_voice(&block, &DecodeOptions::strict()).unwrap();
            assert_eq!(encode_voice(&voice).unwrap(), block);
        }
    }

    #[test]
    fn encode_normalizes_nul_padding_to_spaces() {
        let mut block = sample_block(1);
        block[layout::NAME_RANGE].copy_from_slice(b"PIANO\0");
        let voice = decode_voice(&block, &DecodeOptions::strict()).unwrap();
        let encoded = encode_voice(&voice).unwrap();
        assert_eq!(&encoded[layout::NAME_RANGE], b"PIANO ");
        assert_eq!(encoded[..layout::NAME_RANGE.start], block[..layout::NAME_RANGE.start]);
        assert_eq!(encoded[layout::RESERVED_OFFSET], block[layout::RESERVED_OFFSET]);
    }

    #[test]
    fn encode_places_operator_six_last() {
        let mut voice = VoiceRecord::init();
        voice.operators[5].output_level = 77;
        voice.operators[5].key_velocity_sensitivity = 6;
        let block = encode_voice(&voice).unwrap();
        assert_eq!(block[101], 77);
        assert_eq!(block[100], 6);
    }

    #[test]
    fn encode_rejects_non_ascii_name() {
        let mut voice = VoiceRecord::init();
        voice.name = "É".to_string();
        let err = encode_voice(&voice).unwrap_err();
        assert!(matches!(err, VoiceError::NonAsciiName { offset: 121, value: 0xC3 }));
    }

    #[test]
    fn encode_rejects_overlong_name() {
        let mut voice = VoiceRecord::init();
        voice.name = "STRINGS".to_string();
        let err = encode_voice(&voice).unwrap_err();
        assert_eq!(err, VoiceError::NameTooLong { max: 6, actual: 7 });
    }

    #[test]
    fn encode_rejects_eight_bit_field() {
        let mut voice = VoiceRecord::init();
        voice.lfo_speed = 0xF7;
        let err = encode_voice(&voice).unwrap_err();
        assert_eq!(
            err,
            VoiceError::OutOfRange {
                field: "data byte",
                offset: layout::LFO_SPEED_OFFSET,
                value: 0xF7,
                max: 0x7F,
            }
        );
    }

    #[test]
    fn encode_accepts_out_of_range_seven_bit_field() {
        let mut voice = VoiceRecord::init();
        voice.operators[0].output_level = 0x7F;
        assert!(voice.validate().is_err());
        assert_eq!(encode_voice(&voice).unwrap()[16], 0x7F);
    }
}
