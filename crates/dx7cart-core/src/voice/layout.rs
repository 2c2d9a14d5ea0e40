use std::ops::Range;

pub const VOICE_SIZE: usize = 128;

pub const OPERATOR_COUNT: usize = 6;
pub const OPERATOR_SIZE: usize = 17;

// Operator offsets are relative to `operator_base`.
pub const OP_RATES_RANGE: Range<usize> = 0..4;
pub const OP_LEVELS_RANGE: Range<usize> = 4..8;
pub const OP_BREAK_POINT_OFFSET: usize = 8;
pub const OP_LEFT_DEPTH_OFFSET: usize = 9;
pub const OP_RIGHT_DEPTH_OFFSET: usize = 10;
pub const OP_LEFT_CURVE_OFFSET: usize = 11;
pub const OP_RIGHT_CURVE_OFFSET: usize = 12;
pub const OP_RATE_SCALING_OFFSET: usize = 13;
pub const OP_AMP_MOD_SENSITIVITY_OFFSET: usize = 14;
pub const OP_KEY_VELOCITY_SENSITIVITY_OFFSET: usize = 15;
pub const OP_OUTPUT_LEVEL_OFFSET: usize = 16;

pub const PITCH_EG_RATES_RANGE: Range<usize> = 102..106;
pub const PITCH_EG_LEVELS_RANGE: Range<usize> = 106..110;

pub const ALGORITHM_OFFSET: usize = 110;
pub const FEEDBACK_OFFSET: usize = 111;
pub const OSCILLATOR_SYNC_OFFSET: usize = 112;
pub const LFO_SPEED_OFFSET: usize = 113;
pub const LFO_DELAY_OFFSET: usize = 114;
pub const LFO_PITCH_MOD_DEPTH_OFFSET: usize = 115;
pub const LFO_AMP_MOD_DEPTH_OFFSET: usize = 116;
pub const LFO_SYNC_OFFSET: usize = 117;
pub const LFO_WAVEFORM_OFFSET: usize = 118;
pub const PITCH_MOD_SENSITIVITY_OFFSET: usize = 119;
pub const TRANSPOSE_OFFSET: usize = 120;
pub const NAME_RANGE: Range<usize> = 121..127;
pub const RESERVED_OFFSET: usize = 127;

pub const NAME_LEN: usize = NAME_RANGE.end - NAME_RANGE.start;
pub const NAME_PAD: u8 = b' ';

// Legal maxima (inclusive).
pub const MAX_EG: u8 = 99;
pub const MAX_SCALING_DEPTH: u8 = 99;
pub const MAX_CURVE: u8 = 3;
pub const MAX_RATE_SCALING: u8 = 7;
pub const MAX_AMP_MOD_SENSITIVITY: u8 = 3;
pub const MAX_KEY_VELOCITY_SENSITIVITY: u8 = 7;
pub const MAX_OUTPUT_LEVEL: u8 = 99;
pub const MAX_ALGORITHM: u8 = 31;
pub const MAX_FEEDBACK: u8 = 7;
pub const MAX_SWITCH: u8 = 1;
pub const MAX_LFO_PARAM: u8 = 99;
pub const MAX_LFO_WAVEFORM: u8 = 5;
pub const MAX_PITCH_MOD_SENSITIVITY: u8 = 7;
pub const MAX_TRANSPOSE: u8 = 48;
pub const MAX_DATA_BYTE: u8 = 0x7F;

pub const fn operator_base(index: usize) -> usize {
    index * OPERATOR_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_end_where_pitch_envelope_starts() {
        assert_eq!(operator_base(OPERATOR_COUNT), PITCH_EG_RATES_RANGE.start);
    }

    #[test]
    fn name_and_reserved_fill_the_block() {
        assert_eq!(TRANSPOSE_OFFSET + 1, NAME_RANGE.start);
        assert_eq!(NAME_LEN, 6);
        assert_eq!(RESERVED_OFFSET, NAME_RANGE.end);
        assert_eq!(RESERVED_OFFSET + 1, VOICE_SIZE);
    }
}
