use std::fmt;

use super::record::{Envelope, Operator, VoiceRecord};

const RULE_WIDTH: usize = 40;

impl fmt::Display for VoiceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Voice Name: {}", self.name)?;
        // Algorithms are numbered 1..=32 on the front panel.
        writeln!(
            f,
            "Algorithm: {}, Feedback: {}, Oscillator Sync: {}",
            u16::from(self.algorithm) + 1,
            self.feedback,
            self.oscillator_sync
        )?;
        writeln!(f, "Operators:")?;
        for (index, operator) in self.operators.iter().enumerate() {
            writeln!(f, "  Operator {}:", index + 1)?;
            write_operator(f, operator)?;
        }
        writeln!(f, "Pitch EG:")?;
        write_envelope(f, "  ", &self.pitch_envelope)?;
        writeln!(
            f,
            "LFO Speed: {}, LFO Delay: {}, LFO Pitch Mod Depth: {}",
            self.lfo_speed, self.lfo_delay, self.lfo_pitch_mod_depth
        )?;
        writeln!(
            f,
            "LFO Amp Mod Depth: {}, LFO Sync: {}, LFO Waveform: {}",
            self.lfo_amp_mod_depth, self.lfo_sync, self.lfo_waveform
        )?;
        writeln!(
            f,
            "Pitch Mod Sensitivity: {}, Transpose: {}",
            self.pitch_mod_sensitivity, self.transpose
        )?;
        write!(f, "{}", "-".repeat(RULE_WIDTH))
    }
}

fn write_operator(f: &mut fmt::Formatter<'_>, operator: &Operator) -> fmt::Result {
    const INDENT: &str = "    ";
    write_envelope(f, INDENT, &operator.envelope)?;
    let fields = [
        ("break_point", operator.break_point),
        ("left_depth", operator.left_depth),
        ("right_depth", operator.right_depth),
        ("left_curve", operator.left_curve),
        ("right_curve", operator.right_curve),
        ("rate_scaling", operator.rate_scaling),
        ("amp_mod_sensitivity", operator.amp_mod_sensitivity),
        ("key_velocity_sensitivity", operator.key_velocity_sensitivity),
        ("output_level", operator.output_level),
    ];
    for (label, value) in fields {
        writeln!(f, "{INDENT}{label}: {value}")?;
    }
    Ok(())
}

fn write_envelope(f: &mut fmt::Formatter<'_>, indent: &str, envelope: &Envelope) -> fmt::Result {
    for (stage, rate) in envelope.rates.iter().enumerate() {
        writeln!(f, "{indent}rate{}: {rate}", stage + 1)?;
    }
    for (stage, level) in envelope.levels.iter().enumerate() {
        writeln!(f, "{indent}level{}: {level}", stage + 1)?;
    }
    Ok(())
}
