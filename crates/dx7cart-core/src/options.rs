/// How the decoder treats voice-name bytes outside printable ASCII.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameLeniency {
    /// Reject the voice with `VoiceError::NonAsciiName`.
    #[default]
    Strict,
    /// Replace each offending byte with `?` and keep decoding.
    Lenient,
}

/// Decoder configuration shared by voice and cartridge parsing.
///
/// # Examples
/// ```
/// use dx7cart_core::{DecodeOptions, NameLeniency};
///
/// let options = DecodeOptions::lenient();
/// assert_eq!(options.names, NameLeniency::Lenient);
/// assert_eq!(DecodeOptions::default().names, NameLeniency::Strict);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub names: NameLeniency,
}

impl DecodeOptions {
    pub fn strict() -> Self {
        Self {
            names: NameLeniency::Strict,
        }
    }

    /// Options for display-only use, where a damaged name must not abort decoding.
    pub fn lenient() -> Self {
        Self {
            names: NameLeniency::Lenient,
        }
    }
}
