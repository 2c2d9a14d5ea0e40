//! Bulk-dump checksum.
//!
//! The checksum is the two's complement of the byte sum over the voice-data
//! window, reduced to 7 bits so it stays a valid SysEx data byte. Callers pass
//! the window slice explicitly; see `Framing::voice_data_range`.

const DATA_MASK: u32 = 0x7F;
const MODULUS: u32 = 128;

/// Compute the 7-bit checksum of a voice-data window.
///
/// # Examples
/// ```
/// use dx7cart_core::checksum;
///
/// assert_eq!(checksum::compute(&[0u8; 4096]), 0);
/// assert_eq!(checksum::compute(&[5]), 123);
/// ```
pub fn compute(window: &[u8]) -> u8 {
    let sum = window
        .iter()
        .fold(0u32, |acc, byte| acc.wrapping_add(u32::from(*byte)));
    (((MODULUS - sum % MODULUS) % MODULUS) & DATA_MASK) as u8
}

/// Check a declared checksum against the recomputed one.
pub fn validate(window: &[u8], declared: u8) -> bool {
    compute(window) == declared
}

#[cfg(test)]
mod tests {
    use super::{compute, validate};

    #[test]
    fn residue_five_yields_123() {
        let mut window = vec![0u8; 4096];
        window[0] = 100;
        window[4095] = 33;
        assert_eq!((100 + 33) % 128, 5);
        assert_eq!(compute(&window), 123);
        assert!(validate(&window, 123));
        for declared in (0..=255u8).filter(|d| *d != 123) {
            assert!(!validate(&window, declared));
        }
    }

    #[test]
    fn sum_multiple_of_128_yields_zero() {
        let window = vec![0x40u8; 4096];
        assert_eq!(compute(&window), 0);
    }

    #[test]
    fn checksum_is_always_seven_bit() {
        let mut window = vec![0u8; 4096];
        for seed in 0..=255u8 {
            for (i, byte) in window.iter_mut().enumerate() {
                *byte = (i as u8).wrapping_mul(seed).wrapping_add(seed);
            }
            let value = compute(&window);
            assert!(value <= 127);
            assert!(validate(&window, value));
        }
    }

    #[test]
    fn checksum_completes_the_sum() {
        let window: Vec<u8> = (0..4096u32).map(|i| (i % 100) as u8).collect();
        let sum: u32 = window.iter().map(|b| u32::from(*b)).sum();
        assert_eq!((sum + u32::from(compute(&window))) % 128, 0);
    }
}
