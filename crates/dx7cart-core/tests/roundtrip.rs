use dx7cart_core::diff::compare;
use dx7cart_core::generate::{Profile, random_cartridge};
use dx7cart_core::{
    Cartridge, DecodeOptions, Framing, checksum, decode_cartridge, decode_voice, encode_voice,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const HEADER: [u8; 6] = [0xF0, 0x43, 0x00, 0x09, 0x20, 0x00];

/// Random voice data with 7-bit parameters and printable, space-padded names.
fn well_formed_voice_data(rng: &mut StdRng) -> Vec<u8> {
    let mut data = vec![0u8; 4096];
    for block in data.chunks_exact_mut(128) {
        for byte in block.iter_mut() {
            *byte = rng.gen_range(0..=0x7F);
        }
        let name_len = rng.gen_range(0..=6);
        for (i, byte) in block[121..127].iter_mut().enumerate() {
            *byte = if i < name_len {
                rng.gen_range(0x21..=0x7E)
            } else {
                b' '
            };
        }
    }
    data
}

fn frame(voice_data: &[u8]) -> Vec<u8> {
    let mut data = HEADER.to_vec();
    data.extend_from_slice(voice_data);
    data.push(checksum::compute(voice_data));
    data.push(0xF7);
    data
}

#[test]
fn framed_bytes_round_trip_exactly() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..20 {
        let data = frame(&well_formed_voice_data(&mut rng));
        let cartridge = decode_cartridge(&data, Framing::SysEx, &DecodeOptions::strict()).unwrap();
        let encoded = cartridge.to_bytes().unwrap();
        assert!(compare(&data, &encoded).is_identical());
    }
}

#[test]
fn bare_bytes_round_trip_through_voice_data() {
    let mut rng = StdRng::seed_from_u64(11);
    let data = well_formed_voice_data(&mut rng);
    let cartridge = decode_cartridge(&data, Framing::Bare, &DecodeOptions::strict()).unwrap();
    assert_eq!(cartridge.to_voice_data().unwrap(), data);
    assert_eq!(&cartridge.to_bytes().unwrap()[6..4102], data.as_slice());
}

#[test]
fn records_round_trip_through_bytes() {
    let original = random_cartridge(&mut StdRng::seed_from_u64(5), Profile::Uniform).unwrap();
    let bytes = original.to_bytes().unwrap();
    let decoded = decode_cartridge(&bytes, Framing::SysEx, &DecodeOptions::strict()).unwrap();
    assert_eq!(decoded.voices(), original.voices());

    for voice in original.voices() {
        let block = encode_voice(voice).unwrap();
        assert_eq!(&decode_voice(&block, &DecodeOptions::strict()).unwrap(), voice);
    }
}

#[test]
fn edited_voice_changes_only_its_slot() {
    let mut rng = StdRng::seed_from_u64(77);
    let data = frame(&well_formed_voice_data(&mut rng));
    let mut cartridge = decode_cartridge(&data, Framing::SysEx, &DecodeOptions::strict()).unwrap();
    let voice = cartridge.voice_mut(12).unwrap();
    voice.lfo_speed = (voice.lfo_speed + 1) % 100;

    let encoded = cartridge.to_bytes().unwrap();
    let diff = compare(&data, &encoded);
    let offsets: Vec<usize> = diff.differences.iter().map(|d| d.index).collect();
    assert_eq!(offsets, vec![6 + 12 * 128 + 113, 4102]);
}

#[test]
fn fresh_cartridge_declares_sysex() {
    let cartridge = Cartridge::new(std::array::from_fn(|_| dx7cart_core::VoiceRecord::init()));
    let bytes = cartridge.to_bytes().unwrap();
    let decoded = decode_cartridge(&bytes, Framing::SysEx, &DecodeOptions::strict()).unwrap();
    assert_eq!(decoded, cartridge);
}
