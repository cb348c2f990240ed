//! # Physical Quantity Conversions
//!
//! Pure conversions between CC1101 register encodings and physical units:
//! the 24-bit frequency control word, the mantissa/exponent floating-point
//! encodings for symbol rate and channel filter bandwidth, and the preamble
//! length index. All formulas are from the datasheet modem configuration
//! sections and are exact for a 26 MHz crystal.

use crate::constants::{CRYSTAL_OSCILLATOR_FREQUENCY_HERTZ, FREQUENCY_CONTROL_WORD_HERTZ_FACTOR};
use crate::error::DriverError;
use crate::registers;

/// Largest value of the 24-bit frequency control word.
const FREQUENCY_CONTROL_WORD_MAX: u32 = 0x00FF_FFFF;

/// Decodes the FREQ2/FREQ1/FREQ0 register contents (big-endian) into Hertz:
/// `f = word * f_xosc / 2^16`.
pub fn frequency_control_word_to_hertz(word: [u8; 3]) -> f64 {
    let value = u32::from_be_bytes([0, word[0], word[1], word[2]]);
    f64::from(value) * FREQUENCY_CONTROL_WORD_HERTZ_FACTOR
}

/// Encodes a frequency in Hertz into the FREQ2/FREQ1/FREQ0 register bytes,
/// rounding to the nearest control word. Frequencies whose word does not
/// fit 24 bits are rejected rather than truncated.
pub fn hertz_to_frequency_control_word(hertz: f64) -> Result<[u8; 3], DriverError> {
    let word = (hertz / FREQUENCY_CONTROL_WORD_HERTZ_FACTOR).round();
    if !(word >= 0.0 && word <= f64::from(FREQUENCY_CONTROL_WORD_MAX)) {
        return Err(DriverError::FrequencyOutOfRange(hertz));
    }
    let bytes = (word as u32).to_be_bytes();
    Ok([bytes[1], bytes[2], bytes[3]])
}

/// Decodes a symbol rate mantissa/exponent pair into baud:
/// `rate = (256 + M) * 2^E * f_xosc / 2^28` (datasheet section 12).
pub fn symbol_rate_floating_point_to_real(mantissa: u8, exponent: u8) -> f64 {
    (256.0 + f64::from(mantissa)) * f64::from(exponent).exp2()
        * CRYSTAL_OSCILLATOR_FREQUENCY_HERTZ
        / f64::from(1u32 << 28)
}

/// Encodes a symbol rate in baud into a mantissa/exponent pair:
/// `E = floor(log2(rate / f_xosc) + 20)`,
/// `M = round(rate * 2^28 / (f_xosc * 2^E)) - 256`,
/// with a carry into the exponent when the mantissa rounds to exactly 256.
///
/// The validity bounds follow from the DRATE register field widths. An
/// exponent of 16 is a legal encoding result but does not fit the 4-bit
/// DRATE_E field; the register write path rejects it separately.
pub fn symbol_rate_real_to_floating_point(baud: f64) -> Result<(u8, u8), DriverError> {
    if !(baud > 0.0) {
        return Err(DriverError::UnsupportedSymbolRate(baud));
    }
    let mut exponent = ((baud / CRYSTAL_OSCILLATOR_FREQUENCY_HERTZ).log2() + 20.0).floor();
    let mut mantissa = (baud * f64::from(1u32 << 28)
        / (CRYSTAL_OSCILLATOR_FREQUENCY_HERTZ * exponent.exp2())
        - 256.0)
        .round();
    if mantissa == 256.0 {
        exponent += 1.0;
        mantissa = 0.0;
    }
    let max_exponent = f64::from(registers::DRATE_E.max_value()) + 1.0;
    let max_mantissa = f64::from(registers::DRATE_M.max_value()) + 1.0;
    if !(exponent > 0.0 && exponent <= max_exponent) {
        return Err(DriverError::UnsupportedSymbolRate(baud));
    }
    if !(mantissa >= 0.0 && mantissa <= max_mantissa) {
        return Err(DriverError::UnsupportedSymbolRate(baud));
    }
    Ok((mantissa as u8, exponent as u8))
}

/// Decodes a channel filter bandwidth mantissa/exponent pair into Hertz:
/// `bw = f_xosc / (8 * (4 + M) * 2^E)` (datasheet section 13).
///
/// The driver only reads this setting back, so no encode direction exists.
pub fn filter_bandwidth_floating_point_to_real(mantissa: u8, exponent: u8) -> f64 {
    CRYSTAL_OSCILLATOR_FREQUENCY_HERTZ
        / (8.0 * (4.0 + f64::from(mantissa)) * f64::from(exponent).exp2())
}

/// Decodes the 3-bit NUM_PREAMBLE index into a byte count:
/// `bytes = 2^(index >> 1) * (2 + (index & 1))`, giving
/// {2, 3, 4, 6, 8, 12, 16, 24}.
pub fn preamble_length_index_to_bytes(index: u8) -> u8 {
    debug_assert!(index <= 0b111);
    (1 << (index >> 1)) * (2 + (index & 1))
}

/// Encodes a preamble byte count into the 3-bit NUM_PREAMBLE index. Only
/// the eight counts produced by [`preamble_length_index_to_bytes`] are
/// representable; anything else is rejected.
pub fn preamble_length_bytes_to_index(length: u32) -> Result<u8, DriverError> {
    if length < 1 {
        return Err(DriverError::InvalidPreambleLength(length));
    }
    // Odd indices hold multiples of 3, even indices multiples of 2, with a
    // shared power-of-two factor.
    let (base, odd) = if length % 3 == 0 {
        (length / 3, 1)
    } else {
        (length / 2, 0)
    };
    if base == 0 || !base.is_power_of_two() || base * (2 + odd) != length {
        return Err(DriverError::UnsupportedPreambleLength(length));
    }
    let index = 2 * base.trailing_zeros() + odd;
    if index > 0b111 {
        return Err(DriverError::UnsupportedPreambleLength(length));
    }
    Ok(index as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Half of the frequency quantization step, the worst-case rounding
    /// error of an encode/decode round trip.
    const HALF_STEP_HERTZ: f64 = FREQUENCY_CONTROL_WORD_HERTZ_FACTOR / 2.0;

    #[test]
    fn frequency_word_decodes_known_values() {
        let hertz = frequency_control_word_to_hertz([0x10, 0xA7, 0x62]);
        assert!((hertz - 433_000_000.0).abs() <= HALF_STEP_HERTZ);
        let hertz = frequency_control_word_to_hertz([0x21, 0x62, 0x76]);
        assert!((hertz - 868_000_000.0).abs() <= HALF_STEP_HERTZ);
    }

    #[test]
    fn frequency_encodes_known_values() {
        assert_eq!(
            hertz_to_frequency_control_word(433_000_000.0).unwrap(),
            [0x10, 0xA7, 0x62]
        );
        assert_eq!(
            hertz_to_frequency_control_word(868_000_000.0).unwrap(),
            [0x21, 0x62, 0x76]
        );
    }

    #[test]
    fn frequency_rejects_values_outside_the_24_bit_word() {
        assert!(matches!(
            hertz_to_frequency_control_word(7_000_000_000.0),
            Err(DriverError::FrequencyOutOfRange(_))
        ));
        assert!(hertz_to_frequency_control_word(-433_000_000.0).is_err());
        assert!(hertz_to_frequency_control_word(f64::NAN).is_err());
    }

    #[test]
    fn symbol_rate_decodes_smartrf_values() {
        // Reference pairs produced by SmartRF Studio for a 26 MHz crystal.
        assert!((symbol_rate_floating_point_to_real(117, 5) - 1_156.0917).abs() < 0.001);
        assert!((symbol_rate_floating_point_to_real(34, 12) - 115_051.26953125).abs() < 1e-9);
    }

    #[test]
    fn symbol_rate_encodes_smartrf_values() {
        assert_eq!(symbol_rate_real_to_floating_point(1_156.0).unwrap(), (117, 5));
        assert_eq!(
            symbol_rate_real_to_floating_point(115_051.0).unwrap(),
            (34, 12)
        );
    }

    #[test]
    fn symbol_rate_mantissa_carry_rolls_into_the_exponent() {
        // Just below 26e6 * 2^-14 the mantissa rounds to 256 and must carry.
        assert_eq!(symbol_rate_real_to_floating_point(1_586.9).unwrap(), (0, 6));
        assert!(
            (symbol_rate_floating_point_to_real(0, 6) - 1_586.9140625).abs() < 1e-9
        );
    }

    #[test]
    fn symbol_rate_exponent_sixteen_is_a_legal_encoding() {
        // 1_625_000 baud sits exactly on the 2^-4 ratio, producing the
        // boundary pair the register write path later refuses.
        assert_eq!(
            symbol_rate_real_to_floating_point(1_625_000.0).unwrap(),
            (0, 16)
        );
    }

    #[test]
    fn symbol_rate_rejects_unencodable_rates() {
        assert!(symbol_rate_real_to_floating_point(0.0).is_err());
        assert!(symbol_rate_real_to_floating_point(-9_600.0).is_err());
        assert!(symbol_rate_real_to_floating_point(f64::NAN).is_err());
        // Exponent would fall below 1.
        assert!(symbol_rate_real_to_floating_point(10.0).is_err());
        // Exponent would exceed the derived bound of 16.
        assert!(matches!(
            symbol_rate_real_to_floating_point(6_000_000.0),
            Err(DriverError::UnsupportedSymbolRate(_))
        ));
    }

    #[test]
    fn filter_bandwidth_decodes_datasheet_values() {
        assert!((filter_bandwidth_floating_point_to_real(0, 0) - 812_500.0).abs() < 1e-9);
        // MDMCFG4 reset value 0x8C: mantissa 0, exponent 2.
        assert!((filter_bandwidth_floating_point_to_real(0, 2) - 203_125.0).abs() < 1e-9);
        assert!((filter_bandwidth_floating_point_to_real(3, 3) - 58_035.714285714286).abs() < 1e-6);
    }

    #[test]
    fn preamble_length_round_trips_all_eight_indices() {
        let lengths = [2, 3, 4, 6, 8, 12, 16, 24];
        for (index, length) in lengths.iter().enumerate() {
            assert_eq!(preamble_length_index_to_bytes(index as u8), *length);
            assert_eq!(
                preamble_length_bytes_to_index(u32::from(*length)).unwrap(),
                index as u8
            );
        }
    }

    #[test]
    fn preamble_length_rejects_unrepresentable_counts() {
        assert!(matches!(
            preamble_length_bytes_to_index(0),
            Err(DriverError::InvalidPreambleLength(0))
        ));
        for length in [1, 5, 7, 9, 10, 14, 18, 32, 48] {
            assert!(matches!(
                preamble_length_bytes_to_index(length),
                Err(DriverError::UnsupportedPreambleLength(_))
                    | Err(DriverError::InvalidPreambleLength(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn frequency_word_round_trips_exactly(word in 0u32..=0x00FF_FFFF) {
            let bytes = word.to_be_bytes();
            let encoded = [bytes[1], bytes[2], bytes[3]];
            let hertz = frequency_control_word_to_hertz(encoded);
            prop_assert_eq!(hertz_to_frequency_control_word(hertz).unwrap(), encoded);
        }

        #[test]
        fn frequency_hertz_round_trips_within_one_step(
            hertz in 0.0f64..=6_654_000_000.0
        ) {
            let word = hertz_to_frequency_control_word(hertz).unwrap();
            let decoded = frequency_control_word_to_hertz(word);
            prop_assert!((decoded - hertz).abs() <= HALF_STEP_HERTZ);
        }

        #[test]
        fn symbol_rate_pairs_round_trip(mantissa in 0u8..=255, exponent in 1u8..=15) {
            let baud = symbol_rate_floating_point_to_real(mantissa, exponent);
            prop_assert_eq!(
                symbol_rate_real_to_floating_point(baud).unwrap(),
                (mantissa, exponent)
            );
        }
    }
}
