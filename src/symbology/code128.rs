//! # Code 128 Tables
//!
//! Module pattern table, subset-B value mapping and checksum for Code 128.
//!
//! ## Symbol Structure
//!
//! Every Code 128 symbol value 0–105 is drawn as 6 alternating bar/space
//! runs whose widths (1–4 modules) sum to 11. The STOP symbol (value 106)
//! is the one exception: 7 runs summing to 13 modules.
//!
//! ```text
//! value 0  = "212222"  →  ██ █ ██ ██ ██ ██   (2+1+2+2+2+2 = 11 modules)
//! STOP     = "2331112" →  13 modules, ends on a bar
//! ```
//!
//! A complete barcode is `START-B · data symbols · checksum · STOP`, which
//! is where [`total_modules`] gets its `11*(1+len) + 11 + 13` shape.

/// Run-length patterns for symbol values 0–106.
///
/// Index 0–102 are data/control symbols, 103–105 the START A/B/C codes,
/// 106 the STOP pattern. Digits are module widths; even positions are
/// bars, odd positions spaces.
pub const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", // 0-4
    "131222", "122213", "122312", "132212", "221213", // 5-9
    "221312", "231212", "112232", "122132", "122231", // 10-14
    "113222", "123122", "123221", "223211", "221132", // 15-19
    "221231", "213212", "223112", "312131", "311222", // 20-24
    "321122", "321221", "312212", "322112", "322211", // 25-29
    "212123", "212321", "232121", "111323", "131123", // 30-34
    "131321", "112313", "132113", "132311", "211313", // 35-39
    "231113", "231311", "112133", "112331", "132131", // 40-44
    "113123", "113321", "133121", "313121", "211331", // 45-49
    "231131", "213113", "213311", "213131", "311123", // 50-54
    "311321", "331121", "312113", "312311", "332111", // 55-59
    "314111", "221411", "431111", "111224", "111422", // 60-64
    "121124", "121421", "141122", "141221", "112214", // 65-69
    "112412", "122114", "122411", "142112", "142211", // 70-74
    "241211", "221114", "413111", "241112", "134111", // 75-79
    "111242", "121142", "121241", "114212", "124112", // 80-84
    "124211", "411212", "421112", "421211", "212141", // 85-89
    "214121", "412121", "111143", "111341", "131141", // 90-94
    "114113", "114311", "411113", "411311", "113141", // 95-99
    "114131", "311141", "411131", "211412", "211214", // 100-104
    "211232", // 105 (START C)
    "2331112", // 106 (STOP) - 13 modules
];

/// Symbol value of the START B code.
pub const START_B: u8 = 104;

/// Symbol value of the STOP pattern.
pub const STOP: u8 = 106;

/// Modules in every non-STOP symbol.
pub const SYMBOL_MODULES: u32 = 11;

/// Modules in the STOP pattern.
pub const STOP_MODULES: u32 = 13;

/// Subset-B symbol value for a character.
///
/// ASCII 32–127 maps to 0–95. Anything outside that range degrades to 0
/// (the space symbol) rather than panicking; upstream escaping and
/// validation keep such characters from reaching this table in practice.
pub fn symbol_value(c: char) -> u8 {
    let b = c as u32;
    if (32..=127).contains(&b) {
        (b - 32) as u8
    } else {
        0
    }
}

/// Code 128 checksum over subset-B data.
///
/// `start` is the symbol value of the start code (always [`START_B`] for
/// this encoder). Each data symbol is weighted by its 1-indexed position;
/// the result is reduced mod 103 and lies in `0..=102`.
pub fn checksum(data: &str, start: u32) -> u32 {
    let mut sum = start;
    for (i, c) in data.chars().enumerate() {
        sum += u32::from(symbol_value(c)) * (i as u32 + 1);
    }
    sum % 103
}

/// The full ordered symbol sequence for `data`:
/// `START-B, data values, checksum, STOP`.
pub fn symbol_sequence(data: &str) -> Vec<u8> {
    let mut seq = Vec::with_capacity(data.chars().count() + 3);
    seq.push(START_B);
    seq.extend(data.chars().map(symbol_value));
    seq.push(checksum(data, u32::from(START_B)) as u8);
    seq.push(STOP);
    seq
}

/// Total module count of a rendered barcode for a payload of `len`
/// characters: START + data + checksum (11 modules each) + STOP (13).
pub fn total_modules(len: usize) -> u32 {
    SYMBOL_MODULES * (1 + len as u32) + SYMBOL_MODULES + STOP_MODULES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_module_sums() {
        // Values 0-105 are 11 modules, STOP is 13.
        for (value, pattern) in PATTERNS.iter().enumerate() {
            let sum: u32 = pattern.bytes().map(|b| u32::from(b - b'0')).sum();
            if value == usize::from(STOP) {
                assert_eq!(sum, STOP_MODULES, "STOP pattern");
            } else {
                assert_eq!(sum, SYMBOL_MODULES, "pattern {}", value);
            }
        }
    }

    #[test]
    fn test_symbol_value_subset_b() {
        assert_eq!(symbol_value(' '), 0);
        assert_eq!(symbol_value('!'), 1);
        assert_eq!(symbol_value('0'), 16);
        assert_eq!(symbol_value('A'), 33);
        assert_eq!(symbol_value('~'), 94);
    }

    #[test]
    fn test_symbol_value_out_of_range_degrades() {
        assert_eq!(symbol_value('\x01'), 0);
        assert_eq!(symbol_value('é'), 0);
    }

    #[test]
    fn test_checksum_in_range() {
        for data in ["A", "PART12345", "Hello World", "~~~~~~~~"] {
            let c = checksum(data, u32::from(START_B));
            assert!(c <= 102, "checksum {} for {:?}", c, data);
        }
    }

    #[test]
    fn test_checksum_known_value() {
        // START-B(104) + 'A'(33)*1 = 137; 137 % 103 = 34
        assert_eq!(checksum("A", u32::from(START_B)), 34);
        // 104 + 'A'*1 + 'B'*2 = 104 + 33 + 68 = 205; 205 % 103 = 102
        assert_eq!(checksum("AB", u32::from(START_B)), 102);
    }

    #[test]
    fn test_symbol_sequence_shape() {
        let seq = symbol_sequence("PART");
        assert_eq!(seq.len(), 4 + 3); // START + 4 data + checksum + STOP
        assert_eq!(seq[0], START_B);
        assert_eq!(*seq.last().unwrap(), STOP);
        assert_eq!(seq[1], symbol_value('P'));
    }

    #[test]
    fn test_total_modules() {
        // START(11) + 9 chars (99) + checksum(11) + STOP(13) = 134
        assert_eq!(total_modules(9), 134);
        assert_eq!(total_modules(1), 46);
    }
}
