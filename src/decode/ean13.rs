//! # EAN-13 Row Reader
//!
//! Decodes one binarized scanline into 13 digits.
//!
//! ## Structure
//!
//! ```text
//! quiet | 101 | 6 left digits | 01010 | 6 right digits | 101 | quiet
//!         3 runs  4 runs each    5 runs   4 runs each    3 runs
//! ```
//!
//! Left digits use the A or B pattern set; the A/B parity sequence of the
//! six left digits encodes the 13th (leading) digit, which has no bars of
//! its own. Right digits use the C set. Every digit is 7 modules over 4
//! runs, so each 4-run window is normalized to sum 7 before lookup — the
//! same self-normalizing trick the Code 128 reader uses. The read is
//! accepted only if the mod-10 checksum verifies.

/// Left "A" digit patterns as run widths (7 modules over 4 runs).
const LEFT_A: [[u8; 4]; 10] = [
    [3, 2, 1, 1],
    [2, 2, 2, 1],
    [2, 1, 2, 2],
    [1, 4, 1, 1],
    [1, 1, 3, 2],
    [1, 2, 3, 1],
    [1, 1, 1, 4],
    [1, 3, 1, 2],
    [1, 2, 1, 3],
    [3, 1, 1, 2],
];

/// Left "B" digit patterns: the A patterns reversed run-wise.
const LEFT_B: [[u8; 4]; 10] = [
    [1, 1, 2, 3],
    [1, 2, 2, 2],
    [2, 2, 1, 2],
    [1, 1, 4, 1],
    [2, 3, 1, 1],
    [1, 3, 2, 1],
    [4, 1, 1, 1],
    [2, 1, 3, 1],
    [3, 1, 2, 1],
    [2, 1, 1, 3],
];

/// Right-side patterns match A in run widths (colors inverted, which run
/// lengths don't see).
const RIGHT: [[u8; 4]; 10] = LEFT_A;

/// A/B parity of the six left digits, per leading digit. true = B.
const FIRST_DIGIT_PARITY: [[bool; 6]; 10] = [
    [false, false, false, false, false, false], // 0
    [false, false, true, false, true, true],    // 1
    [false, false, true, true, false, true],    // 2
    [false, false, true, true, true, false],    // 3
    [false, true, false, false, true, true],    // 4
    [false, true, true, false, false, true],    // 5
    [false, true, true, true, false, false],    // 6
    [false, true, false, true, false, true],    // 7
    [false, true, false, true, true, false],    // 8
    [false, true, true, false, true, false],    // 9
];

/// Runs from start guard to end guard inclusive:
/// 3 + 6*4 + 5 + 6*4 + 3.
const SYMBOL_RUNS: usize = 59;

/// Try to decode one scanline's runs as EAN-13. Returns all 13 digits.
pub fn decode_runs(first_black: bool, runs: &[usize]) -> Option<String> {
    if runs.len() < SYMBOL_RUNS {
        return None;
    }
    let is_bar = |i: usize| (i % 2 == 0) == first_black;

    (0..=runs.len() - SYMBOL_RUNS)
        .filter(|&i| is_bar(i))
        .find_map(|i| decode_at(&runs[i..i + SYMBOL_RUNS]))
}

/// Decode a 59-run window whose first run is a bar.
fn decode_at(runs: &[usize]) -> Option<String> {
    let unit = guard_unit(&runs[0..3])?;

    let mut idx = 3;
    let mut digits = [0u8; 13];
    let mut left_parity = [false; 6];

    for d in 0..6 {
        let window = normalize4(&runs[idx..idx + 4]);
        let (digit_a, dist_a) = best_digit(window, &LEFT_A);
        let (digit_b, dist_b) = best_digit(window, &LEFT_B);
        if dist_a.min(dist_b) > 1 {
            return None;
        }
        if dist_a <= dist_b {
            digits[1 + d] = digit_a;
        } else {
            digits[1 + d] = digit_b;
            left_parity[d] = true;
        }
        idx += 4;
    }

    if !is_guard(&runs[idx..idx + 5], unit) {
        return None;
    }
    idx += 5;

    for d in 0..6 {
        let window = normalize4(&runs[idx..idx + 4]);
        let (digit, dist) = best_digit(window, &RIGHT);
        if dist > 1 {
            return None;
        }
        digits[7 + d] = digit;
        idx += 4;
    }

    if !is_guard(&runs[idx..idx + 3], unit) {
        return None;
    }

    digits[0] = FIRST_DIGIT_PARITY
        .iter()
        .position(|mask| *mask == left_parity)? as u8;

    if !checksum_ok(&digits) {
        return None;
    }

    Some(digits.iter().map(|&d| char::from(b'0' + d)).collect())
}

/// Mean width of a 1-1-1 guard, if its runs are near-equal.
fn guard_unit(runs: &[usize]) -> Option<f64> {
    let mean = runs.iter().sum::<usize>() as f64 / runs.len() as f64;
    if mean < 1.0 {
        return None;
    }
    for &run in runs {
        let ratio = run as f64 / mean;
        if !(0.55..=1.8).contains(&ratio) {
            return None;
        }
    }
    Some(mean)
}

/// All runs of a guard are about one module wide.
fn is_guard(runs: &[usize], unit: f64) -> bool {
    runs.iter().all(|&run| {
        let ratio = run as f64 / unit;
        (0.4..=1.9).contains(&ratio)
    })
}

/// Normalize a 4-run digit window to 7 modules, each run 1..=4.
fn normalize4(window: &[usize]) -> [u8; 4] {
    let sum: usize = window.iter().sum();
    let scale = sum as f32 / 7.0;
    let mut out = [0u8; 4];
    for (slot, &run) in out.iter_mut().zip(window) {
        let v = (run as f32 / scale).round() as i32;
        *slot = v.clamp(1, 4) as u8;
    }
    // Pull the total back to 7 if rounding drifted
    let mut total: i32 = out.iter().map(|&v| i32::from(v)).sum();
    while total > 7 {
        if let Some((i, _)) = out.iter().enumerate().filter(|&(_, &v)| v > 1).max_by_key(|&(_, &v)| v) {
            out[i] -= 1;
            total -= 1;
        } else {
            break;
        }
    }
    while total < 7 {
        if let Some((i, _)) = out.iter().enumerate().filter(|&(_, &v)| v < 4).min_by_key(|&(_, &v)| v) {
            out[i] += 1;
            total += 1;
        } else {
            break;
        }
    }
    out
}

/// Closest digit in a pattern set and its Manhattan distance.
fn best_digit(window: [u8; 4], set: &[[u8; 4]; 10]) -> (u8, u32) {
    let mut best = (0u8, u32::MAX);
    for (digit, entry) in set.iter().enumerate() {
        let d: u32 = window
            .iter()
            .zip(entry)
            .map(|(&a, &b)| (i32::from(a) - i32::from(b)).unsigned_abs())
            .sum();
        if d < best.1 {
            best = (digit as u8, d);
            if d == 0 {
                break;
            }
        }
    }
    best
}

/// EAN-13 mod-10 checksum: weights 1,3 alternating from the left.
fn checksum_ok(digits: &[u8; 13]) -> bool {
    let sum: u32 = digits[..12]
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    (10 - sum % 10) % 10 == u32::from(digits[12])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::binarize::{binarize_row, runs as row_runs};

    /// Build an ideal pixel row for 13 digits (checksum must be valid).
    fn synthesize_row(digits: &str, unit: usize) -> Vec<u8> {
        let ds: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
        assert_eq!(ds.len(), 13);

        let mut modules: Vec<u8> = vec![9]; // quiet, white
        modules.extend([1, 1, 1]);
        let parity = FIRST_DIGIT_PARITY[ds[0] as usize];
        for (i, &d) in ds[1..7].iter().enumerate() {
            let set = if parity[i] { &LEFT_B } else { &LEFT_A };
            modules.extend(set[d as usize]);
        }
        modules.extend([1, 1, 1, 1, 1]);
        for &d in &ds[7..13] {
            modules.extend(RIGHT[d as usize]);
        }
        modules.extend([1, 1, 1]);
        modules.push(9); // quiet

        let mut pixels = Vec::new();
        let mut black = false;
        for m in modules {
            let value = if black { 0u8 } else { 255u8 };
            pixels.extend(std::iter::repeat_n(value, m as usize * unit));
            black = !black;
        }
        pixels
    }

    fn decode_pixels(row: &[u8]) -> Option<String> {
        let bits = binarize_row(row)?;
        let (first_black, lengths) = row_runs(&bits);
        decode_runs(first_black, &lengths)
    }

    #[test]
    fn test_checksum() {
        // 4006381333931 is a valid EAN-13
        let digits: Vec<u8> = "4006381333931".bytes().map(|b| b - b'0').collect();
        assert!(checksum_ok(&digits.try_into().unwrap()));

        let digits: Vec<u8> = "4006381333932".bytes().map(|b| b - b'0').collect();
        assert!(!checksum_ok(&digits.try_into().unwrap()));
    }

    #[test]
    fn test_decode_ideal_row() {
        let row = synthesize_row("4006381333931", 2);
        assert_eq!(decode_pixels(&row).as_deref(), Some("4006381333931"));
    }

    #[test]
    fn test_decode_leading_zero() {
        // Leading 0 keeps all 13 digits in the result
        let row = synthesize_row("0123456789012", 3);
        assert_eq!(decode_pixels(&row).as_deref(), Some("0123456789012"));
    }

    #[test]
    fn test_decode_various_units() {
        for unit in [1, 2, 4] {
            let row = synthesize_row("9780306406157", unit);
            assert_eq!(
                decode_pixels(&row).as_deref(),
                Some("9780306406157"),
                "unit {}",
                unit
            );
        }
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        // Same bars as a valid code, last digit's pattern swapped
        let mut row = synthesize_row("4006381333931", 2);
        let tampered = synthesize_row("4006381333939", 2);
        assert_eq!(row.len(), tampered.len());
        row.copy_from_slice(&tampered);
        assert_eq!(decode_pixels(&row), None);
    }

    #[test]
    fn test_decode_rejects_blank_and_noise() {
        assert_eq!(decode_pixels(&vec![255u8; 500]), None);
        let stripes: Vec<u8> = (0..500).map(|i| if i % 2 == 0 { 0 } else { 255 }).collect();
        assert_eq!(decode_pixels(&stripes), None);
    }
}
