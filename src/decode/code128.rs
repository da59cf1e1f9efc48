//! # Code 128 Row Reader
//!
//! Decodes one binarized scanline into Code 128 text.
//!
//! ## Approach
//!
//! The reliable anchor in a Code 128 scanline is the STOP pattern: the
//! only 7-run symbol, 13 modules wide. The reader finds it first, then
//! walks *backwards* through 6-run symbols until it meets a start code.
//! Anchoring on STOP sidesteps the "which run does the barcode start on"
//! ambiguity that plagues forward scanning through quiet-zone noise.
//!
//! Each candidate window is normalized to its nominal module sum (11, or
//! 13 for STOP) before table lookup, so the reader tolerates the ±1 pixel
//! run distortion that nearest-neighbor rescaling introduces. A symbol is
//! accepted only within Manhattan distance 1 of a table entry, and the
//! whole read is accepted only if the mod-103 checksum verifies.

use crate::symbology::code128::PATTERNS;

/// STOP pattern runs (13 modules over 7 runs).
const STOP_RUNS: [u8; 7] = [2, 3, 3, 1, 1, 1, 2];

/// Fewest runs a plausible barcode can have:
/// start (6) + one symbol (6) + checksum (6) + stop (7).
const MIN_RUNS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeSet {
    A,
    B,
    C,
}

impl CodeSet {
    fn start_value(self) -> u32 {
        match self {
            CodeSet::A => 103,
            CodeSet::B => 104,
            CodeSet::C => 105,
        }
    }
}

/// Try to decode one scanline's runs as Code 128.
///
/// `first_black` tells whether `runs[0]` is a bar, which pins bar/space
/// parity for every window.
pub fn decode_runs(first_black: bool, runs: &[usize]) -> Option<String> {
    if runs.len() < MIN_RUNS {
        return None;
    }

    let table = pattern_table();
    let is_bar = |i: usize| (i % 2 == 0) == first_black;

    // Every 7-run window starting on a bar that normalizes to the STOP
    // pattern is a candidate; data windows can masquerade as STOP, so try
    // each one — impostors die on the checksum.
    (MIN_RUNS - 7..=runs.len() - 7)
        .filter(|&i| is_bar(i) && distance7(normalize::<7>(&runs[i..i + 7], 13), STOP_RUNS) <= 1)
        .find_map(|stop_at| decode_from_stop(runs, stop_at, &table))
}

/// Walk backwards from a STOP candidate and decode if everything checks
/// out.
fn decode_from_stop(runs: &[usize], stop_at: usize, table: &[[u8; 6]; 106]) -> Option<String> {
    // Walk backwards in 6-run symbols until a start code shows up.
    let mut idx = stop_at;
    let mut reversed: Vec<u8> = Vec::new(); // checksum then payload, right to left
    let mut start_set: Option<CodeSet> = None;

    while idx >= 6 {
        let window = normalize::<6>(&runs[idx - 6..idx], 11);
        let (value, dist) = best_match(window, table);
        if dist > 1 {
            return None;
        }
        match value {
            103 => {
                start_set = Some(CodeSet::A);
                break;
            }
            104 => {
                start_set = Some(CodeSet::B);
                break;
            }
            105 => {
                start_set = Some(CodeSet::C);
                break;
            }
            v => reversed.push(v as u8),
        }
        idx -= 6;
    }

    let start_set = start_set?;
    if reversed.is_empty() {
        return None; // not even a checksum symbol
    }

    reversed.reverse();
    let values = reversed; // [payload..., checksum]

    // Verify checksum over the payload only.
    let payload_len = values.len() - 1;
    let mut sum = start_set.start_value();
    for (i, &v) in values[..payload_len].iter().enumerate() {
        sum = sum.wrapping_add(u32::from(v) * (i as u32 + 1));
    }
    if sum % 103 != u32::from(values[payload_len]) {
        return None;
    }

    values_to_text(&values[..payload_len], start_set)
}

/// Normalize a run window to `target` total modules, each run 1..=4.
fn normalize<const N: usize>(window: &[usize], target: i32) -> [u8; N] {
    debug_assert_eq!(window.len(), N);
    let sum: usize = window.iter().sum();
    let scale = sum as f32 / target as f32;
    let mut out = [0u8; N];
    for (slot, &run) in out.iter_mut().zip(window) {
        let v = (run as f32 / scale).round() as i32;
        *slot = v.clamp(1, 4) as u8;
    }
    nudge_to_sum(&mut out, target);
    out
}

/// Nudge rounded module widths until they add up to `target`, taking from
/// the widest and giving to the narrowest.
fn nudge_to_sum(values: &mut [u8], target: i32) {
    let mut sum: i32 = values.iter().map(|&v| i32::from(v)).sum();
    while sum > target {
        let Some(i) = widest_above(values, 1) else { break };
        values[i] -= 1;
        sum -= 1;
    }
    while sum < target {
        let Some(i) = narrowest_below(values, 4) else { break };
        values[i] += 1;
        sum += 1;
    }
}

fn widest_above(values: &[u8], floor: u8) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v > floor)
        .max_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
}

fn narrowest_below(values: &[u8], ceil: u8) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v < ceil)
        .min_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
}

/// The run-length table for symbol values 0..=105, parsed once per call
/// site from the shared pattern strings.
fn pattern_table() -> [[u8; 6]; 106] {
    let mut table = [[0u8; 6]; 106];
    for (value, row) in table.iter_mut().enumerate() {
        let pattern = PATTERNS[value].as_bytes();
        for (slot, &digit) in row.iter_mut().zip(pattern) {
            *slot = digit - b'0';
        }
    }
    table
}

fn distance6(p: [u8; 6], q: [u8; 6]) -> u32 {
    p.iter()
        .zip(&q)
        .map(|(&a, &b)| (i32::from(a) - i32::from(b)).unsigned_abs())
        .sum()
}

fn distance7(p: [u8; 7], q: [u8; 7]) -> u32 {
    p.iter()
        .zip(&q)
        .map(|(&a, &b)| (i32::from(a) - i32::from(b)).unsigned_abs())
        .sum()
}

/// Closest table entry and its distance.
fn best_match(window: [u8; 6], table: &[[u8; 6]; 106]) -> (usize, u32) {
    let mut best = (0usize, u32::MAX);
    for (value, &entry) in table.iter().enumerate() {
        let d = distance6(window, entry);
        if d < best.1 {
            best = (value, d);
            if d == 0 {
                break;
            }
        }
    }
    best
}

/// Map decoded symbol values to text, tracking code set switches, SHIFT
/// and FNC1 (emitted as ASCII GS, the convention scanners use).
fn values_to_text(values: &[u8], start: CodeSet) -> Option<String> {
    let mut set = start;
    let mut shifted: Option<CodeSet> = None;
    let mut out = String::new();

    for &value in values {
        let v = u32::from(value);
        let active = shifted.take().unwrap_or(set);
        match active {
            CodeSet::A => match v {
                0..=63 => out.push(char::from((v + 32) as u8)),
                64..=95 => out.push(char::from((v - 64) as u8)),
                96 | 97 | 101 => {} // FNC3 / FNC2 / FNC4
                98 => shifted = Some(CodeSet::B),
                99 => set = CodeSet::C,
                100 => set = CodeSet::B,
                102 => out.push('\u{1d}'), // FNC1
                _ => return None,
            },
            CodeSet::B => match v {
                0..=95 => out.push(char::from((v + 32) as u8)),
                96 | 97 | 100 => {} // FNC3 / FNC2 / FNC4
                98 => shifted = Some(CodeSet::A),
                99 => set = CodeSet::C,
                101 => set = CodeSet::A,
                102 => out.push('\u{1d}'),
                _ => return None,
            },
            CodeSet::C => match v {
                0..=99 => {
                    out.push(char::from(b'0' + (v / 10) as u8));
                    out.push(char::from(b'0' + (v % 10) as u8));
                }
                100 => set = CodeSet::B,
                101 => set = CodeSet::A,
                102 => out.push('\u{1d}'),
                _ => return None,
            },
        }
    }
    Some(out)
}
