//! # Row Binarization
//!
//! Turns one greyscale scanline into black/white pixels and run lengths,
//! the raw material for the 1D symbology readers.

/// Binarize a row against the midpoint of its own value range.
///
/// Returns `None` when the row has no usable contrast (flat background,
/// no bars to find).
pub fn binarize_row(row: &[u8]) -> Option<Vec<bool>> {
    let min = *row.iter().min()?;
    let max = *row.iter().max()?;
    if max - min < 32 {
        return None;
    }
    let threshold = min as u16 + (max as u16 - min as u16) / 2;
    Some(row.iter().map(|&p| u16::from(p) < threshold).collect())
}

/// Collapse a binarized row into run lengths.
///
/// Returns the runs and whether the first run is black. Consecutive equal
/// pixels form one run; the list alternates colors from the first.
pub fn runs(bits: &[bool]) -> (bool, Vec<usize>) {
    let mut lengths = Vec::new();
    let Some(&first) = bits.first() else {
        return (false, lengths);
    };
    let mut current = first;
    let mut len = 0usize;
    for &b in bits {
        if b == current {
            len += 1;
        } else {
            lengths.push(len);
            current = b;
            len = 1;
        }
    }
    lengths.push(len);
    (first, lengths)
}
