//! Node labels for cause and effect variables.
//!
//! Causes are `A, B, ..., Z, AA, AB, ...`; effects carry a trailing prime.

/// Spreadsheet-style label of cause `index`.
pub fn cause_label(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

pub fn effect_label(index: usize) -> String {
    format!("{}'", cause_label(index))
}
