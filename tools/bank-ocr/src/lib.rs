//! Bank OCR
//!
//! Decodes account numbers from fixed-width printer output: each entry is
//! three lines of 27 characters, nine 3x3 cells of pipes and underscores
//! per line. Unreadable cells decode to `?`. An optional checksum policy
//! validates decoded numbers, and invalid entries go through a single-cell
//! correction pass that proposes every one-stroke repair yielding a valid
//! account number.
//!
//! This tool shares no code path with the matching engine; it lives in the
//! same workspace only.

use std::fmt;
use thiserror::Error;

/// Digits per entry
pub const ENTRY_DIGITS: usize = 9;
/// Character columns per entry line
pub const ENTRY_WIDTH: usize = 27;

/// One 3x3 glyph cell, row-major
pub type Glyph = [[u8; 3]; 3];

const STROKES: [u8; 3] = [b' ', b'|', b'_'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OcrError {
    #[error("malformed entry: {reason}")]
    MalformedEntry { reason: String },
}

impl OcrError {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            reason: reason.into(),
        }
    }
}

/// Validation policy for decoded account numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// Only require nine readable digits
    Shape,
    /// Require nine readable digits and a passing checksum
    ShapeAndChecksum,
}

/// Decode one glyph cell to its digit
fn digit_for(glyph: &Glyph) -> Option<char> {
    let rows = [&glyph[0], &glyph[1], &glyph[2]];
    match rows {
        [b"   ", b"  |", b"  |"] => Some('1'),
        [b" _ ", b" _|", b"|_ "] => Some('2'),
        [b" _ ", b" _|", b" _|"] => Some('3'),
        [b"   ", b"|_|", b"  |"] => Some('4'),
        [b" _ ", b"|_ ", b" _|"] => Some('5'),
        [b" _ ", b"|_ ", b"|_|"] => Some('6'),
        [b" _ ", b"  |", b"  |"] => Some('7'),
        [b" _ ", b"|_|", b"|_|"] => Some('8'),
        [b" _ ", b"|_|", b" _|"] => Some('9'),
        [b" _ ", b"| |", b"|_|"] => Some('0'),
        _ => None,
    }
}

/// The canonical rows for a digit, for fixture generation and display
pub fn glyph_rows(digit: char) -> Option<[&'static str; 3]> {
    let rows = match digit {
        '1' => ["   ", "  |", "  |"],
        '2' => [" _ ", " _|", "|_ "],
        '3' => [" _ ", " _|", " _|"],
        '4' => ["   ", "|_|", "  |"],
        '5' => [" _ ", "|_ ", " _|"],
        '6' => [" _ ", "|_ ", "|_|"],
        '7' => [" _ ", "  |", "  |"],
        '8' => [" _ ", "|_|", "|_|"],
        '9' => [" _ ", "|_|", " _|"],
        '0' => [" _ ", "| |", "|_|"],
        _ => return None,
    };
    Some(rows)
}

/// Render an account number back into entry lines
pub fn render(account: &str) -> Option<[String; 3]> {
    let mut lines = [String::new(), String::new(), String::new()];
    for digit in account.chars() {
        let rows = glyph_rows(digit)?;
        for (line, row) in lines.iter_mut().zip(rows) {
            line.push_str(row);
        }
    }
    Some(lines)
}

/// Position-weighted checksum: `sum(position_from_right * digit) mod 11`
///
/// Returns None when the account contains an unreadable digit.
pub fn checksum(account: &str) -> Option<u32> {
    let digits: Vec<u32> = account.chars().map(|c| c.to_digit(10)).collect::<Option<_>>()?;
    let total: u32 = digits
        .iter()
        .rev()
        .zip(1u32..)
        .map(|(digit, position)| digit * position)
        .sum();
    Some(total % 11)
}

fn is_legible(account: &str) -> bool {
    !account.contains('?')
}

fn is_valid(account: &str, policy: Validation) -> bool {
    match policy {
        Validation::Shape => is_legible(account),
        Validation::ShapeAndChecksum => checksum(account) == Some(0),
    }
}

/// Annotate an account string the way the report prints it
fn annotate(account: &str, policy: Validation) -> String {
    if !is_legible(account) {
        format!("{account} ILL")
    } else if policy == Validation::ShapeAndChecksum && checksum(account) != Some(0) {
        format!("{account} ERR")
    } else {
        account.to_string()
    }
}

/// One scanned entry: nine glyph cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    glyphs: [Glyph; ENTRY_DIGITS],
}

impl Entry {
    /// Parse the three text lines of one entry
    ///
    /// Short lines are padded with spaces; lines longer than 27 columns
    /// are rejected.
    pub fn parse(lines: &[&str]) -> Result<Self, OcrError> {
        if lines.len() != 3 {
            return Err(OcrError::malformed(format!(
                "expected 3 lines, got {}",
                lines.len()
            )));
        }

        let mut rows = [[0u8; ENTRY_WIDTH]; 3];
        for (row, line) in rows.iter_mut().zip(lines) {
            let bytes = line.as_bytes();
            if bytes.len() > ENTRY_WIDTH {
                return Err(OcrError::malformed(format!(
                    "line is {} columns, max {ENTRY_WIDTH}",
                    bytes.len()
                )));
            }
            row.fill(b' ');
            row[..bytes.len()].copy_from_slice(bytes);
        }

        let mut glyphs = [[[0u8; 3]; 3]; ENTRY_DIGITS];
        for (position, glyph) in glyphs.iter_mut().enumerate() {
            for row in 0..3 {
                let start = position * 3;
                glyph[row].copy_from_slice(&rows[row][start..start + 3]);
            }
        }
        Ok(Self { glyphs })
    }

    /// Decode to nine characters, `?` for unreadable cells
    pub fn decode(&self) -> String {
        self.glyphs
            .iter()
            .map(|g| digit_for(g).unwrap_or('?'))
            .collect()
    }

    /// Produce the report line for this entry
    ///
    /// A valid decoding is returned as-is. Otherwise every one-stroke
    /// repair of every cell is tried: exactly one valid candidate wins;
    /// several produce an AMB report; none leaves the annotated original.
    pub fn report(&self, policy: Validation) -> String {
        let account = self.decode();
        if is_valid(&account, policy) {
            return account;
        }

        let candidates = self.corrections(&account, policy);
        match candidates.as_slice() {
            [only] => only.clone(),
            [] => annotate(&account, policy),
            many => format!("{account} AMB {many:?}"),
        }
    }

    /// All valid account numbers reachable by rewriting one cell of one
    /// glyph, sorted ascending
    fn corrections(&self, account: &str, policy: Validation) -> Vec<String> {
        let mut candidates = Vec::new();
        let original: Vec<char> = account.chars().collect();

        for (position, glyph) in self.glyphs.iter().enumerate() {
            for digit in alternate_digits(glyph) {
                let mut rewritten = original.clone();
                rewritten[position] = digit;
                let candidate: String = rewritten.iter().collect();
                if is_valid(&candidate, policy) {
                    candidates.push(candidate);
                }
            }
        }
        candidates.sort();
        candidates.dedup();
        candidates
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.decode())
    }
}

/// Digits readable after changing exactly one cell of the glyph to a
/// different stroke, excluding the glyph's own digit
fn alternate_digits(glyph: &Glyph) -> Vec<char> {
    let own = digit_for(glyph);
    let mut digits = Vec::new();
    for row in 0..3 {
        for col in 0..3 {
            for stroke in STROKES {
                if glyph[row][col] == stroke {
                    continue;
                }
                let mut repaired = *glyph;
                repaired[row][col] = stroke;
                if let Some(digit) = digit_for(&repaired) {
                    if Some(digit) != own {
                        digits.push(digit);
                    }
                }
            }
        }
    }
    digits
}
