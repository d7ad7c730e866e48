//! Zahlen-Tabelle: Ziffer 0-9 → Segment-Muster
//!
//! Die Tabelle hängt vollständig von der Verdrahtung ab (siehe
//! [`WIRING_ORDER`](crate::WIRING_ORDER)) und ist deshalb als flache,
//! direkt editierbare Konstante hinterlegt.

use core::fmt;

use crate::segments::{SEGMENTS_PER_DIGIT, SegmentPattern};

/// Anzahl der Zeilen (Ziffern 0-9)
pub const DIGIT_COUNT: usize = 10;

/// Roh-Format der Tabelle: 10 Zeilen × 7 Segmente
pub type RawTable = [[u8; SEGMENTS_PER_DIGIT]; DIGIT_COUNT];

/// Segment-Tabelle für die eingebaute Verdrahtung (Mitte zuerst, dann im Uhrzeigersinn)
///
/// Zeile 2 ("Zwei") ist gegenüber [`LEGACY_NUMBER_MATRIX`] korrigiert:
/// der Wert `3` im letzten Segment ist durch `1` ersetzt.
#[rustfmt::skip]
pub const NUMBER_MATRIX: RawTable = [
    [0, 1, 1, 1, 1, 1, 1], // Null
    [0, 1, 0, 0, 0, 0, 1], // Eins
    [1, 1, 1, 0, 1, 1, 1], // Zwei
    [1, 1, 1, 0, 0, 1, 1], // Drei
    [1, 1, 0, 1, 0, 0, 1], // Vier
    [1, 0, 1, 1, 0, 1, 1], // Fünf
    [1, 0, 1, 1, 1, 1, 1], // Sechs
    [0, 1, 1, 0, 0, 0, 1], // Sieben
    [1, 1, 1, 1, 1, 1, 1], // Acht
    [1, 1, 1, 1, 0, 1, 1], // Neun
];

/// Tabelle vor der Korrektur von Zeile 2
///
/// Enthält in Zeile 2 den Wert `3` und besteht deshalb die Validierung
/// nicht. Nur noch für Kompatibilitäts-Tests vorhanden.
#[rustfmt::skip]
pub const LEGACY_NUMBER_MATRIX: RawTable = [
    [0, 1, 1, 1, 1, 1, 1],
    [0, 1, 0, 0, 0, 0, 1],
    [1, 1, 1, 0, 1, 1, 3],
    [1, 1, 1, 0, 0, 1, 1],
    [1, 1, 0, 1, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1],
    [1, 0, 1, 1, 1, 1, 1],
    [0, 1, 1, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 0, 1, 1],
];

// Die eingebaute Tabelle wird schon beim Kompilieren geprüft
const _: () = assert!(first_malformed_cell(&NUMBER_MATRIX).is_none());

/// Fehler: Ziffer außerhalb von 0..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDigitError {
    pub digit: i32,
}

impl fmt::Display for InvalidDigitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid digit {} (expected 0..=9)", self.digit)
    }
}

impl core::error::Error for InvalidDigitError {}

/// Fehler: Tabelle entspricht nicht dem 10×7-Format mit Werten aus {0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPatternError {
    /// Falsche Anzahl Zeilen
    RowCount { rows: usize },
    /// Zeile hat nicht genau 7 Einträge
    RowLength { row: usize, len: usize },
    /// Wert außerhalb von {0, 1}
    Value { row: usize, column: usize, value: u8 },
}

impl fmt::Display for MalformedPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowCount { rows } => {
                write!(f, "table has {} rows (expected {})", rows, DIGIT_COUNT)
            }
            Self::RowLength { row, len } => write!(
                f,
                "row {} has {} segments (expected {})",
                row, len, SEGMENTS_PER_DIGIT
            ),
            Self::Value { row, column, value } => write!(
                f,
                "row {} column {} has value {} (expected 0 or 1)",
                row, column, value
            ),
        }
    }
}

impl core::error::Error for MalformedPatternError {}

/// Liefert die erste Zelle mit einem Wert außerhalb von {0, 1}
const fn first_malformed_cell(rows: &RawTable) -> Option<(usize, usize, u8)> {
    let mut row = 0;
    while row < DIGIT_COUNT {
        let mut column = 0;
        while column < SEGMENTS_PER_DIGIT {
            let value = rows[row][column];
            if value > 1 {
                return Some((row, column, value));
            }
            column += 1;
        }
        row += 1;
    }
    None
}

/// Validierte, unveränderliche Segment-Tabelle
///
/// Die Tabelle ist `Copy` und enthält keinen inneren Zustand; sie kann
/// beliebig vielen Lesern gleichzeitig ohne Synchronisation dienen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTable", into = "RawTable")
)]
pub struct DigitTable {
    rows: RawTable,
}

impl DigitTable {
    /// Die eingebaute Tabelle ([`NUMBER_MATRIX`])
    pub const BUILTIN: Self = Self {
        rows: NUMBER_MATRIX,
    };

    /// Validiert eine 10×7-Tabelle
    pub const fn new(rows: RawTable) -> Result<Self, MalformedPatternError> {
        match first_malformed_cell(&rows) {
            Some((row, column, value)) => Err(MalformedPatternError::Value { row, column, value }),
            None => Ok(Self { rows }),
        }
    }

    /// Validiert eine Tabelle mit beliebiger Form (z.B. aus einer Konfigurationsdatei)
    pub fn from_rows(rows: &[&[u8]]) -> Result<Self, MalformedPatternError> {
        if rows.len() != DIGIT_COUNT {
            return Err(MalformedPatternError::RowCount { rows: rows.len() });
        }

        let mut table = [[0u8; SEGMENTS_PER_DIGIT]; DIGIT_COUNT];
        for (index, (target, source)) in table.iter_mut().zip(rows).enumerate() {
            *target = (*source)
                .try_into()
                .map_err(|_| MalformedPatternError::RowLength {
                    row: index,
                    len: source.len(),
                })?;
        }

        Self::new(table)
    }

    /// Ziffer → Segment-Muster
    ///
    /// # Beispiele
    ///
    /// ```
    /// # use clock_core::DigitTable;
    /// let eight = DigitTable::BUILTIN.resolve(8).unwrap();
    /// assert_eq!(eight, [1, 1, 1, 1, 1, 1, 1]);
    /// assert!(DigitTable::BUILTIN.resolve(10).is_err());
    /// ```
    pub fn resolve(&self, digit: i32) -> Result<SegmentPattern, InvalidDigitError> {
        usize::try_from(digit)
            .ok()
            .and_then(|index| self.rows.get(index))
            .map(|row| SegmentPattern::from_row(*row))
            .ok_or(InvalidDigitError { digit })
    }

    pub const fn rows(&self) -> &RawTable {
        &self.rows
    }
}

impl Default for DigitTable {
    fn default() -> Self {
        Self::BUILTIN
    }
}

impl TryFrom<RawTable> for DigitTable {
    type Error = MalformedPatternError;

    fn try_from(rows: RawTable) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<DigitTable> for RawTable {
    fn from(table: DigitTable) -> Self {
        table.rows
    }
}

/// Ziffer → Segment-Muster über die eingebaute Tabelle
pub fn resolve(digit: i32) -> Result<SegmentPattern, InvalidDigitError> {
    DigitTable::BUILTIN.resolve(digit)
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for InvalidDigitError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "InvalidDigit({})", self.digit)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MalformedPatternError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::RowCount { rows } => defmt::write!(fmt, "MalformedPattern {{ rows: {} }}", rows),
            Self::RowLength { row, len } => {
                defmt::write!(fmt, "MalformedPattern {{ row: {}, len: {} }}", row, len)
            }
            Self::Value { row, column, value } => defmt::write!(
                fmt,
                "MalformedPattern {{ row: {}, column: {}, value: {} }}",
                row,
                column,
                value
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_zero() {
        assert_eq!(resolve(0).unwrap(), [0, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_resolve_one() {
        assert_eq!(resolve(1).unwrap(), [0, 1, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_resolve_two_is_corrected() {
        assert_eq!(resolve(2).unwrap(), [1, 1, 1, 0, 1, 1, 1]);
    }

    #[test]
    fn test_resolve_eight_all_lit() {
        assert_eq!(resolve(8).unwrap().lit_count(), SEGMENTS_PER_DIGIT);
    }

    #[test]
    fn test_resolve_out_of_range() {
        assert_eq!(resolve(-1), Err(InvalidDigitError { digit: -1 }));
        assert_eq!(resolve(10), Err(InvalidDigitError { digit: 10 }));
        assert_eq!(
            resolve(i32::MIN),
            Err(InvalidDigitError { digit: i32::MIN })
        );
    }

    #[test]
    fn test_legacy_table_rejected() {
        assert_eq!(
            DigitTable::new(LEGACY_NUMBER_MATRIX),
            Err(MalformedPatternError::Value {
                row: 2,
                column: 6,
                value: 3
            })
        );
    }

    #[test]
    fn test_legacy_differs_only_in_row_two() {
        for digit in 0..DIGIT_COUNT {
            if digit == 2 {
                assert_ne!(LEGACY_NUMBER_MATRIX[digit], NUMBER_MATRIX[digit]);
            } else {
                assert_eq!(LEGACY_NUMBER_MATRIX[digit], NUMBER_MATRIX[digit]);
            }
        }
    }

    #[test]
    fn test_from_rows_wrong_row_count() {
        let rows: [&[u8]; 2] = [&[0, 1, 1, 1, 1, 1, 1], &[0, 1, 0, 0, 0, 0, 1]];
        assert_eq!(
            DigitTable::from_rows(&rows),
            Err(MalformedPatternError::RowCount { rows: 2 })
        );
    }

    #[test]
    fn test_from_rows_short_row() {
        let blank: &[u8] = &[0; 7];
        let mut rows = [blank; DIGIT_COUNT];
        rows[4] = &[1, 1, 0, 1, 0, 0];
        assert_eq!(
            DigitTable::from_rows(&rows),
            Err(MalformedPatternError::RowLength { row: 4, len: 6 })
        );
    }

    #[test]
    fn test_from_rows_matches_builtin() {
        let matrix = NUMBER_MATRIX;
        let rows: [&[u8]; DIGIT_COUNT] = core::array::from_fn(|i| &matrix[i][..]);
        assert_eq!(DigitTable::from_rows(&rows), Ok(DigitTable::BUILTIN));
    }
}
