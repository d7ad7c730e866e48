//! Integration Tests für die Ziffern-Tabelle
//!
//! Diese Tests laufen auf dem Host (x86_64) gegen die öffentliche API von clock-core

use clock_core::{
    DigitTable, InvalidDigitError, LEGACY_NUMBER_MATRIX, MalformedPatternError, NUMBER_MATRIX,
    RawTable, SEGMENTS_PER_DIGIT, SegmentPosition, resolve,
};

// ============================================================================
// Tests: resolve()
// ============================================================================

#[test]
fn test_every_digit_has_seven_segments() {
    for digit in 0..=9 {
        let pattern = resolve(digit).unwrap();
        assert_eq!(pattern.as_array().len(), SEGMENTS_PER_DIGIT);
        assert!(pattern.as_array().iter().all(|&v| v <= 1));
    }
}

#[test]
fn test_known_patterns() {
    assert_eq!(resolve(0).unwrap(), [0, 1, 1, 1, 1, 1, 1]);
    assert_eq!(resolve(1).unwrap(), [0, 1, 0, 0, 0, 0, 1]);
    assert_eq!(resolve(8).unwrap(), [1, 1, 1, 1, 1, 1, 1]);
}

#[test]
fn test_two_uses_corrected_row() {
    // LEGACY_NUMBER_MATRIX hat hier [1,1,1,0,1,1,3]
    assert_eq!(resolve(2).unwrap(), [1, 1, 1, 0, 1, 1, 1]);
}

#[test]
fn test_out_of_range_digits() {
    assert_eq!(resolve(-1), Err(InvalidDigitError { digit: -1 }));
    assert_eq!(resolve(10), Err(InvalidDigitError { digit: 10 }));
}

#[test]
fn test_zero_has_centre_off() {
    let zero = resolve(0).unwrap();
    assert!(!zero.is_lit_at(SegmentPosition::Centre));
    assert!(zero.is_lit_at(SegmentPosition::Top));
    assert!(zero.is_lit_at(SegmentPosition::Bottom));
}

#[test]
fn test_resolve_is_idempotent() {
    for digit in 0..=9 {
        assert_eq!(resolve(digit), resolve(digit));
    }
}

#[test]
fn test_concurrent_readers() {
    let table = DigitTable::BUILTIN;
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for digit in 0..=9 {
                    assert_eq!(table.resolve(digit), resolve(digit));
                }
            });
        }
    });
}

// ============================================================================
// Tests: Validierung
// ============================================================================

#[test]
fn test_legacy_matrix_is_malformed() {
    let err = DigitTable::new(LEGACY_NUMBER_MATRIX).unwrap_err();
    assert_eq!(
        err,
        MalformedPatternError::Value {
            row: 2,
            column: 6,
            value: 3
        }
    );
    assert_eq!(
        err.to_string(),
        "row 2 column 6 has value 3 (expected 0 or 1)"
    );
}

#[test]
fn test_custom_wiring_table() {
    // Andere Verdrahtung: alle Muster gespiegelt (Mitte bleibt vorne)
    let mut rows: RawTable = NUMBER_MATRIX;
    for row in rows.iter_mut() {
        row[1..].reverse();
    }
    let table = DigitTable::new(rows).unwrap();
    assert_eq!(table.resolve(1).unwrap(), [0, 1, 0, 0, 0, 0, 1]);
    assert_eq!(table.resolve(7).unwrap(), [0, 1, 0, 0, 0, 1, 1]);
}

#[test]
fn test_from_rows_rejects_long_row() {
    let normal: &[u8] = &[0, 1, 1, 1, 1, 1, 1];
    let mut rows = [normal; 10];
    rows[9] = &[1, 1, 1, 1, 0, 1, 1, 0];
    assert_eq!(
        DigitTable::from_rows(&rows),
        Err(MalformedPatternError::RowLength { row: 9, len: 8 })
    );
}

#[test]
fn test_from_rows_rejects_eleven_rows() {
    let normal: &[u8] = &[0, 1, 1, 1, 1, 1, 1];
    let rows = [normal; 11];
    assert_eq!(
        DigitTable::from_rows(&rows),
        Err(MalformedPatternError::RowCount { rows: 11 })
    );
}

// ============================================================================
// Tests: Serialisierung
// ============================================================================

#[test]
fn test_table_json_round_trip() {
    let mut buffer = [0u8; 256];
    let n = serde_json_core::to_slice(&DigitTable::BUILTIN, &mut buffer).unwrap();

    let (table, consumed) = serde_json_core::from_slice::<DigitTable>(&buffer[..n]).unwrap();
    assert_eq!(consumed, n);
    assert_eq!(table, DigitTable::BUILTIN);
}

#[test]
fn test_table_serializes_as_nested_arrays() {
    let mut buffer = [0u8; 256];
    let n = serde_json_core::to_slice(&DigitTable::BUILTIN, &mut buffer).unwrap();
    let json = core::str::from_utf8(&buffer[..n]).unwrap();
    assert!(json.starts_with("[[0,1,1,1,1,1,1],[0,1,0,0,0,0,1],[1,1,1,0,1,1,1],"));
}

#[test]
fn test_deserialize_rejects_legacy_table() {
    let mut buffer = [0u8; 256];
    let n = serde_json_core::to_slice(&LEGACY_NUMBER_MATRIX, &mut buffer).unwrap();
    assert!(serde_json_core::from_slice::<DigitTable>(&buffer[..n]).is_err());
}

#[test]
fn test_deserialize_rejects_short_table() {
    let json = b"[[0,1,1,1,1,1,1],[0,1,0,0,0,0,1]]";
    assert!(serde_json_core::from_slice::<DigitTable>(json).is_err());
}
