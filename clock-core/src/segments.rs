//! Segment-Verdrahtung und Segment-Muster
//!
//! Ein Digit besteht aus 7 WS2811-Segmenten, die in einer festen
//! physikalischen Reihenfolge am Datenbus hängen.

/// Anzahl der Segmente pro Digit
pub const SEGMENTS_PER_DIGIT: usize = 7;

/// Physikalische Position eines Segments im Digit
///
/// ```text
///     +- Top -+
///  TopLeft  TopRight
///     +- Centre -+
///  BottomLeft  BottomRight
///     +- Bottom -+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SegmentPosition {
    Centre,
    TopRight,
    Top,
    TopLeft,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Verdrahtungs-Reihenfolge des Segment-Strips
///
/// Das mittlere Segment liegt zuerst auf der Leitung, danach laufen die
/// restlichen Segmente im Uhrzeigersinn (von der Rückseite gesehen) um das
/// Digit herum. Index `i` in jedem [`SegmentPattern`] gehört zu
/// `WIRING_ORDER[i]`.
///
/// Bei anderer Verdrahtung muss diese Konstante und die Zahlen-Tabelle in
/// `table.rs` angepasst werden.
pub const WIRING_ORDER: [SegmentPosition; SEGMENTS_PER_DIGIT] = [
    SegmentPosition::Centre,
    SegmentPosition::TopRight,
    SegmentPosition::Top,
    SegmentPosition::TopLeft,
    SegmentPosition::BottomLeft,
    SegmentPosition::Bottom,
    SegmentPosition::BottomRight,
];

/// An/Aus-Muster der 7 Segmente eines Digits in Verdrahtungs-Reihenfolge
///
/// Jeder Eintrag ist `0` (aus) oder `1` (an). Muster entstehen nur über
/// eine validierte [`DigitTable`](crate::DigitTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentPattern([u8; SEGMENTS_PER_DIGIT]);

impl SegmentPattern {
    /// Alle Segmente aus
    pub const BLANK: Self = Self([0; SEGMENTS_PER_DIGIT]);

    pub(crate) const fn from_row(row: [u8; SEGMENTS_PER_DIGIT]) -> Self {
        Self(row)
    }

    /// Roh-Werte in Verdrahtungs-Reihenfolge
    pub const fn as_array(&self) -> &[u8; SEGMENTS_PER_DIGIT] {
        &self.0
    }

    /// Ist das Segment an Strip-Index `index` (0..7) an?
    pub fn is_lit(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|&v| v == 1)
    }

    /// Ist das Segment an der physikalischen Position `position` an?
    pub fn is_lit_at(&self, position: SegmentPosition) -> bool {
        WIRING_ORDER
            .iter()
            .position(|&p| p == position)
            .is_some_and(|index| self.is_lit(index))
    }

    /// Anzahl der leuchtenden Segmente
    pub fn lit_count(&self) -> usize {
        self.0.iter().filter(|&&v| v == 1).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().map(|&v| v == 1)
    }
}

impl PartialEq<[u8; SEGMENTS_PER_DIGIT]> for SegmentPattern {
    fn eq(&self, other: &[u8; SEGMENTS_PER_DIGIT]) -> bool {
        &self.0 == other
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SegmentPattern {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "SegmentPattern({=[u8]})", &self.0[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiring_order_starts_with_centre() {
        assert_eq!(WIRING_ORDER[0], SegmentPosition::Centre);
        assert_eq!(WIRING_ORDER.len(), SEGMENTS_PER_DIGIT);
    }

    #[test]
    fn test_wiring_order_has_no_duplicates() {
        for (i, a) in WIRING_ORDER.iter().enumerate() {
            for b in &WIRING_ORDER[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_is_lit_at_follows_wiring() {
        // Ziffer 1: nur die beiden rechten Segmente
        let one = SegmentPattern::from_row([0, 1, 0, 0, 0, 0, 1]);
        assert!(one.is_lit_at(SegmentPosition::TopRight));
        assert!(one.is_lit_at(SegmentPosition::BottomRight));
        assert!(!one.is_lit_at(SegmentPosition::Centre));
        assert!(!one.is_lit_at(SegmentPosition::Top));
        assert_eq!(one.lit_count(), 2);
    }

    #[test]
    fn test_is_lit_out_of_range() {
        assert!(!SegmentPattern::from_row([1; 7]).is_lit(7));
    }

    #[test]
    fn test_blank() {
        assert_eq!(SegmentPattern::BLANK.lit_count(), 0);
        assert!(SegmentPattern::BLANK.iter().all(|lit| !lit));
    }
}
