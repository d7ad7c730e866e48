//! Anzeige-Layout: 4 Digits + Doppelpunkt auf einem LED-Strip
//!
//! ```text
//! LED  0..7    Digit 0 (Stunden-Zehner)
//! LED  7..14   Digit 1 (Stunden-Einer)
//! LED 14, 15   Doppelpunkt
//! LED 16..23   Digit 2 (Minuten-Zehner)
//! LED 23..30   Digit 3 (Minuten-Einer)
//! ```

use rgb::RGB8;

use crate::color::{Palette, scale_brightness};
use crate::segments::SEGMENTS_PER_DIGIT;
use crate::table::{DigitTable, InvalidDigitError};
use crate::time::LocalTime;

/// Anzahl der Digits
pub const NUM_DIGITS: usize = 4;

/// Strip-Index des oberen Doppelpunkt-Segments
pub const COLON_1: usize = 14;

/// Strip-Index des unteren Doppelpunkt-Segments
pub const COLON_2: usize = 15;

/// Gesamtzahl der LEDs im Strip
pub const NUM_SEGMENTS: usize = NUM_DIGITS * SEGMENTS_PER_DIGIT + 2;

/// Ein komplettes Bild für den Strip
pub type Frame = [RGB8; NUM_SEGMENTS];

/// Inhalt der Digits: `None` = dunkel
pub type DigitSlots = [Option<u8>; NUM_DIGITS];

/// Erster Strip-Index des Digits an Position `position`
///
/// Die Digits rechts vom Doppelpunkt sind um die beiden Doppelpunkt-LEDs verschoben.
pub const fn digit_offset(position: usize) -> usize {
    let base = position * SEGMENTS_PER_DIGIT;
    if position >= NUM_DIGITS / 2 {
        base + 2
    } else {
        base
    }
}

const _: () = assert!(digit_offset(NUM_DIGITS / 2 - 1) + SEGMENTS_PER_DIGIT == COLON_1);
const _: () = assert!(COLON_2 + 1 == digit_offset(NUM_DIGITS / 2));
const _: () = assert!(digit_offset(NUM_DIGITS - 1) + SEGMENTS_PER_DIGIT == NUM_SEGMENTS);

/// 12- oder 24-Stunden-Anzeige
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeFormat {
    Hour12,
    #[default]
    Hour24,
}

/// Zerlegt eine Uhrzeit in die vier Digits
///
/// Im 12-Stunden-Modus wird 0 Uhr als 12 angezeigt und eine führende Null
/// der Stunde bleibt dunkel.
///
/// # Beispiele
///
/// ```
/// # use clock_core::{LocalTime, TimeFormat, time_digits};
/// let t = LocalTime { hour: 9, minute: 5, second: 0 };
/// assert_eq!(time_digits(t, TimeFormat::Hour24), [Some(0), Some(9), Some(0), Some(5)]);
/// assert_eq!(time_digits(t, TimeFormat::Hour12), [None, Some(9), Some(0), Some(5)]);
/// ```
pub fn time_digits(time: LocalTime, format: TimeFormat) -> DigitSlots {
    let hour = match format {
        TimeFormat::Hour24 => time.hour % 24,
        TimeFormat::Hour12 => match time.hour % 12 {
            0 => 12,
            h => h,
        },
    };
    let minute = time.minute % 60;

    let tens = match (format, hour / 10) {
        (TimeFormat::Hour12, 0) => None,
        (_, tens) => Some(tens),
    };

    [tens, Some(hour % 10), Some(minute / 10), Some(minute % 10)]
}

/// Zeichnet Digits und Doppelpunkt in ein Frame
///
/// Ungültige Ziffern (> 9) werden mit [`InvalidDigitError`] abgelehnt,
/// bevor irgendetwas an die Hardware geht.
pub fn render_digits(
    table: &DigitTable,
    digits: &DigitSlots,
    colon: Option<RGB8>,
    on: RGB8,
    off: RGB8,
) -> Result<Frame, InvalidDigitError> {
    let mut frame = [off; NUM_SEGMENTS];

    for (position, slot) in digits.iter().enumerate() {
        let Some(digit) = slot else {
            continue;
        };
        let pattern = table.resolve(i32::from(*digit))?;
        let offset = digit_offset(position);

        for (led, lit) in frame[offset..offset + SEGMENTS_PER_DIGIT]
            .iter_mut()
            .zip(pattern.iter())
        {
            if lit {
                *led = on;
            }
        }
    }

    if let Some(colour) = colon {
        frame[COLON_1] = colour;
        frame[COLON_2] = colour;
    }

    Ok(frame)
}

/// Ziffernblatt: Tabelle, Zeitformat und Farben
#[derive(Debug, Clone, Copy)]
pub struct ClockFace {
    table: DigitTable,
    format: TimeFormat,
    palette: Palette,
}

impl ClockFace {
    pub const fn new(table: DigitTable, format: TimeFormat, palette: Palette) -> Self {
        Self {
            table,
            format,
            palette,
        }
    }

    pub fn format(&self) -> TimeFormat {
        self.format
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Erzeugt das Frame für die aktuelle Uhrzeit
    ///
    /// Ohne synchronisierte Zeit (`now == None`) bleiben die Digits dunkel
    /// und der Doppelpunkt leuchtet in der Alarm-Farbe.
    pub fn render(
        &self,
        now: Option<LocalTime>,
        brightness: u8,
        colon_on: bool,
    ) -> Result<Frame, InvalidDigitError> {
        let Palette { on, off, alert } = self.palette;

        let frame = match now {
            Some(time) => {
                let digits = time_digits(time, self.format);
                render_digits(&self.table, &digits, colon_on.then_some(on), on, off)?
            }
            None => render_digits(
                &self.table,
                &[None; NUM_DIGITS],
                colon_on.then_some(alert),
                on,
                off,
            )?,
        };

        Ok(scale_brightness(frame, brightness))
    }
}

impl Default for ClockFace {
    fn default() -> Self {
        Self::new(DigitTable::BUILTIN, TimeFormat::default(), Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u8, minute: u8) -> LocalTime {
        LocalTime {
            hour,
            minute,
            second: 0,
        }
    }

    #[test]
    fn test_digit_offsets() {
        assert_eq!(digit_offset(0), 0);
        assert_eq!(digit_offset(1), 7);
        assert_eq!(digit_offset(2), 16);
        assert_eq!(digit_offset(3), 23);
        assert_eq!(NUM_SEGMENTS, 30);
    }

    #[test]
    fn test_time_digits_24h() {
        assert_eq!(
            time_digits(at(0, 0), TimeFormat::Hour24),
            [Some(0), Some(0), Some(0), Some(0)]
        );
        assert_eq!(
            time_digits(at(23, 59), TimeFormat::Hour24),
            [Some(2), Some(3), Some(5), Some(9)]
        );
    }

    #[test]
    fn test_time_digits_12h() {
        assert_eq!(
            time_digits(at(0, 30), TimeFormat::Hour12),
            [Some(1), Some(2), Some(3), Some(0)]
        );
        assert_eq!(
            time_digits(at(13, 7), TimeFormat::Hour12),
            [None, Some(1), Some(0), Some(7)]
        );
        assert_eq!(
            time_digits(at(22, 15), TimeFormat::Hour12),
            [Some(1), Some(0), Some(1), Some(5)]
        );
    }

    #[test]
    fn test_render_digits_rejects_invalid() {
        let result = render_digits(
            &DigitTable::BUILTIN,
            &[Some(1), Some(12), None, None],
            None,
            Palette::RED,
            Palette::BLACK,
        );
        assert_eq!(result, Err(InvalidDigitError { digit: 12 }));
    }

    #[test]
    fn test_render_eight_lights_whole_digit() {
        let frame = render_digits(
            &DigitTable::BUILTIN,
            &[None, None, Some(8), None],
            None,
            Palette::RED,
            Palette::BLACK,
        )
        .unwrap();

        for (index, led) in frame.iter().enumerate() {
            let expected = if (16..23).contains(&index) {
                Palette::RED
            } else {
                Palette::BLACK
            };
            assert_eq!(*led, expected, "LED {}", index);
        }
    }

    #[test]
    fn test_render_unsynced_shows_alert_colon() {
        let face = ClockFace::default();
        let frame = face.render(None, 255, true).unwrap();
        assert_eq!(frame[COLON_1], Palette::WHITE);
        assert_eq!(frame[COLON_2], Palette::WHITE);
        let lit = frame.iter().filter(|&&led| led != Palette::BLACK).count();
        assert_eq!(lit, 2);
    }

    #[test]
    fn test_render_colon_off() {
        let face = ClockFace::default();
        let frame = face.render(Some(at(12, 34)), 255, false).unwrap();
        assert_eq!(frame[COLON_1], Palette::BLACK);
        assert_eq!(frame[COLON_2], Palette::BLACK);
    }
}
