//! Zeitzonen und Umrechnung Unix-Zeit → lokale Uhrzeit
//!
//! Unterstützt POSIX-TZ-Strings der Form
//! `std offset [dst [offset] [,Mm.w.d[/time],Mm.w.d[/time]]]`,
//! z.B. `"GMT0BST,M3.5.0/01,M10.5.0/02"` oder `"CET-1CEST,M3.5.0,M10.5.0/3"`.

use core::fmt;

const SECS_PER_HOUR: i32 = 3600;
const SECS_PER_DAY: i64 = 86_400;

/// Standard-Versatz der Sommerzeit, wenn der TZ-String keinen angibt
pub const DEFAULT_DST_SHIFT_SECS: i32 = SECS_PER_HOUR;

/// Standard-Uhrzeit eines Wechsels, wenn der TZ-String keine angibt (02:00)
const DEFAULT_TRANSITION_SECS: i32 = 2 * SECS_PER_HOUR;

/// Lokale Uhrzeit (Stunde 0-23)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl LocalTime {
    /// Uhrzeit aus Sekunden seit Mitternacht
    fn from_seconds_of_day(seconds: i64) -> Self {
        let seconds = seconds.rem_euclid(SECS_PER_DAY);
        Self {
            hour: (seconds / 3600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }
}

/// Fehler beim Parsen eines TZ-Strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TzError {
    /// Zonen-Name fehlt oder ist kürzer als 3 Zeichen
    InvalidName,
    /// Offset oder Uhrzeit nicht lesbar
    InvalidOffset,
    /// Wechsel-Regel nicht lesbar (Monat/Woche/Tag außerhalb des Bereichs)
    InvalidRule,
    /// Nur `Mm.w.d`-Regeln werden unterstützt (keine `Jn`/`n`)
    UnsupportedRule,
    /// Unerwartete Zeichen am Ende
    TrailingInput,
}

impl fmt::Display for TzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidName => "invalid zone name",
            Self::InvalidOffset => "invalid offset",
            Self::InvalidRule => "invalid transition rule",
            Self::UnsupportedRule => "unsupported transition rule",
            Self::TrailingInput => "unexpected trailing input",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for TzError {}

/// Wechsel-Regel `Mm.w.d/time`: Wochentag `d` (0 = Sonntag) der Woche `w`
/// (5 = letzte) im Monat `m`, um `time` Sekunden nach lokaler Mitternacht
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TransitionRule {
    month: u8,
    week: u8,
    weekday: u8,
    time: i32,
}

impl TransitionRule {
    /// Lokaler Zeitpunkt des Wechsels im Jahr `year` (Sekunden seit 1970, ohne Offset)
    fn local_seconds(&self, year: i64) -> i64 {
        let month = i64::from(self.month);
        let first = days_from_civil(year, month, 1);
        let first_weekday = weekday(first);

        let mut day = 1 + (i64::from(self.weekday) - first_weekday).rem_euclid(7)
            + (i64::from(self.week) - 1) * 7;
        let last = days_in_month(year, month);
        while day > last {
            day -= 7;
        }

        (first + day - 1) * SECS_PER_DAY + i64::from(self.time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DstRule {
    /// Sekunden östlich von UTC während der Sommerzeit
    offset: i32,
    start: TransitionRule,
    end: TransitionRule,
}

/// Zeitzone mit optionaler Sommerzeit-Regel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZone {
    /// Sekunden östlich von UTC (Normalzeit)
    std_offset: i32,
    dst: Option<DstRule>,
}

impl TimeZone {
    pub const UTC: Self = Self::fixed(0);

    /// Feste Zeitzone ohne Sommerzeit, `offset_secs` östlich von UTC
    pub const fn fixed(offset_secs: i32) -> Self {
        Self {
            std_offset: offset_secs,
            dst: None,
        }
    }

    /// Parst einen POSIX-TZ-String
    ///
    /// # Beispiele
    ///
    /// ```
    /// # use clock_core::TimeZone;
    /// let tz = TimeZone::parse("GMT0BST,M3.5.0/01,M10.5.0/02").unwrap();
    /// // 2024-07-01 12:00 UTC → 13:00 BST
    /// assert_eq!(tz.local_time(1_719_835_200).hour, 13);
    /// ```
    pub fn parse(tz: &str) -> Result<Self, TzError> {
        Self::parse_with_dst_shift(tz, DEFAULT_DST_SHIFT_SECS)
    }

    /// Wie [`parse`](Self::parse), aber mit eigenem Sommerzeit-Versatz für
    /// TZ-Strings ohne DST-Offset
    pub fn parse_with_dst_shift(tz: &str, dst_shift_secs: i32) -> Result<Self, TzError> {
        let mut cursor = Cursor::new(tz);

        cursor.name()?;
        let std_offset = -cursor.offset()?;

        if cursor.is_empty() {
            return Ok(Self::fixed(std_offset));
        }

        cursor.name()?;
        let dst_offset = match cursor.peek() {
            Some(b',') | None => std_offset + dst_shift_secs,
            Some(_) => -cursor.offset()?,
        };

        // Ohne Regel gelten die US-Regeln laut POSIX; hier nicht unterstützt
        if !cursor.eat(b',') {
            return Err(TzError::UnsupportedRule);
        }
        let start = cursor.rule()?;
        if !cursor.eat(b',') {
            return Err(TzError::InvalidRule);
        }
        let end = cursor.rule()?;

        if !cursor.is_empty() {
            return Err(TzError::TrailingInput);
        }

        Ok(Self {
            std_offset,
            dst: Some(DstRule {
                offset: dst_offset,
                start,
                end,
            }),
        })
    }

    /// Versatz zu UTC (Sekunden östlich) zum Zeitpunkt `epoch`
    pub fn offset_at(&self, epoch: i64) -> i32 {
        let Some(dst) = self.dst else {
            return self.std_offset;
        };

        let local_days = (epoch + i64::from(self.std_offset)).div_euclid(SECS_PER_DAY);
        let (year, _, _) = civil_from_days(local_days);

        // Start in Normalzeit, Ende in Sommerzeit angegeben
        let start = dst.start.local_seconds(year) - i64::from(self.std_offset);
        let end = dst.end.local_seconds(year) - i64::from(dst.offset);

        let in_dst = if start < end {
            start <= epoch && epoch < end
        } else {
            // Südhalbkugel: Sommerzeit über den Jahreswechsel
            !(end <= epoch && epoch < start)
        };

        if in_dst { dst.offset } else { self.std_offset }
    }

    pub fn is_dst(&self, epoch: i64) -> bool {
        self.dst.is_some() && self.offset_at(epoch) != self.std_offset
    }

    /// Lokale Uhrzeit zur Unix-Zeit `epoch`
    pub fn local_time(&self, epoch: u32) -> LocalTime {
        let epoch = i64::from(epoch);
        LocalTime::from_seconds_of_day(epoch + i64::from(self.offset_at(epoch)))
    }
}

// ============================================================================
// TZ-String Parser
// ============================================================================

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Zonen-Name: mindestens 3 Buchstaben oder `<...>`
    fn name(&mut self) -> Result<(), TzError> {
        let len = if self.eat(b'<') {
            let start = self.pos;
            while self.peek().is_some_and(|b| b != b'>') {
                self.pos += 1;
            }
            let len = self.pos - start;
            if !self.eat(b'>') {
                return Err(TzError::InvalidName);
            }
            len
        } else {
            let start = self.pos;
            while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
                self.pos += 1;
            }
            self.pos - start
        };

        if len < 3 {
            return Err(TzError::InvalidName);
        }
        Ok(())
    }

    fn number(&mut self, max_digits: usize) -> Option<i32> {
        let start = self.pos;
        let mut value = 0i32;
        while self.pos - start < max_digits {
            match self.peek() {
                Some(b) if b.is_ascii_digit() => {
                    value = value * 10 + i32::from(b - b'0');
                    self.pos += 1;
                }
                _ => break,
            }
        }
        (self.pos > start).then_some(value)
    }

    /// `[+|-]hh[:mm[:ss]]` in Sekunden, Vorzeichen wie im String
    fn offset(&mut self) -> Result<i32, TzError> {
        let sign = if self.eat(b'-') {
            -1
        } else {
            self.eat(b'+');
            1
        };

        let hours = self.number(3).ok_or(TzError::InvalidOffset)?;
        let mut seconds = hours * SECS_PER_HOUR;

        if self.eat(b':') {
            let minutes = self.number(2).ok_or(TzError::InvalidOffset)?;
            seconds += minutes * 60;
            if self.eat(b':') {
                seconds += self.number(2).ok_or(TzError::InvalidOffset)?;
            }
        }

        if hours > 167 {
            return Err(TzError::InvalidOffset);
        }
        Ok(sign * seconds)
    }

    /// `Mm.w.d[/time]`
    fn rule(&mut self) -> Result<TransitionRule, TzError> {
        if !self.eat(b'M') {
            return match self.peek() {
                Some(b'J') | Some(b'0'..=b'9') => Err(TzError::UnsupportedRule),
                _ => Err(TzError::InvalidRule),
            };
        }

        let month = self.number(2).ok_or(TzError::InvalidRule)?;
        if !self.eat(b'.') {
            return Err(TzError::InvalidRule);
        }
        let week = self.number(1).ok_or(TzError::InvalidRule)?;
        if !self.eat(b'.') {
            return Err(TzError::InvalidRule);
        }
        let weekday = self.number(1).ok_or(TzError::InvalidRule)?;

        if !(1..=12).contains(&month) || !(1..=5).contains(&week) || weekday > 6 {
            return Err(TzError::InvalidRule);
        }

        let time = if self.eat(b'/') {
            self.offset()?
        } else {
            DEFAULT_TRANSITION_SECS
        };

        Ok(TransitionRule {
            month: month as u8,
            week: week as u8,
            weekday: weekday as u8,
            time,
        })
    }
}

// ============================================================================
// Kalender-Arithmetik (proleptischer Gregorianischer Kalender)
// ============================================================================

/// Tage seit 1970-01-01 für ein Datum
pub fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let yoe = year - era * 400;
    let doy = (153 * (month + (if month > 2 { -3 } else { 9 })) + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Datum (Jahr, Monat, Tag) für Tage seit 1970-01-01
pub fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// Wochentag (0 = Sonntag) für Tage seit 1970-01-01 (ein Donnerstag)
fn weekday(days: i64) -> i64 {
    (days + 4).rem_euclid(7)
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TzError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TzError::InvalidName => defmt::write!(fmt, "invalid zone name"),
            TzError::InvalidOffset => defmt::write!(fmt, "invalid offset"),
            TzError::InvalidRule => defmt::write!(fmt, "invalid transition rule"),
            TzError::UnsupportedRule => defmt::write!(fmt, "unsupported transition rule"),
            TzError::TrailingInput => defmt::write!(fmt, "unexpected trailing input"),
        }
    }
}
