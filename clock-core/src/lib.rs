//! Clock Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Segment-Tabelle, Zeit-Logik und Traits für die LED-Segment-Uhr.

#![no_std]

pub mod color;
pub mod display;
pub mod segments;
pub mod sntp;
pub mod state;
pub mod table;
pub mod time;
pub mod traits;
#[cfg(feature = "serde")]
pub mod weather;

// Re-exports für einfachen Zugriff
pub use color::{
    Hsv, LED_BRIGHT, LED_DIM, Palette, brightness_at, hsv2rgb, scale_brightness,
};
pub use display::{
    COLON_1, COLON_2, ClockFace, DigitSlots, Frame, NUM_DIGITS, NUM_SEGMENTS, TimeFormat,
    digit_offset, render_digits, time_digits,
};
pub use segments::{SEGMENTS_PER_DIGIT, SegmentPattern, SegmentPosition, WIRING_ORDER};
pub use state::{ClockState, RefreshState, SunTimes};
pub use table::{
    DigitTable, InvalidDigitError, LEGACY_NUMBER_MATRIX, MalformedPatternError, NUMBER_MATRIX,
    RawTable, resolve,
};
pub use time::{LocalTime, TimeZone, TzError};
pub use traits::{LedError, SegmentStripWriter};
