// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod diag;
pub mod hal;
pub mod tasks;

// Re-exports von clock-core
pub use clock_core::{
    ClockFace, ClockState, LedError, LocalTime, RefreshState, SegmentStripWriter, TimeZone,
};

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;

use crate::config::{DST_OFFSET_SECS, TIMEZONE, UTC_OFFSET_SECS};

/// Signal vom Anzeige-Task an den Refresh-Task: "Refresh ist fällig"
pub type RefreshSignal = Signal<NoopRawMutex, ()>;

/// Zeitzone aus `TIMEZONE` (Sommerzeit-Versatz `DST_OFFSET_SECS`, falls der
/// String keinen angibt), bei Parse-Fehler fester Versatz `UTC_OFFSET_SECS`
pub fn configured_time_zone() -> TimeZone {
    match TimeZone::parse_with_dst_shift(TIMEZONE, DST_OFFSET_SECS) {
        Ok(tz) => tz,
        Err(e) => {
            defmt::warn!(
                "Invalid TIMEZONE '{}': {}, using fixed offset {}s",
                TIMEZONE,
                e,
                UTC_OFFSET_SECS
            );
            TimeZone::fixed(UTC_OFFSET_SECS)
        }
    }
}
