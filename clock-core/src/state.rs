//! Gemeinsamer Uhr-Zustand
//!
//! Alle Felder sind Atomics: der Sekunden-Takt schreibt aus seinem eigenen
//! Task, Anzeige- und Refresh-Task lesen gleichzeitig. Die Struktur wird
//! als `static` angelegt und per Referenz an die Tasks übergeben.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::time::LocalTime;

/// Zustand des nächtlichen NTP/Wetter-Refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RefreshState {
    /// Kein Refresh nötig
    Idle = 0,
    /// Refresh angefordert, noch nicht erfolgreich
    Pending = 1,
    /// Refresh für das aktuelle Zeitfenster erledigt
    Done = 2,
}

impl RefreshState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Pending,
            2 => Self::Done,
            _ => Self::Idle,
        }
    }
}

/// Sonnenaufgang und -untergang als Unix-Zeit (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SunTimes {
    pub sunrise: u32,
    pub sunset: u32,
}

/// Prozessweiter Zustand der Uhr
pub struct ClockState {
    hour: AtomicU8,
    minute: AtomicU8,
    refresh: AtomicU8,
    /// Unix-Zeit in Sekunden, 0 = noch nicht synchronisiert
    epoch: AtomicU32,
    tick: AtomicBool,
    sunrise: AtomicU32,
    sunset: AtomicU32,
}

impl ClockState {
    pub const fn new() -> Self {
        Self {
            hour: AtomicU8::new(0),
            minute: AtomicU8::new(0),
            refresh: AtomicU8::new(RefreshState::Idle as u8),
            epoch: AtomicU32::new(0),
            tick: AtomicBool::new(false),
            sunrise: AtomicU32::new(0),
            sunset: AtomicU32::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Sekunden-Takt
    // ------------------------------------------------------------------

    /// Wird einmal pro Sekunde vom Takt-Task aufgerufen
    ///
    /// Die Epoch läuft erst nach der ersten Synchronisation mit.
    pub fn tick_second(&self) {
        let _ = self
            .epoch
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |epoch| {
                (epoch != 0).then(|| epoch.wrapping_add(1))
            });
        self.tick.store(true, Ordering::Release);
    }

    /// Liefert `true`, wenn seit dem letzten Aufruf eine Sekunde vergangen ist
    pub fn take_tick(&self) -> bool {
        self.tick.swap(false, Ordering::AcqRel)
    }

    pub fn epoch(&self) -> u32 {
        self.epoch.load(Ordering::Acquire)
    }

    pub fn set_epoch(&self, epoch: u32) {
        self.epoch.store(epoch, Ordering::Release);
    }

    pub fn is_synced(&self) -> bool {
        self.epoch() != 0
    }

    // ------------------------------------------------------------------
    // Angezeigte Zeit
    // ------------------------------------------------------------------

    pub fn set_time(&self, time: LocalTime) {
        self.hour.store(time.hour, Ordering::Relaxed);
        self.minute.store(time.minute, Ordering::Relaxed);
    }

    pub fn hour(&self) -> u8 {
        self.hour.load(Ordering::Relaxed)
    }

    pub fn minute(&self) -> u8 {
        self.minute.load(Ordering::Relaxed)
    }

    // ------------------------------------------------------------------
    // Refresh-Steuerung
    // ------------------------------------------------------------------

    pub fn refresh_state(&self) -> RefreshState {
        RefreshState::from_u8(self.refresh.load(Ordering::Acquire))
    }

    /// Fordert einen Refresh an (z.B. beim Booten)
    pub fn request_refresh(&self) {
        self.refresh
            .store(RefreshState::Pending as u8, Ordering::Release);
    }

    /// Markiert den laufenden Refresh als erledigt
    pub fn complete_refresh(&self) {
        self.refresh.store(RefreshState::Done as u8, Ordering::Release);
    }

    /// Prüft den Refresh-Zeitpunkt gegen die aktuelle lokale Zeit
    ///
    /// `Idle → Pending` zur Refresh-Minute, `Done → Idle` sobald die
    /// Refresh-Minute vorbei ist. Gibt `true` zurück, wenn gerade ein
    /// Refresh angefordert wurde.
    pub fn poll_refresh(&self, now: LocalTime, refresh_hour: u8, refresh_minute: u8) -> bool {
        let due = now.hour == refresh_hour && now.minute == refresh_minute;

        if due {
            self.refresh
                .compare_exchange(
                    RefreshState::Idle as u8,
                    RefreshState::Pending as u8,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                )
                .is_ok()
        } else {
            let _ = self.refresh.compare_exchange(
                RefreshState::Done as u8,
                RefreshState::Idle as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            false
        }
    }

    // ------------------------------------------------------------------
    // Sonnenzeiten
    // ------------------------------------------------------------------

    pub fn set_sun_times(&self, sun: SunTimes) {
        self.sunrise.store(sun.sunrise, Ordering::Relaxed);
        self.sunset.store(sun.sunset, Ordering::Relaxed);
    }

    /// Sonnenzeiten, falls bereits abgefragt
    pub fn sun_times(&self) -> Option<SunTimes> {
        let sunrise = self.sunrise.load(Ordering::Relaxed);
        let sunset = self.sunset.load(Ordering::Relaxed);
        (sunrise != 0 && sunset != 0).then_some(SunTimes { sunrise, sunset })
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
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
    fn test_tick_before_sync_keeps_epoch() {
        let state = ClockState::new();
        state.tick_second();
        assert_eq!(state.epoch(), 0);
        assert!(!state.is_synced());
        assert!(state.take_tick());
    }

    #[test]
    fn test_tick_after_sync_advances_epoch() {
        let state = ClockState::new();
        state.set_epoch(1_700_000_000);
        state.tick_second();
        state.tick_second();
        assert_eq!(state.epoch(), 1_700_000_002);
    }

    #[test]
    fn test_take_tick_consumes_flag() {
        let state = ClockState::new();
        assert!(!state.take_tick());
        state.tick_second();
        assert!(state.take_tick());
        assert!(!state.take_tick());
    }

    #[test]
    fn test_refresh_cycle() {
        let state = ClockState::new();
        assert_eq!(state.refresh_state(), RefreshState::Idle);

        assert!(!state.poll_refresh(at(2, 59), 3, 0));
        assert_eq!(state.refresh_state(), RefreshState::Idle);

        assert!(state.poll_refresh(at(3, 0), 3, 0));
        assert_eq!(state.refresh_state(), RefreshState::Pending);

        // Erneutes Pollen in derselben Minute fordert nicht doppelt an
        assert!(!state.poll_refresh(at(3, 0), 3, 0));

        state.complete_refresh();
        assert!(!state.poll_refresh(at(3, 0), 3, 0));
        assert_eq!(state.refresh_state(), RefreshState::Done);

        assert!(!state.poll_refresh(at(3, 1), 3, 0));
        assert_eq!(state.refresh_state(), RefreshState::Idle);
    }

    #[test]
    fn test_pending_survives_refresh_window() {
        let state = ClockState::new();
        state.request_refresh();
        assert!(!state.poll_refresh(at(12, 0), 3, 0));
        assert_eq!(state.refresh_state(), RefreshState::Pending);
    }

    #[test]
    fn test_sun_times_unknown_until_set() {
        let state = ClockState::new();
        assert_eq!(state.sun_times(), None);

        let sun = SunTimes {
            sunrise: 1_700_000_000,
            sunset: 1_700_030_000,
        };
        state.set_sun_times(sun);
        assert_eq!(state.sun_times(), Some(sun));
    }

    #[test]
    fn test_set_time() {
        let state = ClockState::new();
        state.set_time(at(21, 45));
        assert_eq!(state.hour(), 21);
        assert_eq!(state.minute(), 45);
    }
}
