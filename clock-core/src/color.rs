//! Farb- und Helligkeits-Logik
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;
use smart_leds::brightness;

use crate::state::SunTimes;

/// Volle Helligkeit (Tag)
pub const LED_BRIGHT: u8 = 255;

/// Gedimmte Helligkeit (zwischen Sonnenuntergang und Sonnenaufgang)
pub const LED_DIM: u8 = 20;

// HSV-Farbe (`hue`, `sat`, `val`, alle 0-255) und Umrechnung nach RGB
pub use smart_leds::hsv::{Hsv, hsv2rgb};

/// Farben für eingeschaltete, ausgeschaltete und Alarm-Segmente
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub on: RGB8,
    pub off: RGB8,
    pub alert: RGB8,
}

impl Palette {
    pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
    pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
    pub const WHITE: RGB8 = RGB8 {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Ersetzt die "An"-Farbe, z.B. durch `hsv2rgb(..)`
    pub fn with_on(self, on: impl Into<RGB8>) -> Self {
        Self {
            on: on.into(),
            ..self
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            on: Self::RED,
            off: Self::BLACK,
            alert: Self::WHITE,
        }
    }
}

const SECS_PER_DAY: i64 = 86_400;

/// Skaliert alle LEDs eines Frames mit `level` (255 = unverändert)
pub fn scale_brightness<const N: usize>(frame: [RGB8; N], level: u8) -> [RGB8; N] {
    let mut scaled = frame;
    for (led, colour) in scaled.iter_mut().zip(brightness(frame.into_iter(), level)) {
        *led = colour;
    }
    scaled
}

/// Helligkeit für den Zeitpunkt `epoch`
///
/// Verglichen wird nur die Tageszeit: Sonnenzeiten vom Vortag gelten auch
/// heute noch, falls ein Wetter-Refresh ausfällt. Ohne bekannte oder mit
/// unplausiblen Sonnenzeiten bleibt die Anzeige hell.
pub fn brightness_at(epoch: u32, sun: Option<SunTimes>) -> u8 {
    let Some(sun) = sun else {
        return LED_BRIGHT;
    };

    let day_length = i64::from(sun.sunset) - i64::from(sun.sunrise);
    if day_length <= 0 || day_length >= SECS_PER_DAY {
        return LED_BRIGHT;
    }

    let since_sunrise = (i64::from(epoch) - i64::from(sun.sunrise)).rem_euclid(SECS_PER_DAY);
    if since_sunrise < day_length {
        LED_BRIGHT
    } else {
        LED_DIM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JULY_1_SUNRISE: u32 = 1_719_806_400; // 2024-07-01 04:00 UTC
    const JULY_1_SUNSET: u32 = 1_719_864_000; // 2024-07-01 20:00 UTC
    const DAY: u32 = 86_400;

    #[test]
    fn test_hsv_default_is_half_red() {
        let rgb = hsv2rgb(Hsv {
            hue: 0,
            sat: 255,
            val: 127,
        });
        assert_eq!(rgb, RGB8::new(127, 0, 0));
    }

    #[test]
    fn test_hsv_zero_saturation_is_grey() {
        let rgb = hsv2rgb(Hsv {
            hue: 100,
            sat: 0,
            val: 80,
        });
        assert_eq!(rgb, RGB8::new(80, 80, 80));
    }

    #[test]
    fn test_scale_brightness_full_keeps_frame() {
        let frame = [RGB8::new(200, 255, 0), Palette::RED];
        assert_eq!(scale_brightness(frame, LED_BRIGHT), frame);
    }

    #[test]
    fn test_scale_brightness_dim() {
        let frame = [Palette::RED, Palette::BLACK];
        assert_eq!(
            scale_brightness(frame, LED_DIM),
            [RGB8::new(20, 0, 0), Palette::BLACK]
        );
    }

    #[test]
    fn test_palette_default() {
        let palette = Palette::default();
        assert_eq!(palette.on, Palette::RED);
        assert_eq!(palette.off, Palette::BLACK);
        assert_eq!(palette.alert, Palette::WHITE);
    }

    #[test]
    fn test_brightness_without_sun_times() {
        assert_eq!(brightness_at(1_000, None), LED_BRIGHT);
    }

    #[test]
    fn test_brightness_day_and_night() {
        let sun = SunTimes {
            sunrise: 1_000,
            sunset: 2_000,
        };
        assert_eq!(brightness_at(999, Some(sun)), LED_DIM);
        assert_eq!(brightness_at(1_000, Some(sun)), LED_BRIGHT);
        assert_eq!(brightness_at(1_999, Some(sun)), LED_BRIGHT);
        assert_eq!(brightness_at(2_000, Some(sun)), LED_DIM);
    }

    #[test]
    fn test_brightness_with_sun_times_from_yesterday() {
        let sun = Some(SunTimes {
            sunrise: JULY_1_SUNRISE,
            sunset: JULY_1_SUNSET,
        });
        let noon_next_day = 1_719_835_200 + DAY;
        assert_eq!(brightness_at(noon_next_day, sun), LED_BRIGHT);
        assert_eq!(brightness_at(JULY_1_SUNSET + DAY + 3_600, sun), LED_DIM);
        assert_eq!(brightness_at(JULY_1_SUNRISE + DAY - 60, sun), LED_DIM);
    }

    #[test]
    fn test_brightness_ignores_implausible_sun_times() {
        let sun = Some(SunTimes {
            sunrise: JULY_1_SUNSET,
            sunset: JULY_1_SUNRISE,
        });
        assert_eq!(brightness_at(JULY_1_SUNRISE + 60, sun), LED_BRIGHT);
    }
}
