// Segment-Strip Writer
//
// Implementiert den SegmentStripWriter-Trait aus clock-core für den
// WS2811-Strip am RMT Peripheral des ESP32-C6.

use esp_hal::Blocking;
use esp_hal::rmt::Rmt;
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::NUM_SEGMENTS;
use crate::{LedError, SegmentStripWriter};

/// Buffer-Größe für den ganzen Strip (24 Bits pro LED + 1 Reset)
pub const STRIP_BUFFER_SIZE: usize = NUM_SEGMENTS * 24 + 1;

/// Real Hardware Strip Writer
///
/// Nutzt ESP32 RMT Peripheral um die WS2811 Segmente anzusteuern.
///
/// Hinweis: Der Buffer wird im Task erstellt und als Parameter übergeben
/// statt im Constructor allokiert.
pub struct RmtStripWriter<'a> {
    strip: SmartLedsAdapter<'a, STRIP_BUFFER_SIZE>,
}

impl<'a> RmtStripWriter<'a> {
    /// Erstellt einen neuen RmtStripWriter
    ///
    /// # Parameter
    /// - `data_pin`: GPIO5 für die Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer!(NUM_SEGMENTS))
    pub fn new(
        data_pin: esp_hal::peripherals::GPIO5<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [esp_hal::rmt::PulseCode; STRIP_BUFFER_SIZE],
    ) -> Result<Self, LedError> {
        // RMT initialisieren
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .map_err(|_| LedError::WriteFailed)?;

        // SmartLED Adapter erstellen
        let strip = SmartLedsAdapter::new(rmt.channel0, data_pin, buffer);

        Ok(Self { strip })
    }
}

impl<'a> SegmentStripWriter for RmtStripWriter<'a> {
    fn write(&mut self, frame: &[RGB8]) -> Result<(), LedError> {
        self.strip
            .write(frame.iter().copied())
            .map_err(|_| LedError::WriteFailed)
    }
}
