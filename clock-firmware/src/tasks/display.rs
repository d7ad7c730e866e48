// Display Task - Zeichnet die Uhrzeit auf den Segment-Strip
use defmt::{error, info};
use embassy_time::{Duration, Timer};
use esp_hal_smartled::smart_led_buffer;

use clock_core::brightness_at;

use crate::config::{
    DISPLAY_POLL_MS, NUM_SEGMENTS, REFRESH_HOUR, REFRESH_MINUTE, RMT_CLOCK_MHZ, TIME_FORMAT,
    USE_DIM, palette,
};
use crate::diag::{debug_msg, debug_value};
use crate::hal::RmtStripWriter;
use crate::{ClockFace, ClockState, RefreshSignal, SegmentStripWriter, TimeZone};

/// Anzeige-Logik - ohne direkte Hardware-Abhängigkeit
///
/// Wartet auf das Tick-Flag aus dem ClockState und zeichnet dann:
/// - die lokale Uhrzeit (Zeitzone inkl. Sommerzeit)
/// - den Doppelpunkt, der im Sekundentakt blinkt
/// - gedimmt zwischen Sonnenuntergang und Sonnenaufgang (USE_DIM)
///
/// Vor der ersten Synchronisation bleiben die Digits dunkel und der
/// Doppelpunkt blinkt in der Alarm-Farbe.
///
/// Zur Refresh-Uhrzeit wird der Refresh-Task über `refresh_signal` geweckt.
///
/// # Parameter
/// - `strip`: Strip Writer (Hardware oder Mock)
/// - `state`: gemeinsamer Uhr-Zustand
/// - `time_zone`: Zeitzone für die Anzeige
/// - `refresh_signal`: Signal an den Refresh-Task
pub async fn display_logic<S: SegmentStripWriter>(
    mut strip: S,
    state: &'static ClockState,
    time_zone: TimeZone,
    refresh_signal: &'static RefreshSignal,
) {
    let face = ClockFace::new(clock_core::DigitTable::BUILTIN, TIME_FORMAT, palette());
    let mut colon_on = false;
    let mut last_minute = None;

    loop {
        if !state.take_tick() {
            Timer::after(Duration::from_millis(DISPLAY_POLL_MS)).await;
            continue;
        }

        colon_on = !colon_on;

        let now = state.is_synced().then(|| {
            let epoch = state.epoch();
            time_zone.local_time(epoch)
        });

        if let Some(time) = now {
            state.set_time(time);

            if last_minute != Some(time.minute) {
                last_minute = Some(time.minute);
                debug_value("Display: time ", time);
            }

            if state.poll_refresh(time, REFRESH_HOUR, REFRESH_MINUTE) {
                info!("Display: refresh due at {:02}:{:02}", time.hour, time.minute);
                refresh_signal.signal(());
            }
        } else {
            debug_msg("Display: waiting for time sync");
        }

        let brightness = if USE_DIM {
            brightness_at(state.epoch(), state.sun_times())
        } else {
            clock_core::LED_BRIGHT
        };

        match face.render(now, brightness, colon_on) {
            Ok(frame) => {
                if let Err(_e) = strip.write(&frame) {
                    error!("Display: failed to write to strip");
                }
            }
            Err(e) => error!("Display: render failed: {}", e),
        }
    }
}

/// Display Task - Embassy Task für parallele Ausführung
///
/// Dieser Task übernimmt die Hardware-Initialisierung und ruft dann
/// die `display_logic()` Funktion auf.
///
/// # Parameter
/// - `data_pin`: GPIO5 Peripheral für die Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `state`: gemeinsamer Uhr-Zustand
/// - `refresh_signal`: Signal an den Refresh-Task
#[embassy_executor::task]
pub async fn display_task(
    data_pin: esp_hal::peripherals::GPIO5<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    state: &'static ClockState,
    time_zone: TimeZone,
    refresh_signal: &'static RefreshSignal,
) {
    // Buffer für SmartLED Daten erstellen (ganzer Strip)
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(NUM_SEGMENTS);

    // Hardware initialisieren: RmtStripWriter kapselt RMT + SmartLED
    let strip = match RmtStripWriter::new(data_pin, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer)
    {
        Ok(strip) => strip,
        Err(e) => {
            error!("Display: RMT init failed: {}", e);
            return;
        }
    };
    info!("Display: strip ready ({} segments)", NUM_SEGMENTS);

    display_logic(strip, state, time_zone, refresh_signal).await;
}
