// Tick Task - Sekunden-Takt der Uhr
use embassy_time::{Duration, Ticker};

use crate::ClockState;

/// Sekunden-Takt
///
/// Ersetzt den Hardware-Timer-Interrupt: zählt die Epoch im ClockState
/// einmal pro Sekunde weiter und setzt das Tick-Flag für den Anzeige-Task.
/// Der Ticker gleicht Verzögerungen aus, die Uhr läuft daher nicht weg.
#[embassy_executor::task]
pub async fn tick_task(state: &'static ClockState) {
    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        ticker.next().await;
        state.tick_second();
    }
}
