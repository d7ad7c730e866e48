// Refresh Task - Uhrzeit per NTP und Sonnenzeiten per Wetter-API holen
use defmt::{error, info, warn};
use embassy_net::Stack;
use embassy_time::{Duration, Timer};

use crate::config::{REFRESH_RETRY_DELAY_SECS, USE_DIM};
use crate::diag::{debug_msg, debug_value};
use crate::tasks::ntp::{NtpError, fetch_epoch};
use crate::tasks::weather::fetch_sun_times;
use crate::tasks::wifi::wait_for_network;
use crate::{ClockState, RefreshSignal, RefreshState};

/// Refresh Task
///
/// - Wartet auf Netzwerk-Verbindung
/// - Beim Start sofort ein Refresh (Uhr ist noch nicht synchronisiert)
/// - Danach nur, wenn der Anzeige-Task die Refresh-Uhrzeit meldet
/// - Fehlgeschlagener Refresh bleibt `Pending` und wird nach
///   `REFRESH_RETRY_DELAY_SECS` wiederholt
#[embassy_executor::task]
pub async fn refresh_task(
    stack: &'static Stack<'static>,
    state: &'static ClockState,
    refresh_signal: &'static RefreshSignal,
) {
    info!("Refresh: Task started, waiting for network...");
    wait_for_network(stack).await;
    info!("Refresh: Network ready");

    state.request_refresh();

    loop {
        if state.refresh_state() != RefreshState::Pending {
            refresh_signal.wait().await;
            continue;
        }

        match refresh(stack, state).await {
            Ok(()) => {
                state.complete_refresh();
                info!("Refresh: done");
            }
            Err(e) => {
                error!("Refresh: NTP failed: {}", e);
                info!("Refresh: retrying in {}s", REFRESH_RETRY_DELAY_SECS);
                Timer::after(Duration::from_secs(REFRESH_RETRY_DELAY_SECS)).await;
            }
        }
    }
}

/// Ein Refresh-Durchlauf
///
/// Nur die Uhrzeit ist Pflicht. Schlägt die Wetter-Abfrage fehl, bleiben
/// die alten Sonnenzeiten stehen (oder es wird nicht gedimmt).
async fn refresh(stack: &'static Stack<'static>, state: &'static ClockState) -> Result<(), NtpError> {
    wait_for_network(stack).await;

    let epoch = fetch_epoch(stack).await?;
    state.set_epoch(epoch);
    debug_value("Refresh: epoch ", epoch);

    if USE_DIM {
        match fetch_sun_times(stack).await {
            Ok(sun) => state.set_sun_times(sun),
            Err(e) => warn!("Refresh: weather failed: {}", e),
        }
    } else {
        debug_msg("Refresh: dimming disabled, skipping weather");
    }

    Ok(())
}
