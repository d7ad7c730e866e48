// WiFi Task - Verbindet mit WLAN und managed Connection
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{IpAddress, Ipv4Address, Runner, Stack, dns::DnsQueryType};
use embassy_time::{Duration, Timer, with_timeout};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice};

use crate::config::{
    DNS_TIMEOUT_SECS, WIFI_BACKOFF_SECS, WIFI_PASSWORD, WIFI_RETRY_DELAY_SECS, WIFI_SSID,
    WIFI_TRY_MAX,
};

/// WiFi Connection Task
///
/// Managed die WiFi-Verbindung:
/// - Verbindet mit Access Point
/// - Nach `WIFI_TRY_MAX` Fehlversuchen am Stück längere Pause
/// - Überwacht Verbindung und reconnected bei Bedarf
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    info!("WiFi: Starting connection task");
    let mut attempts: u8 = 0;

    loop {
        if matches!(controller.is_started(), Ok(false)) {
            info!("WiFi: Configuring and starting...");

            // Configure WiFi station mode
            let client_config = ModeConfig::Client(
                ClientConfig::default()
                    .with_ssid(WIFI_SSID.into())
                    .with_password(WIFI_PASSWORD.into()),
            );

            if let Err(e) = controller.set_config(&client_config) {
                error!("WiFi: Failed to set configuration: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }

            if let Err(e) = controller.start_async().await {
                error!("WiFi: Failed to start: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                continue;
            }

            info!("WiFi: Started successfully");
        }

        // Connect to AP
        attempts += 1;
        info!(
            "WiFi: Connecting to '{}' (attempt {}/{})...",
            WIFI_SSID, attempts, WIFI_TRY_MAX
        );
        match controller.connect_async().await {
            Ok(_) => {
                info!("WiFi: Connected successfully!");
                attempts = 0;
            }
            Err(e) => {
                error!("WiFi: Connection failed: {}", Debug2Format(&e));
                if attempts >= WIFI_TRY_MAX {
                    error!(
                        "WiFi: Giving up after {} attempts, retrying in {}s",
                        attempts, WIFI_BACKOFF_SECS
                    );
                    attempts = 0;
                    Timer::after(Duration::from_secs(WIFI_BACKOFF_SECS)).await;
                } else {
                    Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
                }
                continue;
            }
        }

        // Wait for disconnect
        info!("WiFi: Waiting for disconnect event...");
        controller
            .wait_for_event(esp_radio::wifi::WifiEvent::StaDisconnected)
            .await;
        warn!("WiFi: Disconnected from AP, will retry...");

        Timer::after(Duration::from_secs(2)).await;
    }
}

/// Network Task
///
/// Überwacht den Netzwerk-Stack:
/// - Prozessiert Netzwerk-Pakete
/// - Managed TCP/IP Stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// DHCP Monitor Task
///
/// Wartet bis eine IP-Adresse vom DHCP-Server erhalten wurde
/// und loggt dann die Netzwerk-Konfiguration
#[embassy_executor::task]
pub async fn dhcp_task(stack: &'static Stack<'static>) {
    wait_for_link(stack).await;
    info!("WiFi: Link is up, waiting for IP address...");

    loop {
        if let Some(config) = stack.config_v4() {
            info!("WiFi: Got IP address!");
            info!("  IP:      {}", Debug2Format(&config.address.address()));
            info!("  Gateway: {}", Debug2Format(&config.gateway));
            info!("  DNS:     {}", Debug2Format(&config.dns_servers));
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}

async fn wait_for_link(stack: &'static Stack<'static>) {
    while !stack.is_link_up() {
        Timer::after(Duration::from_millis(500)).await;
    }
}

/// Wartet bis Netzwerk-Verbindung verfügbar ist
///
/// Prüft kontinuierlich Link-Status und DHCP-Konfiguration.
pub async fn wait_for_network(stack: &'static Stack<'static>) {
    loop {
        if stack.is_link_up() && stack.config_v4().is_some() {
            break;
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}

/// Fehler bei der DNS-Auflösung
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum DnsError {
    ResolutionFailed,
    Timeout,
}

/// Löst Hostname zu IPv4-Adresse auf
///
/// Nutzt embassy-net DNS-Stack mit konfigurierbarem Timeout.
pub async fn resolve_hostname(
    stack: &'static Stack<'static>,
    hostname: &str,
) -> Result<Ipv4Address, DnsError> {
    let result = with_timeout(
        Duration::from_secs(DNS_TIMEOUT_SECS),
        stack.dns_query(hostname, DnsQueryType::A),
    )
    .await;

    match result {
        Ok(Ok(addrs)) => addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(ipv4) => Some(*ipv4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(DnsError::ResolutionFailed),
        Ok(Err(_)) => Err(DnsError::ResolutionFailed),
        Err(_) => Err(DnsError::Timeout),
    }
}
