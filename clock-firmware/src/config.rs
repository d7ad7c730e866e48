// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use clock_core::{Hsv, Palette, TimeFormat, hsv2rgb};

// ============================================================================
// Diagnose-Ausgaben
// ============================================================================

/// Diagnose-Ausgaben einkompiliert? (Cargo-Feature `debug-output`)
pub const DEBUG_OUTPUT: bool = cfg!(feature = "debug-output");

// ============================================================================
// LED Konfiguration
// ============================================================================

/// Anzahl der LEDs im Strip: 4 Digits × 7 Segmente + 2 Doppelpunkt
pub const NUM_SEGMENTS: usize = clock_core::NUM_SEGMENTS;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2811/WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Standard-Farbe im HSV-Farbraum (wird mit USE_HSV aktiviert)
pub const DEFAULT_HUE: u8 = 0;
pub const DEFAULT_SATURATION: u8 = 255;
pub const DEFAULT_VALUE: u8 = 127;

/// HSV-Farbe statt ON_COLOUR für eingeschaltete Segmente verwenden
pub const USE_HSV: bool = false;

/// Farbe für eingeschaltete Segmente (wenn USE_HSV = false)
pub const ON_COLOUR: rgb::RGB8 = Palette::RED;

/// Farbe für ausgeschaltete Segmente
pub const OFF_COLOUR: rgb::RGB8 = Palette::BLACK;

/// Farbe für Hinweise (z.B. Uhrzeit noch nicht synchronisiert)
pub const ALERT_COLOUR: rgb::RGB8 = Palette::WHITE;

/// Helligkeit am Tag und in der Nacht (1-255)
pub const LED_BRIGHT: u8 = clock_core::LED_BRIGHT;
pub const LED_DIM: u8 = clock_core::LED_DIM;

/// Farb-Palette aus obigen Werten
pub fn palette() -> Palette {
    let palette = Palette {
        on: ON_COLOUR,
        off: OFF_COLOUR,
        alert: ALERT_COLOUR,
    };
    if USE_HSV {
        palette.with_on(hsv2rgb(Hsv {
            hue: DEFAULT_HUE,
            sat: DEFAULT_SATURATION,
            val: DEFAULT_VALUE,
        }))
    } else {
        palette
    }
}

// ============================================================================
// Anzeige
// ============================================================================

/// 12- oder 24-Stunden-Anzeige
pub const TIME_FORMAT: TimeFormat = TimeFormat::Hour24;

/// Wie oft der Anzeige-Task das Tick-Flag prüft (Millisekunden)
pub const DISPLAY_POLL_MS: u64 = 50;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Maximale Anzahl Verbindungsversuche am Stück
pub const WIFI_TRY_MAX: u8 = 10;

/// Pause zwischen zwei Verbindungsversuchen in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Pause nach WIFI_TRY_MAX fehlgeschlagenen Versuchen in Sekunden
pub const WIFI_BACKOFF_SECS: u64 = 60;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// Zeit Konfiguration
// ============================================================================

/// POSIX-Zeitzone (siehe https://github.com/nayarsystems/posix_tz_db/blob/master/zones.csv)
pub const TIMEZONE: &str = "GMT0BST,M3.5.0/01,M10.5.0/02";

/// Fester UTC-Versatz in Sekunden, falls TIMEZONE nicht lesbar ist
pub const UTC_OFFSET_SECS: i32 = 0;

/// Versatz der Sommerzeit, falls der TZ-String keinen angibt
pub const DST_OFFSET_SECS: i32 = 3600;

/// NTP-Server (primär und Ausweich)
pub const TIME_SOURCE_PRIMARY: &str = "pool.ntp.org";
pub const TIME_SOURCE_SECONDARY: &str = "time.nist.gov";

/// Lokaler UDP-Port für NTP-Anfragen
pub const NTP_LOCAL_PORT: u16 = 12345;

/// Wartezeit auf NTP-Antwort in Sekunden
pub const NTP_TIMEOUT_SECS: u64 = 5;

/// Uhrzeit für den täglichen NTP- und Wetter-Refresh
pub const REFRESH_HOUR: u8 = 3;
pub const REFRESH_MINUTE: u8 = 0;

/// Pause nach fehlgeschlagenem Refresh in Sekunden
pub const REFRESH_RETRY_DELAY_SECS: u64 = 30;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Wetter / Dimmen
// ============================================================================

/// Anzeige zwischen Sonnenuntergang und Sonnenaufgang dimmen
pub const USE_DIM: bool = true;

/// OpenWeatherMap API Key
/// Wird zur Build-Zeit aus der Environment Variable OWM_API_KEY geladen
pub const OWM_API_KEY: &str = env!(
    "OWM_API_KEY",
    "OpenWeatherMap API Key nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Breitengrad des Standorts
pub const OWM_LAT: &str = env!(
    "OWM_LAT",
    "Breitengrad nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Längengrad des Standorts
pub const OWM_LON: &str = env!(
    "OWM_LON",
    "Längengrad nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// OpenWeatherMap Host und Port (HTTP, unverschlüsselt)
pub const OWM_HOST: &str = "api.openweathermap.org";
pub const OWM_PORT: u16 = 80;

/// Timeout für die Wetter-Abfrage in Sekunden
pub const OWM_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Buffer-Größen
// ============================================================================

/// Buffer für die HTTP-Anfrage (Request-Zeile + Header)
pub const HTTP_REQUEST_BUFFER_SIZE: usize = 256;

/// Buffer für die komplette HTTP-Antwort (Header + JSON ~ 1 KB)
pub const HTTP_RESPONSE_BUFFER_SIZE: usize = 2048;

/// TCP RX/TX Buffer-Größen in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;
pub const TCP_TX_BUFFER_SIZE: usize = 512;

/// UDP Buffer-Größe für NTP (ein Paket = 48 Bytes)
pub const UDP_BUFFER_SIZE: usize = 128;
