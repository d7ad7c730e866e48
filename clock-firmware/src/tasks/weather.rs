// Wetter - Holt Sonnenauf- und -untergang von OpenWeatherMap
use core::fmt::Write as _;

use defmt::{Debug2Format, info};
use embassy_net::{Stack, tcp::TcpSocket};
use embassy_time::Duration;
use heapless::String;

use clock_core::SunTimes;
use clock_core::weather::{WeatherError, parse_weather_response};

use crate::config::{
    HTTP_REQUEST_BUFFER_SIZE, HTTP_RESPONSE_BUFFER_SIZE, OWM_API_KEY, OWM_HOST, OWM_LAT, OWM_LON,
    OWM_PORT, OWM_TIMEOUT_SECS, TCP_RX_BUFFER_SIZE, TCP_TX_BUFFER_SIZE,
};
use crate::tasks::wifi::{DnsError, resolve_hostname};

/// Fragt das aktuelle Wetter ab und liefert Sonnenauf- und -untergang
///
/// Ablauf:
/// 1. DNS-Auflösung von `OWM_HOST`
/// 2. TCP-Verbindung, HTTP/1.0 GET (Server schließt nach der Antwort)
/// 3. Antwort bis EOF lesen, Status prüfen, JSON parsen
pub async fn fetch_sun_times(stack: &'static Stack<'static>) -> Result<SunTimes, FetchError> {
    info!("Weather: Resolving '{}'...", OWM_HOST);
    let host_ip = resolve_hostname(stack, OWM_HOST).await?;
    info!("Weather: Resolved to {}", Debug2Format(&host_ip));

    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];
    let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
    socket.set_timeout(Some(Duration::from_secs(OWM_TIMEOUT_SECS)));

    socket
        .connect((host_ip, OWM_PORT))
        .await
        .map_err(|_| FetchError::ConnectionFailed)?;

    let request = build_request()?;
    let mut sent = 0;
    while sent < request.len() {
        let n = socket
            .write(&request.as_bytes()[sent..])
            .await
            .map_err(|_| FetchError::WriteFailed)?;
        if n == 0 {
            return Err(FetchError::WriteFailed);
        }
        sent += n;
    }

    let mut response = [0u8; HTTP_RESPONSE_BUFFER_SIZE];
    let mut len = 0;
    loop {
        if len == response.len() {
            return Err(FetchError::ResponseTooLarge);
        }
        match socket.read(&mut response[len..]).await {
            Ok(0) => break,
            Ok(n) => len += n,
            Err(_) => return Err(FetchError::ReadFailed),
        }
    }
    socket.close();
    info!("Weather: Received {} bytes", len);

    let sun = parse_weather_response(&response[..len])?;
    info!(
        "Weather: sunrise {} sunset {}",
        sun.sunrise, sun.sunset
    );
    Ok(sun)
}

fn build_request() -> Result<String<HTTP_REQUEST_BUFFER_SIZE>, FetchError> {
    let mut request = String::new();
    write!(
        request,
        "GET /data/2.5/weather?lat={}&lon={}&appid={} HTTP/1.0\r\nHost: {}\r\nConnection: close\r\n\r\n",
        OWM_LAT, OWM_LON, OWM_API_KEY, OWM_HOST
    )
    .map_err(|_| FetchError::RequestTooLarge)?;
    Ok(request)
}

/// Wetter-Abfrage Fehler-Typen
#[derive(Debug)]
pub enum FetchError {
    Dns(DnsError),
    ConnectionFailed,
    RequestTooLarge,
    WriteFailed,
    ReadFailed,
    ResponseTooLarge,
    Response(WeatherError),
}

impl From<DnsError> for FetchError {
    fn from(e: DnsError) -> Self {
        FetchError::Dns(e)
    }
}

impl From<WeatherError> for FetchError {
    fn from(e: WeatherError) -> Self {
        FetchError::Response(e)
    }
}

impl defmt::Format for FetchError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FetchError::Dns(e) => defmt::write!(fmt, "DNS: {}", e),
            FetchError::ConnectionFailed => defmt::write!(fmt, "TCP connect failed"),
            FetchError::RequestTooLarge => defmt::write!(fmt, "request exceeds buffer"),
            FetchError::WriteFailed => defmt::write!(fmt, "TCP write failed"),
            FetchError::ReadFailed => defmt::write!(fmt, "TCP read failed"),
            FetchError::ResponseTooLarge => defmt::write!(fmt, "response exceeds buffer"),
            FetchError::Response(e) => defmt::write!(fmt, "bad response: {}", e),
        }
    }
}
