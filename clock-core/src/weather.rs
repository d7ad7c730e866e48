//! OpenWeatherMap-Antwort → Sonnenaufgang/-untergang
//!
//! Die Firmware schickt ein einfaches HTTP/1.0 GET an `/data/2.5/weather`
//! und übergibt die komplette Antwort an [`parse_weather_response`].

use core::fmt;

use serde::Deserialize;

use crate::state::SunTimes;

/// Fehler beim Auswerten der Wetter-Antwort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherError {
    /// Status-Zeile oder Header-Ende nicht gefunden
    MalformedHttp,
    /// HTTP-Status ungleich 200
    HttpStatus(u16),
    /// JSON-Body nicht lesbar oder `sys.sunrise`/`sys.sunset` fehlen
    InvalidJson,
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHttp => f.write_str("malformed HTTP response"),
            Self::HttpStatus(status) => write!(f, "HTTP status {}", status),
            Self::InvalidJson => f.write_str("invalid weather JSON"),
        }
    }
}

impl core::error::Error for WeatherError {}

#[derive(Deserialize)]
struct WeatherBody {
    sys: WeatherSys,
}

#[derive(Deserialize)]
struct WeatherSys {
    sunrise: u32,
    sunset: u32,
}

/// Trennt eine HTTP-Antwort in Status-Code und Body
pub fn split_http_response(response: &[u8]) -> Result<(u16, &[u8]), WeatherError> {
    let header_end = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .ok_or(WeatherError::MalformedHttp)?;

    // "HTTP/1.1 200 OK"
    let status_line = response[..header_end]
        .split(|&b| b == b'\r')
        .next()
        .ok_or(WeatherError::MalformedHttp)?;
    if !status_line.starts_with(b"HTTP/") {
        return Err(WeatherError::MalformedHttp);
    }

    let status = status_line
        .split(|&b| b == b' ')
        .nth(1)
        .and_then(|code| core::str::from_utf8(code).ok())
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or(WeatherError::MalformedHttp)?;

    Ok((status, &response[header_end + 4..]))
}

/// Liest `sys.sunrise` und `sys.sunset` aus dem JSON-Body
///
/// Alle anderen Felder der Antwort werden ignoriert.
pub fn parse_sun_times(body: &[u8]) -> Result<SunTimes, WeatherError> {
    let (body, _) = serde_json_core::from_slice::<WeatherBody>(body)
        .map_err(|_| WeatherError::InvalidJson)?;

    Ok(SunTimes {
        sunrise: body.sys.sunrise,
        sunset: body.sys.sunset,
    })
}

/// Komplette HTTP-Antwort → Sonnenzeiten
pub fn parse_weather_response(response: &[u8]) -> Result<SunTimes, WeatherError> {
    match split_http_response(response)? {
        (200, body) => parse_sun_times(body),
        (status, _) => Err(WeatherError::HttpStatus(status)),
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for WeatherError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            WeatherError::MalformedHttp => defmt::write!(fmt, "malformed HTTP response"),
            WeatherError::HttpStatus(status) => defmt::write!(fmt, "HTTP status {}", status),
            WeatherError::InvalidJson => defmt::write!(fmt, "invalid weather JSON"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_http_response() {
        let response = b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{}";
        assert_eq!(split_http_response(response), Ok((200, &b"{}"[..])));
    }

    #[test]
    fn test_split_missing_header_end() {
        assert_eq!(
            split_http_response(b"HTTP/1.1 200 OK\r\n"),
            Err(WeatherError::MalformedHttp)
        );
    }

    #[test]
    fn test_split_not_http() {
        assert_eq!(
            split_http_response(b"SSH-2.0\r\n\r\n"),
            Err(WeatherError::MalformedHttp)
        );
    }

    #[test]
    fn test_unauthorized() {
        let response = b"HTTP/1.1 401 Unauthorized\r\n\r\n{\"cod\":401}";
        assert_eq!(
            parse_weather_response(response),
            Err(WeatherError::HttpStatus(401))
        );
    }

    #[test]
    fn test_parse_minimal_body() {
        let body = br#"{"sys":{"sunrise":1485762037,"sunset":1485794875}}"#;
        assert_eq!(
            parse_sun_times(body),
            Ok(SunTimes {
                sunrise: 1_485_762_037,
                sunset: 1_485_794_875
            })
        );
    }

    #[test]
    fn test_parse_missing_sys() {
        assert_eq!(
            parse_sun_times(br#"{"cod":200}"#),
            Err(WeatherError::InvalidJson)
        );
    }
}
