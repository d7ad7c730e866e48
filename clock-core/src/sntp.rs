//! SNTP (RFC 4330) Paket-Kodierung
//!
//! Nur das Nötigste für einen Client: Anfrage bauen, Antwort prüfen und den
//! Transmit-Timestamp in Unix-Zeit umrechnen. Der UDP-Transport liegt in der
//! Firmware.

use core::fmt;

/// Größe eines SNTP-Pakets ohne Extensions
pub const NTP_PACKET_SIZE: usize = 48;

/// Standard-Port für NTP
pub const NTP_PORT: u16 = 123;

/// Sekunden zwischen 1900-01-01 (NTP-Epoch) und 1970-01-01 (Unix-Epoch)
pub const NTP_UNIX_OFFSET: u32 = 2_208_988_800;

const LEAP_NO_WARNING: u8 = 0;
const LEAP_UNSYNCHRONIZED: u8 = 3;
const VERSION: u8 = 4;
const MODE_CLIENT: u8 = 3;
const MODE_SERVER: u8 = 4;

/// Fehler beim Auswerten einer SNTP-Antwort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SntpError {
    /// Paket kürzer als 48 Bytes
    TooShort { len: usize },
    /// Kein Server-Paket (Mode != 4)
    UnexpectedMode { mode: u8 },
    /// Stratum 0: Server verweigert die Auskunft (Kiss-o'-Death)
    KissOfDeath,
    /// Server ist selbst nicht synchronisiert
    Unsynchronized,
    /// Transmit-Timestamp liegt vor 1970
    InvalidTimestamp,
}

impl fmt::Display for SntpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { len } => write!(f, "packet too short ({} bytes)", len),
            Self::UnexpectedMode { mode } => write!(f, "unexpected mode {}", mode),
            Self::KissOfDeath => f.write_str("kiss-o'-death from server"),
            Self::Unsynchronized => f.write_str("server not synchronized"),
            Self::InvalidTimestamp => f.write_str("invalid transmit timestamp"),
        }
    }
}

impl core::error::Error for SntpError {}

/// Baut eine Client-Anfrage (LI = 0, VN = 4, Mode = 3)
pub fn request_packet() -> [u8; NTP_PACKET_SIZE] {
    let mut packet = [0u8; NTP_PACKET_SIZE];
    packet[0] = (LEAP_NO_WARNING << 6) | (VERSION << 3) | MODE_CLIENT;
    packet
}

/// Wertet eine Server-Antwort aus und liefert die Unix-Zeit in Sekunden
///
/// Die Sekunden-Nachkommastellen werden auf die nächste Sekunde gerundet.
pub fn parse_response(packet: &[u8]) -> Result<u32, SntpError> {
    if packet.len() < NTP_PACKET_SIZE {
        return Err(SntpError::TooShort { len: packet.len() });
    }

    let leap = packet[0] >> 6;
    let mode = packet[0] & 0b111;
    let stratum = packet[1];

    if mode != MODE_SERVER {
        return Err(SntpError::UnexpectedMode { mode });
    }
    if stratum == 0 {
        return Err(SntpError::KissOfDeath);
    }
    if leap == LEAP_UNSYNCHRONIZED {
        return Err(SntpError::Unsynchronized);
    }

    let seconds = u32::from_be_bytes([packet[40], packet[41], packet[42], packet[43]]);
    let fraction = u32::from_be_bytes([packet[44], packet[45], packet[46], packet[47]]);

    let unix = seconds
        .checked_sub(NTP_UNIX_OFFSET)
        .filter(|&unix| unix != 0)
        .ok_or(SntpError::InvalidTimestamp)?;

    Ok(if fraction >= 0x8000_0000 {
        unix.wrapping_add(1)
    } else {
        unix
    })
}

#[cfg(feature = "defmt")]
impl defmt::Format for SntpError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SntpError::TooShort { len } => defmt::write!(fmt, "packet too short ({})", len),
            SntpError::UnexpectedMode { mode } => defmt::write!(fmt, "unexpected mode {}", mode),
            SntpError::KissOfDeath => defmt::write!(fmt, "kiss-o'-death"),
            SntpError::Unsynchronized => defmt::write!(fmt, "server unsynchronized"),
            SntpError::InvalidTimestamp => defmt::write!(fmt, "invalid timestamp"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(ntp_seconds: u32, fraction: u32) -> [u8; NTP_PACKET_SIZE] {
        let mut packet = [0u8; NTP_PACKET_SIZE];
        packet[0] = (VERSION << 3) | MODE_SERVER;
        packet[1] = 2;
        packet[40..44].copy_from_slice(&ntp_seconds.to_be_bytes());
        packet[44..48].copy_from_slice(&fraction.to_be_bytes());
        packet
    }

    #[test]
    fn test_request_header() {
        let packet = request_packet();
        assert_eq!(packet[0], 0x23);
        assert!(packet[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_parse_response() {
        let packet = response(NTP_UNIX_OFFSET + 1_700_000_000, 0);
        assert_eq!(parse_response(&packet), Ok(1_700_000_000));
    }

    #[test]
    fn test_parse_response_rounds_fraction() {
        let packet = response(NTP_UNIX_OFFSET + 1_700_000_000, 0x8000_0000);
        assert_eq!(parse_response(&packet), Ok(1_700_000_001));
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(
            parse_response(&[0u8; 12]),
            Err(SntpError::TooShort { len: 12 })
        );
    }

    #[test]
    fn test_parse_client_packet_rejected() {
        assert_eq!(
            parse_response(&request_packet()),
            Err(SntpError::UnexpectedMode { mode: 3 })
        );
    }

    #[test]
    fn test_parse_kiss_of_death() {
        let mut packet = response(NTP_UNIX_OFFSET + 1, 0);
        packet[1] = 0;
        assert_eq!(parse_response(&packet), Err(SntpError::KissOfDeath));
    }

    #[test]
    fn test_parse_unsynchronized() {
        let mut packet = response(NTP_UNIX_OFFSET + 1, 0);
        packet[0] |= LEAP_UNSYNCHRONIZED << 6;
        assert_eq!(parse_response(&packet), Err(SntpError::Unsynchronized));
    }

    #[test]
    fn test_parse_timestamp_before_unix_epoch() {
        let packet = response(1_000, 0);
        assert_eq!(parse_response(&packet), Err(SntpError::InvalidTimestamp));
    }
}
