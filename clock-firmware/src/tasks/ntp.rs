// NTP - Holt die aktuelle Unix-Zeit per SNTP über UDP
use defmt::{Debug2Format, info, warn};
use embassy_net::Stack;
use embassy_net::udp::{PacketMetadata, UdpSocket};
use embassy_time::{Duration, with_timeout};

use clock_core::sntp::{self, NTP_PACKET_SIZE, NTP_PORT, SntpError};

use crate::config::{
    NTP_LOCAL_PORT, NTP_TIMEOUT_SECS, TIME_SOURCE_PRIMARY, TIME_SOURCE_SECONDARY, UDP_BUFFER_SIZE,
};
use crate::tasks::wifi::{DnsError, resolve_hostname};

/// Fragt die NTP-Server nacheinander ab (primär, dann Ausweich)
///
/// Liefert die Unix-Epoch der ersten gültigen Antwort.
pub async fn fetch_epoch(stack: &'static Stack<'static>) -> Result<u32, NtpError> {
    match query_server(stack, TIME_SOURCE_PRIMARY).await {
        Ok(epoch) => Ok(epoch),
        Err(e) => {
            warn!(
                "NTP: '{}' failed: {}, trying '{}'",
                TIME_SOURCE_PRIMARY, e, TIME_SOURCE_SECONDARY
            );
            query_server(stack, TIME_SOURCE_SECONDARY).await
        }
    }
}

async fn query_server(stack: &'static Stack<'static>, host: &str) -> Result<u32, NtpError> {
    info!("NTP: Resolving '{}'...", host);
    let server_ip = resolve_hostname(stack, host).await?;
    info!("NTP: Resolved to {}", Debug2Format(&server_ip));

    let mut rx_meta = [PacketMetadata::EMPTY; 2];
    let mut rx_buffer = [0u8; UDP_BUFFER_SIZE];
    let mut tx_meta = [PacketMetadata::EMPTY; 2];
    let mut tx_buffer = [0u8; UDP_BUFFER_SIZE];
    let mut socket = UdpSocket::new(
        *stack,
        &mut rx_meta,
        &mut rx_buffer,
        &mut tx_meta,
        &mut tx_buffer,
    );
    socket
        .bind(NTP_LOCAL_PORT)
        .map_err(|_| NtpError::BindFailed)?;

    let request = sntp::request_packet();
    socket
        .send_to(&request, (server_ip, NTP_PORT))
        .await
        .map_err(|_| NtpError::SendFailed)?;

    let mut response = [0u8; NTP_PACKET_SIZE];
    let (len, _from) = with_timeout(
        Duration::from_secs(NTP_TIMEOUT_SECS),
        socket.recv_from(&mut response),
    )
    .await
    .map_err(|_| NtpError::Timeout)?
    .map_err(|_| NtpError::ReceiveFailed)?;

    let epoch = sntp::parse_response(&response[..len])?;
    info!("NTP: '{}' answered with epoch {}", host, epoch);
    Ok(epoch)
}

/// NTP Fehler-Typen
#[derive(Debug)]
pub enum NtpError {
    Dns(DnsError),
    BindFailed,
    SendFailed,
    ReceiveFailed,
    Timeout,
    Packet(SntpError),
}

impl From<DnsError> for NtpError {
    fn from(e: DnsError) -> Self {
        NtpError::Dns(e)
    }
}

impl From<SntpError> for NtpError {
    fn from(e: SntpError) -> Self {
        NtpError::Packet(e)
    }
}

impl defmt::Format for NtpError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            NtpError::Dns(e) => defmt::write!(fmt, "DNS: {}", e),
            NtpError::BindFailed => defmt::write!(fmt, "UDP bind failed"),
            NtpError::SendFailed => defmt::write!(fmt, "UDP send failed"),
            NtpError::ReceiveFailed => defmt::write!(fmt, "UDP receive failed"),
            NtpError::Timeout => defmt::write!(fmt, "no answer"),
            NtpError::Packet(e) => defmt::write!(fmt, "bad packet: {}", e),
        }
    }
}
