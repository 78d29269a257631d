//! Replica bootstrap: announces this instance to its master over an already
//! established connection, one command per step.

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::info;

use crate::resp::{RespError, RespValue};

#[derive(Error, Debug)]
pub enum HandshakeError {
    #[error("Handshake failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid handshake reply: {0}")]
    Resp(#[from] RespError),
    #[error("Master closed the connection during the handshake")]
    ConnectionClosed,
}

/// Runs the handshake against the master: PING, then REPLCONF listening-port,
/// then REPLCONF capa psync2. Each step waits for a full reply before the next
/// command goes out; replies are logged and otherwise discarded.
///
/// Any failure is returned to the caller. A replica the master has not
/// acknowledged must not start serving.
pub async fn perform(stream: &mut TcpStream, listening_port: u16) -> Result<(), HandshakeError> {
    let port = listening_port.to_string();
    let steps = [
        command(&["PING"]),
        command(&["REPLCONF", "listening-port", &port]),
        command(&["REPLCONF", "capa", "psync2"]),
    ];

    let mut buffer = BytesMut::with_capacity(512);
    for step in steps {
        let reply = send_step(stream, &step, &mut buffer).await?;
        info!("handshake reply: {:?}", reply);
    }

    Ok(())
}

fn command(parts: &[&str]) -> RespValue {
    RespValue::Array(
        parts
            .iter()
            .map(|part| RespValue::BulkString(Some(part.to_string())))
            .collect(),
    )
}

/// Writes one command and reads one reply. The buffer is shared across steps
/// so a master that pipelines its replies loses nothing between calls.
async fn send_step(
    stream: &mut TcpStream,
    step: &RespValue,
    buffer: &mut BytesMut,
) -> Result<RespValue, HandshakeError> {
    stream.write_all(step.encode().as_bytes()).await?;
    stream.flush().await?;

    loop {
        match RespValue::decode(buffer) {
            Ok(Some(reply)) => return Ok(reply),
            Ok(None) | Err(RespError::Incomplete) => {
                let bytes_read = stream.read_buf(buffer).await?;
                if bytes_read == 0 {
                    return Err(HandshakeError::ConnectionClosed);
                }
            }
            Err(error) => return Err(error.into()),
        }
    }
}
