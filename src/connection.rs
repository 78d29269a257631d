//! Per-connection request loop: reads commands off the socket, dispatches
//! them and writes replies back. Each connection runs in its own task.

use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::commands;
use crate::key_value_store::KeyValueStore;
use crate::resp::{RespError, RespValue};
use crate::server::ReplicationInfo;

/// Serves one client until it disconnects.
///
/// Command errors are written back as `-ERR ...` replies and never end the
/// session; only socket errors and EOF do. An undecodable buffer also gets an
/// error reply, after which the buffer is dropped: there is no reliable way
/// to find the start of the next value in a corrupt stream.
pub async fn handle_connection(
    mut stream: TcpStream,
    store: Arc<KeyValueStore>,
    replication: Arc<ReplicationInfo>,
) {
    let mut buffer = BytesMut::with_capacity(4096);

    loop {
        match stream.read_buf(&mut buffer).await {
            Ok(0) => {
                debug!("connection closed by peer");
                return;
            }
            Ok(_) => {}
            Err(error) => {
                warn!("failed to read from connection: {}", error);
                return;
            }
        }

        // Drain every complete request already buffered before reading again.
        loop {
            let request = match RespValue::decode(&mut buffer) {
                Ok(Some(request)) => request,
                Ok(None) | Err(RespError::Incomplete) => break,
                Err(error) => {
                    debug!("failed to decode request: {}", error);
                    let reply = RespValue::error(error.to_string());
                    if let Err(error) = write_reply(&mut stream, &reply).await {
                        warn!("failed to write to connection: {}", error);
                        return;
                    }
                    buffer.clear();
                    break;
                }
            };

            let reply = match commands::dispatch(request, &store, &replication).await {
                Ok(reply) => reply,
                Err(error) => RespValue::error(error.to_string()),
            };

            if let Err(error) = write_reply(&mut stream, &reply).await {
                warn!("failed to write to connection: {}", error);
                return;
            }
        }
    }
}

/// Encodes a reply and writes it out in full.
async fn write_reply<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    reply: &RespValue,
) -> std::io::Result<()> {
    writer.write_all(reply.encode().as_bytes()).await?;
    writer.flush().await
}
