//! TCP transport: one JSON request per line in, one JSON response per line out.

use std::net::SocketAddr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::protocol::{encode_response, Response};
use crate::session::GameSession;

/// Bind the listener described by `config`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let listener = TcpListener::bind(config.listen_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening");
    Ok(listener)
}

/// Accept connections forever, serving each on its own task.
///
/// Only an accept failure ends the loop; a failing connection is logged
/// and dropped.
pub async fn serve(
    listener: TcpListener,
    session: GameSession,
    max_line_bytes: usize,
) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let session = session.clone();
        tokio::spawn(async move {
            tracing::info!(%peer, "Client connected");
            match handle_connection(stream, peer, &session, max_line_bytes).await {
                Ok(()) => tracing::info!(%peer, "Client disconnected"),
                Err(err) => tracing::warn!(%peer, %err, "Connection closed with error"),
            }
        });
    }
}

/// Serve one client until it closes the connection.
///
/// Lines longer than `max_line_bytes` are skipped up to their newline and
/// answered with an error; the connection stays open.
pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    session: &GameSession,
    max_line_bytes: usize,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();

    while let Some(frame) = next_frame(&mut reader, &mut buffer, max_line_bytes).await? {
        let response = match frame {
            Frame::Line(line) if line.trim().is_empty() => continue,
            Frame::Line(line) => {
                tracing::trace!(%peer, request = %line.trim_end(), "Replying");
                session.handle_line(&line).await
            }
            Frame::TooLong => {
                tracing::warn!(%peer, limit = max_line_bytes, "Request line too long");
                Response::Error {
                    message: format!("request line exceeds {max_line_bytes} bytes"),
                }
            }
        };
        writer.write_all(encode_response(&response)?.as_bytes()).await?;
    }

    writer.shutdown().await?;
    Ok(())
}

/// One unit read from a client.
enum Frame {
    Line(String),
    TooLong,
}

/// Read the next line without buffering more than `max_line_bytes` of it.
async fn next_frame<R>(
    reader: &mut R,
    buffer: &mut Vec<u8>,
    max_line_bytes: usize,
) -> Result<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    // Room for the newline itself
    let limit = max_line_bytes as u64 + 1;

    buffer.clear();
    let read = (&mut *reader).take(limit).read_until(b'\n', buffer).await?;
    if read == 0 {
        return Ok(None);
    }
    if read as u64 == limit && buffer.last() != Some(&b'\n') {
        loop {
            buffer.clear();
            let read = (&mut *reader).take(limit).read_until(b'\n', buffer).await?;
            if read == 0 || buffer.last() == Some(&b'\n') {
                break;
            }
        }
        return Ok(Some(Frame::TooLong));
    }
    Ok(Some(Frame::Line(String::from_utf8_lossy(buffer).into_owned())))
}
