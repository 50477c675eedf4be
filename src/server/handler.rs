//! TCP server: accept connections, frame requests, dispatch, reply.
//!
//! One tokio task per accepted connection; connections share nothing but
//! the directory, so no locking is involved. Each task runs a strictly
//! sequential read/dispatch/write loop, so responses leave in request
//! order with matching correlation ids.

use crate::directory::TopicDirectory;
use crate::error::{Result, RunestreamError};
use crate::observability::observability;
use crate::protocol::{decode_request, end_of_stream_check, handle_request};
use bytes::BytesMut;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};

/// Run the broker head (binds to addr).
pub async fn run_server(directory: Arc<dyn TopicDirectory>, addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    run_server_on_listener(directory, listener).await
}

/// Run the broker head on an existing listener (e.g. from bind("127.0.0.1:0")).
pub async fn run_server_on_listener(
    directory: Arc<dyn TopicDirectory>,
    listener: TcpListener,
) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Runestream broker head listening on {}", addr);
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(x) => x,
            Err(e) => {
                error!("accept error: {}", e);
                continue;
            }
        };
        observability().record_connection();
        let directory = Arc::clone(&directory);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(directory, stream).await {
                if matches!(
                    e,
                    RunestreamError::Protocol(_)
                        | RunestreamError::TruncatedFrame { .. }
                        | RunestreamError::ShortHeader(_)
                ) {
                    observability().record_protocol_error();
                }
                error!("connection {} error: {}", peer, e);
            }
        });
    }
}

async fn handle_connection(
    directory: Arc<dyn TopicDirectory>,
    mut stream: TcpStream,
) -> Result<()> {
    let mut read_buf = BytesMut::with_capacity(4096);
    loop {
        read_buf.reserve(4096);
        let n = stream.read_buf(&mut read_buf).await?;
        if n == 0 {
            // Peer closed. Clean unless a declared frame never finished.
            end_of_stream_check(&read_buf)?;
            break;
        }
        while let Some(req) = decode_request(&mut read_buf)? {
            let span = tracing::info_span!(
                "runestream.request",
                api_key = req.header.api_key,
                version = req.header.api_version,
            );
            let _entered = span.enter();
            let started = Instant::now();
            info!(correlation_id = req.header.correlation_id, "request");
            match handle_request(directory.as_ref(), &req.header, &req.body)? {
                Some(framed) => {
                    observability().record_request(started.elapsed(), true);
                    info!(len = framed.len(), "response");
                    stream.write_all(&framed).await?;
                    stream.flush().await?;
                }
                None => observability().record_unhandled(),
            }
        }
    }
    Ok(())
}
