//! Transport loop: line-delimited JSON-RPC over a byte stream.
//!
//! One complete message per newline-terminated line. Every decoded request
//! is dispatched on its own task, so independent tool calls run concurrently
//! and responses may leave in any order; callers correlate by id, never by
//! position. Generic over the streams so tests can drive the loop through
//! `tokio::io::duplex`.

pub mod dispatch;
pub mod rpc;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub use dispatch::Dispatcher;

use crate::error::Result;
use rpc::{RpcRequest, RpcResponse};

/// Serve MCP over the given streams until the input closes.
///
/// When the input ends the loop stops accepting new requests; in-flight
/// calls complete (or time out) on their own schedule and their responses
/// drain through the writer before it exits. A writer I/O failure stops
/// further writes without aborting in-flight calls.
pub async fn serve<R, W>(input: R, output: W, dispatcher: Arc<Dispatcher>) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<String>(64);

    let writer = tokio::spawn(async move {
        let mut output = BufWriter::new(output);
        while let Some(frame) = rx.recv().await {
            if let Err(e) = write_frame(&mut output, &frame).await {
                error!(error = %e, "cannot write response frame, stopping writes");
                break;
            }
        }
    });

    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => {
                let dispatcher = Arc::clone(&dispatcher);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let Some(response) = dispatcher.dispatch(request).await else {
                        return;
                    };
                    match serde_json::to_string(&response) {
                        Ok(frame) => {
                            let _ = tx.send(frame).await;
                        }
                        Err(e) => error!(error = %e, "cannot serialize response frame"),
                    }
                });
            }
            Err(e) => match rpc::recover_id(&line) {
                Some(id) => {
                    let response =
                        RpcResponse::error(id, rpc::PARSE_ERROR, format!("Parse error: {e}"));
                    if let Ok(frame) = serde_json::to_string(&response) {
                        let _ = tx.send(frame).await;
                    }
                }
                None => warn!(error = %e, "dropping uncorrelatable frame"),
            },
        }
    }

    info!("input stream closed, draining in-flight responses");
    drop(tx);
    let _ = writer.await;
    Ok(())
}

async fn write_frame<W: AsyncWrite + Unpin>(
    output: &mut BufWriter<W>,
    frame: &str,
) -> std::io::Result<()> {
    output.write_all(frame.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
