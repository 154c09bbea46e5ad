//! JSON-lines protocol server over any async reader/writer pair.

pub mod protocol;
pub mod session;

use serde::Serialize;
use tokio::io::{
    AsyncBufRead,
    AsyncBufReadExt,
    AsyncWrite,
    AsyncWriteExt,
};
use tokio::sync::mpsc;

pub use protocol::{
    Event,
    ProtocolError,
    Request,
    Response,
};
pub use session::Session;

/// Writes `message` as one JSON line and flushes.
async fn write_line<W, T>(writer: &mut W, message: &T) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

/// Serves requests from `reader` until end of input.
///
/// Priority per loop turn: pending toast events, then the next request line,
/// then the queued locale switch. A queued switch yields to at most one
/// request line: that line still sees the old locale with `pending: true`,
/// and the switch runs right after its response. A switch still queued at
/// end of input runs before returning.
///
/// # Errors
/// Reading from `reader` or writing to `writer` failed.
pub async fn serve<R, W>(reader: R, mut writer: W, session: &mut Session) -> Result<(), ProtocolError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (toast_tx, mut toast_rx) = mpsc::unbounded_channel();
    let _subscription = session.toasts().subscribe(move |toast| {
        if toast_tx.send(toast.clone()).is_err() {
            tracing::debug!(level = ?toast.level, "Toast receiver closed; dropping event");
        }
    });

    let mut lines = reader.lines();
    tracing::info!("Serving requests");

    loop {
        tokio::select! {
            biased;

            Some(toast) = toast_rx.recv() => {
                write_line(&mut writer, &Event::Toast(toast)).await?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let deferred = session.is_pending();
                let response = session.handle_line(&line);
                write_line(&mut writer, &response).await?;
                if deferred {
                    tracing::debug!("Running locale switch deferred behind input");
                    session.run_transition();
                }
            }
            () = std::future::ready(()), if session.is_pending() => {
                session.run_transition();
            }
        }
    }

    session.run_transition();

    while let Ok(toast) = toast_rx.try_recv() {
        write_line(&mut writer, &Event::Toast(toast)).await?;
    }

    tracing::info!("Input closed; shutting down");
    Ok(())
}
