// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The live channel: one background task owning the WebSocket.
//!
//! `connect` is idempotent (the manager task is spawned at most once)
//! and `dispose` is idempotent (cancelling an already-cancelled token
//! is a no-op). A disposed channel never reconnects; a replaced channel
//! must be disposed before its successor connects so two managers never
//! deliver for the same subscription.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use rv_core::event::summarize_frame;
use rv_core::LiveEvent;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::{Bytes, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use crate::backoff::Backoff;
use crate::config::StreamConfig;

const EVENT_BUFFER: usize = 256;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct LiveChannel {
    config: StreamConfig,
    cancel: CancellationToken,
    started: AtomicBool,
    tx: mpsc::Sender<LiveEvent>,
}

impl LiveChannel {
    /// Build a channel and the receiving end of its event stream. No
    /// connection is attempted until [`connect`](Self::connect).
    pub fn new(config: StreamConfig) -> (Self, mpsc::Receiver<LiveEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let channel = Self {
            config,
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
            tx,
        };
        (channel, rx)
    }

    /// Spawn the manager task. Subsequent calls are no-ops.
    pub fn connect(&self) {
        if self.cancel.is_cancelled() || self.started.swap(true, Ordering::SeqCst) {
            return;
        }
        let config = self.config.clone();
        let cancel = self.cancel.clone();
        let tx = self.tx.clone();
        tokio::spawn(manage(config, cancel, tx));
    }

    /// Stop the manager: close the socket, stop timers, never
    /// reconnect. Safe to call more than once.
    pub fn dispose(&self) {
        self.cancel.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for LiveChannel {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Connect/run/backoff loop. Exits on dispose or when the consumer
/// drops the receiver.
async fn manage(config: StreamConfig, cancel: CancellationToken, tx: mpsc::Sender<LiveEvent>) {
    let mut backoff = Backoff::new(config.reconnect_base_delay_ms, config.reconnect_max_delay_ms);
    loop {
        if cancel.is_cancelled() {
            return;
        }
        let connected = tokio::select! {
            _ = cancel.cancelled() => return,
            res = connect_async(&config.url) => res,
        };
        match connected {
            Ok((socket, _)) => {
                // Attempts reset only on a successful open.
                backoff.reset();
                tracing::info!(url = %config.url, "live channel connected");
                if !run_connection(socket, &config, &cancel, &tx).await {
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(url = %config.url, error = %e, "live channel connect failed");
            }
        }
        let delay = backoff.next_delay();
        tracing::warn!(
            delay_ms = delay.as_millis() as u64,
            attempts = backoff.attempts(),
            "live channel reconnecting",
        );
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(delay) => {}
        }
    }
}

/// Drive one connection until it drops. Returns true to reconnect,
/// false to stop for good.
async fn run_connection(
    socket: Socket,
    config: &StreamConfig,
    cancel: &CancellationToken,
    tx: &mpsc::Sender<LiveEvent>,
) -> bool {
    let (mut write, mut read) = socket.split();
    let heartbeat = Duration::from_millis(config.heartbeat_interval_ms);
    let idle_timeout = Duration::from_millis(config.idle_timeout_ms);
    // interval_at so the first ping waits a full period
    let mut ticker = tokio::time::interval_at(Instant::now() + heartbeat, heartbeat);
    let mut idle_deadline: Option<Instant> = None;

    loop {
        let armed = idle_deadline;
        let idle = async move {
            match armed {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = write.send(Message::Close(None)).await;
                return false;
            }

            _ = ticker.tick() => {
                if write.send(Message::Ping(Bytes::new())).await.is_err() {
                    tracing::warn!("live channel ping failed");
                    return true;
                }
                // Each ping re-arms the idle deadline; a pong disarms it.
                idle_deadline = Some(Instant::now() + idle_timeout);
            }

            _ = idle => {
                tracing::warn!("heartbeat timeout, forcing reconnect");
                return true;
            }

            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    tracing::info!(target: "renova::stream", "{}", summarize_frame(text.as_str()));
                    let event = LiveEvent::parse_frame(text.as_str());
                    if tx.send(event).await.is_err() {
                        // Consumer gone; nothing left to deliver to.
                        return false;
                    }
                }
                Some(Ok(Message::Pong(_))) => {
                    idle_deadline = None;
                }
                Some(Ok(Message::Ping(payload))) => {
                    if write.send(Message::Pong(payload)).await.is_err() {
                        return true;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::warn!(?frame, "live channel closed by peer");
                    return true;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "live channel read error");
                    return true;
                }
                None => {
                    tracing::warn!("live channel stream ended");
                    return true;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
