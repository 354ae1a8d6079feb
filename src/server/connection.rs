// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The per-session event loop.
//!
//! One task per interactive channel owns the [`Session`], the decoder, and the terminal. Client
//! bytes, resizes, and fetch results arrive over channels; every routed event triggers a redraw.

use std::sync::Arc;
use std::time::Duration;

use russh::server::Handle;
use russh::ChannelId;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::terminal::{spawn_forwarder, ChannelWriter, Outbound, SshTerminal};
use super::AppContext;
use crate::fetch::Fetcher;
use crate::input::{InputDecoder, InputEvent};
use crate::session::{event_for_input, Effect, Event, Session, Viewport, ZoneMap};

/// How long a lone ESC waits for the rest of an escape sequence.
pub const ESC_TIMEOUT: Duration = Duration::from_millis(50);

const INPUT_QUEUE: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ClientInput {
    Bytes(Vec<u8>),
    Resize(Viewport),
}

/// Starts the session task for `channel` and returns where to send client input.
/// Dropping the sender ends the session.
pub(crate) fn spawn(
    context: Arc<AppContext>,
    handle: Handle,
    channel: ChannelId,
    viewport: Viewport,
    shutdown: watch::Receiver<bool>,
) -> mpsc::Sender<ClientInput> {
    let (input_tx, input_rx) = mpsc::channel(INPUT_QUEUE);
    let (outbound, forwarder) = spawn_forwarder(handle, channel);
    tokio::spawn(async move {
        let exit_status = run(context, outbound.clone(), viewport, input_rx, shutdown).await;
        close_channel(outbound, forwarder, exit_status).await;
    });
    input_tx
}

/// Queues the final close and waits for the forwarder to drain. Returns whether the close
/// reached the forwarder.
async fn close_channel(
    outbound: mpsc::UnboundedSender<Outbound>,
    forwarder: JoinHandle<()>,
    exit_status: u32,
) -> bool {
    let queued = outbound.send(Outbound::Close { exit_status }).is_ok();
    if !queued {
        debug!(exit_status, "channel already gone; close not sent");
    }
    drop(outbound);
    if let Err(error) = forwarder.await {
        debug!(%error, "output forwarder did not finish");
    }
    queued
}

async fn run(
    context: Arc<AppContext>,
    outbound: mpsc::UnboundedSender<Outbound>,
    viewport: Viewport,
    mut inputs: mpsc::Receiver<ClientInput>,
    mut shutdown: watch::Receiver<bool>,
) -> u32 {
    let mut terminal = match SshTerminal::new(ChannelWriter::new(outbound), viewport) {
        Ok(terminal) => terminal,
        Err(error) => {
            warn!(%error, "failed to set up terminal");
            return 1;
        }
    };
    if let Err(error) = terminal.enter() {
        debug!(%error, "client went away during setup");
        return 1;
    }

    let mut session = Session::new(Arc::clone(&context.campuses), context.clock.clone(), viewport);
    let (loaded_tx, mut loaded_rx) = mpsc::channel::<Event>(1);
    let mut fetch = Some(spawn_fetch(&context.fetcher, loaded_tx.clone(), FetchMode::Cached));
    let mut decoder = InputDecoder::new();
    let mut zones = ZoneMap::new();
    let mut dirty = true;

    info!(width = viewport.width, height = viewport.height, "session started");
    loop {
        if dirty {
            match terminal.draw(&mut session, &context.theme) {
                Ok(outcome) => zones = outcome.zones,
                Err(error) => {
                    debug!(%error, "render failed; ending session");
                    break;
                }
            }
            dirty = false;
        }

        let events: Vec<Event> = tokio::select! {
            input = inputs.recv() => match input {
                None => break,
                Some(ClientInput::Bytes(bytes)) => map_inputs(decoder.feed(&bytes), &zones),
                Some(ClientInput::Resize(size)) => {
                    vec![Event::Resize { width: size.width, height: size.height }]
                }
            },
            Some(event) = loaded_rx.recv() => {
                fetch = None;
                vec![event]
            }
            _ = tokio::time::sleep(ESC_TIMEOUT), if decoder.has_pending() => {
                map_inputs(decoder.flush(), &zones)
            }
            _ = shutdown.changed() => {
                info!("server shutting down; closing session");
                break;
            }
        };

        let mut quit = false;
        for event in events {
            let resized = match event {
                Event::Resize { width, height } => Some(Viewport::new(width, height)),
                _ => None,
            };
            match session.handle(event) {
                Effect::None => {}
                Effect::Quit => {
                    quit = true;
                    break;
                }
                Effect::Fetch => {
                    if let Some(previous) = fetch.take() {
                        previous.abort();
                    }
                    fetch = Some(spawn_fetch(
                        &context.fetcher,
                        loaded_tx.clone(),
                        FetchMode::Fresh,
                    ));
                }
            }
            if let Some(size) = resized {
                if let Err(error) = terminal.resize(size) {
                    debug!(%error, "resize failed");
                }
            }
            dirty = true;
        }
        if quit {
            break;
        }
    }

    if let Some(task) = fetch {
        task.abort();
    }
    if let Err(error) = terminal.leave() {
        debug!(%error, "could not restore client terminal");
    }
    info!("session ended");
    0
}

fn map_inputs(inputs: Vec<InputEvent>, zones: &ZoneMap) -> Vec<Event> {
    inputs.iter().filter_map(|input| event_for_input(input, zones)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    /// Session start: a live cache entry is good enough.
    Cached,
    /// User refresh: always ask upstream.
    Fresh,
}

/// Aborting the returned task drops the request with it.
fn spawn_fetch(
    fetcher: &Fetcher,
    results: mpsc::Sender<Event>,
    mode: FetchMode,
) -> JoinHandle<()> {
    let fetcher = fetcher.clone();
    tokio::spawn(async move {
        let event = match mode {
            FetchMode::Cached => fetcher.load_event().await,
            FetchMode::Fresh => fetcher.refresh_event().await,
        };
        let _ = results.send(event).await;
    })
}
