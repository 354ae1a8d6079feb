// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal, TerminalOptions};
use russh::server::Handle;
use russh::{ChannelId, CryptoVec};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::session::{Session, Viewport};
use crate::tui::{self, RenderOutcome, Theme};

/// Work for the task that owns the SSH side of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outbound {
    Data(Vec<u8>),
    Close { exit_status: u32 },
}

/// Blocking `Write` end of a channel. Bytes are queued locally and handed off on `flush`.
#[derive(Debug)]
pub(crate) struct ChannelWriter {
    buffer: Vec<u8>,
    sender: mpsc::UnboundedSender<Outbound>,
}

impl ChannelWriter {
    pub(crate) fn new(sender: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { buffer: Vec::new(), sender }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let bytes = std::mem::take(&mut self.buffer);
        self.sender
            .send(Outbound::Data(bytes))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "channel closed"))
    }
}

/// Drains `Outbound` messages into the channel in order until a close or a dead connection.
pub(crate) fn spawn_forwarder(
    handle: Handle,
    channel: ChannelId,
) -> (mpsc::UnboundedSender<Outbound>, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            match message {
                Outbound::Data(bytes) => {
                    if handle.data(channel, CryptoVec::from(bytes)).await.is_err() {
                        debug!(?channel, "channel gone; dropping output");
                        break;
                    }
                }
                Outbound::Close { exit_status } => {
                    if handle.exit_status_request(channel, exit_status).await.is_err() {
                        debug!(?channel, exit_status, "channel gone; exit status not sent");
                    }
                    let _ = handle.eof(channel).await;
                    let _ = handle.close(channel).await;
                    break;
                }
            }
        }
    });
    (sender, task)
}

/// A ratatui terminal whose backend is an SSH channel of known, client-reported size.
pub(crate) struct SshTerminal {
    terminal: Terminal<CrosstermBackend<ChannelWriter>>,
}

impl SshTerminal {
    pub(crate) fn new(writer: ChannelWriter, viewport: Viewport) -> io::Result<Self> {
        let options = TerminalOptions { viewport: ratatui::Viewport::Fixed(area(viewport)) };
        let terminal = Terminal::with_options(CrosstermBackend::new(writer), options)?;
        Ok(Self { terminal })
    }

    pub(crate) fn enter(&mut self) -> io::Result<()> {
        execute!(self.terminal.backend_mut(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        self.terminal.clear()
    }

    pub(crate) fn leave(&mut self) -> io::Result<()> {
        execute!(self.terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen, Show)
    }

    pub(crate) fn resize(&mut self, viewport: Viewport) -> io::Result<()> {
        self.terminal.resize(area(viewport))
    }

    /// Draws one frame and feeds the used scroll offset back into the session.
    pub(crate) fn draw(&mut self, session: &mut Session, theme: &Theme) -> io::Result<RenderOutcome> {
        let mut outcome = RenderOutcome::default();
        self.terminal.draw(|frame| outcome = tui::draw(frame, session, theme))?;
        if let Some(scroll) = outcome.scroll {
            session.settle_scroll(scroll.offset);
        }
        Ok(outcome)
    }
}

fn area(viewport: Viewport) -> Rect {
    Rect::new(0, 0, viewport.width, viewport.height)
}
