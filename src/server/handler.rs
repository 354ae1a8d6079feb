// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use russh::keys::ssh_key::PublicKey;
use russh::server::{Auth, Handler, Msg, Session};
use russh::{Channel, ChannelId, CryptoVec, Pty};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::connection::{self, ClientInput};
use super::AppContext;
use crate::error::ServerError;
use crate::session::Viewport;

pub const NO_PTY_MESSAGE: &str =
    "unari needs an interactive terminal; reconnect with `ssh -t`.\r\n";

#[derive(Debug, Default)]
struct ChannelSlot {
    pty: Option<Viewport>,
    input: Option<mpsc::Sender<ClientInput>>,
}

/// russh callbacks for one TCP connection. Anyone may log in; each PTY shell gets a session.
pub struct ConnectionHandler {
    context: Arc<AppContext>,
    peer: Option<SocketAddr>,
    shutdown: watch::Receiver<bool>,
    channels: HashMap<ChannelId, ChannelSlot>,
}

impl ConnectionHandler {
    pub fn new(
        context: Arc<AppContext>,
        peer: Option<SocketAddr>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self { context, peer, shutdown, channels: HashMap::new() }
    }

    fn accept(&self, user: &str, method: &'static str) -> Auth {
        info!(peer = ?self.peer, user, method, "client authenticated");
        Auth::Accept
    }

    fn start(&mut self, channel: ChannelId, session: &mut Session) -> Result<(), ServerError> {
        let Some(slot) = self.channels.get_mut(&channel) else {
            session.channel_failure(channel)?;
            return Ok(());
        };
        if slot.input.is_some() {
            session.channel_failure(channel)?;
            return Ok(());
        }

        let Some(viewport) = slot.pty else {
            info!(peer = ?self.peer, "rejecting session without a terminal");
            session.channel_success(channel)?;
            session.data(channel, CryptoVec::from_slice(NO_PTY_MESSAGE.as_bytes()))?;
            session.exit_status_request(channel, 1)?;
            session.eof(channel)?;
            session.close(channel)?;
            return Ok(());
        };

        session.channel_success(channel)?;
        slot.input = Some(connection::spawn(
            Arc::clone(&self.context),
            session.handle(),
            channel,
            viewport,
            self.shutdown.clone(),
        ));
        Ok(())
    }

    async fn forward(&mut self, channel: ChannelId, input: ClientInput) {
        let Some(slot) = self.channels.get_mut(&channel) else {
            return;
        };
        let Some(sender) = &slot.input else {
            return;
        };
        if sender.send(input).await.is_err() {
            slot.input = None;
        }
    }
}

impl Handler for ConnectionHandler {
    type Error = ServerError;

    async fn auth_none(&mut self, user: &str) -> Result<Auth, Self::Error> {
        Ok(self.accept(user, "none"))
    }

    async fn auth_password(&mut self, user: &str, _password: &str) -> Result<Auth, Self::Error> {
        Ok(self.accept(user, "password"))
    }

    async fn auth_publickey(
        &mut self,
        user: &str,
        _public_key: &PublicKey,
    ) -> Result<Auth, Self::Error> {
        Ok(self.accept(user, "publickey"))
    }

    async fn channel_open_session(
        &mut self,
        channel: Channel<Msg>,
        _session: &mut Session,
    ) -> Result<bool, Self::Error> {
        debug!(channel = ?channel.id(), "session channel opened");
        self.channels.insert(channel.id(), ChannelSlot::default());
        Ok(true)
    }

    async fn pty_request(
        &mut self,
        channel: ChannelId,
        term: &str,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _modes: &[(Pty, u32)],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        let viewport = viewport(col_width, row_height);
        debug!(?channel, term, width = viewport.width, height = viewport.height, "pty requested");
        match self.channels.get_mut(&channel) {
            Some(slot) => {
                slot.pty = Some(viewport);
                session.channel_success(channel)?;
            }
            None => session.channel_failure(channel)?,
        }
        Ok(())
    }

    async fn shell_request(
        &mut self,
        channel: ChannelId,
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.start(channel, session)
    }

    /// Commands are ignored; `ssh -t host anything` gets the dashboard too.
    async fn exec_request(
        &mut self,
        channel: ChannelId,
        _data: &[u8],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.start(channel, session)
    }

    async fn data(
        &mut self,
        channel: ChannelId,
        data: &[u8],
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.forward(channel, ClientInput::Bytes(data.to_vec())).await;
        Ok(())
    }

    async fn window_change_request(
        &mut self,
        channel: ChannelId,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        let size = viewport(col_width, row_height);
        if let Some(slot) = self.channels.get_mut(&channel) {
            slot.pty = Some(size);
        }
        self.forward(channel, ClientInput::Resize(size)).await;
        Ok(())
    }

    async fn channel_eof(
        &mut self,
        channel: ChannelId,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        debug!(?channel, "client sent eof");
        self.channels.remove(&channel);
        Ok(())
    }

    async fn channel_close(
        &mut self,
        channel: ChannelId,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        debug!(?channel, "channel closed");
        self.channels.remove(&channel);
        Ok(())
    }
}

/// Client-reported sizes saturate at the terminal coordinate range.
fn viewport(col_width: u32, row_height: u32) -> Viewport {
    let clamp = |value: u32| u16::try_from(value).unwrap_or(u16::MAX);
    Viewport::new(clamp(col_width), clamp(row_height))
}
