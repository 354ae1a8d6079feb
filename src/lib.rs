// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Unari: Unicafe campus lunch menus as a terminal dashboard served over SSH.
//!
//! The pure core (`model`, `menu`, `session`, `tui`) knows nothing about SSH; `server` drives
//! it per connection and `fetch` feeds it data.

pub mod clock;
pub mod config;
pub mod error;
pub mod fetch;
pub mod input;
pub mod logging;
pub mod menu;
pub mod model;
pub mod scroll;
pub mod server;
pub mod session;
pub mod tui;
