// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::layout::{Position, Rect};

/// Clickable regions of the last rendered frame, keyed by zone id (a campus name).
///
/// Rebuilt from scratch on every render pass; a stale map only ever reflects the previous frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneMap {
    zones: Vec<(String, Rect)>,
}

impl ZoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `rect` for `id`, replacing an earlier rectangle with the same id.
    pub fn insert(&mut self, id: impl Into<String>, rect: Rect) {
        let id = id.into();
        match self.zones.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = rect,
            None => self.zones.push((id, rect)),
        }
    }

    pub fn get(&self, id: &str) -> Option<Rect> {
        self.zones.iter().find(|(existing, _)| existing == id).map(|(_, rect)| *rect)
    }

    /// The zone containing cell `(column, row)`, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<&str> {
        let position = Position::new(column, row);
        self.zones
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rect)> + '_ {
        self.zones.iter().map(|(id, rect)| (id.as_str(), *rect))
    }
}
