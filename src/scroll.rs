// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Range;

/// Lines moved per scroll command.
pub const SCROLL_STEP: usize = 2;

pub fn max_offset(total_lines: usize, viewport_height: usize) -> usize {
    total_lines.saturating_sub(viewport_height)
}

/// Clamps `offset` into `[0, max(total_lines - viewport_height, 0)]`.
pub fn clamp(offset: usize, total_lines: usize, viewport_height: usize) -> usize {
    offset.min(max_offset(total_lines, viewport_height))
}

/// The visible slice of a scrolled pane for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWindow {
    pub offset: usize,
    pub total_lines: usize,
    pub viewport_height: usize,
}

impl ScrollWindow {
    pub fn new(requested_offset: usize, total_lines: usize, viewport_height: usize) -> Self {
        Self {
            offset: clamp(requested_offset, total_lines, viewport_height),
            total_lines,
            viewport_height,
        }
    }

    pub fn visible(&self) -> Range<usize> {
        let end = self.offset.saturating_add(self.viewport_height).min(self.total_lines);
        self.offset.min(end)..end
    }

    pub fn overflows(&self) -> bool {
        self.total_lines > self.viewport_height
    }

    pub fn at_end(&self) -> bool {
        self.offset == max_offset(self.total_lines, self.viewport_height)
    }
}
