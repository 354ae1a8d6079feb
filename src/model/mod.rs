// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Menu data model.
//!
//! Restaurants and their daily menus as decoded from the upstream API, plus the static campus
//! table that assigns restaurants to campuses.

pub mod campus;
pub mod category;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod loose;
pub mod restaurant;

pub use campus::{Campus, CampusTable, CampusTableError};
pub use category::Category;
pub use loose::Loose;
pub use restaurant::{Location, Menu, MenuData, MenuItem, Price, Restaurant, VisitingHours};
