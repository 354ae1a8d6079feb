// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Deserialize;

use super::category::Category;
use super::loose::{null_as_default, Loose};
use crate::clock::DayMonth;

/// One restaurant as listed by the upstream menu API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Restaurant {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    pub location: Vec<Location>,
    #[serde(rename = "menuData")]
    pub menu_data: MenuData,
}

impl Restaurant {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    pub fn with_menu(mut self, menu: Menu) -> Self {
        self.menu_data.menus.push(menu);
        self
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menu_data.menus
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MenuData {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(rename = "visitingHours")]
    pub visiting_hours: VisitingHours,
    pub menus: Vec<Menu>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct VisitingHours {
    pub business: Loose,
    pub breakfast: Loose,
    pub bistro: Loose,
    #[serde(rename = "lounas")]
    pub lunch: Loose,
}

/// A single day's listing for one restaurant.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Menu {
    /// Upstream date string, e.g. `"Ma 14.10."`; only day and month are meaningful.
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(rename = "data")]
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(date: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self { date: date.into(), message: String::new(), items }
    }

    pub fn day_month(&self) -> Option<DayMonth> {
        DayMonth::parse_upstream(&self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawMenuItem")]
pub struct MenuItem {
    pub name: String,
    /// Category label as it came from upstream.
    pub category: String,
    pub ingredients: String,
    pub price: Price,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ingredients: String::new(),
            price: Price::default(),
        }
    }

    pub fn category(&self) -> Category {
        Category::from_label(&self.category)
    }

    /// Sort key within a restaurant section.
    pub fn sort_key(&self) -> (u8, String) {
        (self.category().rank(), self.name.trim().to_lowercase())
    }
}

/// Price metadata is carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Price {
    pub value: Loose,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMenuItem {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    category: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    ingredients: String,
    price: Price,
}

impl From<RawMenuItem> for MenuItem {
    fn from(raw: RawMenuItem) -> Self {
        // The API has no category field of its own; the price tier name stands in for it.
        let category = raw
            .category
            .filter(|category| !category.trim().is_empty())
            .unwrap_or_else(|| raw.price.name.clone());
        Self { name: raw.name, category, ingredients: raw.ingredients, price: raw.price }
    }
}
