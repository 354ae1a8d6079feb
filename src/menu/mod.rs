// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Campus/date lookup over a fetched dataset.
//!
//! The index is built once per dataset and read-only afterwards. Items are sorted at build time,
//! so a lookup only has to pick the menus whose day/month matches.

use chrono::NaiveDate;

use crate::clock::DayMonth;
use crate::model::{CampusTable, MenuItem, Restaurant};

/// One restaurant's listing for the looked-up day.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub restaurant: String,
    /// Lunch hours, when upstream gives them as plain text.
    pub hours: Option<String>,
    /// Upstream note for the day (e.g. "closed"); empty when there is none.
    pub message: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MenuResult {
    Found(Vec<MenuSection>),
    #[default]
    NotFound,
}

impl MenuResult {
    pub fn sections(&self) -> &[MenuSection] {
        match self {
            Self::Found(sections) => sections,
            Self::NotFound => &[],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct IndexedMenu {
    day_month: Option<DayMonth>,
    message: String,
    items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq)]
struct IndexedRestaurant {
    title: String,
    hours: Option<String>,
    menus: Vec<IndexedMenu>,
}

#[derive(Debug, Clone, PartialEq)]
struct CampusEntry {
    name: String,
    restaurants: Vec<IndexedRestaurant>,
}

/// Campus name -> restaurants (with their menus) assigned to that campus.
///
/// Every campus in the table has an entry, even when nothing in the dataset belongs to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuIndex {
    campuses: Vec<CampusEntry>,
}

impl MenuIndex {
    /// An index with every campus present and no restaurants.
    pub fn empty(table: &CampusTable) -> Self {
        Self::build(table, &[])
    }

    pub fn build(table: &CampusTable, restaurants: &[Restaurant]) -> Self {
        let mut campuses = table
            .names()
            .map(|name| CampusEntry { name: name.to_owned(), restaurants: Vec::new() })
            .collect::<Vec<_>>();

        for restaurant in restaurants {
            let Some(campus_idx) = table.campus_of(&restaurant.title) else {
                continue;
            };
            campuses[campus_idx].restaurants.push(index_restaurant(restaurant));
        }

        Self { campuses }
    }

    pub fn campus_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.campuses.iter().map(|entry| entry.name.as_str())
    }

    pub fn restaurant_count(&self, campus: &str) -> usize {
        self.entry(campus).map(|entry| entry.restaurants.len()).unwrap_or(0)
    }

    pub fn lookup(&self, campus: &str, date: NaiveDate) -> MenuResult {
        let Some(entry) = self.entry(campus) else {
            return MenuResult::NotFound;
        };

        let sections = entry
            .restaurants
            .iter()
            .filter_map(|restaurant| {
                let menu = restaurant
                    .menus
                    .iter()
                    .find(|menu| menu.day_month.is_some_and(|dm| dm.matches(date)))?;
                Some(MenuSection {
                    restaurant: restaurant.title.clone(),
                    hours: restaurant.hours.clone(),
                    message: menu.message.clone(),
                    items: menu.items.clone(),
                })
            })
            .collect::<Vec<_>>();

        if sections.is_empty() {
            MenuResult::NotFound
        } else {
            MenuResult::Found(sections)
        }
    }

    fn entry(&self, campus: &str) -> Option<&CampusEntry> {
        self.campuses.iter().find(|entry| entry.name == campus)
    }
}

fn index_restaurant(restaurant: &Restaurant) -> IndexedRestaurant {
    let menus = restaurant
        .menus()
        .iter()
        .map(|menu| {
            let mut items = menu.items.clone();
            sort_items(&mut items);
            IndexedMenu {
                day_month: menu.day_month(),
                message: menu.message.trim().to_owned(),
                items,
            }
        })
        .collect();

    IndexedRestaurant {
        title: restaurant.title.trim().to_owned(),
        hours: restaurant.menu_data.visiting_hours.lunch.summary(),
        menus,
    }
}

/// Stable sort by `(category rank, lowercased trimmed name)`.
pub fn sort_items(items: &mut [MenuItem]) {
    items.sort_by_cached_key(MenuItem::sort_key);
}
