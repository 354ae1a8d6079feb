// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use chrono::{Datelike, NaiveDate};
use unari::model::{CampusTable, Menu, MenuItem, Restaurant};

const WEEKDAYS: [&str; 7] = ["Ma", "Ti", "Ke", "To", "Pe", "La", "Su"];
const CATEGORIES: [&str; 6] = ["meal", "vegan meal", "soup", "dessert", "salad", "special"];

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 14).unwrap_or_default()
}

pub fn upstream_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    format!("{weekday} {}.{}.", date.day(), date.month())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetParams {
    pub days: u64,
    pub items_per_day: usize,
    pub unknown_restaurants: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Today,
    Week,
    WeekLongMenus,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Week => "week",
            Self::WeekLongMenus => "week_long_menus",
        }
    }

    pub const fn params(self) -> DatasetParams {
        match self {
            Self::Today => DatasetParams { days: 1, items_per_day: 6, unknown_restaurants: 2 },
            Self::Week => DatasetParams { days: 7, items_per_day: 8, unknown_restaurants: 4 },
            Self::WeekLongMenus => {
                DatasetParams { days: 7, items_per_day: 40, unknown_restaurants: 4 }
            }
        }
    }
}

/// Every restaurant of the built-in table plus some unlisted ones, each with `days` menus.
pub fn dataset(params: DatasetParams) -> Vec<Restaurant> {
    let table = CampusTable::builtin();
    let listed = table.campuses().iter().flat_map(|campus| campus.restaurants.iter().cloned());
    let unlisted = (0..params.unknown_restaurants).map(|n| format!("Popup {n:02}"));

    listed
        .chain(unlisted)
        .enumerate()
        .map(|(seed, title)| {
            (0..params.days).fold(Restaurant::new(title), |restaurant, day| {
                let date = today() + chrono::Days::new(day);
                let items = (0..params.items_per_day)
                    .map(|n| {
                        let category = CATEGORIES[(seed + n) % CATEGORIES.len()];
                        MenuItem::new(format!("Dish {seed:02}-{day}-{n:02}"), category)
                    })
                    .collect();
                restaurant.with_menu(Menu::new(upstream_date(date), items))
            })
        })
        .collect()
}

pub fn fixture(case: Case) -> Vec<Restaurant> {
    dataset(case.params())
}

/// The upstream JSON shape for `fixture(case)`.
pub fn payload(case: Case) -> String {
    let restaurants = fixture(case)
        .iter()
        .map(|restaurant| {
            let menus = restaurant
                .menus()
                .iter()
                .map(|menu| {
                    let data = menu
                        .items
                        .iter()
                        .map(|item| {
                            serde_json::json!({
                                "name": item.name,
                                "price": { "name": item.category },
                                "meta": { "0": [], "1": [], "2": [] }
                            })
                        })
                        .collect::<Vec<_>>();
                    serde_json::json!({ "date": menu.date, "data": data, "message": "" })
                })
                .collect::<Vec<_>>();
            serde_json::json!({
                "title": restaurant.title,
                "location": [],
                "menuData": { "name": restaurant.title, "visitingHours": {}, "menus": menus }
            })
        })
        .collect::<Vec<_>>();
    serde_json::Value::Array(restaurants).to_string()
}
