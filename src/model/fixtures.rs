// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{Datelike, NaiveDate};

use super::loose::Loose;
use super::restaurant::{Menu, MenuItem, Restaurant};

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Upstream-style date token for `date`, e.g. `"Ma 14.10."`.
pub(crate) fn upstream_date(date: NaiveDate) -> String {
    const WEEKDAYS: [&str; 7] = ["Ma", "Ti", "Ke", "To", "Pe", "La", "Su"];
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    format!("{weekday} {}.{}.", date.day(), date.month())
}

pub(crate) fn item(name: &str, category: &str) -> MenuItem {
    MenuItem::new(name, category)
}

/// Physicum (Kumpula) serving a meal and a vegan meal on `on`.
pub(crate) fn physicum(on: NaiveDate) -> Restaurant {
    Restaurant::new("Physicum").with_menu(Menu::new(
        upstream_date(on),
        vec![item("Vegaanilounas", "vegan meal"), item("Lounas", "meal")],
    ))
}

/// A small dataset spanning two campuses, one unknown restaurant, and two days.
pub(crate) fn two_campus_dataset(on: NaiveDate) -> Vec<Restaurant> {
    let next = on.succ_opt().expect("next day");

    let mut exactum = Restaurant::new("Exactum")
        .with_menu(Menu::new(
            upstream_date(on),
            vec![
                item("Suklaakakku", "dessert"),
                item("Broileripasta", "meal"),
                item("Beans", "side"),
                item("Apples", "side"),
                item("Mystery", "brunssi"),
                item("Tofuwok", "vegan meal"),
            ],
        ))
        .with_menu(Menu::new(upstream_date(next), vec![item("Kalakeitto", "meal")]));
    exactum.menu_data.visiting_hours.lunch = Loose::Text("10:30-15:00".to_owned());

    let mut closed = Menu::new(upstream_date(on), Vec::new());
    closed.message = "Suljettu".to_owned();

    vec![
        physicum(on),
        Restaurant::new("Unknown Diner")
            .with_menu(Menu::new(upstream_date(on), vec![item("Burger", "meal")])),
        exactum,
        Restaurant::new("Viikuna").with_menu(closed),
    ]
}
