// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Calendar arithmetic in the fixed menu time zone.
//!
//! "Today" is read through a [`TimeSource`] so tests can pin the instant. All navigation works
//! on [`NaiveDate`]s, which keeps day steps exact across daylight-saving transitions.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;

/// Menus are published for Helsinki days.
pub const MENU_TIME_ZONE: Tz = chrono_tz::Europe::Helsinki;

const WEEKDAYS_FI: [&str; 7] = ["ma", "ti", "ke", "to", "pe", "la", "su"];

pub trait TimeSource: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A time source frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub DateTime<Utc>);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Clock {
    tz: Tz,
    source: Arc<dyn TimeSource>,
}

impl Clock {
    pub fn new(source: Arc<dyn TimeSource>) -> Self {
        Self { tz: MENU_TIME_ZONE, source }
    }

    pub fn system() -> Self {
        Self::new(Arc::new(SystemTimeSource))
    }

    /// A clock whose "today" is always `date` (noon, menu time zone).
    pub fn fixed(date: NaiveDate) -> Self {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .and_then(|naive| naive.and_local_timezone(MENU_TIME_ZONE).single())
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| naive_utc_noon(date));
        Self::new(Arc::new(FixedTimeSource(noon)))
    }

    pub fn today(&self) -> NaiveDate {
        self.source.now().with_timezone(&self.tz).date_naive()
    }
}

fn naive_utc_noon(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc()
}

/// Moves `date` by whole calendar days; saturates at the ends of the supported range.
pub fn shift_days(date: NaiveDate, delta: i64) -> NaiveDate {
    let days = Days::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(date)
}

/// Content pane header, e.g. `"ma 14.10.2024"`.
pub fn format_header_date(date: NaiveDate) -> String {
    let weekday = WEEKDAYS_FI[date.weekday().num_days_from_monday() as usize];
    format!("{weekday} {}.{}.{}", date.day(), date.month(), date.year())
}

/// The day/month pair upstream menus are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayMonth {
    day: u32,
    month: u32,
}

impl DayMonth {
    pub fn new(day: u32, month: u32) -> Option<Self> {
        ((1..=31).contains(&day) && (1..=12).contains(&month)).then_some(Self { day, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self { day: date.day(), month: date.month() }
    }

    /// Reads the trailing `D.M.` token of an upstream date string such as `"Ma 14.10."`.
    ///
    /// Anything after day and month (a year, say) is ignored.
    pub fn parse_upstream(raw: &str) -> Option<Self> {
        let token = raw.split_whitespace().last()?;
        let mut parts = token.split('.').map(str::trim);
        let day = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        Self::new(day, month)
    }

    pub fn day(self) -> u32 {
        self.day
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn matches(self, date: NaiveDate) -> bool {
        self == Self::of(date)
    }
}
