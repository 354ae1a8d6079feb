// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Fixed classification of a menu item, controlling where it sorts within a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Meal,
    VeganMeal,
    Side,
    Dessert,
    Unclassified,
}

const LABELS: &[(&str, Category)] = &[
    ("meal", Category::Meal),
    ("lounas", Category::Meal),
    ("vegan meal", Category::VeganMeal),
    ("vegaanilounas", Category::VeganMeal),
    ("kasvislounas", Category::VeganMeal),
    ("side", Category::Side),
    ("lisuke", Category::Side),
    ("dessert", Category::Dessert),
    ("jälkiruoka", Category::Dessert),
];

impl Category {
    pub const ALL: [Self; 5] =
        [Self::Meal, Self::VeganMeal, Self::Side, Self::Dessert, Self::Unclassified];

    /// Classifies an upstream label; anything unknown is `Unclassified`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_lowercase();
        LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, category)| *category)
            .unwrap_or(Self::Unclassified)
    }

    pub const fn rank(self) -> u8 {
        match self {
            Self::Meal => 0,
            Self::VeganMeal => 1,
            Self::Side => 2,
            Self::Dessert => 3,
            Self::Unclassified => 100,
        }
    }

    pub const fn marker(self) -> &'static str {
        match self {
            Self::Meal => "●",
            Self::VeganMeal => "♣",
            Self::Side => "◦",
            Self::Dessert => "★",
            Self::Unclassified => "·",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meal => "meal",
            Self::VeganMeal => "vegan meal",
            Self::Side => "side",
            Self::Dessert => "dessert",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
