// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A campus and the restaurant titles that belong to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Campus {
    pub name: String,
    pub restaurants: Vec<String>,
}

/// The static campus -> restaurant-name table.
///
/// Campus assignment never comes from the dataset; a restaurant whose title is not listed here
/// does not show up in any campus view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampusTable {
    campuses: Vec<Campus>,
}

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Keskusta",
        &[
            "Päärakennus",
            "Porthania",
            "Topelias",
            "Olivia",
            "Metsätalo",
            "Soc&Kom",
            "Kaivopiha",
            "Ylioppilasaukio",
            "Rotunda",
        ],
    ),
    ("Kumpula", &["Chemicum", "Exactum", "Physicum"]),
    ("Meilahti", &["Meilahti", "Biomedicum", "Terkko"]),
    ("Viikki", &["Infokeskus", "Viikuna", "Biokeskus", "Tähkä"]),
    ("Muut", &["Cafe Portaali", "Olympiastadion"]),
];

#[derive(Debug, Deserialize)]
struct CampusTableFile {
    #[serde(rename = "campus")]
    campuses: Vec<Campus>,
}

impl CampusTable {
    pub fn builtin() -> Self {
        let campuses = BUILTIN
            .iter()
            .map(|(name, restaurants)| Campus {
                name: (*name).to_owned(),
                restaurants: restaurants.iter().map(|title| (*title).to_owned()).collect(),
            })
            .collect();
        Self { campuses }
    }

    pub fn new(campuses: Vec<Campus>) -> Result<Self, CampusTableError> {
        if campuses.is_empty() {
            return Err(CampusTableError::Empty);
        }
        for (idx, campus) in campuses.iter().enumerate() {
            if campuses[..idx].iter().any(|earlier| same_title(&earlier.name, &campus.name)) {
                return Err(CampusTableError::DuplicateCampus(campus.name.clone()));
            }
        }
        Ok(Self { campuses })
    }

    /// Parses a table of the form `[[campus]] name = "..." restaurants = [...]`.
    pub fn from_toml_str(source: &str) -> Result<Self, CampusTableError> {
        let file: CampusTableFile = toml::from_str(source).map_err(CampusTableError::Parse)?;
        Self::new(file.campuses)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CampusTableError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|source| CampusTableError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&source)
    }

    pub fn len(&self) -> usize {
        self.campuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campuses.is_empty()
    }

    pub fn campuses(&self) -> &[Campus] {
        &self.campuses
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.campuses.iter().map(|campus| campus.name.as_str())
    }

    pub fn name(&self, idx: usize) -> Option<&str> {
        self.campuses.get(idx).map(|campus| campus.name.as_str())
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.campuses.iter().position(|campus| campus.name == name)
    }

    /// Index of the campus a restaurant title is assigned to.
    pub fn campus_of(&self, restaurant_title: &str) -> Option<usize> {
        self.campuses.iter().position(|campus| {
            campus.restaurants.iter().any(|listed| same_title(listed, restaurant_title))
        })
    }
}

impl Default for CampusTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn same_title(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[derive(Debug, thiserror::Error)]
pub enum CampusTableError {
    #[error("campus table must list at least one campus")]
    Empty,

    #[error("campus {0:?} is listed twice")]
    DuplicateCampus(String),

    #[error("failed to read campus table {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid campus table: {0}")]
    Parse(toml::de::Error),
}
