// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Unari-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Unari and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::model::Restaurant;

#[derive(Debug)]
struct Entry {
    stored_at: Instant,
    restaurants: Arc<Vec<Restaurant>>,
}

/// The last successfully fetched dataset, shared by all sessions for `ttl`.
#[derive(Debug)]
pub struct MenuCache {
    ttl: Duration,
    entry: RwLock<Option<Entry>>,
}

impl MenuCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: RwLock::new(None) }
    }

    pub async fn get(&self) -> Option<Arc<Vec<Restaurant>>> {
        self.get_at(Instant::now()).await
    }

    pub async fn get_at(&self, now: Instant) -> Option<Arc<Vec<Restaurant>>> {
        let entry = self.entry.read().await;
        let entry = entry.as_ref()?;
        let age = now.saturating_duration_since(entry.stored_at);
        (age < self.ttl).then(|| Arc::clone(&entry.restaurants))
    }

    pub async fn store(&self, restaurants: Vec<Restaurant>) -> Arc<Vec<Restaurant>> {
        self.store_at(restaurants, Instant::now()).await
    }

    pub async fn store_at(&self, restaurants: Vec<Restaurant>, now: Instant) -> Arc<Vec<Restaurant>> {
        let restaurants = Arc::new(restaurants);
        *self.entry.write().await = Some(Entry { stored_at: now, restaurants: Arc::clone(&restaurants) });
        restaurants
    }
}
