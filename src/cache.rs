use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BAN_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);
pub const LOCATION_TTL: Duration = Duration::from_secs(60 * 60);

struct Expiring<V> {
    value: V,
    expires_at: Instant,
}

/// Key-value store with per-key time-to-live. Expired entries are dropped
/// lazily on read; absence of a key carries meaning for the callers (not
/// banned, no tracking data), so there is no eager eviction pass.
pub struct TtlCache<V> {
    entries: DashMap<Uuid, Expiring<V>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn put(&self, key: Uuid, value: V, ttl: Duration) {
        self.entries.insert(
            key,
            Expiring {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn get(&self, key: &Uuid) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
        }
        None
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ban markers keyed by user id. Presence blocks every state-changing
/// operation for that user regardless of role; a ban lapses after 30 days
/// unless re-issued.
pub struct BanRegistry {
    markers: TtlCache<String>,
}

impl BanRegistry {
    pub fn new() -> Self {
        Self {
            markers: TtlCache::new(),
        }
    }

    pub fn ban(&self, user_id: Uuid, reason: &str) {
        self.markers.put(user_id, reason.to_string(), BAN_TTL);
    }

    pub fn reason_for(&self, user_id: &Uuid) -> Option<String> {
        self.markers.get(user_id)
    }
}

impl Default for BanRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationFix {
    pub lat: f64,
    pub lng: f64,
    pub recorded_at: DateTime<Utc>,
}

impl std::fmt::Display for LocationFix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Last-known positions, keyed by carrier id (driver position) or request id
/// (shipment tracking). Best-effort: a missing fix means "no tracking data".
pub struct LocationCache {
    fixes: TtlCache<LocationFix>,
}

impl LocationCache {
    pub fn new() -> Self {
        Self {
            fixes: TtlCache::new(),
        }
    }

    pub fn record(&self, subject: Uuid, fix: LocationFix) {
        self.fixes.put(subject, fix, LOCATION_TTL);
    }

    pub fn last_fix(&self, subject: &Uuid) -> Option<LocationFix> {
        self.fixes.get(subject)
    }
}

impl Default for LocationCache {
    fn default() -> Self {
        Self::new()
    }
}
