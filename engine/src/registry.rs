//! Zone registry - the ordered list of displayed zones and which one is home.

use serde::{Deserialize, Serialize};

/// One displayed timezone column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Opaque unique id, generated by the registry
    pub id: String,
    /// IANA timezone identifier (e.g. "America/New_York")
    pub iana_name: String,
    /// Display name (usually a city)
    pub label: String,
}

/// Ordered zone list plus the home designation.
///
/// Ordering is explicit display order, not derived. The home id, when set,
/// always references a zone in the list; removing the home zone clears it
/// and offset labels fall back to the reference instant as their baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    home_zone_id: Option<String>,
    next_id: u64,
}

impl Default for ZoneRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self {
            zones: Vec::new(),
            home_zone_id: None,
            next_id: 1,
        }
    }

    /// Rebuild a registry from persisted parts, dropping a home reference
    /// that no longer resolves.
    pub fn from_parts(zones: Vec<Zone>, home_zone_id: Option<String>) -> Self {
        let home_zone_id =
            home_zone_id.filter(|id| zones.iter().any(|zone| &zone.id == id));
        let next_id = zones
            .iter()
            .filter_map(|zone| zone.id.strip_prefix('z'))
            .filter_map(|digits| digits.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            zones,
            home_zone_id,
            next_id,
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn home_zone_id(&self) -> Option<&str> {
        self.home_zone_id.as_deref()
    }

    pub fn home_zone(&self) -> Option<&Zone> {
        let id = self.home_zone_id.as_deref()?;
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// Append a zone; the first zone added to an empty board becomes home.
    /// Returns the new zone's id.
    pub fn add_zone(&mut self, iana_name: &str, label: &str) -> String {
        let id = format!("z{}", self.next_id);
        self.next_id += 1;
        self.zones.push(Zone {
            id: id.clone(),
            iana_name: iana_name.to_string(),
            label: label.to_string(),
        });
        if self.home_zone_id.is_none() {
            self.home_zone_id = Some(id.clone());
        }
        id
    }

    /// Remove a zone by id. Removing the home zone leaves home unset.
    pub fn remove_zone(&mut self, id: &str) -> bool {
        let before = self.zones.len();
        self.zones.retain(|zone| zone.id != id);
        if self.zones.len() == before {
            return false;
        }
        if self.home_zone_id.as_deref() == Some(id) {
            self.home_zone_id = None;
        }
        true
    }

    /// Designate an existing zone as home.
    pub fn set_home(&mut self, id: &str) -> bool {
        if self.zones.iter().any(|zone| zone.id == id) {
            self.home_zone_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Move the zone at `from` to position `to`, shifting the rest.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from >= self.zones.len() || to >= self.zones.len() || from == to {
            return;
        }
        let zone = self.zones.remove(from);
        self.zones.insert(to, zone);
    }

    /// Index of a zone id in display order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.zones.iter().position(|zone| zone.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ZoneRegistry {
        let mut registry = ZoneRegistry::new();
        registry.add_zone("America/Los_Angeles", "San Francisco");
        registry.add_zone("America/New_York", "New York");
        registry.add_zone("Asia/Tokyo", "Tokyo");
        registry
    }

    #[test]
    fn first_added_zone_becomes_home() {
        let registry = seeded();
        assert_eq!(registry.home_zone().unwrap().label, "San Francisco");
    }

    #[test]
    fn ids_are_unique() {
        let registry = seeded();
        let mut ids: Vec<_> = registry.zones().iter().map(|z| z.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn removing_home_clears_it() {
        let mut registry = seeded();
        let home_id = registry.home_zone().unwrap().id.clone();
        assert!(registry.remove_zone(&home_id));
        assert!(registry.home_zone().is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn set_home_requires_existing_zone() {
        let mut registry = seeded();
        assert!(!registry.set_home("z999"));
        let tokyo_id = registry.zones()[2].id.clone();
        assert!(registry.set_home(&tokyo_id));
        assert_eq!(registry.home_zone().unwrap().label, "Tokyo");
    }

    #[test]
    fn reorder_moves_within_bounds() {
        let mut registry = seeded();
        registry.reorder(2, 0);
        assert_eq!(registry.zones()[0].label, "Tokyo");
        assert_eq!(registry.zones()[1].label, "San Francisco");
        // out-of-range indices leave the order untouched
        registry.reorder(0, 9);
        assert_eq!(registry.zones()[0].label, "Tokyo");
    }

    #[test]
    fn from_parts_drops_dangling_home() {
        let zones = vec![Zone {
            id: "z3".to_string(),
            iana_name: "Europe/London".to_string(),
            label: "London".to_string(),
        }];
        let registry = ZoneRegistry::from_parts(zones, Some("z9".to_string()));
        assert!(registry.home_zone().is_none());
        // ids resume past the highest persisted one
        let mut registry = registry;
        let id = registry.add_zone("Asia/Tokyo", "Tokyo");
        assert_eq!(id, "z4");
    }
}
