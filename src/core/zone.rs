//! Zones on the normalized map plane
//!
//! The map is a 100 x 100 plane (y grows downwards, like the screen). Every
//! zone has a fixed anchor point on it; the zone set is closed and known at
//! compile time, so an unknown zone cannot be named anywhere in the program.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a zone (and of the content section shown for it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    Home,
    About,
    Education,
    Skills,
    Projects,
    Certifications,
    Contact,
}

impl ZoneId {
    pub const COUNT: usize = 7;

    pub const ALL: [ZoneId; Self::COUNT] = [
        ZoneId::Home,
        ZoneId::About,
        ZoneId::Education,
        ZoneId::Skills,
        ZoneId::Projects,
        ZoneId::Certifications,
        ZoneId::Contact,
    ];

    /// Dense index, stable for the lifetime of the program
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneId::Home => "home",
            ZoneId::About => "about",
            ZoneId::Education => "education",
            ZoneId::Skills => "skills",
            ZoneId::Projects => "projects",
            ZoneId::Certifications => "certifications",
            ZoneId::Contact => "contact",
        }
    }

    /// Content panel rendered while this zone is active
    pub fn panel(self) -> PanelKind {
        match self {
            ZoneId::Home => PanelKind::Hero,
            ZoneId::About => PanelKind::Biography,
            ZoneId::Education => PanelKind::Education,
            ZoneId::Skills => PanelKind::Skills,
            ZoneId::Projects => PanelKind::Projects,
            ZoneId::Certifications => PanelKind::Certifications,
            ZoneId::Contact => PanelKind::Contact,
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content panels, one per kind of portfolio section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Hero,
    Biography,
    Education,
    Certifications,
    Projects,
    Skills,
    Contact,
}

impl PanelKind {
    pub const COUNT: usize = 7;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A point on the map plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point with both axes clamped into the map
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::clamped(self.x + dx, self.y + dy)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn in_bounds(self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.x) && (Self::MIN..=Self::MAX).contains(&self.y)
    }
}

fn clamp_axis(value: f64) -> f64 {
    // NaN would otherwise survive f64::clamp
    if value.is_nan() {
        Point::MIN
    } else {
        value.clamp(Point::MIN, Point::MAX)
    }
}

/// A zone as seen by the navigator
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub position: Point,
    pub name: String,
    pub description: String,
}

/// The fixed zone set, in declaration order
///
/// Construction checks that every `ZoneId` appears exactly once, which makes
/// `get` infallible afterwards.
#[derive(Debug, Clone)]
pub struct ZoneTable {
    zones: Vec<Zone>,
    slots: [usize; ZoneId::COUNT],
}

impl ZoneTable {
    pub fn new(zones: Vec<Zone>) -> Result<Self> {
        let mut slots = [usize::MAX; ZoneId::COUNT];

        for (idx, zone) in zones.iter().enumerate() {
            if slots[zone.id.index()] != usize::MAX {
                bail!("zone '{}' is declared more than once", zone.id);
            }
            if !zone.position.in_bounds() {
                bail!(
                    "zone '{}' is placed at ({}, {}), outside the 0-100 map",
                    zone.id,
                    zone.position.x,
                    zone.position.y
                );
            }
            slots[zone.id.index()] = idx;
        }

        if let Some(missing) = ZoneId::ALL.iter().find(|id| slots[id.index()] == usize::MAX) {
            bail!("zone '{}' is missing from the zone table", missing);
        }

        Ok(Self { zones, slots })
    }

    pub fn get(&self, id: ZoneId) -> &Zone {
        &self.zones[self.slots[id.index()]]
    }

    /// Zones in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Nearest zone strictly closer than `threshold` to `point`
    ///
    /// Equal distances resolve to the zone declared first.
    pub fn nearest_within(&self, point: Point, threshold: f64) -> Option<ZoneId> {
        let mut best: Option<(ZoneId, f64)> = None;

        for zone in &self.zones {
            let distance = point.distance(zone.position);
            if distance >= threshold {
                continue;
            }
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((zone.id, distance)),
            }
        }

        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn zone(id: ZoneId, x: f64, y: f64) -> Zone {
        Zone {
            id,
            position: Point::new(x, y),
            name: id.as_str().to_string(),
            description: String::new(),
        }
    }

    /// The adventure layout the default content ships with
    pub(crate) fn adventure_table() -> ZoneTable {
        ZoneTable::new(vec![
            zone(ZoneId::Home, 50.0, 80.0),
            zone(ZoneId::About, 20.0, 40.0),
            zone(ZoneId::Certifications, 80.0, 40.0),
            zone(ZoneId::Projects, 30.0, 20.0),
            zone(ZoneId::Skills, 70.0, 60.0),
            zone(ZoneId::Contact, 50.0, 30.0),
            zone(ZoneId::Education, 40.0, 50.0),
        ])
        .expect("adventure table is complete")
    }

    #[test]
    fn test_clamped_point() {
        assert_eq!(Point::clamped(-4.0, 140.0), Point::new(0.0, 100.0));
        assert_eq!(Point::clamped(f64::NAN, f64::INFINITY), Point::new(0.0, 100.0));
        assert_eq!(Point::new(95.0, 3.0).offset(10.0, -10.0), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_table_rejects_duplicates() {
        let mut zones: Vec<Zone> = adventure_table().iter().cloned().collect();
        zones.push(zone(ZoneId::Home, 10.0, 10.0));
        let err = ZoneTable::new(zones).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_table_rejects_missing_zone() {
        let zones: Vec<Zone> = adventure_table()
            .iter()
            .filter(|z| z.id != ZoneId::Contact)
            .cloned()
            .collect();
        let err = ZoneTable::new(zones).unwrap_err();
        assert!(err.to_string().contains("contact"));
    }

    #[test]
    fn test_table_rejects_out_of_range_position() {
        let zones: Vec<Zone> = adventure_table()
            .iter()
            .map(|z| {
                let mut z = z.clone();
                if z.id == ZoneId::Contact {
                    z.position.y = 105.0;
                }
                z
            })
            .collect();
        assert!(ZoneTable::new(zones).is_err());
    }

    #[test]
    fn test_get_and_order() {
        let table = adventure_table();
        assert_eq!(table.len(), ZoneId::COUNT);
        assert_eq!(table.get(ZoneId::Skills).position, Point::new(70.0, 60.0));
        let first = table.iter().next().map(|z| z.id);
        assert_eq!(first, Some(ZoneId::Home));
    }

    #[test]
    fn test_nearest_within_picks_closest() {
        let table = ZoneTable::new(vec![
            zone(ZoneId::Home, 10.0, 10.0),
            zone(ZoneId::About, 30.0, 10.0),
            zone(ZoneId::Education, 90.0, 90.0),
            zone(ZoneId::Skills, 90.0, 70.0),
            zone(ZoneId::Projects, 70.0, 90.0),
            zone(ZoneId::Certifications, 70.0, 70.0),
            zone(ZoneId::Contact, 50.0, 50.0),
        ])
        .unwrap();

        // Both Home and About are within 15; About is nearer even though Home comes first
        assert_eq!(
            table.nearest_within(Point::new(22.0, 10.0), 15.0),
            Some(ZoneId::About)
        );
        // Exactly halfway: declaration order decides
        assert_eq!(
            table.nearest_within(Point::new(20.0, 10.0), 15.0),
            Some(ZoneId::Home)
        );
    }

    #[test]
    fn test_nearest_within_is_strict() {
        let table = adventure_table();
        // Exactly 15 away from Home (50, 80)
        assert_eq!(table.nearest_within(Point::new(50.0, 95.0), 15.0), None);
        assert_eq!(
            table.nearest_within(Point::new(50.0, 94.9), 15.0),
            Some(ZoneId::Home)
        );
    }

    #[test]
    fn test_zone_panels_are_distinct() {
        let mut seen = [false; PanelKind::COUNT];
        for id in ZoneId::ALL {
            let idx = id.panel().index();
            assert!(!seen[idx], "{} shares a panel", id);
            seen[idx] = true;
        }
    }

    #[test]
    fn test_zone_id_serde_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            id: ZoneId,
        }
        let parsed: Wrapper = toml::from_str("id = \"certifications\"").unwrap();
        assert_eq!(parsed.id, ZoneId::Certifications);
        assert!(toml::from_str::<Wrapper>("id = \"blog\"").is_err());
        for id in ZoneId::ALL {
            assert_eq!(id.to_string(), id.as_str());
        }
    }
}
