//! Portfolio content catalog
//!
//! Everything the panels display is data loaded from `content.toml`: the
//! profile, the zone table with its dialog, and the section entries. The
//! embedded copy under `defaults/` is used when no user copy exists.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::core::dialog::{Dialog, DialogBook, DialogChoice};
use crate::core::zone::{Point, Zone, ZoneId, ZoneTable};

const DEFAULT_CONTENT: &str = include_str!("../defaults/content.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ContentCatalog {
    pub profile: Profile,
    pub zones: Vec<ZoneContent>,
    #[serde(default)]
    pub biography: Biography,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub contact: Vec<ContactLink>,
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    #[serde(default)]
    pub feed: FeedLayout,
    #[serde(default)]
    pub grid: GridLayout,
    #[serde(default)]
    pub mobile: MobileLayout,
    #[serde(skip)]
    slots: [usize; ZoneId::COUNT],
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    /// Text-art file, relative to the content file's directory
    #[serde(default)]
    pub avatar: Option<String>,
    /// Banner lines rotated in the grid view
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneContent {
    pub id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_zone_color")]
    pub color: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub choices: Vec<ChoiceContent>,
}

impl ZoneContent {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Section heading, falling back to the zone name
    pub fn heading(&self) -> &str {
        if self.title.is_empty() {
            &self.name
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceContent {
    pub label: String,
    pub target: ZoneId,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Biography {
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationEntry {
    pub title: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedLayout {
    #[serde(default = "default_feed_sections")]
    pub sections: Vec<ZoneId>,
}

impl Default for FeedLayout {
    fn default() -> Self {
        Self {
            sections: default_feed_sections(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridLayout {
    #[serde(default)]
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridRow {
    pub zone: ZoneId,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MobileLayout {
    #[serde(default = "default_mobile_order")]
    pub order: Vec<ZoneId>,
}

impl Default for MobileLayout {
    fn default() -> Self {
        Self {
            order: default_mobile_order(),
        }
    }
}

fn default_icon() -> String {
    "•".to_string()
}

fn default_zone_color() -> String {
    "#FFFFFF".to_string()
}

fn default_feed_sections() -> Vec<ZoneId> {
    ZoneId::ALL.to_vec()
}

fn default_mobile_order() -> Vec<ZoneId> {
    ZoneId::ALL.to_vec()
}

/// One card in a grid row
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub title: String,
    pub subtitle: String,
}

impl Tile {
    fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

impl ContentCatalog {
    /// Deserialize without checking the zone set (used by the validator)
    pub fn parse(contents: &str) -> Result<Self> {
        let catalog: ContentCatalog = toml::from_str(contents)?;
        Ok(catalog)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut catalog = Self::parse(contents)?;
        catalog.index_zones()?;
        Ok(catalog)
    }

    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONTENT).context("Failed to parse embedded content.toml")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read content file: {:?}", path))?;
        Self::from_toml_str(&contents).context(format!("Failed to load content file: {:?}", path))
    }

    fn index_zones(&mut self) -> Result<()> {
        let mut slots = [usize::MAX; ZoneId::COUNT];
        for (idx, zone) in self.zones.iter().enumerate() {
            if slots[zone.id.index()] != usize::MAX {
                bail!("zone '{}' is declared more than once", zone.id);
            }
            slots[zone.id.index()] = idx;
        }
        if let Some(missing) = ZoneId::ALL.iter().find(|id| slots[id.index()] == usize::MAX) {
            bail!("zone '{}' is missing", missing);
        }
        self.slots = slots;
        Ok(())
    }

    pub fn zone(&self, id: ZoneId) -> &ZoneContent {
        &self.zones[self.slots[id.index()]]
    }

    pub fn zone_table(&self) -> Result<ZoneTable> {
        ZoneTable::new(
            self.zones
                .iter()
                .map(|z| Zone {
                    id: z.id,
                    position: z.position(),
                    name: z.name.clone(),
                    description: z.description.clone(),
                })
                .collect(),
        )
    }

    pub fn dialog_book(&self) -> Result<DialogBook> {
        DialogBook::new(self.zones.iter().map(|z| {
            (
                z.id,
                Dialog {
                    speaker: z.speaker.clone(),
                    text: z.message.clone(),
                    choices: z
                        .choices
                        .iter()
                        .map(|c| DialogChoice {
                            label: c.label.clone(),
                            target: c.target,
                        })
                        .collect(),
                },
            )
        }))
    }

    /// First contact link with a URL
    pub fn primary_contact(&self) -> Option<&ContactLink> {
        self.contact.iter().find(|c| !c.url.is_empty())
    }

    /// Cards shown for a zone's row in the grid view
    pub fn tiles(&self, zone: ZoneId) -> Vec<Tile> {
        match zone {
            ZoneId::Home => self
                .profile
                .highlights
                .iter()
                .map(|h| Tile::new(h.clone(), self.profile.name.clone()))
                .collect(),
            ZoneId::About => std::iter::once(Tile::new(
                self.profile.name.clone(),
                self.profile.tagline.clone(),
            ))
            .chain(
                self.biography
                    .paragraphs
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Tile::new(format!("Chapter {}", i + 1), p.clone())),
            )
            .collect(),
            ZoneId::Education => self
                .education
                .iter()
                .map(|e| Tile::new(e.title.clone(), e.period.clone()))
                .collect(),
            ZoneId::Certifications => self
                .certifications
                .iter()
                .map(|c| Tile::new(c.name.clone(), format!("{} · {}", c.issuer, c.date)))
                .collect(),
            ZoneId::Projects => self
                .projects
                .iter()
                .map(|p| Tile::new(p.name.clone(), p.tags.join(", ")))
                .collect(),
            ZoneId::Skills => self
                .skills
                .iter()
                .map(|s| Tile::new(s.category.clone(), s.items.join(", ")))
                .collect(),
            ZoneId::Contact => self
                .contact
                .iter()
                .map(|c| Tile::new(c.label.clone(), c.value.clone()))
                .collect(),
        }
    }

    /// Load the profile avatar relative to `dir`, or a generated placeholder
    pub fn load_avatar(&self, dir: &Path) -> Avatar {
        let Some(name) = self.profile.avatar.as_deref() else {
            return Avatar::placeholder();
        };
        let path = dir.join(name);
        match Avatar::load(&path) {
            Ok(avatar) => avatar,
            Err(e) => {
                tracing::warn!("Using placeholder avatar: {:#}", e);
                Avatar::placeholder()
            }
        }
    }
}

/// Text-art portrait for the hero panel
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub lines: Vec<String>,
    /// True when generated because the file was missing or unreadable
    pub placeholder: bool,
}

impl Avatar {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read avatar file: {:?}", path))?;
        let lines: Vec<String> = contents.lines().map(|l| l.trim_end().to_string()).collect();
        if lines.iter().all(|l| l.trim().is_empty()) {
            bail!("Avatar file {:?} is empty", path);
        }
        Ok(Self {
            lines,
            placeholder: false,
        })
    }

    /// A brown frame around a gold core
    pub fn placeholder() -> Self {
        Self {
            lines: vec![
                "████████".to_string(),
                "██▒▒▒▒██".to_string(),
                "██▒▒▒▒██".to_string(),
                "████████".to_string(),
            ],
            placeholder: true,
        }
    }

    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
    }
}
