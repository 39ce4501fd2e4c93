use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::content::ContentCatalog;
use crate::core::zone::{Point, ZoneId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind { Error, Warning }

#[derive(Debug, Clone)]
pub struct ContentIssue {
    /// What the issue is about: a zone id, a section name, ...
    pub subject: String,
    pub message: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub issues: Vec<ContentIssue>,
}

impl ValidationResult {
    pub fn errors(&self) -> impl Iterator<Item = &ContentIssue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ContentIssue> {
        self.issues.iter().filter(|i| i.kind == IssueKind::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    fn error(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ContentIssue { subject: subject.into(), message: message.into(), kind: IssueKind::Error });
    }

    fn warning(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ContentIssue { subject: subject.into(), message: message.into(), kind: IssueKind::Warning });
    }
}

/// Read and check a content file; parse failures are returned as `Err`
pub fn validate_content_file(path: &Path, threshold: f64) -> Result<ValidationResult> {
    let contents = fs::read_to_string(path).context(format!("Failed to read content file: {:?}", path))?;
    let catalog = ContentCatalog::parse(&contents).context(format!("Failed to parse content file: {:?}", path))?;
    Ok(validate_catalog(&catalog, threshold))
}

pub fn validate_catalog(catalog: &ContentCatalog, threshold: f64) -> ValidationResult {
    let mut result = ValidationResult::default();

    if catalog.profile.name.trim().is_empty() {
        result.error("profile", "name is empty");
    }

    check_zones(catalog, &mut result);
    check_overlaps(catalog, threshold, &mut result);
    check_order("feed", &catalog.feed.sections, false, &mut result);
    check_order("grid", &catalog.grid.rows.iter().map(|r| r.zone).collect::<Vec<_>>(), false, &mut result);
    check_order("mobile", &catalog.mobile.order, true, &mut result);

    if catalog.feed.sections.is_empty() {
        result.error("feed", "no sections listed");
    }
    if catalog.mobile.order.is_empty() {
        result.error("mobile", "order is empty");
    }
    if catalog.certifications.is_empty() { result.warning("certifications", "no entries"); }
    if catalog.projects.is_empty() { result.warning("projects", "no entries"); }
    if catalog.skills.is_empty() { result.warning("skills", "no entries"); }
    if catalog.contact.is_empty() { result.warning("contact", "no entries"); }

    result
}

fn check_zones(catalog: &ContentCatalog, result: &mut ValidationResult) {
    let mut seen = HashSet::new();

    for zone in &catalog.zones {
        let id = zone.id.as_str();
        if !seen.insert(zone.id) {
            result.error(id, "declared more than once");
        }

        let pos = zone.position();
        if !pos.x.is_finite() || !pos.y.is_finite() || !pos.in_bounds() {
            result.error(id, format!("position ({}, {}) is outside the 0-100 map", pos.x, pos.y));
        }
        if zone.name.trim().is_empty() { result.error(id, "name is empty"); }
        if zone.message.trim().is_empty() { result.error(id, "dialog message is empty"); }
        if zone.speaker.trim().is_empty() { result.warning(id, "dialog has no speaker"); }

        if zone.choices.is_empty() {
            result.warning(id, "dialog offers no choices");
        }
        for choice in &zone.choices {
            if choice.target == zone.id {
                result.warning(id, format!("choice '{}' leads back to the same zone", choice.label));
            }
            if choice.label.trim().is_empty() {
                result.error(id, format!("choice to '{}' has an empty label", choice.target));
            }
        }
    }

    for id in ZoneId::ALL {
        if !seen.contains(&id) {
            result.error(id.as_str(), "zone is missing");
        }
    }
}

/// Zones whose anchors sit within each other's reach; nearest-wins decides
fn check_overlaps(catalog: &ContentCatalog, threshold: f64, result: &mut ValidationResult) {
    let zones = &catalog.zones;
    for i in 0..zones.len() {
        let a = &zones[i];
        for b in &zones[(i + 1)..] {
            if a.id == b.id { continue; }
            let distance = Point::distance(a.position(), b.position());
            if distance < threshold {
                result.warning(a.id.as_str(), format!("is {:.1} from '{}', inside the {} proximity threshold", distance, b.id, threshold));
            }
        }
    }
}

fn check_order(section: &str, order: &[ZoneId], must_cover: bool, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for id in order {
        if !seen.insert(*id) {
            result.warning(section, format!("'{}' is listed more than once", id));
        }
    }
    if must_cover {
        for id in ZoneId::ALL {
            if !seen.contains(&id) {
                result.warning(section, format!("'{}' is not reachable from the taskbar", id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::catalog;

    #[test]
    fn test_default_content_is_clean() {
        let result = validate_catalog(&catalog(), 15.0);
        assert!(result.issues.is_empty(), "{:?}", result.issues);
    }

    #[test]
    fn test_missing_and_duplicate_zones() {
        let mut catalog = catalog();
        let home = catalog.zones[0].clone();
        catalog.zones.retain(|z| z.id != ZoneId::Skills);
        catalog.zones.push(home);

        let result = validate_catalog(&catalog, 15.0);
        assert!(result.has_errors());
        assert!(result.errors().any(|i| i.subject == "skills" && i.message.contains("missing")));
        assert!(result.errors().any(|i| i.subject == "home" && i.message.contains("more than once")));
    }

    #[test]
    fn test_out_of_range_position() {
        let mut catalog = catalog();
        catalog.zones[1].x = 120.0;
        let result = validate_catalog(&catalog, 15.0);
        assert!(result.errors().any(|i| i.subject == "about" && i.message.contains("outside")));
    }

    #[test]
    fn test_empty_message_and_self_choice() {
        let mut catalog = catalog();
        let contact = catalog.zones.iter_mut().find(|z| z.id == ZoneId::Contact).unwrap();
        contact.message.clear();
        contact.choices[0].target = ZoneId::Contact;

        let result = validate_catalog(&catalog, 15.0);
        assert!(result.errors().any(|i| i.subject == "contact" && i.message.contains("message")));
        assert!(result.warnings().any(|i| i.subject == "contact" && i.message.contains("same zone")));
    }

    #[test]
    fn test_overlap_warning_depends_on_threshold() {
        let catalog = catalog();
        // Education sits ~22.4 from About and Contact
        assert!(validate_catalog(&catalog, 15.0).warnings().next().is_none());
        let wide = validate_catalog(&catalog, 25.0);
        assert!(wide.warnings().any(|i| i.message.contains("proximity threshold")));
        assert!(!wide.has_errors());
    }

    #[test]
    fn test_layout_orders() {
        let mut catalog = catalog();
        catalog.feed.sections.push(ZoneId::Home);
        catalog.mobile.order.retain(|z| *z != ZoneId::Education);

        let result = validate_catalog(&catalog, 15.0);
        assert!(result.warnings().any(|i| i.subject == "feed" && i.message.contains("more than once")));
        assert!(result.warnings().any(|i| i.subject == "mobile" && i.message.contains("education")));
    }

    #[test]
    fn test_validate_file_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.toml");
        fs::write(&path, "[profile]\nname = 3\n").unwrap();
        assert!(validate_content_file(&path, 15.0).is_err());
    }
}
