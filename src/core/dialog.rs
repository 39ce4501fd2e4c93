//! Per-zone dialog messages with their navigation choices

use anyhow::{bail, Result};

use super::zone::ZoneId;

#[derive(Debug, Clone, PartialEq)]
pub struct DialogChoice {
    pub label: String,
    pub target: ZoneId,
}

/// The message a zone's speaker shows on arrival
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub speaker: String,
    pub text: String,
    pub choices: Vec<DialogChoice>,
}

/// One canned dialog per zone
#[derive(Debug, Clone)]
pub struct DialogBook {
    entries: Vec<Dialog>,
}

impl DialogBook {
    pub fn new(entries: impl IntoIterator<Item = (ZoneId, Dialog)>) -> Result<Self> {
        let mut slots: Vec<Option<Dialog>> = vec![None; ZoneId::COUNT];
        for (zone, dialog) in entries {
            let slot = &mut slots[zone.index()];
            if slot.is_some() {
                bail!("zone '{}' has more than one dialog", zone);
            }
            *slot = Some(dialog);
        }

        if let Some(missing) = ZoneId::ALL.iter().find(|id| slots[id.index()].is_none()) {
            bail!("zone '{}' has no dialog", missing);
        }

        Ok(Self {
            entries: slots.into_iter().flatten().collect(),
        })
    }

    pub fn for_zone(&self, zone: ZoneId) -> &Dialog {
        &self.entries[zone.index()]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn dialog_for(zone: ZoneId, targets: &[ZoneId]) -> Dialog {
        Dialog {
            speaker: format!("{} keeper", zone),
            text: format!("Welcome to {}", zone),
            choices: targets
                .iter()
                .map(|target| DialogChoice {
                    label: target.to_string(),
                    target: *target,
                })
                .collect(),
        }
    }

    /// Every zone offers a way to About and Home
    pub(crate) fn simple_book() -> DialogBook {
        DialogBook::new(
            ZoneId::ALL
                .iter()
                .map(|z| (*z, dialog_for(*z, &[ZoneId::About, ZoneId::Home]))),
        )
        .expect("every zone has a dialog")
    }

    #[test]
    fn test_lookup_by_zone() {
        let book = simple_book();
        for zone in ZoneId::ALL {
            assert_eq!(book.for_zone(zone).text, format!("Welcome to {}", zone));
        }
    }

    #[test]
    fn test_missing_dialog_is_rejected() {
        let entries = ZoneId::ALL
            .iter()
            .filter(|z| **z != ZoneId::Skills)
            .map(|z| (*z, dialog_for(*z, &[])));
        let err = DialogBook::new(entries).unwrap_err();
        assert!(err.to_string().contains("skills"));
    }

    #[test]
    fn test_duplicate_dialog_is_rejected() {
        let mut entries: Vec<_> = ZoneId::ALL.iter().map(|z| (*z, dialog_for(*z, &[]))).collect();
        entries.push((ZoneId::Home, dialog_for(ZoneId::Home, &[])));
        assert!(DialogBook::new(entries).is_err());
    }
}
