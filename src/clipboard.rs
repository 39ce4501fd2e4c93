//! Copying contact links to the system clipboard
//!
//! Uses arboard for cross-platform clipboard access

use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::content::ContactLink;

/// Copy text to system clipboard
pub fn copy(text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(()); // Nothing to copy
    }

    let mut clipboard = Clipboard::new().context("Clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write to clipboard")?;
    tracing::debug!("Copied {} bytes to clipboard", text.len());
    Ok(())
}

/// Copy a contact link and describe the outcome for the status line
pub fn copy_contact(link: Option<&ContactLink>) -> String {
    let Some(link) = link else {
        return "No contact link to copy".to_string();
    };

    match copy(&link.url) {
        Ok(()) => format!("Copied {} link: {}", link.label, link.url),
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            format!("{}: {}", link.label, link.url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_copy() {
        // Should not fail on empty string
        assert!(copy("").is_ok());
    }

    #[test]
    fn test_copy_without_link() {
        assert_eq!(copy_contact(None), "No contact link to copy");
    }

    #[test]
    #[ignore] // Requires clipboard access, may fail in CI
    fn test_copy_contact() {
        let link = ContactLink {
            label: "GitHub".to_string(),
            value: "Gardo32".to_string(),
            url: "https://github.com/Gardo32".to_string(),
        };
        assert!(copy_contact(Some(&link)).starts_with("Copied GitHub"));
    }
}
