use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MenuError;

/// One project tile on the sphere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Thumbnail source: a filesystem path or an http(s) URL. Empty
    /// means the procedural placeholder.
    #[serde(default)]
    pub image: String,
    /// Link the host opens when the active item is invoked.
    #[serde(default)]
    pub link: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Longer description surfaced through the host callbacks.
    #[serde(default)]
    pub description: String,
    /// Technology tags surfaced through the host callbacks.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Stable identifier; host callbacks echo it alongside the index.
    #[serde(default)]
    pub slug: Option<String>,
}

impl MenuItem {
    /// The tile shown when the host supplies no items at all.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            image: String::new(),
            link: String::new(),
            title: String::new(),
            description: String::new(),
            technologies: Vec::new(),
            slug: None,
        }
    }
}

/// Load an item list from a JSON file.
///
/// # Errors
///
/// Returns [`MenuError::Io`] when the file cannot be read and
/// [`MenuError::Catalog`] when it does not decode as an item list.
pub fn load_items(path: &Path) -> Result<Vec<MenuItem>, MenuError> {
    let content = std::fs::read_to_string(path)?;
    let items: Vec<MenuItem> = serde_json::from_str(&content)?;
    Ok(ensure_non_empty(items))
}

/// Replace an empty list with the single placeholder tile so the
/// sphere always has something to repeat.
#[must_use]
pub fn ensure_non_empty(items: Vec<MenuItem>) -> Vec<MenuItem> {
    if items.is_empty() {
        vec![MenuItem::placeholder()]
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_json_fills_defaults() {
        let items: Vec<MenuItem> = serde_json::from_str(
            r#"[{"image": "shot.png", "title": "Demo"}]"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].image, "shot.png");
        assert_eq!(items[0].title, "Demo");
        assert!(items[0].link.is_empty());
        assert!(items[0].technologies.is_empty());
        assert_eq!(items[0].slug, None);
    }

    #[test]
    fn empty_list_becomes_placeholder() {
        let items = ensure_non_empty(Vec::new());
        assert_eq!(items.len(), 1);
        assert!(items[0].image.is_empty());
    }

    #[test]
    fn populated_list_is_untouched() {
        let records = vec![
            MenuItem {
                title: "a".into(),
                ..MenuItem::placeholder()
            },
            MenuItem {
                title: "b".into(),
                ..MenuItem::placeholder()
            },
        ];
        let items = ensure_non_empty(records.clone());
        assert_eq!(items, records);
    }
}
