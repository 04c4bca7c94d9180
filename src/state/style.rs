/// Art styles and their transform parameters
///
/// `TransformParams` stores the visual-filter settings for one style.
/// They are handed as-is to the style-transform capability and can be
/// serialized to JSON.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GalleryError, Result};

/// Identifier of a registered art style
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StyleId {
    VanGogh,
    Picasso,
    Monet,
    Dali,
    Cyberpunk,
    Anime,
}

impl StyleId {
    pub const ALL: [StyleId; 6] = [
        StyleId::VanGogh,
        StyleId::Picasso,
        StyleId::Monet,
        StyleId::Dali,
        StyleId::Cyberpunk,
        StyleId::Anime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleId::VanGogh => "vangogh",
            StyleId::Picasso => "picasso",
            StyleId::Monet => "monet",
            StyleId::Dali => "dali",
            StyleId::Cyberpunk => "cyberpunk",
            StyleId::Anime => "anime",
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StyleId {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        StyleId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| GalleryError::UnknownStyle(s.to_string()))
    }
}

/// Visual-filter parameters for a style
///
/// Values follow CSS filter semantics. The identity value of each field
/// leaves the image unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TransformParams {
    /// Sepia amount (0.0 to 1.0)
    pub sepia: f32,
    /// Saturation multiplier (1.0 = unchanged, 0.0 = grayscale)
    pub saturate: f32,
    /// Hue rotation in degrees
    pub hue_rotate: f32,
    /// Contrast multiplier around mid-grey
    pub contrast: f32,
    /// Brightness multiplier
    pub brightness: f32,
    /// Gaussian blur radius in pixels
    pub blur: f32,
    /// Alpha multiplier (0.0 to 1.0)
    pub opacity: f32,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            sepia: 0.0,
            saturate: 1.0,
            hue_rotate: 0.0,
            contrast: 1.0,
            brightness: 1.0,
            blur: 0.0,
            opacity: 1.0,
        }
    }
}

impl TransformParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string; missing fields take their identity value
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// True when applying these parameters would not change the image
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Catalog entry for one style
#[derive(Debug, Clone, PartialEq)]
pub struct StyleInfo {
    pub id: StyleId,
    pub name: &'static str,
    pub description: &'static str,
    /// RGB accent used when the style is drawn in the UI
    pub accent: [u8; 3],
    pub params: TransformParams,
}

/// Registry of the styles a generation request may use
#[derive(Debug, Clone, PartialEq)]
pub struct StyleCatalog {
    styles: Vec<StyleInfo>,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StyleCatalog {
    /// The six reference styles
    pub fn builtin() -> Self {
        let p = TransformParams::default;
        Self {
            styles: vec![
                StyleInfo {
                    id: StyleId::VanGogh,
                    name: "Van Gogh",
                    description: "Post-impressionist style with swirling brushstrokes",
                    accent: [0xea, 0xb3, 0x08],
                    params: TransformParams { sepia: 0.8, saturate: 1.5, hue_rotate: 30.0, ..p() },
                },
                StyleInfo {
                    id: StyleId::Picasso,
                    name: "Picasso",
                    description: "Cubist geometric forms and bold colors",
                    accent: [0x3b, 0x82, 0xf6],
                    params: TransformParams { contrast: 1.5, saturate: 0.8, hue_rotate: 180.0, ..p() },
                },
                StyleInfo {
                    id: StyleId::Monet,
                    name: "Monet",
                    description: "Impressionist light and color techniques",
                    accent: [0x22, 0xc5, 0x5e],
                    params: TransformParams { blur: 1.0, opacity: 0.9, saturate: 1.3, ..p() },
                },
                StyleInfo {
                    id: StyleId::Dali,
                    name: "Dalí",
                    description: "Surrealist dreamlike imagery",
                    accent: [0xa8, 0x55, 0xf7],
                    params: TransformParams { hue_rotate: 270.0, saturate: 1.8, contrast: 1.2, ..p() },
                },
                StyleInfo {
                    id: StyleId::Cyberpunk,
                    name: "Cyberpunk",
                    description: "Neon-lit futuristic aesthetic",
                    accent: [0xec, 0x48, 0x99],
                    params: TransformParams { hue_rotate: 300.0, saturate: 2.0, contrast: 1.5, ..p() },
                },
                StyleInfo {
                    id: StyleId::Anime,
                    name: "Anime",
                    description: "Japanese animation style",
                    accent: [0xef, 0x44, 0x44],
                    params: TransformParams { saturate: 1.8, contrast: 1.3, brightness: 1.1, ..p() },
                },
            ],
        }
    }

    /// A catalog holding only the given styles, in the given order
    pub fn with_styles(styles: impl IntoIterator<Item = StyleInfo>) -> Self {
        Self {
            styles: styles.into_iter().collect(),
        }
    }

    pub fn describe(&self, id: StyleId) -> Result<&StyleInfo> {
        self.styles
            .iter()
            .find(|style| style.id == id)
            .ok_or_else(|| GalleryError::UnknownStyle(id.to_string()))
    }

    pub fn contains(&self, id: StyleId) -> bool {
        self.styles.iter().any(|style| style.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleInfo> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Ordered, duplicate-free set of selected styles
///
/// Insertion order is generation order and final gallery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<StyleId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse style names, failing on the first unknown one
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut selection = Self::new();
        for name in names {
            selection.insert(name.parse()?);
        }
        Ok(selection)
    }

    /// Append a style; returns false if it was already selected
    pub fn insert(&mut self, id: StyleId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: StyleId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|selected| *selected != id);
        self.ids.len() != before
    }

    /// Select the style if it is not selected, otherwise deselect it
    pub fn toggle(&mut self, id: StyleId) {
        if !self.remove(id) {
            self.ids.push(id);
        }
    }

    pub fn contains(&self, id: StyleId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = StyleId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

impl FromIterator<StyleId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = StyleId>>(iter: I) -> Self {
        let mut selection = Self::new();
        for id in iter {
            selection.insert(id);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_are_identity() {
        assert!(TransformParams::default().is_identity());
        assert!(!StyleCatalog::builtin()
            .describe(StyleId::Anime)
            .unwrap()
            .params
            .is_identity());
    }

    #[test]
    fn test_params_json_fills_missing_fields() {
        let params = TransformParams::from_json(r#"{"hue_rotate": 90.0}"#).unwrap();
        assert_eq!(params.hue_rotate, 90.0);
        assert_eq!(params.saturate, 1.0);
        assert_eq!(params.opacity, 1.0);

        let json = params.to_json().unwrap();
        assert_eq!(TransformParams::from_json(&json).unwrap(), params);
    }

    #[test]
    fn test_style_id_names() {
        for id in StyleId::ALL {
            assert_eq!(id.as_str().parse::<StyleId>().unwrap(), id);
        }
        assert_eq!(
            serde_json::to_string(&StyleId::VanGogh).unwrap(),
            "\"vangogh\""
        );
        assert!(matches!(
            "unicorn-style".parse::<StyleId>(),
            Err(GalleryError::UnknownStyle(name)) if name == "unicorn-style"
        ));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = StyleCatalog::builtin();
        assert_eq!(catalog.len(), StyleId::ALL.len());

        let vangogh = catalog.describe(StyleId::VanGogh).unwrap();
        assert_eq!(vangogh.name, "Van Gogh");
        assert_eq!(vangogh.params.sepia, 0.8);
        assert_eq!(vangogh.params.hue_rotate, 30.0);

        let ids: Vec<_> = catalog.iter().map(|s| s.id).collect();
        assert_eq!(ids, StyleId::ALL.to_vec());
    }

    #[test]
    fn test_describe_unregistered_style() {
        let catalog = StyleCatalog::with_styles(
            StyleCatalog::builtin()
                .iter()
                .filter(|s| s.id == StyleId::Monet)
                .cloned(),
        );
        assert!(catalog.describe(StyleId::Monet).is_ok());
        assert!(matches!(
            catalog.describe(StyleId::Dali),
            Err(GalleryError::UnknownStyle(name)) if name == "dali"
        ));
    }

    #[test]
    fn test_selection_preserves_order_without_duplicates() {
        let mut selection = SelectionSet::new();
        assert!(selection.insert(StyleId::Monet));
        assert!(selection.insert(StyleId::VanGogh));
        assert!(!selection.insert(StyleId::Monet));

        let ids: Vec<_> = selection.iter().collect();
        assert_eq!(ids, vec![StyleId::Monet, StyleId::VanGogh]);
    }

    #[test]
    fn test_selection_toggle() {
        let mut selection = SelectionSet::new();
        selection.toggle(StyleId::Dali);
        selection.toggle(StyleId::Anime);
        selection.toggle(StyleId::Dali);
        selection.toggle(StyleId::Dali);

        let ids: Vec<_> = selection.iter().collect();
        assert_eq!(ids, vec![StyleId::Anime, StyleId::Dali]);
    }

    #[test]
    fn test_selection_from_names() {
        let selection = SelectionSet::from_names(["picasso", "dali", "picasso"]).unwrap();
        assert_eq!(selection.len(), 2);

        assert!(matches!(
            SelectionSet::from_names(["monet", "unicorn-style"]),
            Err(GalleryError::UnknownStyle(_))
        ));
    }
}
