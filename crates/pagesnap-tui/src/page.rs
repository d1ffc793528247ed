//! The demo document: a vertical sequence of tagged sections.
//!
//! Sections live in pixel coordinates. The page answers the controller's
//! part query by matching section tags against the configured selector,
//! measuring offsets at query time.

use pagesnap_core::{Part, PartSource};

/// One section of the demo document
#[derive(Debug, Clone)]
pub struct Section {
    /// Tag matched against the snap selector
    pub tag: String,
    /// Title rendered on the section border
    pub title: String,
    /// Rendered height in pixels
    pub height: f64,
}

impl Section {
    pub fn new(tag: &str, title: &str, height: f64) -> Self {
        Self {
            tag: tag.to_string(),
            title: title.to_string(),
            height,
        }
    }
}

/// The whole document, sections in document order
#[derive(Debug, Clone)]
pub struct Page {
    pub sections: Vec<Section>,
}

impl Page {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Default demo layout. The footer carries a different tag so it is
    /// not a snap target under the default selector.
    pub fn demo() -> Self {
        Self::new(vec![
            Section::new("section", "Hero", 800.0),
            Section::new("section", "Features", 700.0),
            Section::new("section", "Gallery", 1200.0),
            Section::new("section", "About", 800.0),
            Section::new("footer", "Footer", 400.0),
        ])
    }

    /// Total document height in pixels
    pub fn content_height(&self) -> f64 {
        self.sections.iter().map(|s| s.height).sum()
    }

    /// Document offset of the section's top edge
    pub fn offset_of(&self, idx: usize) -> f64 {
        self.sections.iter().take(idx).map(|s| s.height).sum()
    }
}

impl PartSource for Page {
    fn query(&self, selector: &str) -> Vec<Part> {
        let mut parts = Vec::new();
        let mut offset = 0.0;
        for section in &self.sections {
            if section.tag == selector {
                parts.push(Part::new(offset, section.height));
            }
            offset += section.height;
        }
        parts
    }
}
