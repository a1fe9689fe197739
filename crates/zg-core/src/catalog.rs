//! Element catalog: the placeable element definitions offered by the palette.

use crate::error::{GardenError, Result};
use crate::model::{ElementCategory, ElementDefinition};

/// Read-only source of element definitions.
pub trait ElementCatalog {
    /// Every definition, in catalog order.
    fn list(&self) -> Vec<ElementDefinition>;

    /// Definitions of one category, in catalog order.
    fn list_by_category(&self, category: ElementCategory) -> Vec<ElementDefinition> {
        self.list()
            .into_iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Look up a definition by id.
    ///
    /// # Errors
    /// `GardenError::NotFound` if no definition has this id.
    fn get(&self, id: &str) -> Result<ElementDefinition> {
        self.list()
            .into_iter()
            .find(|d| d.id == id)
            .ok_or_else(|| GardenError::element_not_found(id))
    }
}

/// A catalog backed by a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    definitions: Vec<ElementDefinition>,
}

impl StaticCatalog {
    pub fn new(definitions: Vec<ElementDefinition>) -> Self {
        Self { definitions }
    }

    /// Parse a JSON array of definitions.
    ///
    /// # Errors
    /// `GardenError::Codec` if the text is not a valid definition array.
    pub fn from_json(text: &str) -> Result<Self> {
        let definitions: Vec<ElementDefinition> =
            serde_json::from_str(text).map_err(|e| GardenError::Codec(e.to_string()))?;
        log::debug!("loaded {} catalog definitions", definitions.len());
        Ok(Self::new(definitions))
    }

    /// The stock palette shipped with the designer.
    pub fn builtin() -> Self {
        use ElementCategory::*;
        let def = |id: &str, category, name: &str, icon: &str, scale: f64, color: &str| {
            let mut d = ElementDefinition::new(id, category, name, icon);
            d.default_scale = scale;
            d.color = Some(color.to_string());
            d
        };
        Self::new(vec![
            def("river-stone", Rock, "River Stone", "🪨", 1.0, "#8B8680"),
            def("standing-stone", Rock, "Standing Stone", "🗿", 1.2, "#6E6A65"),
            def("pebbles", Rock, "Pebbles", "⚪", 0.8, "#C8C2B8"),
            def("koi-pond", Water, "Koi Pond", "🐟", 1.4, "#5B8DB8"),
            def("stream", Water, "Stream", "💧", 1.0, "#7FB3D5"),
            def("fountain", Water, "Fountain", "⛲", 1.1, "#6FA8DC"),
            def("bamboo", Plant, "Bamboo", "🎋", 1.2, "#7A9E4E"),
            def("bonsai", Plant, "Bonsai", "🌳", 1.0, "#4A5D4E"),
            def("moss", Plant, "Moss", "🌿", 0.9, "#8FA876"),
            def("cherry-blossom", Plant, "Cherry Blossom", "🌸", 1.0, "#F4B6C2"),
        ])
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ElementCatalog for StaticCatalog {
    fn list(&self) -> Vec<ElementDefinition> {
        self.definitions.clone()
    }

    fn list_by_category(&self, category: ElementCategory) -> Vec<ElementDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.category == category)
            .cloned()
            .collect()
    }

    fn get(&self, id: &str) -> Result<ElementDefinition> {
        self.definitions
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| GardenError::element_not_found(id))
    }
}
