use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{self, NavError, Result};

/// Height of an artwork's centre above the floor origin
pub const ARTWORK_HEIGHT: f32 = 0.5;
/// Distance of the hanging wall behind the walk axis
pub const ARTWORK_DEPTH: f32 = -3.5;

/// One displayed item as supplied by the scene layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Page opened when the artwork is clicked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Exhibit {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Title for display, falling back to the id
    pub fn label(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// Position of one exhibit along the walk axis
#[derive(Debug, Clone, PartialEq)]
pub struct FocalTarget {
    pub id: String,
    pub index: usize,
    pub lateral: f32,
}

impl FocalTarget {
    /// World position of the framed artwork on the wall
    pub fn artwork_position(&self) -> Vec3 {
        Vec3::new(self.lateral, ARTWORK_HEIGHT, ARTWORK_DEPTH)
    }
}

/// Inclusive range the lateral intent is clamped to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralBounds {
    pub min: f32,
    pub max: f32,
}

impl LateralBounds {
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Ordered focal targets, derived once from the exhibit list
#[derive(Debug, Clone)]
pub struct Gallery {
    targets: Vec<FocalTarget>,
    spacing: f32,
    bounds: LateralBounds,
}

impl Gallery {
    pub fn new(exhibits: &[Exhibit], spacing: f32, edge_margin: f32) -> Result<Self> {
        if exhibits.is_empty() {
            return Err(NavError::EmptyGallery);
        }

        let targets: Vec<FocalTarget> = exhibits
            .iter()
            .enumerate()
            .map(|(index, exhibit)| FocalTarget {
                id: exhibit.id.clone(),
                index,
                lateral: index as f32 * spacing,
            })
            .collect();

        let last = (targets.len() - 1) as f32 * spacing;
        let bounds = LateralBounds {
            min: -edge_margin,
            max: last + edge_margin,
        };

        Ok(Self {
            targets,
            spacing,
            bounds,
        })
    }

    pub fn with_count(count: usize, spacing: f32, edge_margin: f32) -> Result<Self> {
        Self::new(&placeholder_exhibits(count), spacing, edge_margin)
    }

    pub fn targets(&self) -> &[FocalTarget] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn bounds(&self) -> LateralBounds {
        self.bounds
    }

    /// Clamp an arbitrary index into the valid range
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.targets.len() - 1)
    }

    pub fn target(&self, index: usize) -> &FocalTarget {
        &self.targets[self.clamp_index(index)]
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.targets.iter().position(|t| t.id == id)
    }

    /// Exhibit closest to a lateral coordinate
    pub fn nearest_index(&self, lateral: f32) -> usize {
        let raw = (lateral / self.spacing).round();
        if raw <= 0.0 {
            0
        } else {
            self.clamp_index(raw as usize)
        }
    }
}

/// `count` placeholder exhibits named `exhibit-1`, `exhibit-2`, ...
pub fn placeholder_exhibits(count: usize) -> Vec<Exhibit> {
    (1..=count)
        .map(|n| Exhibit::new(format!("exhibit-{n}"), format!("Exhibit {n}")))
        .collect()
}

/// Load an exhibit list from a JSON array of `{ "id", "title", "url" }` objects
pub fn load_exhibits(path: impl AsRef<Path>) -> Result<Vec<Exhibit>> {
    let text = error::read_to_string(path.as_ref())?;
    let exhibits: Vec<Exhibit> = serde_json::from_str(&text)?;
    Ok(exhibits)
}
