// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene descriptors and the ordered registry holding them.

use hashbrown::HashSet;
use narviz_charts::{
    BarChartSpec, DualAxisChartSpec, Layout, LineChartSpec, ListViewSpec, ScatterChartSpec,
};

use crate::error::RegistryError;

/// Which renderer a scene uses, with its scene-specific settings.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartKind {
    /// A line over years.
    Line(LineChartSpec),
    /// One bar per year.
    Bar(BarChartSpec),
    /// Two series with their own y axes.
    DualAxis(DualAxisChartSpec),
    /// Two datasets joined on year.
    Scatter(ScatterChartSpec),
    /// A searchable list.
    List(ListViewSpec),
}

impl ChartKind {
    /// Whether the scene reacts to filter input.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

/// One scene of the story.
///
/// `datasets` are loaded in order and handed to the renderer in the same order.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescriptor {
    /// Unique id.
    pub id: String,
    /// Description shown next to the chart.
    pub title: String,
    /// Renderer and its settings.
    pub chart: ChartKind,
    /// Names of the datasets the renderer needs.
    pub datasets: Vec<String>,
    /// Containers shown while this scene is current.
    pub containers: Vec<String>,
    /// Layout used instead of the configured default.
    pub layout: Option<Layout>,
}

impl SceneDescriptor {
    /// Creates a scene with no datasets, containers or layout override.
    pub fn new(id: impl Into<String>, title: impl Into<String>, chart: ChartKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            chart,
            datasets: Vec::new(),
            containers: Vec::new(),
            layout: None,
        }
    }

    /// Appends a required dataset.
    pub fn with_dataset(mut self, name: impl Into<String>) -> Self {
        self.datasets.push(name.into());
        self
    }

    /// Appends a container shown with this scene.
    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.containers.push(id.into());
        self
    }

    /// Overrides the layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }
}

/// The fixed, ordered list of scenes.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneRegistry {
    scenes: Vec<SceneDescriptor>,
    containers: Vec<String>,
}

impl SceneRegistry {
    /// Builds a registry. Fails on an empty list or a repeated id.
    pub fn new(scenes: impl IntoIterator<Item = SceneDescriptor>) -> Result<Self, RegistryError> {
        let scenes: Vec<SceneDescriptor> = scenes.into_iter().collect();
        if scenes.is_empty() {
            return Err(RegistryError::Empty);
        }
        {
            let mut ids = HashSet::with_capacity(scenes.len());
            for scene in &scenes {
                if !ids.insert(scene.id.as_str()) {
                    return Err(RegistryError::DuplicateId(scene.id.clone()));
                }
            }
        }
        let mut containers: Vec<String> = Vec::new();
        for c in scenes.iter().flat_map(|s| &s.containers) {
            if !containers.contains(c) {
                containers.push(c.clone());
            }
        }
        Ok(Self { scenes, containers })
    }

    /// Number of scenes; never zero.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Never true for a built registry.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// The scene at `index`.
    pub fn get(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    /// Position of the scene with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.id == id)
    }

    /// Scenes in story order.
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    /// Every container any scene toggles, in first-use order.
    pub fn containers(&self) -> &[String] {
        &self.containers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_scene(id: &str) -> SceneDescriptor {
        SceneDescriptor::new(id, "List", ChartKind::List(ListViewSpec::new("player", "HR")))
    }

    #[test]
    fn empty_registries_are_rejected() {
        assert_eq!(SceneRegistry::new([]), Err(RegistryError::Empty));
    }

    #[test]
    fn ids_must_be_unique() {
        assert_eq!(
            SceneRegistry::new([list_scene("a"), list_scene("b"), list_scene("a")]),
            Err(RegistryError::DuplicateId("a".into()))
        );
    }

    #[test]
    fn containers_are_collected_once_in_order() {
        let registry = SceneRegistry::new([
            list_scene("a").with_container("search"),
            list_scene("b"),
            list_scene("c")
                .with_container("legend")
                .with_container("search"),
        ])
        .unwrap();
        assert_eq!(registry.containers(), ["search", "legend"]);
        assert_eq!(registry.position("c"), Some(2));
        assert_eq!(registry.len(), 3);
    }
}
