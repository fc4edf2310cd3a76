// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene controller: navigation, rendering and search input.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use futures::future::try_join_all;
use kurbo::Point;
use narviz_charts::{Layout, Surface, TextStyle, YearFilter};
use narviz_core::{Dataset, Record};
use narviz_data::DatasetCache;

use crate::config::ViewConfig;
use crate::error::RenderError;
use crate::registry::{ChartKind, SceneDescriptor, SceneRegistry};

/// How a render request ended.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOutcome {
    /// The scene was drawn.
    Rendered,
    /// A later request started while this one was loading; nothing was drawn.
    Superseded,
    /// The scene could not be drawn; the failure placeholder is showing.
    Failed(RenderError),
}

impl RenderOutcome {
    /// Whether the scene was drawn.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// Owns the current scene index and draws scenes onto a surface.
///
/// All methods take `&self`, so several requests may be in flight on a local executor.
/// Each render takes an epoch when it starts; when its loads resolve under a newer epoch it
/// draws nothing and reports [`RenderOutcome::Superseded`]. The last request always wins.
#[derive(Debug)]
pub struct SceneController<S> {
    registry: SceneRegistry,
    cache: DatasetCache,
    config: ViewConfig,
    surface: RefCell<S>,
    index: Cell<usize>,
    epoch: Cell<u64>,
    filter: Cell<YearFilter>,
}

impl<S: Surface> SceneController<S> {
    /// Creates a controller positioned on the first scene. Nothing is drawn until
    /// [`start`](Self::start) or a navigation call.
    pub fn new(registry: SceneRegistry, cache: DatasetCache, config: ViewConfig, surface: S) -> Self {
        Self {
            registry,
            cache,
            config,
            surface: RefCell::new(surface),
            index: Cell::new(0),
            epoch: Cell::new(0),
            filter: Cell::new(YearFilter::ALL),
        }
    }

    /// Index of the current scene.
    pub fn current_index(&self) -> usize {
        self.index.get()
    }

    /// The current scene.
    pub fn current_scene(&self) -> Option<&SceneDescriptor> {
        self.registry.get(self.index.get())
    }

    /// The scenes.
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// The dataset cache.
    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// The active configuration.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// The active list filter.
    pub fn filter(&self) -> YearFilter {
        self.filter.get()
    }

    /// Borrows the surface.
    ///
    /// Panics if called while a render is drawing, which cannot happen from outside the
    /// controller on a single thread.
    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    /// Consumes the controller and returns its surface.
    pub fn into_surface(self) -> S {
        self.surface.into_inner()
    }

    /// Renders the first scene.
    pub async fn start(&self) -> RenderOutcome {
        self.filter.set(YearFilter::ALL);
        self.render(0).await
    }

    /// Moves `delta` scenes under the configured boundary policy and renders the target.
    /// Resets the list filter.
    pub async fn navigate(&self, delta: isize) -> RenderOutcome {
        let from = self.index.get();
        let to = self.config.boundary.step(from, delta, self.registry.len());
        tracing::debug!(from, to, delta, "navigating");
        self.filter.set(YearFilter::ALL);
        self.render(to).await
    }

    /// Moves to the next scene.
    pub async fn next(&self) -> RenderOutcome {
        self.navigate(1).await
    }

    /// Moves to the previous scene.
    pub async fn prev(&self) -> RenderOutcome {
        self.navigate(-1).await
    }

    /// Stores the filter parsed from `text` and re-renders when the current scene is a list.
    ///
    /// Returns `None` when the current scene does not react to filter input.
    pub async fn on_filter_input(&self, text: &str) -> Option<RenderOutcome> {
        let filter = YearFilter::parse(text);
        self.filter.set(filter);
        tracing::debug!(year = ?filter.year(), "filter input");
        let index = self.index.get();
        let is_list = self.registry.get(index)?.chart.is_list();
        if is_list {
            Some(self.render(index).await)
        } else {
            None
        }
    }

    /// Makes `index` current and draws it.
    ///
    /// The surface is cleared, described and its containers toggled right away; the chart
    /// itself is drawn once every dataset the scene needs has loaded. Errors never escape:
    /// they leave the failure placeholder on the surface and come back as
    /// [`RenderOutcome::Failed`].
    pub async fn render(&self, index: usize) -> RenderOutcome {
        let Some(scene) = self.registry.get(index) else {
            return RenderOutcome::Failed(RenderError::UnknownScene {
                index,
                len: self.registry.len(),
            });
        };
        let epoch = self.epoch.get() + 1;
        self.epoch.set(epoch);
        self.index.set(index);
        tracing::debug!(scene = %scene.id, index, epoch, "rendering scene");

        {
            let mut surface = self.surface.borrow_mut();
            surface.clear();
            surface.set_description(&scene.title);
            for container in self.registry.containers() {
                surface.set_visible(container, scene.containers.contains(container));
            }
        }

        let loaded = try_join_all(scene.datasets.iter().map(|name| self.cache.load(name))).await;
        if self.epoch.get() != epoch {
            tracing::debug!(scene = %scene.id, epoch, "render superseded");
            return RenderOutcome::Superseded;
        }

        let result = loaded
            .map_err(RenderError::from)
            .and_then(|datasets| self.draw(scene, &datasets));
        match result {
            Ok(()) => RenderOutcome::Rendered,
            Err(error) => {
                tracing::warn!(scene = %scene.id, %error, "scene failed to render");
                self.draw_failure(scene);
                RenderOutcome::Failed(error)
            }
        }
    }

    fn layout_for(&self, scene: &SceneDescriptor) -> Layout {
        scene.layout.unwrap_or_else(|| self.config.layout())
    }

    fn draw(&self, scene: &SceneDescriptor, datasets: &[Rc<Dataset>]) -> Result<(), RenderError> {
        let data: Vec<&[Record]> = datasets.iter().map(|d| d.records()).collect();
        let layout = self.layout_for(scene);
        let mut surface = self.surface.borrow_mut();
        let surface: &mut dyn Surface = &mut *surface;
        match &scene.chart {
            ChartKind::Line(spec) => spec.draw(&data, surface, &layout)?,
            ChartKind::Bar(spec) => spec.draw(&data, surface, &layout)?,
            ChartKind::DualAxis(spec) => spec.draw(&data, surface, &layout)?,
            ChartKind::Scatter(spec) => spec.draw(&data, surface, &layout)?,
            ChartKind::List(spec) => spec
                .clone()
                .with_empty_message(self.config.empty_list_message.as_str())
                .draw_filtered(&data, self.filter.get(), surface, &layout)?,
        }
        Ok(())
    }

    fn draw_failure(&self, scene: &SceneDescriptor) {
        let plot = self.layout_for(scene).plot();
        let mut surface = self.surface.borrow_mut();
        surface.clear();
        surface.set_description(&scene.title);
        surface.draw_text(
            Point::new(plot.x0, plot.y0),
            &self.config.failure_message,
            &TextStyle::default(),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::FutureExt as _;
    use futures::channel::oneshot;
    use futures::executor::{LocalPool, block_on};
    use futures::future::LocalBoxFuture;
    use futures::task::LocalSpawnExt as _;
    use narviz_charts::{LineChartSpec, ListViewSpec, RecordingSurface};
    use narviz_data::{DataSource, DatasetSpec, FetchError, FieldKind, MemorySource, RawRow, SourceError};

    use super::*;
    use crate::config::BoundaryPolicy;

    fn catalog() -> Vec<DatasetSpec> {
        vec![
            DatasetSpec::new("totals", "totals.csv", "year").with_field("HR", "HR", FieldKind::Int),
            DatasetSpec::new("leaders", "leaders.csv", "year")
                .with_field("player", "player", FieldKind::Text)
                .with_field("HR", "HR", FieldKind::Int),
        ]
    }

    fn totals_rows() -> Vec<RawRow> {
        vec![
            RawRow::from_pairs([("year", "1998"), ("HR", "5064")]),
            RawRow::from_pairs([("year", "1999"), ("HR", "5528")]),
        ]
    }

    fn leaders_rows() -> Vec<RawRow> {
        vec![
            RawRow::from_pairs([("year", "1998"), ("player", "McGwire"), ("HR", "70")]),
            RawRow::from_pairs([("year", "1999"), ("player", "McGwire"), ("HR", "65")]),
            RawRow::from_pairs([("year", "2001"), ("player", "Bonds"), ("HR", "73")]),
        ]
    }

    fn registry() -> SceneRegistry {
        SceneRegistry::new([
            SceneDescriptor::new("totals", "Totals", ChartKind::Line(LineChartSpec::new("HR")))
                .with_dataset("totals"),
            SceneDescriptor::new(
                "search",
                "Search",
                ChartKind::List(ListViewSpec::new("player", "HR").with_value_suffix(" HRs")),
            )
            .with_dataset("leaders")
            .with_container("search"),
            SceneDescriptor::new("again", "Again", ChartKind::Line(LineChartSpec::new("HR")))
                .with_dataset("totals"),
        ])
        .unwrap()
    }

    fn memory() -> Rc<MemorySource> {
        Rc::new(
            MemorySource::new()
                .with_table("totals.csv", totals_rows())
                .with_table("leaders.csv", leaders_rows()),
        )
    }

    fn controller(
        source: Rc<dyn DataSource>,
        config: ViewConfig,
    ) -> SceneController<RecordingSurface> {
        let cache = DatasetCache::new(source, catalog());
        SceneController::new(registry(), cache, config, RecordingSurface::new())
    }

    #[derive(Default)]
    struct GatedSource {
        gates: RefCell<Vec<(String, oneshot::Sender<Result<Vec<RawRow>, FetchError>>)>>,
    }

    impl GatedSource {
        fn release(&self, path: &str, result: Result<Vec<RawRow>, FetchError>) {
            let mut gates = self.gates.borrow_mut();
            let at = gates.iter().position(|(p, _)| p == path).unwrap();
            let (_, gate) = gates.remove(at);
            gate.send(result).unwrap();
        }
    }

    impl DataSource for GatedSource {
        fn fetch_table<'a>(
            &'a self,
            path: &'a str,
        ) -> LocalBoxFuture<'a, Result<Vec<RawRow>, FetchError>> {
            let (tx, rx) = oneshot::channel();
            self.gates.borrow_mut().push((path.to_string(), tx));
            async move {
                rx.await
                    .unwrap_or_else(|_| Err(FetchError::read(path, "gate dropped")))
            }
            .boxed_local()
        }
    }

    #[test]
    fn start_draws_the_first_scene() {
        let c = controller(memory(), ViewConfig::default());
        assert_eq!(block_on(c.start()), RenderOutcome::Rendered);
        assert_eq!(c.current_index(), 0);
        let surface = c.surface();
        assert_eq!(surface.description(), "Totals");
        assert_eq!(surface.paths().len(), 1);
        assert!(!surface.is_visible("search"));
    }

    #[test]
    fn wrap_cycles_past_both_ends() {
        let c = controller(memory(), ViewConfig::default());
        block_on(c.start());
        block_on(c.prev());
        assert_eq!(c.current_index(), 2);
        block_on(c.next());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn clamp_stays_on_the_ends() {
        let c = controller(
            memory(),
            ViewConfig::default().with_boundary(BoundaryPolicy::Clamp),
        );
        block_on(c.start());
        block_on(c.prev());
        assert_eq!(c.current_index(), 0);
        for _ in 0..5 {
            block_on(c.next());
        }
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn search_container_follows_the_list_scene() {
        let c = controller(memory(), ViewConfig::default());
        block_on(c.start());
        assert!(block_on(c.next()).is_rendered());
        assert!(c.surface().is_visible("search"));
        assert_eq!(c.surface().texts().len(), 3);
        block_on(c.next());
        assert!(!c.surface().is_visible("search"));
    }

    #[test]
    fn filter_input_rerenders_the_list() {
        let c = controller(memory(), ViewConfig::default());
        block_on(c.render(1));

        assert_eq!(block_on(c.on_filter_input("1998")), Some(RenderOutcome::Rendered));
        assert_eq!(c.surface().texts(), ["1998: McGwire - 70 HRs"]);

        block_on(c.on_filter_input("1901"));
        assert_eq!(c.surface().texts(), ["No results"]);

        block_on(c.on_filter_input("abc"));
        assert_eq!(c.surface().texts().len(), 3);
    }

    #[test]
    fn filter_input_is_ignored_off_the_list() {
        let source = memory();
        let c = controller(source.clone(), ViewConfig::default());
        block_on(c.start());
        let clears = c.surface().clear_count();
        assert_eq!(block_on(c.on_filter_input("1998")), None);
        assert_eq!(c.surface().clear_count(), clears);
    }

    #[test]
    fn navigation_resets_the_filter() {
        let c = controller(memory(), ViewConfig::default());
        block_on(c.render(1));
        block_on(c.on_filter_input("1998"));
        block_on(c.next());
        block_on(c.prev());
        assert_eq!(c.filter(), YearFilter::ALL);
        assert_eq!(c.surface().texts().len(), 3);
    }

    #[test]
    fn configured_empty_message_replaces_the_default() {
        let config = ViewConfig {
            empty_list_message: "Nobody hit that year".into(),
            ..ViewConfig::default()
        };
        let c = controller(memory(), config);
        block_on(c.render(1));
        block_on(c.on_filter_input("1901"));
        assert_eq!(c.surface().texts(), ["Nobody hit that year"]);
    }

    #[test]
    fn failed_loads_show_the_placeholder_and_retry() {
        let source = memory();
        source.set_failure("totals.csv", FetchError::read("totals.csv", "offline"));
        let c = controller(source.clone(), ViewConfig::default());

        let outcome = block_on(c.start());
        assert!(
            matches!(
                outcome,
                RenderOutcome::Failed(RenderError::Source(SourceError::Fetch { .. }))
            ),
            "{outcome:?}"
        );
        assert_eq!(c.current_index(), 0);
        {
            let surface = c.surface();
            assert_eq!(surface.description(), "Totals");
            assert_eq!(surface.texts(), ["Failed to load data."]);
            assert!(surface.paths().is_empty());
        }

        source.set_table("totals.csv", totals_rows());
        assert_eq!(block_on(c.render(0)), RenderOutcome::Rendered);
        assert_eq!(source.fetch_count("totals.csv"), 2);
        assert!(c.surface().texts().iter().all(|t| *t != "Failed to load data."));
    }

    #[test]
    fn chart_errors_are_reported_not_raised() {
        let source = Rc::new(MemorySource::new().with_table(
            "totals.csv",
            vec![RawRow::from_pairs([("year", "1998"), ("HR", "5064")])],
        ));
        let c = controller(source, ViewConfig::default());
        assert!(matches!(
            block_on(c.start()),
            RenderOutcome::Failed(RenderError::Chart(_))
        ));
        assert_eq!(c.surface().texts(), ["Failed to load data."]);
    }

    #[test]
    fn unknown_indices_fail_without_moving() {
        let c = controller(memory(), ViewConfig::default());
        block_on(c.start());
        assert_eq!(
            block_on(c.render(7)),
            RenderOutcome::Failed(RenderError::UnknownScene { index: 7, len: 3 })
        );
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn the_last_requested_scene_wins() {
        let source = Rc::new(GatedSource::default());
        let c = Rc::new(controller(source.clone(), ViewConfig::default()));
        let outcomes: Rc<RefCell<Vec<(usize, RenderOutcome)>>> = Rc::default();

        let mut pool = LocalPool::new();
        for index in [0, 1] {
            let c = Rc::clone(&c);
            let outcomes = Rc::clone(&outcomes);
            pool.spawner()
                .spawn_local(async move {
                    let outcome = c.render(index).await;
                    outcomes.borrow_mut().push((index, outcome));
                })
                .unwrap();
            pool.run_until_stalled();
        }
        assert_eq!(c.current_index(), 1);

        source.release("leaders.csv", Ok(leaders_rows()));
        pool.run_until_stalled();
        source.release("totals.csv", Err(FetchError::read("totals.csv", "late")));
        pool.run_until_stalled();

        assert_eq!(
            *outcomes.borrow(),
            [(1, RenderOutcome::Rendered), (0, RenderOutcome::Superseded)]
        );
        let surface = c.surface();
        assert_eq!(surface.description(), "Search");
        assert!(surface.is_visible("search"));
        assert_eq!(surface.texts().len(), 3);
    }

    #[test]
    fn a_stale_success_draws_nothing() {
        let source = Rc::new(GatedSource::default());
        let c = Rc::new(controller(source.clone(), ViewConfig::default()));

        let mut pool = LocalPool::new();
        let first = pool
            .spawner()
            .spawn_local_with_handle({
                let c = Rc::clone(&c);
                async move { c.render(0).await }
            })
            .unwrap();
        pool.run_until_stalled();
        let second = pool
            .spawner()
            .spawn_local_with_handle({
                let c = Rc::clone(&c);
                async move { c.render(1).await }
            })
            .unwrap();
        pool.run_until_stalled();

        source.release("totals.csv", Ok(totals_rows()));
        assert_eq!(pool.run_until(first), RenderOutcome::Superseded);
        assert!(c.surface().marks().is_empty());

        source.release("leaders.csv", Ok(leaders_rows()));
        assert_eq!(pool.run_until(second), RenderOutcome::Rendered);
        assert_eq!(c.surface().description(), "Search");
    }
}
