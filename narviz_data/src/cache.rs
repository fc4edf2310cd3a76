// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-flight dataset cache.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use futures::FutureExt as _;
use futures::future::{LocalBoxFuture, Shared};
use hashbrown::HashMap;
use narviz_core::Dataset;

use crate::error::SourceError;
use crate::schema::DatasetSpec;
use crate::source::DataSource;

type LoadResult = Result<Rc<Dataset>, SourceError>;
type SharedLoad = Shared<LocalBoxFuture<'static, LoadResult>>;

enum Entry {
    Ready(Rc<Dataset>),
    Pending { generation: u64, load: SharedLoad },
}

type Entries = RefCell<HashMap<String, Entry>>;

struct Inner {
    source: Rc<dyn DataSource>,
    specs: HashMap<String, DatasetSpec>,
    entries: Rc<Entries>,
    next_generation: Cell<u64>,
}

/// Loads named datasets through a [`DataSource`] and keeps them for the life of the cache.
///
/// - Concurrent loads of one name share a single fetch and resolve to the same `Rc<Dataset>`.
/// - A successful load is cached; later loads return it without touching the source.
/// - A failed load is reported to every waiter and forgotten, so the next load retries.
///
/// The cache is single-threaded and cheap to clone; clones share state.
#[derive(Clone)]
pub struct DatasetCache {
    inner: Rc<Inner>,
}

impl fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.inner.entries.borrow();
        let ready = entries
            .values()
            .filter(|e| matches!(e, Entry::Ready(_)))
            .count();
        f.debug_struct("DatasetCache")
            .field("datasets", &self.inner.specs.len())
            .field("ready", &ready)
            .field("pending", &(entries.len() - ready))
            .finish_non_exhaustive()
    }
}

impl DatasetCache {
    /// Creates a cache serving the datasets in `catalog` from `source`.
    pub fn new(
        source: Rc<dyn DataSource>,
        catalog: impl IntoIterator<Item = DatasetSpec>,
    ) -> Self {
        let specs = catalog
            .into_iter()
            .map(|spec| (spec.name.clone(), spec))
            .collect();
        Self {
            inner: Rc::new(Inner {
                source,
                specs,
                entries: Rc::new(RefCell::new(HashMap::new())),
                next_generation: Cell::new(0),
            }),
        }
    }

    /// The [`DatasetSpec`] registered under `name`.
    pub fn spec(&self, name: &str) -> Option<&DatasetSpec> {
        self.inner.specs.get(name)
    }

    /// Whether `name` has loaded successfully.
    pub fn is_cached(&self, name: &str) -> bool {
        matches!(self.inner.entries.borrow().get(name), Some(Entry::Ready(_)))
    }

    /// Whether a load of `name` is in flight.
    pub fn is_loading(&self, name: &str) -> bool {
        matches!(
            self.inner.entries.borrow().get(name),
            Some(Entry::Pending { .. })
        )
    }

    /// Loads a dataset, joining an in-flight load of the same name if there is one.
    pub async fn load(&self, name: &str) -> Result<Rc<Dataset>, SourceError> {
        let load = {
            let mut entries = self.inner.entries.borrow_mut();
            match entries.get(name) {
                Some(Entry::Ready(dataset)) => {
                    tracing::trace!(dataset = name, "cache hit");
                    return Ok(Rc::clone(dataset));
                }
                Some(Entry::Pending { load, .. }) => {
                    tracing::debug!(dataset = name, "joining in-flight load");
                    load.clone()
                }
                None => {
                    let spec = self
                        .inner
                        .specs
                        .get(name)
                        .cloned()
                        .ok_or_else(|| SourceError::UnknownDataset(name.to_string()))?;
                    let generation = self.inner.next_generation.get();
                    self.inner.next_generation.set(generation + 1);
                    tracing::debug!(dataset = name, path = %spec.path, "loading dataset");
                    let load = fetch(
                        Rc::clone(&self.inner.source),
                        spec,
                        Rc::downgrade(&self.inner.entries),
                        generation,
                    )
                    .boxed_local()
                    .shared();
                    entries.insert(
                        name.to_string(),
                        Entry::Pending {
                            generation,
                            load: load.clone(),
                        },
                    );
                    load
                }
            }
        };
        load.await
    }
}

async fn fetch(
    source: Rc<dyn DataSource>,
    spec: DatasetSpec,
    entries: Weak<Entries>,
    generation: u64,
) -> LoadResult {
    let result = match source.fetch_table(&spec.path).await {
        Ok(rows) => spec.coerce(&rows).map(Rc::new),
        Err(err) => Err(SourceError::Fetch {
            dataset: spec.name.clone(),
            source: err,
        }),
    };

    if let Some(entries) = entries.upgrade() {
        let mut entries = entries.borrow_mut();
        let current = matches!(
            entries.get(&spec.name),
            Some(Entry::Pending { generation: g, .. }) if *g == generation
        );
        if current {
            match &result {
                Ok(dataset) => {
                    tracing::debug!(dataset = %spec.name, records = dataset.len(), "dataset ready");
                    entries.insert(spec.name.clone(), Entry::Ready(Rc::clone(dataset)));
                }
                Err(err) => {
                    tracing::warn!(dataset = %spec.name, error = %err, "dataset load failed");
                    entries.remove(&spec.name);
                }
            }
        }
    }
    result
}
