// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walks the home run story scene by scene and writes each one as an SVG file.

mod svg;

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context as _;
use clap::Parser;
use futures::executor::block_on;
use narviz_data::{CsvDirSource, DatasetCache};
use narviz_scenes::{RenderOutcome, SceneController, ViewConfig, story};
use tracing::Level;

use crate::svg::SvgSurface;

#[derive(Parser, Debug)]
#[command(name = "narviz_demo", version)]
struct Cli {
    /// Directory holding the story's CSV files.
    #[arg(long, default_value = "narviz_demo/data")]
    data_dir: PathBuf,

    /// Directory receiving one SVG per scene.
    #[arg(long, default_value = "narviz_demo/out")]
    out_dir: PathBuf,

    /// JSON view configuration; missing keys take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Text typed into the search box of the leader list.
    #[arg(long)]
    filter: Option<String>,

    /// Log loads and navigation.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ViewConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ViewConfig::default(),
    };
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let source = Rc::new(CsvDirSource::new(&cli.data_dir));
    let cache = DatasetCache::new(source, story::catalog());
    let controller =
        SceneController::new(story::registry()?, cache, config, SvgSurface::default());

    block_on(walk(&controller, &cli))
}

async fn walk(controller: &SceneController<SvgSurface>, cli: &Cli) -> anyhow::Result<()> {
    let mut failed = 0_usize;
    for step in 0..controller.registry().len() {
        let mut outcome = if step == 0 {
            controller.start().await
        } else {
            controller.next().await
        };
        let Some(scene) = controller.current_scene() else {
            anyhow::bail!("scene {} vanished", controller.current_index());
        };
        if let Some(text) = &cli.filter
            && let Some(filtered) = controller.on_filter_input(text).await
        {
            outcome = filtered;
        }
        match &outcome {
            RenderOutcome::Rendered => tracing::info!(scene = %scene.id, "rendered"),
            RenderOutcome::Failed(error) => {
                failed += 1;
                tracing::warn!(scene = %scene.id, %error, "wrote failure placeholder");
            }
            RenderOutcome::Superseded => tracing::warn!(scene = %scene.id, "render superseded"),
        }

        let view = scene
            .layout
            .unwrap_or_else(|| controller.config().layout())
            .view();
        let svg = controller.surface().to_svg_string(view);
        let path = cli
            .out_dir
            .join(format!("{:02}-{}.svg", controller.current_index(), scene.id));
        fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote scene");
    }
    if failed > 0 {
        tracing::warn!(failed, "some scenes could not load their data");
    }
    Ok(())
}
