// Copyright 2025 the Narviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The home run story: its datasets and its six scenes.

use narviz_charts::{
    Annotation, BarChartSpec, DualAxisChartSpec, Layout, LineChartSpec, ListViewSpec, Margin,
    ScatterChartSpec, StrokeStyle,
};
use narviz_data::{DatasetSpec, FieldKind};
use peniko::color::palette::css;

use crate::error::RegistryError;
use crate::registry::{ChartKind, SceneDescriptor, SceneRegistry};

/// Season totals: `year`, `HR`.
pub const TOTAL_HR: &str = "total_hr_per_season";
/// Top hitter per season: `year`, `player`, `HR`.
pub const TOP_HR_LEADERS: &str = "top_hr_leaders_wiki";
/// League pitch velocity: `year`, `avgVelocity`.
pub const PITCH_VELOCITY: &str = "pitch_velocity";

/// Home runs.
pub const HR: &str = "HR";
/// Player name.
pub const PLAYER: &str = "player";
/// Average pitch velocity in mph.
pub const AVG_VELOCITY: &str = "avgVelocity";

/// Container holding the search box.
pub const SEARCH_CONTAINER: &str = "search";

/// Where the story's datasets live (relative to a data directory) and how they coerce.
pub fn catalog() -> Vec<DatasetSpec> {
    vec![
        DatasetSpec::new(TOTAL_HR, "total_hr_per_season.csv", "year")
            .with_field("home_runs", HR, FieldKind::Int),
        DatasetSpec::new(TOP_HR_LEADERS, "top_hr_leaders_wiki.csv", "yearID")
            .with_field("player", PLAYER, FieldKind::Text)
            .with_field("HR", HR, FieldKind::Int),
        DatasetSpec::new(PITCH_VELOCITY, "pitch_velocity.csv", "year")
            .with_field("avgVelocity", AVG_VELOCITY, FieldKind::Float),
    ]
}

/// The six scenes, in story order.
pub fn scenes() -> Vec<SceneDescriptor> {
    vec![
        SceneDescriptor::new(
            "season-totals",
            "Total home runs per season in Major League Baseball since 1950.",
            ChartKind::Line(
                LineChartSpec::new(HR).with_annotation(
                    Annotation::new((1998.0, 5500.0), "1998 HR Boom")
                        .with_title("McGwire and Sosa both pass Maris's 61"),
                ),
            ),
        )
        .with_dataset(TOTAL_HR),
        SceneDescriptor::new(
            "boom-years",
            "Focusing on the home run boom: 1995 to 2005.",
            ChartKind::Line(
                LineChartSpec::new(HR)
                    .with_years(1995, 2005)
                    .with_stroke(StrokeStyle::solid(css::ORANGE, 3.0))
                    .with_annotation(
                        Annotation::new((1998.0, 5500.0), "Peak of HR Boom")
                            .with_title("League-wide home runs crest at the turn of the century"),
                    ),
            ),
        )
        .with_dataset(TOTAL_HR),
        SceneDescriptor::new(
            "top-hitters",
            "Top home run hitter per MLB season (Wikipedia data).",
            ChartKind::Bar(BarChartSpec::new(HR, PLAYER).with_value_suffix(" HRs")),
        )
        .with_dataset(TOP_HR_LEADERS)
        .with_layout(Layout::new(900.0, 500.0, Margin::new(40.0, 30.0, 100.0, 70.0))),
        SceneDescriptor::new(
            "totals-vs-velocity",
            "League home run totals beside average pitch velocity, each on its own scale.",
            ChartKind::DualAxis(
                DualAxisChartSpec::new(HR, AVG_VELOCITY)
                    .with_titles("Total Home Runs", "Avg Pitch Velocity (mph)"),
            ),
        )
        .with_dataset(TOTAL_HR)
        .with_dataset(PITCH_VELOCITY)
        .with_layout(Layout::new(700.0, 400.0, Margin::new(40.0, 70.0, 50.0, 70.0))),
        SceneDescriptor::new(
            "velocity-vs-hr",
            "Correlation between average pitch velocity and top home runs by year.",
            ChartKind::Scatter(
                ScatterChartSpec::new(AVG_VELOCITY, HR, PLAYER)
                    .with_suffixes(" mph", " HRs")
                    .with_titles("Average Pitch Velocity (mph)", "Home Runs (Top Player)"),
            ),
        )
        .with_dataset(PITCH_VELOCITY)
        .with_dataset(TOP_HR_LEADERS)
        .with_layout(Layout::default().with_margin(Margin::new(30.0, 30.0, 50.0, 60.0))),
        SceneDescriptor::new(
            "leader-search",
            "Search the home run leaders by year.",
            ChartKind::List(ListViewSpec::new(PLAYER, HR).with_value_suffix(" HRs")),
        )
        .with_dataset(TOP_HR_LEADERS)
        .with_container(SEARCH_CONTAINER),
    ]
}

/// The story as a registry.
pub fn registry() -> Result<SceneRegistry, RegistryError> {
    SceneRegistry::new(scenes())
}
