//! End-to-end pipeline tests: layout, scales, binning, and reconciliation
//! composed the way a chart refresh would drive them.

#![allow(clippy::unwrap_used)]

use chartflow::prelude::*;
use chrono::{TimeZone, Utc};

/// A small weather-like dataset in the shape the pipeline consumes.
fn weather_dataset() -> Dataset {
    let humidity = [0.31, 0.58, 0.47, 0.92, 0.66, 0.58, 0.73, 0.27, 0.84, 0.61];
    humidity
        .iter()
        .enumerate()
        .map(|(day, &h)| {
            Record::new()
                .with("date", Utc.with_ymd_and_hms(2021, 1, 1 + day as u32, 0, 0, 0).unwrap())
                .with("humidity", h)
                .with("id", format!("day-{day}"))
        })
        .collect()
}

#[test]
fn histogram_pipeline_end_to_end() {
    let dataset = weather_dataset();

    // Layout
    let dims = Dimensions::new(600.0, 540.0, Margin::new(30.0, 10.0, 50.0, 50.0));
    assert_eq!(dims.bounded_width(), 540.0);

    // X scale over the metric, niced for readable axis bounds
    let x_scale = LinearScale::from_data(
        &dataset,
        numeric_field("humidity"),
        (0.0, dims.bounded_width()),
    )
    .nice(10);
    let (d0, d1) = x_scale.domain();
    let (lo, hi) = extent(&dataset, numeric_field("humidity")).unwrap();
    assert!(d0 <= lo && hi <= d1);
    assert_eq!(x_scale.scale(d0), 0.0);
    assert_eq!(x_scale.scale(d1), dims.bounded_width());

    // Bin over the niced domain
    let bins = bin(&dataset, numeric_field("humidity"), x_scale.domain(), 12);
    assert_eq!(bins.len(), 12);
    let total: usize = bins.iter().map(Bin::count).sum();
    assert_eq!(total, dataset.len());

    // Y scale from bin counts, zero-anchored, range inverted for pixel space
    let max_count = bins.iter().map(Bin::count).max().unwrap() as f64;
    let y_scale = LinearScale::new((0.0, max_count), (dims.bounded_height(), 0.0));
    assert_eq!(y_scale.scale(0.0), dims.bounded_height());
    assert_eq!(y_scale.scale(max_count), 0.0);

    // Bar geometry stays inside the bounded area
    for b in &bins {
        let left = x_scale.scale(b.x0);
        let right = x_scale.scale(b.x1);
        let width = (right - left).max(0.0);
        assert!(left >= -1e-9);
        assert!(left + width <= dims.bounded_width() + 1e-9);
    }
}

#[test]
fn radial_pipeline_uses_time_and_sqrt_scales() {
    let dataset = weather_dataset();
    let dims = Dimensions::new(600.0, 600.0, Margin::uniform(120.0));

    // Dates map to angles around the full circle; no nice() here because
    // angular positions must stay exact.
    let angle_scale =
        TimeScale::from_data(&dataset, timestamp_field("date"), (0.0, std::f64::consts::TAU));
    let (first, last) = angle_scale.domain();
    assert_eq!(angle_scale.scale(first), 0.0);
    assert_eq!(angle_scale.scale(last), std::f64::consts::TAU);

    // Humidity maps to an area-proportional dot radius
    let dot_scale = SqrtScale::from_data(&dataset, numeric_field("humidity"), (1.0, 10.0));

    // Every dot lands within the offset ring
    for record in dataset.iter() {
        let angle = angle_scale.scale(record.timestamp("date").unwrap());
        let p = dims.radial_point(angle, 1.0);
        assert!(p.distance(Point::ORIGIN) <= dims.bounded_radius() + 1e-9);
        let r = dot_scale.scale(record.number("humidity").unwrap());
        assert!((1.0..=10.0).contains(&r));
    }
}

#[test]
fn refresh_cycle_reconciles_against_previous_keys() {
    let dataset = weather_dataset();
    let key = KeyAccessor::field("id");

    // First refresh: nothing rendered yet, everything enters
    let first = reconcile(&[], &dataset, &key).unwrap();
    assert_eq!(first.entering.len(), dataset.len());
    assert!(first.updating.is_empty());
    assert!(first.exiting.is_empty());

    // The renderer would now draw and remember the keys it holds
    let rendered: Vec<String> = first.entering.iter().map(|k| k.key.clone()).collect();

    // Second refresh: a sliding window drops the two oldest days and
    // appends two new ones
    let refreshed: Dataset = dataset
        .iter()
        .skip(2)
        .cloned()
        .chain((10u32..12).map(|day| {
            Record::new()
                .with("date", Utc.with_ymd_and_hms(2021, 1, 1 + day, 0, 0, 0).unwrap())
                .with("humidity", 0.5)
                .with("id", format!("day-{day}"))
        }))
        .collect();

    let delta = reconcile(&rendered, &refreshed, &key).unwrap();
    let entering: Vec<&str> = delta.entering.iter().map(|k| k.key.as_str()).collect();
    assert_eq!(entering, ["day-10", "day-11"]);
    assert_eq!(delta.updating.len(), 8);
    assert_eq!(delta.exiting, ["day-0", "day-1"]);

    // Entering plus updating covers the refreshed dataset exactly
    assert_eq!(delta.entering.len() + delta.updating.len(), refreshed.len());
}

#[test]
fn categorical_and_color_channels() {
    let dataset = Dataset::from_records(vec![
        Record::new().with("type", "rain").with("cloud", 0.9),
        Record::new().with("type", "sleet").with("cloud", 0.4),
        Record::new().with("type", "rain").with("cloud", 0.2),
        Record::new().with("type", "snow").with("cloud", 0.7),
    ]);

    let palette = OrdinalScale::from_data(
        &dataset,
        text_field("type"),
        vec![Rgba::rgb(70, 130, 180), Rgba::rgb(150, 150, 150), Rgba::WHITE],
    )
    .unwrap();
    assert_eq!(palette.domain(), &["rain", "sleet", "snow"]);
    assert_eq!(palette.scale("snow"), Some(&Rgba::WHITE));
    assert_eq!(palette.scale("hail"), None);

    let cloud_domain = extent(&dataset, numeric_field("cloud")).unwrap();
    let cloud_color = ColorScale::blues(cloud_domain);
    assert_eq!(cloud_color.scale(0.2), Rgba::rgb(247, 251, 255));
    assert_eq!(cloud_color.scale(0.9), Rgba::rgb(8, 48, 107));
}

#[test]
fn empty_dataset_degrades_without_crashing() {
    let dataset = Dataset::new();
    let dims = Dimensions::new(400.0, 300.0, Margin::uniform(20.0));

    let scale =
        LinearScale::from_data(&dataset, numeric_field("v"), (0.0, dims.bounded_width()));
    assert_eq!(scale.domain(), (0.0, 1.0));

    // Collapsed-domain scale built from a degenerate extent clamps
    let degenerate = LinearScale::new((3.0, 3.0), (0.0, 100.0));
    assert_eq!(degenerate.scale(3.0), 0.0);

    let bins = bin(&dataset, numeric_field("v"), (3.0, 3.0), 5);
    assert!(bins.is_empty());

    let delta = reconcile(&[], &dataset, &KeyAccessor::field("id")).unwrap();
    assert!(delta.entering.is_empty() && delta.updating.is_empty() && delta.exiting.is_empty());
}
