//! Integration tests for covid-graphs crate.
//!
//! Exercise the path from a CSV file on disk to PNG files in a directory.

use covid_common::test_utils::table_fixtures::{sample_rows, write_csv, FixtureRow};
use covid_common::test_utils::{create_temp_dir, init_test_logging};
use covid_common::{CovidError, Region};
use covid_graphs::{
    AnimationDriver, ChartRenderer, ChartSpec, CsvTableSource, DirectorySink, GraphRenderer,
    ImageSink, PairwiseRenderer, ReferenceCurve, RenderContext, SeriesAligner, TableSource,
};
use plotters::prelude::*;

fn source() -> CsvTableSource {
    CsvTableSource::new("Country/Region", vec!["Province/State".to_string()])
}

fn render_context(width: u32, height: u32) -> RenderContext {
    let mut ctx = RenderContext::new(width, height, chrono::Utc::now());
    ctx.attribution = "Fixture".to_string();
    ctx
}

fn require_fonts() {
    let mut buffer = vec![0u8; 32 * 16 * 3];
    let root = BitMapBackend::with_buffer(&mut buffer, (32, 16)).into_drawing_area();
    if let Err(e) = root.draw(&Text::new("0", (1, 1), ("sans-serif", 12).into_font())) {
        panic!("rendering tests need a system font for 'sans-serif': {e}");
    }
}

#[test]
fn test_csv_to_aligned_series() {
    init_test_logging();
    let dir = create_temp_dir();
    let path = write_csv(dir.path(), "confirmed.csv", &sample_rows());

    let table = source().read(&path).unwrap();
    let aligned = SeriesAligner::new(3, 10)
        .unwrap()
        .with_excluded_regions(["Cruise Ship"])
        .sorted_by_latest(true)
        .align(&table, 100.0)
        .unwrap();

    let regions: Vec<&str> = aligned.regions().map(Region::as_str).collect();
    assert_eq!(regions, vec!["China", "Italy"]);
    assert_eq!(aligned.get("China").map(<[f64]>::len), Some(10));
    assert_eq!(aligned.get("China").and_then(|v| v.first()), Some(&458.0));
    assert_eq!(aligned.get("Italy").and_then(|v| v.first()), Some(&150.0));
    assert!(!aligned.contains("Iceland"));
}

#[test]
fn test_renamed_ship_is_reported() {
    let dir = create_temp_dir();
    let rows = vec![
        FixtureRow::country("Italy", &[150, 229, 322]),
        FixtureRow::country("Diamond Princess", &[61, 64, 135]),
    ];
    let path = write_csv(dir.path(), "confirmed.csv", &rows);

    let table = source().read(&path).unwrap();
    let err = SeriesAligner::new(1, 10)
        .unwrap()
        .with_excluded_regions(["Cruise Ship"])
        .align(&table, 100.0)
        .unwrap_err();
    assert!(matches!(err, CovidError::MissingRegion { .. }));
}

#[test]
fn test_render_and_write_charts() {
    require_fonts();
    let dir = create_temp_dir();
    let path = write_csv(dir.path(), "confirmed.csv", &sample_rows());
    let table = source().read(&path).unwrap();
    let aligner = SeriesAligner::new(3, 10).unwrap().with_excluded_regions(["Cruise Ship"]);
    let cases = aligner.align(&table, 100.0).unwrap();
    let deaths = aligner.align(&table, 3.0).unwrap();

    let ctx = render_context(480, 320);
    let renderer = ChartRenderer::new(
        ChartSpec::new(100.0, "Confirmed Cases", "confirmed"),
        ReferenceCurve::new(1.333_333, 20, "33% daily growth"),
    );
    let mut sink = DirectorySink::new(dir.path().join("out"));

    let chart = sink.write(&renderer.render(&ctx, &cases).unwrap()).unwrap();
    let pair = PairwiseRenderer::new("confirmed_vs_deaths", 0.03)
        .render_pair(&ctx, &cases, &deaths)
        .unwrap();
    let pair = sink.write(&pair).unwrap();

    assert!(chart.ends_with("confirmed.png"));
    assert!(pair.ends_with("confirmed_vs_deaths.png"));
    for written in [chart, pair] {
        let image = image::open(&written).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (480, 320));
    }
}

#[test]
fn test_animation_frames_written() {
    require_fonts();
    let dir = create_temp_dir();
    let path = write_csv(dir.path(), "confirmed.csv", &sample_rows());
    let table = source().read(&path).unwrap();
    let series = SeriesAligner::new(3, 4)
        .unwrap()
        .with_excluded_regions(["Cruise Ship"])
        .align(&table, 100.0)
        .unwrap();

    let ctx = render_context(200, 150);
    let renderer = ChartRenderer::new(
        ChartSpec::new(100.0, "Confirmed Cases", "confirmed"),
        ReferenceCurve::new(1.333_333, 4, "33% daily growth"),
    );
    let mut sink = DirectorySink::new(dir.path());
    let written: Vec<_> = AnimationDriver::new(&renderer)
        .frames(&ctx, &series)
        .map(|frame| sink.write(&frame.unwrap()).unwrap())
        .collect();

    assert_eq!(written.len(), 3);
    assert!(written[2].ends_with("confirmed_frame_0003.png"));
}
