use chrono::NaiveDate;
use digitize_rs::core::{
    AxisScaleMode, Bounds, ColorSpec, DateAnchor, Raster, Rgb, SmoothingMethod, ValueAnchor,
};
use digitize_rs::{CalibrationConfig, DigitizerEngine, DigitizerError, ExtractionConfig};

const CURVE: Rgb = Rgb {
    r: 200,
    g: 40,
    b: 40,
};
const BACKGROUND: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// 10x10 image with the curve color on the diagonal, optionally skipping
/// some columns entirely.
fn diagonal_raster(skip_cols: &[usize]) -> Raster {
    Raster::from_fn(10, 10, |col, row| {
        if col == row && !skip_cols.contains(&col) {
            CURVE
        } else {
            BACKGROUND
        }
    })
    .expect("raster")
}

fn diagonal_calibration() -> CalibrationConfig {
    CalibrationConfig::new(
        [ValueAnchor::new(0.0, 10.0), ValueAnchor::new(9.0, 1.0)],
        [
            DateAnchor::new(0.0, date(2020, 1, 1)),
            DateAnchor::new(9.0, date(2020, 1, 10)),
        ],
    )
}

#[test]
fn diagonal_image_yields_linear_series() {
    let engine = DigitizerEngine::new(ExtractionConfig::new(ColorSpec::new(CURVE)))
        .expect("engine")
        .with_calibration(diagonal_calibration())
        .expect("calibration");

    let run = engine.run(&diagonal_raster(&[])).expect("run");
    let series = run.series.expect("calibrated output");

    assert_eq!(series.len(), 10);
    for (col, sample) in series.samples().iter().enumerate() {
        assert!((sample.value - (10.0 - col as f64)).abs() <= 1e-9);
        assert_eq!(sample.date, date(2020, 1, 1 + col as u32));
    }
}

#[test]
fn hole_column_is_interpolated_from_its_neighbors() {
    let engine = DigitizerEngine::new(ExtractionConfig::new(ColorSpec::new(CURVE)))
        .expect("engine")
        .with_calibration(diagonal_calibration())
        .expect("calibration");

    let run = engine.run(&diagonal_raster(&[5])).expect("run");

    // The pixel row at column 5 comes from its resolved neighbors (4 and 6).
    assert!((run.path.rows()[5] - 5.0).abs() <= 1e-9);

    let series = run.series.expect("calibrated output");
    assert_eq!(series.len(), 10);
    assert!((series.samples()[5].value - 5.0).abs() <= 1e-9);
}

#[test]
fn zero_matches_fail_with_empty_match() {
    let spec = ColorSpec::new(Rgb::new(0, 255, 0)).with_tolerance(0);
    let engine = DigitizerEngine::new(ExtractionConfig::new(spec)).expect("engine");

    let result = engine.run(&diagonal_raster(&[]));
    assert!(matches!(result, Err(DigitizerError::EmptyMatch)));
}

#[test]
fn bounds_restrict_the_scan_band() {
    let bounds = Bounds::new(2, 7).expect("bounds");
    let engine = DigitizerEngine::new(
        ExtractionConfig::new(ColorSpec::new(CURVE)).with_bounds(bounds),
    )
    .expect("engine");

    let path = engine.extract_path(&diagonal_raster(&[])).expect("path");

    // Diagonal pixels outside rows 2..=7 are invisible; those columns hold
    // the nearest resolved row instead.
    assert_eq!(path.rows()[0], 2.0);
    assert_eq!(path.rows()[1], 2.0);
    assert_eq!(path.rows()[4], 4.0);
    assert_eq!(path.rows()[9], 7.0);
}

#[test]
fn smoothing_changes_the_path_but_not_its_length() {
    let plain = DigitizerEngine::new(ExtractionConfig::new(ColorSpec::new(CURVE)))
        .expect("engine");
    let smoothed = DigitizerEngine::new(
        ExtractionConfig::new(ColorSpec::new(CURVE))
            .with_smoothing(SmoothingMethod::MovingAverage { window: 3 }),
    )
    .expect("engine");

    // A spiky raster: diagonal with one column jumping off the line.
    let raster = Raster::from_fn(10, 10, |col, row| {
        let target_row = if col == 4 { 9 } else { col };
        if row == target_row { CURVE } else { BACKGROUND }
    })
    .expect("raster");

    let plain_path = plain.extract_path(&raster).expect("path");
    let smoothed_path = smoothed.extract_path(&raster).expect("path");

    assert_eq!(plain_path.len(), smoothed_path.len());
    assert_eq!(plain_path.rows()[4], 9.0);
    assert!(smoothed_path.rows()[4] < 9.0);
}

#[test]
fn hole_filling_seals_enclosed_regions_before_the_median() {
    // Hollow square marker plus a stray matched pixel below it. Without hole
    // filling, column 4 matches only the two rim rows and the stray pixel,
    // dragging the median onto the stray side; filling the interior restores
    // a median inside the marker.
    let raster = Raster::from_fn(10, 12, |col, row| {
        let on_outline = (1..=7).contains(&col)
            && (1..=7).contains(&row)
            && (col == 1 || col == 7 || row == 1 || row == 7);
        if on_outline || (col == 4 && row == 9) {
            CURVE
        } else {
            BACKGROUND
        }
    })
    .expect("raster");

    let plain = DigitizerEngine::new(ExtractionConfig::new(ColorSpec::new(CURVE)))
        .expect("engine");
    let filling = DigitizerEngine::new(
        ExtractionConfig::new(ColorSpec::new(CURVE)).with_hole_filling(),
    )
    .expect("engine");

    // Unfilled match rows at column 4: {1, 7, 9}.
    assert_eq!(plain.extract_path(&raster).expect("path").rows()[4], 7.0);
    // Filled match rows at column 4: {1..=7, 9}.
    assert_eq!(filling.extract_path(&raster).expect("path").rows()[4], 4.5);
}

#[test]
fn disabled_smoothing_passes_the_path_through_unchanged() {
    let engine = DigitizerEngine::new(ExtractionConfig::new(ColorSpec::new(CURVE)))
        .expect("engine");

    let raster = diagonal_raster(&[]);
    let first = engine.extract_path(&raster).expect("path");
    let second = engine.extract_path(&raster).expect("path");

    assert_eq!(first, second);
    assert_eq!(first.rows(), (0..10).map(f64::from).collect::<Vec<_>>());
}

#[test]
fn log_calibration_produces_geometric_values() {
    let calibration = CalibrationConfig::new(
        [ValueAnchor::new(0.0, 1000.0), ValueAnchor::new(9.0, 1.0)],
        [
            DateAnchor::new(0.0, date(2020, 1, 1)),
            DateAnchor::new(9.0, date(2020, 1, 10)),
        ],
    )
    .with_y_mode(AxisScaleMode::Log);

    let engine = DigitizerEngine::new(ExtractionConfig::new(ColorSpec::new(CURVE)))
        .expect("engine")
        .with_calibration(calibration)
        .expect("calibration");

    let series = engine
        .run(&diagonal_raster(&[]))
        .expect("run")
        .series
        .expect("calibrated output");

    // Log-space interpolation: each step down the diagonal divides the value
    // by the same ratio. Anchors are exact.
    assert!((series.samples()[0].value - 1000.0).abs() <= 1e-6);
    assert!((series.samples()[9].value - 1.0).abs() <= 1e-6);
    let ratio = series.samples()[1].value / series.samples()[0].value;
    for pair in series.samples().windows(2).skip(1) {
        assert!((pair[1].value / pair[0].value - ratio).abs() <= 1e-3);
    }
}

#[test]
fn reruns_with_adjusted_tolerance_are_independent() {
    // Curve drawn slightly off the picked color.
    let raster = Raster::from_fn(10, 10, |col, row| {
        if col == row {
            Rgb::new(190, 50, 50)
        } else {
            BACKGROUND
        }
    })
    .expect("raster");

    let mut engine = DigitizerEngine::new(ExtractionConfig::new(
        ColorSpec::new(CURVE).with_tolerance(5),
    ))
    .expect("engine");

    assert!(matches!(
        engine.run(&raster),
        Err(DigitizerError::EmptyMatch)
    ));

    engine
        .set_extraction(ExtractionConfig::new(ColorSpec::new(CURVE).with_tolerance(15)))
        .expect("config update");
    let run = engine.run(&raster).expect("run after widening tolerance");
    assert_eq!(run.path.len(), 10);
}

#[test]
fn run_snapshot_serializes_to_json() {
    let engine = DigitizerEngine::new(ExtractionConfig::new(ColorSpec::new(CURVE)))
        .expect("engine")
        .with_calibration(diagonal_calibration())
        .expect("calibration");

    let run = engine.run(&diagonal_raster(&[])).expect("run");
    let snapshot = run.snapshot_json_pretty().expect("snapshot");

    assert!(snapshot.contains("\"path\""));
    assert!(snapshot.contains("2020-01-01"));
}
