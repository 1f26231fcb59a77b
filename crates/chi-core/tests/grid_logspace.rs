use chi_core::{ChiError, FrequencyGrid, GridSpec};

#[test]
fn default_grid_spans_ten_to_one_thousand() {
    let grid = FrequencyGrid::new(GridSpec::default()).expect("grid");
    let ratios = grid.ratios();
    assert_eq!(ratios.len(), 10);
    assert_eq!(ratios[0], 10f64.powf(1.0));
    assert_eq!(ratios[9], 10f64.powf(3.0));
    assert!((ratios[0] - 10.0).abs() < 1e-12);
    assert!((ratios[9] - 1000.0).abs() < 1e-9);
}

#[test]
fn ratios_are_strictly_increasing() {
    let grid = FrequencyGrid::new(GridSpec {
        log_min: -1.0,
        log_max: 4.0,
        samples: 57,
    })
    .expect("grid");
    assert_eq!(grid.len(), 57);
    assert!(grid.ratios().windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn ratios_are_evenly_spaced_in_log() {
    let grid = FrequencyGrid::new(GridSpec::default()).expect("grid");
    let logs: Vec<f64> = grid.ratios().iter().map(|r| r.log10()).collect();
    let step = 2.0 / 9.0;
    for pair in logs.windows(2) {
        assert!((pair[1] - pair[0] - step).abs() < 1e-12);
    }
}

#[test]
fn empty_grid_is_rejected() {
    let err = FrequencyGrid::new(GridSpec {
        samples: 0,
        ..GridSpec::default()
    })
    .unwrap_err();
    assert!(matches!(err, ChiError::Grid(_)));
    assert_eq!(err.info().code, "empty-grid");
}

#[test]
fn reversed_bounds_are_rejected() {
    let err = FrequencyGrid::new(GridSpec {
        log_min: 3.0,
        log_max: 1.0,
        samples: 4,
    })
    .unwrap_err();
    assert_eq!(err.info().code, "non-increasing");
}

#[test]
fn spec_defaults_apply_when_fields_missing() {
    let spec: GridSpec = serde_json::from_str(r#"{"samples": 25}"#).expect("parse");
    assert_eq!(spec.samples, 25);
    assert_eq!(spec.log_min, 1.0);
    assert_eq!(spec.log_max, 3.0);
}
