use std::path::{Path, PathBuf};

use benchfig::{
    BenchfigError, EmptyReason, ReportAssets, ReportConfig, RenderSettings,
    generate_report_assets,
};

fn case_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("pipeline_tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(dir: &Path, json: &str, system_fonts: bool) -> ReportConfig {
    let input = dir.join("benchmark_results.json");
    std::fs::write(&input, json).unwrap();
    ReportConfig {
        input,
        out_dir: dir.join("figures"),
        render: RenderSettings {
            load_system_fonts: system_fonts,
            ..RenderSettings::default()
        },
    }
}

fn samples(n: usize, base: f64) -> Vec<f64> {
    (0..n)
        .map(|i| base + ((i * 7919) % 13) as f64 * 0.5)
        .collect()
}

fn dataset_json(cvcp: &[f64], http: &[f64]) -> String {
    serde_json::json!({ "cvcp": cvcp, "http": http }).to_string()
}

fn assert_png(path: &Path, width: u32, height: u32) {
    let bytes = std::fs::read(path).unwrap();
    assert!(!bytes.is_empty(), "{} is empty", path.display());
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (width, height));
}

#[test]
fn writes_three_figures() {
    let dir = case_dir("three_figures");
    let cfg = config(
        &dir,
        &dataset_json(&samples(100, 2.0), &samples(100, 8.0)),
        true,
    );

    let assets = generate_report_assets(&cfg).unwrap();
    assert_eq!(assets, ReportAssets::under(&cfg.out_dir));
    assert_png(&assets.comparison, 1000, 600);
    assert_png(&assets.distribution, 800, 600);
    assert_png(&assets.diagram, 1200, 800);
}

#[test]
fn tiny_spread_at_large_offset_renders() {
    for (case, json) in [
        (
            "large_offset_mixed",
            r#"{"cvcp": [1e16, 1.0000000000000006e16], "http": [1]}"#,
        ),
        (
            "large_offset_both",
            r#"{"cvcp": [1e16, 1.0000000000000006e16], "http": [1e16]}"#,
        ),
    ] {
        let dir = case_dir(case);
        let cfg = config(&dir, json, false);
        let assets = generate_report_assets(&cfg).unwrap();
        assert_png(&assets.comparison, 1000, 600);
        assert_png(&assets.distribution, 800, 600);
    }
}

#[test]
fn unequal_lengths_render() {
    let dir = case_dir("unequal_lengths");
    let cfg = config(
        &dir,
        &dataset_json(&samples(100, 2.0), &samples(80, 8.0)),
        false,
    );
    let assets = generate_report_assets(&cfg).unwrap();
    for p in assets.paths() {
        assert!(std::fs::metadata(p).unwrap().len() > 0);
    }
}

#[test]
fn single_sample_series_render() {
    let dir = case_dir("single_sample");
    let cfg = config(&dir, r#"{"cvcp": [3], "http": [4.5]}"#, false);
    let assets = generate_report_assets(&cfg).unwrap();
    for p in assets.paths() {
        assert!(p.exists());
    }
}

#[test]
fn rerun_is_byte_identical() {
    let json = dataset_json(&samples(60, 1.0), &samples(45, 5.0));
    let a = generate_report_assets(&config(&case_dir("determinism_a"), &json, false)).unwrap();
    let b = generate_report_assets(&config(&case_dir("determinism_b"), &json, false)).unwrap();
    for (pa, pb) in a.paths().into_iter().zip(b.paths()) {
        let (ba, bb) = (std::fs::read(pa).unwrap(), std::fs::read(pb).unwrap());
        assert_eq!(ba.len(), bb.len(), "{}", pa.display());
        assert!(ba == bb, "{} differs", pa.display());
    }
}

#[test]
fn empty_series_writes_nothing() {
    for (name, json, series, reason) in [
        ("empty_http", r#"{"cvcp": [1, 2], "http": []}"#, "http", EmptyReason::Empty),
        ("absent_cvcp", r#"{"http": [1, 2]}"#, "cvcp", EmptyReason::Absent),
    ] {
        let dir = case_dir(name);
        let cfg = config(&dir, json, false);
        let err = generate_report_assets(&cfg).unwrap_err();
        match err {
            BenchfigError::EmptyDataset { series: s, reason: r } => {
                assert_eq!((s, r), (series, reason));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!cfg.out_dir.exists(), "{name}: output dir was created");
    }
}

#[test]
fn missing_and_malformed_input_are_distinguished() {
    let dir = case_dir("bad_input");
    let cfg = ReportConfig {
        input: dir.join("absent.json"),
        out_dir: dir.join("figures"),
        ..ReportConfig::default()
    };
    assert!(matches!(
        generate_report_assets(&cfg).unwrap_err(),
        BenchfigError::MissingInputFile { .. }
    ));

    let cfg = config(&dir, "{ not json", false);
    assert!(matches!(
        generate_report_assets(&cfg).unwrap_err(),
        BenchfigError::MalformedInput { .. }
    ));
    assert!(!cfg.out_dir.exists());
}
