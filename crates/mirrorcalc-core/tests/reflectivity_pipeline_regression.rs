use mirrorcalc_core::common::config::AnalysisConfig;
use mirrorcalc_core::modules::ReflectivityStage;
use mirrorcalc_core::optics::FresnelModel;
use std::fs;
use tempfile::TempDir;

fn small_config() -> AnalysisConfig {
    let mut config = AnalysisConfig::quati_m1_platinum();
    config.grid.samples = 256;
    config.plot.width_px = 640;
    config.plot.height_px = 480;
    config
}

#[test]
fn stage_emits_table_and_plot_for_the_default_study() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config = small_config();
    let outcome = ReflectivityStage::new(&FresnelModel)
        .run(&config, temp.path())
        .expect("reflectivity stage should succeed");

    let table_path = temp.path().join("Refl_Pt_E100_80000.txt");
    let plot_path = temp.path().join("Pt_Reflectivity.png");
    assert!(table_path.is_file(), "reflectivity table should exist");
    assert!(plot_path.is_file(), "reflectivity plot should exist");
    assert_eq!(outcome.curve.energies_ev.len(), 256);
}

#[test]
fn written_table_round_trips_the_computed_curve() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config = small_config();
    let outcome = ReflectivityStage::new(&FresnelModel)
        .run(&config, temp.path())
        .expect("reflectivity stage should succeed");

    let content = fs::read_to_string(temp.path().join("Refl_Pt_E100_80000.txt"))
        .expect("table should be readable");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Energy (eV)\tReflectivity"));

    for (index, line) in lines.enumerate() {
        let mut fields = line.split('\t');
        let energy: f64 = fields
            .next()
            .expect("row should carry energy")
            .parse()
            .expect("energy should parse");
        let reflectivity: f64 = fields
            .next()
            .expect("row should carry reflectivity")
            .parse()
            .expect("reflectivity should parse");

        assert!(
            (energy - outcome.curve.energies_ev[index]).abs() <= 5.0e-7,
            "row {index} energy should round-trip at 6 decimals"
        );
        assert!(
            (reflectivity - outcome.curve.reflectivity[index]).abs() <= 5.0e-7,
            "row {index} reflectivity should round-trip at 6 decimals"
        );
    }
}

#[test]
fn curve_respects_physical_bounds_and_the_complement_invariant() {
    let config = small_config();
    let curve = ReflectivityStage::new(&FresnelModel)
        .compute_curve(&config)
        .expect("curve should compute");

    for index in 0..curve.energies_ev.len() {
        let reflectivity = curve.reflectivity[index];
        assert!(
            (0.0..=1.0).contains(&reflectivity),
            "reflectivity[{index}] = {reflectivity} should lie in [0, 1]"
        );
        let sum = reflectivity + curve.transmitted[index];
        assert!(
            (sum - 1.0).abs() <= 1.0e-12,
            "reflectivity + transmitted should be 1 at index {index}"
        );
    }
}

#[test]
fn full_resolution_grid_matches_the_study_sampling() {
    let config = AnalysisConfig::quati_m1_platinum();
    let curve = ReflectivityStage::new(&FresnelModel)
        .compute_curve(&config)
        .expect("curve should compute");

    assert_eq!(curve.energies_ev.len(), 10_000);
    assert_eq!(curve.energies_ev[0], 100.0);
    assert_eq!(curve.energies_ev[9_999], 80_000.0);
    for window in curve.energies_ev.windows(2) {
        assert!(window[1] > window[0], "grid spacing must stay positive");
    }
}

#[test]
fn grazing_mirror_cuts_off_toward_high_energy() {
    let config = AnalysisConfig::quati_m1_platinum();
    let curve = ReflectivityStage::new(&FresnelModel)
        .compute_curve(&config)
        .expect("curve should compute");

    // average reflectivity over the first and last tenth of the grid
    let tenth = curve.energies_ev.len() / 10;
    let low: f64 = curve.reflectivity[..tenth].iter().sum::<f64>() / tenth as f64;
    let high: f64 =
        curve.reflectivity[curve.energies_ev.len() - tenth..].iter().sum::<f64>() / tenth as f64;
    assert!(
        low > high + 0.3,
        "a 2.25 mrad Pt mirror should reflect soft X-rays far better than 80 keV \
         (low band {low}, high band {high})"
    );
}

#[test]
fn repeated_runs_produce_identical_table_bytes() {
    let temp = TempDir::new().expect("tempdir should be created");
    let first_dir = temp.path().join("first");
    let second_dir = temp.path().join("second");
    fs::create_dir_all(&first_dir).expect("first output dir should exist");
    fs::create_dir_all(&second_dir).expect("second output dir should exist");

    let config = small_config();
    let stage = ReflectivityStage::new(&FresnelModel);
    stage
        .run(&config, &first_dir)
        .expect("first run should succeed");
    stage
        .run(&config, &second_dir)
        .expect("second run should succeed");

    let first = fs::read(first_dir.join("Refl_Pt_E100_80000.txt")).expect("first table");
    let second = fs::read(second_dir.join("Refl_Pt_E100_80000.txt")).expect("second table");
    assert_eq!(first, second, "table artifact should be deterministic");
}
