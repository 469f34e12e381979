//! Test fixture loading utilities

use std::path::PathBuf;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Write a config file into `dir` pointing at the bundled fixtures
#[allow(dead_code)]
pub fn write_fixture_config(dir: &std::path::Path) -> PathBuf {
    let config = format!(
        r#"
out_dir = "{out}"

[boxplot]
source = "{boxplot}"

[barplot]
source = "{barplot}"

[lineplot]
source = "{lineplot}"
"#,
        out = dir.join("charts").display(),
        boxplot = fixture_path("socialMedia.csv").display(),
        barplot = fixture_path("socialMediaAvg.csv").display(),
        lineplot = fixture_path("socialMediaTime.csv").display(),
    );
    let path = dir.join("socialplot.toml");
    std::fs::write(&path, config).unwrap();
    path
}
