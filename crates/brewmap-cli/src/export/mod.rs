//! Output writers: enriched CSV, GeoJSON, and the static HTML site.

mod dataset;
mod geojson;
mod html;

use std::path::{Path, PathBuf};

use anyhow::Context;

use dataset::read_export_csv;
pub(crate) use dataset::write_export_csv;
pub(crate) use geojson::write_geojson;
pub(crate) use html::write_html_site;

pub(crate) const CSV_FILE_NAME: &str = "enriched_coffee_shops.csv";
pub(crate) const GEOJSON_FILE_NAME: &str = "enriched_coffee_shops.geojson";

/// `<output_path>/<input file stem>`, created if missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub(crate) fn prepare_output_dir(output_path: &Path, input_file: &Path) -> anyhow::Result<PathBuf> {
    let stem = input_file
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    let dir = output_path.join(stem.as_ref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    Ok(dir)
}

/// Re-reads a written CSV and checks row count and photo encoding.
///
/// # Errors
///
/// Returns an error if the file does not parse back, has the wrong number of
/// rows, or holds undecodable photo data.
pub(crate) fn verify_export_csv(path: &Path, expected_rows: usize) -> anyhow::Result<()> {
    let rows = read_export_csv(path)?;
    anyhow::ensure!(
        rows.len() == expected_rows,
        "{} holds {} rows, expected {expected_rows}",
        path.display(),
        rows.len()
    );
    for row in &rows {
        let photos = row
            .decode_photos()
            .with_context(|| format!("bad photo data for \"{}\"", row.original_title))?;
        anyhow::ensure!(
            photos.len() == row.photo_count,
            "photo count mismatch for \"{}\"",
            row.original_title
        );
    }
    Ok(())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
