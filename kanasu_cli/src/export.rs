//! CSV export of career recommendations.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use kanasu_core::types::CareerRecommendation;

#[derive(Serialize)]
struct RecommendationRow<'a> {
    rank: usize,
    title_code: &'a str,
    title: &'a str,
    cluster: &'a str,
    probability: f64,
    percent: u32,
    generated_at: String,
}

/// Writes one header row plus one row per recommendation, in rank order.
pub fn write_recommendations<W: Write>(
    writer: W,
    recommendations: &[CareerRecommendation],
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let stamp = generated_at.to_rfc3339();

    for (i, rec) in recommendations.iter().enumerate() {
        csv.serialize(RecommendationRow {
            rank: i + 1,
            title_code: &rec.title_code,
            title: &rec.title_label,
            cluster: &rec.cluster_label,
            probability: rec.probability,
            percent: rec.percent(),
            generated_at: stamp.clone(),
        })?;
    }

    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// `kanasu_recommendations_<timestamp>.csv` under `dir`.
pub fn export_file_name(generated_at: DateTime<Utc>) -> String {
    format!(
        "kanasu_recommendations_{}.csv",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

pub fn export_recommendations(
    dir: &Path,
    recommendations: &[CareerRecommendation],
) -> Result<PathBuf> {
    let now = Utc::now();
    let path = dir.join(export_file_name(now));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_recommendations(file, recommendations, now)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kanasu_core::recommender::MockRecommender;

    #[test]
    fn rows_follow_rank_order() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let mut out = Vec::new();
        write_recommendations(&mut out, &MockRecommender::recommendations(), at).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "rank,title_code,title,cluster,probability,percent,generated_at"
        );
        assert!(lines[1].starts_with("1,software_engineer,Software Engineer,"));
        assert!(lines[1].contains(",0.92,92,"));
        assert!(lines[3].starts_with("3,ux_designer,"));
    }

    #[test]
    fn file_name_carries_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 5).unwrap();
        assert_eq!(
            export_file_name(at),
            "kanasu_recommendations_20240601_093005.csv"
        );
    }

    #[test]
    fn export_writes_into_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = export_recommendations(dir.path(), &MockRecommender::recommendations()).unwrap();
        assert!(path.starts_with(dir.path()));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("Data Scientist"));
    }
}
