//! Combined-Table Rendering
//!
//! Turns the merged feature records into the final presentation formats.
//! Undefined metrics become `NaN` text here (or `null` in JSON) and
//! nowhere else.

use feature_engine::FeatureRecord;

const COLUMNS: [&str; 9] = [
    "File Name",
    "Standard Deviation",
    "Crest Factor",
    "Impact Factor",
    "Shape Factor",
    "Max Peak Width",
    "Peak Prominence Count",
    "Skewness",
    "Kurtosis",
];

fn opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => "NaN".to_string(),
    }
}

fn opt_raw(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}

/// Format records as an aligned text table
pub fn text(records: &[FeatureRecord]) -> String {
    let name_width = records
        .iter()
        .map(|r| r.file.len())
        .chain(std::iter::once(COLUMNS[0].len()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    output.push_str(&format!("{:<name_width$}", COLUMNS[0]));
    for column in &COLUMNS[1..] {
        output.push_str(&format!("  {column:>21}"));
    }
    output.push('\n');
    output.push_str(&"─".repeat(name_width + COLUMNS[1..].len() * 23));
    output.push('\n');

    for r in records {
        output.push_str(&format!("{:<name_width$}", r.file));
        for cell in [
            format!("{:.6}", r.std_dev),
            opt(r.crest_factor),
            opt(r.impact_factor),
            opt(r.shape_factor),
            format!("{:.6}", r.max_peak_width),
            r.prominent_peak_count.to_string(),
            opt(r.skewness),
            opt(r.kurtosis),
        ] {
            output.push_str(&format!("  {cell:>21}"));
        }
        output.push('\n');
    }

    if records.is_empty() {
        output.push_str("  No trace files analyzed\n");
    }

    output
}

/// Format records as CSV lines
pub fn csv(records: &[FeatureRecord]) -> String {
    let mut output = COLUMNS.join(",");
    output.push('\n');

    for r in records {
        output.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            r.file,
            r.std_dev,
            opt_raw(r.crest_factor),
            opt_raw(r.impact_factor),
            opt_raw(r.shape_factor),
            r.max_peak_width,
            r.prominent_peak_count,
            opt_raw(r.skewness),
            opt_raw(r.kurtosis),
        ));
    }

    output
}

/// Format records as a JSON array
pub fn json(records: &[FeatureRecord]) -> serde_json::Result<String> {
    let mut output = serde_json::to_string_pretty(records)?;
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file: &str) -> FeatureRecord {
        FeatureRecord {
            file: file.to_string(),
            std_dev: 1.5,
            crest_factor: Some(2.0),
            impact_factor: None,
            shape_factor: None,
            max_peak_width: 0.0,
            prominent_peak_count: 3,
            skewness: Some(-0.25),
            kurtosis: Some(0.5),
        }
    }

    #[test]
    fn test_csv_header_and_nan() {
        let output = csv(&[record("a.csv")]);
        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "File Name,Standard Deviation,Crest Factor,Impact Factor,Shape Factor,\
             Max Peak Width,Peak Prominence Count,Skewness,Kurtosis"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("a.csv,1.5,"));
        assert!(row.contains("NaN"));
    }

    #[test]
    fn test_text_lists_every_record() {
        let output = text(&[record("a.csv"), record("b.csv")]);
        assert!(output.contains("File Name"));
        assert!(output.contains("a.csv"));
        assert!(output.contains("b.csv"));
        assert!(output.contains("NaN"));
    }

    #[test]
    fn test_text_empty_batch() {
        let output = text(&[]);
        assert!(output.contains("No trace files analyzed"));
    }

    #[test]
    fn test_json_uses_output_column_names() {
        let output = json(&[record("a.csv")]).unwrap();
        assert!(output.contains("\"File Name\": \"a.csv\""));
        assert!(output.contains("\"Peak Prominence Count\": 3"));
        // Undefined metrics are null in JSON, the one format without NaN
        assert!(output.contains("\"Impact Factor\": null"));
    }
}
