//! Writes the merged table as the CSV uploaded to ArcGIS Online.

use std::path::Path;

use anyhow::Result;
use csv::Writer;

use crate::table::MergedTable;

pub fn save_csv(table: &MergedTable, file_path: &Path) -> Result<()> {
    let mut writer = Writer::from_path(file_path)?;

    writer.write_record(table.headers())?;

    for (idx, row) in table.rows.iter().enumerate() {
        let mut record = vec![row.date.clone(), row.year.to_string(), row.month.to_string()];
        record.extend(table.columns.iter().map(|c| format_value(c.values[idx])));
        writer.write_record(&record)?;
    }

    writer.flush()?;

    Ok(())
}

/// Floats always keep a fractional part, so `50` is written as `50.0`.
fn format_value(value: f64) -> String {
    format!("{:?}", value)
}
