//! Optional Parquet snapshot of the merged table.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, Int32Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

use crate::table::MergedTable;

pub fn save_parquet(table: &MergedTable, file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;

    let mut fields = vec![
        Field::new("Date", DataType::Utf8, false),
        Field::new("Year", DataType::Int32, false),
        Field::new("Month", DataType::Int32, false),
    ];
    fields.extend(
        table
            .columns
            .iter()
            .map(|c| Field::new(c.variable.column_name(), DataType::Float64, false)),
    );
    let schema = Arc::new(Schema::new(fields));

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let dates = StringArray::from_iter_values(table.rows.iter().map(|r| r.date.as_str()));
    let years = Int32Array::from_iter_values(table.rows.iter().map(|r| r.year));
    let months = Int32Array::from_iter_values(table.rows.iter().map(|r| r.month as i32));

    let mut columns: Vec<ArrayRef> = vec![Arc::new(dates), Arc::new(years), Arc::new(months)];
    for column in &table.columns {
        columns.push(Arc::new(Float64Array::from(column.values.clone())));
    }

    let batch = RecordBatch::try_new(schema, columns)?;

    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}
