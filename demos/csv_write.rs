//! CSV Writer Examples
//!
//! Writes a small file, then reads it back.

use csvrow::{CsvConfig, CsvReader, CsvWriter, Encoding};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("csvrow_demo.csv");

    println!("=== CSV Writer Examples ===\n");
    {
        let mut writer = CsvWriter::new(&path)?;
        writer.write_row(["Name", "Quote", "City"])?;
        writer.write_row(["Alice", "She said \"hi\"", "New York, NY"])?;
        writer.write_row(["Bob", "line one\nline two", ""])?;
        println!("   Wrote {} rows to {}", writer.row_count(), path.display());
        writer.save()?;
    }

    print!("{}", std::fs::read_to_string(&path)?);

    let mut reader = CsvReader::open(&path)?;
    for row in reader.rows() {
        println!("   {:?}", row?);
    }
    reader.close();

    println!("\nLatin-1 output:");
    let config = CsvConfig::new().encoding(Encoding::Latin1);
    let mut writer = CsvWriter::in_memory_with(config)?;
    writer.write_row(["café", "crème brûlée"])?;
    println!("   {:?}", writer.into_inner()?);

    std::fs::remove_file(&path).ok();
    Ok(())
}
