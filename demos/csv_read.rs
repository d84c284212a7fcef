//! CSV Reader Examples
//!
//! Demonstrates:
//! - Reading rows one at a time
//! - Reading with headers
//! - Custom delimiters
//! - Recovering from a malformed row

use csvrow::{CsvConfig, CsvError, CsvReader};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== CSV Reader Examples ===\n");

    println!("1. Quoted fields...");
    {
        let mut reader =
            CsvReader::from_string("name,bio\nAda,\"Analyst, \"\"first\"\" programmer\nof note\"\n");
        while let Some(row) = reader.read_row()? {
            println!("   {:?}", row);
        }
    }

    println!("\n2. Reading with headers...");
    {
        let mut reader = CsvReader::from_string("id,name\n1,Alice\n2,Bob\n").has_header(true);
        let rows: Vec<_> = reader.rows().collect::<Result<_, _>>()?;
        println!("   Headers: {:?}", reader.headers());
        for row in rows {
            println!("   {:?}", row);
        }
    }

    println!("\n3. Semicolon delimiter...");
    {
        let config = CsvConfig::new().delimiter(';');
        let mut reader = CsvReader::from_string_with("price;note\n3,50;cheap\n", config)?;
        for row in reader.rows() {
            println!("   {:?}", row?);
        }
    }

    println!("\n4. Malformed rows...");
    {
        let mut reader = CsvReader::from_string("ok,1\n\"bad\"x,2\nok,3\n");
        for row in reader.rows() {
            match row {
                Ok(row) => println!("   {:?}", row),
                Err(e @ CsvError::Malformed { .. }) => println!("   skipped: {}", e),
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
