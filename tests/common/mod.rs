use std::io::Error;
use tempfile::NamedTempFile;

/// Writes an `action,value` script to a temporary file.
pub fn write_script(rows: &[(&str, &str)]) -> Result<NamedTempFile, Error> {
    let file = NamedTempFile::new()?;
    let mut wtr = csv::WriterBuilder::new().from_path(file.path())?;

    wtr.write_record(["action", "value"])?;
    for (action, value) in rows {
        wtr.write_record([*action, *value])?;
    }

    wtr.flush()?;
    Ok(file)
}

/// The happy path: card 1, one 50,000 quick amount, confirm.
pub fn happy_path() -> Vec<(&'static str, &'static str)> {
    vec![
        ("select", "1"),
        ("next", ""),
        ("quick", "50000"),
        ("next", ""),
    ]
}
