use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn write_expenses(path: &Path, rows: &[[&str; 6]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "group", "amount", "currency", "paid_by", "split"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_participants(path: &Path, rows: &[[&str; 5]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["expense", "user", "amount", "percentage", "shares"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}
