//! CSV export for the hourly plan.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::devices::DeviceId;
use crate::plan::report::ScheduleReport;

/// Column header for the hourly plan.
const HEADER: &str = "hour,rate,load_w,headroom_w,devices";

/// Exports the hourly plan to a CSV file at the given path.
///
/// Writes a header row followed by one row per hour of the day. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `report` - Report built from a feasible schedule
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(report: &ScheduleReport, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(report, buf)
}

/// Writes the hourly plan as CSV to any writer.
///
/// Unpriced hours leave the `rate` column empty; running devices are
/// joined with `;` in id order.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(report: &ScheduleReport, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for row in &report.hours {
        let devices: Vec<&str> = row.devices.iter().map(DeviceId::as_str).collect();
        wtr.write_record(&[
            row.hour.to_string(),
            row.rate.map(|r| format!("{r:.4}")).unwrap_or_default(),
            format!("{:.1}", row.load_w),
            format!("{:.1}", row.headroom_w),
            devices.join(";"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
