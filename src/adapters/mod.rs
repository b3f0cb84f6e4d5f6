// Adapters layer: everything between the analysis core and the outside world
// (CSV parsing, date formats, file discovery, report rendering).

pub mod csv_source;
pub mod dates;
pub mod discovery;
pub mod report;
