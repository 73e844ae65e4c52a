use crate::analysis::analyzed_data::{AnalyzedData, DataError};
use crate::analysis::graph_trail::GraphTrail;
use chrono::Local;
use csv::{ReaderBuilder, Writer};
use simplelog::*;
use std::fs::File;
use std::io;
use std::path::Path;

/// "off", "error", "warn", "info", "debug" or "trace"; anything else is "info"
pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// default log file name, stamped with the local time
pub fn default_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("mde_log_{}.txt", date_and_time)
}

/// Terminal logger plus an optional file logger. A logger that is already installed stays in
/// place and the call returns false.
pub fn init_logging(level: &str, log_file: Option<&str>) -> bool {
    let log_option = level_filter(level);
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(name) = log_file {
        match File::create(name) {
            Ok(file) => loggers.push(WriteLogger::new(log_option, Config::default(), file)),
            Err(e) => eprintln!("log file {} not created: {}", name, e),
        }
    }
    CombinedLogger::init(loggers).is_ok()
}

/// Reads a two-column CSV file with a header row naming the axes.
pub fn load_data_csv(path: impl AsRef<Path>) -> Result<AnalyzedData, DataError> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .map_err(|e| DataError::Io(e.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|e| DataError::Io(e.to_string()))?
        .clone();
    let x_name = headers.get(0).unwrap_or("x").to_string();
    let y_name = headers.get(1).unwrap_or("y").to_string();
    let (mut x, mut y) = (Vec::new(), Vec::new());
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| DataError::Io(e.to_string()))?;
        let field = |i: usize| -> Result<f64, DataError> {
            record
                .get(i)
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or(DataError::BadRecord(row + 1))
        };
        x.push(field(0)?);
        y.push(field(1)?);
    }
    AnalyzedData::new(&x_name, &y_name, &x, &y)
}

/// Writes the trails of one item as `trail, x, y` rows.
pub fn save_trails_to_csv(trails: &[GraphTrail], x_name: &str, y_name: &str, filename: &str) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["trail", x_name, y_name])?;
    for (i, trail) in trails.iter().enumerate() {
        for p in trail.points() {
            writer.write_record(&[i.to_string(), p.x.to_string(), p.y.to_string()])?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzed_item::AnalyzedItem;
    use std::io::Write;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter("DEBUG"), LevelFilter::Debug);
        assert_eq!(level_filter("off"), LevelFilter::Off);
        assert_eq!(level_filter("whatever"), LevelFilter::Info);
        assert!(default_log_name().starts_with("mde_log_"));
    }

    #[test]
    fn test_load_data_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "time, height\n2, 4\n0, 0\n1, 1").unwrap();
        let d = load_data_csv(file.path()).unwrap();
        assert_eq!(d.x_name(), "time");
        assert_eq!(d.name(), "height");
        assert_eq!(d.x_values(), &[0.0, 1.0, 2.0]);
        assert_eq!(d.y_values(), &[0.0, 1.0, 4.0]);
    }

    #[test]
    fn test_bad_csv_record() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x,y\n1,2\n3,oops").unwrap();
        assert_eq!(load_data_csv(file.path()).unwrap_err(), DataError::BadRecord(2));
        assert!(matches!(load_data_csv("/no/such/file.csv"), Err(DataError::Io(_))));
    }

    #[test]
    fn test_save_trails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trails.csv");
        let trails = vec![
            GraphTrail::from_pairs(&[[0.0, 1.0], [1.0, 2.0]]).unwrap(),
            GraphTrail::from_pairs(&[[3.0, 4.0]]).unwrap(),
        ];
        save_trails_to_csv(&trails, "x", "y", path.to_str().unwrap()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.lines().last().unwrap(), "1,3,4");
    }
}
