//! Some utilities

use std::path::{Path, PathBuf};

use ftlog::{
    appender::{FileAppender, Period},
    LevelFilter, LoggerGuard,
};
use serde::de::DeserializeOwned;

/// Reads a configuration from a `.json` or `.yaml` file, or returns the default if no path is
/// given. Missing fields take their default values.
///
/// # Errors
///
/// - If the file could not be read.
/// - If the extension is not `json`, `yaml`, or `yml`.
/// - If the contents could not be parsed.
pub fn read_config<C, P>(path: Option<P>) -> Result<C, String>
where
    C: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let Some(path) = path else {
        return Ok(C::default());
    };
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path).map_err(|e| format!("Could not read {path:?}: {e}"))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&contents).map_err(|e| e.to_string()),
        Some("yaml" | "yml") => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
        _ => Err(format!("Config file {path:?} must have a '.json' or '.yaml' extension")),
    }
}

/// Configures the logger.
///
/// # Errors
///
/// - If a logs directory could not be located/created.
/// - If the log-file name has no stem.
/// - If the logger could not be initialized.
pub fn configure_logger(file_name: &str) -> Result<(LoggerGuard, PathBuf), String> {
    let root_dir = PathBuf::from(".").canonicalize().map_err(|e| e.to_string())?;
    let logs_dir = root_dir.join("logs");
    if !logs_dir.exists() {
        std::fs::create_dir(&logs_dir).map_err(|e| e.to_string())?;
    }
    let log_path = logs_dir.join(file_name);

    let writer = FileAppender::builder().path(&log_path).rotate(Period::Day).build();

    let err_stem = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Log-file name {file_name:?} has no stem"))?;
    let err_path = log_path.with_file_name(format!("{err_stem}-err"));

    let guard = ftlog::Builder::new()
        // global max log level
        .max_log_level(LevelFilter::Info)
        // define root appender, pass None would write to stderr
        .root(writer)
        // write `Warn` and `Error` logs in ftlog::appender to `err_path` instead of `log_path`
        .filter("ftlog::appender", "ftlog-appender", LevelFilter::Warn)
        .appender("ftlog-appender", FileAppender::new(err_path))
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok((guard, log_path))
}
