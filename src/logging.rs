//! File logging.
//!
//! The terminal is the display, so log records never go to stdout or
//! stderr. They are only written when a log file is requested.

use std::path::Path;

use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

use crate::error::AppError;

/// Route `log` records at or above `level` to `file_path`.
pub fn init_log(level: LevelFilter, file_path: &Path) -> Result<(), AppError> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(file_path)
        .map_err(|e| AppError::Logging(e.to_string()))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| AppError::Logging(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| AppError::Logging(e.to_string()))?;
    Ok(())
}
