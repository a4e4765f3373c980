// src/logging.rs

use crate::{
    config::Config,
    constants::LOG_FILE_BASENAME,
    errors::{ChatError, ChatResult},
    models::ApiCallLog,
};
use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};
use log::info;

/// Starts the file logger. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr. Keep the returned handle alive for the
/// lifetime of the process.
pub fn init(config: &Config) -> ChatResult<LoggerHandle> {
    let mut file_spec = FileSpec::default().basename(LOG_FILE_BASENAME);
    if let Some(dir) = &config.log_dir {
        file_spec = file_spec.directory(dir);
    }

    Logger::try_with_str(&config.log_level)
        .map_err(|e| ChatError::config_error(format!("Invalid log level: {}", e)))?
        .log_to_file(file_spec)
        .write_mode(WriteMode::BufferAndFlush)
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|e| ChatError::config_error(format!("Failed to start logger: {}", e)))
}

/// Logs a call to the answer endpoint.
pub fn log_api_call(log: &ApiCallLog) {
    info!("{}", format_api_call(log));
}

fn format_api_call(log: &ApiCallLog) -> String {
    format!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    )
}
