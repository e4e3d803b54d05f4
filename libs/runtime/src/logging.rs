use crate::config::{LoggingConfig, Section};
use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::Level;
use tracing_subscriber::fmt;

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

// -------- level helpers --------
fn parse_tracing_level(s: &str) -> Option<tracing::Level> {
    match s.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

// -------- rotating writer for files --------
#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriterHandle;
    fn make_writer(&'a self) -> Self::Writer {
        RotWriterHandle(self.0.clone())
    }
}

#[derive(Clone)]
struct RotWriterHandle(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriterHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().unwrap().flush()
    }
}

// -------- path resolution helpers --------

/// Resolve a log file path against `base_dir` (home_dir).
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Create a rotating writer for log files, ensuring the parent directory exists.
/// `log_path` must be an absolute or already-resolved path.
fn create_rotating_writer_at_path(
    log_path: &Path,
    max_bytes: usize,
) -> Result<RotWriter, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::Age(chrono::Duration::days(1))),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None, // file permissions (Unix only)
    );

    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn create_default_file_writer(section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }

    let max_bytes = section.max_size_mb.unwrap_or(100) * 1024 * 1024;
    let log_path = resolve_log_path(&section.file, base_dir);

    match create_rotating_writer_at_path(&log_path, max_bytes as usize) {
        Ok(writer) => Some(writer),
        Err(_) => {
            eprintln!(
                "Failed to initialize default log file '{}'",
                log_path.to_string_lossy()
            );
            None
        }
    }
}

// -------- target filters --------

fn build_targets(
    cfg: &LoggingConfig,
    level_of: impl Fn(&Section) -> &str,
) -> tracing_subscriber::filter::Targets {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::filter::Targets;

    let default_level = cfg
        .get("default")
        .and_then(|s| parse_tracing_level(level_of(s)))
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::OFF);

    let mut targets = Targets::new().with_default(default_level);

    // Explicit per-subsystem overrides
    for (crate_name, section) in cfg.iter().filter(|(k, _)| k.as_str() != "default") {
        let level = parse_tracing_level(level_of(section))
            .map(LevelFilter::from_level)
            .unwrap_or(LevelFilter::OFF);
        targets = targets.with_target(crate_name.clone(), level);
    }

    targets
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: LoggingConfig containing the logging sections
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let console_targets = build_targets(cfg, |s| s.console_level.as_str());
    let file_targets = build_targets(cfg, |s| s.file_level.as_str());
    let file_writer = cfg
        .get("default")
        .and_then(|s| create_default_file_writer(s, base_dir));

    build_logging_layers(console_targets, file_targets, file_writer);
}

fn init_default_logging() {
    use tracing_subscriber::fmt;
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

fn build_logging_layers(
    console_targets: tracing_subscriber::filter::Targets,
    file_targets: tracing_subscriber::filter::Targets,
    file_writer: Option<RotWriter>,
) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets);

    match file_writer {
        Some(writer) => {
            let file_layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_level(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(writer)
                .with_filter(file_targets);

            let _ = Registry::default()
                .with(console_layer)
                .with(file_layer)
                .try_init();
        }
        None => {
            let _ = Registry::default().with(console_layer).try_init();
        }
    }
}

// =================== tests ===================
