use env_logger::Env;
use std::io::Write;

/// Filter directives for the CLI logger, e.g. `DATALOOM_LOG=libdataloom::api=debug`
pub const LOG_FILTER_ENV: &str = "DATALOOM_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Path of a source file below its crate's `src/`, so
/// `src/lib/src/core/session.rs` logs as `core/session.rs`
fn source_path(file: Option<&str>) -> &str {
    match file {
        Some(file) => file.rsplit_once("src/").map_or(file, |(_, rest)| rest),
        None => "unknown",
    }
}

/// `[LEVEL] timestamp - module/file.rs:line message`
pub fn init_logging() {
    let env = Env::default().filter_or(LOG_FILTER_ENV, DEFAULT_FILTER);
    let result = env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}:{} {}",
                record.level(),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                source_path(record.file()),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialized");
    }
}
