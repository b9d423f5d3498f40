//! Constants used throughout the codebase
//!

/// Version of the client, sent in the user agent
pub const DATALOOM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name used for the config directory and user agent
pub const DATALOOM: &str = "dataloom";
/// Config directory under $HOME
pub const CONFIG_DIR: &str = ".config";

/// Default host and scheme of the transform server
pub const DEFAULT_HOST: &str = "localhost:8000";
pub const DEFAULT_SCHEME: &str = "http";

/// Env vars that override the config file
pub const HOST_ENV_VAR: &str = "DATALOOM_HOST";
pub const AUTH_TOKEN_ENV_VAR: &str = "DATALOOM_AUTH_TOKEN";

/// Page sizes a table view can be set to
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
/// Pages are 1-indexed
pub const DEFAULT_PAGE_NUM: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Request timeout, retries are left to the caller
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Minimum input quiescence before a preview (chart) query is sent
pub const DEFAULT_PREVIEW_DEBOUNCE_MS: u64 = 300;
/// Max data points the chart endpoint accepts
pub const MAX_CHART_LIMIT: usize = 500;
pub const DEFAULT_CHART_LIMIT: usize = 50;

/// How long a notice stays visible
pub const NOTICE_TTL_SECS: i64 = 4;

/// Header label of the synthetic row number column
pub const SERIAL_COLUMN_NAME: &str = "#";

/// Fallback export file stem when the project has no name
pub const DEFAULT_EXPORT_STEM: &str = "export";
