//! Process plumbing shared by the SCM service binaries (`scm-api`, `identity`).
//!
//! - [`env`]: `APP_ENV`
//! - [`telemetry`]: tracing subscriber and panic hook
//! - [`middleware`]: transport, CORS and security-header layers
//! - [`shutdown`]: Ctrl+C / SIGTERM for graceful shutdown

pub mod env;
pub mod middleware;
pub mod shutdown;
pub mod telemetry;

pub use env::AppEnv;
pub use middleware::http::HttpLimits;
pub use shutdown::shutdown_signal;
