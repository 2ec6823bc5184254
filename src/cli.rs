//! Command-line interface for geoquiz.
//!
//! Uses lexopt for minimal binary size overhead (~34KB).

use std::ffi::OsString;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::AuthBackend;

/// Command-line arguments.
///
/// Unset options fall through to the environment and config file.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Host address to bind to.
    pub host: Option<IpAddr>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Auth backend override.
    pub auth: Option<AuthBackend>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('H') | Long("host") => {
                let value: String = parser.value()?.parse()?;
                result.host = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("host", value))?,
                );
            }
            Short('p') | Long("port") => {
                let value: String = parser.value()?.parse()?;
                result.port = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("port", value))?,
                );
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('a') | Long("auth") => {
                let value: String = parser.value()?.parse()?;
                result.auth = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("auth", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"geoquiz {version}
Session and quiz backend for the map/quiz app

USAGE:
    geoquiz [OPTIONS]

OPTIONS:
    -H, --host <ADDR>       Host address to bind [default: 127.0.0.1]
    -p, --port <PORT>       Port to listen on [default: 3000]
    -c, --config <FILE>     Path to configuration file (JSON)
    -a, --auth <BACKEND>    Auth backend: firebase or local [default: local]
    -l, --log-level <LVL>   Log level (error, warn, info, debug, trace)
    -h, --help              Print help
    -V, --version           Print version

ENVIRONMENT VARIABLES:
    GEOQUIZ_HOST                     Host address (overrides config)
    GEOQUIZ_PORT                     Port number (overrides config)
    GEOQUIZ_AUTH_BACKEND             Auth backend (overrides config)
    GEOQUIZ_FIREBASE_API_KEY         Firebase web API key
    GEOQUIZ_FIREBASE_AUTH_DOMAIN     Firebase auth domain
    GEOQUIZ_FIREBASE_PROJECT_ID      Firebase project id
    GEOQUIZ_FIREBASE_STORAGE_BUCKET  Firebase storage bucket
    GEOQUIZ_FIREBASE_APP_ID          Firebase app id
    GEOQUIZ_FIREBASE_ID_TOKEN        ID token of an already signed-in user
    GEOQUIZ_FIREBASE_REFRESH_TOKEN   Refresh token paired with the ID token
    GEOQUIZ_LOG_LEVEL                Log level (overrides config)
    RUST_LOG                         Alternative log level setting

EXAMPLES:
    # Local session store, no identity service
    geoquiz

    # Firebase-backed sessions
    GEOQUIZ_FIREBASE_API_KEY=... geoquiz --auth firebase

    # Start with config file
    geoquiz -c /etc/geoquiz/config.json
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("geoquiz {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
