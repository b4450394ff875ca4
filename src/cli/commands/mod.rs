use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

use crate::auth::{
    config::{DEFAULT_LOGIN_PATH, DEFAULT_LOGOUT_PATH},
    verifier::DEFAULT_VERIFIER_URL,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn validator_path() -> ValueParser {
    ValueParser::from(move |path: &str| -> std::result::Result<String, String> {
        if path.starts_with('/') {
            Ok(path.to_string())
        } else {
            Err("path must start with '/'".to_string())
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("atesti")
        .about("Browser assertion authentication gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ATESTI_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("audience")
                .short('a')
                .long("audience")
                .help(
                    "Audience passed to the verification service (host:port or scheme+host). \
                     The literal HOST derives it from the Host header and SHOULD ONLY BE USED \
                     behind a trusted reverse proxy",
                )
                .env("ATESTI_AUDIENCE")
                .required(true),
        )
        .arg(
            Arg::new("login-path")
                .long("login-path")
                .help("Path intercepted as the login submission endpoint")
                .default_value(DEFAULT_LOGIN_PATH)
                .env("ATESTI_LOGIN_PATH")
                .value_parser(validator_path()),
        )
        .arg(
            Arg::new("logout-path")
                .long("logout-path")
                .help("Path intercepted as the logout endpoint")
                .default_value(DEFAULT_LOGOUT_PATH)
                .env("ATESTI_LOGOUT_PATH")
                .value_parser(validator_path()),
        )
        .arg(
            Arg::new("verifier-url")
                .long("verifier-url")
                .help("Remote assertion verification endpoint")
                .default_value(DEFAULT_VERIFIER_URL)
                .env("ATESTI_VERIFIER_URL"),
        )
        .arg(
            Arg::new("verifier-timeout")
                .long("verifier-timeout")
                .help("Timeout in seconds for the verification call")
                .default_value("10")
                .env("ATESTI_VERIFIER_TIMEOUT")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ATESTI_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
