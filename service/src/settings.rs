use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::render::WaitUntil;

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub executable: Option<PathBuf>,
    pub no_sandbox: bool,
    pub profile_root: PathBuf,
    pub navigation_timeout: Duration,
    pub wait_until: WaitUntil,
    pub max_concurrent_browsers: usize,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    pub browser: BrowserSettings,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            port: get_port(),
            request_timeout: get_request_timeout(),
            max_body_bytes: get_max_body_bytes(),
            browser: BrowserSettings {
                executable: get_chrome_executable(),
                no_sandbox: get_no_sandbox(),
                profile_root: get_profile_root(),
                navigation_timeout: get_navigation_timeout(),
                wait_until: get_wait_until(),
                max_concurrent_browsers: get_max_concurrent_browsers(),
            },
        }
    }
}

impl Default for BrowserSettings {
    fn default() -> Self {
        BrowserSettings {
            executable: None,
            no_sandbox: false,
            profile_root: env::temp_dir(),
            navigation_timeout: Duration::from_secs(30),
            wait_until: WaitUntil::NetworkIdle,
            max_concurrent_browsers: 4,
        }
    }
}

fn get_port() -> u16 {
    parse_or(env::var("PORT").ok(), 8000)
}

fn get_request_timeout() -> Duration {
    Duration::from_secs(parse_or(env::var("REQUEST_TIMEOUT_SECONDS").ok(), 59))
}

fn get_max_body_bytes() -> usize {
    parse_or(env::var("MAX_BODY_BYTES").ok(), 10 * 1024 * 1024)
}

fn get_chrome_executable() -> Option<PathBuf> {
    env::var("CHROME_EXECUTABLE").ok().filter(|path| !path.is_empty()).map(PathBuf::from)
}

fn get_no_sandbox() -> bool {
    parse_flag(env::var("CHROME_NO_SANDBOX").ok())
}

fn get_profile_root() -> PathBuf {
    env::var("CHROME_PROFILE_ROOT").ok().filter(|path| !path.is_empty()).map(PathBuf::from).unwrap_or_else(env::temp_dir)
}

fn get_navigation_timeout() -> Duration {
    Duration::from_secs(parse_or(env::var("NAVIGATION_TIMEOUT_SECONDS").ok(), 30))
}

fn get_wait_until() -> WaitUntil {
    parse_or(env::var("NAVIGATION_WAIT_UNTIL").ok(), WaitUntil::NetworkIdle)
}

fn get_max_concurrent_browsers() -> usize {
    parse_or(env::var("MAX_CONCURRENT_BROWSERS").ok(), 4)
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    match value.map(|value| value.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}

fn parse_flag(value: Option<String>) -> bool {
    match value {
        Some(value) => matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        None => false,
    }
}
