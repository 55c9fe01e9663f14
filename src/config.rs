use std::path::PathBuf;

pub const APP_NAME: &str = "nutri-booking";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the data file lives unless configured otherwise.
pub const DEFAULT_DATA_FILE: &str = "data/agendamentos.csv";

/// The staff account allowed into the listing and status screens.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Built once at startup and handed to the `Clinic`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub data_file: PathBuf,
    /// `None` disables staff login entirely
    pub credentials: Option<Credentials>,
}

impl Config {
    pub fn new(data_file: impl Into<PathBuf>, credentials: Option<Credentials>) -> Self {
        Config {
            data_file: data_file.into(),
            credentials,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_DATA_FILE, None)
    }
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "nutri_booking=info,warn"
}
