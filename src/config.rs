use std::path::PathBuf;

const LOG_FILTER_VAR: &str = "BUDGETPAD_LOG";
const LOG_DIR_VAR: &str = "BUDGETPAD_LOG_DIR";
const EXPORT_DIR_VAR: &str = "BUDGETPAD_EXPORT_DIR";

pub(crate) const LOG_FILE_NAME: &str = "budgetpad.log";

/// Runtime settings, resolved once at startup from the environment.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// `tracing_subscriber::EnvFilter` directive, e.g. "info" or "budgetpad=debug".
    pub(crate) log_filter: String,
    /// `None` when no data directory could be determined; logging is skipped.
    pub(crate) log_dir: Option<PathBuf>,
    pub(crate) export_dir: PathBuf,
}

impl Settings {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let home = lookup("HOME");
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let log_filter = non_empty(LOG_FILTER_VAR).unwrap_or_else(|| "info".into());

        let log_dir = non_empty(LOG_DIR_VAR)
            .map(|dir| PathBuf::from(expand_home(&dir, home.as_deref())))
            .or_else(|| {
                directories::ProjectDirs::from("com", "budgetpad", "budgetpad")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            });

        let export_dir = non_empty(EXPORT_DIR_VAR)
            .map(|dir| PathBuf::from(expand_home(&dir, home.as_deref())))
            .or_else(|| home.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            log_filter,
            log_dir,
            export_dir,
        }
    }

    pub(crate) fn log_path(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }

    /// e.g. `~/budgetpad-export-2024-01-15.csv`
    pub(crate) fn default_export_path(&self) -> PathBuf {
        let today = chrono::Local::now().format("%Y-%m-%d");
        self.export_dir.join(format!("budgetpad-export-{today}.csv"))
    }
}

/// Expand a leading `~/` using the given home directory.
pub(crate) fn expand_home(path: &str, home: Option<&str>) -> String {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => format!("{home}/{rest}"),
        (Some(rest), None) => format!("./{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
