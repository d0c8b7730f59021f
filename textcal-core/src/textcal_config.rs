//! User configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::DEFAULT_PRODID;
use crate::error::{TextcalError, TextcalResult};

fn default_prodid() -> String {
    DEFAULT_PRODID.to_string()
}

/// Configuration at ~/.config/textcal/config.toml, overridable with
/// `TEXTCAL_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextcalConfig {
    /// PRODID written to the calendar header.
    #[serde(default = "default_prodid")]
    pub prodid: String,

    /// Leave the run timestamps out of the UID digest so that UIDs
    /// stay the same between runs.
    #[serde(default)]
    pub stable_uids: bool,

    /// Where to write the calendar when no output is given on the command
    /// line. `~` is expanded.
    pub output: Option<PathBuf>,
}

impl Default for TextcalConfig {
    fn default() -> Self {
        TextcalConfig {
            prodid: default_prodid(),
            stable_uids: false,
            output: None,
        }
    }
}

impl TextcalConfig {
    pub fn config_path() -> TextcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TextcalError::Config("Could not determine config directory".into()))?
            .join("textcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    /// An explicit path must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> TextcalResult<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path()?, false),
        };

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(Environment::with_prefix("TEXTCAL"))
            .build()
            .map_err(|e| TextcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TextcalError::Config(e.to_string()))
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        let output = self.output.as_ref()?;
        let expanded = shellexpand::tilde(&output.to_string_lossy()).into_owned();
        Some(PathBuf::from(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_when_file_is_empty() {
        let file = write_config("");
        let config = TextcalConfig::load(Some(file.path())).unwrap();
        assert_eq!(config, TextcalConfig::default());
        assert_eq!(config.prodid, "-//textcal//textcal//EN");
    }

    #[test]
    fn reads_values_from_toml() {
        let file = write_config("prodid = \"-//Family//Agenda//EN\"\nstable_uids = true\n");
        let config = TextcalConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.prodid, "-//Family//Agenda//EN");
        assert!(config.stable_uids);
        assert_eq!(config.output, None);
    }

    #[test]
    fn output_path_expands_tilde() {
        let file = write_config("output = \"~/calendar/agenda.ics\"\n");
        let config = TextcalConfig::load(Some(file.path())).unwrap();
        let path = config.output_path().unwrap();

        assert!(path.ends_with("calendar/agenda.ics"));
        if let Some(home) = dirs::home_dir() {
            assert!(path.starts_with(home));
        }
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = TextcalConfig::load(Some(Path::new("/nonexistent/textcal/config.toml")));
        assert!(matches!(result, Err(TextcalError::Config(_))));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let file = write_config("stable_uids = \"maybe\"\n");
        assert!(TextcalConfig::load(Some(file.path())).is_err());
    }
}
