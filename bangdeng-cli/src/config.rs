//! Layered run configuration.
//!
//! Priority: command-line flag > environment variable > config file > default.
//! Every resolved value remembers where it came from so `config show` can
//! report it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bangdeng_source::OverpassConfig;
use bangdeng_store::{DocumentStore, FirestoreConfig, FirestoreStore, SqliteStore};
use serde::{Deserialize, Serialize};

use crate::CliError;

pub(crate) const DEFAULT_COLLECTION: &str = "locations";
const DEFAULT_DATABASE: &str = "(default)";

pub(crate) const ENV_STORE: &str = "BANGDENG_STORE";
pub(crate) const ENV_SQLITE_PATH: &str = "BANGDENG_SQLITE_PATH";
pub(crate) const ENV_COLLECTION: &str = "BANGDENG_COLLECTION";
pub(crate) const ENV_PROJECT_ID: &str = "FIRESTORE_PROJECT_ID";
pub(crate) const ENV_ACCESS_TOKEN: &str = "FIRESTORE_ACCESS_TOKEN";
pub(crate) const ENV_EMULATOR_HOST: &str = "FIRESTORE_EMULATOR_HOST";
pub(crate) const ENV_OVERPASS_URL: &str = "OVERPASS_URL";

/// Which document store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Backend {
    Firestore,
    Sqlite,
}

impl Backend {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Firestore => "firestore",
            Self::Sqlite => "sqlite",
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(CliError::config(format!(
                "unknown store backend '{other}' (expected firestore or sqlite)"
            ))),
        }
    }
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValueSource {
    Flag,
    EnvVar(&'static str),
    ConfigFile,
    Default,
    Missing,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "flag"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Setting<T> {
    pub value: T,
    pub source: ValueSource,
}

/// TOML config file format.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub store: Option<StoreSection>,
    pub firestore: Option<FirestoreSection>,
    pub overpass: Option<OverpassSection>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct StoreSection {
    pub backend: Option<Backend>,
    pub sqlite_path: Option<PathBuf>,
    pub collection: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct FirestoreSection {
    pub project_id: Option<String>,
    pub database: Option<String>,
    pub access_token: Option<String>,
    pub emulator_host: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub(crate) struct OverpassSection {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Store-related command-line flags.
#[derive(Debug, Default, Clone)]
pub(crate) struct StoreFlags {
    pub backend: Option<Backend>,
    pub db: Option<PathBuf>,
    pub collection: Option<String>,
}

#[derive(Debug)]
pub(crate) struct Settings {
    pub config_path: Option<PathBuf>,
    pub backend: Setting<Backend>,
    pub sqlite_path: Setting<PathBuf>,
    pub collection: Setting<String>,
    pub project_id: Setting<Option<String>>,
    pub database: Setting<String>,
    pub access_token: Setting<Option<String>>,
    pub emulator_host: Setting<Option<String>>,
    pub overpass_url: Setting<String>,
    pub overpass_timeout: Setting<Duration>,
}

/// Return the default path to the config file.
pub(crate) fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bangdeng").join("config.toml"))
}

/// Default location of the local SQLite store.
pub(crate) fn default_sqlite_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("bangdeng"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("locations.db")
}

/// Read a config file. A missing file is `None` unless `required`.
pub(crate) fn load_config_file(path: &Path, required: bool) -> Result<Option<ConfigFile>, CliError> {
    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => return Ok(None),
        Err(e) => {
            return Err(CliError::config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };
    let config = toml::from_str(&text)
        .map_err(|e| CliError::config(format!("Invalid config file {}: {}", path.display(), e)))?;
    Ok(Some(config))
}

/// First of flag, environment variable, config file value.
fn layer<T>(
    flag: Option<T>,
    var: &'static str,
    env: &dyn Fn(&str) -> Option<String>,
    parse: impl Fn(&str) -> Result<T, CliError>,
    file: Option<T>,
) -> Result<Option<Setting<T>>, CliError> {
    if let Some(value) = flag {
        return Ok(Some(Setting {
            value,
            source: ValueSource::Flag,
        }));
    }
    if let Some(raw) = env(var).filter(|v| !v.trim().is_empty()) {
        return Ok(Some(Setting {
            value: parse(&raw)?,
            source: ValueSource::EnvVar(var),
        }));
    }
    Ok(file.map(|value| Setting {
        value,
        source: ValueSource::ConfigFile,
    }))
}

fn or_default<T>(setting: Option<Setting<T>>, default: impl FnOnce() -> T) -> Setting<T> {
    setting.unwrap_or_else(|| Setting {
        value: default(),
        source: ValueSource::Default,
    })
}

fn optional<T>(setting: Option<Setting<T>>) -> Setting<Option<T>> {
    match setting {
        Some(s) => Setting {
            value: Some(s.value),
            source: s.source,
        },
        None => Setting {
            value: None,
            source: ValueSource::Missing,
        },
    }
}

fn string(raw: &str) -> Result<String, CliError> {
    Ok(raw.trim().to_string())
}

impl Settings {
    /// Resolve settings from the process environment and the config file.
    pub(crate) fn load(config: Option<&Path>, flags: StoreFlags) -> Result<Self, CliError> {
        let path = config.map(Path::to_path_buf).or_else(default_config_path);
        let file = match &path {
            Some(p) => load_config_file(p, config.is_some())?,
            None => None,
        };
        let mut settings = Self::resolve(flags, file, &|var| std::env::var(var).ok())?;
        settings.config_path = path;
        Ok(settings)
    }

    /// Resolve settings from explicit sources.
    pub(crate) fn resolve(
        flags: StoreFlags,
        file: Option<ConfigFile>,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self, CliError> {
        let file = file.unwrap_or_default();
        let store = file.store.unwrap_or_default();
        let firestore = file.firestore.unwrap_or_default();
        let overpass = file.overpass.unwrap_or_default();

        let backend = or_default(
            layer(flags.backend, ENV_STORE, env, str::parse::<Backend>, store.backend)?,
            || Backend::Sqlite,
        );
        let sqlite_path = or_default(
            layer(
                flags.db,
                ENV_SQLITE_PATH,
                env,
                |s| Ok(PathBuf::from(s.trim())),
                store.sqlite_path,
            )?,
            default_sqlite_path,
        );
        let collection = or_default(
            layer(flags.collection, ENV_COLLECTION, env, string, store.collection)?,
            || DEFAULT_COLLECTION.to_string(),
        );
        let project_id = optional(layer(None, ENV_PROJECT_ID, env, string, firestore.project_id)?);
        let access_token = optional(layer(
            None,
            ENV_ACCESS_TOKEN,
            env,
            string,
            firestore.access_token,
        )?);
        let emulator_host = optional(layer(
            None,
            ENV_EMULATOR_HOST,
            env,
            string,
            firestore.emulator_host,
        )?);
        let database = match firestore.database {
            Some(value) => Setting {
                value,
                source: ValueSource::ConfigFile,
            },
            None => Setting {
                value: DEFAULT_DATABASE.to_string(),
                source: ValueSource::Default,
            },
        };
        let overpass_url = or_default(
            layer(None, ENV_OVERPASS_URL, env, string, overpass.url)?,
            || OverpassConfig::default().url,
        );
        let overpass_timeout = match overpass.timeout_secs {
            Some(secs) => Setting {
                value: Duration::from_secs(secs),
                source: ValueSource::ConfigFile,
            },
            None => Setting {
                value: OverpassConfig::default().timeout,
                source: ValueSource::Default,
            },
        };

        Ok(Self {
            config_path: None,
            backend,
            sqlite_path,
            collection,
            project_id,
            database,
            access_token,
            emulator_host,
            overpass_url,
            overpass_timeout,
        })
    }

    pub(crate) fn firestore_config(&self) -> Result<FirestoreConfig, CliError> {
        let project_id = self.project_id.value.clone().ok_or_else(|| {
            CliError::config(format!(
                "Missing Firestore project id. Set {ENV_PROJECT_ID} or [firestore] project_id"
            ))
        })?;
        let mut config = FirestoreConfig::new(project_id);
        config.database = self.database.value.clone();
        config.access_token = self.access_token.value.clone();
        config.emulator_host = self.emulator_host.value.clone();
        Ok(config)
    }

    /// Construct the store for this run. Called once; the handle is passed down.
    pub(crate) fn open_store(&self) -> Result<Box<dyn DocumentStore>, CliError> {
        let store: Box<dyn DocumentStore> = match self.backend.value {
            Backend::Sqlite => Box::new(SqliteStore::open(&self.sqlite_path.value)?),
            Backend::Firestore => Box::new(FirestoreStore::new(self.firestore_config()?)?),
        };
        log::debug!("Using {} store", store.backend_name());
        Ok(store)
    }

    /// Human-readable store location for status lines.
    pub(crate) fn store_label(&self) -> String {
        match self.backend.value {
            Backend::Sqlite => format!("sqlite:{}", self.sqlite_path.value.display()),
            Backend::Firestore => format!(
                "firestore:{}",
                self.project_id.value.as_deref().unwrap_or("?")
            ),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
