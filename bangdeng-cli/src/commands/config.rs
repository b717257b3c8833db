use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::{Setting, Settings, ValueSource, default_config_path};

fn mask_value(s: &str) -> String {
    if s.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", s.chars().take(4).collect::<String>())
    }
}

fn log_setting(name: &str, value: Option<String>, source: &ValueSource) {
    let source_str = format!("({})", source);
    match value {
        Some(v) => log::info!(
            "  {:<15} {} {}",
            name,
            v,
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  {:<15} {}",
            name,
            "not set".if_supports_color(Stdout, |t| t.yellow()),
        ),
    }
}

fn show<T: std::fmt::Display>(name: &str, setting: &Setting<T>) {
    log_setting(name, Some(setting.value.to_string()), &setting.source);
}

fn show_opt(name: &str, setting: &Setting<Option<String>>, secret: bool) {
    let value = setting
        .value
        .as_deref()
        .map(|v| if secret { mask_value(v) } else { v.to_string() });
    log_setting(name, value, &setting.source);
}

/// Show resolved settings and where each came from.
pub(crate) fn run_config_show(settings: &Settings) {
    log::info!(
        "{}",
        "bangdeng configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &settings.config_path {
        Some(p) if p.exists() => log::info!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => log::info!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!(
            "  Config file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    crate::log_blank();

    log::info!("[store]");
    show("backend", &Setting {
        value: settings.backend.value.as_str(),
        source: settings.backend.source.clone(),
    });
    show("sqlite_path", &Setting {
        value: settings.sqlite_path.value.display(),
        source: settings.sqlite_path.source.clone(),
    });
    show("collection", &settings.collection);

    log::info!("[firestore]");
    show_opt("project_id", &settings.project_id, false);
    show("database", &settings.database);
    show_opt("access_token", &settings.access_token, true);
    show_opt("emulator_host", &settings.emulator_host, false);

    log::info!("[overpass]");
    show("url", &settings.overpass_url);
    show("timeout_secs", &Setting {
        value: settings.overpass_timeout.value.as_secs(),
        source: settings.overpass_timeout.source.clone(),
    });
}

/// Print the config file path.
pub(crate) fn run_config_path(settings: &Settings) -> Result<(), CliError> {
    let path = settings
        .config_path
        .clone()
        .or_else(default_config_path)
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    log::info!("{}", path.display());
    Ok(())
}
