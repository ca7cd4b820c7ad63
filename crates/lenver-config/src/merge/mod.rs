//! Configuration discovery, layering and environment overrides

use crate::toml::{validate_known_brands, validate_log_level, LenverToml, OutputFormat};
use crate::{ConfigResult, CONFIG_FILE};
use camino::{Utf8Path, Utf8PathBuf};
use lenver_agent::KNOWN_BRANDS;
use lenver_core::error::LenverError;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Prefix of environment variables that override configuration
pub const ENV_PREFIX: &str = "LENVER_";

/// Effective configuration after all layers are applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub known_brands: Vec<String>,
    pub format: OutputFormat,
    pub color: bool,
    pub log_level: String,
}

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
pub struct ConfigLayering;

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConfigSource {
    /// Built-in defaults
    Defaults,
    /// Global config file
    Global(Utf8PathBuf),
    /// Project lenver.toml file
    Project(Utf8PathBuf),
    /// File named with --config
    Explicit(Utf8PathBuf),
    /// Environment variable
    Environment(String),
    /// CLI flag
    CommandLine,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            known_brands: KNOWN_BRANDS.iter().map(|b| b.to_string()).collect(),
            format: OutputFormat::default(),
            color: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Apply the sections a config file sets, leaving the rest untouched
    pub fn apply_file(&mut self, file: &LenverToml) {
        if let Some(known) = file.brands.as_ref().and_then(|b| b.known.clone()) {
            self.known_brands = known;
        }

        if let Some(output) = &file.output {
            if let Some(format) = output.format {
                self.format = format;
            }
            if let Some(color) = output.color {
                self.color = color;
            }
        }

        if let Some(level) = file.log.as_ref().and_then(|l| l.level.clone()) {
            self.log_level = level.to_ascii_lowercase();
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> Option<Utf8PathBuf> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(filename);
            if config_path.exists() {
                return Some(config_path);
            }
            current = dir.parent();
        }

        None
    }

    /// Load the nearest project lenver.toml, if there is one
    pub fn load_project_config(&self) -> ConfigResult<Option<(LenverToml, ConfigSource)>> {
        match self.resolve_config_path(CONFIG_FILE) {
            Some(path) => {
                debug!(path = %path, "loading project config");
                let config = crate::toml::load_from_file(&path)?;
                Ok(Some((config, ConfigSource::Project(path))))
            },
            None => Ok(None),
        }
    }

    /// Load global configuration from ~/.lenver/config.toml
    pub fn load_global_config(&self) -> ConfigResult<Option<(LenverToml, ConfigSource)>> {
        let Some(home_dir) = dirs::home_dir() else {
            debug!("no home directory, skipping global config");
            return Ok(None);
        };

        let global_config_path = Utf8PathBuf::try_from(home_dir)
            .map_err(|e| LenverError::config("home_dir", format!("Invalid home directory path: {}", e)))?
            .join(".lenver")
            .join("config.toml");

        if global_config_path.exists() {
            debug!(path = %global_config_path, "loading global config");
            let config = crate::toml::load_from_file(&global_config_path)?;
            Ok(Some((config, ConfigSource::Global(global_config_path))))
        } else {
            Ok(None)
        }
    }

    /// Load a config file named explicitly, resolved against the working directory
    pub fn load_explicit_config(&self, path: &Utf8Path) -> ConfigResult<(LenverToml, ConfigSource)> {
        let path = self.cwd.join(path);
        let config = crate::toml::load_from_file(&path)?;
        Ok((config, ConfigSource::Explicit(path)))
    }

    /// Resolve the effective settings and the sources that contributed to them.
    ///
    /// An explicit config file replaces project discovery; the global file
    /// still applies underneath it.
    pub fn load(
        &self,
        explicit: Option<&Utf8Path>,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<(Settings, Vec<ConfigSource>)> {
        let global = self.load_global_config()?;
        let project = match explicit {
            Some(path) => Some(self.load_explicit_config(path)?),
            None => self.load_project_config()?,
        };

        let mut sources = vec![ConfigSource::Defaults];
        sources.extend(global.as_ref().map(|(_, source)| source.clone()));
        sources.extend(project.as_ref().map(|(_, source)| source.clone()));

        let env_overrides = ConfigLayering::collect_env_overrides();
        sources.extend(env_overrides.keys().map(|key| ConfigSource::Environment(key.clone())));
        if !cli_overrides.is_empty() {
            sources.push(ConfigSource::CommandLine);
        }

        let settings = ConfigLayering::merge_configs(
            global.map(|(config, _)| config),
            project.map(|(config, _)| config),
            env_overrides,
            cli_overrides,
        )?;

        Ok((settings, sources))
    }
}

impl ConfigLayering {
    /// Merge configuration layers: defaults, global, project, environment, CLI
    pub fn merge_configs(
        global_config: Option<LenverToml>,
        project_config: Option<LenverToml>,
        env_overrides: HashMap<String, String>,
        cli_overrides: HashMap<String, String>,
    ) -> ConfigResult<Settings> {
        let mut merged = Settings::default();

        if let Some(global) = &global_config {
            merged.apply_file(global);
        }

        if let Some(project) = &project_config {
            merged.apply_file(project);
        }

        // Apply environment variable overrides
        Self::apply_env_overrides(&mut merged, &env_overrides)?;

        // Apply CLI flag overrides (highest priority)
        Self::apply_cli_overrides(&mut merged, &cli_overrides)?;

        Ok(merged)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        settings: &mut Settings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "LENVER_KNOWN_BRANDS" => {
                    let known: Vec<String> = value
                        .split(',')
                        .map(|name| name.trim().to_string())
                        .filter(|name| !name.is_empty())
                        .collect();
                    validate_known_brands(&known)?;
                    settings.known_brands = known;
                },
                "LENVER_OUTPUT_FORMAT" => {
                    settings.format = value.parse()?;
                },
                "LENVER_COLOR" => {
                    settings.color = parse_flag(key, value)?;
                },
                "LENVER_LOG_LEVEL" => {
                    validate_log_level(value)?;
                    settings.log_level = value.to_ascii_lowercase();
                },
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(
        settings: &mut Settings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "format" => {
                    settings.format = value.parse()?;
                },
                "color" => {
                    settings.color = parse_flag(key, value)?;
                },
                "log_level" => {
                    validate_log_level(value)?;
                    settings.log_level = value.to_ascii_lowercase();
                },
                _ => {
                    // Unknown CLI override, ignore
                },
            }
        }

        Ok(())
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        Self::filter_env_overrides(std::env::vars())
    }

    /// Keep only variables carrying the lenver prefix
    pub fn filter_env_overrides<I>(vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

fn parse_flag(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(LenverError::config(
            field,
            format!("expected a boolean, found '{}'", other),
        )),
    }
}
