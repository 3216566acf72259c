use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::Context;
use serde::Deserialize;
use tracing::{
  info,
  warn
};

const CONFIG_FILE: &str =
  "snaptask.toml";
const CONFIG_ENV_VAR: &str =
  "SNAPTASK_CONFIG";

/// Viewer settings with their file of
/// origin. Missing file means stock
/// defaults; a malformed file is an
/// error rather than a silent reset.
#[derive(Debug, Clone)]
pub struct Config {
  pub color:        String,
  pub timezone:     Option<String>,
  pub default_sort: Option<String>,
  pub loaded_file:  Option<PathBuf>
}

#[derive(
  Debug, Default, Deserialize
)]
struct FileConfig {
  color:        Option<String>,
  timezone:     Option<String>,
  default_sort: Option<String>
}

impl Config {
  #[tracing::instrument(skip(
    override_path
  ))]
  pub fn load(
    override_path: Option<&Path>
  ) -> anyhow::Result<Self> {
    if let Some(path) = override_path
      && !path.exists()
    {
      anyhow::bail!(
        "config file not found: {}",
        path.display()
      );
    }

    let path =
      config_file_path(override_path);

    let file = match path.as_deref() {
      | Some(path) if path.exists() => {
        info!(
          file = %path.display(),
          "loading config"
        );
        let raw =
          fs::read_to_string(path)
            .with_context(|| {
              format!(
                "failed to read {}",
                path.display()
              )
            })?;
        toml::from_str::<FileConfig>(
          &raw
        )
        .with_context(|| {
          format!(
            "failed to parse {}",
            path.display()
          )
        })?
      }
      | _ => {
        warn!(
          "no config file found; \
           using defaults"
        );
        FileConfig::default()
      }
    };

    Ok(Self {
      color:        file
        .color
        .unwrap_or_else(|| {
          "on".to_string()
        }),
      timezone:     file.timezone,
      default_sort: file.default_sort,
      loaded_file:  path.filter(
        |candidate| candidate.exists()
      )
    })
  }
}

/// Where the config file would live:
/// explicit override, then the env
/// var, then the user config dir,
/// then the working directory.
pub fn config_file_path(
  override_path: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Ok(raw) =
    std::env::var(CONFIG_ENV_VAR)
  {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
      return Some(PathBuf::from(
        trimmed
      ));
    }
  }

  if let Some(dir) =
    dirs::config_dir()
  {
    let candidate = dir
      .join("snaptask")
      .join(CONFIG_FILE);
    if candidate.exists() {
      return Some(candidate);
    }
  }

  std::env::current_dir().ok().map(
    |dir| dir.join(CONFIG_FILE)
  )
}
