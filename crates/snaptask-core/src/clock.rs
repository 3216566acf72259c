use std::sync::OnceLock;

use chrono::{
  DateTime,
  Utc
};
use chrono_tz::Tz;
use regex::Regex;
use serde::Deserialize;

use crate::config::config_file_path;

const TIMEZONE_ENV_VAR: &str =
  "SNAPTASK_TIMEZONE";

#[derive(Debug, Deserialize)]
struct TimezoneConfig {
  timezone: Option<String>
}

static PROJECT_TZ: OnceLock<Tz> =
  OnceLock::new();

/// Timezone the dashboard cells are
/// rendered in. The browser used the
/// viewer's locale; here it comes from
/// the environment or the config file
/// and falls back to UTC.
pub fn project_timezone() -> &'static Tz
{
  PROJECT_TZ.get_or_init(|| {
    resolve_project_timezone(None)
  })
}

/// Seeds the timezone from an already
/// loaded config, so a `--config`
/// override is honored too. First
/// resolution wins; the env var still
/// takes precedence over the config
/// value.
pub fn init_project_timezone(
  configured: Option<&str>
) -> &'static Tz {
  PROJECT_TZ.get_or_init(|| {
    resolve_project_timezone(
      configured
    )
  })
}

fn resolve_project_timezone(
  configured: Option<&str>
) -> Tz {
  if let Ok(raw) =
    std::env::var(TIMEZONE_ENV_VAR)
  {
    if let Some(tz) = parse_timezone(
      &raw,
      TIMEZONE_ENV_VAR
    ) {
      return tz;
    }
  }

  if let Some(raw) = configured
    && let Some(tz) =
      parse_timezone(raw, "config")
  {
    return tz;
  }

  if let Some(path) =
    config_file_path(None)
    && let Some(tz) =
      load_timezone_from_file(&path)
  {
    return tz;
  }

  chrono_tz::UTC
}

fn load_timezone_from_file(
  path: &std::path::Path
) -> Option<Tz> {
  if !path.exists() {
    tracing::info!(
      file = %path.display(),
      "config file not found; no \
       timezone override"
    );
    return None;
  }

  let raw =
    match std::fs::read_to_string(path)
    {
      | Ok(raw) => raw,
      | Err(err) => {
        tracing::error!(
          file = %path.display(),
          error = %err,
          "failed reading config file"
        );
        return None;
      }
    };

  let parsed = match toml::from_str::<
    TimezoneConfig
  >(&raw)
  {
    | Ok(parsed) => parsed,
    | Err(err) => {
      tracing::error!(
        file = %path.display(),
        error = %err,
        "failed parsing config file"
      );
      return None;
    }
  };

  let timezone = parsed.timezone?;
  parse_timezone(
    timezone.as_str(),
    &format!("file:{}", path.display())
  )
}

fn parse_timezone(
  raw: &str,
  source: &str
) -> Option<Tz> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    tracing::warn!(
      source,
      "timezone source was empty"
    );
    return None;
  }

  match trimmed.parse::<Tz>() {
    | Ok(tz) => {
      tracing::info!(
        source,
        timezone = %trimmed,
        "configured project timezone"
      );
      Some(tz)
    }
    | Err(err) => {
      tracing::error!(
        source,
        timezone = %trimmed,
        error = %err,
        "failed to parse timezone id"
      );
      None
    }
  }
}

/// Renders a schedule timestamp the way
/// the dashboard cell shows it: 12-hour
/// clock, or the literal "N/A" for an
/// unscheduled task.
#[must_use]
pub fn format_clock(
  dt: Option<DateTime<Utc>>
) -> String {
  match dt {
    | Some(dt) => format_clock_in(
      dt,
      *project_timezone()
    ),
    | None => "N/A".to_string()
  }
}

#[must_use]
pub fn format_clock_in(
  dt: DateTime<Utc>,
  tz: Tz
) -> String {
  dt.with_timezone(&tz)
    .format("%-I:%M %p")
    .to_string()
}

/// Re-parses a rendered time cell back
/// into minutes since midnight. Accepts
/// what the cells actually hold, an
/// `H:MM AM/PM` somewhere in the text;
/// "N/A" and anything else yield None.
#[must_use]
pub fn parse_clock_minutes(
  cell: &str
) -> Option<u32> {
  let clock_re = Regex::new(
    r"(?i)(?P<hour>\d{1,2}):(?P<minute>\d{2})\s?(?P<ampm>AM|PM)",
  )
  .ok()?;
  let captures =
    clock_re.captures(cell.trim())?;

  let raw_hour = captures
    .name("hour")?
    .as_str()
    .parse::<u32>()
    .ok()?;
  let minute = captures
    .name("minute")?
    .as_str()
    .parse::<u32>()
    .ok()?;
  if minute > 59 {
    return None;
  }
  if raw_hour == 0 || raw_hour > 12 {
    return None;
  }

  let ampm = captures
    .name("ampm")?
    .as_str()
    .to_ascii_lowercase();
  let hour = match ampm.as_str() {
    | "am" => {
      if raw_hour == 12 {
        0
      } else {
        raw_hour
      }
    }
    | "pm" => {
      if raw_hour == 12 {
        12
      } else {
        raw_hour + 12
      }
    }
    | _ => return None
  };

  Some(hour * 60 + minute)
}


pub mod iso_date_serde {
  pub mod option {
    use chrono::{
      DateTime,
      NaiveDateTime,
      TimeZone,
      Utc
    };
    use serde::{
      Deserialize,
      Deserializer,
      Serializer
    };

    pub fn serialize<S>(
      dt: &Option<DateTime<Utc>>,
      serializer: S
    ) -> Result<S::Ok, S::Error>
    where
      S: Serializer
    {
      match dt {
        | Some(value) => serializer
          .serialize_str(
            &value.to_rfc3339()
          ),
        | None => {
          serializer.serialize_none()
        }
      }
    }

    pub fn deserialize<'de, D>(
      deserializer: D
    ) -> Result<
      Option<DateTime<Utc>>,
      D::Error
    >
    where
      D: Deserializer<'de>
    {
      let opt =
        Option::<String>::deserialize(
          deserializer
        )?;
      let Some(raw) = opt else {
        return Ok(None);
      };
      let raw = raw.trim().to_string();
      if raw.is_empty() {
        return Ok(None);
      }

      if let Ok(dt) =
        DateTime::parse_from_rfc3339(
          &raw
        )
      {
        return Ok(Some(
          dt.with_timezone(&Utc)
        ));
      }

      // Some records carry a bare
      // local datetime without an
      // offset; read it in the
      // project timezone.
      for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M"
      ] {
        if let Ok(ndt) =
          NaiveDateTime::parse_from_str(
            &raw, fmt
          )
        {
          if let Some(local) =
            super::super::project_timezone()
              .from_local_datetime(&ndt)
              .earliest()
          {
            return Ok(Some(
              local
                .with_timezone(&Utc)
            ));
          }
        }
      }

      tracing::warn!(
        raw = %raw,
        "unparseable schedule \
         timestamp; treating as \
         unscheduled"
      );
      Ok(None)
    }
  }
}
