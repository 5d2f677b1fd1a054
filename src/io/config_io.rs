use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::config::MentionConfig;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "mention.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config document: {0}")]
    Document(#[from] toml_edit::TomlError),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Read the config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
///
/// A missing file yields defaults and an empty document.
pub fn read_config(path: &Path) -> Result<(MentionConfig, toml_edit::DocumentMut), ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!(target: "mention.config", "{} not found, using defaults", path.display());
            String::new()
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let config: MentionConfig = toml::from_str(&text)?;
    let doc: toml_edit::DocumentMut = text.parse()?;
    Ok((config, doc))
}

/// Parsed config only.
pub fn load_config(path: &Path) -> Result<MentionConfig, ConfigError> {
    read_config(path).map(|(config, _)| config)
}

/// Set a dotted key such as `complete.min_similarity`.
///
/// The value is stored as a TOML number or boolean when it parses as one,
/// otherwise as a string. The edited document must still parse into a
/// valid config.
pub fn set_value(
    doc: &mut toml_edit::DocumentMut,
    key: &str,
    value: &str,
) -> Result<MentionConfig, ConfigError> {
    let (table, field) = key
        .split_once('.')
        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    let known = match table {
        "complete" => matches!(field, "trigger" | "max_results" | "browse_limit" | "min_similarity"),
        "ui" => field == "max_visible" || field.starts_with("colors."),
        _ => false,
    };
    if !known {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let mut item = &mut doc[table];
    for part in field.split('.') {
        if item.is_none() {
            *item = toml_edit::table();
        }
        item = &mut item[part];
    }
    *item = toml_edit::value(parse_scalar(value));

    let config: MentionConfig = toml::from_str(&doc.to_string())?;
    Ok(config)
}

fn parse_scalar(value: &str) -> toml_edit::Value {
    if let Ok(i) = value.parse::<i64>() {
        return i.into();
    }
    if let Ok(f) = value.parse::<f64>() {
        return f.into();
    }
    if let Ok(b) = value.parse::<bool>() {
        return b.into();
    }
    value.into()
}

/// Atomically write the document back to `path`, preserving formatting.
pub fn write_config(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let write_err = |e: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(doc.to_string().as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_config() -> &'static str {
        r##"# team defaults
[complete]
max_results = 5 # keep it short

[ui.colors]
highlight = "#FB4196"
"##
    }

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let (config, doc) = read_config(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, MentionConfig::default());
        assert_eq!(doc.to_string(), "");
    }

    #[test]
    fn round_trip_preserves_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, sample_config()).unwrap();

        let (config, doc) = read_config(&path).unwrap();
        assert_eq!(config.complete.max_results, 5);
        write_config(&path, &doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), sample_config());
    }

    #[test]
    fn set_number_keeps_other_lines() {
        let mut doc: toml_edit::DocumentMut = sample_config().parse().unwrap();
        let config = set_value(&mut doc, "complete.min_similarity", "0.25").unwrap();
        assert_eq!(config.complete.min_similarity, 0.25);
        assert_eq!(config.complete.max_results, 5);
        let text = doc.to_string();
        assert!(text.contains("# team defaults"));
        assert!(text.contains("min_similarity = 0.25"));
    }

    #[test]
    fn set_creates_missing_tables() {
        let mut doc = toml_edit::DocumentMut::new();
        let config = set_value(&mut doc, "ui.colors.selection_bg", "#112233").unwrap();
        assert_eq!(
            config.ui.colors.get("selection_bg").map(String::as_str),
            Some("#112233")
        );
    }

    #[test]
    fn set_trigger_as_string() {
        let mut doc = toml_edit::DocumentMut::new();
        let config = set_value(&mut doc, "complete.trigger", "+").unwrap();
        assert_eq!(config.complete.trigger, '+');
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut doc = toml_edit::DocumentMut::new();
        assert!(matches!(
            set_value(&mut doc, "complete.colour", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            set_value(&mut doc, "nodot", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn invalid_value_fails_validation() {
        let mut doc = toml_edit::DocumentMut::new();
        assert!(matches!(
            set_value(&mut doc, "complete.max_results", "lots"),
            Err(ConfigError::Parse(_))
        ));
    }
}
