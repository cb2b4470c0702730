/// Configuration system for bannerdash.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — [`schema::BannerdashConfig::default()`]
/// 2. **User global config** — `~/.bannerdash/config.toml`
/// 3. **Project local config** — `.bannerdash.toml` in the current directory
/// 4. **Environment variables** — `BANNERDASH_*` overrides (highest precedence)
///
/// Missing sections in a TOML file fall back to defaults. Malformed files are
/// ignored rather than aborting the dashboard.
///
/// # Usage
///
/// ```rust,ignore
/// use bannerdash::config;
///
/// let cfg = config::load();
/// if cfg.insights.enabled {
///     // ...
/// }
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::BannerdashConfig;

use crate::locale::Language;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> BannerdashConfig {
    let mut config = load_layers(&[global_config_path(), project_config_path()]);
    apply_env_overrides(&mut config);
    config
}

/// Deep-merge the given TOML files in order, then deserialize once.
///
/// A key set in a later file overrides the same key in an earlier one;
/// keys a file does not mention keep their earlier value or the default.
fn load_layers(paths: &[Option<PathBuf>]) -> BannerdashConfig {
    let mut merged = toml::Value::Table(toml::map::Map::new());
    for path in paths {
        if let Some(layer) = load_toml_layer(path.as_deref()) {
            merge_toml(&mut merged, layer);
        }
    }
    merged.try_into().unwrap_or_default()
}

/// Read one TOML config layer as a raw value tree.
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed or does not fit the config schema.
fn load_toml_layer(path: Option<&Path>) -> Option<toml::Value> {
    let content = fs::read_to_string(path?).ok()?;
    let value: toml::Value = toml::from_str(&content).ok()?;
    value.clone().try_into::<BannerdashConfig>().ok()?;
    Some(value)
}

/// Overlay `overlay` onto `base`, table by table. Non-table values replace.
fn merge_toml(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Directory holding the global config and the activity log.
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bannerdash"))
}

fn global_config_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".bannerdash.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix('~') {
        Some(rest) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            dirs::home_dir().map(|home| home.join(rest))
        }
        None => Some(PathBuf::from(path)),
    }
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `BANNERDASH_LANGUAGE` — `ko` or `en`
/// - `BANNERDASH_INSIGHTS` — insight requests enabled (`1`/`true`/`yes`/`on`)
/// - `BANNERDASH_MODEL` — model name
/// - `BANNERDASH_API_KEY` — API key (falls back to `GEMINI_API_KEY`)
/// - `BANNERDASH_WEB_ADDR` — dashboard listen address
/// - `BANNERDASH_LOG` — activity logging enabled
fn apply_env_overrides(config: &mut BannerdashConfig) {
    if let Ok(val) = std::env::var("BANNERDASH_LANGUAGE")
        && let Some(language) = Language::parse(&val)
    {
        config.general.language = language;
    }

    if let Ok(val) = std::env::var("BANNERDASH_INSIGHTS") {
        config.insights.enabled = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("BANNERDASH_MODEL")
        && !val.is_empty()
    {
        config.insights.model = val;
    }
    if let Some(key) = ["BANNERDASH_API_KEY", "GEMINI_API_KEY"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|v| !v.trim().is_empty())
    {
        config.insights.api_key = key;
    }

    if let Ok(val) = std::env::var("BANNERDASH_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }

    if let Ok(val) = std::env::var("BANNERDASH_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.bannerdash/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.bannerdash/ directory")?;
    }

    fs::write(&path, BannerdashConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key (dotted, e.g. `insights.model`) in the global
/// config file, creating it from defaults when missing.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&BannerdashConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    // Reject values that would make the file unloadable (e.g. bad enum).
    let check = toml::to_string_pretty(&root).context("failed to serialize config")?;
    toml::from_str::<BannerdashConfig>(&check)
        .with_context(|| format!("invalid value '{value}' for '{key}'"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, check).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The existing value's type decides how `raw_value` is parsed.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section_path, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be dotted, e.g. 'general.language'");
    };

    let mut current = root;
    for part in section_path.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section_path}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective config with the API key masked, for display.
pub fn masked_config() -> BannerdashConfig {
    let mut config = load();
    if config.insights.api_key().is_some() {
        config.insights.api_key = "********".to_string();
    }
    config
}

/// Show the effective (fully resolved) config as TOML, with the API key
/// masked.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&masked_config()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bannerdash-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn layers_merge_key_by_key() {
        let global = temp_config(
            "global.toml",
            "[insights]\napi_key = \"GLOBALKEY\"\nmodel = \"my-model\"\n",
        );
        let project = temp_config("project.toml", "[general]\nlanguage = \"en\"\n");

        let config = load_layers(&[Some(global.clone()), Some(project.clone())]);
        assert_eq!(config.general.language, Language::English);
        assert_eq!(config.insights.api_key, "GLOBALKEY");
        assert_eq!(config.insights.model, "my-model");
        assert!(config.insights.enabled);
        assert_eq!(config.web.addr, "127.0.0.1:9747");

        let _ = fs::remove_file(global);
        let _ = fs::remove_file(project);
    }

    #[test]
    fn later_layer_overrides_same_key() {
        let global = temp_config("g2.toml", "[insights]\nmodel = \"a\"\ntimeout_ms = 5000\n");
        let project = temp_config("p2.toml", "[insights]\nmodel = \"b\"\n");

        let config = load_layers(&[Some(global.clone()), Some(project.clone())]);
        assert_eq!(config.insights.model, "b");
        assert_eq!(config.insights.timeout_ms, 5000);

        let _ = fs::remove_file(global);
        let _ = fs::remove_file(project);
    }

    #[test]
    fn malformed_or_missing_layers_are_skipped() {
        let global = temp_config("g3.toml", "[general]\nlanguage = \"en\"\n");
        let broken = temp_config("p3.toml", "[general]\nlanguage = \"klingon\"\n");

        let config = load_layers(&[Some(global.clone()), Some(broken.clone()), None]);
        assert_eq!(config.general.language, Language::English);

        let missing = std::env::temp_dir().join("bannerdash-no-such-config.toml");
        let config = load_layers(&[Some(missing)]);
        assert_eq!(config.general.language, Language::Korean);

        let _ = fs::remove_file(global);
        let _ = fs::remove_file(broken);
    }

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("On"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn set_toml_value_updates_string() {
        let mut root: toml::Value = toml::from_str("[general]\nlanguage = \"ko\"\n").unwrap();
        set_toml_value(&mut root, "general.language", "en").unwrap();
        assert_eq!(root["general"]["language"].as_str(), Some("en"));
    }

    #[test]
    fn set_toml_value_updates_bool_and_integer() {
        let mut root: toml::Value =
            toml::from_str("[insights]\nenabled = true\ntimeout_ms = 30000\n").unwrap();
        set_toml_value(&mut root, "insights.enabled", "off").unwrap();
        set_toml_value(&mut root, "insights.timeout_ms", "5000").unwrap();
        assert_eq!(root["insights"]["enabled"].as_bool(), Some(false));
        assert_eq!(root["insights"]["timeout_ms"].as_integer(), Some(5000));
    }

    #[test]
    fn set_toml_value_updates_float() {
        let mut root: toml::Value = toml::from_str("[insights]\ntemperature = 0.7\n").unwrap();
        set_toml_value(&mut root, "insights.temperature", "0.2").unwrap();
        let t = root["insights"]["temperature"].as_float().unwrap();
        assert!((t - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn set_toml_value_rejects_bad_keys_and_types() {
        let mut root: toml::Value = toml::from_str("[insights]\ntimeout_ms = 1\n").unwrap();
        assert!(set_toml_value(&mut root, "nonexistent.key", "v").is_err());
        assert!(set_toml_value(&mut root, "insights.unknown", "v").is_err());
        assert!(set_toml_value(&mut root, "insights.timeout_ms", "soon").is_err());
        assert!(set_toml_value(&mut root, "undotted", "v").is_err());
    }

    #[test]
    fn expand_home_handles_tilde_and_plain_paths() {
        assert_eq!(expand_home("/tmp/log.jsonl"), Some(PathBuf::from("/tmp/log.jsonl")));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home("~/.bannerdash/activity.jsonl"),
                Some(home.join(".bannerdash/activity.jsonl"))
            );
        }
    }

    #[test]
    fn show_effective_config_returns_toml() {
        let toml_str = show_effective_config().unwrap();
        let _: BannerdashConfig = toml::from_str(&toml_str).unwrap();
    }
}
