/// Configuration system for etsm.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::EtsmConfig::default()`]
/// 2. **User global config**: `~/.etsm/config.toml`
/// 3. **Project local config**: `.etsm.toml` in the current working directory
/// 4. **Environment variables**: `ETSM_*` overrides (highest precedence)
///
/// Later layers override earlier ones at the field level: a key missing
/// from `.etsm.toml` keeps its value from `~/.etsm/config.toml`. Arrays
/// such as `[[generator.companies]]` are replaced as a whole. A file that
/// fails to parse or has mistyped values is skipped with a warning, and a
/// `[generator]` section that fails validation falls back to the defaults.
///
/// The config is loaded once at process start and passed down explicitly.
/// Nothing re-reads it afterwards.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::EtsmConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved etsm configuration, logging any problems.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> EtsmConfig {
    let (config, warnings) = load_with_warnings();
    for warning in &warnings {
        log::warn!("{warning}");
    }
    config
}

/// Load the configuration and return the problems found along the way.
///
/// For callers that install a logger only after reading the config (the
/// log filter itself lives in the config).
pub fn load_with_warnings() -> (EtsmConfig, Vec<String>) {
    let mut warnings = Vec::new();

    // Layers 2 and 3: ~/.etsm/config.toml, then .etsm.toml
    let mut config = resolve_layers(
        &[global_config_path(), project_config_path()],
        &mut warnings,
    );

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    check_generator(&mut config, &mut warnings);

    (config, warnings)
}

/// Replace a `[generator]` section that fails validation with the defaults,
/// keeping its seed.
fn check_generator(config: &mut EtsmConfig, warnings: &mut Vec<String>) {
    if let Err(e) = config.generator.validate() {
        warnings.push(format!("invalid [generator] settings, using defaults: {e:#}"));
        config.generator = config.generator.defaults_with_seed();
    }
}

/// Merge the TOML files at `paths` (lowest precedence first) over the
/// built-in defaults.
fn resolve_layers(paths: &[Option<PathBuf>], warnings: &mut Vec<String>) -> EtsmConfig {
    let mut merged = toml::Table::new();
    for path in paths.iter().flatten() {
        if let Some(layer) = load_toml_file(path, warnings) {
            merge_tables(&mut merged, layer);
        }
    }

    match toml::Value::Table(merged).try_into() {
        Ok(config) => config,
        Err(e) => {
            warnings.push(format!("ignoring config files: {e}"));
            EtsmConfig::default()
        }
    }
}

/// Read one TOML layer. Returns `None` when the file doesn't exist. A file
/// that exists but fails to parse, or doesn't fit the schema, is reported
/// in `warnings` and skipped.
fn load_toml_file(path: &Path, warnings: &mut Vec<String>) -> Option<toml::Table> {
    let content = fs::read_to_string(path).ok()?;

    let table: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => {
            warnings.push(format!("ignoring malformed config {}: {e}", path.display()));
            return None;
        }
    };

    if let Err(e) = toml::Value::Table(table.clone()).try_into::<EtsmConfig>() {
        warnings.push(format!("ignoring invalid config {}: {e}", path.display()));
        return None;
    }

    Some(table)
}

/// Overlay `overlay` onto `base`, recursing into tables.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
            } else {
                base.insert(key, toml::Value::Table(incoming));
            }
        } else {
            base.insert(key, value);
        }
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.etsm/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".etsm").join("config.toml"))
}

/// Path to the project local config: `.etsm.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".etsm.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `ETSM_SEED`: master dataset seed
/// - `ETSM_MODEL`: model identifier
/// - `ETSM_API_URL`: messages endpoint URL
/// - `ETSM_MAX_TOKENS`: response length cap
/// - `ETSM_TIMEOUT_MS`: request timeout (`0` clears it)
/// - `ETSM_LOG`: log filter
/// - `ETSM_WEB_ADDR`: dashboard bind address
fn apply_env_overrides(config: &mut EtsmConfig) {
    if let Ok(val) = std::env::var("ETSM_SEED")
        && let Ok(seed) = val.parse::<u64>()
    {
        config.generator.seed = Some(seed);
    }

    if let Ok(val) = std::env::var("ETSM_MODEL")
        && !val.is_empty()
    {
        config.insight.model = val;
    }
    if let Ok(val) = std::env::var("ETSM_API_URL")
        && !val.is_empty()
    {
        config.insight.api_url = val;
    }
    if let Ok(val) = std::env::var("ETSM_MAX_TOKENS")
        && let Ok(n) = val.parse::<u32>()
    {
        config.insight.max_tokens = n;
    }
    if let Ok(val) = std::env::var("ETSM_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.insight.timeout_ms = (ms > 0).then_some(ms);
    }

    if let Ok(val) = std::env::var("ETSM_LOG")
        && !val.is_empty()
    {
        config.logging.level = val;
    }

    if let Ok(val) = std::env::var("ETSM_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
}

// ---------------------------------------------------------------------------
// Config init / show
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.etsm/config.toml`.
///
/// Creates the `~/.etsm/` directory if it doesn't exist. Returns an error
/// if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.etsm/ directory")?;
    }

    fs::write(&path, EtsmConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Render a resolved config as TOML.
pub fn to_toml(config: &EtsmConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_toml(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("etsm-{name}-{}.toml", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_toml_file_returns_none_for_missing_path() {
        let mut warnings = Vec::new();
        let missing = std::env::temp_dir().join("etsm-definitely-missing.toml");
        assert!(load_toml_file(&missing, &mut warnings).is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn load_toml_file_skips_malformed_content() {
        let path = temp_toml("bad", "[generator\nyear = ");
        let mut warnings = Vec::new();
        assert!(load_toml_file(&path, &mut warnings).is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("malformed"));
        assert!(warnings[0].contains(&path.display().to_string()));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_toml_file_skips_mistyped_values() {
        let path = temp_toml("mistyped", "[generator]\nyear = \"soon\"\n");
        let mut warnings = Vec::new();
        assert!(load_toml_file(&path, &mut warnings).is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(&path.display().to_string()));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_toml_file_reads_valid_content() {
        let path = temp_toml("good", "[web]\naddr = \"0.0.0.0:9000\"\n");
        let mut warnings = Vec::new();
        let table = load_toml_file(&path, &mut warnings).unwrap();
        assert_eq!(table["web"]["addr"].as_str(), Some("0.0.0.0:9000"));
        assert!(warnings.is_empty());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn later_layers_override_individual_fields() {
        let global = temp_toml(
            "layer-global",
            "[web]\naddr = \"0.0.0.0:9000\"\n\n[insight]\nmodel = \"global-model\"\nmax_tokens = 2048\n",
        );
        let project = temp_toml("layer-project", "[insight]\nmodel = \"project-model\"\n");
        let mut warnings = Vec::new();

        let config = resolve_layers(&[Some(global.clone()), Some(project.clone())], &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(config.web.addr, "0.0.0.0:9000");
        assert_eq!(config.insight.model, "project-model");
        assert_eq!(config.insight.max_tokens, 2048);
        assert_eq!(config.generator, schema::GeneratorConfig::default());
        let _ = fs::remove_file(global);
        let _ = fs::remove_file(project);
    }

    #[test]
    fn bad_layer_is_skipped_and_others_still_apply() {
        let global = temp_toml("skip-global", "[web]\naddr = \"0.0.0.0:9100\"\n");
        let project = temp_toml("skip-project", "[web\naddr = ");
        let mut warnings = Vec::new();

        let config = resolve_layers(
            &[Some(global.clone()), None, Some(project.clone())],
            &mut warnings,
        );

        assert_eq!(config.web.addr, "0.0.0.0:9100");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains(&project.display().to_string()));
        let _ = fs::remove_file(global);
        let _ = fs::remove_file(project);
    }

    #[test]
    fn invalid_generator_section_falls_back_with_warning() {
        let project = temp_toml(
            "invalid-generator",
            "[generator]\nseed = 9\nyear = -3\nrevenue_per_call = -1.0\n",
        );
        let mut warnings = Vec::new();
        let mut config = resolve_layers(&[Some(project.clone())], &mut warnings);
        assert!(warnings.is_empty());

        check_generator(&mut config, &mut warnings);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("invalid [generator] settings"));
        assert_eq!(config.generator.seed, Some(9));
        assert_eq!(config.generator.year, schema::GeneratorConfig::default().year);
        assert!(config.generator.validate().is_ok());
        let _ = fs::remove_file(project);
    }

    #[test]
    fn valid_generator_section_is_kept() {
        let mut config = EtsmConfig::default();
        config.generator.year = 2030;
        let mut warnings = Vec::new();
        check_generator(&mut config, &mut warnings);
        assert!(warnings.is_empty());
        assert_eq!(config.generator.year, 2030);
    }

    #[test]
    fn merge_tables_recurses_and_replaces_arrays() {
        let mut base: toml::Table = toml::from_str(
            "[generator]\nseed = 1\nyear = 2023\n[[generator.companies]]\nname = \"A\"\n[[generator.companies]]\nname = \"B\"\n",
        )
        .unwrap();
        let overlay: toml::Table = toml::from_str(
            "[generator]\nyear = 2025\n[[generator.companies]]\nname = \"C\"\n",
        )
        .unwrap();

        merge_tables(&mut base, overlay);

        let generator = base["generator"].as_table().unwrap();
        assert_eq!(generator["seed"].as_integer(), Some(1));
        assert_eq!(generator["year"].as_integer(), Some(2025));
        let companies = generator["companies"].as_array().unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0]["name"].as_str(), Some("C"));
    }

    #[test]
    fn to_toml_is_parseable() {
        let toml_str = to_toml(&EtsmConfig::default()).unwrap();
        let _: EtsmConfig = toml::from_str(&toml_str).unwrap();
    }

    #[test]
    fn config_paths_use_etsm_names() {
        if let Some(global) = global_config_file() {
            assert!(global.ends_with(".etsm/config.toml"));
        }
        if let Some(project) = project_config_file() {
            assert!(project.ends_with(".etsm.toml"));
        }
    }
}
