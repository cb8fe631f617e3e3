/// External configuration loader.
///
/// Reads `config.toml` from `--config`, the executable's directory, the
/// current directory, or `$XDG_CONFIG_HOME/bfl` (first hit wins).
/// Falls back to defaults if the file is missing or incomplete.
///
/// Timings and box geometry are fixed and deliberately not exposed here.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::palette::ColorDepth;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnConfig {
    pub color: ColorSetting,
    pub keep_file: bool,
    pub log: LogConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSetting {
    Auto,
    Fixed(ColorDepth),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log sink while the screen is taken over. `None` = stderr.
    pub file: Option<PathBuf>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_color")]
    color: String,
    #[serde(default)]
    keep_file: bool,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_level")]
    level: String,
    #[serde(default)]
    file: String,
}

// ── Defaults ──

fn default_color() -> String {
    "auto".into()
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            color: default_color(),
            keep_file: false,
        }
    }
}

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

impl Default for BurnConfig {
    fn default() -> Self {
        BurnConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl BurnConfig {
    /// Load from `explicit` if given, else search the candidate dirs.
    /// Problems are reported on stderr and never fatal: logging is not up yet.
    pub fn load(explicit: Option<&Path>) -> Self {
        let toml_cfg = match explicit {
            Some(path) => read_toml(path).unwrap_or_default(),
            None => candidate_dirs()
                .iter()
                .map(|d| d.join("config.toml"))
                .find(|p| p.is_file())
                .and_then(|p| read_toml(&p))
                .unwrap_or_default(),
        };
        BurnConfig::from_toml(toml_cfg)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(BurnConfig::from_toml)
    }

    /// The colour depth to resolve the palette with.
    pub fn color_depth(&self) -> ColorDepth {
        match self.color {
            ColorSetting::Auto => ColorDepth::detect(),
            ColorSetting::Fixed(depth) => depth,
        }
    }

    fn from_toml(t: TomlConfig) -> Self {
        let color = if t.general.color.trim().eq_ignore_ascii_case("auto") {
            ColorSetting::Auto
        } else {
            match ColorDepth::from_setting(&t.general.color) {
                Some(depth) => ColorSetting::Fixed(depth),
                None => {
                    eprintln!("Warning: unknown color setting {:?}, using auto.", t.general.color);
                    ColorSetting::Auto
                }
            }
        };
        let file = t.log.file.trim();

        BurnConfig {
            color,
            keep_file: t.general.keep_file,
            log: LogConfig {
                level: t.log.level,
                file: (!file.is_empty()).then(|| PathBuf::from(file)),
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD + XDG config (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.contains(&cwd) {
            dirs.push(cwd);
        }
    }

    // 3. $XDG_CONFIG_HOME/bfl, or ~/.config/bfl
    let xdg = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")));
    if let Some(base) = xdg {
        let dir = base.join("bfl");
        if dir.is_dir() && !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }

    dirs
}

fn read_toml(path: &Path) -> Option<TomlConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => match toml::from_str::<TomlConfig>(&text) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!("Warning: {} parse error: {e}", path.display());
                eprintln!("Using default settings.");
                None
            }
        },
        Err(e) => {
            eprintln!("Warning: could not read {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = BurnConfig::parse("").unwrap();
        assert_eq!(cfg, BurnConfig::default());
        assert_eq!(cfg.color, ColorSetting::Auto);
        assert!(!cfg.keep_file);
        assert_eq!(cfg.log.level, "warn");
        assert_eq!(cfg.log.file, None);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = BurnConfig::parse("[general]\ncolor = \"8\"\n").unwrap();
        assert_eq!(cfg.color, ColorSetting::Fixed(ColorDepth::Basic));
        assert_eq!(cfg.color_depth(), ColorDepth::Basic);
        assert!(!cfg.keep_file);
        assert_eq!(cfg.log.level, "warn");
    }

    #[test]
    fn full_file() {
        let text = r#"
            [general]
            color = "none"
            keep_file = true

            [log]
            level = "debug"
            file = "/tmp/bfl.log"
        "#;
        let cfg = BurnConfig::parse(text).unwrap();
        assert_eq!(cfg.color, ColorSetting::Fixed(ColorDepth::None));
        assert!(cfg.keep_file);
        assert_eq!(cfg.log.level, "debug");
        assert_eq!(cfg.log.file, Some(PathBuf::from("/tmp/bfl.log")));
    }

    #[test]
    fn unknown_color_falls_back_to_auto() {
        let cfg = BurnConfig::parse("[general]\ncolor = \"sepia\"\n").unwrap();
        assert_eq!(cfg.color, ColorSetting::Auto);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(BurnConfig::parse("[general\ncolor = ").is_err());
        assert!(BurnConfig::parse("[general]\nkeep_file = \"yes\"\n").is_err());
    }
}
