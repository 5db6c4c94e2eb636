use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable naming the store file when `--store` is absent.
pub const STORE_ENV: &str = "STYLEPAD_STORE";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub store: Option<PathBuf>,
    pub no_autosave: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans accumulate, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            store: other.store.clone().or_else(|| self.store.clone()),
            no_autosave: self.no_autosave || other.no_autosave,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    platform_dir("XDG_CONFIG_HOME", &[".config"])
        .map_or_else(local_override_path, |dir| dir.join("stylepad").join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".stylepadrc")
}

/// Store file used when neither `--store` nor [`STORE_ENV`] names one.
pub fn default_store_path() -> PathBuf {
    platform_dir("XDG_DATA_HOME", &[".local", "share"]).map_or_else(
        || PathBuf::from("stylepad-storage.json"),
        |dir| dir.join("stylepad").join("storage.json"),
    )
}

/// Store path by precedence: flags, then [`STORE_ENV`], then the default.
pub fn resolve_store_path(flags: &ConfigFlags) -> PathBuf {
    flags
        .store
        .clone()
        .or_else(|| std::env::var_os(STORE_ENV).map(PathBuf::from))
        .unwrap_or_else(default_store_path)
}

/// Log file used when `--log-file` is absent, or `None` when there is no
/// per-user state directory.
pub fn default_log_path() -> Option<PathBuf> {
    platform_dir("XDG_STATE_HOME", &[".local", "state"])
        .map(|dir| dir.join("stylepad").join("stylepad.log"))
}

/// Log path by precedence: flags, then the default. The terminal belongs
/// to the editor, so logs never go to stderr.
pub fn resolve_log_path(flags: &ConfigFlags) -> Option<PathBuf> {
    flags.log_file.clone().or_else(default_log_path)
}

/// Per-user base directory. On Linux and other Unixes this is `xdg_var`,
/// falling back to `$HOME` joined with `home_suffix`.
#[cfg_attr(
    any(target_os = "windows", target_os = "macos"),
    allow(unused_variables)
)]
fn platform_dir(xdg_var: &str, home_suffix: &[&str]) -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support"),
            );
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os(xdg_var) {
            return Some(PathBuf::from(xdg));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                home_suffix
                    .iter()
                    .fold(PathBuf::from(home), |path, part| path.join(part)),
            );
        }
    }

    None
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# stylepad defaults (saved with --save)".to_string());
    if let Some(store) = &flags.store {
        lines.push(format!("--store {}", store.display()));
    }
    if flags.no_autosave {
        lines.push("--no-autosave".to_string());
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of a token list; anything else is ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-autosave" {
            flags.no_autosave = true;
        } else if token == "--store" {
            if let Some(next) = tokens.get(i + 1) {
                flags.store = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--store=") {
            flags.store = Some(PathBuf::from(value));
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}
