// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `./toolport.toml` > `~/.config/toolport/toolport.toml` >
//! `/etc/toolport/toolport.toml`, with `TOOLPORT_` environment variables on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ToolportConfig;

/// Top-level sections that environment variables may address.
const SECTIONS: &[&str] = &["server", "gemini", "image", "weather", "upstream"];

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/toolport/toolport.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "toolport.toml";

/// Per-user config file under the XDG config directory, if one exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("toolport").join(LOCAL_CONFIG_FILE))
}

/// Build the layered Figment without extracting it.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/toolport/toolport.toml`
/// 3. `~/.config/toolport/toolport.toml`
/// 4. `./toolport.toml`
/// 5. `TOOLPORT_*` environment variables
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ToolportConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<ToolportConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an explicit file path (no hierarchy lookup),
/// still honouring env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ToolportConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ToolportConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string over the compiled defaults.
pub fn load_config_from_str(toml_content: &str) -> Result<ToolportConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ToolportConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Environment provider mapping `TOOLPORT_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the section prefix is split off, so keys that contain underscores
/// (`TOOLPORT_GEMINI_API_KEY` -> `gemini.api_key`) stay intact.
fn env_provider() -> Env {
    Env::prefixed("TOOLPORT_").map(|key| section_key(key.as_str()).into())
}

fn section_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
