// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Error;
use crate::memoize::MemoizeOptions;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
#[allow(deprecated)]
use std::env::home_dir;
use std::fs::read_to_string;

/// Configuration parameters for various features.
#[derive(Debug)]
pub struct WadConfig {
    debug_enabled: bool,
    toml: String,
}

impl WadConfig {
    /// Creates a configuration builder.
    pub fn builder() -> WadConfigBuilder {
        WadConfigBuilder {
            wad_config: None,
            debug_enabled: false,
            error: None,
        }
    }

    /// Returns `true` if debug is enabled.
    pub fn debug(&self) -> bool {
        self.debug_enabled
    }

    /// Returns configuration parameters.
    pub fn get<T: DeserializeOwned>(&self) -> Result<T, Error> {
        toml::from_str(&self.toml).map_err(|e: toml::de::Error| Error::Toml(format!("{e}")))
    }

    /// Returns the `[memoize.<name>]` table, or defaults if there is none.
    pub fn memoize_options(&self, name: &str) -> Result<MemoizeOptions, Error> {
        #[derive(Deserialize)]
        struct ConfigToml {
            #[serde(default)]
            memoize: HashMap<String, MemoizeOptions>,
        }
        let ConfigToml { mut memoize } = self.get()?;
        Ok(memoize.remove(name).unwrap_or_default())
    }
}

/// Builds a `WadConfig` from a TOML file or string.
pub struct WadConfigBuilder {
    wad_config: Option<WadConfig>,
    debug_enabled: bool,
    error: Option<Error>,
}

impl WadConfigBuilder {
    /// Returns the configuration, or the first error encountered while building it.
    pub fn build(self) -> Result<WadConfig, Error> {
        if let Some(error) = self.error {
            Err(error)
        } else if let Some(wad_config) = self.wad_config {
            Ok(wad_config)
        } else {
            Err(Error::String("config not set".to_string()))
        }
    }

    /// Echo log lines to stdout.
    pub fn debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        if let Some(wad_config) = self.wad_config.as_mut() {
            wad_config.debug_enabled = debug_enabled;
        }
        self
    }

    /// Reads `~/<file_name>`, falling back to `./<file_name>`.
    pub fn toml_file(self, file_name: &str) -> Self {
        #[allow(deprecated)]
        let home_path = home_dir()
            .and_then(|pathbuf| pathbuf.to_str().map(|path| format!("{path}/{file_name}")));
        let local_path = format!("./{file_name}");
        match home_path
            .and_then(|path| read_to_string(path).ok())
            .map(Ok)
            .unwrap_or_else(|| {
                read_to_string(&local_path)
                    .map_err(|_| Error::String(format!("{local_path}: cannot read")))
            }) {
            Ok(toml) => self.toml_string(toml),
            Err(e) => Self {
                wad_config: None,
                debug_enabled: self.debug_enabled,
                error: Some(e),
            },
        }
    }

    /// Uses the given TOML text.
    pub fn toml_str(self, toml: &str) -> Self {
        self.toml_string(toml.to_string())
    }

    /// Uses the given TOML text.
    pub fn toml_string(self, toml: String) -> Self {
        Self {
            wad_config: Some(WadConfig {
                debug_enabled: self.debug_enabled,
                toml,
            }),
            debug_enabled: self.debug_enabled,
            error: None,
        }
    }
}
