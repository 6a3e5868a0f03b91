// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::ingest::HeaderRule;

/// Name of the configuration file looked up in the current directory when no
/// path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sheetcards.toml";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub header: HeaderRule,
    pub server: ServerConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to open the drill page in the browser once the server is up.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            open_browser: true,
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Fallible<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Fallible<Self> {
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load the configuration. An explicit path must exist; otherwise the
    /// default file is used if present, and built-in defaults if not.
    pub fn load(path: Option<String>) -> Fallible<Self> {
        match path {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return fail("config file does not exist.");
                }
                log::debug!("Loading config from {}", path.display());
                Self::from_path(&path)
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    log::debug!("Loading config from {}", path.display());
                    Self::from_path(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
