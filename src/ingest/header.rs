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

use serde::Deserialize;

use crate::ingest::decode::Cell;
use crate::ingest::decode::Row;

const DEFAULT_ALIASES: [&str; 3] = ["front", "eng", "english"];

/// Decides whether the first row of a sheet is a header.
///
/// Row 0 is treated as a header when its `front` cell is text equal, ignoring
/// case, to one of the aliases. Nothing else is inspected, so a data row whose
/// front term happens to be an alias is dropped as well.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderRule {
    /// Whether to apply the rule at all.
    pub skip: bool,
    pub aliases: Vec<String>,
}

impl HeaderRule {
    pub fn disabled() -> Self {
        Self {
            skip: false,
            aliases: Vec::new(),
        }
    }

    pub fn is_header(&self, row: &Row) -> bool {
        if !self.skip {
            return false;
        }
        match &row.front {
            Cell::Text(value) => {
                let value = value.to_lowercase();
                self.aliases.iter().any(|alias| alias.to_lowercase() == value)
            }
            _ => false,
        }
    }
}

impl Default for HeaderRule {
    fn default() -> Self {
        Self {
            skip: true,
            aliases: DEFAULT_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
