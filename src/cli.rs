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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::check::check_file;
use crate::cmd::drill::server::DrillOptions;
use crate::cmd::drill::server::start_server;
use crate::cmd::export::export_file;
use crate::config::Config;
use crate::error::Fallible;
use crate::ingest::HeaderRule;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill cards in the browser.
    Drill {
        /// Optional spreadsheet to load on startup. Others can be uploaded from the page.
        file: Option<String>,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<String>,
        /// The host address to bind to.
        #[arg(long)]
        host: Option<String>,
        /// The port to use for the web server.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser automatically.
        #[arg(long)]
        no_open: bool,
        /// Keep the first row even if it looks like a header.
        #[arg(long)]
        keep_header: bool,
    },
    /// Check that a spreadsheet can be loaded.
    Check {
        /// Path to the spreadsheet.
        file: String,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<String>,
        /// Keep the first row even if it looks like a header.
        #[arg(long)]
        keep_header: bool,
    },
    /// Export the cards in a spreadsheet as JSON.
    Export {
        /// Path to the spreadsheet.
        file: String,
        /// Write to this file instead of stdout.
        #[arg(long, short)]
        output: Option<String>,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<String>,
        /// Keep the first row even if it looks like a header.
        #[arg(long)]
        keep_header: bool,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            file,
            config,
            host,
            port,
            no_open,
            keep_header,
        } => {
            let config = load_config(config, keep_header)?;
            let options = DrillOptions {
                file: file.map(PathBuf::from),
                host: host.unwrap_or(config.server.host),
                port: port.unwrap_or(config.server.port),
                open_browser: config.server.open_browser && !no_open,
                rule: config.header,
            };
            start_server(options).await
        }
        Command::Check {
            file,
            config,
            keep_header,
        } => {
            let config = load_config(config, keep_header)?;
            check_file(&PathBuf::from(file), &config.header)
        }
        Command::Export {
            file,
            output,
            config,
            keep_header,
        } => {
            let config = load_config(config, keep_header)?;
            let output = output.map(PathBuf::from);
            export_file(&PathBuf::from(file), output.as_deref(), &config.header)
        }
    }
}

fn load_config(path: Option<String>, keep_header: bool) -> Fallible<Config> {
    let mut config = Config::load(path)?;
    if keep_header {
        config.header = HeaderRule::disabled();
    }
    Ok(config)
}
