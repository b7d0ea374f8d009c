/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! rc file parsing and credential resolution.
//!
//! Each credential field is taken from the command line when given, else from the environment,
//! else from the rc file (`~/.flickrrc` unless `--rc` or `FLICKR_RC` say otherwise).

use crate::flickr::Creds;
use clap::Args;
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

pub const KEY_ENV: &str = "FLICKR_KEY";
pub const SECRET_ENV: &str = "FLICKR_SECRET";
pub const TOKEN_ENV: &str = "FLICKR_TOKEN";
pub const RC_ENV: &str = "FLICKR_RC";

/// rc file name looked up in the home directory
pub const DEFAULT_RC_NAME: &str = ".flickrrc";

static LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)=(.*?)\s*$").expect("valid regex"));

/// key/value pairs read from an rc file
pub type ConfigMap = HashMap<String, String>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },

    #[error("missing {field}; use --{field}, {env} or add {field}= to the rc file")]
    MissingCredential {
        field: &'static str,
        env: &'static str,
    },
}

/// Credential flags shared by both tools
#[derive(Debug, Default, Clone, Args)]
pub struct CredentialArgs {
    /// API key
    #[arg(long)]
    pub key: Option<String>,

    /// API shared secret
    #[arg(long)]
    pub secret: Option<String>,

    /// Authentication token
    #[arg(long)]
    pub token: Option<String>,

    /// rc file holding key=, secret= and token= lines
    #[arg(long, value_name = "FILE")]
    pub rc: Option<PathBuf>,
}

/// Parses `key=value` lines. A path that is not a regular file yields an empty map.
pub fn read_config(path: &Path) -> Result<ConfigMap, ConfigError> {
    let mut config = ConfigMap::new();
    if !path.is_file() {
        return Ok(config);
    }
    let unreadable = |source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(unreadable)?);
    // Raw lines, so a stray non-UTF-8 byte only spoils its own line
    for line in reader.split(b'\n') {
        let line = line.map_err(unreadable)?;
        let text = String::from_utf8_lossy(&line);
        let text = text.split('#').next().unwrap_or_default();
        if let Some(caps) = LINE_RE.captures(text) {
            config.insert(caps[1].to_string(), caps[2].to_string());
        }
    }
    Ok(config)
}

/// `--rc`, then `FLICKR_RC`, then `~/.flickrrc`
pub fn rc_path(
    args: &CredentialArgs,
    env: impl Fn(&str) -> Option<String>,
) -> Option<PathBuf> {
    args.rc
        .clone()
        .or_else(|| env(RC_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| dirs::home_dir().map(|home| home.join(DEFAULT_RC_NAME)))
}

/// Resolves every credential field as CLI > environment > rc file
pub fn resolve_creds(
    args: &CredentialArgs,
    config: &ConfigMap,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Creds, ConfigError> {
    let pick = |cli: &Option<String>, field: &'static str, env_name: &'static str| {
        cli.clone()
            .filter(|v| !v.is_empty())
            .or_else(|| env(env_name).filter(|v| !v.is_empty()))
            .or_else(|| config.get(field).cloned().filter(|v| !v.is_empty()))
            .ok_or(ConfigError::MissingCredential {
                field,
                env: env_name,
            })
    };
    let key = pick(&args.key, "key", KEY_ENV)?;
    let secret = pick(&args.secret, "secret", SECRET_ENV)?;
    let token = pick(&args.token, "token", TOKEN_ENV)?;
    Ok(Creds::from_tokens(&key, &secret, &token))
}

/// Environment lookup used by the binaries
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Reads the rc file and resolves credentials from the real process environment
pub fn load_creds(args: &CredentialArgs) -> Result<Creds, ConfigError> {
    let config = match rc_path(args, process_env) {
        Some(path) => read_config(&path)?,
        None => ConfigMap::new(),
    };
    resolve_creds(args, &config, process_env)
}
