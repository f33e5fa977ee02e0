//! CLI subcommands — inject, retrieve, validate, init.

use crate::core::config::EngineConfig;
use crate::core::injector::Injector;
use crate::core::notation;
use crate::core::payload;
use crate::core::validator::Validator;
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Default config file name written by `init`.
pub const CONFIG_FILE: &str = "dynvars.yaml";

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a {target, dependencies} JSON payload
    Inject {
        /// Payload file ("-" reads stdin)
        #[arg(short, long, default_value = "-")]
        payload: PathBuf,

        /// Pretty-print the result
        #[arg(long)]
        pretty: bool,
    },

    /// List dependency references found in a string
    Retrieve {
        /// Text to scan
        text: String,
    },

    /// Check variable names against the blacklist
    Validate {
        /// Variable names to check
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Write a default config file
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Load the engine config, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("cannot load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands, config: &EngineConfig) -> Result<()> {
    match cmd {
        Commands::Inject { payload, pretty } => cmd_inject(&payload, pretty, config),
        Commands::Retrieve { text } => cmd_retrieve(&text),
        Commands::Validate { names } => cmd_validate(&names, config),
        Commands::Init { path } => cmd_init(&path, config),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("cannot read payload from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
    }
}

/// Render the `{"result": ...}` envelope for a payload.
pub fn render_payload(text: &str, pretty: bool, config: &EngineConfig) -> Result<String> {
    let injector = Injector::new(config);
    let response = payload::process_payload(&injector, text)?;
    let rendered = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(rendered)
}

fn cmd_inject(path: &Path, pretty: bool, config: &EngineConfig) -> Result<()> {
    let text = read_input(path)?;
    println!("{}", render_payload(&text, pretty, config)?);
    Ok(())
}

/// One line per dependency: raw text, node label and variables.
pub fn describe_dependencies(text: &str) -> Result<Vec<String>> {
    let deps = notation::retrieve_parsed(text)?;
    Ok(deps
        .iter()
        .map(|dep| {
            format!(
                "{}  (node: {}, variables: [{}])",
                notation::variable_to_notation(&dep.raw),
                dep.node_label.trim(),
                dep.variables.join(", ")
            )
        })
        .collect())
}

fn cmd_retrieve(text: &str) -> Result<()> {
    let lines = describe_dependencies(text)?;
    if lines.is_empty() {
        println!("no dependency references");
    }
    for line in &lines {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_validate(names: &[String], config: &EngineConfig) -> Result<()> {
    let validator = Validator::new(config.blacklist());
    let mut failures = 0;
    for name in names {
        match validator.assert_valid(name) {
            Ok(()) => println!("  ok: {}", name),
            Err(e) => {
                eprintln!("  ERROR: {}", e);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{} invalid variable name(s)", failures);
    }
    Ok(())
}

fn cmd_init(path: &Path, config: &EngineConfig) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    std::fs::write(&config_path, config.to_yaml()?)
        .with_context(|| format!("cannot write {}", config_path.display()))?;

    println!("Initialized dynvars config at {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_render_payload() {
        let out = render_payload(
            r#"{"target": "n=$[[T:!:<<X>>]]$", "dependencies": {"X": 3}}"#,
            false,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(out, r#"{"result":"n=3"}"#);
    }

    #[test]
    fn test_cli_render_payload_rejects_shape() {
        let err = render_payload(r#"{"target": "x"}"#, false, &EngineConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("dependencies"));
    }

    #[test]
    fn test_cli_inject_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, r#"{"target": ["$[[T:!:<<X>>]]$"], "dependencies": {"X": [1]}}"#)
            .unwrap();
        assert!(cmd_inject(&path, true, &EngineConfig::default()).is_ok());
        assert!(cmd_inject(&dir.path().join("missing.json"), false, &EngineConfig::default())
            .is_err());
    }

    #[test]
    fn test_cli_describe_dependencies() {
        let lines = describe_dependencies("$[[ Fetch :!:<<url>>]]$ and $[[Fetch:!:<<url>>]]$")
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "$[[ Fetch :!:<<url>>]]$  (node: Fetch, variables: [url])"
        );
    }

    #[test]
    fn test_cli_describe_malformed() {
        assert!(describe_dependencies("$[[nope]]$").is_err());
    }

    #[test]
    fn test_cli_validate() {
        let config = EngineConfig::default();
        assert!(cmd_validate(&["fine".into()], &config).is_ok());
        let err = cmd_validate(&["fine".into(), "eval(x)".into()], &config).unwrap_err();
        assert_eq!(err.to_string(), "1 invalid variable name(s)");
    }

    #[test]
    fn test_cli_init_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::default();
        cmd_init(dir.path(), &config).unwrap();
        let loaded = load_config(Some(&dir.path().join(CONFIG_FILE))).unwrap();
        assert_eq!(loaded, config);
        assert!(cmd_init(dir.path(), &config).is_err());
    }

    #[test]
    fn test_cli_load_config_default() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }
}
