use crate::commands::{CmdMessage, CmdResult};
use crate::config::BakrotConfig;
use crate::error::Result;
use std::path::Path;

/// What `bakrot config [key] [value]` asks for.
#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

impl ConfigAction {
    pub fn from_args(key: Option<String>, value: Option<String>) -> Self {
        match (key, value) {
            (None, _) => ConfigAction::ShowAll,
            (Some(key), None) => ConfigAction::ShowKey(key),
            (Some(key), Some(value)) => ConfigAction::Set(key, value),
        }
    }
}

/// A bad key or value is reported as an error message; an unreadable
/// `config.json` is an `Err`.
pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = BakrotConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => result.add_message(CmdMessage::info(value)),
            None => result.add_message(CmdMessage::error(format!("Unknown config key: {key}"))),
        },
        ConfigAction::Set(key, value) => match config.set(&key, &value) {
            Ok(()) => {
                config.save(config_dir)?;
                let shown = config.get(&key).unwrap_or(value);
                result.add_message(CmdMessage::success(format!("{key} set to {shown}")));
                result = result.with_config(config);
            }
            Err(e) => result.add_message(CmdMessage::error(e.to_string())),
        },
    }
    Ok(result)
}
