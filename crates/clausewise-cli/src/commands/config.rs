//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config) -> Result<()> {
    println!("{}", render_config(&args.action, config)?);
    Ok(())
}

/// Render the output of a config action.
pub fn render_config(action: &ConfigAction, config: &Config) -> Result<String> {
    match action {
        ConfigAction::Show => {
            let mut out = format!("endpoint = {:?}\n\n", config.endpoint);
            out.push_str(&config.registry()?.to_toml().map_err(CliError::Config)?);
            Ok(out)
        }
        ConfigAction::Path => Ok(Config::path()?.display().to_string()),
    }
}
