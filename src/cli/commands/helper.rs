use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{Config, load_config};

/// Load `.potkitrc.json` from the working directory or its ancestors.
pub fn load_project_config(verbose: bool) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let loaded = load_config(&cwd)?;
    if verbose {
        match &loaded.path {
            Some(path) => eprintln!("{} {}", "config".cyan(), path.display()),
            None => eprintln!("{} defaults (no config file found)", "config".cyan()),
        }
    }
    Ok(loaded.config)
}

/// Write a command's payload to `output`, or to stdout when there is none.
///
/// Parent directories are created as needed.
pub fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
            fs::write(path, bytes).with_context(|| format!("Failed to write {:?}", path))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
