use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{ReporterError, Result};
use crate::i18n::Language;
use crate::location::{Coordinates, DEFAULT_CENTER};

use super::confirm;

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists()
        && !confirm(&format!(
            "Config file already exists at {}. Overwrite?",
            config_path.display()
        ))?
    {
        println!("Aborted.");
        return Ok(());
    }

    println!("Civic Reporter Configuration");
    println!("============================\n");

    let language = prompt("Interface language (en/ar) [en]: ")?;
    let language = match language.as_str() {
        "" => None,
        code => Some(
            Language::from_code(code)
                .ok_or_else(|| ReporterError::UnsupportedLanguage(code.to_string()))?,
        ),
    };

    let data_dir = prompt("Data directory [default]: ")?;
    let data_dir = (!data_dir.is_empty()).then(|| PathBuf::from(data_dir));

    let allow_location = confirm("Allow 'use my current location'?")?;
    let current_location = if allow_location {
        let raw = prompt(&format!(
            "Current location as lat,lng (map centre is {DEFAULT_CENTER}) [optional]: "
        ))?;
        if raw.is_empty() {
            None
        } else {
            raw.parse::<Coordinates>()?;
            Some(raw)
        }
    } else {
        None
    };

    let config = Config {
        data_dir,
        language,
        current_location,
        allow_location,
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ReporterError::FileWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let contents = toml::to_string(&config).map_err(|e| ReporterError::ConfigEncode {
        path: config_path.clone(),
        source: e,
    })?;
    std::fs::write(&config_path, contents).map_err(|e| ReporterError::FileWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'reporter' commands!");

    Ok(())
}
