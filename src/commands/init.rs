use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::error::{LinearError, Result};

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn optional(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if config_path.exists() {
        let answer = prompt(
            &mut input,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Linear CLI Configuration");
    println!("========================\n");

    let api_key = prompt(
        &mut input,
        "Enter your Linear API key (create one at https://linear.app/settings/api): ",
    )?;
    if api_key.is_empty() {
        return Err(LinearError::MissingApiKey);
    }

    let default_team = prompt(&mut input, "Enter default team key (e.g., ENG) [optional]: ")?;
    let editor = prompt(
        &mut input,
        "Editor for `linear issues edit` (e.g., code --wait) [optional]: ",
    )?;

    let config = Config {
        api_key: Some(api_key),
        default_team: optional(default_team),
        editor: optional(editor),
    };
    config.save_to(&config_path)?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'linear' commands!");

    Ok(())
}
