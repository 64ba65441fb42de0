use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};

pub fn prompt_yes_no(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
