use crate::config::{parse_value, Context};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use lipd_editor::Mutator;

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Dataset file
    pub file: String,

    /// Dot-separated path, e.g. dataset.location.latitude
    pub path: String,

    /// JSON value (plain text is taken as a string; null resets to default)
    pub value: String,
}

pub fn set(args: SetArgs, cwd: &str) -> Result<()> {
    let context = Context::load(cwd)?;
    let mut document = context.provider.open_existing(&context.file(&args.file))?;
    let path = context.path(&args.path);

    let mutator = Mutator::new(context.provider.schemas());
    document.update_path(&mutator, &path, parse_value(&args.value), format!("Set {}", path))?;
    context.provider.save(&mut document)?;

    println!("{} Set {}", "✓".green(), path.to_string().bright_white());
    Ok(())
}
