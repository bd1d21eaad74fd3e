use crate::config::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use lipd_editor::resolve;

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Dataset file
    pub file: String,

    /// Dot-separated path, e.g. dataset.paleoData.0.measurementTables
    pub path: String,
}

pub fn get(args: GetArgs, cwd: &str) -> Result<()> {
    let context = Context::load(cwd)?;
    let dataset = context.provider.load(&context.file(&args.file))?;
    let path = context.path(&args.path);

    match resolve(dataset.root(), &path) {
        Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
        None => println!("{} {} is absent", "∅".yellow(), path.to_string().bright_white()),
    }

    Ok(())
}
