use crate::config::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Dataset file
    pub file: String,

    /// Print the whole dataset as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &str) -> Result<()> {
    let context = Context::load(cwd)?;
    let dataset = context.provider.load(&context.file(&args.file))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    let summary = dataset.summary();
    println!(
        "{} {}",
        "📚".bright_blue(),
        dataset.name().unwrap_or("(unnamed)").bold()
    );
    println!("   Publications: {}", summary.publications);
    println!("   Paleo data:   {}", summary.paleo_data);
    println!("   Chron data:   {}", summary.chron_data);
    println!("   Tables:       {}", summary.tables);
    println!("   Variables:    {}", summary.variables);

    Ok(())
}
