use crate::config::Context;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use lipd_editor::breadcrumbs;

#[derive(Debug, Args)]
pub struct TrailArgs {
    /// Dataset file
    pub file: String,

    /// Dot-separated path to describe
    pub path: String,
}

pub fn trail(args: TrailArgs, cwd: &str) -> Result<()> {
    let context = Context::load(cwd)?;
    let dataset = context.provider.load(&context.file(&args.file))?;
    let path = context.path(&args.path);

    let crumbs = breadcrumbs(dataset.root(), &path);
    let labels: Vec<String> = crumbs
        .iter()
        .map(|crumb| match crumb.kind {
            Some(kind) if !kind.is_generic() => {
                format!("{} {}", crumb.label.bold(), format!("({})", kind).dimmed())
            }
            _ => crumb.label.bold().to_string(),
        })
        .collect();
    println!("{}", labels.join(" › "));

    // Root crumb plus one per resolved segment
    if crumbs.len() <= path.len() {
        println!(
            "{} stopped at {}",
            "⚠️".yellow(),
            path.truncated(crumbs.len()).to_string().bright_white()
        );
    }

    Ok(())
}
