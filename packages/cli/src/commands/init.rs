use crate::config::Context;
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use lipd_model::{Dataset, SchemaRegistry};
use lipd_workspace::{WorkspaceConfig, DEFAULT_CONFIG_NAME};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Also create an empty dataset file with this name
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Maximum undo depth (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub history_limit: usize,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    println!("{}", "📝 Initializing LiPD editor workspace...".bright_blue().bold());

    if config_path.exists() && !args.force {
        println!(
            "  {} {} already exists (use --force to overwrite)",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
    } else {
        let config = WorkspaceConfig {
            history_limit: args.history_limit,
            ..WorkspaceConfig::default()
        };
        fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    if let Some(name) = args.dataset {
        if name.trim().is_empty() {
            bail!("Dataset name must not be empty");
        }

        let context = Context::load(cwd)?;
        let file = context.file(&format!("{}.lipd", name));
        if file.exists() && !args.force {
            bail!("{} already exists (use --force to overwrite)", file.display());
        }

        let dataset = Dataset::empty(&SchemaRegistry::lipd(), &name);
        let document = lipd_editor::LipdDocument::new(file.clone(), dataset);
        context.provider.save_as(&document, &file)?;
        println!("  {} Created {}", "✓".green(), file.display());
    }

    println!();
    println!("{}", "✅ Workspace initialized!".green().bold());
    Ok(())
}
