use lipd_workspace::{WorkspaceConfig, WorkspaceServer};
use std::path::PathBuf;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut root_dir = std::env::current_dir()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!("Usage: lipd-server [ROOT_DIR]");
                println!();
                println!("Serves LiPD editor sessions over stdin/stdout as newline-delimited JSON.");
                println!();
                println!("Arguments:");
                println!("  [ROOT_DIR]    Directory holding lipd-editor.config.json (default: current dir)");
                return Ok(());
            }
            arg if !arg.starts_with('-') => {
                root_dir = PathBuf::from(arg);
                i += 1;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    let config = WorkspaceConfig::load(&root_dir)?;
    tracing::info!("Starting LiPD workspace server in {}", root_dir.display());

    WorkspaceServer::from_config(&config)
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    Ok(())
}
