// src/main.rs

use changed_paths::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        // Workflow command: marks the step failed with this message.
        println!("::error::{err}");
        eprintln!("changed-paths error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
