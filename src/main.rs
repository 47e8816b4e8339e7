use anyhow::Result;
use author_text_prep::cli::Cli;
use clap::Parser;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("author_text_prep=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
