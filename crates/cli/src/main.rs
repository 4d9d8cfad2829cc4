use clap::Parser;

mod cli;
mod commands;
mod gesture;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    cartonforge_observability::init(cli.log_format);
    commands::run_command(cli)
}
