use clap::Parser;
use cost_report::cli::Cli;

fn main() -> anyhow::Result<()> {
    cost_report::init_tracing();
    let cli = Cli::parse();
    cli.run()
}
