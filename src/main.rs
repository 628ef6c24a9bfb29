use clap::Parser;
use miette::Result;
use promptcanvas::cli::{Cli, Commands};
use promptcanvas::output::Printer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Draw(args) => {
            promptcanvas::cli::draw::run(args, &printer)?;
        }
        Commands::Check(args) => promptcanvas::cli::check::run(args, &printer)?,
        Commands::Capture(args) => promptcanvas::cli::capture::run(args, &printer)?,
        Commands::Restore(args) => promptcanvas::cli::restore::run(args, &printer)?,
        Commands::Reference(args) => promptcanvas::cli::reference::run(args)?,
        Commands::Init(args) => promptcanvas::cli::init::run(args, &printer)?,
        Commands::Completions(args) => promptcanvas::cli::completions::run(args)?,
    }

    Ok(())
}
