use annoblast::{
    cli::{init_verbose, Cli, Command},
    commands::{annotate, enzymes, run, search},
    utils::{handle_error_and_exit, Result},
};
use clap::Parser;

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Run(_) => "run",
        Command::Search(_) => "search",
        Command::Annotate(_) => "annotate",
        Command::Enzymes(_) => "enzymes",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        subcommand_name
    );
    match cli.command {
        Command::Run(args) => run::run(args)?,
        Command::Search(args) => search::search(args)?,
        Command::Annotate(args) => annotate::annotate(args)?,
        Command::Enzymes(args) => enzymes::enzymes(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
