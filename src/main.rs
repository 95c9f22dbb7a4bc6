use std::process::ExitCode;

use clap::Parser;
use revsent::cli::{AppContext, Cli, Commands};
use revsent::core::loader::LoadError;
use revsent::infra::resources::ResourceError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };
    revsent::infra::logging::init(&ctx);

    let result = match cli.command {
        Commands::Analyze(args) => revsent::analyze_run(args, &ctx),
        Commands::Words(args) => revsent::words_run(args, &ctx),
        Commands::Products(args) => revsent::products_run(args, &ctx),
        Commands::Init(args) => revsent::infra::config::init(args, &ctx),
        Commands::Completions(args) => revsent::completion::run(args, &ctx),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(err);
            ExitCode::FAILURE
        }
    }
}

/// Domain errors get a miette diagnostic (code + help); the rest the anyhow chain.
fn report(err: anyhow::Error) {
    let err = match err.downcast::<LoadError>() {
        Ok(e) => return eprintln!("{:?}", miette::Report::new(e)),
        Err(err) => err,
    };
    let err = match err.downcast::<ResourceError>() {
        Ok(e) => return eprintln!("{:?}", miette::Report::new(e)),
        Err(err) => err,
    };
    eprintln!("Error: {err:?}");
}
