mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_export, run_render, run_transform, ExportTargets};
use d2c_lib::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let args = cli::parse();
    init_logging(LoggingConfig::verbose(args.verbose));

    match args.command {
        Commands::Transform { input } => run_transform(args.config, input),
        Commands::Render {
            input,
            component,
            out,
        } => run_render(args.config, input, component, out),
        Commands::Export {
            input,
            template,
            title,
            out,
            dir,
        } => {
            run_export(
                args.config,
                input,
                ExportTargets {
                    template,
                    title,
                    out,
                    dir,
                },
            )
            .await
        }
    }
}
