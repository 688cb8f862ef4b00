pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use logveil_core::error::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Convert {
            input,
            out_dir,
            codec,
            line_width,
            max_kb,
            start,
            end,
            name,
            options,
            seed,
        } => handlers::handle_convert(handlers::ConvertArgs {
            input,
            out_dir,
            codec,
            line_width,
            max_kb,
            start,
            end,
            name,
            options,
            seed,
        }),
        Commands::Restore {
            files,
            dir,
            name,
            out,
            codec,
        } => handlers::handle_restore(files, dir, name, out, codec),
        Commands::Detect { files } => handlers::handle_detect(files),
        Commands::About => {
            println!("{}", crate::presentation::cli::ABOUT);
            Ok(())
        }
    }
}
