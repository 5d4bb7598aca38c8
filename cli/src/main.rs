mod commands;
mod terminal;

use commands::{CommandLine, Commands, info, sweep};
use pingsweep_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose);

    let cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
        disable_input: commands.no_input,
    };

    print::banner(cfg.no_banner, cfg.quiet);

    let result = match commands.command {
        Commands::Info => {
            print::header("about the tool", cfg.quiet);
            info::info().await
        }
        Commands::Sweep(args) => {
            print::header("getting ready for sweep", cfg.quiet);
            sweep::sweep(args, &cfg).await
        }
    };

    print::end_of_program(cfg.quiet);
    result
}
