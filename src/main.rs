use clap::Parser;

use zenith::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use zenith::adapter::inbound::cli::output::{self, OutputConfig};
use zenith::adapter::inbound::cli::{config, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose, cli.color));

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
