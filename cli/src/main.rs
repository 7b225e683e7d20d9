mod commands;
mod sources;
mod store;
mod terminal;

use commands::{CommandLine, Commands, scan, test, top};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    match commands.command {
        Commands::Scan(args) => scan::scan(args).await,
        Commands::Test(args) => test::test(args).await,
        Commands::Top(args) => top::top(args),
    }
}
