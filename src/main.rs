// ChatKit Relay - Session Client-Secret Backend
use chatkit_relay::cli::args::Args;
use chatkit_relay::cli::commands::execute_command;
use clap::Parser;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
