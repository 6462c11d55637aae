use clap::Parser;
use helpdesk::cli::commands::Cli;
use helpdesk::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => helpdesk::tui::run(cli.desk_dir.as_deref()),
        Some(_) => handlers::dispatch(cli),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
