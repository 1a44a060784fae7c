use clap::Parser;
use passvault::cli::commands::{add::AddArgs, edit::EditArgs};
use passvault::cli::{Cli, Commands};

/// Diagnostics go to stderr, filtered by `PASSVAULT_LOG` (default: warnings only).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("PASSVAULT_LOG")
        .unwrap_or_else(|_| EnvFilter::new("passvault=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref website,
            ref username,
            ref email,
            ref notes,
            ref password,
            generate,
            force,
        } => passvault::cli::commands::add::execute(
            &cli,
            &AddArgs {
                website,
                username: username.as_deref(),
                email: email.as_deref(),
                notes: notes.as_deref(),
                password: password.as_deref(),
                generate,
                force,
            },
        ),
        Commands::Edit {
            id,
            ref website,
            ref username,
            ref email,
            ref notes,
            ref password,
            generate,
            force,
        } => passvault::cli::commands::edit::execute(
            &cli,
            &EditArgs {
                id,
                website: website.as_deref(),
                username: username.as_deref(),
                email: email.as_deref(),
                notes: notes.as_deref(),
                password: password.as_deref(),
                generate,
                force,
            },
        ),
        Commands::List { ref search } => {
            passvault::cli::commands::list::execute(&cli, search.as_deref())
        }
        Commands::Show { id, field, copy } => {
            passvault::cli::commands::show::execute(&cli, id, field, copy)
        }
        Commands::Delete { id, force } => passvault::cli::commands::delete::execute(&cli, id, force),
        Commands::Generate { length } => passvault::cli::commands::generate::execute(&cli, length),
        Commands::Audit { last, ref since } => {
            passvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
