use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "tubelock", version, about = "Tubelock CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current block state
    Status,
    /// Temporary block control
    Block {
        #[command(subcommand)]
        action: commands::block::BlockAction,
    },
    /// Daily schedule window management
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Raw settings access
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Run the policy engine loop against a console overlay
    Watch {
        /// Stop after this many ticks (runs forever by default)
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status => commands::status::run(),
        Commands::Block { action } => commands::block::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Watch { ticks } => commands::watch::run(ticks),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "tubelock",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
