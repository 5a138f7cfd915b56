use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use versionprobe::build_info::{Format, BUILD_INFO};
use versionprobe::parsers::parse_host;
use versionprobe::version::DEFAULT_REMOTE_SHELL;
use versionprobe::{
    CurrentExecutable, ExecutablePath, ExplicitPath, NodeVersions, SystemRunner, VersionRetriever,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[clap(long, global = true, default_value = "info")]
    log_level: String,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the version of this binary
    Version {
        /// Output format
        #[clap(short = 'f', long, value_enum, default_value_t = Format::Oneline)]
        format: Format,
    },
    /// Queries the version of the binary installed on this machine
    Local {
        /// Path to the binary to query. Defaults to this executable
        #[clap(short = 'b', long)]
        binary: Option<PathBuf>,
    },
    /// Queries the version of the binary installed on a remote host
    Remote {
        /// Host passed to the remote shell
        #[clap(value_parser = parse_host)]
        host: String,
        /// Path to the binary on the remote host. Defaults to the path of this executable
        #[clap(short = 'b', long)]
        binary: Option<PathBuf>,
        /// Program used to reach the remote host
        #[clap(long, default_value = DEFAULT_REMOTE_SHELL)]
        remote_shell: String,
    },
}

fn resolver(binary: Option<PathBuf>, explicit: fn(PathBuf) -> ExplicitPath) -> Box<dyn ExecutablePath> {
    match binary {
        Some(path) => Box::new(explicit(path)),
        None => Box::new(CurrentExecutable),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is what remote callers capture.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Version { format } => {
            println!("{}", BUILD_INFO.render(format)?);
            Ok(())
        }
        Commands::Local { binary } => {
            let retriever = VersionRetriever::new(resolver(binary, ExplicitPath::local), SystemRunner);
            let version = retriever.coordinator_version()?;
            print!("{version}");
            Ok(())
        }
        Commands::Remote { host, binary, remote_shell } => {
            info!("querying version on {host}");
            let retriever = VersionRetriever::new(resolver(binary, ExplicitPath::remote), SystemRunner)
                .with_remote_shell(remote_shell);
            let version = retriever.agent_version(&host)?;
            print!("{version}");
            Ok(())
        }
    }
}
