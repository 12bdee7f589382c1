use crxdl_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; stderr if the state dir is unusable.
    if let Err(file_err) = logging::init_logging() {
        if let Err(e) = logging::init_logging_stderr() {
            eprintln!("crxdl: logging disabled ({:#}; {:#})", file_err, e);
        }
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("crxdl error: {:#}", err);
        std::process::exit(1);
    }
}
