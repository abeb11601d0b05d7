use vsix_core::logging;

mod cli;

fn main() {
    // Log to the XDG state dir; fall back to stderr if it is unwritable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli::run_from_args() {
        eprintln!("vsixget error: {:#}", err);
        std::process::exit(1);
    }
}
