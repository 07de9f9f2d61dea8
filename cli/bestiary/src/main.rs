use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod commands;

fn main() -> ExitCode {
    let args = commands::bestiary_args().run();
    init_logger(args.verbose);

    let runtime = tokio::runtime::Runtime::new().expect("failed to start async runtime");
    match runtime.block_on(args.handle()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let err_str = e
                .chain()
                .skip(1)
                .fold(e.to_string(), |acc, cause| format!("{acc}: {cause}"));
            eprintln!("ERROR: {err_str}");
            ExitCode::from(1)
        },
    }
}

/// Map `-v` occurrences onto an EnvFilter, deferring to RUST_LOG when set.
fn init_logger(verbosity: usize) {
    let default_filter = match verbosity {
        0 => "off,bestiary=warn,bestiary_sdk=warn,bestiary_catalog=warn",
        1 => "off,bestiary=info,bestiary_sdk=info,bestiary_catalog=info",
        2 => "off,bestiary=debug,bestiary_sdk=debug,bestiary_catalog=debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
