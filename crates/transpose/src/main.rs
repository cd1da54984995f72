use clap::Parser;
use transpose::config::TransposeConfig;
use transpose::{Cli, logging, resolve_config, run};

/// Print the config schema when invoked as `transpose --schema`.
fn handle_schema_flag() -> bool {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) != Some("--schema") {
        return false;
    }
    let response = serde_json::json!({
        "config_path": ".transpose/config.toml",
        "format": "toml",
        "schema": schemars::schema_for!(TransposeConfig)
    });
    match serde_json::to_string_pretty(&response) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
    true
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: restores the default disposition of SIGPIPE before any other
    // thread exists; no memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn main() {
    reset_sigpipe();

    if handle_schema_flag() {
        return;
    }

    logging::init_tracing();
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|root| resolve_config(&cli, &root))
        .and_then(|config| run(&cli, &config, &mut std::io::stdout().lock()));

    match result {
        Ok(outcome) if outcome.is_success() => {}
        Ok(outcome) => {
            for err in &outcome.errors {
                eprintln!("error: {err}");
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
