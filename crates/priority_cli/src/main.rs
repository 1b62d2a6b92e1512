//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `priority_core` linkage.
//! - Round-trip an outline file (or the built-in sample) through the core.
//!
//! Usage: `priority_cli [OUTLINE_FILE]`

use priority_core::{default_log_level, init_logging, Container, PriorityService};
use std::process::ExitCode;

fn main() -> ExitCode {
    let log_dir = std::env::temp_dir().join("priority_manager_logs");
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("logging disabled: {err}");
    }

    println!("priority_core version={}", priority_core::core_version());

    let mut service = match std::env::args().nth(1) {
        Some(path) => match load_outline(path.as_str()) {
            Ok(service) => service,
            Err(message) => {
                eprintln!("{message}");
                return ExitCode::FAILURE;
            }
        },
        None => PriorityService::with_sample(),
    };

    // Exercise one move: the last root item goes to the front.
    let roots = service.tree().root_ids();
    if let Some(&last) = roots.last() {
        let outcome = service.relocate(last, Container::Root, 0);
        log::info!("event=cli_demo_move module=cli status={}", outcome.as_str());
    }

    println!("nodes={}", service.len());
    print!("{}", service.export());
    ExitCode::SUCCESS
}

fn load_outline(path: &str) -> Result<PriorityService, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read outline `{path}`: {err}"))?;
    let mut service = PriorityService::new();
    service
        .import(text.as_str())
        .map_err(|err| format!("failed to import `{path}`: {err}"))?;
    Ok(service)
}
