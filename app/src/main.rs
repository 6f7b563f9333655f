// FILENAME: app/src/main.rs
// PURPOSE: Console entry point for the invoice ledger.

use std::path::PathBuf;

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(app_lib::DEFAULT_CONFIG_FILE));

    let mut session = match app_lib::bootstrap(&config_path) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if let Err(e) = app_lib::run_shell(&mut session, stdin.lock(), &mut stdout) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
