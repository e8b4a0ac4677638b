// Hook handler binary: one event on stdin, one answer on stdout, then exit.
//
// Diagnostics are filtered by SENSITIVE_FILE_GUARD_LOG and always written to
// stderr; stdout carries nothing but the handler output.

use std::process::ExitCode;

use sensitive_file_guard::types::options::ENV_LOG;
use sensitive_file_guard::{GuardOptions, SensitiveFileGuard, run_handler};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(ENV_LOG, "warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let guard = SensitiveFileGuard::new(GuardOptions::from_env());
    log::debug!(
        "sensitive-file-guard {} starting with {:?}",
        sensitive_file_guard::VERSION,
        guard.options()
    );

    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();
    let exit = run_handler(tokio::io::stdin(), &mut stdout, &mut stderr, &guard).await;

    log::debug!("Exiting with {exit:?}");
    exit.into()
}
