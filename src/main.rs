use multirepo::presentation::cli::CliApp;

#[tokio::main]
async fn main() {
    // Logging goes to stderr so command output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Commands report their own diagnostics; all that is left here is
    // mapping failure to the exit code.
    let app = CliApp::new();
    if app.run().await.is_err() {
        std::process::exit(1);
    }
}
