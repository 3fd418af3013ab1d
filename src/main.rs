use clap::Parser;
use simlife::adapter::inbound::cli::command::Cli;
use simlife::adapter::inbound::cli::{dispatch, output};
use simlife::error::ModelError;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(output::Mode::from_flags(cli.json, cli.quiet));

    if let Err(e) = dispatch::execute(cli).await {
        output::error(&e.to_string());
        // 2 tells scripts the request can be retried once a model exists.
        let code = if e.as_model().is_some_and(ModelError::is_client_error) {
            2
        } else {
            1
        };
        std::process::exit(code);
    }
}
