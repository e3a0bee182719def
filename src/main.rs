use clap::Parser;
use bot_nlu::cli::{self, Cli};
use bot_nlu::config::AppConfig;
use bot_nlu::infrastructure::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    cli::models::run(cli, &config, &mut std::io::stdout()).await
}
