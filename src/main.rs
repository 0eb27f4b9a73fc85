use dotenv::dotenv;
use pirscreen::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    Cli::menu().await
}
