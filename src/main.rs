use clap::Parser;

use crate::cmd::Cmd;

mod cmd;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    Cmd::parse().run().await
}
