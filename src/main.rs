use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    prompt_console::cli::run().await
}
