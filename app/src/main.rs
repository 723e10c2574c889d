#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    bounty_app::init_tracing();
    bounty_app::run().await
}
