#[tokio::main]
async fn main() -> std::io::Result<()> {
    helm_sim::run_with_config().await
}
