#[tokio::main]
async fn main() {
    if let Err(e) = sipinjam::run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
