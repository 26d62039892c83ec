#[tokio::main]
async fn main() {
    if let Err(e) = transport_advisor_lib::run().await {
        tracing::error!("Transport Advisor failed: {}", e);
        eprintln!("transport-advisor: {}", e);
        std::process::exit(1);
    }
}
