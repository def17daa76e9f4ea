use lease_pricing_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("lease-pricing: {err}");
        std::process::exit(1);
    }
}
