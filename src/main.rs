/// Entry point for the Collection Advisor.
///
/// Runs a small workload on tracked containers and prints how each container
/// was used. Behaviour is configured through `COLLECTION_ADVISOR_*` environment
/// variables, see [`collection_advisor::config`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the report cannot be written.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug COLLECTION_ADVISOR_EXPORT_ADDR=127.0.0.1:3000 cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    collection_advisor::run().await
}
