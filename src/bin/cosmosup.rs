use std::process;

#[tokio::main]
async fn main() {
    if let Err(err) = cosmosup::cli::start().await {
        cosmosup::report::fail(format!("{err:#}"));
        process::exit(2);
    }
}
