use env_logger::Env;
use log::error;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = eventboard::cli::run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}
