#[tokio::main]
async fn main() {
    let code = bdsquery::app::startup::startup().await;
    std::process::exit(code);
}
