#[tokio::main]
async fn main() {
    rental::start_server().await;
}
