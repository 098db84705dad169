mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    cli::run().await;
}
