#[tokio::main]
async fn main() {
    trainer_scheduler::run().await;
}
