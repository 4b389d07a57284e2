use feedback_log::start_server;

#[tokio::main]
async fn main() {
    if let Err(e) = start_server().await {
        eprintln!("feedback-log: {e}");
        std::process::exit(1);
    }
}
