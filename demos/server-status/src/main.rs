//! Lists your exaroton servers and, given a server id, follows its status.
//!
//! ```text
//! EXAROTON_TOKEN=... cargo run -p server-status
//! EXAROTON_TOKEN=... cargo run -p server-status -- <server-id>
//! ```
//!
//! Set `RUST_LOG=exaroton=debug` to see each request.

use exaroton::prelude::*;
use tracing_subscriber::EnvFilter;

fn describe<T>(server: &Server<T>) -> String {
    format!(
        "{:<20} {:<32} {:<10} {}/{} players",
        server.id(),
        server.address(),
        server.status(),
        server.players().count(),
        server.players().max(),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = std::env::var("EXAROTON_TOKEN")
        .map_err(|_| "set EXAROTON_TOKEN to your API token")?;
    let client = ExarotonClient::new(token)?;

    let account = client.get_account().await?;
    println!("{} ({:.2} credits)", account.name(), account.credits());

    for server in client.get_servers().await? {
        println!("{}", describe(&server));
    }

    let Some(id) = std::env::args().nth(1) else {
        return Ok(());
    };

    let server = client.get_server(&id).await?;
    println!("following {} ... ctrl-c to stop", server.name());

    let mut subscription = server.subscribe().await?;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = subscription.recv() => match event {
                Some(Ok(ServerEvent::Status(server))) => println!("{}", describe(&server)),
                Some(Ok(ServerEvent::Disconnected)) | None => {
                    eprintln!("connection closed by the API");
                    return Ok(());
                }
                Some(Ok(event)) => tracing::debug!(?event, "websocket event"),
                Some(Err(e)) => eprintln!("websocket error: {e}"),
            }
        }
    }

    subscription.unsubscribe().await?;
    Ok(())
}
