//! Watch a player's change feeds and print every change as it arrives
//!
//! Usage: cargo run --example watcher -- <player-host>

use bluos_sdk::BluPlayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = std::env::args()
        .nth(1)
        .expect("usage: watcher <player-host>");

    let player = BluPlayer::connect_host(&host).await?;
    println!("watching {} (ctrl-c to quit)", player.name());

    let mut states = player.state_changes();
    let mut volumes = player.volume_changes();
    let mut media = player.media_changes();
    let mut positions = player.position_changes();
    let mut queue = player.queue_changes();

    loop {
        tokio::select! {
            state = states.next() => {
                println!("state    {:?}", state?);
            }
            volume = volumes.next() => {
                let volume = volume?;
                println!(
                    "volume   {}%{}",
                    volume.percent,
                    if volume.muted { " (muted)" } else { "" }
                );
            }
            current = media.next() => {
                println!("media    {}", current?.titles.join(" / "));
            }
            position = positions.next() => {
                println!("position {}", position?);
            }
            info = queue.next() => {
                println!("queue    {} songs", info?.length);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
