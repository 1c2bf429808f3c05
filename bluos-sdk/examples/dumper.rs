//! Dump a player's state, presets, queue and content tree to the console
//!
//! Usage: cargo run --example dumper -- <player-host>

use bluos_sdk::BluPlayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let host = std::env::args()
        .nth(1)
        .expect("usage: dumper <player-host>");

    let player = BluPlayer::connect_host(&host).await?;
    println!(
        "{} ({} {})",
        player.name(),
        player.brand().unwrap_or("?"),
        player.model().unwrap_or("?"),
    );

    println!("\nstate   : {:?}", player.state().await?);
    let volume = player.volume().await?;
    println!(
        "volume  : {}%{}",
        volume.percent,
        if volume.muted { " (muted)" } else { "" }
    );
    println!("position: {}", player.position().await?);
    let media = player.media().await?;
    for title in &media.titles {
        println!("media   : {title}");
    }

    println!("\npresets:");
    for preset in player.presets().await? {
        println!("  {:>2}  {}", preset.number, preset.name);
    }

    let queue = player.play_queue();
    let info = queue.info().await?;
    println!("\nqueue '{}': {} songs", info.name.as_deref().unwrap_or(""), info.length);
    let mut pages = queue.songs(100);
    while let Some(page) = pages.next_page().await? {
        for song in page {
            println!(
                "  {} - {}",
                song.artist.as_deref().unwrap_or("?"),
                song.title.as_deref().unwrap_or("?"),
            );
        }
    }

    // Two levels is plenty for a readable dump; full catalogs run to
    // thousands of entries.
    println!("\nsources:");
    let browser = player.music_browser().await?;
    browser
        .visit_entries(2, &mut |level, entry| {
            let marker = if entry.is_resolvable() { "+" } else { "-" };
            println!("  {}{} {}", "  ".repeat(level), marker, entry.name());
        })
        .await?;

    Ok(())
}
