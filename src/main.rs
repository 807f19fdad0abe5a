use anyhow::Result;
use clap::Parser;
use snake_tui::audio::Audio;
use snake_tui::game::GameConfig;
use snake_tui::modes::PlayMode;

#[derive(Parser)]
#[command(name = "snake-tui")]
#[command(version, about = "Terminal arcade Snake: eat flowers, grow, don't hit anything")]
struct Cli {
    /// Disable sound effects
    #[arg(long)]
    mute: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The board is the classic 40x25 grid of 16-pixel cells
    let config = GameConfig::default();

    let audio = if cli.mute {
        Audio::muted()
    } else {
        Audio::new()
    };

    let mut mode = PlayMode::new(config, audio);
    mode.run().await
}
