use std::error::Error;

pub fn handle_play(track: Option<&str>) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "player")]
    {
        crate::player::run(track)
    }

    #[cfg(not(feature = "player"))]
    {
        let _ = track;
        use owo_colors::OwoColorize;
        println!("{} {}", "🎵".cyan(), "jumpdeck".bold());
        println!();
        println!(
            "{} Playback requires the 'player' feature to be enabled.",
            "Note:".yellow()
        );
        println!();
        println!("To enable it, install with:");
        println!("  {}", "cargo install jumpdeck --features player".cyan());
        println!();
        println!("Or if building from source:");
        println!("  {}", "cargo build --release --features player".cyan());

        Ok(())
    }
}
