use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "filmorate", about = "Film catalogue with likes and friendships")]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(long)]
    pub settings: Option<String>,
}
