use clap::Parser;

#[derive(Parser)]
#[command(name = "dinefind")]
#[command(about = "Find open restaurants near you, by name, cuisine or dish.")]
#[command(version)]
pub struct Cli {
    /// Latitude of the search origin
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the search origin
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Time of day to search at (HH:MM or HH:MM:SS), defaults to now
    #[arg(long)]
    pub at: Option<String>,

    /// Run name and cuisine searches concurrently
    #[arg(long)]
    pub mt: bool,

    /// Don't use cached results
    #[arg(short = 'n', long)]
    pub nocache: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Import restaurants and menus from a JSON dataset
    #[arg(long, value_name = "FILE")]
    pub import: Option<std::path::PathBuf>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Search text; lists everything nearby when omitted
    #[arg(num_args = 1..)]
    pub query: Vec<String>,
}
