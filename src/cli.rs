use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tfy",
    about = concat!("[*] taskify v", env!("CARGO_PKG_VERSION"), " - your to-dos in a terminal"),
    version
)]
pub struct Cli {
    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir")]
    pub data_dir: Option<String>,
}
