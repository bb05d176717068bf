use clap::builder::FalseyValueParser;
use clap::Parser;

/// Two-player tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "tui-tic-tac-toe", version)]
pub struct Cli {
    /// Draw marks without colors
    #[arg(long, env = "TTT_NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Play the given comma-separated slot numbers instead of reading them from stdin
    #[arg(long, value_delimiter = ',', value_name = "SLOTS")]
    pub moves: Option<Vec<usize>>,
}

impl Cli {
    pub fn color(&self) -> bool {
        !self.no_color
    }
}
