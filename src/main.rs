use std::path::PathBuf;

use news_card::app::RunOptions;

const HELP: &str = "News-Card — A feed of news cards in the terminal.

  --feed <path>        Load cards from a JSON array of news items
  --config <path>      Use this config file instead of the default
  --version, -V        Show version and exit
  --help,    -h        Show this help message";

enum Cli {
    Run(RunOptions),
    Exit,
}

fn main() {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Cli::Run(options)) => options,
        Ok(Cli::Exit) => return,
        Err(message) => {
            eprintln!("error: {message}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    if let Err(err) = news_card::run(options) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Cli, String> {
    let mut options = RunOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("News-Card {}", news_card::VERSION);
                return Ok(Cli::Exit);
            }
            "--help" | "-h" => {
                println!("{HELP}");
                return Ok(Cli::Exit);
            }
            "--feed" => {
                let path = args.next().ok_or("--feed needs a path")?;
                options.feed_file = Some(PathBuf::from(path));
            }
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                options.config_file = Some(PathBuf::from(path));
            }
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(Cli::Run(options))
}
