use anyhow::Result;
use clap::Parser;

use quicklingo::cli::commands::{chat, configure, translate};
use quicklingo::cli::{Args, Command};
use quicklingo::config::ResolveOptions;
use quicklingo::output::{self, OutputConfig};
use quicklingo::translation::print_languages;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });
    output::init_tracing(args.verbose);

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        Some(Command::Chat { translate }) => {
            chat::run_chat(ResolveOptions::from(&translate)).await?;
        }
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                resolve: ResolveOptions::from(&args.translate),
            };
            let outcome = translate::run_translate(options).await?;

            let code = translate::exit_code(&outcome);
            if code != exitcode::OK {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
