use std::path::Path;
use std::process::ExitCode;

use affine_view::cli::Args;
use affine_view::config::Config;
use affine_view::error::AppError;
use affine_view::logging::init_log;
use affine_view::session::{self, Settings};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let Some(image) = args.image.as_deref() else {
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    };

    match run(&args, image) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(args: &Args, image: &Path) -> Result<(), AppError> {
    let mode = args.mode()?;

    if let Some(log_file) = &args.log_file {
        init_log(args.log_level.into(), log_file)?;
    }

    let config = Config::load(args.config.as_deref())?;
    let settings = Settings::new(mode, &config).with_horizon(args.horizon);

    session::run(image, &settings)
}
