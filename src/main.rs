use std::io::{self, Write};
use std::process::ExitCode;

use log::{debug, warn};

use now_playing::args::{self, Command};
use now_playing::dispatch::dispatch;
use now_playing::platform::{self, SystemMediaSource};
use now_playing::query::NowPlaying;

fn main() -> ExitCode {
  env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
  platform::setup_console();

  let program = args::program_name();
  let argv = std::env::args_os()
    .skip(1)
    .map(|arg| arg.to_string_lossy().into_owned());

  let command = args::parse(argv, |warning| {
    eprintln!("{warning}");
    print_usage(&program, &mut io::stderr());
  });

  let config = match command {
    Ok(Command::Help) => {
      return match args::write_usage(&program, &mut io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
          debug!("failed to write usage: {err}");
          ExitCode::FAILURE
        }
      };
    }
    Ok(Command::Run(config)) => config,
    Err(err) => {
      eprintln!("{err}");
      print_usage(&program, &mut io::stderr());
      return ExitCode::FAILURE;
    }
  };

  for program in config.mixed_case_programs() {
    warn!("{program} contains upper-case characters and will never match");
  }

  let source = match SystemMediaSource::create() {
    Ok(source) => source,
    Err(err) => {
      eprintln!("Could not open the media session manager: {err}");
      return ExitCode::FAILURE;
    }
  };

  let now_playing = NowPlaying::new(source, config);

  if let Err(err) = dispatch(&now_playing, &mut io::stdout().lock()) {
    eprintln!("{err}");
    return ExitCode::FAILURE;
  }

  ExitCode::SUCCESS
}

// usage after a diagnostic, the exit status is already decided
fn print_usage(program: &str, writer: &mut impl Write) {
  if let Err(err) = args::write_usage(program, writer) {
    debug!("failed to write usage: {err}");
  }
}
