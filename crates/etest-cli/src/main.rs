use anyhow::Result;
use clap::Parser;
use etest::{etest_assert, etest_log, Session, Settings, SettingsArgs, TestResult};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod config;
mod reporter;

use reporter::Reporter;

/// Check test fixture files with the etest harness.
///
/// Every fixture becomes one test in the `fixtures` suite. A fixture passes
/// when it can be opened and read in full and is not empty. Log lines go to
/// the console and, with --log_file, to a log file.
///
/// EXAMPLES:
///     etest data/a.bin data/b.bin                 Check two fixtures
///     etest --input_folder=data a.bin b.bin       Resolve names under data/
///     etest --output_folder=out --log_file=t.log --no-trace data/*.bin
///
/// ENVIRONMENT VARIABLES:
///     ETEST_INPUT_DIR   Default for --input_folder
///     ETEST_OUTPUT_DIR  Default for --output_folder
///     ETEST_LOG_FILE    Default for --log_file
///     ETEST_TRACE       Set to '0' to behave like --no-trace
///     NO_COLOR          Set to disable colored output
#[derive(Parser)]
#[command(name = "etest")]
#[command(version)]
struct Cli {
    /// Session name shown in the log
    #[arg(long, default_value = "fixtures")]
    name: String,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Fixture files to check
    #[arg(required = true, value_name = "FIXTURE")]
    fixtures: Vec<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    let settings = cli.settings.apply(Settings::from_env()?);
    let mut session = Session::builder(&cli.name).with_settings(settings).start();

    let fixtures = &cli.fixtures;
    session.run_suite("fixtures", |session| {
        for fixture in fixtures {
            let test_name = fixture.display().to_string();
            session.run_test(&test_name, |session| check_fixture(session, fixture));
        }
    });
    session.done();

    Reporter::new()
        .with_no_color(cli.no_color || cli_config.no_color)
        .report(&session);

    Ok(session.exit_status().into())
}

/// A fixture passes when it loads in full
fn check_fixture(session: &mut Session, fixture: &Path) -> TestResult {
    let file = session.load_input_file(fixture)?;
    etest_assert!(file.size() > 0);
    etest_log!(session, "{} bytes", file.size());
    Ok(())
}
