use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;

use image_update_checker::cli::{Cli, CiOutputMode};
use image_update_checker::config::{load_config, Config};
use image_update_checker::oracle::{DockerChecker, UpdateOracle};
use image_update_checker::registry::DockerHub;
use image_update_checker::report::{
    emit_ci_outputs, print_summary, write_results, CiEmitter, GithubOutputFile, NullEmitter,
    SetOutputEmitter,
};
use image_update_checker::runner::BatchRunner;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config load failures are the only early exit; nothing has been
    // written at this point.
    let config = match load_config(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let oracle = UpdateOracle::new(Box::new(DockerChecker), Box::new(DockerHub::new()?));
    let result = BatchRunner::new(oracle).run(config);

    print_summary(&result);

    let emitter: Box<dyn CiEmitter> = match cli.ci_output {
        CiOutputMode::GithubLegacy => Box::new(SetOutputEmitter),
        CiOutputMode::Github => match GithubOutputFile::from_env() {
            Some(f) => Box::new(f),
            None => bail!("--ci-output github requires GITHUB_OUTPUT to be set"),
        },
        CiOutputMode::None => Box::new(NullEmitter),
    };
    emit_ci_outputs(&result, emitter.as_ref())?;

    write_results(&result, &cli.results)
}
