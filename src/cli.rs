use std::path::PathBuf;

use clap::Parser;

#[derive(Copy, Clone, PartialEq, Eq, Debug, clap::ValueEnum)]
pub enum CiOutputMode {
    /// Legacy `::set-output` workflow commands on stdout
    GithubLegacy,
    /// `key=value` lines appended to the file named by $GITHUB_OUTPUT
    Github,
    /// No automation output
    None,
}

#[derive(Parser, Debug)]
#[command(
    name = "image-update-checker",
    version,
    about = "Check tracked container images for newer upstream base images."
)]
pub struct Cli {
    /// Image matrix configuration file
    #[arg(long, default_value = ".github/configs/images.json")]
    pub config: PathBuf,

    /// Where to write the JSON run result
    #[arg(long, default_value = "update_results.json")]
    pub results: PathBuf,

    /// Automation output protocol
    #[arg(long = "ci-output", value_enum, default_value_t = CiOutputMode::GithubLegacy)]
    pub ci_output: CiOutputMode,
}
