//! CLI argument parsing module for gobump

use crate::changelog::ChangelogDest;
use crate::orchestrator::DEFAULT_RETRIES;
use crate::output::OutputFormat;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Environment variables that mark a CI run
const CI_VARIABLES: [&str; 3] = ["GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI"];

/// Parse changelog destination: stdout, gist or a file path
fn parse_changelog_dest(s: &str) -> Result<ChangelogDest, String> {
    match s.trim() {
        "" => Err("empty changelog destination".to_string()),
        "stdout" => Ok(ChangelogDest::Stdout),
        "gist" => Ok(ChangelogDest::Gist),
        path => Ok(ChangelogDest::File(PathBuf::from(path))),
    }
}

/// Bump Go module dependencies one at a time
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gobump",
    version,
    about = "Bump direct Go dependencies one at a time without changing the required Go version"
)]
pub struct CliArgs {
    /// Only consider these modules (default: all direct dependencies)
    #[arg(value_name = "MODULE")]
    pub modules: Vec<String>,

    /// Restore the original go.mod after running
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print stdout of executed commands as well as stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Command run after each bump; a failure reverts it (can be specified multiple times)
    #[arg(long = "exec", value_name = "COMMAND", action = ArgAction::Append)]
    pub exec: Vec<String>,

    /// Modules to leave untouched (comma separated, can be specified multiple times)
    #[arg(long, value_delimiter = ',', action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Output format (default: console, markdown on CI)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to the go.mod to read
    #[arg(long, default_value = "go.mod")]
    pub src_go_mod: PathBuf,

    /// Path to the go.mod to write
    #[arg(long, default_value = "go.mod")]
    pub dst_go_mod: PathBuf,

    /// Number of candidate versions tried for each module
    #[arg(long, default_value_t = DEFAULT_RETRIES)]
    pub retries: usize,

    /// Go executable
    #[arg(long, env = "GOVERSION", default_value = "go")]
    pub go_binary: String,

    /// Print commit changelogs of upgraded GitHub modules
    #[arg(long)]
    pub changelog: bool,

    /// Where changelogs go: stdout, gist or a file path
    #[arg(long, value_parser = parse_changelog_dest, default_value = "stdout")]
    pub changelog_dest: ChangelogDest,
}

impl CliArgs {
    /// Output format, falling back to markdown on CI
    pub fn output_format(&self, ci: bool) -> OutputFormat {
        self.format.unwrap_or(if ci {
            OutputFormat::Markdown
        } else {
            OutputFormat::Console
        })
    }

    /// Verbose mode is always on for CI runs
    pub fn is_verbose(&self, ci: bool) -> bool {
        self.verbose || ci
    }
}

/// Whether the process runs on a known CI system
pub fn detect_ci() -> bool {
    CI_VARIABLES
        .iter()
        .any(|name| std::env::var_os(name).is_some_and(|v| !v.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["gobump"]);
        assert!(args.modules.is_empty());
        assert!(!args.dry_run);
        assert!(!args.verbose);
        assert!(args.exec.is_empty());
        assert!(args.exclude.is_empty());
        assert!(args.format.is_none());
        assert_eq!(args.src_go_mod, PathBuf::from("go.mod"));
        assert_eq!(args.dst_go_mod, PathBuf::from("go.mod"));
        assert_eq!(args.retries, 5);
        assert!(!args.changelog);
        assert_eq!(args.changelog_dest, ChangelogDest::Stdout);
    }

    #[test]
    fn test_positional_modules() {
        let args = CliArgs::parse_from(["gobump", "github.com/a/a", "golang.org/x/text"]);
        assert_eq!(args.modules, vec!["github.com/a/a", "golang.org/x/text"]);
    }

    #[test]
    fn test_dry_run_flags() {
        assert!(CliArgs::parse_from(["gobump", "-n"]).dry_run);
        assert!(CliArgs::parse_from(["gobump", "--dry-run"]).dry_run);
    }

    #[test]
    fn test_exec_multiple() {
        let args = CliArgs::parse_from(["gobump", "--exec", "go build ./...", "--exec", "make test"]);
        assert_eq!(args.exec, vec!["go build ./...", "make test"]);
    }

    #[test]
    fn test_exclude_comma_separated_and_repeated() {
        let args = CliArgs::parse_from([
            "gobump",
            "--exclude",
            "github.com/a/a,github.com/b/b",
            "--exclude",
            "github.com/c/c",
        ]);
        assert_eq!(
            args.exclude,
            vec!["github.com/a/a", "github.com/b/b", "github.com/c/c"]
        );
    }

    #[test]
    fn test_format() {
        let args = CliArgs::parse_from(["gobump", "--format", "json"]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(CliArgs::try_parse_from(["gobump", "--format", "html"]).is_err());
    }

    #[test]
    fn test_output_format_ci_default() {
        let args = CliArgs::parse_from(["gobump"]);
        assert_eq!(args.output_format(false), OutputFormat::Console);
        assert_eq!(args.output_format(true), OutputFormat::Markdown);

        let args = CliArgs::parse_from(["gobump", "--format", "none"]);
        assert_eq!(args.output_format(true), OutputFormat::None);
    }

    #[test]
    fn test_verbose_ci_default() {
        let args = CliArgs::parse_from(["gobump"]);
        assert!(!args.is_verbose(false));
        assert!(args.is_verbose(true));
        assert!(CliArgs::parse_from(["gobump", "-v"]).is_verbose(false));
    }

    #[test]
    fn test_manifest_paths_and_retries() {
        let args = CliArgs::parse_from([
            "gobump",
            "--src-go-mod",
            "a/go.mod",
            "--dst-go-mod",
            "b/go.mod",
            "--retries",
            "2",
        ]);
        assert_eq!(args.src_go_mod, PathBuf::from("a/go.mod"));
        assert_eq!(args.dst_go_mod, PathBuf::from("b/go.mod"));
        assert_eq!(args.retries, 2);
        assert!(CliArgs::try_parse_from(["gobump", "--retries", "-1"]).is_err());
    }

    #[test]
    fn test_go_binary_flag() {
        let args = CliArgs::parse_from(["gobump", "--go-binary", "go1.22.0"]);
        assert_eq!(args.go_binary, "go1.22.0");
    }

    #[test]
    fn test_parse_changelog_dest() {
        assert_eq!(parse_changelog_dest("stdout").unwrap(), ChangelogDest::Stdout);
        assert_eq!(parse_changelog_dest("gist").unwrap(), ChangelogDest::Gist);
        assert_eq!(
            parse_changelog_dest("CHANGES.md").unwrap(),
            ChangelogDest::File(PathBuf::from("CHANGES.md"))
        );
        assert!(parse_changelog_dest(" ").is_err());
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from([
            "gobump",
            "-n",
            "--verbose",
            "--exclude",
            "github.com/a/a",
            "--changelog",
            "--changelog-dest",
            "gist",
            "github.com/b/b",
        ]);
        assert!(args.dry_run);
        assert!(args.verbose);
        assert_eq!(args.exclude, vec!["github.com/a/a"]);
        assert!(args.changelog);
        assert_eq!(args.changelog_dest, ChangelogDest::Gist);
        assert_eq!(args.modules, vec!["github.com/b/b"]);
    }
}
