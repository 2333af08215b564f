//! Upgrade orchestrator for coordinating the entire bump workflow
//!
//! This module provides:
//! - Workflow coordination: read → resolve → apply → validate → hooks → commit
//! - Bounded retry over older candidates with rollback after each failure
//! - Dry-run mode support
//! - Allow-list and exclusion filter application
//!
//! Dependencies are processed strictly one after another. Each one starts
//! from the last manifest that passed validation and every hook.

use crate::cli::CliArgs;
use crate::command::{display_command, split_command, CommandOutput, CommandRunner};
use crate::domain::DependencyResult;
use crate::error::AppError;
use crate::manifest::{ManifestSnapshot, ManifestStore, Requirement};
use crate::output::Output;
use crate::registry::VersionSource;
use crate::update::{aggregate, validate_upgrade, CandidateResolver, Selection, SelectionFilter};

/// Default number of candidates tried per dependency
pub const DEFAULT_RETRIES: usize = 5;

/// Engine configuration
#[derive(Debug, Clone)]
pub struct UpgradeConfig {
    /// Go executable used for `go get`
    pub go_binary: String,
    /// Maximum number of candidates tried per dependency
    pub retries: usize,
    /// Verification commands run after each applied upgrade
    pub hooks: Vec<String>,
    /// Allow-list and exclusions
    pub filter: SelectionFilter,
    /// Restore the original manifest at the end of the run
    pub dry_run: bool,
    /// Forward stdout of executed commands
    pub verbose: bool,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            go_binary: "go".to_string(),
            retries: DEFAULT_RETRIES,
            hooks: Vec::new(),
            filter: SelectionFilter::new(),
            dry_run: false,
            verbose: false,
        }
    }
}

impl UpgradeConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs, ci: bool) -> Self {
        Self {
            go_binary: args.go_binary.clone(),
            retries: args.retries,
            hooks: args.exec.clone(),
            filter: SelectionFilter::new()
                .with_only(args.modules.clone())
                .with_exclude(args.exclude.clone()),
            dry_run: args.dry_run,
            verbose: args.is_verbose(ci),
        }
    }
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct UpgradeRun {
    /// One result per considered dependency
    pub results: Vec<DependencyResult>,
    /// Last manifest that passed validation and every hook
    pub last_known_good: ManifestSnapshot,
}

/// Outcome of trying one candidate
enum StepOutcome {
    /// Applied and validated
    Applied(ManifestSnapshot),
    /// `go get` failed
    ApplyFailed,
    /// The manifest could not be re-read or was rejected
    ValidationFailed(Option<ManifestSnapshot>),
    /// A verification hook failed after a valid upgrade
    HookFailed(ManifestSnapshot),
}

/// Orchestrator for coordinating the upgrade workflow
pub struct Orchestrator<'a> {
    source: &'a dyn VersionSource,
    runner: &'a dyn CommandRunner,
    store: &'a dyn ManifestStore,
    config: UpgradeConfig,
}

impl<'a> Orchestrator<'a> {
    /// Create a new orchestrator over its collaborators
    pub fn new(
        source: &'a dyn VersionSource,
        runner: &'a dyn CommandRunner,
        store: &'a dyn ManifestStore,
        config: UpgradeConfig,
    ) -> Self {
        Self {
            source,
            runner,
            store,
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &UpgradeConfig {
        &self.config
    }

    /// Run the whole workflow against the manifest store
    ///
    /// Reads the original manifest, processes every dependency, persists the
    /// final manifest and returns the results sorted by module path. Only a
    /// failed initial read or a failed final write is an error.
    pub async fn execute(&self, out: &mut dyn Output) -> Result<UpgradeRun, AppError> {
        let original = self.store.read()?;
        let mut run = self.run(&original, out).await;

        if self.config.dry_run {
            self.store.restore(&original)?;
        } else {
            self.store.write(&run.last_known_good)?;
        }

        run.results = aggregate(run.results);
        Ok(run)
    }

    /// Process every direct dependency of `original` in manifest order
    pub async fn run(&self, original: &ManifestSnapshot, out: &mut dyn Output) -> UpgradeRun {
        let mut last_known_good = original.clone();
        let mut results = Vec::new();

        for requirement in original.direct_requirements() {
            match self.config.filter.classify(&requirement.path) {
                Selection::Skipped => continue,
                Selection::Excluded => {
                    tracing::debug!(module = requirement.path.as_str(), "excluded");
                    results.push(DependencyResult::excluded(
                        &requirement.path,
                        &requirement.version,
                    ));
                }
                Selection::Process => {
                    let (result, committed) = self
                        .process_dependency(requirement, &last_known_good, out)
                        .await;
                    if let Some(snapshot) = committed {
                        last_known_good = snapshot;
                    }
                    results.push(result);
                }
            }
        }

        UpgradeRun {
            results,
            last_known_good,
        }
    }

    /// Upgrade a single dependency, returning its result and the new
    /// last known good manifest when the upgrade was committed
    async fn process_dependency(
        &self,
        requirement: &Requirement,
        last_known_good: &ManifestSnapshot,
        out: &mut dyn Output,
    ) -> (DependencyResult, Option<ManifestSnapshot>) {
        let path = requirement.path.as_str();
        out.begin_section(&format!("{} get {}", self.config.go_binary, path));

        let candidates = match CandidateResolver::new(self.source)
            .resolve(path, &requirement.version)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::debug!(module = path, error = %e, "version lookup failed");
                out.error(&format!("failed to fetch versions: {}", e));
                out.end_section(true);
                return (
                    DependencyResult::unresolved(path, &requirement.version),
                    None,
                );
            }
        };

        if candidates.is_empty() {
            out.line("no newer versions");
            out.end_section(false);
            return (DependencyResult::unchanged(path, &requirement.version), None);
        }

        let mut last_parsed: Option<ManifestSnapshot> = None;
        let mut outcome = StepOutcome::ApplyFailed;
        for (attempt, version) in candidates.iter().enumerate() {
            if attempt >= self.config.retries {
                out.error("too many failed attempts, giving up");
                break;
            }

            outcome = self.attempt(path, version, last_known_good, out);
            match &outcome {
                StepOutcome::Applied(snapshot) => {
                    last_parsed = Some(snapshot.clone());
                    break;
                }
                StepOutcome::ValidationFailed(parsed) => {
                    if let Some(snapshot) = parsed {
                        last_parsed = Some(snapshot.clone());
                    }
                    self.rollback(path, version, last_known_good, out);
                }
                StepOutcome::ApplyFailed | StepOutcome::HookFailed(_) => {
                    self.rollback(path, version, last_known_good, out);
                }
            }
        }

        let applied = matches!(outcome, StepOutcome::Applied(_));
        out.end_section(!applied);

        let outcome = match outcome {
            StepOutcome::Applied(snapshot) => self.run_hooks(snapshot, out),
            other => other,
        };

        let mut result = DependencyResult::unresolved(path, &requirement.version);
        if let Some(snapshot) = &last_parsed {
            result.version_after = snapshot.requirement(path).map(|r| r.version.clone());
            result.toolchain_after = snapshot.toolchain_version.clone();
        }

        match outcome {
            StepOutcome::Applied(snapshot) => {
                tracing::info!(
                    module = path,
                    version = result.version_after.as_deref().unwrap_or("-"),
                    "upgrade committed"
                );
                result.success = true;
                (result, Some(snapshot))
            }
            StepOutcome::HookFailed(_) => {
                let attempted = result.version_after.as_deref().unwrap_or("-");
                self.rollback(path, attempted, last_known_good, out);
                (result, None)
            }
            StepOutcome::ApplyFailed | StepOutcome::ValidationFailed(_) => (result, None),
        }
    }

    /// Apply one candidate and validate the resulting manifest
    fn attempt(
        &self,
        path: &str,
        version: &str,
        last_known_good: &ManifestSnapshot,
        out: &mut dyn Output,
    ) -> StepOutcome {
        let args = vec!["get".to_string(), format!("{}@{}", path, version)];
        if self.config.verbose {
            out.line(&display_command(&self.config.go_binary, &args));
        }

        match self.runner.run(&self.config.go_binary, &args) {
            Ok(output) => {
                self.forward(&output, out);
                if let Err(e) = output.check() {
                    tracing::debug!(module = path, version, error = %e, "go get failed");
                    out.error("upgrade unsuccessful, reverting go.mod");
                    return StepOutcome::ApplyFailed;
                }
            }
            Err(e) => {
                out.error(&e.to_string());
                out.error("upgrade unsuccessful, reverting go.mod");
                return StepOutcome::ApplyFailed;
            }
        }

        let upgraded = match self.store.read() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                out.error(&format!("{}, reverting go.mod", e));
                return StepOutcome::ValidationFailed(None);
            }
        };

        if let Err(e) = validate_upgrade(last_known_good, &upgraded) {
            out.error(&format!("{}, reverting go.mod", e));
            return StepOutcome::ValidationFailed(Some(upgraded));
        }

        StepOutcome::Applied(upgraded)
    }

    /// Run verification hooks in order; the first failure stops the rest
    fn run_hooks(&self, upgraded: ManifestSnapshot, out: &mut dyn Output) -> StepOutcome {
        for hook in &self.config.hooks {
            if hook.trim().is_empty() {
                continue;
            }

            out.begin_section(hook);
            let passed = match split_command(hook) {
                Ok((program, args)) => match self.runner.run(&program, &args) {
                    Ok(output) => {
                        self.forward(&output, out);
                        output.check().is_ok()
                    }
                    Err(e) => {
                        out.error(&e.to_string());
                        false
                    }
                },
                Err(e) => {
                    out.error(&e.to_string());
                    false
                }
            };

            if !passed {
                out.error("tests failed, reverting go.mod");
                out.end_section(true);
                return StepOutcome::HookFailed(upgraded);
            }
            out.end_section(false);
        }

        StepOutcome::Applied(upgraded)
    }

    /// Restore the last known good manifest
    fn rollback(
        &self,
        path: &str,
        attempted: &str,
        last_known_good: &ManifestSnapshot,
        out: &mut dyn Output,
    ) {
        tracing::warn!(module = path, attempted, "rolling back go.mod");
        if let Err(e) = self.store.restore(last_known_good) {
            tracing::warn!(error = %e, "rollback failed");
            out.error(&format!("failed to revert go.mod: {}", e));
        }
    }

    /// Forward captured process output to the transcript
    fn forward(&self, output: &CommandOutput, out: &mut dyn Output) {
        if self.config.verbose && !output.stdout.is_empty() {
            out.raw(&output.stdout);
        }
        if !output.stderr.is_empty() {
            out.raw(&output.stderr);
        }
    }
}
