//! CLI route: single route table and run context. Dispatches to the orchestrator.

use crate::cli::help::{command_name, operation_for};
use crate::cli::output::format_report;
use crate::cli::parse::{Commands, TargetArgs};
use crate::config::{ConfigLoader, PmConfig};
use crate::error::PmError;
use crate::operation::OperationOptions;
use crate::pm::{Manager, Pm};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: program root, configuration and the
/// manager every orchestrator is built from.
pub struct RunContext {
    manager: Manager,
    workspace_root: PathBuf,
    config: PmConfig,
    json: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, PmError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        let manager = Manager::builder_from_config(&config)?.build()?;
        Self::from_parts(manager, config, workspace_root)
    }

    /// Run context around an already-assembled manager (custom commands or
    /// backend handlers registered by the host).
    pub fn from_parts(
        manager: Manager,
        config: PmConfig,
        workspace_root: PathBuf,
    ) -> Result<Self, PmError> {
        let workspace_root = absolutize(&workspace_root)?;
        Ok(Self {
            manager,
            workspace_root,
            config,
            json: false,
        })
    }

    /// Render reports as JSON instead of summary text.
    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command on a fresh tokio runtime.
    pub fn execute(&self, command: &Commands) -> Result<String, PmError> {
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| PmError::Config(format!("Failed to start async runtime: {}", e)))?;
        rt.block_on(self.execute_async(command))
    }

    /// Execute a CLI command via the single route table.
    pub async fn execute_async(&self, command: &Commands) -> Result<String, PmError> {
        info!(command = command_name(command), "Executing command");
        match command {
            Commands::Clone {
                target,
                create,
                delete,
                pm,
                extra,
            } => {
                let target = absolutize(target)?;
                let options = OperationOptions {
                    pm: pm.clone().or_else(|| self.config.default_pm.clone()),
                    create: *create,
                    delete: *delete,
                    extra: extra.iter().cloned().collect(),
                };
                let report = self.manager.clone_to(&target, &options).await?;
                format_report(&report, self.json)
            }
            Commands::Path(args) => {
                let pm = self.orchestrator(args).await?;
                let path = pm.path(&self.options(args)).await?;
                Ok(path.map(|p| p.display().to_string()).unwrap_or_default())
            }
            Commands::Install(args)
            | Commands::Update(args)
            | Commands::Status(args)
            | Commands::Bump(args)
            | Commands::Publish(args)
            | Commands::Deploy(args)
            | Commands::Help(args)
            | Commands::Fix(args)
            | Commands::Edit(args) => {
                let operation = operation_for(command).ok_or_else(|| {
                    PmError::InvalidState(format!(
                        "'{}' is not an orchestrator operation",
                        command_name(command)
                    ))
                })?;
                let pm = self.orchestrator(args).await?;
                let report = pm.run(operation, &self.options(args)).await?;
                format_report(&report, self.json)
            }
        }
    }

    fn options(&self, args: &TargetArgs) -> OperationOptions {
        OperationOptions {
            pm: args.pm.clone().or_else(|| self.config.default_pm.clone()),
            create: false,
            delete: false,
            extra: args.extra.iter().cloned().collect(),
        }
    }

    /// Program orchestrator for the workspace, then a package orchestrator
    /// derived from it (the program root unless `--package` is given).
    async fn orchestrator(&self, args: &TargetArgs) -> Result<Pm, PmError> {
        let program = self.manager.for_program_path(&self.workspace_root).await?;
        let package_path = match &args.package {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.workspace_root.join(path),
            None => self.workspace_root.clone(),
        };
        debug!(package = %package_path.display(), "Deriving package orchestrator");
        self.manager
            .for_package_path(&package_path, Some(&program))
            .await
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, PmError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| PmError::io(".", e))?;
    Ok(cwd.join(path))
}
