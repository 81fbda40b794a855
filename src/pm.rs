//! Orchestrator: binds one [`Context`] to the set of dispatchable operations.
//!
//! A [`Manager`] holds what every orchestrator in a run shares (home base path,
//! entity loader, command and handler registries). A [`Pm`] owns its context
//! exclusively; deriving a package-scoped orchestrator copies the parent's
//! context and then diverges.

use crate::command::CommandRegistry;
use crate::config::PmConfig;
use crate::context::Context;
use crate::entity::{DescriptorLoader, EntityLoader};
use crate::error::PmError;
use crate::handler::{Capability, CapabilityLookup, HandlerRegistry};
use crate::operation::{Operation, OperationOptions, Report};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Default name of the hidden metadata directory.
pub const DEFAULT_META_DIR: &str = ".sourcemint";

/// Lifecycle of an orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PmState {
    Uninitialized,
    Initializing,
    Ready,
}

struct ManagerInner {
    home_base_path: PathBuf,
    meta_dir_name: String,
    loader: Arc<dyn EntityLoader>,
    commands: Arc<CommandRegistry>,
    handlers: Arc<HandlerRegistry>,
}

/// Shared services for every orchestrator created in a run.
#[derive(Clone)]
pub struct Manager {
    inner: Arc<ManagerInner>,
}

impl Manager {
    /// Manager with the descriptor loader, built-in commands and no backends.
    pub fn new(home_base_path: impl Into<PathBuf>) -> Result<Self, PmError> {
        Self::builder(home_base_path).build()
    }

    pub fn builder(home_base_path: impl Into<PathBuf>) -> ManagerBuilder {
        ManagerBuilder {
            home_base_path: home_base_path.into(),
            meta_dir_name: DEFAULT_META_DIR.to_string(),
            loader: None,
            commands: None,
            handlers: None,
        }
    }

    /// Builder seeded from configuration. Fails when no home directory can be
    /// determined.
    pub fn builder_from_config(config: &PmConfig) -> Result<ManagerBuilder, PmError> {
        Ok(Self::builder(config.home_base_path()?).meta_dir_name(config.meta_dir_name.clone()))
    }

    pub fn home_base_path(&self) -> &Path {
        &self.inner.home_base_path
    }

    pub fn meta_dir_name(&self) -> &str {
        &self.inner.meta_dir_name
    }

    pub fn loader(&self) -> &Arc<dyn EntityLoader> {
        &self.inner.loader
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.inner.commands
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.inner.handlers
    }

    /// A fresh, uninitialized orchestrator.
    pub fn new_pm(&self) -> Result<Pm, PmError> {
        Ok(Pm {
            manager: self.clone(),
            context: Context::new(self.inner.home_base_path.clone())?,
            state: PmState::Uninitialized,
        })
    }

    /// Orchestrator bound to the program at `path`.
    pub async fn for_program_path(&self, path: &Path) -> Result<Pm, PmError> {
        let mut pm = self.new_pm()?;
        pm.init_for_program_path(path).await?;
        Ok(pm)
    }

    /// Orchestrator bound to the package at `path`, inheriting `parent`'s context.
    pub async fn for_package_path(&self, path: &Path, parent: Option<&Pm>) -> Result<Pm, PmError> {
        let mut pm = self.new_pm()?;
        pm.init_for_package_path(path, parent).await?;
        Ok(pm)
    }

    /// Run the clone workflow into `target`.
    pub async fn clone_to(
        &self,
        target: &Path,
        options: &OperationOptions,
    ) -> Result<Report, PmError> {
        crate::clone::clone(self, target, options).await
    }
}

pub struct ManagerBuilder {
    home_base_path: PathBuf,
    meta_dir_name: String,
    loader: Option<Arc<dyn EntityLoader>>,
    commands: Option<Arc<CommandRegistry>>,
    handlers: Option<Arc<HandlerRegistry>>,
}

impl ManagerBuilder {
    pub fn meta_dir_name(mut self, name: impl Into<String>) -> Self {
        self.meta_dir_name = name.into();
        self
    }

    pub fn loader(mut self, loader: Arc<dyn EntityLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn commands(mut self, commands: Arc<CommandRegistry>) -> Self {
        self.commands = Some(commands);
        self
    }

    pub fn handlers(mut self, handlers: Arc<HandlerRegistry>) -> Self {
        self.handlers = Some(handlers);
        self
    }

    pub fn build(self) -> Result<Manager, PmError> {
        // Same precondition every context enforces; fail before anything runs.
        Context::new(self.home_base_path.clone())?;
        if self.meta_dir_name.is_empty() {
            return Err(PmError::Config("meta directory name cannot be empty".to_string()));
        }
        Ok(Manager {
            inner: Arc::new(ManagerInner {
                home_base_path: self.home_base_path,
                meta_dir_name: self.meta_dir_name,
                loader: self.loader.unwrap_or_else(|| Arc::new(DescriptorLoader::new())),
                commands: self
                    .commands
                    .unwrap_or_else(|| Arc::new(CommandRegistry::with_builtins())),
                handlers: self.handlers.unwrap_or_default(),
            }),
        })
    }
}

/// Package manager orchestrator.
pub struct Pm {
    manager: Manager,
    context: Context,
    state: PmState,
}

impl Pm {
    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn state(&self) -> PmState {
        self.state
    }

    /// Load the program at `path` into this orchestrator's context.
    ///
    /// On failure, or if the future is dropped before it completes, the
    /// context and state are left as they were.
    pub async fn init_for_program_path(&mut self, path: &Path) -> Result<(), PmError> {
        debug!(path = %path.display(), "Initializing orchestrator for program");
        let guard = InitGuard::begin(&mut self.state);
        let program = self.manager.inner.loader.load_program(path).await?;
        self.context.attach_program(program, &self.manager.inner.meta_dir_name);
        guard.ready();
        Ok(())
    }

    /// Load the package at `path`. With a parent, this orchestrator's context
    /// is replaced by a copy of the parent's before the package is attached.
    ///
    /// On failure, or if the future is dropped before it completes, the
    /// context and state are left as they were.
    pub async fn init_for_package_path(
        &mut self,
        path: &Path,
        parent: Option<&Pm>,
    ) -> Result<(), PmError> {
        if let Some(parent) = parent {
            parent.ensure_ready("derive package orchestrator")?;
        }
        debug!(
            path = %path.display(),
            has_parent = parent.is_some(),
            "Initializing orchestrator for package"
        );
        let guard = InitGuard::begin(&mut self.state);
        let package = self.manager.inner.loader.load_package(path).await?;
        let mut context = match parent {
            Some(parent) => parent.context.derive_child(),
            None => self.context.clone(),
        };
        context.attach_package(package, &self.manager.inner.meta_dir_name);
        self.context = context;
        guard.ready();
        Ok(())
    }

    fn ensure_ready(&self, action: &str) -> Result<(), PmError> {
        match self.state {
            PmState::Ready => Ok(()),
            state => Err(PmError::InvalidState(format!(
                "cannot {} on an orchestrator in state {:?}",
                action, state
            ))),
        }
    }

    /// Dispatch `operation` to its registered command.
    ///
    /// Every failure, including a missing command or a panicking one, comes
    /// back as `Err`.
    pub async fn run(
        &self,
        operation: Operation,
        options: &OperationOptions,
    ) -> Result<Report, PmError> {
        self.ensure_ready(operation.as_str())?;
        let command = self.manager.commands().get_or_error(operation)?;
        debug!(operation = %operation, "Dispatching operation");
        AssertUnwindSafe(command.run(self, options))
            .catch_unwind()
            .await
            .map_err(|panic| PmError::CommandPanicked(operation, panic_message(panic)))?
    }

    pub async fn install(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Install, options).await
    }

    pub async fn update(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Update, options).await
    }

    pub async fn status(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Status, options).await
    }

    pub async fn bump(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Bump, options).await
    }

    pub async fn publish(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Publish, options).await
    }

    pub async fn clone(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Clone, options).await
    }

    pub async fn deploy(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Deploy, options).await
    }

    pub async fn help(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Help, options).await
    }

    pub async fn fix(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Fix, options).await
    }

    pub async fn edit(&self, options: &OperationOptions) -> Result<Report, PmError> {
        self.run(Operation::Edit, options).await
    }

    /// Resolve the path this orchestrator operates on.
    ///
    /// With both a program and a package in context and `options.pm` set, a
    /// backend handler exposing the path capability answers. Otherwise the
    /// package path wins over the program's root package path; `None` when
    /// neither is known. An unknown backend type is an error.
    pub async fn path(&self, options: &OperationOptions) -> Result<Option<PathBuf>, PmError> {
        self.ensure_ready("resolve path")?;
        if let (Some(_), Some(_), Some(pm_type)) = (
            self.context.program(),
            self.context.package(),
            options.pm.as_deref(),
        ) {
            match self.manager.handlers().lookup(pm_type, Capability::Path)? {
                CapabilityLookup::Supported(handler) => {
                    debug!(pm_type, "Delegating path resolution to backend handler");
                    return handler.path(self, options).await;
                }
                CapabilityLookup::Unsupported => {
                    debug!(pm_type, "Backend handler has no path capability; using default");
                }
            }
        }
        Ok(self.context.resolve_path().map(Path::to_path_buf))
    }
}

/// Holds an orchestrator in `Initializing` for the duration of one init and
/// puts back the prior state when dropped, unless the init completed.
struct InitGuard<'a> {
    state: &'a mut PmState,
    restore: PmState,
}

impl<'a> InitGuard<'a> {
    fn begin(state: &'a mut PmState) -> Self {
        // Only reachable if an earlier init future was leaked rather than dropped.
        let restore = match std::mem::replace(state, PmState::Initializing) {
            PmState::Initializing => PmState::Uninitialized,
            previous => previous,
        };
        Self { state, restore }
    }

    fn ready(mut self) {
        self.restore = PmState::Ready;
    }
}

impl Drop for InitGuard<'_> {
    fn drop(&mut self) {
        *self.state = self.restore;
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
