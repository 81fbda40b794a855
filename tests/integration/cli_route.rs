//! CLI route table end to end (without spawning the binary)

use clap::Parser;
use sourcemint::cli::{Cli, RunContext};
use sourcemint::command::CommandRegistry;
use sourcemint::config::PmConfig;
use sourcemint::handler::HandlerRegistry;
use sourcemint::{ErrorKind, Operation, Report};
use std::sync::Arc;
use tempfile::TempDir;

use crate::integration::{canonical, manager_with, MaterializingClone, RecordingCommand};

fn run(context: &RunContext, args: &[&str]) -> Result<String, sourcemint::PmError> {
    let mut argv = vec!["sm"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    context.execute(&cli.command)
}

#[test]
fn test_path_prints_package_root() {
    let workspace = TempDir::new().unwrap();
    std::fs::create_dir(workspace.path().join("lib")).unwrap();
    let manager = manager_with(CommandRegistry::with_builtins(), HandlerRegistry::new());
    let context = RunContext::from_parts(
        manager,
        PmConfig::default(),
        workspace.path().to_path_buf(),
    )
    .unwrap();

    let out = run(&context, &["path"]).unwrap();
    assert_eq!(out, canonical(workspace.path()).display().to_string());

    let out = run(&context, &["path", "--package", "lib"]).unwrap();
    assert_eq!(
        out,
        canonical(&workspace.path().join("lib")).display().to_string()
    );
}

#[test]
fn test_operation_receives_extra_options_and_default_pm() {
    let workspace = TempDir::new().unwrap();
    let recorder = RecordingCommand::new(Operation::Install);
    let calls = Arc::clone(&recorder.calls);
    let commands = CommandRegistry::new();
    commands.register(Operation::Install, Arc::new(recorder));
    let config = PmConfig {
        default_pm: Some("npm".to_string()),
        ..PmConfig::default()
    };
    let context = RunContext::from_parts(
        manager_with(commands, HandlerRegistry::new()),
        config,
        workspace.path().to_path_buf(),
    )
    .unwrap();

    let out = run(&context, &["install", "--set", "production=true"]).unwrap();
    assert_eq!(out, "install done");

    let calls = calls.lock();
    assert_eq!(calls[0].options.pm.as_deref(), Some("npm"));
    assert_eq!(
        calls[0].options.extra.get("production").map(String::as_str),
        Some("true")
    );
}

#[test]
fn test_json_output_is_a_report() {
    let workspace = TempDir::new().unwrap();
    let context = RunContext::from_parts(
        manager_with(CommandRegistry::with_builtins(), HandlerRegistry::new()),
        PmConfig::default(),
        workspace.path().to_path_buf(),
    )
    .unwrap()
    .with_json_output(true);

    let out = run(&context, &["status"]).unwrap();
    let report: Report = serde_json::from_str(&out).unwrap();
    assert_eq!(report.operation, Operation::Status);
}

#[test]
fn test_clone_routes_through_workflow() {
    let workspace = TempDir::new().unwrap();
    let commands = CommandRegistry::new();
    commands.register(Operation::Clone, Arc::new(MaterializingClone::new()));
    let context = RunContext::from_parts(
        manager_with(commands, HandlerRegistry::new()),
        PmConfig::default(),
        workspace.path().to_path_buf(),
    )
    .unwrap();

    let target = workspace.path().join("deps").join("pkg");
    let target_arg = target.to_string_lossy().to_string();

    let err = run(&context, &["clone", &target_arg, "--pm", "git"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Precondition);

    let out = run(&context, &["clone", &target_arg, "-c", "--pm", "git"]).unwrap();
    assert_eq!(out, "clone done");
    assert!(target.join("package.json").is_file());
}

#[test]
fn test_unregistered_operation_reports_error() {
    let workspace = TempDir::new().unwrap();
    let context = RunContext::from_parts(
        manager_with(CommandRegistry::with_builtins(), HandlerRegistry::new()),
        PmConfig::default(),
        workspace.path().to_path_buf(),
    )
    .unwrap();

    let err = run(&context, &["publish"]).unwrap_err();
    assert!(err.to_string().contains("'publish'"));
    assert_eq!(sourcemint::cli::map_error(&err), format!("ERROR: {}", err));
}
