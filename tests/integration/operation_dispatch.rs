//! Dispatch of the ten top-level operations to registered commands

use sourcemint::command::CommandRegistry;
use sourcemint::handler::HandlerRegistry;
use sourcemint::{ErrorKind, Operation, OperationOptions, PmError};
use std::sync::Arc;
use tempfile::TempDir;

use crate::integration::{canonical, manager_with, RecordingCommand};

#[tokio::test]
async fn test_every_operation_reaches_its_command() {
    let dir = TempDir::new().unwrap();
    let commands = CommandRegistry::new();
    let mut recorders = Vec::new();
    for op in Operation::ALL {
        let recorder = RecordingCommand::new(op);
        recorders.push(Arc::clone(&recorder.calls));
        commands.register(op, Arc::new(recorder));
    }
    let manager = manager_with(commands, HandlerRegistry::new());
    let program = manager.for_program_path(dir.path()).await.unwrap();
    let pm = manager
        .for_package_path(dir.path(), Some(&program))
        .await
        .unwrap();

    let options = OperationOptions::with_pm("npm");
    let reports = vec![
        pm.install(&options).await.unwrap(),
        pm.update(&options).await.unwrap(),
        pm.status(&options).await.unwrap(),
        pm.bump(&options).await.unwrap(),
        pm.publish(&options).await.unwrap(),
        pm.clone(&options).await.unwrap(),
        pm.deploy(&options).await.unwrap(),
        pm.help(&options).await.unwrap(),
        pm.fix(&options).await.unwrap(),
        pm.edit(&options).await.unwrap(),
    ];

    for (report, op) in reports.iter().zip(Operation::ALL) {
        assert_eq!(report.operation, op);
    }
    for (calls, op) in recorders.iter().zip(Operation::ALL) {
        let calls = calls.lock();
        assert_eq!(calls.len(), 1, "{} should run exactly once", op);
        assert_eq!(calls[0].options.pm.as_deref(), Some("npm"));
        assert_eq!(calls[0].package_path, Some(canonical(dir.path())));
    }
}

#[tokio::test]
async fn test_unregistered_operation_is_a_failed_future() {
    let dir = TempDir::new().unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());
    let pm = manager.for_program_path(dir.path()).await.unwrap();

    let err = pm.install(&OperationOptions::default()).await.unwrap_err();
    assert!(matches!(err, PmError::CommandUnavailable(Operation::Install)));
    assert_eq!(err.kind(), ErrorKind::Delegation);
}

#[tokio::test]
async fn test_builtin_status_and_help() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"name":"demo","version":"1.0.0"}"#,
    )
    .unwrap();
    let manager = manager_with(CommandRegistry::with_builtins(), HandlerRegistry::new());
    let program = manager.for_program_path(dir.path()).await.unwrap();
    let pm = manager
        .for_package_path(dir.path(), Some(&program))
        .await
        .unwrap();

    let status = pm.status(&OperationOptions::default()).await.unwrap();
    assert!(status.summary.contains("Package: demo"));
    assert!(status.summary.contains("Meta: "));
    assert!(status.data.get("home_base_path").is_some());

    let help = pm.help(&OperationOptions::default()).await.unwrap();
    assert!(help.summary.contains("install  (no command registered)"));
    assert!(help.summary.lines().any(|line| line.trim() == "status"));
}
