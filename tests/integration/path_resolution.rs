//! Path resolution: default precedence and backend handler capability

use parking_lot::Mutex;
use sourcemint::command::CommandRegistry;
use sourcemint::handler::HandlerRegistry;
use sourcemint::{ErrorKind, OperationOptions};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::integration::{canonical, manager_with, BareHandler, FixedPathHandler};

#[tokio::test]
async fn test_default_prefers_package_path() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("lib");
    fs::create_dir(&nested).unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());

    let program = manager.for_program_path(dir.path()).await.unwrap();
    assert_eq!(
        program.path(&OperationOptions::default()).await.unwrap(),
        Some(canonical(dir.path()))
    );

    let package = manager
        .for_package_path(&nested, Some(&program))
        .await
        .unwrap();
    assert_eq!(
        package.path(&OperationOptions::default()).await.unwrap(),
        Some(canonical(&nested))
    );
}

#[tokio::test]
async fn test_handler_path_capability_is_used() {
    let dir = TempDir::new().unwrap();
    let calls = Arc::new(Mutex::new(0));
    let handlers = HandlerRegistry::new();
    handlers.register(Arc::new(FixedPathHandler {
        pm_type: "git",
        answer: PathBuf::from("/checkouts/git/pkg"),
        calls: Arc::clone(&calls),
    }));
    let manager = manager_with(CommandRegistry::new(), handlers);
    let program = manager.for_program_path(dir.path()).await.unwrap();
    let pm = manager
        .for_package_path(dir.path(), Some(&program))
        .await
        .unwrap();

    let resolved = pm.path(&OperationOptions::with_pm("git")).await.unwrap();
    assert_eq!(resolved, Some(PathBuf::from("/checkouts/git/pkg")));
    assert_eq!(*calls.lock(), 1);
}

#[tokio::test]
async fn test_handler_is_skipped_without_package() {
    let dir = TempDir::new().unwrap();
    let calls = Arc::new(Mutex::new(0));
    let handlers = HandlerRegistry::new();
    handlers.register(Arc::new(FixedPathHandler {
        pm_type: "git",
        answer: PathBuf::from("/elsewhere"),
        calls: Arc::clone(&calls),
    }));
    let manager = manager_with(CommandRegistry::new(), handlers);
    let program = manager.for_program_path(dir.path()).await.unwrap();

    let resolved = program.path(&OperationOptions::with_pm("git")).await.unwrap();
    assert_eq!(resolved, Some(canonical(dir.path())));
    assert_eq!(*calls.lock(), 0);
}

#[tokio::test]
async fn test_handler_without_capability_falls_back() {
    let dir = TempDir::new().unwrap();
    let handlers = HandlerRegistry::new();
    handlers.register(Arc::new(BareHandler("npm")));
    let manager = manager_with(CommandRegistry::new(), handlers);
    let program = manager.for_program_path(dir.path()).await.unwrap();
    let pm = manager
        .for_package_path(dir.path(), Some(&program))
        .await
        .unwrap();

    let resolved = pm.path(&OperationOptions::with_pm("npm")).await.unwrap();
    assert_eq!(resolved, Some(canonical(dir.path())));
}

#[tokio::test]
async fn test_unknown_backend_is_fatal() {
    let dir = TempDir::new().unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());
    let program = manager.for_program_path(dir.path()).await.unwrap();
    let pm = manager
        .for_package_path(dir.path(), Some(&program))
        .await
        .unwrap();

    let err = pm.path(&OperationOptions::with_pm("bower")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HandlerResolution);
}

#[tokio::test]
async fn test_path_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());
    let program = manager.for_program_path(dir.path()).await.unwrap();
    let pm = manager
        .for_package_path(dir.path(), Some(&program))
        .await
        .unwrap();

    let options = OperationOptions::default();
    let first = pm.path(&options).await.unwrap();
    let second = pm.path(&options).await.unwrap();
    assert_eq!(first, second);
}
