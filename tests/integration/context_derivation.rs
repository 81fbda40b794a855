//! Context inheritance across program and package orchestrators

use sourcemint::command::CommandRegistry;
use sourcemint::handler::HandlerRegistry;
use sourcemint::{ErrorKind, Manager, PmState};
use std::fs;
use tempfile::TempDir;

use crate::integration::{canonical, manager_with, test_home_base};

#[tokio::test]
async fn test_program_context_computes_meta_path() {
    let dir = TempDir::new().unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());

    let pm = manager.for_program_path(dir.path()).await.unwrap();
    let root = canonical(dir.path());

    assert_eq!(pm.state(), PmState::Ready);
    assert_eq!(pm.context().home_base_path(), test_home_base().as_path());
    assert_eq!(
        pm.context().meta_base_path(),
        Some(root.join(".sourcemint").as_path())
    );
    assert_eq!(
        pm.context().program().map(|p| p.package.path.clone()),
        Some(root)
    );
    assert!(pm.context().package().is_none());
}

#[tokio::test]
async fn test_child_inherits_home_time_program_and_meta() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("packages").join("lib");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("package.json"), r#"{"name":"lib"}"#).unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());

    let parent = manager.for_program_path(dir.path()).await.unwrap();
    let child = manager
        .for_package_path(&nested, Some(&parent))
        .await
        .unwrap();

    assert_eq!(child.context().home_base_path(), parent.context().home_base_path());
    assert_eq!(child.context().time(), parent.context().time());
    assert_eq!(child.context().meta_base_path(), parent.context().meta_base_path());
    assert_eq!(
        child.context().program().map(|p| p.path.clone()),
        parent.context().program().map(|p| p.path.clone())
    );
    assert_eq!(child.context().package().and_then(|p| p.name()), Some("lib"));

    // Copy-then-diverge: the parent is untouched.
    assert!(parent.context().package().is_none());
}

#[tokio::test]
async fn test_package_without_parent_uses_own_meta_path() {
    let dir = TempDir::new().unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());

    let pm = manager.for_package_path(dir.path(), None).await.unwrap();

    assert!(pm.context().program().is_none());
    assert_eq!(
        pm.context().meta_base_path(),
        Some(canonical(dir.path()).join(".sourcemint").as_path())
    );
}

#[tokio::test]
async fn test_child_of_package_parent_keeps_parent_meta_path() {
    let outer = TempDir::new().unwrap();
    let inner = TempDir::new().unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());

    // A package-only parent already fixes the lineage's meta path.
    let parent = manager.for_package_path(outer.path(), None).await.unwrap();
    let child = manager
        .for_package_path(inner.path(), Some(&parent))
        .await
        .unwrap();
    assert_eq!(child.context().meta_base_path(), parent.context().meta_base_path());
    assert_ne!(
        child.context().meta_base_path(),
        Some(canonical(inner.path()).join(".sourcemint").as_path())
    );
}

#[tokio::test]
async fn test_custom_meta_dir_name() {
    let dir = TempDir::new().unwrap();
    let manager = Manager::builder(test_home_base())
        .meta_dir_name(".pinf")
        .build()
        .unwrap();

    let pm = manager.for_program_path(dir.path()).await.unwrap();
    assert_eq!(
        pm.context().meta_base_path(),
        Some(canonical(dir.path()).join(".pinf").as_path())
    );
}

#[tokio::test]
async fn test_program_init_error_propagates() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("program.json"), "not json").unwrap();
    let manager = manager_with(CommandRegistry::new(), HandlerRegistry::new());

    let err = manager.for_program_path(dir.path()).await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Delegation);
    assert!(err.to_string().contains("program init"));
}
