//! Derivation keeps the lineage's fixed paths regardless of the layout it runs over

use proptest::prelude::*;
use sourcemint::entity::{Package, Program, PROGRAM_DESCRIPTOR};
use sourcemint::Context;
use std::path::PathBuf;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}"
}

fn absolute_path() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(segment(), 1..5).prop_map(|segments| {
        let mut path = PathBuf::from("/");
        for s in segments {
            path.push(s);
        }
        path
    })
}

fn program_at(root: &PathBuf) -> Program {
    Program {
        path: root.join(PROGRAM_DESCRIPTOR),
        package: Package {
            path: root.clone(),
            descriptor: None,
        },
        descriptor: None,
    }
}

/// Every descendant shares the root's home and first meta path
#[test]
fn test_lineage_keeps_home_and_meta_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                absolute_path(),
                absolute_path(),
                prop::collection::vec(absolute_path(), 1..6),
                segment(),
            ),
            |(home, program_root, package_paths, meta_dir)| {
                let mut root = Context::new(home.clone()).unwrap();
                root.attach_program(program_at(&program_root), &meta_dir);
                let expected_meta = program_root.join(&meta_dir);

                let mut current = root;
                for package_path in package_paths {
                    let mut child = current.derive_child();
                    child.attach_package(
                        Package {
                            path: package_path.clone(),
                            descriptor: None,
                        },
                        &meta_dir,
                    );

                    prop_assert_eq!(child.home_base_path(), home.as_path());
                    prop_assert_eq!(child.meta_base_path(), Some(expected_meta.as_path()));
                    prop_assert_eq!(child.time(), current.time());
                    prop_assert_eq!(child.resolve_path(), Some(package_path.as_path()));
                    current = child;
                }

                Ok(())
            },
        )
        .unwrap();
}

/// A derived child never carries its parent's package
#[test]
fn test_child_starts_without_package_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(absolute_path(), absolute_path()), |(home, package_path)| {
            let mut parent = Context::new(home).unwrap();
            parent.attach_package(
                Package {
                    path: package_path.clone(),
                    descriptor: None,
                },
                ".sourcemint",
            );

            let child = parent.derive_child();
            prop_assert!(child.package().is_none());
            prop_assert_eq!(child.resolve_path(), None);
            prop_assert_eq!(child.meta_base_path(), parent.meta_base_path());
            Ok(())
        })
        .unwrap();
}
