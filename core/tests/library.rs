use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    thread,
};

use approx::assert_relative_eq;
use gbasis::{
    basis::ShellType,
    config::LibraryConfig,
    integrals::overlap,
    library::{parse_file, BasisError, BasisLibrary, ErrorCategory, ExclusionReason, Exclusions},
};
use nalgebra::Vector3;

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

#[test]
fn load_sto3g() {
    let library = BasisLibrary::new(data_dir());
    let table = library.load("sto-3g").unwrap();

    assert_eq!(table.elements().collect::<Vec<_>>(), vec![1, 6, 8]);

    let carbon = table
        .shells(6)
        .unwrap()
        .iter()
        .map(|shell| shell.shell_type)
        .collect::<Vec<_>>();
    assert_eq!(carbon, vec![ShellType::S, ShellType::S, ShellType::P]);

    let origin = Vector3::new(0.0, 0.0, 2.27);
    for (atomic_number, count) in [(1, 1), (6, 5), (8, 5)] {
        let functions = table
            .contracted_functions(atomic_number, origin)
            .unwrap()
            .unwrap();
        assert_eq!(functions.len(), count);

        for function in &functions {
            assert_relative_eq!(overlap(function, function), 1.0, epsilon = 1e-10);
        }
    }
}

#[test]
fn repeated_loads_share_the_cached_table() {
    let library = BasisLibrary::new(data_dir());

    let first = library.load("sto-3g").unwrap();
    let second = library.load("sto-3g").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    library.clear_cache();
    let reloaded = library.load("sto-3g").unwrap();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(first, reloaded);
}

#[test]
fn parsing_is_deterministic() {
    let path = data_dir().join("sto-3g");
    let first = parse_file(&path).unwrap();
    let second = parse_file(&path).unwrap();
    assert_eq!(first, second);

    let library = BasisLibrary::new(data_dir());
    assert_eq!(*library.load("sto-3g").unwrap(), first);
}

#[test]
fn concurrent_loads_agree() {
    let library = BasisLibrary::new(data_dir());

    let tables = thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| library.load("sto-3g").unwrap()))
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>()
    });

    for table in &tables {
        assert_eq!(**table, *tables[0]);
    }
    assert!(Arc::ptr_eq(&library.load("sto-3g").unwrap(), &library.load("sto-3g").unwrap()));
}

#[test]
fn excluded_names_never_touch_the_filesystem() {
    let missing = BasisLibrary::new("/this/directory/does/not/exist");
    assert!(matches!(
        missing.load("lanl2dz_ecp"),
        Err(BasisError::Unsupported {
            reason: ExclusionReason::Unsupported,
            ..
        })
    ));

    let directory = tempfile::tempdir().unwrap();
    fs::write(directory.path().join("ugbs"), "basis \"garbage\" $$$").unwrap();

    let library = BasisLibrary::new(directory.path());
    assert!(matches!(
        library.load("ugbs"),
        Err(BasisError::Unsupported {
            reason: ExclusionReason::ValencePolarization,
            ..
        })
    ));

    // the same file is read once the exclusions are lifted
    let library = BasisLibrary::with_exclusions(directory.path(), Exclusions::none());
    match library.load("ugbs") {
        Err(BasisError::Parse { name, source }) => {
            assert_eq!(name, "ugbs");
            assert_eq!(source.category(), ErrorCategory::Lexical);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn paths_cannot_dodge_the_exclusions() {
    let directory = tempfile::tempdir().unwrap();
    fs::write(
        directory.path().join("ugbs"),
        "basis \"H\" SPHERICAL\nH S\n 1.0 1.0\nend\n",
    )
    .unwrap();
    let library = BasisLibrary::new(directory.path());

    let absolute = directory.path().join("ugbs");
    for name in ["./ugbs", "ugbs/", absolute.to_str().unwrap()] {
        match library.load(name) {
            Err(BasisError::InvalidName { name: rejected }) => assert_eq!(rejected, name),
            other => panic!("expected an invalid name for {name}, got {other:?}"),
        }
    }

    assert!(matches!(
        library.load("ugbs"),
        Err(BasisError::Unsupported {
            reason: ExclusionReason::ValencePolarization,
            ..
        })
    ));
}

#[test]
fn missing_and_malformed_files_are_distinguished() {
    let directory = tempfile::tempdir().unwrap();
    let library = BasisLibrary::new(directory.path());

    match library.load("6-31g") {
        Err(BasisError::NotFound { name, path }) => {
            assert_eq!(name, "6-31g");
            assert_eq!(path, directory.path().join("6-31g"));
        }
        other => panic!("expected not found, got {other:?}"),
    }

    fs::write(
        directory.path().join("6-31g"),
        "basis \"Xx_6-31G\" CARTESIAN\nXx S\n 1.0 1.0\nend\n",
    )
    .unwrap();

    match library.load("6-31g") {
        Err(BasisError::Parse { source, .. }) => {
            assert_eq!(source.category(), ErrorCategory::UnresolvedSymbol);
            assert_eq!(source.position.line, 2);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn failed_loads_are_not_cached() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("minimal");
    fs::write(&path, "basis \"H\" SPHERICAL\nH S\n 1.0\nend\n").unwrap();

    let library = BasisLibrary::new(directory.path());
    assert!(matches!(
        library.load("minimal"),
        Err(BasisError::Parse { .. })
    ));

    fs::write(&path, "basis \"H\" SPHERICAL\nH S\n 1.0 1.0\nend\n").unwrap();
    let table = library.load("minimal").unwrap();
    assert_eq!(table.shells(1).unwrap()[0].primitives, vec![(1.0, 1.0)]);
}

#[test]
fn library_from_config() {
    let config = serde_json::json!({
        "directory": data_dir(),
        "exclusions": { "unsupported": ["sto-3g"] },
    });
    let config = LibraryConfig::from_reader(config.to_string().as_bytes()).unwrap();
    let library = BasisLibrary::from(config);

    assert!(matches!(
        library.load("STO-3G"),
        Err(BasisError::Unsupported { .. })
    ));
    assert_eq!(
        library.exclusions().reason("ugbs"),
        Some(ExclusionReason::ValencePolarization)
    );
}
