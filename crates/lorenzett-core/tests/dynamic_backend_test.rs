//! Dynamic backend tests
//!
//! Library resolution, load failure paths, and the full native lifecycle
//! against the test component library in `tests/fixtures/test-components`.

mod common;

use std::path::PathBuf;

use lorenzett_core::backend::dynamic::{library, ClassSymbols, LORENZETT_ABI_VERSION};
use lorenzett_core::prelude::*;

#[test]
fn test_load_nonexistent_library() {
    let config = LibraryConfig {
        name: "/nonexistent/path/liblorenzett.so".into(),
        search_paths: vec![],
    };

    match DynamicBackend::load(&config) {
        Err(Error::LoadFailed(message)) => {
            assert!(message.contains("/nonexistent/path/liblorenzett.so"));
        }
        other => panic!("Expected LoadFailed, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_load_non_library_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(libloading::library_filename("lorenzett"));
    std::fs::write(&path, b"not a shared object").unwrap();

    let config = LibraryConfig {
        name: "lorenzett".into(),
        search_paths: vec![dir.path().to_path_buf()],
    };
    assert_eq!(library::resolve(&config), path);
    assert!(matches!(DynamicBackend::load(&config), Err(Error::LoadFailed(_))));
    assert!(!library::is_loaded(&path));
}

#[test]
fn test_job_load_reports_library_failure() {
    let config = JobConfig {
        library: LibraryConfig {
            name: "/nonexistent/liblorenzett.so".into(),
            search_paths: vec![PathBuf::from("/nonexistent")],
        },
        components: vec![ComponentConfig::new("CaloNtupleMaker", "maker")],
    };
    assert!(matches!(Job::load(&config), Err(Error::LoadFailed(_))));
}

#[test]
fn test_abi_contract() {
    assert_eq!(LORENZETT_ABI_VERSION, 1);
    let symbols = ClassSymbols::for_class(CaloRingerBuilder::CLASS_NAME);
    assert_eq!(symbols.create, "CaloRingerBuilder_create");
}

type CounterFn = unsafe extern "C" fn() -> u64;
type LastPropertyFn = unsafe extern "C" fn(*mut u8, usize) -> usize;

fn fixture_counter(symbol: &str) -> u64 {
    let lib = unsafe { libloading::Library::new(common::fixture_path()).unwrap() };
    unsafe { lib.get::<CounterFn>(symbol.as_bytes()).unwrap()() }
}

fn fixture_last_property() -> String {
    let lib = unsafe { libloading::Library::new(common::fixture_path()).unwrap() };
    let mut buf = [0u8; 256];
    let len = unsafe {
        lib.get::<LastPropertyFn>(b"test_components_last_property").unwrap()(buf.as_mut_ptr(), buf.len())
    };
    String::from_utf8(buf[..len].to_vec()).unwrap()
}

#[test]
fn test_repeated_load_reuses_library() {
    let config = common::fixture_config();

    let first = DynamicBackend::load(&config).unwrap();
    let second = DynamicBackend::load(&config).unwrap();

    assert_eq!(first.library().path(), common::fixture_path());
    assert_eq!(first.library().path(), second.library().path());
    assert!(library::is_loaded(&common::fixture_path()));
}

#[test]
fn test_native_component_lifecycle() {
    let backend = DynamicBackend::load(&common::fixture_config()).unwrap();
    let created = fixture_counter("test_components_created");
    let destroyed = fixture_counter("test_components_destroyed");

    let mut maker = Component::<CaloNtupleMaker>::new(
        &backend,
        "maker",
        [
            ("DeltaR", PropertyValue::from(0.1)),
            ("OutputLevel", PropertyValue::from("INFO")),
        ],
    )
    .unwrap();
    assert_eq!(maker.core().class_name(), "CaloNtupleMaker");
    assert_eq!(maker.core().name(), "maker");
    assert_eq!(fixture_last_property(), "maker.OutputLevel=2");

    maker.set_property("DeltaR", 1).unwrap();
    assert_eq!(fixture_last_property(), "maker.DeltaR=1.0");
    assert_eq!(maker.get_property("DeltaR").unwrap(), Some(&PropertyValue::Integer(1)));

    // Native rejection leaves the local record untouched.
    match maker.set_property("DumpCells", true) {
        Err(Error::NativeCall { key, code, .. }) => {
            assert_eq!(key, "DumpCells");
            assert_eq!(code, 7);
        }
        other => panic!("Expected NativeCall, got {:?}", other),
    }
    assert_eq!(maker.get_property("DumpCells").unwrap(), None);
    assert_eq!(fixture_last_property(), "maker.DeltaR=1.0");

    let other = Component::<CaloNtupleMaker>::new(&backend, "other", Vec::<(&str, PropertyValue)>::new())
        .unwrap();
    assert_eq!(fixture_counter("test_components_created") - created, 2);
    assert_eq!(fixture_counter("test_components_destroyed") - destroyed, 0);

    drop(maker);
    drop(other);
    assert_eq!(fixture_counter("test_components_destroyed") - destroyed, 2);

    let err = Component::<CaloNtupleMaker>::new(&backend, "broken", Vec::<(&str, PropertyValue)>::new())
        .unwrap_err();
    assert!(matches!(err, Error::CreationFailed { ref name, .. } if name == "broken"));
    assert_eq!(fixture_counter("test_components_created") - created, 2);
}

#[test]
fn test_class_missing_from_library() {
    let backend = DynamicBackend::load(&common::fixture_config()).unwrap();

    let err = Component::<CaloRingerBuilder>::new(&backend, "rings", Vec::<(&str, PropertyValue)>::new())
        .unwrap_err();
    match err {
        Error::SymbolNotFound { symbol, .. } => assert_eq!(symbol, "CaloRingerBuilder_create"),
        other => panic!("Expected SymbolNotFound, got {}", other),
    }
}
