use std::fs;
use std::path::{Path, PathBuf};

use rtl::{EncodeOptions, ParseFailure, Rules, parse_file, save_to_file};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[test]
fn test_padded_glider() {
    let pattern = parse_file(data("glider.rtl")).unwrap();
    assert_eq!(pattern.grid.width(), 7);
    assert_eq!(pattern.grid.height(), 7);
    assert_eq!(pattern.rules, Rules::default());
    assert_eq!(
        pattern.grid.alive_cells().collect::<Vec<_>>(),
        vec![(2, 3), (3, 4), (4, 2), (4, 3), (4, 4)]
    );
}

#[test]
fn test_broken_file_counts_every_error() {
    let error = parse_file(data("broken.rtl")).unwrap_err();
    let failure = error.downcast_ref::<ParseFailure>().unwrap();
    assert_eq!(failure.errors, 2);
    assert!(failure.name.ends_with("broken.rtl"));
}

#[test]
fn test_save_and_reload() {
    let pattern = parse_file(data("glider.rtl")).unwrap();
    let path = std::env::temp_dir().join(format!("rtl-save-{}.rtl", std::process::id()));

    save_to_file(&pattern, &path, &EncodeOptions::default()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let reloaded = parse_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(
        text,
        "# Auto generated map file\n\
         x = 7, y = 7, rule = B3/S23\n\
         7b$7b$3bo3b$4bo2b$2b3o2b$7b$7b!\n"
    );
    assert_eq!(reloaded, pattern);
}

#[test]
fn test_save_to_missing_directory() {
    let pattern = parse_file(data("glider.rtl")).unwrap();
    let error = save_to_file(
        &pattern,
        "/nonexistent/dir/out.rtl",
        &EncodeOptions::default(),
    )
    .unwrap_err();
    assert!(error.to_string().starts_with("Failed to create"));
}
