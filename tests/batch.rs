use camino::Utf8PathBuf;
use glowblocks::batch::{EmitOptions, compile_file, compile_tree, find_workspaces, output_path};
use glowblocks::{CompilerConfig, GENERATION_FAILED_PLACEHOLDER};
use std::fs;

fn tree() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(
        root.join("a.xml"),
        r#"<xml><block type="forever"><statement name="DO"><block type="rate"/></statement></block></xml>"#,
    )
    .unwrap();
    fs::write(
        root.join("sub/b.json"),
        r#"{"blocks": [{"type": "scene_title", "fields": {"TEXT": "B"}}]}"#,
    )
    .unwrap();
    fs::write(root.join("sub/broken.xml"), "<xml><block/></xml>").unwrap();
    fs::write(root.join("notes.txt"), "not a workspace").unwrap();
    (dir, root)
}

#[test]
fn finds_only_workspace_files() {
    let (_dir, root) = tree();
    let found = find_workspaces(&root).unwrap();
    let rel: Vec<String> = found
        .iter()
        .map(|p| p.strip_prefix(&root).unwrap().to_string())
        .collect();
    assert_eq!(rel, ["a.xml", "sub/b.json", "sub/broken.xml"]);
}

#[test]
fn compiles_tree_in_place() {
    let (_dir, root) = tree();
    let opts = EmitOptions {
        header: true,
        ..Default::default()
    };
    let report = compile_tree(&root, &opts).unwrap();
    assert_eq!(report.written.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, root.join("sub/broken.xml"));

    let a = fs::read_to_string(root.join("a.py")).unwrap();
    assert_eq!(a, "GlowScript 3.2 VPython\nwhile True:\n    rate(100)\n");
    let b = fs::read_to_string(output_path(&root.join("sub/b.json"))).unwrap();
    assert_eq!(b, "GlowScript 3.2 VPython\nscene.title = \"B\"\n");
    assert!(!root.join("sub/broken.py").exists());
}

#[test]
fn strict_mode_turns_placeholder_into_error() {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    let path = root.join("bad.xml");
    fs::write(&path, r#"<xml><block type="hyperdrive"/></xml>"#).unwrap();

    let lenient = compile_file(&path, &EmitOptions::default()).unwrap();
    assert_eq!(lenient, GENERATION_FAILED_PLACEHOLDER);

    let strict = EmitOptions {
        strict: true,
        ..Default::default()
    };
    let err = compile_file(&path, &strict).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown block kind `hyperdrive`"));
}

#[test]
fn config_indent_applies() {
    let (_dir, root) = tree();
    let opts = EmitOptions {
        config: CompilerConfig {
            indent_width: 2,
            ..Default::default()
        },
        ..Default::default()
    };
    let code = compile_file(&root.join("a.xml"), &opts).unwrap();
    assert_eq!(code, "while True:\n  rate(100)\n");
}

#[test]
fn shared_output_path_fails_both_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    fs::write(root.join("a.xml"), r#"<xml><block type="rate"/></xml>"#).unwrap();
    fs::write(root.join("a.json"), r#"{"blocks": [{"type": "break"}]}"#).unwrap();
    fs::write(root.join("c.json"), r#"{"blocks": [{"type": "break"}]}"#).unwrap();

    let report = compile_tree(&root, &EmitOptions::default()).unwrap();
    assert_eq!(report.written, [root.join("c.py")]);
    let mut failed: Vec<_> = report.failed.iter().map(|(p, _)| p.clone()).collect();
    failed.sort();
    assert_eq!(failed, [root.join("a.json"), root.join("a.xml")]);
    for (_, err) in &report.failed {
        assert!(err.to_string().contains("a.py"), "{err:#}");
    }
    assert!(!root.join("a.py").exists());
}
