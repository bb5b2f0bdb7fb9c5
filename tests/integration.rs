use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_manos")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture_dir() -> String {
    format!("{}/tests/fixtures/gizmo", env!("CARGO_MANIFEST_DIR"))
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap_or_else(|_| panic!("missing {name}"))
}

// -- output layout --

#[test]
fn writes_one_page_per_symbol() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    let mut names: Vec<String> = fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["gizmo.3", "gizmo_open.3", "gizmo_version.3"]);
}

#[test]
fn creates_missing_output_directory() {
    let out = TempDir::new().unwrap();
    let nested = out.path().join("share/man/man3");
    cmd().arg(fixture_dir()).arg("-o").arg(&nested).assert().success();
    assert!(nested.join("gizmo_open.3").is_file());
}

#[test]
fn function_page_content() {
    let out = TempDir::new().unwrap();
    cmd().arg(fixture_dir()).arg("-o").arg(out.path()).assert().success();

    let page = read(out.path(), "gizmo_open.3");
    assert!(page.starts_with(".TH \"GIZMO\" \"3\"\n.SH NAME\ngizmo_open \\- opens a gizmo\n"));
    assert!(page.contains(".SH LIBRARY\nGizmo library (libgizmo, -lgizmo)\n"));
    assert!(page.contains(".SH SYNOPSIS\n.nf\n.B #include <gizmo.h>\n.PP\n"));
    assert!(page.contains(".BI \"int gizmo_open(const char *\" path \");\"\n.fi\n"));
    assert!(page.contains(".SH DESCRIPTION\nOpens the device at \\f[I]path\\f[R].\n"));
    assert!(page.contains(".SH RETURN VALUE\nA descriptor.\n"));
    assert!(page.ends_with(".SH BUGS\nLeaks on error.\n"));
    assert!(!page.contains(".SH PARAMETERS"));
}

#[test]
fn references_end_up_in_see_also() {
    let out = TempDir::new().unwrap();
    cmd().arg(fixture_dir()).arg("-o").arg(out.path()).assert().success();

    let page = read(out.path(), "gizmo_version.3");
    assert!(page.contains(".BI \"const char *gizmo_version(void);\"\n"));
    assert!(page.contains("See \\f[B]gizmo_open\\f[R](3).\n"));
    assert!(page.ends_with(".SH SEE ALSO\n.BR gizmo_open (3)\n"));
}

#[test]
fn header_page_groups_members() {
    let out = TempDir::new().unwrap();
    cmd().arg(fixture_dir()).arg("-o").arg(out.path()).assert().success();

    let page = read(out.path(), "gizmo.3");
    assert!(page.contains(".SH NAME\ngizmo.h \\- gizmo interface\n"));
    assert!(page.contains("\\fBgizmo_version\\fR(3);T{\nLibrary version string.\nT}\n"));
    assert!(page.contains(".SS Input and output\nReading and writing.\n.TS\n"));
    assert!(page.contains("\\fBgizmo_open\\fR(3);T{\nOpens a gizmo.\nT}\n.TE\n"));
}

// -- options --

#[test]
fn with_parameters_adds_section() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["--with-parameters", "-o"])
        .arg(out.path())
        .assert()
        .success();

    let page = read(out.path(), "gizmo_open.3");
    assert!(page.contains(".SH PARAMETERS\n.TP\npath\nFile to open.\n.SH RETURN VALUE\n"));
}

#[test]
fn section_changes_file_names_and_heading() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["--section", "7", "-o"])
        .arg(out.path())
        .assert()
        .success();

    let page = read(out.path(), "gizmo_version.7");
    assert!(page.starts_with(".TH \"GIZMO\" \"7\"\n"));
    assert!(page.contains(".BR gizmo_open (7)\n"));
    assert!(!out.path().join("gizmo_version.3").exists());
}

#[test]
fn heading_options() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["--topic", "GIZMO API", "--header-middle", "Gizmo Manual", "-o"])
        .arg(out.path())
        .assert()
        .success();

    let page = read(out.path(), "gizmo.3");
    assert!(page.starts_with(".TH \"GIZMO API\" \"3\" \"\" \"\" \"Gizmo Manual\"\n"));
}

#[test]
fn autofill_uses_project_version() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["--autofill", "-o"])
        .arg(out.path())
        .assert()
        .success();

    let page = read(out.path(), "gizmo.3");
    let heading = page.lines().next().unwrap();
    assert!(heading.starts_with(".TH \"GIZMO\" \"3\" \""));
    assert!(heading.ends_with(" \"Gizmo 2.1\""));
}

#[test]
fn full_include_path() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["--include-path", "full", "-o"])
        .arg(out.path())
        .assert()
        .success();

    let page = read(out.path(), "gizmo_open.3");
    assert!(page.contains(".B #include <include/gizmo.h>\n"));
}

#[test]
fn preamble_and_epilogue_files() {
    let out = TempDir::new().unwrap();
    let preamble = out.path().join("preamble.roff");
    let epilogue = out.path().join("epilogue.roff");
    fs::write(&preamble, ".\\\" Generated by manos.\n").unwrap();
    fs::write(&epilogue, ".SH COPYRIGHT\nPublic domain.\n").unwrap();
    let pages = out.path().join("man");

    cmd()
        .arg(fixture_dir())
        .arg("--preamble")
        .arg(&preamble)
        .arg("--epilogue")
        .arg(&epilogue)
        .arg("-o")
        .arg(&pages)
        .assert()
        .success();

    let page = read(&pages, "gizmo_open.3");
    assert!(page.starts_with(".\\\" Generated by manos.\n.TH "));
    assert!(page.ends_with("Leaks on error.\n.SH COPYRIGHT\nPublic domain.\n"));
}

#[test]
fn filter_excludes_matching_files() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["--filter", "^group__", "-o"])
        .arg(out.path())
        .assert()
        .success();

    assert!(out.path().join("gizmo_version.3").is_file());
    assert!(!out.path().join("gizmo_open.3").exists());
    let page = read(out.path(), "gizmo_version.3");
    assert!(!page.contains(".SH SEE ALSO"));
}

// -- diagnostics --

#[test]
fn warnings_go_to_stderr() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("warning: unsupported xrefsect: Todo"));
}

#[test]
fn quiet_silences_warnings() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["-q", "-o"])
        .arg(out.path())
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_directory_fails() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no XML files found"));
}

#[test]
fn invalid_section_fails() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .args(["--section", "12", "-o"])
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected section in the inclusive range 1-9, found 12"));
}

#[test]
fn missing_preamble_fails() {
    let out = TempDir::new().unwrap();
    cmd()
        .arg(fixture_dir())
        .arg("--preamble")
        .arg(out.path().join("nope.roff"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find:"));
}

#[test]
fn malformed_xml_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.xml"), "<doxygen><compounddef>").unwrap();
    cmd()
        .arg(dir.path())
        .arg("-o")
        .arg(dir.path().join("man"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}
