use crate::common::Workspace;
use lbrmeta::test_utils::LibraryFixture;
use predicates::prelude::*;

const MOUSER_LINK: &str = "https://www.mouser.com/ProductDetail/595-SN74HC00N";

#[test]
fn test_help_lists_flags() {
    let ws = Workspace::new();
    ws.lbrmeta()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--no-progress"));
}

#[test]
fn test_invalid_directory_fails() {
    let ws = Workspace::new();
    ws.lbrmeta()
        .arg("does-not-exist")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid value"))
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn test_missing_single_file_fails() {
    let ws = Workspace::new();
    ws.lbrmeta().args(["--file", "absent.lbr"]).assert().failure().code(1);
}

#[test]
fn test_malformed_library_left_untouched() {
    let ws = Workspace::new();
    ws.write("libs/broken.lbr", "<eagle><drawing>");
    ws.write("libs/board.lbr", "<?xml version=\"1.0\"?>\n<board/>\n");

    ws.lbrmeta()
        .args(["--no-progress", "libs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished"))
        .stderr(predicate::str::contains("is not a valid EAGLE library"));

    assert_eq!(ws.read("libs/broken.lbr"), "<eagle><drawing>");
    assert_eq!(ws.read("libs/board.lbr"), "<?xml version=\"1.0\"?>\n<board/>\n");
}

#[test]
fn test_foreign_links_need_no_network() {
    let ws = Workspace::new();
    let original = LibraryFixture::new().device("NAND", "SOIC14", &[("DISTLINK", MOUSER_LINK)]).to_xml();
    ws.write("logic.lbr", &original);

    ws.lbrmeta()
        .args(["--no-progress", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Finished"))
        .stdout(predicate::str::contains("for warnings").not());

    assert_eq!(ws.read("logic.lbr"), original);
    assert!(!ws.path().join("log.txt").exists());
}

#[test]
fn test_stale_fields_stripped_from_file() {
    let ws = Workspace::new();
    ws.write(
        "logic.lbr",
        &LibraryFixture::new()
            .device("NAND", "SOIC14", &[
                ("DISTLINK", MOUSER_LINK),
                ("MPN", "SN74HC00N"),
                ("PRICE", "0.35"),
                ("VALUE", "74HC00"),
            ])
            .to_xml(),
    );

    ws.lbrmeta().args(["-q", "--file", "logic.lbr"]).assert().success();

    let content = ws.read("logic.lbr");
    assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(content.contains(r#"<attribute name="DISTLINK" value="https://www.mouser.com/ProductDetail/595-SN74HC00N" constant="no"/>"#));
    assert!(content.contains(r#"<attribute name="VALUE" value="74HC00" constant="no"/>"#));
    assert!(!content.contains(r#"name="MPN""#));
    assert!(!content.contains(r#"name="PRICE""#));
    assert!(!content.contains("</attribute>"));
}

#[test]
fn test_recursive_scan() {
    let ws = Workspace::new();
    let stale = LibraryFixture::new()
        .device("NAND", "SOIC14", &[("DISTLINK", MOUSER_LINK), ("MFR", "TI")])
        .to_xml();
    ws.write("top.lbr", &stale);
    ws.write("vendor/nested.lbr", &stale);

    ws.lbrmeta().args(["--no-progress", "."]).assert().success();
    assert!(!ws.read("top.lbr").contains("name=\"MFR\""));
    assert!(ws.read("vendor/nested.lbr").contains("name=\"MFR\""));

    ws.lbrmeta().args(["--no-progress", "--recursive", "."]).assert().success();
    assert!(!ws.read("vendor/nested.lbr").contains("name=\"MFR\""));
}

#[test]
fn test_invalid_config_file_fails() {
    let ws = Workspace::new();
    ws.write("bad.toml", "max_attempts = \"many\"\n");
    ws.write("logic.lbr", &LibraryFixture::new().to_xml());

    ws.lbrmeta()
        .args(["--config", "bad.toml", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_config_from_home_directory() {
    let ws = Workspace::new();
    ws.write(".lbrmeta/config.toml", "link_token = \"SRCLINK\"\n");
    ws.write(
        "logic.lbr",
        &LibraryFixture::new()
            .device("NAND", "SOIC14", &[("SRCLINK", MOUSER_LINK), ("MPN", "OLD")])
            .to_xml(),
    );

    ws.lbrmeta().args(["--no-progress", "."]).assert().success();

    assert!(!ws.read("logic.lbr").contains(r#"name="MPN""#));
}

#[test]
fn test_missing_config_file_reports_config_error() {
    let ws = Workspace::new();
    ws.write("logic.lbr", &LibraryFixture::new().to_xml());

    ws.lbrmeta()
        .args(["--config", "absent.toml", "."])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("--config"));
}
