use super::*;
use crate::library::LibraryDocument;
use crate::test_utils::{LibraryFixture, StubResolver, init_test_logging, sample_record};
use tempfile::TempDir;

const LINK: &str = "https://www.digikey.com/product-detail/en/SN74HC00N";
const CRIMP_LINK: &str = "https://www.digikey.com/product-detail/en/CRIMP-1";

fn updater(resolver: StubResolver) -> MetadataUpdater<StubResolver> {
    init_test_logging(None);
    MetadataUpdater::new(resolver, UpdaterConfig::default()).unwrap()
}

fn parse(fixture: &LibraryFixture) -> LibraryDocument {
    LibraryDocument::parse(&fixture.to_xml()).unwrap()
}

/// Field `(name, value)` pairs of the only part in `document`.
fn fields_of(document: &LibraryDocument) -> Vec<(String, String)> {
    let location = &part_locations(document)[0];
    let mut document = document.clone();
    let element = document.root_mut().descendant_mut(&location.path).unwrap();
    PartDefinition::new(element)
        .fields()
        .into_iter()
        .map(|(_, field)| (field.name, field.value))
        .collect()
}

fn names_of(document: &LibraryDocument) -> Vec<String> {
    fields_of(document).into_iter().map(|(name, _)| name).collect()
}

#[tokio::test]
async fn test_plain_marker_generates_fields_after_it() {
    let fixture = LibraryFixture::new().device("NAND", "DIP14", &[
        ("DISTLINK", LINK),
        ("PACKAGE", "DIP"),
    ]);
    let mut document = parse(&fixture);
    let updater = updater(StubResolver::new().with_record(LINK, sample_record("SN74HC00N", "0.35")));

    let report = updater.update_document(&mut document, "logic").await;

    assert_eq!(names_of(&document), [
        "DISTLINK", "DIST", "DISTPN", "MFR", "MPN", "PRICE", "PACKAGE"
    ]);
    let fields = fields_of(&document);
    assert_eq!(fields[1].1, "Digikey");
    assert_eq!(fields[2].1, "SN74HC00N-ND");
    assert_eq!(fields[4].1, "SN74HC00N");
    assert_eq!(fields[5].1, "0.35");
    assert!(report.warnings.is_empty());
    assert_eq!(report.fields_inserted, 5);
    assert_eq!(report.parts_updated, 1);
    assert!(report.modified());
}

#[tokio::test]
async fn test_suffix_marker_generates_suffixed_names() {
    let fixture = LibraryFixture::new().device("CONN", "TH", &[("DISTLINK_CRIMP", CRIMP_LINK)]);
    let mut document = parse(&fixture);
    let updater = updater(StubResolver::new().with_record(CRIMP_LINK, sample_record("CRIMP-1", "0.10")));

    updater.update_document(&mut document, "connectors").await;

    assert_eq!(names_of(&document), [
        "DISTLINK_CRIMP",
        "DIST_CRIMP",
        "DISTPN_CRIMP",
        "MFR_CRIMP",
        "MPN_CRIMP",
        "PRICE_CRIMP"
    ]);
}

#[tokio::test]
async fn test_prefix_marker_generates_prefixed_names() {
    let fixture = LibraryFixture::new().device("CONN", "TH", &[("CRIMP_DISTLINK", CRIMP_LINK)]);
    let mut document = parse(&fixture);
    let updater = updater(StubResolver::new().with_record(CRIMP_LINK, sample_record("CRIMP-1", "0.10")));

    updater.update_document(&mut document, "connectors").await;

    assert_eq!(names_of(&document), [
        "CRIMP_DISTLINK",
        "CRIMP_DIST",
        "CRIMP_DISTPN",
        "CRIMP_MFR",
        "CRIMP_MPN",
        "CRIMP_PRICE"
    ]);
}

#[tokio::test]
async fn test_second_run_yields_same_fields() {
    let fixture = LibraryFixture::new().device("CONN", "TH", &[
        ("DISTLINK", LINK),
        ("CRIMP_DISTLINK", CRIMP_LINK),
        ("VALUE", "2x1"),
    ]);
    let resolver = StubResolver::new()
        .with_record(LINK, sample_record("HDR-2", "0.50"))
        .with_record(CRIMP_LINK, sample_record("CRIMP-1", "0.10"));
    let updater = updater(resolver);

    let mut document = parse(&fixture);
    updater.update_document(&mut document, "connectors").await;
    let once = document.to_xml().unwrap();

    let mut again = LibraryDocument::parse(&once).unwrap();
    let report = updater.update_document(&mut again, "connectors").await;

    assert_eq!(again.to_xml().unwrap(), once);
    assert_eq!(report.fields_removed, 10);
    assert_eq!(report.fields_inserted, 10);
}

#[tokio::test]
async fn test_part_without_markers_is_untouched() {
    let fixture = LibraryFixture::new().device("R", "0603", &[
        ("MPN", "RC0603FR-0710KL"),
        ("MFR", "Yageo"),
    ]);
    let mut document = parse(&fixture);
    let before = document.clone();
    let resolver = StubResolver::new();
    let updater = updater(resolver.clone());

    let report = updater.update_document(&mut document, "passives").await;

    assert_eq!(document, before);
    assert!(!report.modified());
    assert!(resolver.calls().is_empty());
}

#[tokio::test]
async fn test_foreign_link_produces_nothing() {
    let fixture = LibraryFixture::new().device("U", "SOIC", &[(
        "DISTLINK",
        "https://www.mouser.com/ProductDetail/595-SN74HC00N",
    )]);
    let mut document = parse(&fixture);
    let resolver = StubResolver::new();
    let updater = updater(resolver.clone());

    let report = updater.update_document(&mut document, "logic").await;

    assert_eq!(names_of(&document), ["DISTLINK"]);
    assert!(report.warnings.is_empty());
    assert!(resolver.calls().is_empty());
}

#[tokio::test]
async fn test_ambiguous_marker_skipped_other_inserted() {
    let temp = TempDir::new().unwrap();
    let log_path = temp.path().join("log.txt");
    let fixture = LibraryFixture::new().device("CONN", "TH", &[
        ("DISTLINK", LINK),
        ("DISTLINK_CRIMP", CRIMP_LINK),
    ]);
    let mut document = parse(&fixture);
    let resolver = StubResolver::new()
        .with_error(LINK, ResolveError::Ambiguous)
        .with_record(CRIMP_LINK, sample_record("CRIMP-1", "0.10"));
    let updater = updater(resolver).with_warning_log(WarningLog::new(&log_path));

    let report = updater.update_document(&mut document, "connectors").await;

    assert_eq!(names_of(&document), [
        "DISTLINK",
        "DISTLINK_CRIMP",
        "DIST_CRIMP",
        "DISTPN_CRIMP",
        "MFR_CRIMP",
        "MPN_CRIMP",
        "PRICE_CRIMP"
    ]);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].kind, WarningKind::AmbiguousLink);

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log, "Link Leads to Search: connectors -> CONN -> TH...\n");
}

#[tokio::test]
async fn test_blocks_follow_marker_order() {
    let fixture = LibraryFixture::new().device("CONN", "TH", &[
        ("DISTLINK", LINK),
        ("DISTLINK_CRIMP", CRIMP_LINK),
    ]);
    let mut document = parse(&fixture);
    let resolver = StubResolver::new()
        .with_record(LINK, sample_record("HDR-2", "0.50"))
        .with_record(CRIMP_LINK, sample_record("CRIMP-1", "0.10"));
    let updater = updater(resolver.clone());

    updater.update_document(&mut document, "connectors").await;

    let names = names_of(&document);
    assert_eq!(&names[..2], ["DISTLINK", "DISTLINK_CRIMP"]);
    assert_eq!(&names[2..7], ["DIST", "DISTPN", "MFR", "MPN", "PRICE"]);
    assert_eq!(names[7], "DIST_CRIMP");
    assert_eq!(names.len(), 12);
    assert_eq!(resolver.calls(), [LINK, CRIMP_LINK]);
}

#[tokio::test]
async fn test_stale_fields_removed_even_when_resolution_fails() {
    let fixture = LibraryFixture::new().device("NAND", "DIP14", &[
        ("MPN", "OLD"),
        ("DISTLINK", LINK),
        ("DISTPN", "OLD-ND"),
        ("PRICE", "9.99"),
        ("VALUE", "74HC00"),
    ]);
    let mut document = parse(&fixture);
    let updater = updater(StubResolver::new().with_error(LINK, ResolveError::Invalid {
        attempts: 3,
    }));

    let report = updater.update_document(&mut document, "logic").await;

    assert_eq!(names_of(&document), ["DISTLINK", "VALUE"]);
    assert_eq!(report.fields_removed, 3);
    assert_eq!(report.warnings[0].kind, WarningKind::InvalidLink);
    assert!(report.modified());
}

#[tokio::test]
async fn test_sold_out_still_generates_fields() {
    let fixture = LibraryFixture::new().device("NAND", "DIP14", &[("DISTLINK", LINK)]);
    let mut document = parse(&fixture);
    let updater = updater(StubResolver::new().with_record(LINK, sample_record("SN74HC00N", "N/A")));

    let report = updater.update_document(&mut document, "logic").await;

    assert_eq!(names_of(&document).len(), 6);
    assert_eq!(fields_of(&document)[5], ("PRICE".to_string(), "N/A".to_string()));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].to_string(), "Device is Sold Out: logic -> NAND -> DIP14...");
}

#[tokio::test]
async fn test_custom_token() {
    let fixture = LibraryFixture::new().device("NAND", "DIP14", &[
        ("DISTLINK", LINK),
        ("SRC_URL", LINK),
    ]);
    let mut document = parse(&fixture);
    let config = UpdaterConfig {
        link_token: "URL".to_string(),
        ..UpdaterConfig::default()
    };
    let resolver = StubResolver::new().with_record(LINK, sample_record("SN74HC00N", "0.35"));
    let updater = MetadataUpdater::new(resolver, config).unwrap();

    updater.update_document(&mut document, "logic").await;

    // With token URL, DISTLINK is an ordinary field and stale by prefix.
    assert_eq!(names_of(&document), [
        "SRC_URL", "SRC_DIST", "SRC_DISTPN", "SRC_MFR", "SRC_MPN", "SRC_PRICE"
    ]);
}

#[test]
fn test_invalid_config_rejected() {
    let config = UpdaterConfig {
        link_token: String::new(),
        ..UpdaterConfig::default()
    };
    assert!(matches!(
        MetadataUpdater::new(StubResolver::new(), config),
        Err(LbrError::ConfigError { .. })
    ));
}
