use crate::common::Workspace;
use lbrmeta::cli::process_library;
use lbrmeta::config::UpdaterConfig;
use lbrmeta::resolver::ResolveError;
use lbrmeta::test_utils::{LibraryFixture, StubResolver, init_test_logging, sample_record};
use lbrmeta::updater::{MetadataUpdater, WarningKind, WarningLog};

const LINK: &str = "https://www.digikey.com/product-detail/en/HDR-2";
const CRIMP_LINK: &str = "https://www.digikey.com/product-detail/en/CRIMP-1";
const SEARCH_LINK: &str = "https://www.digikey.com/products/en?keywords=header";

fn resolver() -> StubResolver {
    StubResolver::new()
        .with_record(LINK, sample_record("HDR-2", "0.50"))
        .with_record(CRIMP_LINK, sample_record("CRIMP-1", "N/A"))
        .with_error(SEARCH_LINK, ResolveError::Ambiguous)
}

fn connectors() -> String {
    LibraryFixture::new()
        .device("HEADER-2", "TH", &[
            ("DISTLINK", LINK),
            ("DISTLINK_CRIMP", CRIMP_LINK),
        ])
        .device("HEADER-4", "TH", &[("DISTLINK", SEARCH_LINK), ("MPN", "OLD")])
        .device("JUMPER", "SMD", &[("VALUE", "0R")])
        .to_xml()
}

#[tokio::test]
async fn test_library_rewrite_and_warning_log() {
    init_test_logging(None);
    let ws = Workspace::new();
    let path = ws.write("connectors.lbr", &connectors());
    let log_path = ws.path().join("log.txt");

    let updater = MetadataUpdater::new(resolver(), UpdaterConfig::default())
        .unwrap()
        .with_warning_log(WarningLog::new(&log_path));

    let report = process_library(&path, &updater).await.unwrap();

    let kinds: Vec<_> = report.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(kinds, [WarningKind::NoPricing, WarningKind::AmbiguousLink]);
    assert_eq!(report.fields_inserted, 10);
    assert_eq!(report.fields_removed, 1);

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(
        log,
        "Device is Sold Out: connectors -> HEADER-2 -> TH...\n\
         Link Leads to Search: connectors -> HEADER-4 -> TH...\n"
    );

    let content = ws.read("connectors.lbr");
    assert!(content.contains(r#"<attribute name="MPN_CRIMP" value="CRIMP-1" constant="no"/>"#));
    assert!(content.contains(r#"<attribute name="PRICE_CRIMP" value="N/A" constant="no"/>"#));
    assert!(content.contains(r#"<attribute name="VALUE" value="0R" constant="no"/>"#));
    assert!(!content.contains(r#"value="OLD""#));
    assert!(content.contains("<connects/>"));
}

#[tokio::test]
async fn test_second_run_leaves_file_identical() {
    let ws = Workspace::new();
    let path = ws.write("connectors.lbr", &connectors());
    let updater = MetadataUpdater::new(resolver(), UpdaterConfig::default()).unwrap();

    process_library(&path, &updater).await.unwrap();
    let first = ws.read("connectors.lbr");
    process_library(&path, &updater).await.unwrap();

    assert_eq!(ws.read("connectors.lbr"), first);
}

#[tokio::test]
async fn test_non_library_root_is_rejected_untouched() {
    let ws = Workspace::new();
    let schematic = "<?xml version=\"1.0\"?>\n<schematic><parts/></schematic>\n";
    let path = ws.write("sheet.lbr", schematic);
    let resolver = resolver();
    let updater = MetadataUpdater::new(resolver.clone(), UpdaterConfig::default()).unwrap();

    let err = process_library(&path, &updater).await.unwrap_err();

    assert!(err.to_string().contains("is not a valid EAGLE library"));
    assert_eq!(ws.read("sheet.lbr"), schematic);
    assert!(resolver.calls().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn test_rewrite_keeps_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    let path = ws.write("connectors.lbr", &connectors());
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
    let updater = MetadataUpdater::new(resolver(), UpdaterConfig::default()).unwrap();

    let report = process_library(&path, &updater).await.unwrap();

    assert!(report.modified());
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
