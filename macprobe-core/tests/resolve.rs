// End-to-end resolution against a synthetic macOS volume: a fake
// Applications tree with real Info.plist files and a fake Adobe uninstall
// directory with adbarg records.
use std::fs;
use std::path::Path;

use macprobe_common::config::Config;
use macprobe_core::{AdobeResolver, ProductCatalog};
use plist::Value as PlistValue;
use tempfile::TempDir;

struct Fixture {
    _apps: TempDir,
    _uninstall: TempDir,
    resolver: AdobeResolver,
}

impl Fixture {
    fn new() -> Self {
        let apps = tempfile::tempdir().unwrap();
        let uninstall = tempfile::tempdir().unwrap();
        let config = Config::with_roots(apps.path(), uninstall.path(), "/nonexistent");
        let resolver = AdobeResolver::new(config, ProductCatalog::load().unwrap());
        Self {
            _apps: apps,
            _uninstall: uninstall,
            resolver,
        }
    }

    fn apps(&self) -> &Path {
        self._apps.path()
    }

    fn install_app(&self, dir: &str, app: &str, short_version: &str) {
        let contents = self.apps().join(dir).join(app).join("Contents");
        fs::create_dir_all(&contents).unwrap();
        let mut dict = plist::Dictionary::new();
        dict.insert(
            "CFBundleShortVersionString".to_string(),
            PlistValue::String(short_version.to_string()),
        );
        plist::to_file_xml(contents.join("Info.plist"), &PlistValue::Dictionary(dict)).unwrap();
    }

    fn write_record(&self, file: &str, lines: &[&str]) {
        fs::write(self._uninstall.path().join(file), lines.join("\n")).unwrap();
    }
}

#[test]
fn resolves_photoshop_2022_from_slug_and_year() {
    let fx = Fixture::new();
    fx.install_app("Adobe Photoshop 2022", "Adobe Photoshop 2022.app", "23.0.1");
    fx.write_record(
        "photoshop.adbarg",
        &["--productName=Photoshop", "--sapCode=PHSP", "--productVersion=23.0"],
    );

    let app = fx.resolver.resolve_by_slug("photoshop", Some("2022")).unwrap();
    assert_eq!(app.sap(), Some("PHSP"));
    assert_eq!(app.year(), Some("2022"));
    assert_eq!(app.is_cc(), Some(false));
    assert_eq!(app.slug(), Some("photoshop"));
    assert_eq!(app.product_name(), Some("Photoshop"));
    assert_eq!(app.base_version().unwrap().raw(), "23.0");
    assert!(app
        .pathname()
        .ends_with("Adobe Photoshop 2022/Adobe Photoshop 2022.app"));
}

#[test]
fn embedded_year_behaves_like_an_explicit_year() {
    let fx = Fixture::new();
    fx.install_app("Adobe Photoshop 2019", "Adobe Photoshop.app", "20.0");
    fx.install_app("Adobe Photoshop 2022", "Adobe Photoshop 2022.app", "23.0.1");

    let embedded = fx.resolver.resolve_by_slug("photoshop-2019", None).unwrap();
    let explicit = fx.resolver.resolve_by_slug("photoshop", Some("2019")).unwrap();
    assert_eq!(embedded.pathname(), explicit.pathname());
    assert_eq!(embedded.year(), Some("2019"));
}

#[test]
fn nonexistent_slug_is_not_found_not_an_error() {
    let fx = Fixture::new();
    assert!(fx.resolver.resolve_by_slug("nonexistent-slug", None).is_none());
}

#[test]
fn installed_but_wrong_year_is_not_found() {
    let fx = Fixture::new();
    fx.install_app("Adobe Photoshop 2022", "Adobe Photoshop 2022.app", "23.0.1");
    assert!(fx.resolver.resolve_by_slug("photoshop", Some("2020")).is_none());
}

#[test]
fn year_comes_from_the_path_when_no_year_was_requested() {
    let fx = Fixture::new();
    fx.install_app("Adobe InDesign 2021", "Adobe InDesign 2021.app", "16.0");

    let app = fx.resolver.resolve_by_slug("indesign", None).unwrap();
    assert_eq!(app.year(), Some("2021"));
    assert_eq!(app.base_version().unwrap().raw(), "16.0");
}

#[test]
fn cc_branded_installs_set_the_cc_flag() {
    let fx = Fixture::new();
    fx.install_app("Adobe Dimension CC", "Adobe Dimension.app", "2.0");

    let app = fx.resolver.resolve_by_slug("dimension", None).unwrap();
    assert_eq!(app.is_cc(), Some(true));
    assert_eq!(app.slug(), Some("dimension"));
    assert_eq!(app.year(), None);
}

#[test]
fn slug_and_year_round_trip_through_the_resolved_path() {
    let fx = Fixture::new();
    fx.install_app("Adobe After Effects 2020", "Adobe After Effects 2020.app", "17.0");

    let app = fx.resolver.resolve_by_slug("after-effects", Some("2020")).unwrap();
    let rederived = fx.resolver.resolve_by_path(app.pathname());
    assert_eq!(rederived.slug(), app.slug());
    assert_eq!(rederived.year(), app.year());
}

#[test]
fn preference_paths_substitute_resolved_fields() {
    let fx = Fixture::new();
    fx.install_app("Adobe Illustrator 2022", "Adobe Illustrator.app", "26.0.1");

    let app = fx.resolver.resolve_by_slug("illustrator", Some("2022")).unwrap();
    let prefs = app.preference_paths();
    assert!(
        prefs.contains(&"Library/Preferences/Adobe Illustrator 26 Settings".to_string()),
        "unexpected preference paths: {prefs:?}"
    );
    assert!(prefs.contains(&"Library/Preferences/Adobe/Adobe Illustrator/26.0.1".to_string()));
}

#[test]
fn uninstall_command_includes_sap_and_base_version() {
    let fx = Fixture::new();
    fx.install_app("Adobe Photoshop 2022", "Adobe Photoshop 2022.app", "23.0.1");

    let app = fx.resolver.resolve_by_slug("photoshop", Some("2022")).unwrap();
    let command = app.uninstall_command().unwrap();
    assert!(command.contains("--sapCode=PHSP"));
    assert!(command.contains("--baseVersion=23.0"));
    assert!(command.starts_with(r"/Library/Application\ Support"));
}

#[test]
fn records_alone_resolve_products_the_catalog_does_not_know() {
    let fx = Fixture::new();
    fx.install_app("Adobe Substance 2022", "Adobe Substance 2022.app", "12.1");
    fx.write_record(
        "substance.adbarg",
        &["--productName=Substance", "--sapCode=SBST", "--productVersion=12.1"],
    );

    let app = fx.resolver.resolve_by_slug("substance", None).unwrap();
    assert_eq!(app.sap(), Some("SBST"));
    assert_eq!(app.year(), Some("2022"));
    assert_eq!(app.base_version().unwrap().raw(), "12.1");
}

#[test]
fn conflicting_records_resolve_deterministically_by_file_name() {
    let fx = Fixture::new();
    fx.install_app("Adobe Photoshop 2022", "Adobe Photoshop 2022.app", "23.0.1");
    fx.write_record(
        "01-photoshop.adbarg",
        &["--productName=Photoshop", "--sapCode=AAAA"],
    );
    fx.write_record(
        "02-photoshop.adbarg",
        &["--productName=Photoshop", "--sapCode=PHSP"],
    );

    // Catalog already knows PHSP here, so check the record-only path too.
    let resolver = AdobeResolver::new(
        Config::with_roots(fx.apps(), fx._uninstall.path(), "/nonexistent"),
        ProductCatalog::empty(),
    );
    let app = resolver.resolve_by_slug("photoshop", Some("2022")).unwrap();
    assert_eq!(app.sap(), Some("PHSP"));
}
