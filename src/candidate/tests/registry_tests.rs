//! Client registry parsing and display metadata tests.

use super::fixtures::client;
use crate::candidate::{
    adapters::{
        memory::InMemoryClientRegistry,
        registry_file::{FileClientRegistry, REGISTRY_FILE_NAME},
    },
    domain::ClientProfile,
    ports::ClientRegistry,
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::rstest;

/// Creates an empty directory under the system temp dir, unique per test.
fn registry_dir(name: &str) -> Utf8PathBuf {
    let base = Utf8PathBuf::try_from(std::env::temp_dir()).expect("temp dir is UTF-8");
    let dir_name = format!("peakats_registry_{name}_{}", std::process::id());
    let base_dir = Dir::open_ambient_dir(&base, ambient_authority()).expect("open temp dir");
    if base_dir.exists(&dir_name) {
        base_dir.remove_dir_all(&dir_name).expect("clear stale dir");
    }
    base_dir.create_dir(&dir_name).expect("create registry dir");
    base.join(dir_name)
}

fn write_registry(dir: &Utf8Path, contents: &str) {
    let handle = Dir::open_ambient_dir(dir, ambient_authority()).expect("open registry dir");
    handle
        .write(REGISTRY_FILE_NAME, contents)
        .expect("write registry file");
}

const ACME_REGISTRY: &str = r#"{"clients": {"acme": {"display_name": "Acme Freight"}}}"#;
const GLOBEX_REGISTRY: &str = r#"{"clients": {"globex": {"name": "Globex"}}}"#;

#[rstest]
fn parse_reads_clients_and_drops_blank_ids() {
    let registry = FileClientRegistry::parse(
        r#"{
            "clients": {
                "acme": {"name": "Acme", "display_name": "Acme Freight"},
                "globex": {"dashboard_title": "Globex Hiring"},
                "  ": {"name": "Nobody"}
            }
        }"#,
    )
    .expect("valid registry");

    let ids: Vec<String> = registry
        .clients()
        .into_iter()
        .map(|(client_id, _)| client_id.as_str().to_owned())
        .collect();
    assert_eq!(ids, vec!["acme".to_owned(), "globex".to_owned()]);
    assert_eq!(
        registry.resolve(&client("acme")),
        Some(ClientProfile {
            name: Some("Acme".to_owned()),
            display_name: Some("Acme Freight".to_owned()),
            dashboard_title: None,
        })
    );
    assert_eq!(registry.resolve(&client("initech")), None);
}

#[rstest]
fn parse_accepts_document_without_clients() {
    let registry = FileClientRegistry::parse("{}").expect("empty registry");
    assert!(registry.clients().is_empty());
}

#[rstest]
fn parse_rejects_malformed_documents() {
    assert!(FileClientRegistry::parse("{\"clients\": [").is_err());
}

#[rstest]
fn load_without_any_registry_file_is_empty() {
    let missing = Utf8PathBuf::from("/nonexistent/peakats/registry/dir");

    let registry = FileClientRegistry::load(&[missing]);

    assert!(registry.clients().is_empty());
    assert_eq!(registry.source(), None);
}

#[rstest]
fn load_reads_registry_and_records_source() {
    let dir = registry_dir("single");
    write_registry(&dir, ACME_REGISTRY);

    let registry = FileClientRegistry::load(&[dir.clone()]);

    assert_eq!(
        registry.resolve(&client("acme")),
        Some(ClientProfile::displayed_as("Acme Freight"))
    );
    assert_eq!(registry.source(), Some(dir.join(REGISTRY_FILE_NAME).as_path()));
}

#[rstest]
fn load_prefers_first_directory_with_a_registry() {
    let empty = registry_dir("order_empty");
    let first = registry_dir("order_first");
    let second = registry_dir("order_second");
    write_registry(&first, ACME_REGISTRY);
    write_registry(&second, GLOBEX_REGISTRY);

    let registry = FileClientRegistry::load(&[empty, first.clone(), second]);

    assert!(registry.resolve(&client("acme")).is_some());
    assert_eq!(registry.resolve(&client("globex")), None);
    assert_eq!(registry.source(), Some(first.join(REGISTRY_FILE_NAME).as_path()));
}

#[rstest]
fn load_skips_malformed_registry() {
    let broken = registry_dir("skip_broken");
    let fallback = registry_dir("skip_fallback");
    write_registry(&broken, "{\"clients\": [");
    write_registry(&fallback, GLOBEX_REGISTRY);

    let registry = FileClientRegistry::load(&[broken, fallback.clone()]);

    assert!(registry.resolve(&client("globex")).is_some());
    assert_eq!(
        registry.source(),
        Some(fallback.join(REGISTRY_FILE_NAME).as_path())
    );
}

#[rstest]
#[case(
    ClientProfile {
        name: Some("Acme".to_owned()),
        display_name: Some("Acme Freight".to_owned()),
        dashboard_title: Some("Acme Driver Pipeline".to_owned()),
    },
    "Acme Driver Pipeline"
)]
#[case(ClientProfile::displayed_as("Acme Freight"), "Acme Freight")]
#[case(
    ClientProfile { name: Some("Acme".to_owned()), ..ClientProfile::default() },
    "Acme"
)]
#[case(ClientProfile::default(), "ACME")]
fn title_prefers_most_specific_label(#[case] profile: ClientProfile, #[case] expected: &str) {
    assert_eq!(profile.title(&client("acme")), expected);
}

#[rstest]
fn in_memory_registry_lists_clients_in_id_order() {
    let registry = InMemoryClientRegistry::new()
        .with_client(client("zeta"), ClientProfile::default())
        .with_client(client("alpha"), ClientProfile::displayed_as("Alpha"));

    let labels: Vec<String> = registry
        .clients()
        .iter()
        .map(|(client_id, profile)| profile.listing_label(client_id))
        .collect();
    assert_eq!(labels, vec!["Alpha".to_owned(), "zeta".to_owned()]);
}
