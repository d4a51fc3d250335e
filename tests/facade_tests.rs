//! Integration tests for the `Confit` facade over the in-memory backend.

use std::sync::Arc;

use confit::core::client::{Confit, ConfitOptions};
use confit::core::remote::memory::InMemoryRemote;
use confit::core::remote::{ParameterStore, ParameterType, PutRequest};

fn client(remote: Arc<InMemoryRemote>, namespace: &str, app: &str) -> Confit {
    Confit::with_backends(
        ConfitOptions {
            key_namespace: Some(namespace.to_string()),
            app_name: Some(app.to_string()),
            ..Default::default()
        },
        remote.clone(),
        remote,
    )
    .unwrap()
}

fn seed(remote: &InMemoryRemote, name: &str, value: &str) {
    remote
        .put(&PutRequest {
            name: name.to_string(),
            value: value.to_string(),
            kind: ParameterType::String,
            description: None,
            overwrite: false,
            key_id: None,
        })
        .unwrap();
}

#[test]
fn resolves_the_conventional_path() {
    let remote = Arc::new(InMemoryRemote::new());
    let confit = client(remote, "Production", "billing");

    assert_eq!(confit.path(), "/Production/billing");
    assert_eq!(confit.resolved().key_alias(), "alias/Production");
}

#[test]
fn fetch_crosses_page_boundaries() {
    let remote = Arc::new(InMemoryRemote::with_page_size(2));
    for i in 0..7 {
        seed(&remote, &format!("/Test/app/P{}", i), &format!("v{}", i));
    }

    let confit = client(remote, "Test", "app");
    let set = confit.fetch(false, true).unwrap();

    assert_eq!(set.len(), 7);
    assert_eq!(set.get("P0"), Some("v0"));
    assert_eq!(set.get("P6"), Some("v6"));
}

#[test]
fn recursive_fetch_includes_nested_paths() {
    let remote = Arc::new(InMemoryRemote::new());
    seed(&remote, "/Test/app/TOP", "top");
    seed(&remote, "/Test/app/db/URL", "nested");

    let confit = client(remote, "Test", "app");

    let flat = confit.fetch(false, true).unwrap();
    assert_eq!(flat.len(), 1);

    let deep = confit.fetch(true, true).unwrap();
    assert_eq!(deep.len(), 2);
    assert_eq!(deep.get("db/URL"), Some("nested"));
}

#[test]
fn secure_parameters_decrypt_through_the_facade() {
    let remote = Arc::new(InMemoryRemote::new());
    let confit = client(remote, "Test", "app");

    confit
        .put(&[confit_descriptor("API_KEY", "hunter2", ParameterType::SecureString)])
        .unwrap();

    let decrypted = confit.fetch(false, true).unwrap();
    let parameter = decrypted.get_parameter("API_KEY").unwrap();
    assert_eq!(parameter.value, "hunter2");
    assert_eq!(parameter.decrypted.as_deref(), Some("hunter2"));
    let encrypted = parameter.encrypted.as_deref().unwrap();
    assert_ne!(encrypted, "hunter2");

    let ciphertext_only = confit.fetch(false, false).unwrap();
    let parameter = ciphertext_only.get_parameter("API_KEY").unwrap();
    assert_eq!(parameter.value, encrypted);
    assert!(parameter.decrypted.is_none());
}

#[test]
fn each_fetch_is_a_fresh_read() {
    let remote = Arc::new(InMemoryRemote::new());
    let confit = client(remote.clone(), "Test", "app");
    seed(&remote, "/Test/app/X", "before");

    assert_eq!(confit.fetch(false, true).unwrap().get("X"), Some("before"));

    remote
        .put(&PutRequest {
            name: "/Test/app/X".into(),
            value: "after".into(),
            kind: ParameterType::String,
            description: None,
            overwrite: true,
            key_id: None,
        })
        .unwrap();

    assert_eq!(confit.fetch(false, true).unwrap().get("X"), Some("after"));
}

#[test]
fn two_clients_share_one_provisioned_key() {
    let remote = Arc::new(InMemoryRemote::new());
    let first = client(remote.clone(), "Shared", "one");
    let second = client(remote.clone(), "Shared", "two");

    first
        .put(&[confit_descriptor("A", "1", ParameterType::SecureString)])
        .unwrap();
    second
        .put(&[confit_descriptor("B", "2", ParameterType::SecureString)])
        .unwrap();

    assert_eq!(remote.key_count(), 1);
}

fn confit_descriptor(
    name: &str,
    value: &str,
    kind: ParameterType,
) -> confit::core::writer::WriteDescriptor {
    confit::core::writer::WriteDescriptor {
        name: name.to_string(),
        value: value.to_string(),
        kind,
        description: None,
        overwrite: None,
        key_id: None,
    }
}
