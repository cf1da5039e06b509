#![cfg(unix)]

//! Property tests for root confinement.

use std::path::{Component, Path};

use proptest::prelude::*;
use server::PathConfinement;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("..".to_owned()),
        Just(".".to_owned()),
        Just(String::new()),
        "[a-z]{1,6}",
    ]
}

fn client_path() -> impl Strategy<Value = String> {
    (any::<bool>(), prop::collection::vec(segment(), 0..12)).prop_map(|(absolute, parts)| {
        let joined = parts.join("/");
        if absolute { format!("/{joined}") } else { joined }
    })
}

proptest! {
    #[test]
    fn resolved_paths_never_leave_root(path in client_path()) {
        let root = Path::new("/srv/export");
        let resolved = PathConfinement::new(root).resolve(path.as_bytes()).unwrap();

        prop_assert!(resolved.starts_with(root), "{} -> {}", path, resolved.display());
        prop_assert!(resolved
            .components()
            .all(|c| !matches!(c, Component::ParentDir | Component::CurDir)));
    }

    #[test]
    fn resolution_is_idempotent_through_client_view(path in client_path()) {
        let paths = PathConfinement::new("/srv/export");
        let resolved = paths.resolve(path.as_bytes()).unwrap();
        let shown = paths.client_view(&resolved);
        prop_assert_eq!(paths.resolve(&shown).unwrap(), resolved);
    }
}
