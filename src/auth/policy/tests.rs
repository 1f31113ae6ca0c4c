//! Access policy tests

use super::*;
use crate::auth::identity::Identity;
use crate::core::models::{Role, User};
use uuid::Uuid;

fn identity_with_role(role: Role) -> Identity {
    let user = User::new(
        format!("{}", role).to_lowercase(),
        format!("{}@shipyard.example", role).to_lowercase(),
        "hash".to_string(),
        role,
    );
    Identity::new(Uuid::new_v4(), user)
}

/// The grant table as published, used to cross-check the matrix row by row
fn expected_grants() -> Vec<(Feature, Vec<Role>)> {
    use Role::*;
    vec![
        (
            Feature::Dashboard,
            vec![Master, Ppic, Production, Operation, Admin, Finance, Manager],
        ),
        (
            Feature::WorkOrders,
            vec![Master, Ppic, Production, Operation, Admin, Manager],
        ),
        (
            Feature::WorkDetails,
            vec![Master, Ppic, Production, Operation, Admin, Manager],
        ),
        (
            Feature::Progress,
            vec![Master, Ppic, Production, Operation, Admin, Manager],
        ),
        (
            Feature::Verification,
            vec![Master, Ppic, Production, Operation, Admin, Manager],
        ),
        (
            Feature::Bastp,
            vec![Master, Ppic, Production, Operation, Admin, Finance, Manager],
        ),
        (
            Feature::Vessels,
            vec![Master, Ppic, Production, Operation, Admin, Manager],
        ),
        (Feature::Invoices, vec![Master, Finance, Manager]),
        (Feature::UserManagement, vec![Master]),
        (Feature::SystemSettings, vec![Master]),
        (
            Feature::Reports,
            vec![Master, Ppic, Production, Operation, Admin, Finance, Manager],
        ),
        (
            Feature::ExportData,
            vec![Master, Ppic, Production, Operation, Admin, Manager],
        ),
        (Feature::ActivityLogs, vec![Master, Manager]),
    ]
}

#[test]
fn unresolved_identity_denies_everything() {
    let policy = AccessPolicy::new();

    for feature in Feature::ALL {
        assert!(
            !policy.can_access_feature(None, feature),
            "unresolved identity must not access {}",
            feature
        );
    }
    for role in Role::ALL {
        assert!(!policy.has_role(None, &RoleSet::from(role)));
    }
    assert!(!policy.is_read_only(None));
    assert!(policy.permitted_features(None).is_empty());
}

#[test]
fn unmapped_feature_denies_every_role() {
    let mut matrix = AccessMatrix::standard();
    matrix.revoke(Feature::Invoices);
    let policy = AccessPolicy::with_matrix(matrix);

    for role in Role::ALL {
        let identity = identity_with_role(role);
        assert!(
            !policy.can_access_feature(Some(&identity), Feature::Invoices),
            "unmapped feature must deny {}",
            role
        );
    }

    // Even against an entirely empty matrix
    let policy = AccessPolicy::with_matrix(AccessMatrix::empty());
    let master = identity_with_role(Role::Master);
    for feature in Feature::ALL {
        assert!(!policy.can_access_feature(Some(&master), feature));
    }
}

#[test]
fn matrix_matches_published_grants() {
    let policy = AccessPolicy::new();

    for (feature, allowed) in expected_grants() {
        for role in Role::ALL {
            let identity = identity_with_role(role);
            assert_eq!(
                policy.can_access_feature(Some(&identity), feature),
                allowed.contains(&role),
                "grant mismatch for ({}, {})",
                feature,
                role
            );
        }
    }
}

#[test]
fn finance_sees_invoices_but_not_operations() {
    let policy = AccessPolicy::new();
    let finance = identity_with_role(Role::Finance);

    assert!(policy.can_access_feature(Some(&finance), Feature::Invoices));
    assert!(!policy.can_access_feature(Some(&finance), Feature::WorkOrders));
    assert!(!policy.can_access_feature(Some(&finance), Feature::UserManagement));
}

#[test]
fn read_only_is_exclusive_to_manager() {
    let policy = AccessPolicy::new();

    for role in Role::ALL {
        let identity = identity_with_role(role);
        assert_eq!(policy.is_read_only(Some(&identity)), role == Role::Manager);
    }

    // Full access does not imply read-only
    let master = identity_with_role(Role::Master);
    assert!(!policy.is_read_only(Some(&master)));
}

#[test]
fn has_role_set_semantics() {
    let policy = AccessPolicy::new();
    let privileged = RoleSet::from([Role::Master, Role::Manager]);

    for role in Role::ALL {
        let identity = identity_with_role(role);
        assert_eq!(
            policy.has_role(Some(&identity), &privileged),
            matches!(role, Role::Master | Role::Manager)
        );
    }

    // Singleton set and single role behave identically
    let master = identity_with_role(Role::Master);
    assert_eq!(
        policy.has_role(Some(&master), &RoleSet::from(Role::Master)),
        policy.has_role(Some(&master), &RoleSet::from([Role::Master]))
    );
}

#[test]
fn empty_role_set_matches_nobody() {
    let policy = AccessPolicy::new();
    let empty = RoleSet::new();

    assert!(empty.is_empty());
    for role in Role::ALL {
        let identity = identity_with_role(role);
        assert!(!policy.has_role(Some(&identity), &empty));
    }
}

#[test]
fn repeated_queries_are_idempotent() {
    let policy = AccessPolicy::new();
    let ppic = identity_with_role(Role::Ppic);
    let required = RoleSet::from(Role::Ppic);

    for _ in 0..100 {
        assert!(policy.can_access_feature(Some(&ppic), Feature::WorkOrders));
        assert!(!policy.can_access_feature(Some(&ppic), Feature::Invoices));
        assert!(policy.has_role(Some(&ppic), &required));
        assert!(!policy.is_read_only(Some(&ppic)));
    }
}

#[test]
fn manager_views_but_cannot_edit() {
    let policy = AccessPolicy::new();
    let manager = identity_with_role(Role::Manager);

    // Both gates hold at once: visibility granted, mutation blocked
    assert!(policy.can_access_feature(Some(&manager), Feature::WorkOrders));
    assert!(policy.is_read_only(Some(&manager)));
}

#[test]
fn permitted_features_follow_the_matrix() {
    let policy = AccessPolicy::new();

    let master = identity_with_role(Role::Master);
    assert_eq!(
        policy.permitted_features(Some(&master)).len(),
        Feature::ALL.len()
    );

    let finance = identity_with_role(Role::Finance);
    let features = policy.permitted_features(Some(&finance));
    assert_eq!(
        features,
        vec![
            Feature::Dashboard,
            Feature::Bastp,
            Feature::Invoices,
            Feature::Reports,
        ]
    );
}

#[test]
fn feature_tags_round_trip() {
    use std::str::FromStr;

    for feature in Feature::ALL {
        assert_eq!(Feature::from_str(&feature.to_string()), Ok(feature));
    }
    assert!(Feature::from_str("payroll").is_err());
}
