#[cfg(test)]
mod catalog_tests {
    use crate::{
        Catalog, CatalogError, ObjectId, ObjectKind, Privileges, RightTarget, PUBLIC_ROLE_ID, PUBLIC_ROLE_NAME,
        PUBLIC_SCHEMA_ID,
    };

    #[test]
    fn test_new_catalog_bootstraps_public() {
        let catalog = Catalog::new();
        let public = catalog.find_role("public").unwrap();
        assert_eq!(public.id(), PUBLIC_ROLE_ID);
        assert!(public.is_system_role());
        assert!(catalog.schema_exists("public"));
        assert_eq!(catalog.find_schema("PUBLIC").unwrap().id(), PUBLIC_SCHEMA_ID);
        assert!(catalog.all_users().is_empty());
        assert!(catalog.all_rights().is_empty());
    }

    #[test]
    fn test_names_are_case_folded() {
        let mut catalog = Catalog::new();
        let id = catalog.create_role("Manager", false).unwrap();
        assert_eq!(catalog.find_role("MANAGER").unwrap().id(), id);
        assert_eq!(catalog.find_role("manager").unwrap().name(), "MANAGER");
    }

    #[test]
    fn test_case_sensitive_mode_keeps_names() {
        let mut catalog = Catalog::new();
        catalog.set_case_sensitive_identifiers(true);
        catalog.create_role("Manager", false).unwrap();
        assert!(catalog.role_exists("Manager"));
        assert!(!catalog.role_exists("MANAGER"));
    }

    #[test]
    fn test_create_role_duplicate() {
        let mut catalog = Catalog::new();
        catalog.create_role("r1", false).unwrap();
        let result = catalog.create_role("r1", false);
        assert_eq!(result, Err(CatalogError::RoleAlreadyExists("R1".to_string())));
    }

    #[test]
    fn test_create_role_if_not_exists_returns_existing() {
        let mut catalog = Catalog::new();
        let first = catalog.create_role("r1", true).unwrap();
        let second = catalog.create_role("r1", true).unwrap();
        assert_eq!(first, second);
        assert_eq!(catalog.all_roles().iter().filter(|r| r.name() == "R1").count(), 1);
    }

    #[test]
    fn test_role_and_user_share_namespace() {
        let mut catalog = Catalog::new();
        catalog.create_user("alice", None, false, false).unwrap();
        assert_eq!(
            catalog.create_role("alice", true),
            Err(CatalogError::GranteeNameInUse("ALICE".to_string()))
        );
        catalog.create_role("ops", false).unwrap();
        assert_eq!(
            catalog.create_user("ops", None, false, true),
            Err(CatalogError::GranteeNameInUse("OPS".to_string()))
        );
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut catalog = Catalog::new();
        let first = catalog.create_role("r1", false).unwrap();
        catalog.drop_role("r1").unwrap();
        let second = catalog.create_role("r1", false).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_grant_right_merges_masks() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let table = catalog.create_table("orders").unwrap();
        let target = RightTarget::Object(table);

        let first = catalog.grant_right(user, target, Privileges::SELECT).unwrap();
        let second = catalog.grant_right(user, target, Privileges::INSERT).unwrap();

        assert_eq!(first, second);
        assert_eq!(catalog.all_rights().len(), 1);
        let right = catalog.right_for_target(user, target).unwrap();
        assert_eq!(right.privileges(), Privileges::SELECT | Privileges::INSERT);
        assert_eq!(catalog.grantee(user).unwrap().right_count(), 1);
    }

    #[test]
    fn test_grant_right_rejects_empty_mask() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let table = catalog.create_table("orders").unwrap();
        let result = catalog.grant_right(user, RightTarget::Object(table), Privileges::empty());
        assert_eq!(result, Err(CatalogError::EmptyPrivileges));
    }

    #[test]
    fn test_grant_right_validates_mask_against_target() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let role = catalog.create_role("r1", false).unwrap();
        let table = catalog.create_table("orders").unwrap();

        assert!(matches!(
            catalog.grant_right(user, RightTarget::Role(role), Privileges::SELECT),
            Err(CatalogError::InvalidPrivileges { .. })
        ));
        assert!(matches!(
            catalog.grant_right(user, RightTarget::Object(table), Privileges::ROLE_MEMBERSHIP),
            Err(CatalogError::InvalidPrivileges { .. })
        ));
        assert!(matches!(
            catalog.grant_right(user, RightTarget::Database, Privileges::SELECT),
            Err(CatalogError::InvalidPrivileges { .. })
        ));
        assert!(catalog.grant_right(user, RightTarget::Database, Privileges::ALTER_ANY_SCHEMA).is_ok());
    }

    #[test]
    fn test_revoke_right_absent_is_noop() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let table = catalog.create_table("orders").unwrap();

        let removed = catalog.revoke_right(user, RightTarget::Object(table)).unwrap();
        assert!(!removed);
        assert_eq!(catalog.grantee(user).unwrap().right_count(), 0);
    }

    #[test]
    fn test_revoke_right_for_missing_grantee_is_an_error() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        catalog.drop_user("alice").unwrap();
        assert_eq!(
            catalog.revoke_right(user, RightTarget::Database),
            Err(CatalogError::ObjectNotFound(user))
        );
    }

    #[test]
    fn test_revoke_privileges_narrows_then_removes() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let table = catalog.create_table("orders").unwrap();
        let target = RightTarget::Object(table);
        catalog.grant_right(user, target, Privileges::SELECT | Privileges::UPDATE).unwrap();

        assert!(catalog.revoke_privileges(user, target, Privileges::UPDATE).unwrap());
        assert_eq!(catalog.right_for_target(user, target).unwrap().privileges(), Privileges::SELECT);

        assert!(!catalog.revoke_privileges(user, target, Privileges::DELETE).unwrap());

        assert!(catalog.revoke_privileges(user, target, Privileges::SELECT).unwrap());
        assert!(catalog.right_for_target(user, target).is_none());
        assert!(catalog.all_rights().is_empty());
    }

    #[test]
    fn test_grant_role_is_noop_when_already_held() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let inner = catalog.create_role("inner", false).unwrap();
        let outer = catalog.create_role("outer", false).unwrap();
        catalog.grant_role(outer, inner).unwrap();
        catalog.grant_role(user, outer).unwrap();

        assert!(catalog.grant_role(user, outer).unwrap().is_none());
        // held transitively through OUTER
        assert!(catalog.grant_role(user, inner).unwrap().is_none());
        assert!(catalog.right_for_role(user, inner).is_none());
    }

    #[test]
    fn test_grant_role_to_itself_is_a_cycle() {
        let mut catalog = Catalog::new();
        let role = catalog.create_role("r1", false).unwrap();
        assert!(matches!(catalog.grant_role(role, role), Err(CatalogError::RoleCycle { .. })));
        assert!(catalog.right_for_role(role, role).is_none());
    }

    #[test]
    fn test_grant_role_rejects_indirect_cycle() {
        let mut catalog = Catalog::new();
        let a = catalog.create_role("a", false).unwrap();
        let b = catalog.create_role("b", false).unwrap();
        let c = catalog.create_role("c", false).unwrap();
        catalog.grant_role(b, a).unwrap();
        catalog.grant_role(c, b).unwrap();

        let result = catalog.grant_role(a, c);
        assert_eq!(
            result,
            Err(CatalogError::RoleCycle { role: "C".to_string(), grantee: "A".to_string() })
        );
    }

    #[test]
    fn test_grant_public_is_refused() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        assert_eq!(catalog.grant_role(user, PUBLIC_ROLE_ID), Err(CatalogError::CannotGrantPublic));
        assert!(catalog.is_role_granted(user, PUBLIC_ROLE_ID));
    }

    #[test]
    fn test_has_privilege_through_roles_and_public() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let reader = catalog.create_role("reader", false).unwrap();
        let orders = RightTarget::Object(catalog.create_table("orders").unwrap());
        let items = RightTarget::Object(catalog.create_table("items").unwrap());

        catalog.grant_right(reader, orders, Privileges::SELECT).unwrap();
        catalog.grant_right(PUBLIC_ROLE_ID, items, Privileges::SELECT).unwrap();
        assert!(!catalog.has_privilege(user, orders, Privileges::SELECT));
        assert!(catalog.has_privilege(user, items, Privileges::SELECT));

        catalog.grant_role(user, reader).unwrap();
        assert!(catalog.has_privilege(user, orders, Privileges::SELECT));
        assert!(!catalog.has_privilege(user, orders, Privileges::SELECT | Privileges::DELETE));
    }

    #[test]
    fn test_admin_has_every_privilege() {
        let mut catalog = Catalog::new();
        let admin = catalog.create_user("sa", None, true, false).unwrap();
        let table = catalog.create_table("orders").unwrap();
        assert!(catalog.has_privilege(admin, RightTarget::Object(table), Privileges::ALL));
    }

    #[test]
    fn test_rename_keeps_rights() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let role = catalog.create_role("r1", false).unwrap();
        catalog.grant_role(user, role).unwrap();

        catalog.rename_grantee(role, "r2").unwrap();

        assert!(!catalog.role_exists("r1"));
        assert_eq!(catalog.find_role("r2").unwrap().id(), role);
        assert!(catalog.right_for_role(user, role).is_some());
    }

    #[test]
    fn test_rename_conflicts_and_system_roles() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        catalog.create_role("r1", false).unwrap();
        assert_eq!(
            catalog.rename_grantee(user, "r1"),
            Err(CatalogError::GranteeNameInUse("R1".to_string()))
        );
        assert_eq!(
            catalog.rename_grantee(PUBLIC_ROLE_ID, "everyone"),
            Err(CatalogError::CannotAlterSystemRole(PUBLIC_ROLE_NAME.to_string()))
        );
    }

    #[test]
    fn test_role_create_sql() {
        let mut catalog = Catalog::new();
        let id = catalog.create_role("r1", false).unwrap();
        let role = catalog.grantee(id).unwrap();
        assert_eq!(role.create_sql(false).as_deref(), Some("CREATE ROLE \"R1\""));
        assert_eq!(role.create_sql(true).as_deref(), Some("CREATE ROLE IF NOT EXISTS \"R1\""));
        assert_eq!(role.type_tag(), ObjectKind::Role);
    }

    #[test]
    fn test_system_role_has_no_create_sql() {
        let catalog = Catalog::new();
        let public = catalog.grantee(PUBLIC_ROLE_ID).unwrap();
        assert_eq!(public.create_sql(false), None);
        assert_eq!(public.create_sql(true), None);
        assert_eq!(catalog.create_sql(PUBLIC_ROLE_ID), Ok(None));
    }

    #[test]
    fn test_create_sql_for_copy_is_internal_error() {
        let mut catalog = Catalog::new();
        let id = catalog.create_role("r1", false).unwrap();
        let result = catalog.grantee(id).unwrap().create_sql_for_copy("T", "\"T2\"");
        assert!(matches!(result, Err(CatalogError::Internal(_))));
        assert!(result.unwrap_err().is_internal());
    }

    #[test]
    fn test_user_create_sql() {
        let mut catalog = Catalog::new();
        let id = catalog.create_user("sa", Some("$argon2id$x".to_string()), true, false).unwrap();
        assert_eq!(
            catalog.create_sql(id).unwrap().as_deref(),
            Some("CREATE USER \"SA\" HASH '$argon2id$x' ADMIN")
        );
    }

    #[test]
    fn test_script_orders_memberships_before_object_rights() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let role = catalog.create_role("reader", false).unwrap();
        let table = catalog.create_table("orders").unwrap();
        catalog.grant_right(role, RightTarget::Object(table), Privileges::SELECT).unwrap();
        catalog.grant_role(user, role).unwrap();

        let script = catalog.script().unwrap();
        assert_eq!(
            script,
            vec![
                "CREATE USER \"ALICE\"".to_string(),
                "CREATE ROLE \"READER\"".to_string(),
                "GRANT \"READER\" TO \"ALICE\"".to_string(),
                "GRANT SELECT ON \"PUBLIC\".\"ORDERS\" TO \"READER\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_remove_database_object_is_idempotent() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let role = catalog.create_role("r1", false).unwrap();
        let right = catalog.grant_role(user, role).unwrap().unwrap();

        assert!(catalog.remove_database_object(right).unwrap());
        assert!(!catalog.remove_database_object(right).unwrap());
        assert!(catalog.right_for_role(user, role).is_none());
    }

    #[test]
    fn test_remove_database_object_refuses_grantees() {
        let mut catalog = Catalog::new();
        let role = catalog.create_role("r1", false).unwrap();
        assert!(matches!(catalog.remove_database_object(role), Err(CatalogError::Internal(_))));
        assert!(catalog.role_exists("r1"));
    }

    #[test]
    fn test_remove_meta_refuses_while_rights_remain() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let role = catalog.create_role("r1", false).unwrap();
        catalog.grant_role(user, role).unwrap();

        assert!(matches!(catalog.remove_meta(role), Err(CatalogError::Internal(_))));
        assert!(catalog.role_exists("r1"));
    }

    #[test]
    fn test_drop_table_removes_rights_on_it() {
        let mut catalog = Catalog::new();
        let user = catalog.create_user("alice", None, false, false).unwrap();
        let table = catalog.create_table("orders").unwrap();
        catalog.grant_right(user, RightTarget::Object(table), Privileges::SELECT).unwrap();

        let dropped = catalog.drop_table("orders").unwrap();

        assert_eq!(dropped.id(), table);
        assert!(catalog.all_rights().is_empty());
        assert_eq!(catalog.grantee(user).unwrap().right_count(), 0);
        assert!(!catalog.table_exists("orders"));
    }

    #[test]
    fn test_drop_schema_requires_empty_schema() {
        let mut catalog = Catalog::new();
        catalog.create_schema("sales").unwrap();
        catalog.create_table("sales.orders").unwrap();

        assert_eq!(catalog.drop_schema("sales"), Err(CatalogError::SchemaNotEmpty("SALES".to_string())));
        catalog.drop_table("sales.orders").unwrap();
        assert!(catalog.drop_schema("sales").is_ok());
    }

    #[test]
    fn test_public_schema_cannot_be_dropped() {
        let mut catalog = Catalog::new();
        assert_eq!(
            catalog.drop_schema("public"),
            Err(CatalogError::CannotDropSystemSchema("PUBLIC".to_string()))
        );
        assert!(catalog.schema_exists("public"));
    }

    #[test]
    fn test_id_space_exhaustion_is_an_error() {
        let mut catalog = Catalog::new();
        catalog.set_next_object_id(u32::MAX);

        assert_eq!(catalog.create_role("r", false), Err(CatalogError::ObjectIdsExhausted));
        assert!(!catalog.role_exists("r"));
    }

    #[test]
    fn test_restore_rejects_id_without_successor() {
        let mut catalog = Catalog::new();
        let result = catalog.restore_role(ObjectId(u32::MAX), "R".to_string());
        assert!(matches!(result, Err(CatalogError::Inconsistent(_))));
    }

    #[test]
    fn test_restore_rejects_unfolded_names() {
        let mut catalog = Catalog::new();
        let result = catalog.restore_user(ObjectId(10), "alice".to_string(), false, None);
        assert!(matches!(result, Err(CatalogError::Inconsistent(_))));

        let mut sensitive = Catalog::new();
        sensitive.set_case_sensitive_identifiers(true);
        assert!(sensitive.restore_user(ObjectId(10), "alice".to_string(), false, None).is_ok());
        assert!(sensitive.find_user("alice").is_some());
    }

    #[test]
    fn test_restore_rejects_role_right_with_object_mask() {
        let mut catalog = Catalog::new();
        catalog.restore_role(ObjectId(10), "R".to_string()).unwrap();
        catalog.restore_user(ObjectId(11), "A".to_string(), false, None).unwrap();

        let result = catalog.restore_right(ObjectId(12), ObjectId(11), RightTarget::Role(ObjectId(10)), Privileges::SELECT);

        assert!(matches!(result, Err(CatalogError::Inconsistent(_))));
        assert!(catalog.all_rights().is_empty());
        assert!(catalog
            .restore_right(ObjectId(12), ObjectId(11), RightTarget::Role(ObjectId(10)), Privileges::ROLE_MEMBERSHIP)
            .is_ok());
    }

    #[test]
    fn test_create_table_in_unknown_schema() {
        let mut catalog = Catalog::new();
        assert_eq!(
            catalog.create_table("nowhere.t"),
            Err(CatalogError::SchemaNotFound("NOWHERE".to_string()))
        );
    }

    #[test]
    fn test_privileges_display() {
        assert_eq!(Privileges::ALL.to_string(), "ALL");
        assert_eq!((Privileges::SELECT | Privileges::UPDATE).to_string(), "SELECT, UPDATE");
        assert_eq!(Privileges::ALTER_ANY_SCHEMA.to_string(), "ALTER ANY SCHEMA");
        assert_eq!(Privileges::empty().to_string(), "NONE");
    }
}
