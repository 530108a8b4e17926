//! Per-table queries, unit-of-work rollback and delete policies.

use bazaar_core::errors::BazaarError;
use bazaar_core::models::{NewUser, ProductDraft, ProductId, Role};
use bazaar_storage::queries::{orders, products, sessions, users};
use bazaar_storage::Database;

fn new_user(name: &str, role: Role) -> NewUser {
    NewUser {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password_hash: "hash".to_string(),
        role,
    }
}

const DAY: i64 = 24 * 60 * 60;

fn widget() -> ProductDraft {
    ProductDraft::parse("Widget", "9.99", "5").unwrap()
}

#[test]
fn users_insert_lookup_and_delete() {
    let db = Database::open_in_memory().unwrap();
    db.write(|uow| {
        let conn = uow.conn();
        let alice = users::insert_user(conn, &new_user("alice", Role::Customer))?;

        assert_eq!(users::get_user(conn, alice.id)?.unwrap().username, "alice");
        assert_eq!(users::find_by_username(conn, "alice")?.unwrap().id, alice.id);
        assert_eq!(
            users::find_by_email(conn, "alice@example.com")?.unwrap().role,
            Role::Customer
        );
        assert!(users::find_by_username(conn, "nobody")?.is_none());

        assert!(users::delete_user(conn, alice.id)?);
        assert!(!users::delete_user(conn, alice.id)?);
        assert!(users::get_user(conn, alice.id)?.is_none());
        Ok(())
    })
    .unwrap();
}

#[test]
fn duplicate_username_and_email_map_to_duplicate_key() {
    let db = Database::open_in_memory().unwrap();
    db.write(|uow| users::insert_user(uow.conn(), &new_user("alice", Role::Customer)))
        .unwrap();

    let err = db
        .write(|uow| users::insert_user(uow.conn(), &new_user("alice", Role::Customer)))
        .unwrap_err();
    assert!(matches!(err, BazaarError::DuplicateKey { field: "username" }));

    let mut clash = new_user("alice2", Role::Customer);
    clash.email = "alice@example.com".to_string();
    let err = db
        .write(|uow| users::insert_user(uow.conn(), &clash))
        .unwrap_err();
    assert!(matches!(err, BazaarError::DuplicateKey { field: "email" }));
}

#[test]
fn failed_unit_of_work_rolls_back() {
    let db = Database::open_in_memory().unwrap();
    let result: Result<(), BazaarError> = db.write(|uow| {
        users::insert_user(uow.conn(), &new_user("temp", Role::Customer))?;
        Err(BazaarError::Validation("abort".into()))
    });
    assert!(result.is_err());

    let count = db.read(|uow| users::count_users(uow.conn())).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn products_crud_and_owner_filter() {
    let db = Database::open_in_memory().unwrap();
    db.write(|uow| {
        let conn = uow.conn();
        let bob = users::insert_user(conn, &new_user("bob", Role::Seller))?;
        let carol = users::insert_user(conn, &new_user("carol", Role::Seller))?;

        let w = products::insert_product(conn, bob.id, &widget())?;
        products::insert_product(conn, carol.id, &ProductDraft::parse("Gadget", "3", "1")?)?;

        assert_eq!(products::list_products(conn)?.len(), 2);
        let bobs = products::list_by_seller(conn, bob.id)?;
        assert_eq!(bobs.len(), 1);
        assert_eq!(bobs[0].name, "Widget");

        let edit = ProductDraft::parse("Widget v2", "12.50", "7")?;
        assert!(products::update_product(conn, w.id, &edit)?);
        let got = products::get_product(conn, w.id)?.unwrap();
        assert_eq!(got.name, "Widget v2");
        assert_eq!(got.price, 12.5);
        assert_eq!(got.stock, 7);
        assert_eq!(got.seller_id, bob.id);

        assert!(!products::update_product(conn, ProductId(404), &edit)?);
        assert!(products::delete_product(conn, w.id)?);
        assert!(!products::delete_product(conn, w.id)?);
        assert_eq!(products::count_products(conn)?, 1);
        Ok(())
    })
    .unwrap();
}

#[test]
fn deleting_a_seller_removes_listings_and_nulls_order_references() {
    let db = Database::open_in_memory().unwrap();
    let (order_id, alice_id) = db
        .write(|uow| {
            let conn = uow.conn();
            let alice = users::insert_user(conn, &new_user("alice", Role::Customer))?;
            let bob = users::insert_user(conn, &new_user("bob", Role::Seller))?;
            let w = products::insert_product(conn, bob.id, &widget())?;
            let order = orders::insert_order(conn, alice.id, w.id, 1)?;

            users::delete_user(conn, bob.id)?;
            Ok((order.id, alice.id))
        })
        .unwrap();

    db.read(|uow| {
        let conn = uow.conn();
        assert_eq!(products::count_products(conn)?, 0);
        let order = orders::get_order(conn, order_id)?.unwrap();
        assert_eq!(order.customer_id, Some(alice_id));
        assert_eq!(order.product_id, None);
        Ok(())
    })
    .unwrap();
}

#[test]
fn deleting_a_customer_keeps_their_orders() {
    let db = Database::open_in_memory().unwrap();
    db.write(|uow| {
        let conn = uow.conn();
        let alice = users::insert_user(conn, &new_user("alice", Role::Customer))?;
        let bob = users::insert_user(conn, &new_user("bob", Role::Seller))?;
        let w = products::insert_product(conn, bob.id, &widget())?;
        orders::insert_order(conn, alice.id, w.id, 1)?;
        orders::insert_order(conn, alice.id, w.id, 1)?;
        assert_eq!(orders::list_by_customer(conn, alice.id)?.len(), 2);

        users::delete_user(conn, alice.id)?;
        let all = orders::list_orders(conn)?;
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|o| o.customer_id.is_none()));
        assert!(all.iter().all(|o| o.product_id == Some(w.id)));
        Ok(())
    })
    .unwrap();
}

#[test]
fn orders_insert_and_delete() {
    let db = Database::open_in_memory().unwrap();
    db.write(|uow| {
        let conn = uow.conn();
        let alice = users::insert_user(conn, &new_user("alice", Role::Customer))?;
        let bob = users::insert_user(conn, &new_user("bob", Role::Seller))?;
        let w = products::insert_product(conn, bob.id, &widget())?;

        let order = orders::insert_order(conn, alice.id, w.id, 1)?;
        assert_eq!(orders::get_order(conn, order.id)?.unwrap().quantity, 1);
        assert_eq!(orders::count_orders(conn)?, 1);

        assert!(orders::delete_order(conn, order.id)?);
        assert!(!orders::delete_order(conn, order.id)?);
        assert!(orders::list_orders(conn)?.is_empty());
        Ok(())
    })
    .unwrap();
}

#[test]
fn sessions_resolve_until_deleted_or_user_removed() {
    let db = Database::open_in_memory().unwrap();
    db.write(|uow| {
        let conn = uow.conn();
        let alice = users::insert_user(conn, &new_user("alice", Role::Customer))?;
        let bob = users::insert_user(conn, &new_user("bob", Role::Seller))?;
        sessions::create_session(conn, "tok-a", alice.id)?;
        sessions::create_session(conn, "tok-b", bob.id)?;

        assert_eq!(sessions::resolve_session(conn, "tok-a", DAY)?.unwrap().id, alice.id);
        assert!(sessions::resolve_session(conn, "missing", DAY)?.is_none());

        assert!(sessions::delete_session(conn, "tok-a")?);
        assert!(!sessions::delete_session(conn, "tok-a")?);
        assert!(sessions::resolve_session(conn, "tok-a", DAY)?.is_none());

        users::delete_user(conn, bob.id)?;
        assert!(sessions::resolve_session(conn, "tok-b", DAY)?.is_none());
        assert_eq!(sessions::count_sessions_for_user(conn, bob.id)?, 0);
        Ok(())
    })
    .unwrap();
}

#[test]
fn stale_sessions_stop_resolving_and_are_pruned() {
    let db = Database::open_in_memory().unwrap();
    db.write(|uow| {
        let conn = uow.conn();
        let alice = users::insert_user(conn, &new_user("alice", Role::Customer))?;
        sessions::create_session(conn, "fresh", alice.id)?;
        sessions::create_session(conn, "stale", alice.id)?;
        conn.execute(
            "UPDATE sessions SET created_at = '2000-01-01T00:00:00.000Z' WHERE token = 'stale'",
            [],
        )
        .unwrap();

        assert!(sessions::resolve_session(conn, "fresh", DAY)?.is_some());
        assert!(sessions::resolve_session(conn, "stale", DAY)?.is_none());

        assert_eq!(sessions::prune_sessions(conn, DAY)?, 1);
        assert_eq!(sessions::count_sessions_for_user(conn, alice.id)?, 1);
        assert_eq!(sessions::prune_sessions(conn, DAY)?, 0);
        Ok(())
    })
    .unwrap();
}
