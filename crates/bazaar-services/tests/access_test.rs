//! Policy-gated resource services: ownership, admin protection, NotFound.

use bazaar_core::errors::BazaarError;
use bazaar_core::identity::{Identity, Principal};
use bazaar_core::models::{ProductDraft, ProductId, Role, UserId, UNKNOWN};
use bazaar_services::provisioning::{self, Provisioned};
use bazaar_services::{dashboard, orders, products, users};
use bazaar_storage::queries::{orders as order_rows, products as product_rows};
use bazaar_storage::Database;

struct Shop {
    db: Database,
    admin: Identity,
    bob: Identity,
    carol: Identity,
    alice: Identity,
}

fn account(db: &Database, name: &str, role: Role) -> Identity {
    let provisioned = db
        .write(|uow| provisioning::ensure_account(uow, name, &format!("{name}@x.com"), "pw", role))
        .unwrap();
    let (Provisioned::Created(user) | Provisioned::Existing(user)) = provisioned;
    Identity::User(Principal {
        id: user.id,
        username: user.username,
        role: user.role,
    })
}

fn shop() -> Shop {
    let db = Database::open_in_memory().unwrap();
    let admin = account(&db, "admin", Role::Admin);
    let bob = account(&db, "bob", Role::Seller);
    let carol = account(&db, "carol", Role::Seller);
    let alice = account(&db, "alice", Role::Customer);
    Shop { db, admin, bob, carol, alice }
}

fn draft(name: &str) -> ProductDraft {
    ProductDraft::parse(name, "9.99", "5").unwrap()
}

fn id_of(identity: &Identity) -> UserId {
    identity.principal().unwrap().id
}

#[test]
fn anonymous_callers_must_authenticate() {
    let s = shop();
    let anon = Identity::Anonymous;
    let results = [
        s.db.read(|uow| products::list_all_products(uow, &anon)).map(|_| ()),
        s.db.read(|uow| orders::list_my_orders(uow, &anon)).map(|_| ()),
        s.db.read(|uow| users::list_users(uow, &anon)).map(|_| ()),
        s.db.write(|uow| products::create_product(uow, &anon, &draft("X"))).map(|_| ()),
        s.db.write(|uow| orders::place_order(uow, &anon, ProductId(1))).map(|_| ()),
    ];
    for result in results {
        assert!(matches!(result, Err(BazaarError::AuthenticationRequired)));
    }
}

#[test]
fn sellers_cannot_touch_each_others_products() {
    let s = shop();
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();
    assert_eq!(widget.seller_id, id_of(&s.bob));

    let err = s
        .db
        .write(|uow| products::update_product(uow, &s.carol, widget.id, &draft("Hijacked")))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));

    let err = s
        .db
        .write(|uow| products::delete_product(uow, &s.carol, widget.id))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));

    let err = s
        .db
        .read(|uow| products::get_product_for_edit(uow, &s.carol, widget.id))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));

    let untouched = s
        .db
        .read(|uow| product_rows::get_product(uow.conn(), widget.id))
        .unwrap()
        .unwrap();
    assert_eq!(untouched.name, "Widget");
}

#[test]
fn owner_edits_and_deletes_own_product() {
    let s = shop();
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();

    let edited = s
        .db
        .write(|uow| {
            products::update_product(uow, &s.bob, widget.id, &ProductDraft::parse("Widget+", "1.5", "0")?)
        })
        .unwrap();
    assert_eq!(edited.name, "Widget+");
    assert_eq!(edited.stock, 0);

    let mine = s.db.read(|uow| products::list_seller_products(uow, &s.bob)).unwrap();
    assert_eq!(mine, vec![edited]);
    let carols = s.db.read(|uow| products::list_seller_products(uow, &s.carol)).unwrap();
    assert!(carols.is_empty());

    s.db.write(|uow| products::delete_product(uow, &s.bob, widget.id))
        .unwrap();
    let err = s
        .db
        .read(|uow| products::get_product(uow, &s.bob, widget.id))
        .unwrap_err();
    assert!(matches!(err, BazaarError::NotFound { .. }));
}

#[test]
fn editing_or_deleting_missing_products_reports_not_found() {
    let s = shop();
    let missing = ProductId(4242);
    let err = s
        .db
        .write(|uow| products::update_product(uow, &s.bob, missing, &draft("X")))
        .unwrap_err();
    assert!(matches!(err, BazaarError::NotFound { entity: "Product", id: 4242 }));

    let err = s
        .db
        .write(|uow| products::delete_product(uow, &s.admin, missing))
        .unwrap_err();
    assert!(matches!(err, BazaarError::NotFound { .. }));
}

#[test]
fn customers_cannot_manage_products_at_all() {
    let s = shop();
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();

    let err = s
        .db
        .write(|uow| products::create_product(uow, &s.alice, &draft("Mine")))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));

    // Denied before lookup, so a missing id does not leak as NotFound.
    let err = s
        .db
        .write(|uow| products::delete_product(uow, &s.alice, ProductId(999)))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));

    let seen = s.db.read(|uow| products::get_product(uow, &s.alice, widget.id)).unwrap();
    assert_eq!(seen.id, widget.id);
}

#[test]
fn admin_deletes_any_product_but_cannot_edit_it() {
    let s = shop();
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();

    let err = s
        .db
        .write(|uow| products::update_product(uow, &s.admin, widget.id, &draft("X")))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));

    s.db.write(|uow| products::delete_product(uow, &s.admin, widget.id))
        .unwrap();
    let all = s.db.read(|uow| products::list_all_products(uow, &s.admin)).unwrap();
    assert!(all.is_empty());
}

#[test]
fn sellers_cannot_browse_the_full_catalog() {
    let s = shop();
    let err = s
        .db
        .read(|uow| products::list_all_products(uow, &s.bob))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));
}

#[test]
fn admins_cannot_delete_admins() {
    let s = shop();
    let second_admin = account(&s.db, "root2", Role::Admin);

    for target in [id_of(&s.admin), id_of(&second_admin)] {
        let err = s
            .db
            .write(|uow| users::delete_user(uow, &s.admin, target))
            .unwrap_err();
        assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));
    }
    let listed = s.db.read(|uow| users::list_users(uow, &s.admin)).unwrap();
    assert_eq!(listed.len(), 5);
}

#[test]
fn admin_deletes_non_admin_users() {
    let s = shop();
    let alice_id = id_of(&s.alice);
    let removed = s
        .db
        .write(|uow| users::delete_user(uow, &s.admin, alice_id))
        .unwrap();
    assert_eq!(removed.username, "alice");

    let err = s
        .db
        .read(|uow| users::get_user(uow, &s.admin, alice_id))
        .unwrap_err();
    assert!(matches!(err, BazaarError::NotFound { entity: "User", .. }));

    let err = s
        .db
        .write(|uow| users::delete_user(uow, &s.admin, alice_id))
        .unwrap_err();
    assert!(matches!(err, BazaarError::NotFound { .. }));
}

#[test]
fn only_admins_manage_users() {
    let s = shop();
    for caller in [&s.alice, &s.bob] {
        let err = s.db.read(|uow| users::list_users(uow, caller)).unwrap_err();
        assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));
        let err = s
            .db
            .write(|uow| users::delete_user(uow, caller, id_of(&s.carol)))
            .unwrap_err();
        assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));
    }
}

#[test]
fn only_customers_place_orders() {
    let s = shop();
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();

    for caller in [&s.bob, &s.admin] {
        let err = s
            .db
            .write(|uow| orders::place_order(uow, caller, widget.id))
            .unwrap_err();
        assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));
    }
    let count = s.db.read(|uow| order_rows::count_orders(uow.conn())).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn ordering_a_missing_product_creates_no_order() {
    let s = shop();
    let err = s
        .db
        .write(|uow| orders::place_order(uow, &s.alice, ProductId(77)))
        .unwrap_err();
    assert!(matches!(err, BazaarError::NotFound { entity: "Product", id: 77 }));
    let count = s.db.read(|uow| order_rows::count_orders(uow.conn())).unwrap();
    assert_eq!(count, 0);
}

#[test]
fn placing_an_order_leaves_stock_alone() {
    let s = shop();
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();
    for _ in 0..7 {
        s.db.write(|uow| orders::place_order(uow, &s.alice, widget.id))
            .unwrap();
    }
    let after = s
        .db
        .read(|uow| product_rows::get_product(uow.conn(), widget.id))
        .unwrap()
        .unwrap();
    assert_eq!(after.stock, 5);
}

#[test]
fn order_listings_substitute_unknown_for_missing_rows() {
    let s = shop();
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();
    s.db.write(|uow| orders::place_order(uow, &s.alice, widget.id))
        .unwrap();

    s.db.write(|uow| products::delete_product(uow, &s.admin, widget.id))
        .unwrap();
    let mine = s.db.read(|uow| orders::list_my_orders(uow, &s.alice)).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].product_name, UNKNOWN);

    s.db.write(|uow| users::delete_user(uow, &s.admin, id_of(&s.alice)))
        .unwrap();
    let book = s.db.read(|uow| orders::list_all_orders(uow, &s.admin)).unwrap();
    assert_eq!(book.len(), 1);
    assert_eq!(book[0].customer_name, UNKNOWN);
    assert_eq!(book[0].product_name, UNKNOWN);
    assert_eq!(book[0].quantity, 1);
}

#[test]
fn customers_see_only_their_own_orders() {
    let s = shop();
    let dave = account(&s.db, "dave", Role::Customer);
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();
    let order = s
        .db
        .write(|uow| orders::place_order(uow, &s.alice, widget.id))
        .unwrap();

    assert!(s.db.read(|uow| orders::list_my_orders(uow, &dave)).unwrap().is_empty());
    let err = s
        .db
        .read(|uow| orders::get_order(uow, &dave, order.id))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));

    let own = s.db.read(|uow| orders::get_order(uow, &s.alice, order.id)).unwrap();
    assert_eq!(own.customer_name, "alice");

    let err = s.db.read(|uow| orders::list_all_orders(uow, &s.alice)).unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));
}

#[test]
fn only_admins_delete_orders() {
    let s = shop();
    let widget = s
        .db
        .write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();
    let order = s
        .db
        .write(|uow| orders::place_order(uow, &s.alice, widget.id))
        .unwrap();

    let err = s
        .db
        .write(|uow| orders::delete_order(uow, &s.alice, order.id))
        .unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));

    s.db.write(|uow| orders::delete_order(uow, &s.admin, order.id))
        .unwrap();
    let err = s
        .db
        .write(|uow| orders::delete_order(uow, &s.admin, order.id))
        .unwrap_err();
    assert!(matches!(err, BazaarError::NotFound { entity: "Order", .. }));
}

#[test]
fn dashboards_are_role_specific() {
    let s = shop();
    s.db.write(|uow| products::create_product(uow, &s.bob, &draft("Widget")))
        .unwrap();

    let seller = s.db.read(|uow| dashboard::seller_dashboard(uow, &s.bob)).unwrap();
    assert_eq!(seller.products.len(), 1);
    let admin = s.db.read(|uow| dashboard::admin_dashboard(uow, &s.admin)).unwrap();
    assert_eq!(admin.user_count, 4);
    assert_eq!(admin.product_count, 1);
    assert_eq!(admin.order_count, 0);
    let customer = s.db.read(|uow| dashboard::customer_dashboard(uow, &s.alice)).unwrap();
    assert_eq!(customer.order_count, 0);

    let err = s.db.read(|uow| dashboard::admin_dashboard(uow, &s.alice)).unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));
    let err = s.db.read(|uow| dashboard::customer_dashboard(uow, &s.bob)).unwrap_err();
    assert!(matches!(err, BazaarError::AuthorizationDenied { .. }));
}
