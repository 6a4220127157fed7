use hc_core::Role;

use super::{Access, Endpoint, RouteGroup};
use crate::handlers::{admin, auth, cart, catalog, chat, doctors, managers, orders, pprof, system, users};

const PUBLIC: Access = Access::Public;
const AUTHENTICATED: Access = Access::Authenticated;
const USER: Access = Access::Role(Role::User);
const DOCTOR: Access = Access::Role(Role::Doctor);
const MANAGER: Access = Access::Role(Role::PharmacyManager);
const ADMIN: Access = Access::Role(Role::Admin);

/// Literal segments are declared before `:param` siblings so that
/// `/doctors/profile` is not captured by `/doctors/:doctor_id`.
pub fn route_table() -> Vec<RouteGroup> {
    vec![
        RouteGroup::new(
            "",
            vec![
                Endpoint::get("/ping", PUBLIC, system::ping),
                Endpoint::post("/login", PUBLIC, auth::login),
                Endpoint::post("/refresh-token", PUBLIC, auth::refresh_token),
                Endpoint::post("/verify-email", PUBLIC, auth::verify_email),
                Endpoint::post("/forgot-password", PUBLIC, auth::forgot_password),
                Endpoint::post("/reset-password", PUBLIC, auth::reset_password),
                Endpoint::get("/categories", PUBLIC, catalog::categories),
            ],
        ),
        RouteGroup::new(
            "/users",
            vec![
                Endpoint::post("/register", PUBLIC, auth::register_user),
                Endpoint::get("/profile", USER, users::get_profile),
                Endpoint::put("/profile", USER, users::update_profile),
                Endpoint::get("/addresses", USER, users::list_addresses),
                Endpoint::post("/addresses", USER, users::create_address),
                Endpoint::put("/addresses/:address_id", USER, users::update_address),
                Endpoint::delete("/addresses/:address_id", USER, users::delete_address),
                Endpoint::patch("/addresses/:address_id/main", USER, users::set_main_address),
            ],
        ),
        RouteGroup::new(
            "/doctors",
            vec![
                Endpoint::post("/register", PUBLIC, auth::register_doctor),
                Endpoint::get("", PUBLIC, doctors::list_doctors),
                Endpoint::get("/profile", DOCTOR, doctors::get_profile),
                Endpoint::put("/profile", DOCTOR, doctors::update_profile),
                Endpoint::patch("/status", DOCTOR, doctors::set_status),
                Endpoint::get("/specializations", PUBLIC, doctors::specializations),
                Endpoint::get("/:doctor_id", PUBLIC, doctors::get_doctor),
            ],
        ),
        RouteGroup::new(
            "/drugs",
            vec![
                Endpoint::get("", PUBLIC, catalog::list_drugs),
                Endpoint::get("/forms", PUBLIC, catalog::forms),
                Endpoint::get("/classifications", PUBLIC, catalog::classifications),
                Endpoint::get("/:drug_id", PUBLIC, catalog::get_drug),
                Endpoint::get("/:drug_id/pharmacies", PUBLIC, catalog::drug_offers),
            ],
        ),
        RouteGroup::new(
            "/cart",
            vec![
                Endpoint::get("", USER, cart::view),
                Endpoint::post("", USER, cart::add_item),
                Endpoint::put("/:cart_item_id", USER, cart::update_item),
                Endpoint::delete("/:cart_item_id", USER, cart::remove_item),
            ],
        ),
        RouteGroup::new(
            "/chat-rooms",
            vec![
                Endpoint::post("", USER, chat::create_room),
                Endpoint::patch("", DOCTOR, chat::join_room),
                Endpoint::get("", AUTHENTICATED, chat::list_rooms),
                Endpoint::get("/chats/:room_id", AUTHENTICATED, chat::listen),
                Endpoint::post("/chats/:room_id", AUTHENTICATED, chat::post_message),
                Endpoint::patch("/:room_id/close", AUTHENTICATED, chat::close_room),
                Endpoint::post("/:room_id/prescriptions", DOCTOR, chat::prescribe),
                Endpoint::get("/:room_id/prescriptions", AUTHENTICATED, chat::prescriptions),
            ],
        ),
        RouteGroup::new(
            "/orders",
            vec![
                Endpoint::post("", USER, orders::checkout),
                Endpoint::get("", USER, orders::list_mine),
                Endpoint::get("/:order_id", AUTHENTICATED, orders::get_order),
                Endpoint::patch("/:order_id/payment-proof", USER, orders::upload_payment_proof),
                Endpoint::patch("/:order_id/confirm-payment", ADMIN, orders::confirm_payment),
                Endpoint::patch("/:order_id/cancel", USER, orders::cancel),
            ],
        ),
        RouteGroup::new(
            "/pharmacy-orders",
            vec![
                Endpoint::get("/:pharmacy_order_id", AUTHENTICATED, orders::get_pharmacy_order),
                Endpoint::patch("/:pharmacy_order_id/confirm-delivery", USER, orders::confirm_delivery),
            ],
        ),
        RouteGroup::new(
            "/managers",
            vec![
                Endpoint::get("/pharmacies", MANAGER, managers::list_pharmacies),
                Endpoint::post("/pharmacies", MANAGER, managers::create_pharmacy),
                Endpoint::get("/pharmacies/:pharmacy_id", MANAGER, managers::get_pharmacy),
                Endpoint::put("/pharmacies/:pharmacy_id", MANAGER, managers::update_pharmacy),
                Endpoint::delete("/pharmacies/:pharmacy_id", MANAGER, managers::delete_pharmacy),
                Endpoint::get("/pharmacies/:pharmacy_id/drugs", MANAGER, managers::list_inventory),
                Endpoint::post("/pharmacies/:pharmacy_id/drugs", MANAGER, managers::add_inventory_item),
                Endpoint::put(
                    "/pharmacies/:pharmacy_id/drugs/:pharmacy_drug_id",
                    MANAGER,
                    managers::update_inventory_item,
                ),
                Endpoint::get("/stock-changes", MANAGER, managers::stock_changes),
                Endpoint::post("/stock-mutations", MANAGER, managers::mutate_stock),
                Endpoint::get("/orders", MANAGER, managers::list_orders),
                Endpoint::patch("/orders/:pharmacy_order_id/send", MANAGER, managers::send_order),
                Endpoint::patch("/orders/:pharmacy_order_id/cancel", MANAGER, managers::cancel_order),
                Endpoint::get("/reports", MANAGER, managers::reports),
            ],
        ),
        RouteGroup::new(
            "/admin",
            vec![
                Endpoint::post("/partners", ADMIN, admin::create_partner),
                Endpoint::get("/partners", ADMIN, admin::list_partners),
                Endpoint::get("/partners/:partner_id", ADMIN, admin::get_partner),
                Endpoint::put("/partners/:partner_id", ADMIN, admin::update_partner),
                Endpoint::delete("/partners/:partner_id", ADMIN, admin::delete_partner),
                Endpoint::get("/drugs/reports", ADMIN, admin::drug_reports),
                Endpoint::post("/drugs", ADMIN, catalog::create_drug),
                Endpoint::put("/drugs/:drug_id", ADMIN, catalog::update_drug),
                Endpoint::delete("/drugs/:drug_id", ADMIN, catalog::delete_drug),
                Endpoint::post("/categories", ADMIN, catalog::create_category),
                Endpoint::put("/categories/:category_id", ADMIN, catalog::update_category),
                Endpoint::delete("/categories/:category_id", ADMIN, catalog::delete_category),
                Endpoint::get("/pharmacies", ADMIN, admin::list_pharmacies),
                Endpoint::get("/orders", ADMIN, admin::list_orders),
                Endpoint::get("/stock-changes", ADMIN, admin::stock_changes),
            ],
        ),
        RouteGroup::new(
            "/debug/pprof",
            vec![
                Endpoint::get("/", PUBLIC, pprof::index),
                Endpoint::get("/profile", PUBLIC, pprof::profile),
                Endpoint::get("/heap", PUBLIC, pprof::heap),
                Endpoint::get("/block", PUBLIC, pprof::block),
                Endpoint::get("/goroutine", PUBLIC, pprof::goroutine),
            ],
        ),
    ]
}
