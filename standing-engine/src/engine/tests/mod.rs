use super::*;
use crate::rules::{RoleTransition, WarningReason};
use shared::error::ErrorCode;
use shared::models::{
    BidStatus, ComplaintStatus, CustomerRole, OrderStatus, PayAdjustment, RatingInput,
    ReputationKind, Resolution,
};
use tokio::sync::broadcast::Receiver;

fn create_test_engine() -> StandingEngine {
    let storage = StandingStorage::open_in_memory().unwrap();
    StandingEngine::new(storage, StandingConfig::default()).unwrap()
}

/// Registered and approved
fn member(engine: &StandingEngine, username: &str) -> Customer {
    let customer = engine
        .register_customer(username, &format!("{username}@example.com"))
        .unwrap();
    engine.approve_registration(customer.id).unwrap()
}

fn funded_member(engine: &StandingEngine, username: &str, balance: f64) -> Customer {
    let customer = member(engine, username);
    engine.deposit(customer.id, balance).unwrap();
    engine.customer(customer.id).unwrap()
}

fn vip(engine: &StandingEngine, username: &str, balance: f64) -> Customer {
    let customer = funded_member(engine, username, balance);
    update_customer(engine, customer.id, |c| {
        c.role = CustomerRole::Vip;
        c.vip_since = Some(1);
    })
}

/// Edit a record directly, bypassing the rules
fn update_customer(engine: &StandingEngine, id: i64, f: impl FnOnce(&mut Customer)) -> Customer {
    let txn = engine.storage.begin_write().unwrap();
    let mut customer: Customer = txn.get(id).unwrap().unwrap();
    f(&mut customer);
    txn.put(&customer).unwrap();
    txn.commit().unwrap();
    customer
}

fn update_employee(engine: &StandingEngine, id: i64, f: impl FnOnce(&mut Employee)) -> Employee {
    let txn = engine.storage.begin_write().unwrap();
    let mut employee: Employee = txn.get(id).unwrap().unwrap();
    f(&mut employee);
    txn.put(&employee).unwrap();
    txn.commit().unwrap();
    employee
}

// ========================================================================
// Helper: staff and orders
// ========================================================================

struct Staff {
    chefs: Vec<Employee>,
    drivers: Vec<Employee>,
}

/// Two chefs and two delivery staff at default pay
fn hire_staff(engine: &StandingEngine) -> Staff {
    let chefs = ["Marco", "Lucia"]
        .iter()
        .map(|name| engine.hire_employee(name, EmployeeRole::Chef, None).unwrap())
        .collect();
    let drivers = ["Pablo", "Ines"]
        .iter()
        .map(|name| {
            engine
                .hire_employee(name, EmployeeRole::Delivery, None)
                .unwrap()
        })
        .collect();
    Staff { chefs, drivers }
}

fn place(engine: &StandingEngine, customer_id: i64, subtotal: f64) -> Order {
    match engine.place_order(customer_id, subtotal).unwrap() {
        OrderPlacement::Accepted { order } => order,
        OrderPlacement::Rejected { .. } => panic!("order unexpectedly rejected"),
    }
}

/// Placed, cooked by `chef_id`, ready for bids
fn ready_order(engine: &StandingEngine, customer_id: i64, subtotal: f64, chef_id: i64) -> Order {
    let order = place(engine, customer_id, subtotal);
    engine.assign_chef(order.id, chef_id).unwrap();
    engine.mark_order_ready(order.id).unwrap()
}

/// Full flow up to Delivered
fn delivered_order(
    engine: &StandingEngine,
    customer_id: i64,
    subtotal: f64,
    chef_id: i64,
    driver_id: i64,
) -> Order {
    let order = ready_order(engine, customer_id, subtotal, chef_id);
    let bid = engine.submit_bid(order.id, driver_id, 5.0).unwrap();
    engine.accept_bid(order.id, bid.id, None).unwrap();
    engine.complete_order(order.id).unwrap();
    engine.order(order.id).unwrap()
}

fn rate_food(engine: &StandingEngine, order: &Order, score: u8) -> RatingOutcome {
    engine
        .submit_rating(
            order.id,
            order.customer_id,
            RatingInput {
                food: Some(score),
                delivery: None,
            },
        )
        .unwrap()
}

fn complain(
    engine: &StandingEngine,
    filer: ActorRef,
    target: ActorRef,
    kind: ReputationKind,
) -> FilingOutcome {
    engine
        .file_reputation_event(filer, target, kind, "service", "")
        .unwrap()
}

fn drain(rx: &mut Receiver<StandingEvent>) -> Vec<StandingEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

mod test_complaints;
