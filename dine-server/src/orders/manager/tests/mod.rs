use super::*;
use crate::db::DbService;
use crate::db::models::{Chef, ChefCreate, DiningTable, DiningTableCreate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use shared::order::{OrderItemInput, OrderStatus};


/// Seed shared by every lifecycle under test
const TEST_SEED: u64 = 42;

struct Harness {
    db: Surreal<Db>,
    lifecycle: OrderLifecycle,
    tables: DiningTableRepository,
    chefs: ChefRepository,
}

async fn create_test_harness() -> Harness {
    let db = DbService::memory().await.unwrap().db;
    let chefs = ChefRepository::new(db.clone());
    let balancer = ChefBalancer::with_rng(chefs.clone(), 8, StdRng::seed_from_u64(TEST_SEED));
    Harness {
        lifecycle: OrderLifecycle::with_balancer(db.clone(), balancer, 15),
        tables: DiningTableRepository::new(db.clone()),
        chefs,
        db,
    }
}

async fn add_table(h: &Harness, number: i32, size: i32) -> DiningTable {
    h.tables
        .create(DiningTableCreate {
            name: format!("Table {}", number),
            number,
            table_size: size,
        })
        .await
        .unwrap()
}

async fn add_chef(h: &Harness, name: &str) -> Chef {
    h.chefs
        .create(ChefCreate {
            name: name.to_string(),
        })
        .await
        .unwrap()
}

async fn chef_load(h: &Harness, chef: &Chef) -> i64 {
    h.chefs
        .find_by_id(chef.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap()
        .active_orders
}

async fn table_occupied(h: &Harness, table: &DiningTable) -> bool {
    h.tables
        .find_by_id(table.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap()
        .occupied
}

fn simple_item(name: &str, price: f64) -> OrderItemInput {
    OrderItemInput {
        name: name.to_string(),
        category: "mains".to_string(),
        quantity: 1,
        price,
    }
}

fn takeaway_order() -> OrderCreate {
    OrderCreate {
        name: "Ada".to_string(),
        number_of_people: 1,
        address: "1 Main St".to_string(),
        phone_number: "5551234".to_string(),
        order_item: vec![simple_item("Margherita", 9.5)],
        dine_in: false,
        average_time: None,
    }
}

fn dine_in_order(party_size: i32) -> OrderCreate {
    OrderCreate {
        number_of_people: party_size,
        dine_in: true,
        ..takeaway_order()
    }
}

fn served() -> OrderUpdate {
    OrderUpdate {
        average_time: None,
        status: Some(OrderStatus::Served),
    }
}

fn order_id(detail: &OrderDetail) -> String {
    detail.id.as_ref().unwrap().to_string()
}

fn with_status(status: &str) -> OrderUpdate {
    OrderUpdate {
        average_time: None,
        status: Some(OrderStatus::from(status)),
    }
}

/// Run a schema statement against the harness database
async fn define(h: &Harness, sql: &str) {
    h.db.query(sql).await.unwrap().check().unwrap();
}
