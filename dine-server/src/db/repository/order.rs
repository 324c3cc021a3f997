//! Order Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderCreateRecord, OrderDetail, OrderPatch};
use shared::order::OrderStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

pub const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order in the `processing` state
    pub async fn create(&self, data: OrderCreateRecord) -> RepoResult<Order> {
        // chef/dining_table are bound as native RecordIds so they stay record links
        let created: Vec<Order> = self
            .base
            .db()
            .query(
                r#"
                CREATE orders SET
                    name = $name,
                    number_of_people = $number_of_people,
                    address = $address,
                    phone_number = $phone_number,
                    order_item = $order_item,
                    average_time = $average_time,
                    time = $time,
                    dine_in = $dine_in,
                    status = $status,
                    chef = $chef,
                    dining_table = $dining_table
                "#,
            )
            .bind(("name", data.name))
            .bind(("number_of_people", data.number_of_people))
            .bind(("address", data.address))
            .bind(("phone_number", data.phone_number))
            .bind(("order_item", data.order_item))
            .bind(("average_time", data.average_time))
            .bind(("time", data.time))
            .bind(("dine_in", data.dine_in))
            .bind(("status", OrderStatus::PROCESSING))
            .bind(("chef", data.chef))
            .bind(("dining_table", data.dining_table))
            .await?
            .take(0)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    /// One order with chef and table fetched
    pub async fn find_detail(&self, id: &RecordId) -> RepoResult<Option<OrderDetail>> {
        let details: Vec<OrderDetail> = self
            .base
            .db()
            .query("SELECT * FROM $id FETCH chef, dining_table")
            .bind(("id", id.clone()))
            .await?
            .take(0)?;
        Ok(details.into_iter().next())
    }

    /// All orders, newest first, with chef and table fetched
    pub async fn find_all_details(&self) -> RepoResult<Vec<OrderDetail>> {
        let details: Vec<OrderDetail> = self
            .base
            .db()
            .query("SELECT * FROM orders ORDER BY time DESC FETCH chef, dining_table")
            .await?
            .take(0)?;
        Ok(details)
    }

    /// Merge `patch` into the order and return the record as it was before
    ///
    /// With `keep_served` the write only applies to orders that are not yet
    /// served. Returns None when the order does not exist or the guard did not
    /// match.
    pub async fn patch_returning_before(
        &self,
        id: &RecordId,
        patch: OrderPatch,
        keep_served: bool,
    ) -> RepoResult<Option<Order>> {
        let sql = if keep_served {
            "UPDATE $id MERGE $patch WHERE status != $served RETURN BEFORE"
        } else {
            "UPDATE $id MERGE $patch RETURN BEFORE"
        };
        let before: Vec<Order> = self
            .base
            .db()
            .query(sql)
            .bind(("id", id.clone()))
            .bind(("patch", patch))
            .bind(("served", OrderStatus::SERVED))
            .await?
            .take(0)?;
        Ok(before.into_iter().next())
    }

    /// Put back the status an order had before it was marked served
    ///
    /// Only applies while the order is still served; returns whether it did.
    pub async fn restore_status(&self, id: &RecordId, status: OrderStatus) -> RepoResult<bool> {
        let updated: Vec<Order> = self
            .base
            .db()
            .query("UPDATE $id SET status = $status WHERE status = $served RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("status", status))
            .bind(("served", OrderStatus::SERVED))
            .await?
            .take(0)?;
        Ok(!updated.is_empty())
    }

    /// Free a served order's table and chef in one transaction
    ///
    /// Same guards as the single releases: the table only flips when occupied
    /// and the chef counter never drops below zero.
    pub async fn release_links(
        &self,
        dining_table: Option<&RecordId>,
        chef: Option<&RecordId>,
    ) -> RepoResult<()> {
        if dining_table.is_none() && chef.is_none() {
            return Ok(());
        }

        let mut sql = String::from("BEGIN TRANSACTION;\n");
        if dining_table.is_some() {
            sql.push_str("UPDATE $dining_table SET occupied = false WHERE occupied = true;\n");
        }
        if chef.is_some() {
            sql.push_str("UPDATE $chef SET active_orders -= 1 WHERE active_orders > 0;\n");
        }
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self.base.db().query(sql);
        if let Some(table_id) = dining_table {
            query = query.bind(("dining_table", table_id.clone()));
        }
        if let Some(chef_id) = chef {
            query = query.bind(("chef", chef_id.clone()));
        }
        query.await?.check()?;
        Ok(())
    }
}
