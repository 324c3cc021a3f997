use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use super::super::allocator::MAX_PARTY_SIZE;

/// Order lifecycle errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Order has no items")]
    EmptyOrder,

    #[error("Invalid order item: {0}")]
    InvalidItem(String),

    #[error("Party of {0} exceeds the largest table")]
    PartySizeUnsupported(i32),

    #[error("No table available for {party_size} people")]
    TableUnavailable { party_size: i32 },

    #[error("No chefs available")]
    NoChefsAvailable,

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order already served: {0}")]
    AlreadyServed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => AppError::validation(msg),
            OrderError::EmptyOrder => AppError::new(ErrorCode::OrderEmpty),
            OrderError::InvalidItem(msg) => AppError::with_message(ErrorCode::OrderItemInvalid, msg),
            OrderError::PartySizeUnsupported(party_size) => {
                AppError::new(ErrorCode::PartySizeUnsupported)
                    .with_detail("party_size", party_size)
                    .with_detail("max_party_size", MAX_PARTY_SIZE)
            }
            OrderError::TableUnavailable { party_size } => AppError::with_message(
                ErrorCode::TableUnavailable,
                format!("No table available for {party_size} people"),
            )
            .with_detail("party_size", party_size),
            OrderError::NoChefsAvailable => AppError::new(ErrorCode::NoChefsAvailable),
            OrderError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
                    .with_detail("id", id)
            }
            OrderError::AlreadyServed(id) => AppError::with_message(
                ErrorCode::OrderAlreadyServed,
                format!("Order {id} has already been served"),
            )
            .with_detail("id", id),
            OrderError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_table_unavailable_carries_party_size() {
        let err: AppError = OrderError::TableUnavailable { party_size: 3 }.into();
        assert_eq!(err.code, ErrorCode::TableUnavailable);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        assert_eq!(err.details.unwrap()["party_size"], 3);
    }

    #[test]
    fn test_party_size_unsupported_is_bad_request() {
        let err: AppError = OrderError::PartySizeUnsupported(9).into();
        assert_eq!(err.code, ErrorCode::PartySizeUnsupported);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_chefs_is_service_unavailable() {
        let err: AppError = OrderError::NoChefsAvailable.into();
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_storage_conflict_is_service_unavailable() {
        let err: AppError = OrderError::Storage(RepoError::Conflict("retry".into())).into();
        assert_eq!(err.code, ErrorCode::SystemBusy);
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_already_served_is_bad_request() {
        let err: AppError = OrderError::AlreadyServed("orders:a".into()).into();
        assert_eq!(err.code, ErrorCode::OrderAlreadyServed);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details.unwrap()["id"], "orders:a");
    }

    #[test]
    fn test_storage_error_hides_details() {
        let err: AppError = OrderError::Storage(RepoError::Database("disk on fire".into())).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("disk"));
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
