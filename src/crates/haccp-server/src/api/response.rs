//! API response helpers
//!
//! Single resources are wrapped as `{ success, data }`; lists as
//! `{ data, page, per_page, total, pages }`.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Generic success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    /// Create a new success response
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Create a 200 OK JSON response
pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(SuccessResponse::new(data)))
}

/// Create a 201 Created JSON response
pub fn created<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(SuccessResponse::new(data)))
}

/// Create a 204 No Content response
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Response data items
    pub data: Vec<T>,
    /// Current page number (0-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
    /// Total number of items
    pub total: u32,
    /// Total number of pages
    pub pages: u32,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u32) -> Self {
        let pages = if per_page == 0 { 0 } else { total.div_ceil(per_page) };
        Self {
            data,
            page,
            per_page,
            total,
            pages,
        }
    }
}

/// Create a paginated response
pub fn paginated<T: Serialize>(data: Vec<T>, page: u32, per_page: u32, total: i64) -> impl IntoResponse {
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    (StatusCode::OK, Json(PaginatedResponse::new(data, page, per_page, total)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestData {
        id: u32,
        name: String,
    }

    #[test]
    fn test_success_response() {
        let resp = SuccessResponse::new(TestData {
            id: 1,
            name: "test".to_string(),
        });
        assert!(resp.success);
        assert_eq!(resp.data.id, 1);
    }

    #[test]
    fn test_paginated_response() {
        let data = vec![
            TestData { id: 1, name: "test1".to_string() },
            TestData { id: 2, name: "test2".to_string() },
        ];
        let resp = PaginatedResponse::new(data, 0, 10, 2);
        assert_eq!(resp.page, 0);
        assert_eq!(resp.per_page, 10);
        assert_eq!(resp.total, 2);
        assert_eq!(resp.pages, 1);
    }

    #[test]
    fn test_paginated_response_multiple_pages() {
        let resp = PaginatedResponse::new(Vec::<i32>::new(), 0, 10, 25);
        assert_eq!(resp.total, 25);
        assert_eq!(resp.pages, 3);
    }

    #[test]
    fn test_paginated_response_empty() {
        let resp = PaginatedResponse::new(Vec::<i32>::new(), 0, 20, 0);
        assert_eq!(resp.pages, 0);
    }
}
