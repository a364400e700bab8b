use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    ApiErrorBody, AuthRequest, AuthResponse, Book, BookPayload, BorrowRequest, Member,
    MemberPayload, RegisterRequest, ReturnRequest, Transaction, UploadResponse,
};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::services::session;

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to parse server response: {0}")]
    Decode(String),
}

/// Prefer the backend's `message` field when the error body carries one,
/// otherwise fall back to a generic string.
pub fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

/// API client for the library backend. One method per (resource,
/// operation) pair; every request goes through the same decoration and
/// response hooks, so bearer-token injection and the global 401 handling
/// are independent of which call triggered them.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decorate(builder: RequestBuilder) -> RequestBuilder {
        match session::token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Shared response hook: a 401 anywhere drops the session and forces
    /// re-login, other failures surface the server's message.
    async fn check(response: Response) -> Result<Response, ApiError> {
        if response.status() == 401 {
            session::force_login();
            return Err(ApiError::Unauthorized);
        }
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Server {
            status,
            message: error_message(status, &body),
        })
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|error| ApiError::Decode(error.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = Self::decorate(Request::get(&self.url(path)))
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        Self::parse(response).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = Self::decorate(builder)
            .json(body)
            .map_err(|error| ApiError::Network(error.to_string()))?
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        Self::parse(response).await
    }

    async fn delete_at(&self, path: &str) -> Result<(), ApiError> {
        let response = Self::decorate(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        Self::check(response).await.map(|_| ())
    }

    // Books

    pub async fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        self.get_json("/books").await
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, ApiError> {
        self.get_json(&format!("/books/{id}")).await
    }

    // Built through the query API so terms with `&`, `#` or spaces reach
    // the backend intact.
    fn search_request(&self, query: &str) -> RequestBuilder {
        Self::decorate(Request::get(&self.url("/books/search")).query([("query", query)]))
    }

    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>, ApiError> {
        let response = self
            .search_request(query)
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        Self::parse(response).await
    }

    pub async fn create_book(&self, payload: &BookPayload) -> Result<Book, ApiError> {
        self.send_json(Request::post(&self.url("/books")), payload).await
    }

    pub async fn update_book(&self, id: i64, payload: &BookPayload) -> Result<Book, ApiError> {
        self.send_json(Request::put(&self.url(&format!("/books/{id}"))), payload)
            .await
    }

    pub async fn delete_book(&self, id: i64) -> Result<(), ApiError> {
        self.delete_at(&format!("/books/{id}")).await
    }

    // Members

    pub async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        self.get_json("/members").await
    }

    pub async fn get_member(&self, id: i64) -> Result<Member, ApiError> {
        self.get_json(&format!("/members/{id}")).await
    }

    pub async fn create_member(&self, payload: &MemberPayload) -> Result<Member, ApiError> {
        self.send_json(Request::post(&self.url("/members")), payload).await
    }

    pub async fn update_member(&self, id: i64, payload: &MemberPayload) -> Result<Member, ApiError> {
        self.send_json(Request::put(&self.url(&format!("/members/{id}"))), payload)
            .await
    }

    pub async fn delete_member(&self, id: i64) -> Result<(), ApiError> {
        self.delete_at(&format!("/members/{id}")).await
    }

    // Transactions

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_json("/transactions").await
    }

    pub async fn get_transaction(&self, id: i64) -> Result<Transaction, ApiError> {
        self.get_json(&format!("/transactions/{id}")).await
    }

    pub async fn transactions_by_member(&self, member_id: i64) -> Result<Vec<Transaction>, ApiError> {
        self.get_json(&format!("/transactions/member/{member_id}")).await
    }

    pub async fn transactions_by_book(&self, book_id: i64) -> Result<Vec<Transaction>, ApiError> {
        self.get_json(&format!("/transactions/book/{book_id}")).await
    }

    pub async fn overdue_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.get_json("/transactions/overdue").await
    }

    pub async fn borrow(&self, request: &BorrowRequest) -> Result<Transaction, ApiError> {
        self.send_json(Request::post(&self.url("/transactions/borrow")), request)
            .await
    }

    pub async fn return_book(&self, request: &ReturnRequest) -> Result<Transaction, ApiError> {
        self.send_json(Request::post(&self.url("/transactions/return")), request)
            .await
    }

    // Images

    pub async fn upload_image(&self, file: &File) -> Result<UploadResponse, ApiError> {
        let form = FormData::new()
            .map_err(|_| ApiError::Network("failed to build form data".to_string()))?;
        form.append_with_blob("file", file)
            .map_err(|_| ApiError::Network("failed to attach file".to_string()))?;
        let response = Self::decorate(Request::post(&self.url("/images/upload")))
            .body(JsValue::from(form))
            .map_err(|error| ApiError::Network(error.to_string()))?
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        Self::parse(response).await
    }

    // Auth

    pub async fn login(&self, request: &AuthRequest) -> Result<AuthResponse, ApiError> {
        self.send_json(Request::post(&self.url("/auth/authenticate")), request)
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = Request::post(&self.url("/auth/register"))
            .json(request)
            .map_err(|error| ApiError::Network(error.to_string()))?
            .send()
            .await
            .map_err(|error| ApiError::Network(error.to_string()))?;
        Self::check(response).await.map(|_| ())
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_server_message() {
        let message = error_message(404, r#"{"message":"Book not found"}"#);
        assert_eq!(message, "Book not found");
    }

    #[test]
    fn test_error_message_falls_back_on_empty_or_unparseable_bodies() {
        assert_eq!(error_message(500, ""), "Request failed with status 500");
        assert_eq!(error_message(500, "<html>oops</html>"), "Request failed with status 500");
        assert_eq!(error_message(400, r#"{"message":""}"#), "Request failed with status 400");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn search_request_percent_encodes_the_query() {
        let request = ApiClient::new()
            .search_request("C# & tea")
            .build()
            .expect("request builds");
        assert!(
            request.url().contains("query=C%23+%26+tea"),
            "unexpected url: {}",
            request.url()
        );
    }
}
