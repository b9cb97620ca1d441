//! Customer REST API handlers

use std::sync::Arc;

use axum::extract::{Path, State};

use super::dto::{CreateCustomerRequest, CustomerDto};
use crate::application::CustomerService;
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct CustomerState {
    pub customers: Arc<CustomerService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "Customer list", body = ApiResponse<Vec<CustomerDto>>)
    )
)]
pub async fn list_customers(State(state): State<CustomerState>) -> ApiResult<Vec<CustomerDto>> {
    let customers = state.customers.list().await?;
    ok(customers.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "Customer registered", body = ApiResponse<CustomerDto>),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_customer(
    State(state): State<CustomerState>,
    ValidatedJson(body): ValidatedJson<CreateCustomerRequest>,
) -> ApiResult<CustomerDto> {
    let details = body.into_new_customer()?;
    let customer = state.customers.register(details).await?;
    ok(customer.into())
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_customer(
    State(state): State<CustomerState>,
    Path(id): Path<String>,
) -> ApiResult<CustomerDto> {
    let customer = state.customers.get(&id).await?;
    ok(customer.into())
}
