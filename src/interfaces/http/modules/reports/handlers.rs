//! Financial report handlers

use std::sync::Arc;

use axum::extract::{Query, State};

use super::dto::{IncomeQuery, IncomeReport};
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{ok, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct ReportState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/income",
    tag = "Reports",
    params(IncomeQuery),
    responses(
        (status = 200, description = "Income total and records for the window", body = ApiResponse<IncomeReport>),
        (status = 400, description = "Empty or inverted window")
    )
)]
pub async fn income_report(
    State(state): State<ReportState>,
    Query(query): Query<IncomeQuery>,
) -> ApiResult<IncomeReport> {
    if query.to <= query.from {
        return Err(DomainError::InvalidInterval.into());
    }

    let records = state.repos.ledger().find_between(query.from, query.to).await?;
    let total = records.iter().map(|r| r.amount).sum();
    ok(IncomeReport {
        total,
        records: records.into_iter().map(Into::into).collect(),
    })
}
