//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ContractService, CustomerService, PortalService, ReservationService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::modules::{
    customers, health, portal, reports, reservations, vehicles,
};

/// Everything the HTTP surface needs; built once in `main`.
pub struct ApiContext {
    pub repos: Arc<dyn RepositoryProvider>,
    pub db: DatabaseConnection,
    pub reservations: Arc<ReservationService>,
    pub customers: Arc<CustomerService>,
    pub portal: Arc<PortalService>,
    pub contracts: Arc<ContractService>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::create_vehicle,
        vehicles::available_vehicles,
        vehicles::get_vehicle,
        vehicles::set_vehicle_status,
        // Customers
        customers::list_customers,
        customers::create_customer,
        customers::get_customer,
        // Reservations
        reservations::list_reservations,
        reservations::create_reservation,
        reservations::get_reservation,
        reservations::activate_reservation,
        reservations::complete_reservation,
        reservations::cancel_reservation,
        reservations::generate_contract,
        // Portal
        portal::start_booking,
        portal::view_booking,
        portal::complete_booking,
        // Reports
        reports::income_report,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            EmptyData,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Vehicles
            vehicles::VehicleDto,
            vehicles::CreateVehicleRequest,
            vehicles::SetVehicleStatusRequest,
            // Customers
            customers::CustomerDto,
            customers::CreateCustomerRequest,
            // Reservations
            reservations::ReservationDto,
            reservations::CreateReservationRequest,
            reservations::ActivateReservationRequest,
            reservations::CompleteReservationRequest,
            // Portal
            portal::StartBookingRequest,
            portal::StartBookingResponse,
            portal::CompleteBookingRequest,
            // Reports
            reports::IncomeRecordDto,
            reports::IncomeReport,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Vehicles", description = "Fleet management and availability lookups"),
        (name = "Customers", description = "Renter registration and lookup"),
        (name = "Reservations", description = "Booking lifecycle: schedule, handover, return, cancel"),
        (name = "Portal", description = "Public token-gated self-service booking"),
        (name = "Reports", description = "Financial reporting over the income ledger"),
    ),
    info(
        title = "Fleet Rental Back-Office API",
        version = "0.1.0",
        description = "REST API for vehicle rental operations: fleet, bookings, handovers and income",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let health_state = health::HealthState {
        db: ctx.db.clone(),
        started_at: Arc::new(Instant::now()),
    };

    let vehicle_state = vehicles::VehicleState {
        repos: Arc::clone(&ctx.repos),
        reservations: Arc::clone(&ctx.reservations),
    };
    let vehicle_routes = Router::new()
        .route(
            "/",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route("/available", get(vehicles::available_vehicles))
        .route("/{id}", get(vehicles::get_vehicle))
        .route("/{id}/status", put(vehicles::set_vehicle_status))
        .with_state(vehicle_state);

    let customer_state = customers::CustomerState {
        customers: Arc::clone(&ctx.customers),
    };
    let customer_routes = Router::new()
        .route(
            "/",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route("/{id}", get(customers::get_customer))
        .with_state(customer_state);

    let reservation_state = reservations::ReservationState {
        repos: Arc::clone(&ctx.repos),
        reservations: Arc::clone(&ctx.reservations),
        contracts: Arc::clone(&ctx.contracts),
    };
    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/{id}", get(reservations::get_reservation))
        .route("/{id}/activate", post(reservations::activate_reservation))
        .route("/{id}/complete", post(reservations::complete_reservation))
        .route("/{id}/cancel", post(reservations::cancel_reservation))
        .route("/{id}/contract", post(reservations::generate_contract))
        .with_state(reservation_state);

    // Public, token-gated; the token in the path is the whole credential
    let portal_state = portal::PortalState {
        portal: Arc::clone(&ctx.portal),
    };
    let portal_routes = Router::new()
        .route("/reservations", post(portal::start_booking))
        .route("/reservations/{token}", get(portal::view_booking))
        .route(
            "/reservations/{token}/complete",
            post(portal::complete_booking),
        )
        .with_state(portal_state);

    let report_state = reports::ReportState {
        repos: Arc::clone(&ctx.repos),
    };
    let report_routes = Router::new()
        .route("/income", get(reports::income_report))
        .with_state(report_state);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check).with_state(health_state))
        .nest("/api/v1/vehicles", vehicle_routes)
        .nest("/api/v1/customers", customer_routes)
        .nest("/api/v1/reservations", reservation_routes)
        .nest("/api/v1/portal", portal_routes)
        .nest("/api/v1/reports", report_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
