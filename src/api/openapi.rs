//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, loans, patrons};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BookLib API",
        version = "1.0.0",
        description = "Book Circulation Server REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Loans
        loans::checkout,
        loans::return_loan,
        loans::list_active,
        loans::list_history,
        // Patrons
        patrons::search_patrons,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::DeleteResponse,
            // Loans
            crate::models::loan::CheckoutRequest,
            crate::models::loan::CheckoutReceipt,
            crate::models::loan::LoanDetails,
            crate::models::loan::LoanStatus,
            loans::ReturnResponse,
            // Patrons
            crate::models::patron::Patron,
            crate::models::patron::PatronQuery,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication gate"),
        (name = "books", description = "Catalog management"),
        (name = "loans", description = "Circulation ledger"),
        (name = "patrons", description = "Patron lookup")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
