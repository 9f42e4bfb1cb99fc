//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the operations endpoint and the health probes
//! - **Schemas**: the operation envelope, response DTOs, and the error payload
//! - **Security**: bearer credential issued by the `login` operation
//!
//! The generated document is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::operations::{
    AddPersonArgs, AddressResponse, AllPersonsArgs, CreateUserArgs, EditNumberArgs, LoginArgs,
    NameArgs, OperationEnvelope, OperationName, OperationResponse, PersonResponse, TokenResponse,
    UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some("Credential returned by the login operation."))
            .build();
        components.add_security_scheme("BearerToken", SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Contacts directory API",
        description = "Operation-style interface over the contact directory and its users."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::operations::execute_operation,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        OperationEnvelope,
        OperationName,
        OperationResponse,
        PersonResponse,
        AddressResponse,
        UserResponse,
        TokenResponse,
        AllPersonsArgs,
        NameArgs,
        AddPersonArgs,
        EditNumberArgs,
        CreateUserArgs,
        LoginArgs,
    )),
    tags(
        (name = "directory", description = "Directory and identity operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
