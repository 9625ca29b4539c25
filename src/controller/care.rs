use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    controller::util::current_user::{is_staff, require_staff, require_user},
    error::Error,
    model::{
        api::ErrorDto,
        app::AppState,
        care::{
            OpenTicketDto, PostMessageDto, RequestRmaDto, RmaDto, TicketDto,
            UpdateRmaStatusDto, UpdateTicketStatusDto,
        },
    },
    service::care::{rma::RmaService, CareService},
};

pub static CARE_TAG: &str = "care";

/// Open a support ticket
#[utoipa::path(
    post,
    path = "/api/care/tickets",
    tag = CARE_TAG,
    request_body = OpenTicketDto,
    responses(
        (status = 201, description = "Ticket opened", body = TicketDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn open_ticket(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<OpenTicketDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let care_service = CareService::new(&state.db);
    let ticket = care_service.open_ticket(user.id, dto).await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// List the current user's tickets
#[utoipa::path(
    get,
    path = "/api/care/tickets",
    tag = CARE_TAG,
    responses(
        (status = 200, description = "Tickets, most recently updated first", body = Vec<TicketDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let care_service = CareService::new(&state.db);
    let tickets = care_service.list_tickets(user.id).await?;

    Ok((StatusCode::OK, Json(tickets)))
}

/// List tickets in a status, for the agent queue (staff)
#[utoipa::path(
    get,
    path = "/api/care/tickets/status/{status}",
    tag = CARE_TAG,
    params(("status" = String, Path, description = "Ticket status")),
    responses(
        (status = 200, description = "Tickets in the status", body = Vec<TicketDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_tickets_by_status(
    State(state): State<AppState>,
    session: Session,
    Path(status): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let care_service = CareService::new(&state.db);
    let tickets = care_service.list_tickets_by_status(&status).await?;

    Ok((StatusCode::OK, Json(tickets)))
}

/// Get a ticket with its message thread
#[utoipa::path(
    get,
    path = "/api/care/tickets/{ticket_id}",
    tag = CARE_TAG,
    params(("ticket_id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket found", body = TicketDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    let staff = is_staff(&user)?;

    let care_service = CareService::new(&state.db);
    let ticket = care_service.get_ticket(ticket_id, user.id, staff).await?;

    Ok((StatusCode::OK, Json(ticket)))
}

/// Post a message to a ticket
#[utoipa::path(
    post,
    path = "/api/care/tickets/{ticket_id}/messages",
    tag = CARE_TAG,
    params(("ticket_id" = Uuid, Path, description = "Ticket ID")),
    request_body = PostMessageDto,
    responses(
        (status = 200, description = "Message posted", body = TicketDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 409, description = "Ticket is closed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn post_message(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
    Json(dto): Json<PostMessageDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    let staff = is_staff(&user)?;

    let care_service = CareService::new(&state.db);
    let ticket = care_service
        .post_message(ticket_id, user.id, staff, dto)
        .await?;

    Ok((StatusCode::OK, Json(ticket)))
}

/// Move a ticket to a new status (staff)
#[utoipa::path(
    put,
    path = "/api/care/tickets/{ticket_id}/status",
    tag = CARE_TAG,
    params(("ticket_id" = Uuid, Path, description = "Ticket ID")),
    request_body = UpdateTicketStatusDto,
    responses(
        (status = 200, description = "Ticket updated", body = TicketDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Ticket not found", body = ErrorDto),
        (status = 409, description = "Illegal status transition", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_ticket_status(
    State(state): State<AppState>,
    session: Session,
    Path(ticket_id): Path<Uuid>,
    Json(dto): Json<UpdateTicketStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let care_service = CareService::new(&state.db);
    let ticket = care_service.update_status(ticket_id, dto).await?;

    Ok((StatusCode::OK, Json(ticket)))
}

/// File a return, repair, or exchange request for a delivered order item
#[utoipa::path(
    post,
    path = "/api/care/rma",
    tag = CARE_TAG,
    request_body = RequestRmaDto,
    responses(
        (status = 201, description = "RMA filed", body = RmaDto),
        (status = 404, description = "Order item not found", body = ErrorDto),
        (status = 409, description = "Order not delivered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_rma(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<RequestRmaDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let rma_service = RmaService::new(&state.db, &state.gateway);
    let rma = rma_service.request_rma(user.id, dto).await?;

    Ok((StatusCode::CREATED, Json(rma)))
}

/// List the current user's RMA requests
#[utoipa::path(
    get,
    path = "/api/care/rma",
    tag = CARE_TAG,
    responses(
        (status = 200, description = "RMA requests", body = Vec<RmaDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_rmas(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;

    let rma_service = RmaService::new(&state.db, &state.gateway);
    let rmas = rma_service.list_rmas(user.id).await?;

    Ok((StatusCode::OK, Json(rmas)))
}

/// Get an RMA request
#[utoipa::path(
    get,
    path = "/api/care/rma/{rma_id}",
    tag = CARE_TAG,
    params(("rma_id" = Uuid, Path, description = "RMA ID")),
    responses(
        (status = 200, description = "RMA found", body = RmaDto),
        (status = 404, description = "RMA not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_rma(
    State(state): State<AppState>,
    session: Session,
    Path(rma_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    let staff = is_staff(&user)?;

    let rma_service = RmaService::new(&state.db, &state.gateway);
    let rma = rma_service.get_rma(rma_id, user.id, staff).await?;

    Ok((StatusCode::OK, Json(rma)))
}

/// Move an RMA to a new status (staff); refunding pays the customer back
#[utoipa::path(
    put,
    path = "/api/care/rma/{rma_id}/status",
    tag = CARE_TAG,
    params(("rma_id" = Uuid, Path, description = "RMA ID")),
    request_body = UpdateRmaStatusDto,
    responses(
        (status = 200, description = "RMA updated", body = RmaDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "RMA not found", body = ErrorDto),
        (status = 409, description = "Illegal status transition", body = ErrorDto),
        (status = 502, description = "Payment gateway unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_rma_status(
    State(state): State<AppState>,
    session: Session,
    Path(rma_id): Path<Uuid>,
    Json(dto): Json<UpdateRmaStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let user = require_user(&session, &state.db).await?;
    require_staff(&user)?;

    let rma_service = RmaService::new(&state.db, &state.gateway);
    let rma = rma_service.update_status(rma_id, dto).await?;

    Ok((StatusCode::OK, Json(rma)))
}
