//! Invoice endpoints
//!
//! Invoices carry no amounts; they reference the BASTP certificate they are
//! raised against. A certificate can back at most one invoice.

use crate::auth::Feature;
use crate::core::models::{ActivityAction, Invoice, InvoiceStatus, Metadata};
use crate::server::AppState;
use crate::server::routes::{
    ApiResponse, current_identity, mutation_denied, record_activity, view_denied,
};
use crate::utils::error::Result;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Configure invoice routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::get().to(list_invoices))
            .route("", web::post().to(create_invoice))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}", web::put().to(update_invoice)),
    );
}

/// Invoice create request
#[derive(Debug, Deserialize)]
struct CreateInvoiceRequest {
    bastp_id: Uuid,
    invoice_number: String,
    issued_on: chrono::NaiveDate,
}

/// Invoice update request
#[derive(Debug, Deserialize)]
struct UpdateInvoiceRequest {
    status: InvoiceStatus,
}

async fn list_invoices(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Invoices) {
        return Ok(denied);
    }

    let invoices = state.storage.db().list_invoices().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(invoices)))
}

async fn get_invoice(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = view_denied(&state.policy, identity.as_ref(), Feature::Invoices) {
        return Ok(denied);
    }

    match state.storage.db().find_invoice(*path).await? {
        Some(invoice) => Ok(HttpResponse::Ok().json(ApiResponse::success(invoice))),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Invoice not found".to_string()))),
    }
}

async fn create_invoice(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::Invoices) {
        return Ok(denied);
    }

    let request = request.into_inner();
    if request.invoice_number.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("Invoice number is required".to_string())));
    }

    let Some(mut bastp) = state.storage.db().find_bastp(request.bastp_id).await? else {
        return Ok(
            HttpResponse::NotFound().json(ApiResponse::<()>::error("BASTP not found".to_string()))
        );
    };
    if !bastp.available_for_invoicing() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
            "BASTP already has an invoice".to_string(),
        )));
    }

    let invoice = Invoice {
        metadata: Metadata::new(),
        bastp_id: bastp.id(),
        invoice_number: request.invoice_number,
        issued_on: request.issued_on,
        status: InvoiceStatus::Issued,
    };
    let invoice = state.storage.db().create_invoice(&invoice).await?;

    bastp.invoiced = true;
    bastp.metadata.touch();
    state.storage.db().update_bastp(&bastp).await?;

    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Create,
        format!("invoice {}", invoice.invoice_number),
    )
    .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(invoice)))
}

async fn update_invoice(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateInvoiceRequest>,
) -> Result<HttpResponse> {
    let identity = current_identity(&req);
    if let Some(denied) = mutation_denied(&state.policy, identity.as_ref(), Feature::Invoices) {
        return Ok(denied);
    }

    let Some(mut invoice) = state.storage.db().find_invoice(*path).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Invoice not found".to_string())));
    };

    invoice.status = request.status;
    invoice.metadata.touch();

    let invoice = state.storage.db().update_invoice(&invoice).await?;
    record_activity(
        &state,
        identity.as_ref(),
        ActivityAction::Update,
        format!("invoice {}", invoice.invoice_number),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(invoice)))
}
