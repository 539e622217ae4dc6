//! Gated page endpoints.
//!
//! The pages themselves are rendered by the front end; these handlers only
//! run once the gate has let the request through.

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse};

use crate::constants::{MSG_ACCESS_DENIED_BODY, MSG_ACCESS_DENIED_TITLE};
use crate::middleware::RequestExt;

/// Static page shown to unapproved accounts that tried to leave their
/// allowlist.
pub async fn unauthorised_page() -> HttpResponse {
    let body = format!(
        "<!DOCTYPE html>\n<html><head><title>{title}</title></head>\
         <body><h1>{title}</h1><p>{message}</p></body></html>",
        title = MSG_ACCESS_DENIED_TITLE,
        message = MSG_ACCESS_DENIED_BODY
    );
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Application shell for an allowed page. The role is exposed for the
/// client bundle; it is taken from the gate's verdict, never from the URL.
pub async fn render_page(req: HttpRequest) -> HttpResponse {
    let role = req
        .access_state()
        .and_then(|state| state.role())
        .map(|role| role.as_str())
        .unwrap_or("anonymous");
    let body = format!(
        "<!DOCTYPE html>\n<html><head><title>Cravings</title></head>\
         <body><div id=\"root\" data-role=\"{}\"></div></body></html>",
        role
    );
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}
