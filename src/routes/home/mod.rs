//! src/routes/home/mod.rs

use crate::startup::Greeting;
use actix_web::{http::header::ContentType, web, HttpResponse};

/// Plain text greeting, handy to see from a browser that the relay is up.
pub async fn home(greeting: web::Data<Greeting>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(greeting.0.clone())
}
