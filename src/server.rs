use std::net::{SocketAddr, ToSocketAddrs};

use actix_web::dev::Server;
use actix_web::error::InternalError;
use actix_web::guard::{self, GuardContext};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer};

use crate::error::Result;
use crate::messaging::{Comment, PushResponse, Topic, TopicResponse};
use crate::queue::Queues;

/// Routes of the comments endpoint, mounted under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(web::FormConfig::default().error_handler(|err, _req| {
                tracing::warn!("Rejected comment form: {}", err);
                InternalError::from_response(err, unable_to_parse()).into()
            }))
            .service(
                web::resource("/comments")
                    .route(
                        web::post()
                            .guard(guard::fn_guard(is_form))
                            .to(create_form_comment),
                    )
                    .route(web::post().to(create_comment)),
            )
            .route("/topics/{topic}", web::get().to(consume_topic)),
    );
}

fn is_form(ctx: &GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.starts_with("application/x-www-form-urlencoded"))
}

fn unable_to_parse() -> HttpResponse {
    HttpResponse::BadRequest().json(PushResponse::failed("Unable to parse"))
}

/// Route the comment to its topic and enqueue it.
fn push_comment(comment: Comment, queues: &Queues) -> HttpResponse {
    let topic = comment.topic();
    let offset = queues.enqueue(topic, comment.clone());
    tracing::info!("Message is stored in topic ({})/offset({})", topic, offset);

    HttpResponse::Ok().json(PushResponse::pushed(comment))
}

/// Bind the comments endpoint. The returned server still has to be awaited
/// (or spawned) to start serving; the addresses are the ones actually bound,
/// which matters when binding port 0.
pub fn bind(addr: impl ToSocketAddrs, queues: Queues) -> Result<(Server, Vec<SocketAddr>)> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(queues.clone())
            .configure(configure)
    })
    .bind(addr)?;

    let addrs = server.addrs();
    Ok((server.run(), addrs))
}

/// JSON body, whatever the declared content type.
async fn create_comment(body: web::Bytes, queues: Queues) -> HttpResponse {
    match serde_json::from_slice::<Comment>(&body) {
        Ok(comment) => push_comment(comment, &queues),
        Err(e) => {
            tracing::warn!("Rejected comment body: {}", e);
            unable_to_parse()
        }
    }
}

/// `text=...&type=...` body.
async fn create_form_comment(form: web::Form<Comment>, queues: Queues) -> HttpResponse {
    push_comment(form.into_inner(), &queues)
}

/// Drain every comment waiting in the topic.
async fn consume_topic(topic: web::Path<String>, queues: Queues) -> HttpResponse {
    let topic = topic.into_inner();
    let comments = match Topic::from_name(&topic) {
        Some(t) => queues.drain(t),
        None => {
            tracing::debug!("Unknown topic {}", topic);
            Vec::new()
        }
    };

    for comment in &comments {
        tracing::info!(
            "Consumed comment '{}' of type {} from {}",
            comment.text,
            comment.comment_type,
            topic
        );
    }

    HttpResponse::Ok().json(TopicResponse { topic, comments })
}
