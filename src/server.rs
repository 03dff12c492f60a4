//! HTTP front-end.
//!
//! A thin actix-web layer over the query driver: `POST /correct` takes a
//! JSON batch of sub-queries and answers the index-aligned batch of
//! replies with status 200. Every other path falls through to the
//! framework's 404. Handlers only read the shared index; all mutation
//! ended before the server started.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing::info;

use crate::metric::Metric;
use crate::query::{run_query, CorrectionQuery};
use crate::tree::BkTree;

/// The immutable index shared by all workers.
pub type SharedIndex = Arc<BkTree<Metric>>;

/// Worker threads serving requests.
pub const WORKERS: usize = 8;
/// Pending-connection backlog.
pub const BACKLOG: u32 = 1000;
/// Per-request read deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(1000);

async fn correct(
    index: web::Data<SharedIndex>,
    batch: web::Json<Vec<CorrectionQuery>>,
) -> HttpResponse {
    let replies: Vec<_> = batch
        .iter()
        .map(|query| run_query(index.get_ref().as_ref(), query))
        .collect();
    HttpResponse::Ok().json(replies)
}

/// Serve the index until a termination signal arrives.
///
/// Binding failures surface as the returned `io::Error`; actix handles
/// SIGINT/SIGTERM itself and resolves the future on clean shutdown.
pub async fn serve(index: SharedIndex, address: &str, port: u16) -> std::io::Result<()> {
    let bound = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(index.clone()))
            .route("/correct", web::post().to(correct))
    })
    .workers(WORKERS)
    .backlog(BACKLOG)
    .client_request_timeout(REQUEST_TIMEOUT)
    .bind((address, port))?;

    info!(address, port, "server started");
    bound.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::CorrectionReply;
    use actix_web::test;

    fn test_index() -> SharedIndex {
        let mut tree = BkTree::new(Metric::uniform());
        for (word, priority) in [("cat", 5), ("car", 3), ("bat", 2)] {
            tree.insert(word, priority);
        }
        Arc::new(tree)
    }

    #[actix_web::test]
    async fn test_correct_batch_is_index_aligned() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_index()))
                .route("/correct", web::post().to(correct)),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/correct")
            .set_json(vec![
                CorrectionQuery {
                    candidate: "cat".to_string(),
                    max_tolerance: 1,
                },
                CorrectionQuery {
                    candidate: "unknown".to_string(),
                    max_tolerance: 0,
                },
            ])
            .to_request();

        let replies: Vec<CorrectionReply> = test::call_and_read_body_json(&app, request).await;
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].word, "cat");
        assert_eq!(replies[0].results.len(), 3);
        assert_eq!(replies[1].word, "unknown");
        assert!(replies[1].results.is_empty());
    }

    #[actix_web::test]
    async fn test_other_paths_are_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_index()))
                .route("/correct", web::post().to(correct)),
        )
        .await;

        let request = test::TestRequest::get().uri("/elsewhere").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
