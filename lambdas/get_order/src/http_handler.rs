use lambda_http::RequestExt;
use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::OrderRepository;
use shared::utils::{empty_response, json_response};

pub(crate) struct HandlerDeps<R: OrderRepository> {
    pub order_repo: R,
}

#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<R: OrderRepository>(
    deps: &HandlerDeps<R>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    let order_id = event
        .path_parameters_ref()
        .and_then(|params| params.first("order_id"))
        .unwrap_or("");

    if order_id.is_empty() {
        return empty_response(&StatusCode::NOT_FOUND);
    }

    match deps.order_repo.get_order(order_id).await {
        Err(e) => {
            tracing::error!("Failed to retrieve order {}: {}", order_id, e);
            empty_response(&StatusCode::INTERNAL_SERVER_ERROR)
        }
        Ok(None) => empty_response(&StatusCode::NOT_FOUND),
        Ok(Some(order)) => json_response(&StatusCode::OK, &order),
    }
}
