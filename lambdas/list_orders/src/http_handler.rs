use lambda_http::http::HeaderValue;
use lambda_http::RequestExt;
use lambda_http::{http::StatusCode, tracing, Error, IntoResponse, Request};
use shared::core::OrderRepository;
use shared::utils::{empty_response, json_response};

pub(crate) const LAST_EVALUATED_ID_HEADER: &str = "x-last-evaluated-id";

pub(crate) struct HandlerDeps<R: OrderRepository> {
    pub order_repo: R,
}

#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<R: OrderRepository>(
    deps: &HandlerDeps<R>,
    event: Request,
) -> Result<impl IntoResponse, Error> {
    let query_params = event.query_string_parameters();
    let last_evaluated_id = query_params
        .first("last_evaluated_id")
        .map(|s| s.to_string());

    match deps.order_repo.list_orders(last_evaluated_id).await {
        Ok(page) => {
            // the order site expects a bare array, the cursor travels in a header
            let mut response = json_response(&StatusCode::OK, &page.orders)?;
            if let Some(last_evaluated_id) = page.last_evaluated_id {
                let headers = response.headers_mut();
                headers.insert(
                    LAST_EVALUATED_ID_HEADER,
                    HeaderValue::from_str(&last_evaluated_id)?,
                );
                headers.insert(
                    "access-control-expose-headers",
                    HeaderValue::from_static(LAST_EVALUATED_ID_HEADER),
                );
            }
            Ok(response)
        }
        Err(e) => {
            tracing::error!("Failed to list orders: {}", e);
            empty_response(&StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
