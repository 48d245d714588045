use lambda_http::http::response::Builder;
use lambda_http::http::StatusCode;
use lambda_http::{Error, Response};
use serde::Serialize;

// the order pages are served from a separate static site origin
fn response_builder(status: &StatusCode) -> Builder {
    Response::builder()
        .status(status)
        .header("access-control-allow-origin", "*")
}

pub fn empty_response(status: &StatusCode) -> Result<Response<String>, Error> {
    let response = response_builder(status)
        .body(String::new())
        .map_err(Box::new)?;

    Ok(response)
}

pub fn json_response(
    status: &StatusCode,
    body: &impl Serialize,
) -> Result<Response<String>, Error> {
    let response = response_builder(status)
        .header("content-type", "application/json")
        .body(serde_json::to_string(body)?)
        .map_err(Box::new)?;

    Ok(response)
}
