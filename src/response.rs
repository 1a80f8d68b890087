use crate::errors::ForwardError;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use serde_json::json;

pub fn accepted() -> ApiGatewayProxyResponse {
    json_response(StatusCode::ACCEPTED, json!({ "yeah": "la muneca fea" }).to_string())
}

/// 500 with `{"error":"<message>"}`.
pub fn failure(err: &ForwardError) -> ApiGatewayProxyResponse {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": err.to_string() }).to_string(),
    )
}

fn json_response(status: StatusCode, body: String) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    ApiGatewayProxyResponse {
        status_code: i64::from(status.as_u16()),
        headers,
        body: Some(Body::Text(body)),
        ..Default::default()
    }
}
