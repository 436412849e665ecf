use hello_greeter::event::IncomingRequest;
use hello_greeter::router;
use serde_json::{json, Value};

fn rest_event(overrides: Value) -> IncomingRequest {
    let mut event = json!({
        "resource": "/hello",
        "path": "/hello",
        "httpMethod": "GET",
        "headers": { "Accept": "*/*", "Host": "abc123.execute-api.us-east-1.amazonaws.com" },
        "multiValueHeaders": { "Accept": ["*/*"] },
        "queryStringParameters": null,
        "multiValueQueryStringParameters": null,
        "pathParameters": null,
        "stageVariables": null,
        "requestContext": {
            "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
            "stage": "dev",
            "httpMethod": "GET",
            "resourcePath": "/hello"
        },
        "body": null,
        "isBase64Encoded": false
    });
    for (key, value) in overrides.as_object().unwrap() {
        event[key] = value.clone();
    }
    serde_json::from_value(event).unwrap()
}

fn call(overrides: Value) -> (u16, Value) {
    let response = router::app().resolve(&rest_event(overrides));
    assert_eq!(response.content_type(), Some("application/json"));
    (response.status_code, serde_json::from_str(&response.body).unwrap())
}

#[test]
fn get_with_query_string() {
    let (status, body) = call(json!({
        "queryStringParameters": { "greeter": "Ann" },
        "multiValueQueryStringParameters": { "greeter": ["Ann"] }
    }));
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "message": "Hello, Ann !", "httpMethod": "GET", "source": "queryStringParameters" })
    );
}

#[test]
fn get_with_multi_value_query_string_only() {
    let (status, body) = call(json!({
        "queryStringParameters": {},
        "multiValueQueryStringParameters": { "greeter": ["Cy", "Dee"] }
    }));
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Hello, Cy !");
    assert_eq!(body["source"], "multiValueQueryStringParameters");
}

#[test]
fn get_with_header() {
    let (status, body) = call(json!({
        "headers": { "greeter": "Bob", "Accept": "*/*" }
    }));
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "message": "Hello, Bob !", "httpMethod": "GET", "source": "headers" })
    );
}

#[test]
fn get_without_greeter() {
    let (status, body) = call(json!({}));
    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({ "message": "Hello, Guest!", "httpMethod": "GET", "source": "headers" })
    );
}

#[test]
fn post_with_greeter() {
    let (status, body) = call(json!({ "httpMethod": "POST", "body": "{\"greeter\": \"Ada\"}" }));
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "message": "Hello, Ada !", "httpMethod": "POST", "source": "body" })
    );
}

#[test]
fn post_with_malformed_body() {
    let (status, body) = call(json!({ "httpMethod": "POST", "body": "{bad" }));
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "message": "Invalid JSON format" }));
}

#[test]
fn post_without_greeter() {
    let (status, body) = call(json!({ "httpMethod": "POST", "body": "{}" }));
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "message": "Internal Server Error", "httpMethod": "POST" }));
}

#[test]
fn unknown_route() {
    let (status, body) = call(json!({ "httpMethod": "PUT" }));
    assert_eq!(status, 404);
    assert_eq!(body["message"], "Not found");
}
