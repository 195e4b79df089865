mod common;

use anyhow::Result;
use bookshelf_api::store::{Collection, DocumentStore, Filter};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

const GUARDED: [(&str, &str); 6] = [
    ("POST", "/book"),
    ("POST", "/books"),
    ("PUT", "/books/0b0e3b44-8b8c-4d4e-9f55-5a1f6bd0c001"),
    ("PUT", "/books?id=0b0e3b44-8b8c-4d4e-9f55-5a1f6bd0c001"),
    ("DELETE", "/books/0b0e3b44-8b8c-4d4e-9f55-5a1f6bd0c001"),
    ("DELETE", "/books?id=0b0e3b44-8b8c-4d4e-9f55-5a1f6bd0c001"),
];

async fn book_count(server: &common::TestServer) -> Result<usize> {
    Ok(server.store.find(Collection::Books, &Filter::all()).await?.len())
}

#[tokio::test]
async fn missing_header_is_rejected_before_the_handler() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    for (method, path) in GUARDED {
        let res = server
            .client
            .request(Method::from_bytes(method.as_bytes())?, server.url(path))
            .json(&json!({ "book_name": "Sneaky" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, path);

        let body: Value = res.json().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    assert_eq!(book_count(&server).await?, 0, "no handler may have written");
    Ok(())
}

#[tokio::test]
async fn invalid_token_is_forbidden_and_never_writes() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    for header in ["Bearer not-a-jwt", "Bearer", "Bearer eyJhbGciOiJIUzI1NiJ9.e30.invalid"] {
        for (method, path) in GUARDED {
            let res = server
                .client
                .request(Method::from_bytes(method.as_bytes())?, server.url(path))
                .header("Authorization", header)
                .json(&json!({ "book_name": "Sneaky" }))
                .send()
                .await?;
            assert_eq!(res.status(), StatusCode::FORBIDDEN, "{} {} with {:?}", method, path, header);
        }
    }

    assert_eq!(book_count(&server).await?, 0);
    Ok(())
}

#[tokio::test]
async fn token_signed_with_another_secret_is_forbidden() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let foreign = bookshelf_api::auth::JwtKeys::new("some-other-secret", 1)?;
    let token = foreign.issue(json!({ "email": "intruder@example.com" }))?;

    let res = server
        .client
        .post(server.url("/book"))
        .bearer_auth(token)
        .json(&json!({ "book_name": "Sneaky" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(book_count(&server).await?, 0);
    Ok(())
}

#[tokio::test]
async fn issued_token_unlocks_guarded_routes() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/jwt"))
        .json(&json!({ "email": "reader@example.com", "name": "Reader" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "success");
    let token = body["token"].as_str().expect("token string").to_string();

    let res = server
        .client
        .post(server.url("/book"))
        .bearer_auth(&token)
        .json(&json!({ "book_name": "Allowed" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(book_count(&server).await?, 1);
    Ok(())
}

#[tokio::test]
async fn token_issuance_requires_an_object() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server.client.post(server.url("/jwt")).json(&json!(["not", "an", "object"])).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn reads_do_not_require_a_token() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    for path in ["/books", "/news", "/events", "/members"] {
        let res = server.client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "GET {}", path);
    }
    Ok(())
}
