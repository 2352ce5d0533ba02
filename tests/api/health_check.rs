use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check() {
    let app = spawn_app().await;

    let resp = app
        .api_client
        .get(format!("{}/health_check", app.addr))
        .send()
        .await
        .expect("execute request");
    assert!(resp.status().is_success());
    assert_eq!(resp.content_length().unwrap(), 0); // empty body
}

#[tokio::test]
async fn pages_are_served() {
    let app = spawn_app().await;

    for path in ["/", "/admin"] {
        let resp = app
            .api_client
            .get(format!("{}{path}", app.addr))
            .send()
            .await
            .expect("execute request");
        assert_eq!(resp.status().as_u16(), 200, "{path}");
        let content_type = resp.headers()["content-type"].to_str().unwrap().to_owned();
        assert!(content_type.starts_with("text/html"), "{path}");
    }
}
