use serde_json::json;
use serde_json::Value;

use crate::helpers::spawn_app;

#[tokio::test]
async fn subscribe_ok() {
    let app = spawn_app().await;

    let resp = app.post_subscribe(&json!({"email": "  John@Foo.com "})).await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["message"],
        "You're subscribed! You'll receive a daily motivation in your inbox."
    );

    let (email, is_active, confirmed): (String, bool, bool) =
        sqlx::query_as("SELECT email, is_active, confirmed FROM subscribers")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(email, "john@foo.com");
    assert!(is_active);
    assert!(confirmed);
}

#[tokio::test]
async fn subscribe_twice() {
    let app = spawn_app().await;

    app.post_subscribe(&json!({"email": "john@foo.com"})).await;
    let resp = app.post_subscribe(&json!({"email": "JOHN@foo.com"})).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "You're already subscribed!");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subscribers")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn resubscribe_after_unsubscribe() {
    let app = spawn_app().await;

    app.post_subscribe(&json!({"email": "john@foo.com"})).await;
    let resp = app.get_unsubscribe(Some("john@foo.com")).await;
    assert_eq!(resp.status().as_u16(), 200);

    let resp = app.post_subscribe(&json!({"email": "john@foo.com"})).await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Welcome back! Your subscription has been reactivated."
    );

    let (count, is_active): (i64, bool) =
        sqlx::query_as("SELECT COUNT(*) OVER (), is_active FROM subscribers")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
    assert!(is_active);
}

#[tokio::test]
async fn concurrent_subscribes_create_one_row() {
    let app = spawn_app().await;

    let body = json!({"email": "race@foo.com"});
    let (a, b) = tokio::join!(app.post_subscribe(&body), app.post_subscribe(&body));
    let mut statuses = [a.status().as_u16(), b.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, [200, 201]);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subscribers")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn subscribe_invalid() {
    let app = spawn_app().await;

    for (body, error) in [
        (json!({}), "Email is required."),
        (json!({"email": ""}), "Email is required."),
        (json!({"email": 42}), "Email is required."),
        (json!({"email": "not-an-email"}), "Please enter a valid email address."),
        (json!({"email": "john@localhost"}), "Please enter a valid email address."),
        (json!({"email": "@foo.com"}), "Please enter a valid email address."),
    ] {
        let resp = app.post_subscribe(&body).await;
        assert_eq!(resp.status().as_u16(), 400, "{body}");
        let resp: Value = resp.json().await.unwrap();
        assert_eq!(resp["error"], error, "{body}");
    }
}

#[tokio::test]
async fn subscribe_storage_failure() {
    let app = spawn_app().await;

    sqlx::query("ALTER TABLE subscribers DROP COLUMN email")
        .execute(&app.pool)
        .await
        .unwrap();

    let resp = app.post_subscribe(&json!({"email": "john@foo.com"})).await;
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to subscribe. Please try again.");
}
