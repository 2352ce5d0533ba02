use serde_json::json;
use serde_json::Value;

use crate::helpers::spawn_app;

#[tokio::test]
async fn submit_ok() {
    let app = spawn_app().await;

    let resp = app
        .post_motivation(&json!({
            "text": "  Keep going, you've got this.  ",
            "author": "  Jane  ",
        }))
        .await;
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Your motivation has been submitted for review. Thank you!"
    );

    let (text, author, status): (String, Option<String>, String) =
        sqlx::query_as("SELECT text, author, status::text FROM motivations")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(text, "Keep going, you've got this.");
    assert_eq!(author.as_deref(), Some("Jane"));
    assert_eq!(status, "pending");
}

#[tokio::test]
async fn submit_invalid() {
    let app = spawn_app().await;

    for (body, msg) in [
        (json!({}), "missing text"),
        (json!({"text": "Go"}), "too short"),
        (json!({"text": "     Go     "}), "too short after trimming"),
        (json!({"text": "a".repeat(501)}), "too long"),
        (json!({"text": 12345}), "not a string"),
    ] {
        let resp = app.post_motivation(&body).await;
        assert_eq!(resp.status().as_u16(), 400, "{msg}");
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].is_string(), "{msg}");
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM motivations")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn submit_length_bounds() {
    let app = spawn_app().await;

    for text in ["abcde".to_string(), "a".repeat(500)] {
        let resp = app.post_motivation(&json!({ "text": text })).await;
        assert_eq!(resp.status().as_u16(), 201, "{} chars", text.len());
    }
}

#[tokio::test]
async fn submitted_status_is_ignored() {
    let app = spawn_app().await;

    let resp = app
        .post_motivation(&json!({
            "text": "Approve me, please!",
            "status": "approved",
        }))
        .await;
    assert_eq!(resp.status().as_u16(), 201);

    let (status,): (String,) = sqlx::query_as("SELECT status::text FROM motivations")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(status, "pending");

    // pending motivations are never shown
    let body = app.get_motivation().await;
    assert!(body["motivation"].is_null());
}

#[tokio::test]
async fn random_when_empty() {
    let app = spawn_app().await;

    let body = app.get_motivation().await;
    assert!(body["motivation"].is_null());
    assert_eq!(
        body["message"],
        "No motivations available yet. Be the first to submit one!"
    );
}

#[tokio::test]
async fn random_returns_only_approved() {
    let app = spawn_app().await;

    let approved = app.approved_motivation("This one is approved.").await;
    let _pending = app.submit_motivation("This one is still pending.").await;
    let rejected = app.submit_motivation("This one gets rejected.").await;
    app.patch_motivation(&json!({"id": rejected, "status": "rejected"}))
        .await;

    for _ in 0..10 {
        let body = app.get_motivation().await;
        assert_eq!(body["motivation"]["id"], approved.to_string());
        assert_eq!(body["motivation"]["text"], "This one is approved.");
        assert_eq!(body["motivation"]["author"], "Tester");
        // no admin fields leak out
        assert!(body["motivation"].get("status").is_none());
        assert!(body.get("message").is_none());
    }
}

#[tokio::test]
async fn anonymous_author_is_never_shown() {
    let app = spawn_app().await;

    let resp = app
        .post_motivation(&json!({
            "text": "Nobody needs to know it was me.",
            "author": "Secret Person",
            "is_anonymous": true,
        }))
        .await;
    let id = resp.json::<Value>().await.unwrap()["id"].clone();
    app.patch_motivation(&json!({"id": id, "status": "approved"}))
        .await;

    let body = app.get_motivation().await;
    assert_eq!(body["motivation"]["id"], id);
    assert!(body["motivation"]["author"].is_null());

    // even if an admin later sets an author, anonymity wins
    app.patch_motivation(&json!({"id": id, "author": "Revealed"}))
        .await;
    let body = app.get_motivation().await;
    assert!(body["motivation"]["author"].is_null());
}

#[tokio::test]
async fn storage_failure() {
    let app = spawn_app().await;

    sqlx::query("ALTER TABLE motivations DROP COLUMN text")
        .execute(&app.pool)
        .await
        .unwrap();

    let resp = app
        .post_motivation(&json!({"text": "This will not be stored."}))
        .await;
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to submit motivation");

    let resp = app
        .api_client
        .get(format!("{}/api/motivations", app.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to fetch motivation");
}

#[tokio::test]
async fn submit_without_json_content_type() {
    let app = spawn_app().await;

    // what `curl -d '{...}'` sends
    let resp = app
        .api_client
        .post(format!("{}/api/motivations", app.addr))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(r#"{"text": "Sent from the command line."}"#)
        .send()
        .await
        .expect("execute request");
    assert_eq!(resp.status().as_u16(), 201);

    let resp = app
        .api_client
        .post(format!("{}/api/subscribe", app.addr))
        .body(r#"{"email": "curl@foo.com"}"#)
        .send()
        .await
        .expect("execute request");
    assert_eq!(resp.status().as_u16(), 201);

    // still JSON errors for bodies that are not JSON at all
    let resp = app
        .api_client
        .post(format!("{}/api/motivations", app.addr))
        .header("Content-Type", "text/plain")
        .body("text=Keep going")
        .send()
        .await
        .expect("execute request");
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn random_picks_among_all_approved() {
    let app = spawn_app().await;

    let mut approved = std::collections::HashSet::new();
    for i in 0..5 {
        approved.insert(
            app.approved_motivation(&format!("Approved motivation {i}"))
                .await
                .to_string(),
        );
    }
    let pending = app.submit_motivation("Pending, never picked.").await.to_string();

    let mut seen = std::collections::HashSet::new();
    for _ in 0..40 {
        let body = app.get_motivation().await;
        let id = body["motivation"]["id"].as_str().unwrap().to_owned();
        assert_ne!(id, pending);
        assert!(approved.contains(&id), "{id}");
        seen.insert(id);
    }
    // 5 candidates over 40 draws; a single distinct id would mean no randomness
    assert!(seen.len() > 1, "{seen:?}");
}
