//! `HttpBackend` against a one-shot local HTTP listener.
use anyhow::Context;
use dishcraft::api::{HttpBackend, OptimizeOutcome, RecipeBackend};
use dishcraft::error::ApiError;
use dishcraft::types::{ImageUpload, Recipe};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct Captured {
    request_line: String,
    headers: String,
    body: Vec<u8>,
}

impl Captured {
    fn json(&self) -> anyhow::Result<Value> {
        serde_json::from_slice(&self.body).context("request body is not JSON")
    }
}

fn recipe_json() -> Value {
    json!({
        "dish_name": "土豆炖牛肉",
        "description": "软烂入味",
        "cuisine_type": "中式",
        "difficulty": "中等",
        "prep_time_mins": 15,
        "cook_time_mins": 60,
        "servings": 3,
        "ingredients": [{"name": "土豆", "amount": 2, "unit": "个"}],
        "instructions": [{"step": 1, "description": "牛肉焯水"}],
        "nutritional_info": {"calories_kcal": 480, "protein_g": 30, "carbs_g": 35, "fat_g": 20}
    })
}

/// Accept one connection, record the request and answer with `status` and `body`.
async fn serve_once(
    status: &'static str,
    body: String,
) -> anyhow::Result<(String, JoinHandle<anyhow::Result<Captured>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await?;
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        let header_end = loop {
            let n = socket.read(&mut buf).await?;
            anyhow::ensure!(n > 0, "connection closed before headers");
            raw.extend_from_slice(&buf[..n]);
            if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while raw.len() < header_end + content_length {
            let n = socket.read(&mut buf).await?;
            anyhow::ensure!(n > 0, "connection closed before body");
            raw.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await?;
        socket.shutdown().await?;

        let mut lines = head.lines();
        let request_line = lines.next().unwrap_or_default().to_string();
        Ok::<_, anyhow::Error>(Captured {
            request_line,
            headers: lines.collect::<Vec<_>>().join("\n"),
            body: raw[header_end..header_end + content_length].to_vec(),
        })
    });

    Ok((base, handle))
}

#[tokio::test]
async fn generate_posts_description_and_parses_recipe() -> anyhow::Result<()> {
    let (base, server) = serve_once("200 OK", recipe_json().to_string()).await?;
    let backend = HttpBackend::new(format!("{base}/"));

    let recipe = backend.generate_recipe("土豆牛肉").await?;
    assert_eq!(recipe.dish_name, "土豆炖牛肉");
    assert_eq!(recipe.difficulty.label(), "中等");
    assert!(recipe.tips.is_empty());
    assert!(recipe.image_url.is_none());

    let captured = server.await??;
    assert_eq!(captured.request_line, "POST /api/v1/recipes/generate HTTP/1.1");
    assert_eq!(captured.json()?, json!({"description": "土豆牛肉"}));
    Ok(())
}

#[tokio::test]
async fn optimize_sends_recipe_and_reads_off_topic_reminder() -> anyhow::Result<()> {
    let reply = json!({"type": "off_topic_reminder", "message": "我们还是聊聊菜谱吧"});
    let (base, server) = serve_once("200 OK", reply.to_string()).await?;
    let backend = HttpBackend::new(base);
    let current: Recipe = serde_json::from_value(recipe_json())?;

    let outcome = backend.optimize_recipe(&current, "今天天气如何", &[]).await?;
    assert_eq!(
        outcome,
        OptimizeOutcome::OffTopic {
            message: "我们还是聊聊菜谱吧".to_string()
        }
    );

    let captured = server.await??;
    assert_eq!(captured.request_line, "POST /api/v1/recipes/optimize HTTP/1.1");
    let sent = captured.json()?;
    assert_eq!(sent["user_request"], "今天天气如何");
    assert_eq!(sent["current_recipe"]["dish_name"], "土豆炖牛肉");
    assert_eq!(sent["conversation_history"], json!([]));
    Ok(())
}

#[tokio::test]
async fn analysis_uploads_multipart_file_field() -> anyhow::Result<()> {
    let reply = json!({"success": true, "ingredients": ["土豆", "牛肉"], "confidence": "high"});
    let (base, server) = serve_once("200 OK", reply.to_string()).await?;
    let backend = HttpBackend::new(base);

    let analysis = backend
        .analyze_ingredients(&ImageUpload::new("fridge.png", vec![0x89, b'P', b'N', b'G']))
        .await?;
    assert!(analysis.success);
    assert_eq!(analysis.ingredients, vec!["土豆", "牛肉"]);

    let captured = server.await??;
    assert_eq!(captured.request_line, "POST /api/v1/ingredients/analyze HTTP/1.1");
    assert!(captured.headers.to_ascii_lowercase().contains("multipart/form-data"));
    let body = String::from_utf8_lossy(&captured.body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"fridge.png\""));
    assert!(body.contains("image/png"));
    Ok(())
}

#[tokio::test]
async fn image_and_intent_unwrap_their_fields() -> anyhow::Result<()> {
    let reply = json!({"image_url": "https://img/1.png"});
    let (base, server) = serve_once("200 OK", reply.to_string()).await?;
    let current: Recipe = serde_json::from_value(recipe_json())?;
    let url = HttpBackend::new(base).generate_dish_image(&current).await?;
    assert_eq!(url, "https://img/1.png");
    let captured = server.await??;
    assert_eq!(captured.json()?["recipe_json"]["dish_name"], "土豆炖牛肉");

    let reply = json!({"is_recipe_request": true});
    let (base, server) = serve_once("200 OK", reply.to_string()).await?;
    assert!(HttpBackend::new(base).classify_intent("我想做红烧肉").await?);
    let captured = server.await??;
    assert_eq!(captured.request_line, "POST /api/v1/intent/analyze HTTP/1.1");
    assert_eq!(captured.json()?, json!({"message": "我想做红烧肉"}));
    Ok(())
}

#[tokio::test]
async fn error_status_is_reported_with_body() -> anyhow::Result<()> {
    let (base, server) =
        serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#.to_string()).await?;
    let err = HttpBackend::new(base)
        .generate_recipe("anything")
        .await
        .expect_err("500 must fail");
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {other}"),
    }
    server.await??;
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() -> anyhow::Result<()> {
    let (base, server) = serve_once("200 OK", r#"{"dish_name": 42}"#.to_string()).await?;
    let err = HttpBackend::new(base)
        .generate_recipe("anything")
        .await
        .expect_err("bad body must fail");
    assert!(matches!(err, ApiError::Decode(_)));
    server.await??;
    Ok(())
}
