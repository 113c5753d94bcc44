//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance reachable through
//! `DATABASE_URL`; migrations and seed data are applied on startup.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, check_test_env, create_category, create_post, create_topic,
    fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health").await.unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/health/ready").await.unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_unknown_route() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/nowhere").await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "ROUTE_NOT_FOUND")
        .await
        .unwrap();
}

// ============================================================================
// Thread Tests
// ============================================================================

#[tokio::test]
async fn test_seeded_catalogs() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let body = assert_json(server.get("/api/forum/categories").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(body["categories"].as_array().unwrap().len() >= 6);

    let body = assert_json(
        server.get("/api/forum/reaction-types").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let names: Vec<&str> = body["reactionTypes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    for name in ["like", "dislike", "love", "laugh", "wow", "sad", "angry"] {
        assert!(names.contains(&name), "missing reaction type {name}");
    }

    let body = assert_json(server.get("/api/roles").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["data"][0]["name"], "admin");
}

#[tokio::test]
async fn test_topic_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = TestUser::create(&server, "admin").await.unwrap();
    let player = TestUser::create(&server, "player").await.unwrap();

    let category_id = create_category(&server, &admin).await.unwrap();
    let topic_id = create_topic(&server, &player, category_id).await.unwrap();
    create_post(&server, &player, topic_id).await.unwrap();

    let response = server
        .get(&format!("/api/forum/topics/{topic_id}"))
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["topic"]["views"], 1);
    assert_eq!(body["topic"]["replies"], 1);
    assert_eq!(body["topic"]["tags"], json!(["builds"]));
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
    assert_eq!(body["posts"][0]["content"], "Nice to meet you all");

    let response = server
        .get(&format!("/api/forum/topics?categoryId={category_id}"))
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["topics"][0]["id"], topic_id.to_string());

    let response = server
        .get(&format!("/api/forum/topics/{topic_id}"))
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["topic"]["views"], 2);
}

#[tokio::test]
async fn test_create_topic_validation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let player = TestUser::create(&server, "player").await.unwrap();
    let admin = TestUser::create(&server, "admin").await.unwrap();
    let category_id = create_category(&server, &admin).await.unwrap();

    let mut request = CreateTopicBody::unique(category_id);
    request.title = "Hey!".to_string();
    let response = server
        .post_auth("/api/forum/topics", &player.token, &request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = CreateTopicBody::unique(Uuid::new_v4());
    let response = server
        .post_auth("/api/forum/topics", &player.token, &request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server
        .post("/api/forum/topics", &CreateTopicBody::unique(category_id))
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_locked_topic_rejects_replies() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = TestUser::create(&server, "admin").await.unwrap();
    let moderator = TestUser::create(&server, "moderator").await.unwrap();
    let player = TestUser::create(&server, "player").await.unwrap();

    let category_id = create_category(&server, &admin).await.unwrap();
    let topic_id = create_topic(&server, &player, category_id).await.unwrap();

    // Players cannot moderate
    let response = server
        .patch_auth(
            &format!("/api/forum/topics/{topic_id}"),
            &player.token,
            &json!({ "isLocked": true }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = server
        .patch_auth(
            &format!("/api/forum/topics/{topic_id}"),
            &moderator.token,
            &json!({ "isLocked": true }),
        )
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["topic"]["isLocked"], true);

    let response = server
        .post_auth(
            &format!("/api/forum/topics/{topic_id}/posts"),
            &player.token,
            &json!({ "content": "Can I still reply here?" }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "TOPIC_LOCKED")
        .await
        .unwrap();

    let response = server
        .get(&format!("/api/forum/topics/{topic_id}"))
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["topic"]["replies"], 0);
}

#[tokio::test]
async fn test_invalid_topic_id() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/forum/topics/12345").await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
        .await
        .unwrap();

    let response = server
        .get(&format!("/api/forum/topics/{}", Uuid::new_v4()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_like_dislike_exclusive() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = TestUser::create(&server, "admin").await.unwrap();
    let player = TestUser::create(&server, "player").await.unwrap();
    let category_id = create_category(&server, &admin).await.unwrap();
    let topic_id = create_topic(&server, &admin, category_id).await.unwrap();
    let post_id = create_post(&server, &admin, topic_id).await.unwrap();

    let like = format!("/api/forum/posts/{post_id}/like");
    let dislike = format!("/api/forum/posts/{post_id}/dislike");

    let body = assert_json(
        server.post_auth(&dislike, &player.token, &json!({})).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["disliked"], true);
    assert_eq!(body["dislikes"], 1);

    let body = assert_json(
        server.post_auth(&like, &player.token, &json!({})).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["liked"], true);
    assert_eq!(body["likes"], 1);
    assert_eq!(body["dislikes"], 0);

    let body = assert_json(
        server.post_auth(&like, &player.token, &json!({})).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(body["liked"], false);
    assert_eq!(body["message"], "Like removed");
    assert_eq!(body["likes"], 0);
}

#[tokio::test]
async fn test_named_reactions() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = TestUser::create(&server, "admin").await.unwrap();
    let player = TestUser::create(&server, "player").await.unwrap();
    let category_id = create_category(&server, &admin).await.unwrap();
    let topic_id = create_topic(&server, &admin, category_id).await.unwrap();
    let post_id = create_post(&server, &admin, topic_id).await.unwrap();

    let types = assert_json(
        server.get("/api/forum/reaction-types").await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let type_id = |name: &str| {
        types["reactionTypes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["name"] == name)
            .map(|t| t["id"].as_i64().unwrap())
            .unwrap()
    };

    let react = format!("/api/forum/posts/{post_id}/react");
    for name in ["wow", "laugh"] {
        let body = assert_json(
            server
                .post_auth(&react, &player.token, &json!({ "reactionTypeId": type_id(name) }))
                .await
                .unwrap(),
            StatusCode::OK,
        )
        .await
        .unwrap();
        assert_eq!(body["reacted"], true);
        assert_eq!(body["reactionType"]["name"], name);
    }

    let reactions = format!("/api/forum/posts/{post_id}/reactions");
    let body = assert_json(
        server.get_auth(&reactions, &player.token).await.unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let summary = body["reactions"].as_array().unwrap();
    assert_eq!(summary.len(), 2);
    assert!(summary.iter().all(|r| r["count"] == 1 && r["userReacted"] == true));

    // Anonymous viewers see the counts without their own flag
    let body = assert_json(server.get(&reactions).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(body["reactions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["userReacted"] == false));

    let response = server
        .post_auth(&react, &player.token, &json!({}))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    let response = server
        .post_auth(&react, &player.token, &json!({ "reactionTypeId": 99_999 }))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_REACTION_TYPE")
        .await
        .unwrap();
}

// ============================================================================
// Role / Tag Tests
// ============================================================================

#[tokio::test]
async fn test_role_assignment() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = TestUser::create(&server, "admin").await.unwrap();
    let moderator = TestUser::create(&server, "moderator").await.unwrap();
    let player = TestUser::create(&server, "player").await.unwrap();
    let moderator_role = role_id(&server.pool, "moderator").await.unwrap();

    let request = json!({ "userId": player.id, "roleId": moderator_role });

    // manage_roles is admin-only
    let response = server
        .post_auth("/api/roles/assign", &moderator.token, &request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = server
        .post_auth("/api/roles/assign", &admin.token, &request)
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Role assigned successfully");

    let response = server
        .get(&format!("/api/users/{}/roles-tags", player.id))
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["role"]["name"], "moderator");
}

#[tokio::test]
async fn test_tag_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = TestUser::create(&server, "admin").await.unwrap();
    let player = TestUser::create(&server, "player").await.unwrap();

    let name = format!("redstoner{}", unique_suffix());
    let tag = json!({
        "name": name,
        "displayName": "Redstoner",
        "color": "#FF0000",
        "category": "achievement",
    });

    let response = server
        .post_auth("/api/tags", &player.token, &tag)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = server.post_auth("/api/tags", &admin.token, &tag).await.unwrap();
    let body = assert_json(response, StatusCode::CREATED).await.unwrap();
    let tag_id = body["data"]["id"].as_i64().unwrap();

    let response = server.post_auth("/api/tags", &admin.token, &tag).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = server
        .post_auth(
            "/api/tags/assign",
            &admin.token,
            &json!({ "userId": player.id, "tagId": tag_id }),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap();

    let roles_tags = format!("/api/users/{}/roles-tags", player.id);
    let body = assert_json(server.get(&roles_tags).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["data"]["tags"][0]["name"], name);

    let response = server
        .get(&format!("/api/users?tag={name}"))
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["users"][0]["id"], player.id);

    let response = server
        .delete_auth(&format!("/api/users/{}/tags/{tag_id}", player.id), &admin.token)
        .await
        .unwrap();
    let body = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "Tag removed successfully");

    let body = assert_json(server.get(&roles_tags).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert!(body["data"]["tags"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_expired_tag_assignment_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = TestUser::create(&server, "admin").await.unwrap();
    let player = TestUser::create(&server, "player").await.unwrap();

    let tags = assert_json(server.get("/api/tags").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    let tag_id = tags["data"][0]["id"].as_i64().unwrap();

    let past = chrono::Utc::now() - chrono::Duration::days(1);
    let response = server
        .post_auth(
            "/api/tags/assign",
            &admin.token,
            &json!({ "userId": player.id, "tagId": tag_id, "expiresAt": past }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
