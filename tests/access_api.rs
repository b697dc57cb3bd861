use anyhow::Result;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use voyage_access::jwt::JwtConfig;
use voyage_access::{router, AccessConfig, AppState, Role};

const SECRET: &str = "test-secret";

fn app() -> Router {
    router(AppState::new(AccessConfig::builtin(), JwtConfig::new(SECRET, 1)))
}

fn token(role: Role) -> Result<String> {
    Ok(JwtConfig::new(SECRET, 1).encode(Uuid::new_v4(), role)?)
}

async fn send(app: &Router, req: Request<Body>) -> Result<(StatusCode, Value)> {
    let resp: Response = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

fn get(uri: &str, role: Option<Role>) -> Result<Request<Body>> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(role) = role {
        builder = builder.header("authorization", format!("Bearer {}", token(role)?));
    }
    Ok(builder.body(Body::empty())?)
}

fn post_check(role: Role, body: Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri("/access/check")
        .header("authorization", format!("Bearer {}", token(role)?))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))?)
}

fn titles(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["title"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn navigation_requires_a_token() -> Result<()> {
    let app = app();
    let (status, body) = send(&app, get("/access/navigation", None)?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    let req = Request::builder()
        .method("GET")
        .uri("/access/navigation")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "token");
    Ok(())
}

#[tokio::test]
async fn navigation_is_filtered_per_role() -> Result<()> {
    let app = app();

    let (status, admin) = send(&app, get("/access/navigation", Some(Role::Admin))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin["role"], "admin");
    assert_eq!(
        titles(&admin["sections"]),
        vec!["Dashboard", "Users & Management", "Customers", "Bookings & Invoices", "Content", "Marketing"]
    );
    let users = admin["sections"]
        .as_array()
        .and_then(|s| s.iter().find(|s| s["title"] == "Users & Management"))
        .expect("users section");
    assert_eq!(titles(&users["items"]), vec!["All Users", "Staff"]);

    let (_, moderator) = send(&app, get("/access/navigation", Some(Role::Moderator))?).await?;
    assert_eq!(
        titles(&moderator["sections"]),
        vec!["Dashboard", "Customers", "Bookings & Invoices", "Content", "Marketing"]
    );
    let bookings = &moderator["sections"][2];
    assert_eq!(titles(&bookings["items"]), vec!["Bookings"]);

    let (_, customer) = send(&app, get("/access/navigation", Some(Role::Customer))?).await?;
    assert_eq!(customer["sections"], json!([]));
    assert_eq!(customer["settings"], json!([]));
    Ok(())
}

#[tokio::test]
async fn check_uses_any_of_by_default() -> Result<()> {
    let app = app();

    let (status, body) = send(&app, post_check(Role::Employee, json!({"permissions": ["manage_users"]}))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);

    let (_, body) = send(
        &app,
        post_check(Role::Employee, json!({"permissions": ["view_customers", "manage_users"]}))?,
    )
    .await?;
    assert_eq!(body["allowed"], true);
    assert_eq!(body["mode"], "any");

    let (_, body) = send(
        &app,
        post_check(Role::Employee, json!({"permissions": ["view_customers", "manage_users"], "mode": "all"}))?,
    )
    .await?;
    assert_eq!(body["allowed"], false);

    let (_, body) = send(&app, post_check(Role::Employee, json!({"permissions": []}))?).await?;
    assert_eq!(body["allowed"], false);
    Ok(())
}

#[tokio::test]
async fn checking_another_role_needs_manage_users() -> Result<()> {
    let app = app();

    let (status, _) = send(
        &app,
        post_check(Role::Employee, json!({"permissions": ["manage_users"], "role": "admin"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        post_check(Role::Admin, json!({"permissions": ["view_invoices"], "role": "employee"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "employee");
    assert_eq!(body["allowed"], true);

    let (status, body) = send(
        &app,
        post_check(Role::Admin, json!({"permissions": ["view_invoices"], "role": "pilot"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], Value::Null);
    assert_eq!(body["allowed"], false);
    Ok(())
}

#[tokio::test]
async fn me_lists_sorted_permissions() -> Result<()> {
    let app = app();
    let (status, body) = send(&app, get("/access/me", Some(Role::Employee))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "employee");
    assert_eq!(
        body["permissions"],
        json!(["manage_bookings", "view_bookings", "view_customers", "view_dashboard", "view_invoices"])
    );

    let (_, body) = send(&app, get("/access/me", Some(Role::Customer))?).await?;
    assert_eq!(body["permissions"], json!([]));
    Ok(())
}

#[tokio::test]
async fn role_table_is_gated() -> Result<()> {
    let app = app();

    let (status, body) = send(&app, get("/access/roles", Some(Role::Admin))?).await?;
    assert_eq!(status, StatusCode::OK);
    let roles: Vec<&str> = body
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["role"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(roles, vec!["admin", "moderator", "employee", "customer"]);

    let (status, _) = send(&app, get("/access/roles", Some(Role::Moderator))?).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, get("/access/roles/customer", Some(Role::Admin))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissions"], json!([]));

    let (status, body) = send(&app, get("/access/roles/pilot", Some(Role::Admin))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    Ok(())
}

#[tokio::test]
async fn routes_listing_matches_role() -> Result<()> {
    let app = app();
    let (status, body) = send(&app, get("/access/routes", Some(Role::Employee))?).await?;
    assert_eq!(status, StatusCode::OK);
    let paths: Vec<&str> = body
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["path"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(
        paths,
        vec![
            "/admin/dashboard",
            "/admin/customers",
            "/admin/bookings",
            "/admin/invoices",
            "/admin/settings/profile"
        ]
    );
    Ok(())
}
