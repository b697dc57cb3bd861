use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::Components;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::{access, errors, models, routes};

#[derive(OpenApi)]
#[openapi(
	paths(
		routes::health::health,
		routes::access::navigation,
		routes::access::check,
		routes::access::me,
		routes::access::list_roles,
		routes::access::get_role,
		routes::access::list_routes,
		routes::admin::enter
	),
	components(
		schemas(
			access::Role,
			errors::ErrorResponse,
			routes::health::HealthResponse,
			models::access::NavItemView,
			models::access::NavSectionView,
			models::access::NavigationResponse,
			models::access::CheckMode,
			models::access::CheckRequest,
			models::access::CheckResponse,
			models::access::Profile,
			models::access::RolePermissions,
			models::access::RouteRuleView,
			models::access::AdminPageResponse
		)
	),
	modifiers(&BearerAuth),
	tags(
		(name = "Health", description = "Service health"),
		(name = "Access", description = "Role permissions and navigation"),
		(name = "Admin", description = "Guarded back-office routes")
	)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
	fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
		let components = openapi.components.get_or_insert_with(Components::new);
		let scheme = HttpBuilder::new()
			.scheme(HttpAuthScheme::Bearer)
			.bearer_format("JWT")
			.build();
		components.add_security_scheme("bearerAuth", SecurityScheme::Http(scheme));
	}
}

pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
	let mut doc = serde_json::to_value(ApiDoc::openapi())?;
	ensure_servers(&mut doc, port);
	Ok(serde_json::from_value(doc)?)
}

pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> Router {
	let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
		.try_it_out_enabled(true)
		.with_credentials(true)
		.persist_authorization(true);

	let doc = Arc::new(doc);
	let json_route = get(move || {
		let doc = Arc::clone(&doc);
		async move { Json((*doc).clone()) }
	});

	Router::new()
		.route("/api-docs/openapi.json", json_route)
		.merge(SwaggerUi::new("/docs").config(swagger_config))
}

fn ensure_servers(doc: &mut Value, port: u16) {
	let Some(root) = doc.as_object_mut() else {
		return;
	};

	let local = json!({"url": format!("http://localhost:{port}"), "description": "Local server"});
	let servers = root.entry("servers").or_insert_with(|| Value::Array(Vec::new()));
	if let Value::Array(list) = servers {
		if !list.contains(&local) {
			list.insert(0, local);
		}
	}
}
