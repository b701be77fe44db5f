#![allow(clippy::unwrap_used, clippy::expect_used)]

use rog_codegen::config::Configuration;
use rog_codegen::generator::{generate_from_files, generate_project, resolve_output_directories, TemplateSet};
use rog_codegen::spec::load_operations;
use std::fs;

mod common;
use common::Workspace;

const ROOT: &str = "out/shop_api";

#[test]
fn test_generates_every_artifact() {
    let ws = Workspace::shop();
    let summary = generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();

    let root = ws.path().join(ROOT);
    assert_eq!(
        summary.written,
        vec![
            root.join("app/controllers/api/v1/order_controller.rb"),
            root.join("app/services/order_service.rb"),
            root.join("app/controllers/api/v1/user_controller.rb"),
            root.join("app/services/user_service.rb"),
            root.join("config/api_routes.rb"),
        ]
    );
}

#[test]
fn test_routes_interleave_tags_in_operation_order() {
    let ws = Workspace::shop();
    generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();

    let routes = ws.read(&format!("{ROOT}/config/api_routes.rb"));
    let lines: Vec<_> = routes
        .lines()
        .filter(|l| l.starts_with("  "))
        .map(str::trim)
        .collect();
    assert_eq!(
        lines,
        vec![
            "get '/orders', to: 'api/v1/order#list_orders'",
            "post '/orders', to: 'api/v1/order#create_order'",
            "get '/users', to: 'api/v1/user#list_users'",
            "delete '/users/:id', to: 'api/v1/user#delete_user'",
            "get '/users/:id', to: 'api/v1/user#get_user'",
            "get '/users/:id/orders', to: 'api/v1/order#list_user_orders'",
        ]
    );
}

#[test]
fn test_controller_contents() {
    let ws = Workspace::shop();
    generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();

    let controller = ws.read(&format!("{ROOT}/app/controllers/api/v1/order_controller.rb"));
    assert!(controller.contains("class API::V1::OrderController < ApplicationController\n"));
    let list_orders = controller.find("def list_orders").unwrap();
    let create_order = controller.find("def create_order").unwrap();
    let list_user_orders = controller.find("def list_user_orders").unwrap();
    assert!(list_orders < create_order && create_order < list_user_orders);

    // query parameters come before path parameters
    let limit = controller.find("limit: params[:limit]").unwrap();
    let id = controller.find("id: params[:id]").unwrap();
    assert!(limit < id);

    assert!(controller.contains("params.permit(:note, items: [:quantity, :sku])"));
    assert!(!controller.contains("X-Request-Id"));
}

#[test]
fn test_service_contents() {
    let ws = Workspace::shop();
    generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();

    let service = ws.read(&format!("{ROOT}/app/services/user_service.rb"));
    assert!(service.contains("class UserService\n"));
    assert!(service.contains("  def delete_user(id:)\n"));
    assert!(service.contains("  def list_users()\n"));

    let orders = ws.read(&format!("{ROOT}/app/services/order_service.rb"));
    assert!(orders.contains("  def list_orders(status: nil)\n"));
    assert!(orders.contains("  # @param status [String] one of: open, shipped\n"));
    assert!(orders.contains("  def create_order(body:)\n"));
    assert!(orders.contains("  def list_user_orders(limit:, id:)\n"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let ws = Workspace::shop();
    let first = generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();
    let snapshot: Vec<Vec<u8>> = first.written.iter().map(|p| fs::read(p).unwrap()).collect();

    let second = generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();
    let controllers_and_routes: Vec<_> = second.written.clone();
    for path in &controllers_and_routes {
        let index = first.written.iter().position(|p| p == path).unwrap();
        assert_eq!(fs::read(path).unwrap(), snapshot[index], "{path:?} changed");
    }
    // services were written on the first run and are skipped afterwards
    assert_eq!(second.skipped.len(), 2);
    for path in &second.skipped {
        let index = first.written.iter().position(|p| p == path).unwrap();
        assert_eq!(fs::read(path).unwrap(), snapshot[index]);
    }
}

#[test]
fn test_edited_service_survives_regeneration() {
    let ws = Workspace::shop();
    generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();

    let service = ws.path().join(ROOT).join("app/services/user_service.rb");
    fs::write(&service, "class UserService\n  def list_users() = []\nend\n").unwrap();
    generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();
    assert_eq!(
        fs::read_to_string(&service).unwrap(),
        "class UserService\n  def list_users() = []\nend\n"
    );
}

#[test]
fn test_output_follows_default_layout() {
    let ws = Workspace::new(
        common::SHOP_SPEC,
        "package: shop\n",
    );
    let mut config = Configuration::load(&ws.config_path()).unwrap();
    config.working_directory = ws.path().to_path_buf();

    let operations = load_operations(&ws.spec_path()).unwrap();
    let templates = TemplateSet::builtin().unwrap();
    generate_project(&operations, &config, &templates).unwrap();

    let dirs = resolve_output_directories(&config);
    assert_eq!(dirs.controller_dir, ws.path().join("shop/controllers/api"));
    assert!(dirs.controller_dir.join("order_controller.rb").is_file());
    assert!(dirs.service_dir.join("user_service.rb").is_file());
    assert!(dirs.routes_dir.join("api_routes.rb").is_file());

    let controller = fs::read_to_string(dirs.controller_dir.join("user_controller.rb")).unwrap();
    assert!(controller.contains("class API::UserController < ApplicationController"));
}

#[test]
fn test_user_template_from_config() {
    let ws = Workspace::shop();
    let template = ws.path().join("routes.rb.jinja");
    fs::write(
        &template,
        "{% for r in routes %}{{ r.http_method | upper }} {{ r.path }}\n{% endfor %}",
    )
    .unwrap();
    let config = fs::read_to_string(ws.config_path()).unwrap();
    fs::write(
        ws.config_path(),
        format!("{config}user-templates:\n  routes: {}\n", template.display()),
    )
    .unwrap();

    generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap();
    let routes = ws.read(&format!("{ROOT}/config/api_routes.rb"));
    assert!(routes.starts_with("GET /orders\nPOST /orders\nGET /users\n"));
}

#[test]
fn test_invalid_spec_writes_nothing() {
    let ws = Workspace::shop();
    fs::write(
        ws.spec_path(),
        "openapi: 3.1.0\ninfo: { title: T, version: \"1\" }\npaths:\n  /a:\n    get:\n      tags: [A]\n      responses: { \"200\": { description: OK } }\n",
    )
    .unwrap();
    let err = generate_from_files(&ws.spec_path(), &ws.config_path()).unwrap_err();
    assert!(format!("{err:#}").contains("missing operationId for path: /a, method: get"));
    assert!(!ws.path().join("out").exists());
}
