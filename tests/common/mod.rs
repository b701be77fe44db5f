#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two tags (`User`, `Order`) spread over interleaved paths, with a path-level
/// parameter, a referenced request body and a header parameter.
pub const SHOP_SPEC: &str = r##"openapi: 3.0.3
info:
  title: Shop
  version: 1.0.0
paths:
  /users/{id}:
    parameters:
      - $ref: "#/components/parameters/UserId"
    get:
      tags: [User]
      operationId: getUser
      responses:
        "200":
          description: OK
    delete:
      tags: [User]
      operationId: deleteUser
      responses:
        "204":
          description: Deleted
  /orders:
    post:
      tags: [Order]
      operationId: createOrder
      requestBody:
        $ref: "#/components/requestBodies/NewOrder"
      responses:
        "201":
          description: Created
    get:
      tags: [Order]
      operationId: listOrders
      parameters:
        - name: status
          in: query
          schema:
            type: string
            enum: [open, shipped]
        - name: X-Request-Id
          in: header
          schema:
            type: string
      responses:
        "200":
          description: OK
  /users:
    get:
      tags: [User]
      operationId: listUsers
      responses:
        "200":
          description: OK
  /users/{id}/orders:
    get:
      tags: [Order, User]
      operationId: listUserOrders
      parameters:
        - $ref: "#/components/parameters/UserId"
        - name: limit
          in: query
          required: true
          schema:
            type: integer
      responses:
        "200":
          description: OK
components:
  parameters:
    UserId:
      name: id
      in: path
      required: true
      schema:
        type: integer
  requestBodies:
    NewOrder:
      required: true
      content:
        application/json:
          schema:
            $ref: "#/components/schemas/Order"
  schemas:
    Order:
      type: object
      required: [items]
      properties:
        note:
          type: string
        items:
          type: array
          items:
            $ref: "#/components/schemas/LineItem"
    LineItem:
      type: object
      required: [sku]
      properties:
        sku:
          type: string
        quantity:
          type: integer
"##;

pub const SHOP_CONFIG: &str = "package: Shop Api
directory: ./out
output-options:
  controller-prefix: API::V1
  controller-parent-class: ApplicationController
  regenerate-service: false
  controller-directory: app/controllers
  service-directory: app/services
  routes-directory: config
";

/// A scratch directory holding `openapi.yaml` and `.rog.yaml`.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(spec: &str, config: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("openapi.yaml"), spec).unwrap();
        fs::write(dir.path().join(".rog.yaml"), config).unwrap();
        Self { dir }
    }

    /// The shop fixture with `directory` pointing inside the workspace.
    pub fn shop() -> Self {
        let ws = Self::new(SHOP_SPEC, "");
        let config = SHOP_CONFIG.replace(
            "directory: ./out",
            &format!("directory: {}", ws.dir.path().join("out").display()),
        );
        fs::write(ws.config_path(), config).unwrap();
        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn spec_path(&self) -> PathBuf {
        self.path().join("openapi.yaml")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join(".rog.yaml")
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path().join(relative)).unwrap()
    }
}
