//! Conformance checks against a running server.
//!
//! Each check sends real requests and inspects the envelope `code` and the
//! shape of `data`. Results are printed as they complete.

use serde_json::{json, Value};

use crate::api::{NasClient, Reply, SkillsClient};

type CheckResult = Result<(), String>;

#[derive(Debug, Default)]
pub struct Report {
    pub passed: usize,
    pub failures: Vec<String>,
}

impl Report {
    pub fn record(&mut self, name: &str, result: CheckResult) {
        match result {
            Ok(()) => {
                println!("  [OK]   {}", name);
                self.passed += 1;
            }
            Err(reason) => {
                println!("  [FAIL] {}: {}", name, reason);
                self.failures.push(format!("{}: {}", name, reason));
            }
        }
    }

    pub fn section(&self, title: &str) {
        println!("\n{}", title);
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

// ============================================================================
// HELPERS
// ============================================================================

pub fn expect_code(reply: &Reply, code: u16) -> CheckResult {
    let envelope = &reply.envelope;
    if envelope.code != code {
        return Err(format!(
            "expected code={}, got code={}, message={}",
            code, envelope.code, envelope.message
        ));
    }
    if reply.status != code {
        return Err(format!("envelope code={} but HTTP status={}", code, reply.status));
    }
    if !envelope.data.is_object() {
        return Err("data is not an object".to_string());
    }
    if envelope.request_id.as_deref().map_or(true, str::is_empty) {
        return Err("requestId missing".to_string());
    }
    Ok(())
}

pub fn expect_keys(data: &Value, keys: &[&str]) -> CheckResult {
    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|k| data.get(k).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("data missing {}", missing.join("/")))
    }
}

fn expect_array<'a>(data: &'a Value, key: &str) -> Result<&'a Vec<Value>, String> {
    data.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("data.{} is not an array", key))
}

fn expect_eq(what: &str, actual: &Value, expected: Value) -> CheckResult {
    if *actual == expected {
        Ok(())
    } else {
        Err(format!("{}: expected {}, got {}", what, expected, actual))
    }
}

/// `op_` followed by exactly 12 lowercase hex characters.
pub fn is_operation_id(id: &str) -> bool {
    id.strip_prefix("op_").map_or(false, |hex| {
        hex.len() == 12 && hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    })
}

async fn call(
    client: &NasClient,
    path: &str,
    body: Option<Value>,
    query: &[(&str, &str)],
) -> Result<Reply, String> {
    let result = match body {
        Some(body) => client.post(path, &body).await,
        None => client.get(path, query).await,
    };
    result.map_err(|e| e.to_string())
}

async fn expect_ok(client: &NasClient, path: &str, body: Option<Value>) -> Result<Value, String> {
    let reply = call(client, path, body, &[]).await?;
    expect_code(&reply, 200)?;
    Ok(reply.envelope.data)
}

async fn expect_rejected(client: &NasClient, path: &str, body: Value, code: u16) -> CheckResult {
    let reply = call(client, path, Some(body), &[]).await?;
    expect_code(&reply, code)
}

// ============================================================================
// SUITE
// ============================================================================

pub async fn run(client: &NasClient) -> Report {
    let mut report = Report::default();

    report.section("1. Authentication");
    let anonymous = client.with_token(None);
    report.record(
        "GET system/status without token -> 401",
        call(&anonymous, "system/status", None, &[])
            .await
            .and_then(|r| expect_code(&r, 401)),
    );
    let impostor = client.with_token(Some("definitely-not-the-token"));
    report.record(
        "POST files/search with wrong token -> 401",
        expect_rejected(&impostor, "files/search", json!({"query": "q"}), 401).await,
    );

    report.section("2. File search POST files/search");
    report.record("search with query", check_file_search(client).await);
    report.record("pagination echo page=3 size=5", check_pagination_echo(client).await);
    report.record(
        "search without query -> 400",
        expect_rejected(client, "files/search", json!({}), 400).await,
    );

    report.section("3. File actions POST files/actions");
    report.record("move two files", check_move(client).await);
    report.record(
        "delete",
        expect_ok(
            client,
            "files/actions",
            Some(json!({"action": "delete", "sourceFileIds": ["file_789"]})),
        )
        .await
        .map(|_| ()),
    );
    report.record(
        "create_folder",
        expect_ok(
            client,
            "files/actions",
            Some(json!({"action": "create_folder", "targetFolderId": "folder_000", "newName": "New folder"})),
        )
        .await
        .map(|_| ()),
    );
    report.record(
        "unknown action -> 400",
        expect_rejected(client, "files/actions", json!({"action": "archive"}), 400).await,
    );
    report.record(
        "move without sourceFileIds/targetFolderId -> 400",
        expect_rejected(client, "files/actions", json!({"action": "move"}), 400).await,
    );
    report.record(
        "rename without newName -> 400",
        expect_rejected(
            client,
            "files/actions",
            json!({"action": "rename", "sourceFileIds": ["f1"]}),
            400,
        )
        .await,
    );
    report.record("repeated action yields fresh ids", check_freshness(client).await);

    report.section("4. Media search POST media/ai-search");
    report.record("video search", check_media_search(client).await);
    report.record(
        "media search without query -> 400",
        expect_rejected(client, "media/ai-search", json!({"mediaType": "video"}), 400).await,
    );

    report.section("5. Album categories GET media/albums/categories");
    report.record("all categories", check_categories(client, None).await);
    for kind in ["person", "pet"] {
        report.record(
            &format!("categories type={}", kind),
            check_categories(client, Some(kind)).await,
        );
    }

    report.section("6. System status GET system/status");
    report.record("status snapshot", check_system_status(client).await);

    report.section("7. Permission check POST auth/check-permission");
    for (action, resource_id, granted) in [
        ("delete", "file_system_abc", false),
        ("delete", "file_999", true),
        ("read", "file_system_abc", true),
    ] {
        report.record(
            &format!("{} {} -> granted={}", action, resource_id, granted),
            check_permission(client, action, resource_id, granted).await,
        );
    }
    for field in ["action", "resourceType", "resourceId"] {
        let mut body = json!({"action": "read", "resourceType": "file", "resourceId": "file_1"});
        if let Some(object) = body.as_object_mut() {
            object.remove(field);
        }
        report.record(
            &format!("without {} -> 400", field),
            expect_rejected(client, "auth/check-permission", body, 400).await,
        );
    }

    report
}

async fn check_file_search(client: &NasClient) -> CheckResult {
    let data = expect_ok(
        client,
        "files/search",
        Some(json!({"query": "project report", "page": 1, "size": 20})),
    )
    .await?;
    expect_keys(&data, &["items", "pagination"])?;
    let items = expect_array(&data, "items")?;
    let first = items.first().ok_or("items is empty")?;
    expect_keys(first, &["id", "name", "path", "spaceType", "type", "size"])?;
    expect_eq("items[0].spaceType", &first["spaceType"], json!("personal"))
}

async fn check_pagination_echo(client: &NasClient) -> CheckResult {
    let data = expect_ok(
        client,
        "files/search",
        Some(json!({"query": "q", "page": 3, "size": 5})),
    )
    .await?;
    expect_eq("pagination.page", &data["pagination"]["page"], json!(3))?;
    expect_eq("pagination.size", &data["pagination"]["size"], json!(5))
}

async fn check_move(client: &NasClient) -> CheckResult {
    let data = expect_ok(
        client,
        "files/actions",
        Some(json!({"action": "move", "sourceFileIds": ["f1", "f2"], "targetFolderId": "t1"})),
    )
    .await?;
    expect_keys(&data, &["successCount", "failCount", "failedItems", "operationId"])?;
    expect_eq("successCount", &data["successCount"], json!(2))?;
    expect_eq("failCount", &data["failCount"], json!(0))?;
    let operation_id = data["operationId"].as_str().unwrap_or_default();
    if !is_operation_id(operation_id) {
        return Err(format!("operationId {:?} does not match op_[0-9a-f]{{12}}", operation_id));
    }
    Ok(())
}

async fn check_freshness(client: &NasClient) -> CheckResult {
    let body = json!({"action": "delete", "sourceFileIds": ["file_789"]});
    let first = call(client, "files/actions", Some(body.clone()), &[]).await?;
    let second = call(client, "files/actions", Some(body), &[]).await?;
    expect_code(&first, 200)?;
    expect_code(&second, 200)?;

    if first.envelope.request_id == second.envelope.request_id {
        return Err("requestId reused".to_string());
    }
    if first.envelope.data["operationId"] == second.envelope.data["operationId"] {
        return Err("operationId reused".to_string());
    }

    let mut a = first.envelope.data;
    let mut b = second.envelope.data;
    a["operationId"] = Value::Null;
    b["operationId"] = Value::Null;
    expect_eq("data", &a, b)
}

async fn check_media_search(client: &NasClient) -> CheckResult {
    let data = expect_ok(
        client,
        "media/ai-search",
        Some(json!({"query": "sunset at the beach", "mediaType": "video", "page": 1, "size": 20})),
    )
    .await?;
    expect_keys(&data, &["items", "pagination"])?;
    let items = expect_array(&data, "items")?;
    let first = items.first().ok_or("items is empty")?;
    expect_eq("items[0].type", &first["type"], json!("video"))
}

async fn check_categories(client: &NasClient, kind: Option<&str>) -> CheckResult {
    let query: Vec<(&str, &str)> = kind.map(|k| ("type", k)).into_iter().collect();
    let reply = call(client, "media/albums/categories", None, &query).await?;
    expect_code(&reply, 200)?;
    let categories = expect_array(&reply.envelope.data, "categories")?;

    match kind {
        None if categories.len() != 4 => Err(format!("expected 4 categories, got {}", categories.len())),
        None => Ok(()),
        Some(kind) => match categories.iter().find(|c| c["type"] != kind) {
            Some(other) => Err(format!("category of type {} returned for type={}", other["type"], kind)),
            None => Ok(()),
        },
    }
}

async fn check_system_status(client: &NasClient) -> CheckResult {
    let first = expect_ok(client, "system/status", None).await?;
    expect_keys(&first, &["storage", "memory", "cpu", "uptime"])?;
    let second = expect_ok(client, "system/status", None).await?;
    expect_eq("second snapshot", &second, first)
}

async fn check_permission(
    client: &NasClient,
    action: &str,
    resource_id: &str,
    granted: bool,
) -> CheckResult {
    let data = expect_ok(
        client,
        "auth/check-permission",
        Some(json!({"action": action, "resourceType": "file", "resourceId": resource_id})),
    )
    .await?;
    expect_eq("granted", &data["granted"], json!(granted))
}

// ============================================================================
// ASSISTANT SKILLS
// ============================================================================

/// List skills, flip the first one and flip it back.
pub async fn run_skills(client: &SkillsClient) -> Report {
    let mut report = Report::default();
    report.section("Assistant skills");

    let skills = match client.list().await {
        Ok(skills) => {
            report.record(&format!("list skills ({} found)", skills.len()), Ok(()));
            skills
        }
        Err(e) => {
            report.record("list skills", Err(e.to_string()));
            return report;
        }
    };

    let Some(target) = skills.first() else {
        println!("  no skills to toggle");
        return report;
    };

    for enabled in [!target.enabled, target.enabled] {
        let result = match client.toggle(&target.id, enabled).await {
            Ok(update) if update.enabled == enabled && update.id == target.id => Ok(()),
            Ok(update) => Err(format!("server reports enabled={} for {}", update.enabled, update.id)),
            Err(e) => Err(e.to_string()),
        };
        report.record(&format!("set {} enabled={}", target.id, enabled), result);
    }

    report
}
