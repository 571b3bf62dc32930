mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{build_router, loaded_router, sales_payload, send, send_json};

#[tokio::test]
async fn health_responds() {
    let app = build_router();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn data_endpoints_need_a_result_first() {
    let app = build_router();
    for uri in ["/analytics", "/table", "/chart", "/table/export"] {
        let (status, body) = send_json(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT, "{}", uri);
        assert!(body["error"].as_str().unwrap().contains("No analytics"));
    }
}

#[tokio::test]
async fn loading_returns_overview() {
    let app = build_router();
    let (status, body) = send_json(&app, "POST", "/analytics", Some(sales_payload())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["column_count"], 3);
    assert_eq!(body["sample_rows"], 4);
    assert_eq!(body["data_quality"], 92);
    assert_eq!(body["columns"][1]["quality"], "poor");
    assert_eq!(body["columns"][1]["name"], "units");
}

#[tokio::test]
async fn malformed_and_inconsistent_results_are_rejected() {
    let app = build_router();
    let (status, body) = send(&app, "POST", "/analytics", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8_lossy(&body).contains("Parse error"));

    let mut payload = sales_payload();
    payload["columns"][0]["missing"] = json!(9);
    let (status, _) = send_json(&app, "POST", "/analytics", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn table_defaults_to_first_page_of_everything() {
    let app = loaded_router().await;
    let (status, body) = send_json(&app, "GET", "/table", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_matched"], 4);
    assert_eq!(body["rows"].as_array().unwrap().len(), 4);
    assert_eq!(body["rows_per_page"], 10);
    assert_eq!(body["label"], "1-4 of 4");
    assert_eq!(body["summary"], "Showing 4 of 4 rows");
}

#[tokio::test]
async fn view_state_filters_sorts_and_pages() {
    let app = loaded_router().await;
    let state = json!({
        "search_term": "a",
        "sort_column": "units",
        "sort_direction": "desc",
        "rows_per_page": 5
    });
    let (status, body) = send_json(&app, "PUT", "/table/state", Some(state)).await;
    assert_eq!(status, StatusCode::OK);
    let reps: Vec<&str> = body["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["rep"].as_str().unwrap())
        .collect();
    // null renders as "null", which sorts after every number
    assert_eq!(reps, ["Dev", "Ana", "Alice"]);
    assert_eq!(body["summary"], "Showing 3 of 3 rows (filtered from 4 total)");
}

#[tokio::test]
async fn view_state_with_unknown_column_is_refused() {
    let app = loaded_router().await;
    let state = json!({"filter_column": "price", "filter_value": "3"});
    let (status, _) = send_json(&app, "PUT", "/table/state", Some(state)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let state = json!({"rows_per_page": 3});
    let (status, _) = send_json(&app, "PUT", "/table/state", Some(state)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sort_toggles_between_directions() {
    let app = loaded_router().await;
    let (_, body) = send_json(&app, "POST", "/table/sort/units", None).await;
    assert_eq!(body["rows"][0]["rep"], "Ben");

    let (_, body) = send_json(&app, "POST", "/table/sort/units", None).await;
    // "null" sorts after every number ascending, so it leads descending
    assert_eq!(body["rows"][0]["rep"], "Dev");
    assert_eq!(body["rows"][1]["rep"], "Ana");

    let (status, _) = send_json(&app, "POST", "/table/sort/missing", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn export_uses_the_filtered_rows() {
    let app = loaded_router().await;
    let state = json!({"filter_column": "region", "filter_value": "NORTH"});
    send_json(&app, "PUT", "/table/state", Some(state)).await;

    let (status, body) = send(&app, "GET", "/table/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "region,units,rep\n\"north\",\"10\",\"Ana\"\n\"north\",\"6\",\"Alice\""
    );
}

#[tokio::test]
async fn default_chart_is_a_bar_of_the_first_two_columns() {
    let app = loaded_router().await;
    let (status, body) = send_json(&app, "GET", "/chart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["layout"]["title"], "Bar Chart of units vs region");
    let series = &body["series"][0];
    assert_eq!(series["chart_type"], "bar");
    assert_eq!(series["x"], json!(["north", "south", "north", "east"]));
    assert_eq!(series["y"], json!([10, 4, 6, null]));
}

#[tokio::test]
async fn pie_spec_aggregates() {
    let app = loaded_router().await;
    let spec = json!({
        "chart_type": "pie",
        "x_column": "region",
        "y_column": "units",
        "styling": {"color_palette": "Pastel", "title": "Units by region"}
    });
    let (status, body) = send_json(&app, "PUT", "/chart/spec", Some(spec)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["layout"]["title"], "Units by region");
    let series = &body["series"][0];
    assert_eq!(series["labels"], json!(["north", "south", "east"]));
    assert_eq!(series["values"], json!([16.0, 4.0, 0.0]));
    assert_eq!(series["marker"]["colors"], json!(["#ffcdd2", "#f8bbd9", "#e1bee7"]));
}

#[tokio::test]
async fn unbound_axes_are_not_configured() {
    let app = loaded_router().await;
    let spec = json!({"chart_type": "line", "x_column": "region"});
    let (status, body) = send_json(&app, "PUT", "/chart/spec", Some(spec)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "not_configured");

    let spec = json!({"x_column": "region", "y_column": "revenue"});
    let (status, _) = send_json(&app, "PUT", "/chart/spec", Some(spec)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn reload_resets_chart_and_table() {
    let app = loaded_router().await;
    send_json(&app, "POST", "/table/sort/rep", None).await;
    send_json(
        &app,
        "PUT",
        "/chart/spec",
        Some(json!({"chart_type": "scatter", "x_column": "rep", "y_column": "units"})),
    )
    .await;

    let payload = json!({
        "schema": [["city", "object"]],
        "sample": [{"city": "Oslo"}],
        "columns": [{"name": "city", "type": "object", "missing": 0, "unique": 1}]
    });
    let (status, _) = send_json(&app, "POST", "/analytics", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, chart) = send_json(&app, "GET", "/chart", None).await;
    assert_eq!(chart["layout"]["title"], "Bar Chart of city vs city");
    let (_, table) = send_json(&app, "GET", "/table", None).await;
    assert_eq!(table["total_matched"], 1);
}

#[tokio::test]
async fn saved_chart_round_trip() {
    let app = loaded_router().await;
    let (status, _) = send_json(&app, "GET", "/chart/saved", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, saved) = send_json(&app, "POST", "/chart/saved", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["spec"]["x_column"], "region");
    assert!(saved["saved_at"].is_string());

    let (status, fetched) = send_json(&app, "GET", "/chart/saved", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn catalogue_endpoints() {
    let app = build_router();
    let (_, types) = send_json(&app, "GET", "/chart/types", None).await;
    assert_eq!(types.as_array().unwrap().len(), 8);
    assert_eq!(types[5], json!({"value": "box", "label": "Box Plot"}));

    let (_, palettes) = send_json(&app, "GET", "/chart/palettes", None).await;
    assert_eq!(palettes[3]["name"], "Monochrome");
    assert_eq!(palettes[0]["colors"][0], "#1976d2");
}
