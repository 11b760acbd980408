mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::{json, Value};

#[tokio::test]
async fn bmi_is_derived_on_every_read_and_never_taken_from_input() {
    let app = spawn_app(None).await;
    let student_id = app.create_student("Ama", "Owusu", 4).await;

    let (status, created) = app
        .post(
            "/api/v1/health-records",
            json!({
                "studentId": student_id,
                "recordType": "annual physical",
                "height": "160",
                "weightKg": 50,
                "temperatureCelsius": 36.6,
                "bmi": 99.9,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["recordType"], "Annual Physical");
    assert_eq!(created["heightCm"], 160.0);
    assert_eq!(created["bmi"], 19.5);
    assert_eq!(created["bmiCategory"], "NORMAL");

    let id = created["id"].as_str().unwrap();
    for _ in 0..2 {
        let (status, fetched) = app.get(&format!("/api/v1/health-records/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["bmi"], 19.5);
    }
}

#[tokio::test]
async fn record_without_measurements_has_null_bmi() {
    let app = spawn_app(None).await;
    let student_id = app.create_student("Kofi", "Mensah", 2).await;

    let (status, created) = app
        .post(
            "/api/v1/health-records",
            json!({ "studentId": student_id, "recordType": "Vaccination", "heightCm": 120, "weightKg": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["bmi"], Value::Null);
    assert_eq!(created["bmiCategory"], Value::Null);
}

#[tokio::test]
async fn create_for_unknown_student_is_not_found_and_writes_nothing() {
    let app = spawn_app(None).await;

    let (status, body) = app
        .post(
            "/api/v1/health-records",
            json!({ "studentId": "ghost", "recordType": "Illness" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    let (_, all) = app.get("/api/v1/health-records").await;
    assert_eq!(all.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn invalid_measurements_are_rejected() {
    let app = spawn_app(None).await;
    let student_id = app.create_student("Esi", "Quaye", 6).await;

    for body in [
        json!({ "studentId": student_id, "recordType": "Illness", "temperatureCelsius": 50 }),
        json!({ "studentId": student_id, "recordType": "Illness", "heightCm": 301 }),
        json!({ "studentId": student_id, "recordType": "Illness", "weightKg": "heavy" }),
        json!({ "studentId": student_id, "recordType": "Checkup" }),
        json!({ "studentId": student_id }),
    ] {
        let (status, response) = app.post("/api/v1/health-records", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{response}");
    }
}

#[tokio::test]
async fn student_listing_is_newest_first_and_latest_matches() {
    let app = spawn_app(None).await;
    let student_id = app.create_student("Yaa", "Asantewaa", 5).await;

    for date in ["2024-01-10", "2024-06-01", "2023-09-15"] {
        let (status, _) = app
            .post(
                "/api/v1/health-records",
                json!({ "studentId": student_id, "recordType": "Vision", "recordDate": date }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, listing) = app
        .get(&format!("/api/v1/students/{student_id}/health-records"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = listing
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["recordDate"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec![
            "2024-06-01T00:00:00",
            "2024-01-10T00:00:00",
            "2023-09-15T00:00:00"
        ]
    );

    let (_, alias) = app
        .get(&format!("/api/v1/health-records/student/{student_id}"))
        .await;
    assert_eq!(alias, listing);

    let (status, latest) = app
        .get(&format!("/api/v1/students/{student_id}/health-records/latest"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest["recordDate"], "2024-06-01T00:00:00");
}

#[tokio::test]
async fn latest_record_is_null_without_records_and_404_for_unknown_student() {
    let app = spawn_app(None).await;
    let student_id = app.create_student("Abena", "Darko", 1).await;

    let (status, latest) = app
        .get(&format!("/api/v1/students/{student_id}/health-records/latest"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(latest, Value::Null);

    let (status, _) = app
        .get("/api/v1/students/ghost/health-records/latest")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/v1/health-records/student/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_and_delete_record() {
    let app = spawn_app(None).await;
    let student_id = app.create_student("Kwesi", "Appiah", 8).await;
    let (_, created) = app
        .post(
            "/api/v1/health-records",
            json!({
                "studentId": student_id,
                "recordType": "Injury",
                "heightCm": 150,
                "weightKg": 45,
                "medicalNotes": "Sprained ankle",
            }),
        )
        .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = app
        .put(
            &format!("/api/v1/health-records/{id}"),
            json!({ "weightKg": "50", "medicalNotes": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["weightKg"], 50.0);
    assert_eq!(updated["bmi"], 22.2);
    assert_eq!(updated["medicalNotes"], Value::Null);
    assert_eq!(updated["recordType"], "Injury");

    let (status, _) = app
        .put(
            &format!("/api/v1/health-records/{id}"),
            json!({ "studentId": "ghost" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.delete(&format!("/api/v1/health-records/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.get(&format!("/api/v1/health-records/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&format!("/api/v1/health-records/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
