use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use kendaraan_api::repositories::{
    InMemoryKendaraanRepository, InMemoryTransmisiRepository, TransmisiRepository,
};
use kendaraan_api::services::{FilenameGenerator, ImageUploadService};
use kendaraan_api::{create_app_router, AppState};

const BOUNDARY: &str = "X-KENDARAAN-BOUNDARY";

/// Nombres deterministas: gambar_kendaraan-test-<n>.png
struct SequentialFilenames(AtomicUsize);

impl FilenameGenerator for SequentialFilenames {
    fn generate(&self, field_name: &str, extension: &str) -> String {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        format!("{}-test-{}{}", field_name, n, extension)
    }
}

struct TestApp {
    router: Router,
    transmisi: Arc<InMemoryTransmisiRepository>,
    kendaraan: Arc<InMemoryKendaraanRepository>,
    upload_dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let transmisi = Arc::new(InMemoryTransmisiRepository::new());
        let kendaraan = Arc::new(InMemoryKendaraanRepository::new());
        let upload_dir = tempfile::tempdir().unwrap();
        let uploads = ImageUploadService::with_generator(
            upload_dir.path(),
            Arc::new(SequentialFilenames(AtomicUsize::new(0))),
        );

        let state = AppState::with_repositories(
            transmisi.clone(),
            kendaraan.clone(),
            uploads,
            1024 * 1024,
        );

        Self {
            router: create_app_router(state),
            transmisi,
            kendaraan,
            upload_dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn json(&self, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn multipart(&self, uri: &str, body: Vec<u8>) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Construir un body multipart/form-data a mano
fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((field, filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, field, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

const VEHICLE_FIELDS: &[(&str, &str)] = &[
    ("no_pol", "B 1234 CD"),
    ("nama_kendaraan", "Avanza"),
    ("id_transmisi", "1"),
];

// ---------------------------------------------------------------------------
// transmisi
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_transmisi_end_to_end() {
    let app = TestApp::new();

    let (status, body) = app
        .json("POST", "/api/transmisi/store", json!({ "nama_transmisi": "Manual" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"]["nama_transmisi"], "Manual");
    let id = body["data"]["id_transmisi"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/api/transmisi/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "data transmisi");
    assert_eq!(body["data"]["nama_transmisi"], "Manual");

    let (status, body) = app
        .json(
            "PATCH",
            &format!("/api/transmisi/update/{}", id),
            json!({ "nama_transmisi": "Automatic" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": true, "message": "update" }));

    let (_, body) = app.get(&format!("/api/transmisi/{}", id)).await;
    assert_eq!(body["data"]["nama_transmisi"], "Automatic");

    let (status, body) = app.delete(&format!("/api/transmisi/delete/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data di hapus");

    let (status, body) = app.get(&format!("/api/transmisi/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "status": false, "message": "Not Found" }));
}

#[tokio::test]
async fn test_transmisi_list() {
    let app = TestApp::new();
    app.transmisi.create("Manual").await.unwrap();
    app.transmisi.create("Automatic").await.unwrap();

    let (status, body) = app.get("/api/transmisi").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data transmisi");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][1]["nama_transmisi"], "Automatic");
}

#[tokio::test]
async fn test_transmisi_create_accepts_urlencoded() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/transmisi/store")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("nama_transmisi=CVT"))
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["nama_transmisi"], "CVT");
}

#[tokio::test]
async fn test_transmisi_empty_name_is_422_without_write() {
    let app = TestApp::new();

    let (status, body) = app
        .json("POST", "/api/transmisi/store", json!({ "nama_transmisi": "" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"][0]["path"], "nama_transmisi");
    assert_eq!(body["error"][0]["msg"], "Invalid value");
    assert_eq!(app.transmisi.len().await, 0);

    let (status, _) = app.json("POST", "/api/transmisi/store", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.transmisi.len().await, 0);
}

#[tokio::test]
async fn test_transmisi_update_validates_before_writing() {
    let app = TestApp::new();
    let row = app.transmisi.create("Manual").await.unwrap();

    let (status, body) = app
        .json(
            "PATCH",
            &format!("/api/transmisi/update/{}", row.id_transmisi),
            json!({ "nama_transmisi": "" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_array());

    let stored = app.transmisi.find_by_id(row.id_transmisi).await.unwrap().unwrap();
    assert_eq!(stored.nama_transmisi, "Manual");
}

#[tokio::test]
async fn test_transmisi_update_and_delete_missing_id_still_200() {
    let app = TestApp::new();

    let (status, _) = app
        .json("PATCH", "/api/transmisi/update/999", json!({ "nama_transmisi": "Manual" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.delete("/api/transmisi/delete/999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data di hapus");
}

#[tokio::test]
async fn test_transmisi_non_numeric_id_is_server_error() {
    let app = TestApp::new();
    app.transmisi.create("Manual").await.unwrap();

    let (status, body) = app.get("/api/transmisi/1%20OR%201=1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "server error");
    assert_eq!(body["error"]["kind"], "invalid_input");

    let (status, _) = app.delete("/api/transmisi/delete/abc").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.transmisi.len().await, 1);
}

#[tokio::test]
async fn test_transmisi_database_failures() {
    let app = TestApp::new();
    app.transmisi.set_unavailable(true);

    let (status, body) = app.get("/api/transmisi").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "server failed");
    assert!(body.get("error").is_some());

    let (status, body) = app
        .json("POST", "/api/transmisi/store", json!({ "nama_transmisi": "Manual" }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "status": false, "message": "server failed" }));

    let (status, body) = app.get("/api/transmisi/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "server error");

    let (status, body) = app.delete("/api/transmisi/delete/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "status": false, "message": "server error" }));
}

// ---------------------------------------------------------------------------
// kendaraan
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_kendaraan_create_with_image() {
    let app = TestApp::new();

    let body = multipart_body(
        VEHICLE_FIELDS,
        Some(("gambar_kendaraan", "avanza.png", &b"\x89PNG\r\n\x1a\n"[..])),
    );
    let (status, body) = app.multipart("/api/kendaraan/store", body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Kendaraan telah ditambahkan");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["no_pol"], "B 1234 CD");
    assert_eq!(body["data"]["id_transmisi"], 1);
    assert_eq!(body["data"]["gambar_kendaraan"], "gambar_kendaraan-test-0.png");
    assert_eq!(app.stored_files(), vec!["gambar_kendaraan-test-0.png"]);

    let stored = app.kendaraan.find_by_no_pol("B 1234 CD").await.unwrap();
    assert_eq!(stored.gambar_kendaraan.as_deref(), Some("gambar_kendaraan-test-0.png"));
}

#[tokio::test]
async fn test_kendaraan_create_without_image() {
    let app = TestApp::new();

    let (status, body) = app
        .multipart("/api/kendaraan/store", multipart_body(VEHICLE_FIELDS, None))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["gambar_kendaraan"].is_null());
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_kendaraan_create_accepts_json() {
    let app = TestApp::new();

    let (status, body) = app
        .json(
            "POST",
            "/api/kendaraan/store",
            json!({ "no_pol": "D 99 XY", "nama_kendaraan": "Jazz", "id_transmisi": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id_transmisi"], 2);
}

#[tokio::test]
async fn test_kendaraan_non_integer_transmisi_is_400_without_write() {
    let app = TestApp::new();

    let body = multipart_body(
        &[("no_pol", "B 1234 CD"), ("nama_kendaraan", "Avanza"), ("id_transmisi", "satu")],
        Some(("gambar_kendaraan", "avanza.png", &b"png"[..])),
    );
    let (status, body) = app.multipart("/api/kendaraan/store", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], "id_transmisi");
    assert_eq!(errors[0]["value"], "satu");
    assert_eq!(app.kendaraan.len().await, 0);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_kendaraan_missing_fields_are_listed() {
    let app = TestApp::new();

    let (status, body) = app
        .multipart("/api/kendaraan/store", multipart_body(&[("no_pol", "")], None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let paths: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["no_pol", "nama_kendaraan", "id_transmisi"]);
}

#[tokio::test]
async fn test_kendaraan_rejects_non_png_upload() {
    let app = TestApp::new();

    let body = multipart_body(VEHICLE_FIELDS, Some(("gambar_kendaraan", "avanza.jpg", &b"jpeg"[..])));
    let (status, body) = app.multipart("/api/kendaraan/store", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Jenis file tidak diizinkan");
    assert_eq!(app.kendaraan.len().await, 0);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_kendaraan_rejects_unexpected_file_field() {
    let app = TestApp::new();

    let body = multipart_body(VEHICLE_FIELDS, Some(("foto", "avanza.png", &b"png"[..])));
    let (status, body) = app.multipart("/api/kendaraan/store", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Unexpected field");
    assert_eq!(app.kendaraan.len().await, 0);
}

#[tokio::test]
async fn test_kendaraan_failed_insert_removes_image() {
    let app = TestApp::new();
    app.kendaraan.set_unavailable(true);

    let body = multipart_body(VEHICLE_FIELDS, Some(("gambar_kendaraan", "avanza.png", &b"png"[..])));
    let (status, body) = app.multipart("/api/kendaraan/store", body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server Error");
    assert_eq!(body["error"]["kind"], "unavailable");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_kendaraan_list() {
    let app = TestApp::new();
    app.multipart("/api/kendaraan/store", multipart_body(VEHICLE_FIELDS, None))
        .await;

    let (status, body) = app.get("/api/kendaraan").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Daftar Kendaraan");
    assert_eq!(body["data"][0]["no_pol"], "B 1234 CD");
    assert_eq!(body["data"][0]["id_kendaraan"], 1);

    app.kendaraan.set_unavailable(true);
    let (status, body) = app.get("/api/kendaraan").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "status": false, "message": "Server Error" }));
}

#[tokio::test]
async fn test_kendaraan_update() {
    let app = TestApp::new();
    app.multipart("/api/kendaraan/store", multipart_body(VEHICLE_FIELDS, None))
        .await;

    let (status, body) = app
        .json(
            "PUT",
            "/api/kendaraan/kendaraan/B%201234%20CD",
            json!({ "nama_kendaraan": "Avanza Veloz", "id_transmisi": "2" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Kendaraan telah diupdate");
    assert_eq!(
        body["data"],
        json!({ "no_pol": "B 1234 CD", "nama_kendaraan": "Avanza Veloz", "id_transmisi": "2" })
    );

    let stored = app.kendaraan.find_by_no_pol("B 1234 CD").await.unwrap();
    assert_eq!(stored.nama_kendaraan, "Avanza Veloz");
    assert_eq!(stored.id_transmisi, 2);
}

#[tokio::test]
async fn test_kendaraan_update_and_delete_missing_plate_is_404() {
    let app = TestApp::new();

    let (status, body) = app
        .json(
            "PUT",
            "/api/kendaraan/kendaraan/Z%200000%20ZZ",
            json!({ "nama_kendaraan": "Jazz", "id_transmisi": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "status": false, "message": "Kendaraan tidak ditemukan" }));

    let (status, body) = app.delete("/api/kendaraan/kendaraan/Z%200000%20ZZ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Kendaraan tidak ditemukan");
}

#[tokio::test]
async fn test_kendaraan_update_missing_plate_is_404_whatever_the_body() {
    let app = TestApp::new();

    let (status, body) = app
        .json(
            "PUT",
            "/api/kendaraan/kendaraan/NOPE",
            json!({ "nama_kendaraan": "Jazz", "id_transmisi": "abc" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "status": false, "message": "Kendaraan tidak ditemukan" }));

    let (status, body) = app.json("PUT", "/api/kendaraan/kendaraan/NOPE", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Kendaraan tidak ditemukan");
}

#[tokio::test]
async fn test_kendaraan_update_existing_plate_with_bad_values_is_500() {
    let app = TestApp::new();
    app.multipart("/api/kendaraan/store", multipart_body(VEHICLE_FIELDS, None))
        .await;

    let (status, body) = app
        .json(
            "PUT",
            "/api/kendaraan/kendaraan/B%201234%20CD",
            json!({ "nama_kendaraan": "Jazz", "id_transmisi": "abc" }),
        )
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "status": false, "message": "Server Error" }));

    let (status, _) = app.json("PUT", "/api/kendaraan/kendaraan/B%201234%20CD", json!({})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let stored = app.kendaraan.find_by_no_pol("B 1234 CD").await.unwrap();
    assert_eq!(stored.nama_kendaraan, "Avanza");
    assert_eq!(stored.id_transmisi, 1);
}

#[tokio::test]
async fn test_kendaraan_update_echoes_numeric_transmisi_from_json() {
    let app = TestApp::new();
    app.multipart("/api/kendaraan/store", multipart_body(VEHICLE_FIELDS, None))
        .await;

    let (status, body) = app
        .json(
            "PUT",
            "/api/kendaraan/kendaraan/B%201234%20CD",
            json!({ "nama_kendaraan": "Avanza", "id_transmisi": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id_transmisi"], 3);
}

#[tokio::test]
async fn test_kendaraan_delete() {
    let app = TestApp::new();
    app.multipart("/api/kendaraan/store", multipart_body(VEHICLE_FIELDS, None))
        .await;

    let (status, body) = app.delete("/api/kendaraan/kendaraan/B%201234%20CD").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": true, "message": "Kendaraan telah dihapus" }));
    assert_eq!(app.kendaraan.len().await, 0);
}

#[tokio::test]
async fn test_concurrent_uploads_get_distinct_filenames() {
    let app = Arc::new(TestApp::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let no_pol = format!("B {} XX", i);
                let fields = [
                    ("no_pol", no_pol.as_str()),
                    ("nama_kendaraan", "Avanza"),
                    ("id_transmisi", "1"),
                ];
                let body = multipart_body(&fields, Some(("gambar_kendaraan", "a.png", &b"png"[..])));
                app.multipart("/api/kendaraan/store", body).await
            })
        })
        .collect();

    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    assert_eq!(app.stored_files().len(), 8);
    assert_eq!(app.kendaraan.len().await, 8);
}
