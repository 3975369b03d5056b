// portal-client/tests/submit_flow.rs
// Registration and rent payment end to end against the in-memory API

mod common;

use common::{FakeApi, client};
use portal_client::selection::{Applied, GeoSource, GuestInvoiceSource, RoomBedSource};
use portal_client::submit::{PaymentForm, PaymentMethod, RegistrationForm};
use portal_client::upload::LocalFile;
use portal_client::{ClientError, NotificationLevel, PortalSession};
use serde_json::json;
use shared::Gofor;
use tempfile::TempDir;

fn session() -> PortalSession {
    PortalSession::new("7").with_building("3")
}

fn seed_rooms(api: &FakeApi) {
    api.on_get(Gofor::CountriesList, None, json!([{"id": 101, "name": "India"}]));
    api.on_get(Gofor::StatesList, Some("101"), json!([]));
    api.on_get(Gofor::RoomList, None, json!([{"room_id": 12, "room_no": "101"}]));
    api.on_get(
        Gofor::BedList,
        Some("12"),
        json!([{"bed_id": 31, "bed_no": "A"}, {"bed_id": 32, "bed_no": "B"}]),
    );
}

fn fill_draft(form: &mut RegistrationForm) {
    for (field, value) in [
        ("name", "Asha Rao"),
        ("mobile", "9876543210"),
        ("id_proof_type", "Aadhar"),
        ("id_proof_number", "1234 5678 9012"),
        ("check_in_date", "2024-08-01"),
        ("food_plan", "Veg"),
        ("address", "12 MG Road"),
    ] {
        form.draft.set(field, value).unwrap();
    }
}

#[tokio::test]
async fn test_invalid_mobile_blocks_submission() {
    let api = FakeApi::new();
    seed_rooms(&api);
    let mut form = RegistrationForm::new(client(&api), session());
    form.load().await.unwrap();
    fill_draft(&mut form);
    form.draft.mobile = "12345".into();

    let errors: Vec<_> = form
        .draft
        .field_errors()
        .into_iter()
        .map(|e| e.field)
        .collect();
    assert_eq!(errors, vec!["mobile"]);

    let err = form.submit(false).await.unwrap_err();
    let ClientError::Validation(all) = err else {
        panic!("expected validation error");
    };
    assert!(all.iter().any(|e| e.field == "mobile"));
    assert!(all.iter().any(|e| e.field == "room_id"));
    assert!(all.iter().any(|e| e.field == "photo"));
    assert!(api.posts().is_empty());
    assert_eq!(form.draft.name, "Asha Rao");
}

#[tokio::test]
async fn test_registration_posts_addguest() {
    let dir = TempDir::new().unwrap();
    let photo = dir.path().join("me.jpg");
    let id_doc = dir.path().join("aadhar.pdf");
    std::fs::write(&photo, b"jpeg").unwrap();
    std::fs::write(&id_doc, b"%PDF-1.4").unwrap();

    let api = FakeApi::new();
    seed_rooms(&api);
    api.on_post("image_upload", json!({"success": true, "url": "https://cdn.example/f"}));
    api.on_post("addguest", json!({"success": true, "message": "Guest added"}));

    let client = client(&api);
    let mut form = RegistrationForm::new(client.clone(), session());
    form.load().await.unwrap();
    fill_draft(&mut form);
    form.geo.select(GeoSource::COUNTRY, "101").await.unwrap();
    assert_eq!(
        form.rooms.select(RoomBedSource::ROOM, "12").await.unwrap(),
        Some(Applied::Populated(2))
    );
    form.rooms.select(RoomBedSource::BED, "32").await.unwrap();
    form.photo.select_file(LocalFile::open(&photo).await.unwrap()).unwrap();
    form.id_proof.select_file(LocalFile::open(&id_doc).await.unwrap()).unwrap();
    form.photo.upload(&client).await.unwrap();
    form.id_proof.upload(&client).await.unwrap();

    let receipt = form.submit(true).await.unwrap();
    assert_eq!(receipt.message, "Guest added");
    assert_eq!(receipt.follow_up, "/?user_id=7&building_id=3");

    let posts = api.posts();
    let body = posts.last().unwrap();
    assert_eq!(body["gofor"], "addguest");
    assert_eq!(body["user_id"], "7");
    assert_eq!(body["building_id"], "3");
    assert_eq!(body["name"], "Asha Rao");
    assert_eq!(body["room_id"], "12");
    assert_eq!(body["bed_id"], "32");
    assert_eq!(body["photo"], "https://cdn.example/f");
    assert_eq!(body["company_proof"], "");
    assert_eq!(body["country_id"], "101");
    assert!(body.get("state_id").is_none());

    // Reset after success
    assert!(form.draft.name.is_empty());
    assert_eq!(form.rooms.selected(RoomBedSource::ROOM), None);
    assert!(form.photo.remote_url().is_none());
}

#[tokio::test]
async fn test_rejected_registration_keeps_draft() {
    let dir = TempDir::new().unwrap();
    let photo = dir.path().join("me.png");
    std::fs::write(&photo, b"png").unwrap();

    let api = FakeApi::new();
    seed_rooms(&api);
    api.on_post("image_upload", json!({"success": true, "url": "https://cdn.example/f"}));
    api.on_post("addguest", json!({"error": "Mobile already registered"}));

    let client = client(&api);
    let mut form = RegistrationForm::new(client.clone(), session());
    form.load().await.unwrap();
    fill_draft(&mut form);
    form.rooms.select(RoomBedSource::ROOM, "12").await.unwrap();
    form.rooms.select(RoomBedSource::BED, "31").await.unwrap();
    form.photo.select_file(LocalFile::open(&photo).await.unwrap()).unwrap();
    form.id_proof.select_file(LocalFile::open(&photo).await.unwrap()).unwrap();
    form.photo.upload(&client).await.unwrap();
    form.id_proof.upload(&client).await.unwrap();

    let mut notifications = client.notifier().subscribe();
    let err = form.submit(true).await.unwrap_err();
    assert!(matches!(err, ClientError::Rejected(ref m) if m == "Mobile already registered"));
    assert_eq!(form.draft.name, "Asha Rao");
    assert_eq!(form.rooms.selected(RoomBedSource::BED), Some("31"));
    assert_eq!(notifications.try_recv().unwrap().level, NotificationLevel::Error);
}

fn seed_invoices(api: &FakeApi) {
    api.on_get(
        Gofor::GuestList,
        None,
        json!([
            {"guest_id": 5, "name": "Ravi", "room_no": "101"},
            {"guest_id": 6, "name": "Meena", "room_no": "102"}
        ]),
    );
    api.on_get(
        Gofor::DuePayments,
        Some("6"),
        json!([
            {"invoice_id": 21, "guest_id": 6, "month_year": "August 2024", "amount": "7000", "status": "unpaid"},
            {"invoice_id": 22, "guest_id": 6, "month_year": "September 2024", "amount": "7000", "status": "unpaid"}
        ]),
    );
    api.on_get(
        Gofor::DuePayments,
        Some("5"),
        json!([
            {"invoice_id": 9, "guest_id": 5, "month_year": "August 2024", "amount": "6500.00", "status": "unpaid"},
            {"invoice_id": 8, "guest_id": 5, "month_year": "July 2024", "amount": "6500.00", "status": "paid"}
        ]),
    );
}

#[tokio::test]
async fn test_single_unpaid_invoice_auto_selected() {
    let api = FakeApi::new();
    seed_invoices(&api);
    let mut form = PaymentForm::new(client(&api), session());
    form.load().await.unwrap();

    form.select_guest("5").await.unwrap();
    let invoices = form.selection.chain().level(GuestInvoiceSource::INVOICE).unwrap();
    assert_eq!(invoices.options.len(), 1);
    assert_eq!(form.selection.selected(GuestInvoiceSource::INVOICE), Some("9"));
    assert_eq!(form.draft.invoice_id, "9");
    assert_eq!(form.draft.amount, "6500.00");
}

#[tokio::test]
async fn test_upi_payment_requires_proof_then_posts() {
    let dir = TempDir::new().unwrap();
    let shot = dir.path().join("upi.png");
    std::fs::write(&shot, b"png").unwrap();

    let api = FakeApi::new();
    seed_invoices(&api);
    api.on_post("image_upload", json!({"status": "success", "url": "https://cdn.example/upi.png"}));
    api.on_post("payrent", json!({"response": "Rent Paid successfully"}));

    let client = client(&api);
    let mut form = PaymentForm::new(client.clone(), session());
    form.load().await.unwrap();
    form.select_guest("5").await.unwrap();
    form.draft.transaction_id = "UPI123".into();

    let fields: Vec<_> = form.validate().into_iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["proof"]);
    assert!(matches!(form.submit(false).await, Err(ClientError::Validation(_))));
    assert!(api.posts().is_empty());

    form.proof.select_file(LocalFile::open(&shot).await.unwrap()).unwrap();
    form.proof.upload(&client).await.unwrap();
    let receipt = form.submit(false).await.unwrap();
    assert_eq!(receipt.message, "Rent Paid successfully");

    let body = api.posts().pop().unwrap();
    assert_eq!(body["gofor"], "payrent");
    assert_eq!(body["invoice_id"], "9");
    assert_eq!(body["amount"], "6500.00");
    assert_eq!(body["payment_mode"], "UPI");
    assert_eq!(body["notes"], "UPI123");
    assert_eq!(body["proof"], "https://cdn.example/upi.png");
    assert_eq!(body["payment_date"].as_str().unwrap().len(), 10);
}

#[tokio::test]
async fn test_cash_payment_needs_no_proof() {
    let api = FakeApi::new();
    seed_invoices(&api);
    api.on_post("payrent", json!({"response": "Rent Paid successfully"}));

    let mut form = PaymentForm::new(client(&api), session());
    form.load().await.unwrap();
    form.select_guest("5").await.unwrap();
    form.set_method(PaymentMethod::Cash);

    assert!(form.validate().is_empty());
    form.submit(true).await.unwrap();

    let body = api.posts().pop().unwrap();
    assert_eq!(body["payment_mode"], "Cash");
    assert_eq!(body["proof"], "cash_payment");
    assert!(api.posts().iter().all(|b| b["gofor"] != "image_upload"));
    assert!(form.draft.invoice_id.is_empty());
}

#[tokio::test]
async fn test_unexpected_payrent_reply_is_rejected() {
    let api = FakeApi::new();
    seed_invoices(&api);
    api.on_post("payrent", json!({"response": "Invoice already settled"}));

    let mut form = PaymentForm::new(client(&api), session());
    form.load().await.unwrap();
    form.select_guest("5").await.unwrap();
    form.set_method(PaymentMethod::Cash);

    assert!(matches!(form.submit(true).await, Err(ClientError::Rejected(_))));
    assert_eq!(form.draft.invoice_id, "9");
}

#[tokio::test]
async fn test_rejected_guest_keeps_invoice_and_draft() {
    let api = FakeApi::new();
    seed_invoices(&api);
    let mut form = PaymentForm::new(client(&api), session());
    form.load().await.unwrap();
    form.select_guest("5").await.unwrap();
    form.set_method(PaymentMethod::Cash);

    let err = form.select_guest("999").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(form.selection.selected(GuestInvoiceSource::GUEST), Some("5"));
    assert_eq!(form.selection.selected(GuestInvoiceSource::INVOICE), Some("9"));
    assert_eq!(form.draft.invoice_id, "9");
    assert_eq!(form.draft.amount, "6500.00");
    assert!(form.validate().is_empty());
}

#[tokio::test]
async fn test_switching_guest_drops_previous_invoices() {
    let api = FakeApi::new();
    seed_invoices(&api);
    let mut form = PaymentForm::new(client(&api), session());
    form.load().await.unwrap();
    form.select_guest("5").await.unwrap();
    assert!(form.selection.source().invoice("9").is_some());

    // Two unpaid invoices: nothing is auto-selected
    form.select_guest("6").await.unwrap();
    assert_eq!(form.selection.selected(GuestInvoiceSource::INVOICE), None);
    assert!(form.draft.invoice_id.is_empty());
    assert!(form.selection.source().invoice("9").is_none());

    form.select_invoice("22").unwrap();
    assert_eq!(form.draft.invoice_id, "22");
    assert_eq!(form.draft.amount, "7000");
}
