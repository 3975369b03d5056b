//! Guest registration (`addguest`)

use super::rules::{self, mobile, optional_email, optional_mobile, required};
use super::{SubmitReceipt, post_draft};
use crate::selection::{Cascade, GeoSource, RoomBedSource};
use crate::upload::{FilePolicy, UploadPurpose, UploadSlot};
use crate::{ClientError, ClientResult, PortalClient};
use serde::{Deserialize, Serialize};
use shared::{FieldError, Gofor, PortalSession};
use validator::Validate;

/// Form order used when reporting violations
const FIELD_ORDER: &[&str] = &[
    "name",
    "mobile",
    "email",
    "photo",
    "id_proof_type",
    "id_proof_number",
    "id_proof_file",
    "check_in_date",
    "food_plan",
    "address",
    "country_id",
    "state_id",
    "city_id",
    "room_id",
    "bed_id",
    "blood_group",
    "emergency_contact",
    "occupation",
    "company_name",
    "company_proof",
    "vehicle_details",
    "date_of_joining",
    "expected_stay_duration",
    "reference_name",
    "reference_contact",
    "notes",
];

/// Free-text part of the registration form, keyed by backend field names
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GuestRegistrationDraft {
    #[validate(custom(function = "required"))]
    pub name: String,
    #[validate(custom(function = "mobile"))]
    pub mobile: String,
    #[validate(custom(function = "optional_email"))]
    pub email: String,
    /// Aadhar, PAN, Passport or Driving License
    #[validate(custom(function = "required"))]
    pub id_proof_type: String,
    #[validate(custom(function = "required"))]
    pub id_proof_number: String,
    #[validate(custom(function = "required"))]
    pub check_in_date: String,
    /// Veg or Non-Veg
    #[validate(custom(function = "required"))]
    pub food_plan: String,
    #[validate(custom(function = "required"))]
    pub address: String,
    pub blood_group: String,
    #[validate(custom(function = "optional_mobile"))]
    pub emergency_contact: String,
    pub occupation: String,
    pub company_name: String,
    pub vehicle_details: String,
    pub date_of_joining: String,
    pub expected_stay_duration: String,
    pub reference_name: String,
    #[validate(custom(function = "optional_mobile"))]
    pub reference_contact: String,
    pub notes: String,
}

impl GuestRegistrationDraft {
    /// Set a field by its backend name
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> ClientResult<()> {
        let value = value.into();
        let slot = match field {
            "name" => &mut self.name,
            "mobile" => &mut self.mobile,
            "email" => &mut self.email,
            "id_proof_type" => &mut self.id_proof_type,
            "id_proof_number" => &mut self.id_proof_number,
            "check_in_date" => &mut self.check_in_date,
            "food_plan" => &mut self.food_plan,
            "address" => &mut self.address,
            "blood_group" => &mut self.blood_group,
            "emergency_contact" => &mut self.emergency_contact,
            "occupation" => &mut self.occupation,
            "company_name" => &mut self.company_name,
            "vehicle_details" => &mut self.vehicle_details,
            "date_of_joining" => &mut self.date_of_joining,
            "expected_stay_duration" => &mut self.expected_stay_duration,
            "reference_name" => &mut self.reference_name,
            "reference_contact" => &mut self.reference_contact,
            "notes" => &mut self.notes,
            _ => return Err(ClientError::validation(field, format!("unknown field '{field}'"))),
        };
        *slot = value;
        Ok(())
    }

    /// Violated rules of the free-text fields
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => rules::collect(&errors, FIELD_ORDER),
        }
    }
}

/// `addguest` request body (without `gofor`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddGuestRequest {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
    #[serde(flatten)]
    pub draft: GuestRegistrationDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<String>,
    pub room_id: String,
    pub bed_id: String,
    pub photo: String,
    pub id_proof_file: String,
    pub company_proof: String,
}

/// Registration page state: draft, cascades and uploads
pub struct RegistrationForm {
    client: PortalClient,
    session: PortalSession,
    pub draft: GuestRegistrationDraft,
    pub geo: Cascade<GeoSource>,
    pub rooms: Cascade<RoomBedSource>,
    pub photo: UploadSlot,
    pub id_proof: UploadSlot,
    pub company_proof: UploadSlot,
}

impl RegistrationForm {
    pub fn new(client: PortalClient, session: PortalSession) -> Self {
        let max = client.config().max_upload_bytes;
        Self {
            geo: Cascade::new(client.clone(), GeoSource),
            rooms: Cascade::new(client.clone(), RoomBedSource::new(session.clone())),
            photo: UploadSlot::new(UploadPurpose::Guest, true, FilePolicy::images(max)),
            id_proof: UploadSlot::new(UploadPurpose::IdProof, true, FilePolicy::documents(max)),
            company_proof: UploadSlot::new(UploadPurpose::Company, false, FilePolicy::documents(max)),
            draft: GuestRegistrationDraft::default(),
            client,
            session,
        }
    }

    /// Load the root levels of both cascades
    pub async fn load(&mut self) -> ClientResult<()> {
        self.geo.load_root().await?;
        self.rooms.load_root().await?;
        Ok(())
    }

    /// Every violated rule across fields, selections and uploads
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = self.draft.field_errors();

        if self.rooms.selected(RoomBedSource::ROOM).is_none() {
            errors.push(FieldError::new("room_id", "Please select a room"));
        }
        if self.rooms.selected(RoomBedSource::BED).is_none() {
            errors.push(FieldError::new("bed_id", "Please select a bed"));
        }
        for (field, slot) in [
            ("photo", &self.photo),
            ("id_proof_file", &self.id_proof),
            ("company_proof", &self.company_proof),
        ] {
            if !slot.is_satisfied() {
                errors.push(FieldError::new(
                    field,
                    format!("Please upload the {} first", field.replace('_', " ")),
                ));
            }
        }

        let rank = |f: &str| FIELD_ORDER.iter().position(|o| *o == f).unwrap_or(FIELD_ORDER.len());
        errors.sort_by_key(|e| rank(&e.field));
        errors
    }

    /// Build the request body; fails with every violation when invalid
    pub fn assemble(&self) -> ClientResult<AddGuestRequest> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ClientError::Validation(errors));
        }
        let selected = |c: Option<&str>| c.map(String::from);
        Ok(AddGuestRequest {
            user_id: self.session.user_id.clone(),
            building_id: self.session.building_id.clone(),
            draft: self.draft.clone(),
            country_id: selected(self.geo.selected(GeoSource::COUNTRY)),
            state_id: selected(self.geo.selected(GeoSource::STATE)),
            city_id: selected(self.geo.selected(GeoSource::CITY)),
            room_id: selected(self.rooms.selected(RoomBedSource::ROOM)).unwrap_or_default(),
            bed_id: selected(self.rooms.selected(RoomBedSource::BED)).unwrap_or_default(),
            photo: self.photo.remote_url().unwrap_or_default().to_string(),
            id_proof_file: self.id_proof.remote_url().unwrap_or_default().to_string(),
            company_proof: self.company_proof.remote_url().unwrap_or_default().to_string(),
        })
    }

    /// Validate and post `addguest`
    ///
    /// On success the form is reset when `reset` is set; on any failure the
    /// draft is left untouched for a retry.
    pub async fn submit(&mut self, reset: bool) -> ClientResult<SubmitReceipt> {
        let request = self.assemble()?;
        let message = post_draft(&self.client, Gofor::AddGuest, &request, None).await?;
        tracing::info!(user_id = %self.session.user_id, "Guest registered");
        if reset {
            self.reset();
        }
        Ok(SubmitReceipt {
            message,
            follow_up: self.session.route("/"),
        })
    }

    /// Clear draft, selections (below the loaded roots) and uploads
    pub fn reset(&mut self) {
        self.draft = GuestRegistrationDraft::default();
        // Clearing a root never fails
        let _ = self.geo.select_at(GeoSource::COUNTRY, "");
        let _ = self.rooms.select_at(RoomBedSource::ROOM, "");
        self.photo.clear();
        self.id_proof.clear();
        self.company_proof.clear();
    }
}
