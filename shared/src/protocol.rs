use crate::{
    AuthResponse, Contact, Enterprise, EnterpriseStats, MyContacts, ResponsibleStage, Role, Stage,
    StageStats, UserIdentity, VersionNumber,
};
use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// GET 请求不携带 body
    pub fn carries_body(&self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Endpoints that may answer `204 No Content` declare `Option<T>` as their response;
/// endpoints whose body the client never reads declare `IgnoredAny`.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Operation name recorded in error traces, e.g. `"auths.login"`.
    const OPERATION: &'static str;
    /// The URL path, relative to the API base URL.
    fn path(&self) -> String;
}

// =========================================================
// /auths
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "auths.login";
    fn path(&self) -> String {
        "/auths/login".into()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub role: Role,
}

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "auths.register";
    fn path(&self) -> String {
        "/auths/register".into()
    }
}

/// Token revalidation; answers with the current identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest;

impl ApiRequest for RefreshRequest {
    type Response = UserIdentity;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "auths.refresh";
    fn path(&self) -> String {
        "/auths/refresh".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    type Response = Option<Vec<UserIdentity>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "auths.all";
    fn path(&self) -> String {
        "/auths/all".into()
    }
}

/// Settings edit. Only non-blank fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    pub version_number: VersionNumber,
}

impl ApiRequest for EditUserRequest {
    type Response = Option<UserIdentity>;
    const METHOD: HttpMethod = HttpMethod::Put;
    const OPERATION: &'static str = "auths.edit";
    fn path(&self) -> String {
        "/auths".into()
    }
}

// =========================================================
// /contact
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyContactsRequest;

impl ApiRequest for MyContactsRequest {
    type Response = MyContacts;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "contact.all";
    fn path(&self) -> String {
        "/contact/all".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddContactRequest {
    pub id_enterprise: i32,
}

impl ApiRequest for AddContactRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "contact.add";
    fn path(&self) -> String {
        "/contact".into()
    }
}

/// Contact status transitions a student can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactTransition {
    Admitted { meeting_place: String },
    TurnedDown { reason: String },
    Accepted,
    Unsupervised,
}

impl ContactTransition {
    fn segment(&self) -> &'static str {
        match self {
            ContactTransition::Admitted { .. } => "admitted",
            ContactTransition::TurnedDown { .. } => "turnedDown",
            ContactTransition::Accepted => "accepted",
            ContactTransition::Unsupervised => "unsupervised",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeContactStatusRequest {
    #[serde(skip)]
    pub id_contact: i32,
    #[serde(skip)]
    pub transition: ContactTransition,
    pub version_number: VersionNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_refusal: Option<String>,
}

impl ChangeContactStatusRequest {
    /// 从最后一次收到的联系构造请求，版本号原样回传
    pub fn new(contact: &Contact, transition: ContactTransition) -> Self {
        let (meeting_place, reason_refusal) = match &transition {
            ContactTransition::Admitted { meeting_place } => (Some(meeting_place.clone()), None),
            ContactTransition::TurnedDown { reason } => (None, Some(reason.clone())),
            _ => (None, None),
        };
        Self {
            id_contact: contact.id_contact,
            transition,
            version_number: contact.version_number,
            meeting_place,
            reason_refusal,
        }
    }
}

impl ApiRequest for ChangeContactStatusRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "contact.change_status";
    fn path(&self) -> String {
        format!("/contact/{}/{}", self.id_contact, self.transition.segment())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContactsRequest {
    #[serde(skip)]
    pub id_user: i32,
}

impl ApiRequest for UserContactsRequest {
    type Response = Option<Vec<Contact>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "contact.of_user";
    fn path(&self) -> String {
        format!("/contact/{}/contact", self.id_user)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnterpriseContactsRequest {
    #[serde(skip)]
    pub id_enterprise: i32,
}

impl ApiRequest for EnterpriseContactsRequest {
    type Response = Vec<Contact>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "contact.of_enterprise";
    fn path(&self) -> String {
        format!("/contact/enterprise/{}", self.id_enterprise)
    }
}

// =========================================================
// /enterprise
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnterprisesRequest;

impl ApiRequest for ListEnterprisesRequest {
    type Response = Vec<Enterprise>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "enterprise.all";
    fn path(&self) -> String {
        "/enterprise".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnterpriseInfoRequest {
    #[serde(skip)]
    pub id_enterprise: i32,
}

impl ApiRequest for EnterpriseInfoRequest {
    type Response = Enterprise;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "enterprise.info";
    fn path(&self) -> String {
        format!("/enterprise/{}/info", self.id_enterprise)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnterpriseRequest {
    pub trade_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    pub street: String,
    pub street_number: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ApiRequest for CreateEnterpriseRequest {
    type Response = Enterprise;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "enterprise.create";
    fn path(&self) -> String {
        "/enterprise".into()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlacklistRequest {
    #[serde(skip)]
    pub id_enterprise: i32,
    pub blacklist_reason: String,
    pub version_number: VersionNumber,
}

impl BlacklistRequest {
    pub fn new(enterprise: &Enterprise, reason: impl Into<String>) -> Self {
        Self {
            id_enterprise: enterprise.id_enterprise,
            blacklist_reason: reason.into(),
            version_number: enterprise.version_number,
        }
    }
}

impl ApiRequest for BlacklistRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "enterprise.blacklist";
    fn path(&self) -> String {
        format!("/enterprise/{}/blacklist", self.id_enterprise)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnterpriseStatsRequest;

impl ApiRequest for EnterpriseStatsRequest {
    type Response = EnterpriseStats;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "enterprise.stats";
    fn path(&self) -> String {
        "/enterprise/stats".into()
    }
}

// =========================================================
// /stages
// =========================================================

/// The authenticated student's latest stage (204 when none).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastStageRequest;

impl ApiRequest for LastStageRequest {
    type Response = Option<Stage>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "stages.last";
    fn path(&self) -> String {
        "/stages".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentStageRequest {
    #[serde(skip)]
    pub id_user: i32,
}

impl ApiRequest for StudentStageRequest {
    type Response = Option<Stage>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "stages.of_student";
    fn path(&self) -> String {
        format!("/stages/{}/getstage", self.id_user)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStageRequest {
    pub internship_project: String,
    pub internship_supervisor_id: i32,
    /// 联系 id
    pub contact: i32,
    pub signature_date: NaiveDate,
}

impl ApiRequest for CreateStageRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "stages.create";
    fn path(&self) -> String {
        "/stages/create".into()
    }
}

/// 修改实习主题。后端此处的版本字段名为 `numVersion`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInternshipProjectRequest {
    pub num_version: VersionNumber,
    pub internship_project: String,
}

impl ChangeInternshipProjectRequest {
    pub fn new(stage: &Stage, project: impl Into<String>) -> Self {
        Self {
            num_version: stage.version_number,
            internship_project: project.into(),
        }
    }
}

impl ApiRequest for ChangeInternshipProjectRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Put;
    const OPERATION: &'static str = "stages.change_project";
    fn path(&self) -> String {
        "/stages".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageStatsRequest;

impl ApiRequest for StageStatsRequest {
    type Response = StageStats;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "stages.stats";
    fn path(&self) -> String {
        "/stages/stats".into()
    }
}

// =========================================================
// /responsableStage
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponsiblesRequest;

impl ApiRequest for ListResponsiblesRequest {
    type Response = Option<Vec<ResponsibleStage>>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const OPERATION: &'static str = "responsable.all";
    fn path(&self) -> String {
        "/responsableStage/all".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponsibleRequest {
    pub last_name: String,
    pub first_name: String,
    pub phone_number: String,
    pub email: String,
    /// 企业 id
    pub enterprise: i32,
}

impl ApiRequest for CreateResponsibleRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const OPERATION: &'static str = "responsable.create";
    fn path(&self) -> String {
        "/responsableStage/create".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContactStatus;

    fn contact(id: i32, version: i32) -> Contact {
        Contact {
            id_contact: id,
            user_id: 1,
            enterprise: 42,
            contact_status: ContactStatus::Started,
            meeting_place: None,
            reason_for_refusal: None,
            school_year: None,
            enterprise_dto: None,
            user_dto: None,
            version_number: VersionNumber::new(version),
        }
    }

    #[test]
    fn test_status_change_echoes_version() {
        let req = ChangeContactStatusRequest::new(
            &contact(9, 4),
            ContactTransition::TurnedDown {
                reason: "trop loin".into(),
            },
        );

        assert_eq!(req.path(), "/contact/9/turnedDown");
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["versionNumber"], 4);
        assert_eq!(body["reasonRefusal"], "trop loin");
        assert!(body.get("meetingPlace").is_none());
        assert!(body.get("idContact").is_none());
    }

    #[test]
    fn test_edit_user_skips_blank_fields() {
        let req = EditUserRequest {
            phone_number: Some("0470".into()),
            version_number: VersionNumber::new(2),
            ..Default::default()
        };

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["phoneNumber"], "0470");
        assert_eq!(body["versionNumber"], 2);
        assert!(body.get("newPassword").is_none());
    }

    #[test]
    fn test_create_stage_date_format() {
        let req = CreateStageRequest {
            internship_project: "Compilateur".into(),
            internship_supervisor_id: 3,
            contact: 9,
            signature_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        };

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["signatureDate"], "2024-05-02");
        assert_eq!(body["internshipSupervisorId"], 3);
    }
}
