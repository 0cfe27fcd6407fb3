//! StageTrack 共享模型
//!
//! 后端 REST API 的数据结构（只消费，不拥有）。
//! 字段命名遵循后端的 camelCase JSON 约定。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 认证头（后端期望原始 token，没有 "Bearer " 前缀）
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 统计数据中 "所有学年" 的键
pub const ALL_YEARS_KEY: &str = "allYears";

// =========================================================
// 乐观并发版本号 (Version Number)
// =========================================================

/// 乐观并发令牌
///
/// 客户端只能原样回传最后一次收到的值，因此这里故意不提供任何算术运算。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct VersionNumber(i32);

impl VersionNumber {
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl From<i32> for VersionNumber {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl Display for VersionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================
// 用户与角色 (Users & Roles)
// =========================================================

/// 访问者角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Anonymous,
    Student,
    Teacher,
    Administrative,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Anonymous,
        Role::Student,
        Role::Teacher,
        Role::Administrative,
    ];

    /// 界面上显示的角色名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Administrative => "Administratif",
            Role::Teacher => "Professeur",
            Role::Student => "Étudiant",
            Role::Anonymous => "Anonyme",
        }
    }

    /// 后端使用的字符串形式
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "ANONYMOUS",
            Role::Student => "STUDENT",
            Role::Teacher => "TEACHER",
            Role::Administrative => "ADMINISTRATIVE",
        }
    }

    /// 搜索结果中的排序权重
    pub fn listing_rank(&self) -> u8 {
        match self {
            Role::Administrative => 1,
            Role::Teacher => 2,
            Role::Student => 3,
            Role::Anonymous => 4,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 已认证用户身份
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    #[serde(rename = "idUser")]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub phone_number: String,
    pub registration_date: Option<String>,
    pub school_year: Option<String>,
    pub version_number: VersionNumber,
}

impl UserIdentity {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// 登录 / 注册成功后的响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserIdentity,
    pub token: String,
}

// =========================================================
// 企业 (Enterprises)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    pub id_enterprise: i32,
    pub trade_name: String,
    pub designation: Option<String>,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub street_number: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "isBlacklisted", default)]
    pub is_blacklisted: bool,
    pub blacklisted_reason: Option<String>,
    pub version_number: VersionNumber,
}

impl Enterprise {
    /// 商号 + 可选分部名
    pub fn display_name(&self) -> String {
        match self.designation.as_deref().filter(|d| !d.is_empty()) {
            Some(designation) => format!("{} - {}", self.trade_name, designation),
            None => self.trade_name.clone(),
        }
    }

    pub fn address(&self) -> String {
        format!(
            "{} {}, {} {}",
            self.street, self.street_number, self.postal_code, self.city
        )
    }
}

// =========================================================
// 联系 (Contacts)
// =========================================================

/// 联系状态生命周期：started → admitted → accepted / turned down / unsupervised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactStatus {
    Started,
    Admitted,
    Unsupervised,
    TurnedDown,
    Accepted,
    OnHold,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 6] = [
        ContactStatus::Started,
        ContactStatus::Admitted,
        ContactStatus::Unsupervised,
        ContactStatus::TurnedDown,
        ContactStatus::Accepted,
        ContactStatus::OnHold,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContactStatus::Started => "initié",
            ContactStatus::Admitted => "pris",
            ContactStatus::Unsupervised => "plus suivi",
            ContactStatus::TurnedDown => "refusé",
            ContactStatus::Accepted => "accepté",
            ContactStatus::OnHold => "suspendu",
        }
    }

    /// `statusCount` 中对应的键，例如 `number_turned_down`
    pub fn count_key(&self) -> &'static str {
        match self {
            ContactStatus::Started => "number_started",
            ContactStatus::Admitted => "number_admitted",
            ContactStatus::Unsupervised => "number_unsupervised",
            ContactStatus::TurnedDown => "number_turned_down",
            ContactStatus::Accepted => "number_accepted",
            ContactStatus::OnHold => "number_on_hold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id_contact: i32,
    #[serde(default)]
    pub user_id: i32,
    /// 企业 id
    pub enterprise: i32,
    pub contact_status: ContactStatus,
    pub meeting_place: Option<String>,
    pub reason_for_refusal: Option<String>,
    pub school_year: Option<String>,
    #[serde(rename = "enterpriseDTO")]
    pub enterprise_dto: Option<Enterprise>,
    #[serde(rename = "userDTO")]
    pub user_dto: Option<UserIdentity>,
    pub version_number: VersionNumber,
}

/// `GET /contact/all` 的响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyContacts {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub status_count: HashMap<String, u32>,
}

impl MyContacts {
    pub fn count(&self, status: ContactStatus) -> u32 {
        self.status_count
            .get(status.count_key())
            .copied()
            .unwrap_or(0)
    }
}

// =========================================================
// 实习负责人与实习 (Supervisors & Stages)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibleStage {
    #[serde(rename = "responsableId")]
    pub id: i32,
    pub last_name: String,
    pub first_name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: String,
    /// 企业 id
    pub enterprise: i32,
    #[serde(rename = "enterpriseDTO")]
    pub enterprise_dto: Option<Enterprise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id_stage: i32,
    pub internship_project: Option<String>,
    pub internship_supervisor_id: i32,
    #[serde(rename = "internshipSupervisorDTO")]
    pub internship_supervisor: Option<ResponsibleStage>,
    /// 联系 id
    pub contact: i32,
    pub signature_date: Option<String>,
    #[serde(default)]
    pub user_id: i32,
    pub version_number: VersionNumber,
}

// =========================================================
// 统计 (Statistics)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStageCount {
    pub with_stage: u32,
    pub without_stage: u32,
}

impl YearStageCount {
    pub fn total(&self) -> u32 {
        self.with_stage + self.without_stage
    }
}

/// 学年 → 有/无实习人数
pub type StageStats = BTreeMap<String, YearStageCount>;

/// 企业 id → (学年 → 实习学生数)
pub type EnterpriseStats = HashMap<String, BTreeMap<String, u32>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_wire_format() {
        let json = r#"{
            "idUser": 7,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada.lovelace@student.vinci.be",
            "role": "STUDENT",
            "phoneNumber": "0470000000",
            "registrationDate": "2024-02-01",
            "schoolYear": "2023-2024",
            "versionNumber": 3
        }"#;

        let user: UserIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.version_number, VersionNumber::new(3));
        assert_eq!(user.full_name(), "Lovelace Ada");
    }

    #[test]
    fn test_enterprise_blacklist_flag_name() {
        let json = r#"{
            "idEnterprise": 42,
            "tradeName": "Acme",
            "designation": "Bruxelles",
            "isBlacklisted": true,
            "blacklistedReason": "no answer",
            "versionNumber": 1
        }"#;

        let enterprise: Enterprise = serde_json::from_str(json).unwrap();
        assert!(enterprise.is_blacklisted);
        assert_eq!(enterprise.display_name(), "Acme - Bruxelles");

        let back = serde_json::to_value(&enterprise).unwrap();
        assert_eq!(back["isBlacklisted"], true);
    }

    #[test]
    fn test_status_count_lookup() {
        let json = r#"{
            "contacts": [],
            "statusCount": { "number_started": 2, "number_turned_down": 1 }
        }"#;

        let mine: MyContacts = serde_json::from_str(json).unwrap();
        assert_eq!(mine.count(ContactStatus::Started), 2);
        assert_eq!(mine.count(ContactStatus::TurnedDown), 1);
        assert_eq!(mine.count(ContactStatus::Admitted), 0);
    }
}
