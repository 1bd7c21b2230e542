use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Auth Schemas ---

/// LoginRequest
///
/// Input payload for the single-admin login endpoint (POST /api/auth/login).
/// The credentials are compared against the configured admin identity; there is
/// no user table and no registration flow.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// TokenResponse
///
/// Output schema of a successful login: the signed bearer token plus the role
/// the frontend uses to unlock the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
    /// Always "admin"; the only role the system issues.
    pub user_role: String,
}

// --- Shared Output Schemas ---

/// MessageResponse
///
/// Generic confirmation payload returned by delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

/// DashboardStats
///
/// Output schema for the administrative dashboard (GET /api/dashboard/stats):
/// per-collection record totals.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct DashboardStats {
    pub total_people: i64,
    pub total_publications: i64,
    pub total_projects: i64,
    pub total_achievements: i64,
    pub total_news: i64,
}

/// SiteSettings
///
/// The singleton site-wide configuration mapping. Deliberately untyped: the
/// admin panel stores arbitrary keys (contact address, hero text, social
/// handles), and updates merge into the existing mapping rather than replace it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
#[schema(value_type = Object)]
pub struct SiteSettings(#[ts(type = "Record<string, any>")] pub Map<String, Value>);

// --- People ---

/// SocialLinks
///
/// Academic/social profile URLs attached to a person record.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SocialLinks {
    pub google_scholar: Option<String>,
    pub researchgate: Option<String>,
    pub orcid: Option<String>,
    pub linkedin: Option<String>,
}

/// Person
///
/// A member of the research group (advisor, team member or alum), as stored in
/// the `people` collection. `category` is a free-text tag the frontend groups by.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub research_interests: Vec<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub social_links: Option<SocialLinks>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreatePersonRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreatePersonRequest {
    pub name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub research_interests: Vec<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub social_links: Option<SocialLinks>,
}

/// UpdatePersonRequest
///
/// Partial update payload. All fields optional; only provided fields are merged
/// into the stored record.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdatePersonRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_interests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

// --- Publications ---

/// Publication
///
/// A journal article, conference paper or book chapter in the `publications`
/// collection. `research_areas` are free-text tags, not references.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Publication {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub publication_type: Option<String>,
    pub journal_name: Option<String>,
    pub conference_name: Option<String>,
    pub year: i32,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub research_areas: Vec<String>,
    pub citations: Option<i32>,
    #[serde(default)]
    pub is_open_access: bool,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreatePublicationRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreatePublicationRequest {
    pub title: String,
    pub authors: Vec<String>,
    pub publication_type: Option<String>,
    pub journal_name: Option<String>,
    pub conference_name: Option<String>,
    pub year: i32,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub pages: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub research_areas: Vec<String>,
    pub citations: Option<i32>,
    #[serde(default)]
    pub is_open_access: bool,
}

/// UpdatePublicationRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdatePublicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conference_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_areas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citations: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_open_access: Option<bool>,
}

// --- Projects ---

fn default_project_status() -> String {
    "ongoing".to_string()
}

/// Project
///
/// A research or development project. `status` is a free string; the group's
/// data uses "ongoing", "completed" and "planned". `funding` is a display
/// string (e.g. "2.5M BDT"), not an amount.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    #[serde(default = "default_project_status")]
    pub status: String,
    #[ts(type = "string | null")]
    pub start_date: Option<DateTime<Utc>>,
    #[ts(type = "string | null")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub research_areas: Vec<String>,
    pub funding: Option<String>,
    pub project_link: Option<String>,
    pub image: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateProjectRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    /// Defaults to "ongoing" when omitted.
    #[serde(default = "default_project_status")]
    pub status: String,
    #[ts(type = "string | null")]
    pub start_date: Option<DateTime<Utc>>,
    #[ts(type = "string | null")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub team_members: Vec<String>,
    #[serde(default)]
    pub research_areas: Vec<String>,
    pub funding: Option<String>,
    pub project_link: Option<String>,
    pub image: Option<String>,
}

/// UpdateProjectRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_areas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// --- Achievements ---

/// Achievement
///
/// An award, grant or milestone in the `achievements` collection.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    #[ts(type = "string | null")]
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub image: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateAchievementRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateAchievementRequest {
    pub title: String,
    pub description: Option<String>,
    #[ts(type = "string | null")]
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub image: Option<String>,
}

/// UpdateAchievementRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateAchievementRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// --- News ---

fn default_news_status() -> String {
    "published".to_string()
}

/// NewsItem
///
/// A news article in the `news` collection. `status` is "published" or "draft"
/// by convention; `is_featured` drives the homepage carousel.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NewsItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(default = "default_news_status")]
    pub status: String,
    #[ts(type = "string | null")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: bool,
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateNewsRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateNewsRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    /// Defaults to "published" when omitted.
    #[serde(default = "default_news_status")]
    pub status: String,
    #[ts(type = "string | null")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: bool,
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// UpdateNewsRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateNewsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// --- Events ---

/// Event
///
/// A seminar, workshop or conference appearance in the `events` collection.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[ts(type = "string")]
    pub start_date: DateTime<Utc>,
    #[ts(type = "string | null")]
    pub end_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateEventRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[ts(type = "string")]
    pub start_date: DateTime<Utc>,
    #[ts(type = "string | null")]
    pub end_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

/// UpdateEventRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// --- Photo Gallery ---

/// Photo
///
/// One image in the `photo_gallery` collection. The URL points at externally
/// hosted media; this backend stores no binary data.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct Photo {
    pub id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub category: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreatePhotoRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreatePhotoRequest {
    pub url: String,
    pub caption: Option<String>,
    pub category: Option<String>,
}

/// UpdatePhotoRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdatePhotoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// --- Research Areas ---

/// ResearchArea
///
/// A named research focus of the group. Other collections reference areas by
/// name only; no integrity between the tags and this collection is enforced.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ResearchArea {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

/// CreateResearchAreaRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CreateResearchAreaRequest {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// UpdateResearchAreaRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateResearchAreaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
