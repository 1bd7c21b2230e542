use crate::{
    AppState,
    auth::{self, AuthUser},
    error::ApiError,
    models::{
        Achievement, CreateAchievementRequest, CreateEventRequest, CreateNewsRequest,
        CreatePersonRequest, CreatePhotoRequest, CreateProjectRequest, CreatePublicationRequest,
        CreateResearchAreaRequest, DashboardStats, Event, LoginRequest, MessageResponse, NewsItem,
        Person, Photo, Project, Publication, ResearchArea, SiteSettings, TokenResponse,
        UpdateAchievementRequest, UpdateEventRequest, UpdateNewsRequest, UpdatePersonRequest,
        UpdatePhotoRequest, UpdateProjectRequest, UpdatePublicationRequest,
        UpdateResearchAreaRequest,
    },
    store::{Document, Fields, ListQuery, SortOrder, StoreState},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

// --- Collection Names ---

const PEOPLE: &str = "people";
const PUBLICATIONS: &str = "publications";
const PROJECTS: &str = "projects";
const ACHIEVEMENTS: &str = "achievements";
const NEWS: &str = "news";
const EVENTS: &str = "events";
const PHOTO_GALLERY: &str = "photo_gallery";
const RESEARCH_AREAS: &str = "research_areas";
const SETTINGS: &str = "settings";

/// Fixed identity of the settings singleton inside its collection.
const SETTINGS_ID: Uuid = Uuid::nil();

// --- Record Conversion Helpers ---

/// Serializes a validated request payload into the store's loose field mapping.
fn to_fields(payload: &impl serde::Serialize) -> Result<Fields, ApiError> {
    let value = serde_json::to_value(payload)?;
    Ok(serde_json::from_value(value)?)
}

/// Rehydrates a stored document into its typed collection schema.
fn from_doc<T: DeserializeOwned>(doc: Document) -> Result<T, ApiError> {
    Ok(serde_json::from_value(doc.into_value())?)
}

fn into_records<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>, ApiError> {
    docs.into_iter().map(from_doc).collect()
}

// --- Generic CRUD Plumbing ---
//
// Every collection endpoint is the same thin composition: validate the typed
// payload, move it through the store adapter, rehydrate the typed record.
// These helpers hold that composition; the handlers below stay one-call thin.

async fn fetch_one<T: DeserializeOwned>(
    store: &StoreState,
    collection: &'static str,
    label: &'static str,
    id: Uuid,
) -> Result<Json<T>, ApiError> {
    match store.get(collection, id).await? {
        Some(doc) => Ok(Json(from_doc(doc)?)),
        None => Err(ApiError::NotFound(label)),
    }
}

async fn insert_one<T: DeserializeOwned>(
    store: &StoreState,
    collection: &'static str,
    payload: &impl serde::Serialize,
) -> Result<Json<T>, ApiError> {
    let doc = store.create(collection, to_fields(payload)?).await?;
    Ok(Json(from_doc(doc)?))
}

async fn merge_one<T: DeserializeOwned>(
    store: &StoreState,
    collection: &'static str,
    label: &'static str,
    id: Uuid,
    payload: &impl serde::Serialize,
) -> Result<Json<T>, ApiError> {
    match store.update(collection, id, to_fields(payload)?).await? {
        Some(doc) => Ok(Json(from_doc(doc)?)),
        None => Err(ApiError::NotFound(label)),
    }
}

async fn remove_one(
    store: &StoreState,
    collection: &'static str,
    label: &'static str,
    id: Uuid,
) -> Result<Json<MessageResponse>, ApiError> {
    if store.delete(collection, id).await? {
        Ok(Json(MessageResponse {
            message: format!("{label} deleted successfully"),
        }))
    } else {
        Err(ApiError::NotFound(label))
    }
}

// --- Filter Structs ---

/// PeopleFilter
///
/// Accepted query parameters for GET /api/people. `category` groups advisors,
/// team members and alumni.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PeopleFilter {
    pub category: Option<String>,
}

/// PublicationFilter
///
/// GET /api/publications parameters. `publication_type` and `year` are
/// equality filters applied by the store; `research_area` (tag membership) and
/// `search` (case-insensitive substring over title and authors) are applied
/// in-process after retrieval.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PublicationFilter {
    pub publication_type: Option<String>,
    pub year: Option<i32>,
    pub research_area: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
}

/// ProjectFilter
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ProjectFilter {
    pub status: Option<String>,
    pub category: Option<String>,
}

/// AchievementFilter
#[derive(Deserialize, utoipa::IntoParams)]
pub struct AchievementFilter {
    pub category: Option<String>,
}

/// NewsFilter
///
/// GET /api/news parameters. `featured` maps to the stored `is_featured` flag;
/// `limit` caps the result set after sorting (newest first).
#[derive(Deserialize, utoipa::IntoParams)]
pub struct NewsFilter {
    pub featured: Option<bool>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
}

/// EventFilter
///
/// `upcoming=true` keeps only events whose start date is still in the future.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct EventFilter {
    pub upcoming: Option<bool>,
}

/// GalleryFilter
#[derive(Deserialize, utoipa::IntoParams)]
pub struct GalleryFilter {
    pub category: Option<String>,
}

// --- Service Handlers ---

/// root
///
/// [Public Route] Service banner for the bare domain.
#[utoipa::path(get, path = "/", responses((status = 200, description = "Banner")))]
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "SESG Research API", "status": "online" }))
}

/// health_check
///
/// [Public Route] A simple, unauthenticated endpoint used for monitoring and
/// load balancer checks.
#[utoipa::path(get, path = "/api/health", responses((status = 200, description = "Liveness payload")))]
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "message": "SESG Research API is working" }))
}

/// login
///
/// [Public Route] The single-admin login. Delegates the credential comparison
/// and token signing to the issuer; any mismatch surfaces as 401.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Incorrect username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = auth::issue_token(&payload.username, &payload.password, &state.config)?;
    tracing::info!("admin login for '{}'", payload.username);
    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user_role: "admin".to_string(),
    }))
}

/// get_dashboard_stats
///
/// [Admin Route] Compiles per-collection record totals for the admin dashboard.
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses((status = 200, description = "Stats", body = DashboardStats))
)]
pub async fn get_dashboard_stats(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(DashboardStats {
        total_people: state.store.count(PEOPLE).await?,
        total_publications: state.store.count(PUBLICATIONS).await?,
        total_projects: state.store.count(PROJECTS).await?,
        total_achievements: state.store.count(ACHIEVEMENTS).await?,
        total_news: state.store.count(NEWS).await?,
    }))
}

// --- Settings ---

/// get_settings
///
/// [Public Route] The site-wide configuration singleton. An empty mapping is
/// returned when nothing has been stored yet.
#[utoipa::path(
    get,
    path = "/api/settings",
    responses((status = 200, description = "Settings", body = SiteSettings))
)]
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<SiteSettings>, ApiError> {
    let doc = state.store.get(SETTINGS, SETTINGS_ID).await?;
    Ok(Json(SiteSettings(
        doc.map(|d| d.fields).unwrap_or_default(),
    )))
}

/// update_settings
///
/// [Admin Route] Merges the submitted keys into the settings singleton.
/// Existing keys not present in the payload are preserved (merge, not replace).
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = SiteSettings,
    responses((status = 200, description = "Merged settings", body = SiteSettings))
)]
pub async fn update_settings(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SiteSettings>,
) -> Result<Json<SiteSettings>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    let doc = state.store.upsert(SETTINGS, SETTINGS_ID, payload.0).await?;
    Ok(Json(SiteSettings(doc.fields)))
}

// --- People ---

/// get_people
///
/// [Public Route] Lists group members, optionally narrowed to one category.
#[utoipa::path(
    get,
    path = "/api/people",
    params(PeopleFilter),
    responses((status = 200, description = "People", body = [Person]))
)]
pub async fn get_people(
    State(state): State<AppState>,
    Query(filter): Query<PeopleFilter>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let query = ListQuery::new()
        .maybe_filter("category", filter.category)
        .order_by("created_at", SortOrder::Desc);
    let docs = state.store.list(PEOPLE, &query).await?;
    Ok(Json(into_records(docs)?))
}

/// get_person
#[utoipa::path(
    get,
    path = "/api/people/{id}",
    params(("id" = Uuid, Path, description = "Person ID")),
    responses((status = 200, description = "Found", body = Person), (status = 404, description = "Not Found"))
)]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Person>, ApiError> {
    fetch_one(&state.store, PEOPLE, "Person", id).await
}

/// create_person
///
/// [Admin Route] Adds a group member record.
#[utoipa::path(
    post,
    path = "/api/people",
    request_body = CreatePersonRequest,
    responses((status = 200, description = "Created", body = Person))
)]
pub async fn create_person(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePersonRequest>,
) -> Result<Json<Person>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    insert_one(&state.store, PEOPLE, &payload).await
}

/// update_person
#[utoipa::path(
    put,
    path = "/api/people/{id}",
    params(("id" = Uuid, Path, description = "Person ID")),
    request_body = UpdatePersonRequest,
    responses((status = 200, description = "Updated", body = Person), (status = 404, description = "Not Found"))
)]
pub async fn update_person(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePersonRequest>,
) -> Result<Json<Person>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    merge_one(&state.store, PEOPLE, "Person", id, &payload).await
}

/// delete_person
#[utoipa::path(
    delete,
    path = "/api/people/{id}",
    params(("id" = Uuid, Path, description = "Person ID")),
    responses((status = 200, description = "Deleted", body = MessageResponse), (status = 404, description = "Not Found"))
)]
pub async fn delete_person(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    remove_one(&state.store, PEOPLE, "Person", id).await
}

// --- Publications ---

/// get_publications
///
/// [Public Route] Lists publications, newest year first. Type and year are
/// store-level equality filters; research-area membership and free-text search
/// run in-process over the retrieved set, then the cap is applied.
#[utoipa::path(
    get,
    path = "/api/publications",
    params(PublicationFilter),
    responses((status = 200, description = "Publications", body = [Publication]))
)]
pub async fn get_publications(
    State(state): State<AppState>,
    Query(filter): Query<PublicationFilter>,
) -> Result<Json<Vec<Publication>>, ApiError> {
    let query = ListQuery::new()
        .maybe_filter("publication_type", filter.publication_type)
        .maybe_filter("year", filter.year)
        .order_by("year", SortOrder::Desc);
    let docs = state.store.list(PUBLICATIONS, &query).await?;
    let mut publications: Vec<Publication> = into_records(docs)?;

    if let Some(area) = &filter.research_area {
        publications.retain(|p| p.research_areas.iter().any(|a| a == area));
    }
    if let Some(term) = &filter.search {
        let needle = term.to_lowercase();
        publications.retain(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.authors.iter().any(|a| a.to_lowercase().contains(&needle))
        });
    }
    if let Some(limit) = filter.limit {
        publications.truncate(limit.max(0) as usize);
    }

    Ok(Json(publications))
}

/// get_publication
#[utoipa::path(
    get,
    path = "/api/publications/{id}",
    params(("id" = Uuid, Path, description = "Publication ID")),
    responses((status = 200, description = "Found", body = Publication), (status = 404, description = "Not Found"))
)]
pub async fn get_publication(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Publication>, ApiError> {
    fetch_one(&state.store, PUBLICATIONS, "Publication", id).await
}

/// create_publication
#[utoipa::path(
    post,
    path = "/api/publications",
    request_body = CreatePublicationRequest,
    responses((status = 200, description = "Created", body = Publication))
)]
pub async fn create_publication(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePublicationRequest>,
) -> Result<Json<Publication>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    insert_one(&state.store, PUBLICATIONS, &payload).await
}

/// update_publication
#[utoipa::path(
    put,
    path = "/api/publications/{id}",
    params(("id" = Uuid, Path, description = "Publication ID")),
    request_body = UpdatePublicationRequest,
    responses((status = 200, description = "Updated", body = Publication), (status = 404, description = "Not Found"))
)]
pub async fn update_publication(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePublicationRequest>,
) -> Result<Json<Publication>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    merge_one(&state.store, PUBLICATIONS, "Publication", id, &payload).await
}

/// delete_publication
#[utoipa::path(
    delete,
    path = "/api/publications/{id}",
    params(("id" = Uuid, Path, description = "Publication ID")),
    responses((status = 200, description = "Deleted", body = MessageResponse), (status = 404, description = "Not Found"))
)]
pub async fn delete_publication(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    remove_one(&state.store, PUBLICATIONS, "Publication", id).await
}

// --- Projects ---

/// get_projects
///
/// [Public Route] Lists projects, newest first, with status/category filters.
#[utoipa::path(
    get,
    path = "/api/projects",
    params(ProjectFilter),
    responses((status = 200, description = "Projects", body = [Project]))
)]
pub async fn get_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<Vec<Project>>, ApiError> {
    let query = ListQuery::new()
        .maybe_filter("status", filter.status)
        .maybe_filter("category", filter.category)
        .order_by("created_at", SortOrder::Desc);
    let docs = state.store.list(PROJECTS, &query).await?;
    Ok(Json(into_records(docs)?))
}

/// get_project
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses((status = 200, description = "Found", body = Project), (status = 404, description = "Not Found"))
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, ApiError> {
    fetch_one(&state.store, PROJECTS, "Project", id).await
}

/// create_project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses((status = 200, description = "Created", body = Project))
)]
pub async fn create_project(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    insert_one(&state.store, PROJECTS, &payload).await
}

/// update_project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses((status = 200, description = "Updated", body = Project), (status = 404, description = "Not Found"))
)]
pub async fn update_project(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> Result<Json<Project>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    merge_one(&state.store, PROJECTS, "Project", id, &payload).await
}

/// delete_project
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses((status = 200, description = "Deleted", body = MessageResponse), (status = 404, description = "Not Found"))
)]
pub async fn delete_project(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    remove_one(&state.store, PROJECTS, "Project", id).await
}

// --- Achievements ---

/// get_achievements
#[utoipa::path(
    get,
    path = "/api/achievements",
    params(AchievementFilter),
    responses((status = 200, description = "Achievements", body = [Achievement]))
)]
pub async fn get_achievements(
    State(state): State<AppState>,
    Query(filter): Query<AchievementFilter>,
) -> Result<Json<Vec<Achievement>>, ApiError> {
    let query = ListQuery::new()
        .maybe_filter("category", filter.category)
        .order_by("created_at", SortOrder::Desc);
    let docs = state.store.list(ACHIEVEMENTS, &query).await?;
    Ok(Json(into_records(docs)?))
}

/// get_achievement
#[utoipa::path(
    get,
    path = "/api/achievements/{id}",
    params(("id" = Uuid, Path, description = "Achievement ID")),
    responses((status = 200, description = "Found", body = Achievement), (status = 404, description = "Not Found"))
)]
pub async fn get_achievement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Achievement>, ApiError> {
    fetch_one(&state.store, ACHIEVEMENTS, "Achievement", id).await
}

/// create_achievement
#[utoipa::path(
    post,
    path = "/api/achievements",
    request_body = CreateAchievementRequest,
    responses((status = 200, description = "Created", body = Achievement))
)]
pub async fn create_achievement(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateAchievementRequest>,
) -> Result<Json<Achievement>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    insert_one(&state.store, ACHIEVEMENTS, &payload).await
}

/// update_achievement
#[utoipa::path(
    put,
    path = "/api/achievements/{id}",
    params(("id" = Uuid, Path, description = "Achievement ID")),
    request_body = UpdateAchievementRequest,
    responses((status = 200, description = "Updated", body = Achievement), (status = 404, description = "Not Found"))
)]
pub async fn update_achievement(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAchievementRequest>,
) -> Result<Json<Achievement>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    merge_one(&state.store, ACHIEVEMENTS, "Achievement", id, &payload).await
}

/// delete_achievement
#[utoipa::path(
    delete,
    path = "/api/achievements/{id}",
    params(("id" = Uuid, Path, description = "Achievement ID")),
    responses((status = 200, description = "Deleted", body = MessageResponse), (status = 404, description = "Not Found"))
)]
pub async fn delete_achievement(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    remove_one(&state.store, ACHIEVEMENTS, "Achievement", id).await
}

// --- News ---

/// get_news
///
/// [Public Route] Lists news items, newest first. `featured`, `category` and
/// `status` are store-level equality filters; `limit` caps the sorted result.
#[utoipa::path(
    get,
    path = "/api/news",
    params(NewsFilter),
    responses((status = 200, description = "News", body = [NewsItem]))
)]
pub async fn get_news(
    State(state): State<AppState>,
    Query(filter): Query<NewsFilter>,
) -> Result<Json<Vec<NewsItem>>, ApiError> {
    let query = ListQuery::new()
        .maybe_filter("is_featured", filter.featured)
        .maybe_filter("category", filter.category)
        .maybe_filter("status", filter.status)
        .order_by("created_at", SortOrder::Desc)
        .limit(filter.limit);
    let docs = state.store.list(NEWS, &query).await?;
    Ok(Json(into_records(docs)?))
}

/// get_news_item
#[utoipa::path(
    get,
    path = "/api/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses((status = 200, description = "Found", body = NewsItem), (status = 404, description = "Not Found"))
)]
pub async fn get_news_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsItem>, ApiError> {
    fetch_one(&state.store, NEWS, "News item", id).await
}

/// create_news
#[utoipa::path(
    post,
    path = "/api/news",
    request_body = CreateNewsRequest,
    responses((status = 200, description = "Created", body = NewsItem))
)]
pub async fn create_news(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateNewsRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    insert_one(&state.store, NEWS, &payload).await
}

/// update_news
#[utoipa::path(
    put,
    path = "/api/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    request_body = UpdateNewsRequest,
    responses((status = 200, description = "Updated", body = NewsItem), (status = 404, description = "Not Found"))
)]
pub async fn update_news(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNewsRequest>,
) -> Result<Json<NewsItem>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    merge_one(&state.store, NEWS, "News item", id, &payload).await
}

/// delete_news
#[utoipa::path(
    delete,
    path = "/api/news/{id}",
    params(("id" = Uuid, Path, description = "News ID")),
    responses((status = 200, description = "Deleted", body = MessageResponse), (status = 404, description = "Not Found"))
)]
pub async fn delete_news(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    remove_one(&state.store, NEWS, "News item", id).await
}

// --- Events ---

/// get_events
///
/// [Public Route] Lists events soonest-first. `upcoming=true` drops events
/// whose start date has already passed; the comparison runs in-process since
/// the store only supports equality filters.
#[utoipa::path(
    get,
    path = "/api/events",
    params(EventFilter),
    responses((status = 200, description = "Events", body = [Event]))
)]
pub async fn get_events(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let query = ListQuery::new().order_by("start_date", SortOrder::Asc);
    let docs = state.store.list(EVENTS, &query).await?;
    let mut events: Vec<Event> = into_records(docs)?;

    if filter.upcoming.unwrap_or(false) {
        let now = Utc::now();
        events.retain(|e| e.start_date >= now);
    }

    Ok(Json(events))
}

/// get_event
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses((status = 200, description = "Found", body = Event), (status = 404, description = "Not Found"))
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Event>, ApiError> {
    fetch_one(&state.store, EVENTS, "Event", id).await
}

/// create_event
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses((status = 200, description = "Created", body = Event))
)]
pub async fn create_event(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    insert_one(&state.store, EVENTS, &payload).await
}

/// update_event
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses((status = 200, description = "Updated", body = Event), (status = 404, description = "Not Found"))
)]
pub async fn update_event(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<Event>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    merge_one(&state.store, EVENTS, "Event", id, &payload).await
}

/// delete_event
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses((status = 200, description = "Deleted", body = MessageResponse), (status = 404, description = "Not Found"))
)]
pub async fn delete_event(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    remove_one(&state.store, EVENTS, "Event", id).await
}

// --- Photo Gallery ---

/// get_photos
#[utoipa::path(
    get,
    path = "/api/photo-gallery",
    params(GalleryFilter),
    responses((status = 200, description = "Photos", body = [Photo]))
)]
pub async fn get_photos(
    State(state): State<AppState>,
    Query(filter): Query<GalleryFilter>,
) -> Result<Json<Vec<Photo>>, ApiError> {
    let query = ListQuery::new()
        .maybe_filter("category", filter.category)
        .order_by("created_at", SortOrder::Desc);
    let docs = state.store.list(PHOTO_GALLERY, &query).await?;
    Ok(Json(into_records(docs)?))
}

/// get_photo
#[utoipa::path(
    get,
    path = "/api/photo-gallery/{id}",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses((status = 200, description = "Found", body = Photo), (status = 404, description = "Not Found"))
)]
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Photo>, ApiError> {
    fetch_one(&state.store, PHOTO_GALLERY, "Photo", id).await
}

/// create_photo
#[utoipa::path(
    post,
    path = "/api/photo-gallery",
    request_body = CreatePhotoRequest,
    responses((status = 200, description = "Created", body = Photo))
)]
pub async fn create_photo(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreatePhotoRequest>,
) -> Result<Json<Photo>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    insert_one(&state.store, PHOTO_GALLERY, &payload).await
}

/// update_photo
#[utoipa::path(
    put,
    path = "/api/photo-gallery/{id}",
    params(("id" = Uuid, Path, description = "Photo ID")),
    request_body = UpdatePhotoRequest,
    responses((status = 200, description = "Updated", body = Photo), (status = 404, description = "Not Found"))
)]
pub async fn update_photo(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePhotoRequest>,
) -> Result<Json<Photo>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    merge_one(&state.store, PHOTO_GALLERY, "Photo", id, &payload).await
}

/// delete_photo
#[utoipa::path(
    delete,
    path = "/api/photo-gallery/{id}",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses((status = 200, description = "Deleted", body = MessageResponse), (status = 404, description = "Not Found"))
)]
pub async fn delete_photo(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    remove_one(&state.store, PHOTO_GALLERY, "Photo", id).await
}

// --- Research Areas ---

/// get_research_areas
#[utoipa::path(
    get,
    path = "/api/research-areas",
    responses((status = 200, description = "Research areas", body = [ResearchArea]))
)]
pub async fn get_research_areas(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResearchArea>>, ApiError> {
    let query = ListQuery::new().order_by("created_at", SortOrder::Desc);
    let docs = state.store.list(RESEARCH_AREAS, &query).await?;
    Ok(Json(into_records(docs)?))
}

/// get_research_area
#[utoipa::path(
    get,
    path = "/api/research-areas/{id}",
    params(("id" = Uuid, Path, description = "Research area ID")),
    responses((status = 200, description = "Found", body = ResearchArea), (status = 404, description = "Not Found"))
)]
pub async fn get_research_area(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResearchArea>, ApiError> {
    fetch_one(&state.store, RESEARCH_AREAS, "Research area", id).await
}

/// create_research_area
#[utoipa::path(
    post,
    path = "/api/research-areas",
    request_body = CreateResearchAreaRequest,
    responses((status = 200, description = "Created", body = ResearchArea))
)]
pub async fn create_research_area(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateResearchAreaRequest>,
) -> Result<Json<ResearchArea>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    insert_one(&state.store, RESEARCH_AREAS, &payload).await
}

/// update_research_area
#[utoipa::path(
    put,
    path = "/api/research-areas/{id}",
    params(("id" = Uuid, Path, description = "Research area ID")),
    request_body = UpdateResearchAreaRequest,
    responses((status = 200, description = "Updated", body = ResearchArea), (status = 404, description = "Not Found"))
)]
pub async fn update_research_area(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateResearchAreaRequest>,
) -> Result<Json<ResearchArea>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    merge_one(&state.store, RESEARCH_AREAS, "Research area", id, &payload).await
}

/// delete_research_area
#[utoipa::path(
    delete,
    path = "/api/research-areas/{id}",
    params(("id" = Uuid, Path, description = "Research area ID")),
    responses((status = 200, description = "Deleted", body = MessageResponse), (status = 404, description = "Not Found"))
)]
pub async fn delete_research_area(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if role != "admin" {
        return Err(ApiError::Forbidden);
    }
    remove_one(&state.store, RESEARCH_AREAS, "Research area", id).await
}
