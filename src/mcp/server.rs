//! Food Diary MCP Server Implementation
//!
//! Implements the MCP server with all diary tools.

use std::path::PathBuf;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::auth::{AuthClient, Session};
use crate::catalog::{MealCatalog, PredefinedCatalog};
use crate::db::{migrations, Database};
use crate::diary::{DiaryStore, GoalTracker};
use crate::models::MacroGoals;
use crate::storage::{Storage, StorageError};
use crate::tools::status::{DiarySnapshot, StatusTracker};
use crate::tools::{auth, calendar, days, foods, goals};

/// Food Diary MCP Service
#[derive(Clone)]
pub struct DiaryService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    diary: Arc<StdMutex<DiaryStore>>,
    goals: Arc<StdMutex<GoalTracker>>,
    session: Arc<StdMutex<Session>>,
    catalog: Arc<dyn MealCatalog>,
    predefined: Arc<PredefinedCatalog>,
    auth_client: AuthClient,
    require_auth: bool,
    tool_router: ToolRouter<DiaryService>,
}

impl DiaryService {
    /// Load diary, goals and session from `storage` and build the service
    pub fn new(
        database_path: PathBuf,
        database: Database,
        storage: Arc<dyn Storage>,
        catalog: Arc<dyn MealCatalog>,
        auth_client: AuthClient,
        require_auth: bool,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            diary: Arc::new(StdMutex::new(DiaryStore::load(storage.clone())?)),
            goals: Arc::new(StdMutex::new(GoalTracker::load(storage.clone())?)),
            session: Arc::new(StdMutex::new(Session::load(storage)?)),
            catalog,
            predefined: Arc::new(PredefinedCatalog::default()),
            auth_client,
            require_auth,
            tool_router: Self::tool_router(),
        })
    }

    /// Diary tools are closed until login when auth is required
    fn ensure_authenticated(&self) -> Result<(), McpError> {
        if !self.require_auth || lock(&self.session, "Session")?.is_authenticated() {
            return Ok(());
        }
        Err(McpError::invalid_request(
            "Not logged in. Call login first.",
            None,
        ))
    }
}

fn lock<'a, T>(mutex: &'a StdMutex<T>, what: &str) -> Result<MutexGuard<'a, T>, McpError> {
    mutex
        .lock()
        .map_err(|_| McpError::internal_error(format!("{} state is unavailable", what), None))
}

fn json_content<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Food Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodParams {
    /// Food name to look up (English or Polish)
    pub query: String,
    /// Optional weight in grams to preview the scaled portion
    pub weight: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SuggestFoodsParams {
    /// Partial food name in English or Polish
    pub query: String,
}

// ============================================================================
// Diary Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetEntryParams {
    /// Date (ISO format: YYYY-MM-DD)
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    /// Date (ISO format: YYYY-MM-DD)
    pub date: String,
    /// breakfast, lunch or dinner
    pub meal_type: String,
    /// Food name as known to the catalog
    pub food_name: String,
    /// Grams eaten
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 { 100.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListEntriesParams {
    /// Start date, inclusive (optional)
    pub start_date: Option<String>,
    /// End date, inclusive (optional)
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalendarMonthParams {
    pub year: i32,
    /// Month number, 1-12
    pub month: u32,
    /// Date to highlight as selected (optional, YYYY-MM-DD)
    pub selected_date: Option<String>,
}

// ============================================================================
// Goal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetCalorieGoalParams {
    /// Daily calorie goal in kcal
    pub calorie_goal: u32,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetMacroGoalsParams {
    /// Daily protein goal in grams
    pub protein: f64,
    /// Daily carbohydrate goal in grams
    pub carbs: f64,
    /// Daily fat goal in grams
    pub fat: f64,
}

// ============================================================================
// Account Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RegisterParams {
    pub username: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl DiaryService {
    // --- Status ---

    #[tool(description = "Get the current status of the food diary service including build info, database status, catalog source and session state")]
    async fn diary_status(&self) -> Result<CallToolResult, McpError> {
        let (schema_version, needs_migration) = self
            .database
            .with_conn(|conn| {
                Ok((
                    migrations::get_schema_version(conn)?,
                    migrations::needs_migration(conn)?,
                ))
            })
            .map(|(v, n)| (Some(v), Some(n)))
            .unwrap_or((None, None));

        let snapshot = DiarySnapshot {
            catalog_source: self.catalog.source(),
            entry_count: lock(&self.diary, "Diary")?.entries().len(),
            authenticated: lock(&self.session, "Session")?.is_authenticated(),
            auth_required: self.require_auth,
            schema_version,
            needs_migration,
        };

        let tracker = self.status_tracker.lock().await;
        json_content(&tracker.get_status(snapshot))
    }

    #[tool(description = "Get step-by-step instructions for logging meals, reading the diary and managing goals. Call this when starting a food logging session.")]
    fn diary_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::DIARY_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(DIARY_INSTRUCTIONS)]))
    }

    // --- Foods ---

    #[tool(description = "List the built-in food table (nutrients per 100g)")]
    fn list_predefined_foods(&self) -> Result<CallToolResult, McpError> {
        json_content(&foods::list_predefined_foods(&self.predefined))
    }

    #[tool(description = "Look up a food by name in the configured catalog. Optionally preview the nutrition for a weight in grams.")]
    async fn search_food(&self, Parameters(p): Parameters<SearchFoodParams>) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let result = foods::search_food(self.catalog.as_ref(), &p.query, p.weight)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "Suggest food names matching a partial English or Polish name")]
    fn suggest_foods(&self, Parameters(p): Parameters<SuggestFoodsParams>) -> Result<CallToolResult, McpError> {
        json_content(&foods::suggest_foods(&p.query))
    }

    // --- Diary ---

    #[tool(description = "Get a day's meals grouped by breakfast, lunch and dinner with totals and goal status. Days with nothing logged come back empty.")]
    fn get_entry(&self, Parameters(p): Parameters<GetEntryParams>) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let result = {
            let diary = lock(&self.diary, "Diary")?;
            let tracker = lock(&self.goals, "Goals")?;
            days::get_entry(&diary, &tracker, &p.date)
        }
        .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "Log a meal: looks the food up in the catalog, scales it to the weight in grams and appends it to the day's breakfast, lunch or dinner")]
    async fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let food = foods::resolve_food(self.catalog.as_ref(), &p.food_name)
            .await
            .map_err(|e| McpError::internal_error(e, None))?
            .ok_or_else(|| McpError::internal_error(format!("Food not found: {}", p.food_name), None))?;

        let result = {
            let mut diary = lock(&self.diary, "Diary")?;
            let tracker = lock(&self.goals, "Goals")?;
            days::log_meal(&mut diary, &tracker, &p.date, &p.meal_type, &food, p.weight)
        }
        .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "List logged days with calorie totals and goal status, optionally within an inclusive date range")]
    fn list_entries(&self, Parameters(p): Parameters<ListEntriesParams>) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let result = {
            let diary = lock(&self.diary, "Diary")?;
            let tracker = lock(&self.goals, "Goals")?;
            days::list_entries(&diary, &tracker, p.start_date.as_deref(), p.end_date.as_deref())
        }
        .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "Render a month of the activity calendar. Days at or below the calorie goal are green, days above it red; the selected date is highlighted.")]
    fn calendar_month(&self, Parameters(p): Parameters<CalendarMonthParams>) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let result = {
            let diary = lock(&self.diary, "Diary")?;
            let tracker = lock(&self.goals, "Goals")?;
            calendar::calendar_month(&diary, &tracker, p.year, p.month, p.selected_date.as_deref())
        }
        .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    // --- Goals ---

    #[tool(description = "Get the calorie and macro goals")]
    fn get_goals(&self) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let tracker = lock(&self.goals, "Goals")?;
        let result = goals::get_goals(&tracker);
        json_content(&result)
    }

    #[tool(description = "Set the daily calorie goal in kcal")]
    fn set_calorie_goal(&self, Parameters(p): Parameters<SetCalorieGoalParams>) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let mut tracker = lock(&self.goals, "Goals")?;
        let result = goals::set_calorie_goal(&mut tracker, p.calorie_goal)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "Set the daily protein, carbs and fat goals in grams")]
    fn set_macro_goals(&self, Parameters(p): Parameters<SetMacroGoalsParams>) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let macro_goals = MacroGoals { protein: p.protein, carbs: p.carbs, fat: p.fat };
        let mut tracker = lock(&self.goals, "Goals")?;
        let result = goals::set_macro_goals(&mut tracker, macro_goals)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "Compare a day with the calorie and macro goals, including progress percentages")]
    fn goal_summary(&self, Parameters(p): Parameters<GetEntryParams>) -> Result<CallToolResult, McpError> {
        self.ensure_authenticated()?;
        let result = {
            let diary = lock(&self.diary, "Diary")?;
            let tracker = lock(&self.goals, "Goals")?;
            goals::goal_summary(&diary, &tracker, &p.date)
        }
        .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    // --- Accounts ---

    #[tool(description = "Log in with username and password; the session token is stored for later calls")]
    async fn login(&self, Parameters(p): Parameters<LoginParams>) -> Result<CallToolResult, McpError> {
        let result = auth::login(&self.auth_client, &self.session, &p.username, &p.password)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "Register a new account with username, email and password")]
    async fn register(&self, Parameters(p): Parameters<RegisterParams>) -> Result<CallToolResult, McpError> {
        let result = auth::register(&self.auth_client, &p.username, &p.email, &p.password)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "Log out and forget the stored session token")]
    fn logout(&self) -> Result<CallToolResult, McpError> {
        let mut session = lock(&self.session, "Session")?;
        let result = auth::logout(&mut session)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_content(&result)
    }

    #[tool(description = "Show whether a session token is stored and whether diary tools require one")]
    fn session_status(&self) -> Result<CallToolResult, McpError> {
        let session = lock(&self.session, "Session")?;
        let result = auth::session_status(&session, self.require_auth);
        json_content(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for DiaryService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "food-diary".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Food Diary".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Food Diary - meal logging against per-100g food data with calorie and macro goals. \
                 IMPORTANT: Call diary_instructions before logging food. \
                 Foods: list_predefined_foods, search_food, suggest_foods. \
                 Diary: get_entry, log_meal, list_entries, calendar_month. \
                 Goals: get_goals, set_calorie_goal, set_macro_goals, goal_summary. \
                 Accounts: register, login, logout, session_status. \
                 Status: diary_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rmcp::model::ErrorCode;
    use serde_json::Value;

    use crate::api::ApiClient;
    use crate::storage::{MemoryStorage, TOKEN_KEY};

    fn setup(storage: Arc<MemoryStorage>, require_auth: bool) -> (tempfile::TempDir, DiaryService) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diary.db");
        let database = Database::new(&path).unwrap();
        database.with_conn(|conn| migrations::run_migrations(conn)).unwrap();

        let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let service = DiaryService::new(
            path,
            database,
            storage,
            Arc::new(PredefinedCatalog::default()),
            AuthClient::new(api),
            require_auth,
        )
        .unwrap();
        (dir, service)
    }

    fn json(result: CallToolResult) -> Value {
        let text = &result.content[0].as_text().unwrap().text;
        serde_json::from_str(text).unwrap()
    }

    fn date(date: &str) -> Parameters<GetEntryParams> {
        Parameters(GetEntryParams { date: date.to_string() })
    }

    fn calorie_goal(calorie_goal: u32) -> Parameters<SetCalorieGoalParams> {
        Parameters(SetCalorieGoalParams { calorie_goal })
    }

    #[test]
    fn test_diary_tools_closed_without_token() {
        let (_dir, service) = setup(Arc::new(MemoryStorage::default()), true);

        let err = service.get_entry(date("2024-06-01")).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
        let err = service.set_calorie_goal(calorie_goal(1800)).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
        assert!(service.get_goals().is_err());

        let status = json(service.session_status().unwrap());
        assert_eq!(status["authenticated"], false);
        assert_eq!(status["auth_required"], true);
        assert!(service.list_predefined_foods().is_ok());
        assert!(service.suggest_foods(Parameters(SuggestFoodsParams { query: "salm".into() })).is_ok());
    }

    #[test]
    fn test_stored_token_opens_diary_until_logout() {
        let storage = Arc::new(MemoryStorage::default());
        storage.set(TOKEN_KEY, "tok-1").unwrap();
        let (_dir, service) = setup(storage.clone(), true);

        let entry = json(service.get_entry(date("2024-06-01")).unwrap());
        assert_eq!(entry["persisted"], false);
        assert_eq!(entry["total_calories"], 0);

        let goals = json(service.set_calorie_goal(calorie_goal(1800)).unwrap());
        assert_eq!(goals["calorieGoal"], 1800);
        assert_eq!(GoalTracker::load(storage.clone()).unwrap().goals().calorie_goal, 1800);

        let logout = json(service.logout().unwrap());
        assert_eq!(logout["was_logged_in"], true);
        assert!(service.get_entry(date("2024-06-01")).is_err());
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_log_meal_reaches_diary_and_status() {
        let storage = Arc::new(MemoryStorage::default());
        let (_dir, service) = setup(storage.clone(), false);

        let logged = json(
            service
                .log_meal(Parameters(LogMealParams {
                    date: "2024-06-02".into(),
                    meal_type: "breakfast".into(),
                    food_name: "oatmeal".into(),
                    weight: 200.0,
                }))
                .await
                .unwrap(),
        );
        assert_eq!(logged["meal"]["name"], "Owsianka");
        assert_eq!(logged["total_calories"], 742);

        let entry = json(service.get_entry(date("2024-06-02")).unwrap());
        assert_eq!(entry["persisted"], true);
        assert_eq!(entry["breakfast"]["meals"].as_array().unwrap().len(), 1);
        assert_eq!(DiaryStore::load(storage).unwrap().entries().len(), 1);

        let missing = service
            .log_meal(Parameters(LogMealParams {
                date: "2024-06-02".into(),
                meal_type: "lunch".into(),
                food_name: "kale".into(),
                weight: 100.0,
            }))
            .await;
        assert!(missing.is_err());

        let status = json(service.diary_status().await.unwrap());
        assert_eq!(status["entry_count"], 1);
    }
}
