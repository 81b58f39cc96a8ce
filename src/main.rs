pub mod adoptions;
pub mod db;
pub mod error;
pub mod events;
pub mod members;
pub mod models;
pub mod orders;
pub mod pets;
pub mod reservations;
pub mod validation;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;

use error::ApiError;
use models::{
    CreateMembershipTier, CreateMenuItem, CreateRoom, CreateStaff, MembershipTier, MenuItem, Room,
    Staff, UpdateMenuItem,
};
use validator::Validate;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub reservation_service: reservations::ReservationService,
    pub order_service: orders::OrderService,
    pub adoption_service: adoptions::AdoptionService,
    pub member_service: members::MemberService,
    pub pet_service: pets::PetService,
    pub event_service: events::EventService,
}

impl AppState {
    /// Wire up repositories and services around one pool
    pub fn new(db: PgPool) -> Self {
        let reservation_service = reservations::ReservationService::new(
            reservations::ReservationsRepository::new(db.clone()),
        );
        let order_service = orders::OrderService::new(orders::OrdersRepository::new(db.clone()));
        let adoption_service =
            adoptions::AdoptionService::new(adoptions::AdoptionsRepository::new(db.clone()));
        let member_service = members::MemberService::new(members::MembersRepository::new(db.clone()));
        let pet_service = pets::PetService::new(pets::PetsRepository::new(db.clone()));
        let event_service = events::EventService::new(events::EventsRepository::new(db.clone()));

        Self {
            db,
            reservation_service,
            order_service,
            adoption_service,
            member_service,
            pet_service,
            event_service,
        }
    }
}

/// Handler for POST /api/menu-items
/// Creates a new menu item
async fn create_menu_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateMenuItem>,
) -> Result<(StatusCode, Json<MenuItem>), ApiError> {
    tracing::debug!("Creating new menu item: {}", payload.name);

    payload.validate()?;

    if db::check_duplicate_menu_item(&state.db, &payload.name).await? {
        tracing::warn!("Attempt to create duplicate menu item: {}", payload.name);
        return Err(ApiError::Conflict {
            message: format!("Menu item with name '{}' already exists", payload.name),
        });
    }

    let item = sqlx::query_as::<_, MenuItem>(
        r#"
        INSERT INTO menu_item (name, category, base_price)
        VALUES ($1, $2, $3)
        RETURNING item_id, name, category, base_price
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(payload.base_price)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Successfully created menu item with id: {}", item.item_id);
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /api/menu-items
/// Retrieves all menu items
async fn get_all_menu_items(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, ApiError> {
    tracing::debug!("Fetching all menu items");

    let items = sqlx::query_as::<_, MenuItem>(
        r#"
        SELECT item_id, name, category, base_price
        FROM menu_item
        ORDER BY item_id
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    tracing::debug!("Retrieved {} menu items", items.len());
    Ok(Json(items))
}

/// Handler for GET /api/menu-items/:id
async fn get_menu_item_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MenuItem>, ApiError> {
    tracing::debug!("Fetching menu item with id: {}", id);

    let item = sqlx::query_as::<_, MenuItem>(
        r#"
        SELECT item_id, name, category, base_price
        FROM menu_item
        WHERE item_id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| {
        tracing::debug!("Menu item with id {} not found", id);
        ApiError::NotFound {
            resource: "Menu item".to_string(),
            id: id.to_string(),
        }
    })?;

    Ok(Json(item))
}

/// Handler for PUT /api/menu-items/:id
/// Updates an existing menu item
///
/// Changing the price here never rewrites lines already placed on orders;
/// those keep the price captured when they were added.
async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMenuItem>,
) -> Result<Json<MenuItem>, ApiError> {
    tracing::debug!("Updating menu item with id: {}", id);

    payload.validate()?;

    // Transaction keeps the existence check, duplicate check and update
    // atomic; any failure rolls everything back.
    let mut tx = state.db.begin().await?;

    let existing = sqlx::query_as::<_, MenuItem>(
        "SELECT item_id, name, category, base_price FROM menu_item WHERE item_id = $1",
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| {
        tracing::debug!("Menu item with id {} not found for update", id);
        ApiError::NotFound {
            resource: "Menu item".to_string(),
            id: id.to_string(),
        }
    })?;

    if let Some(ref new_name) = payload.name {
        if new_name != &existing.name {
            let duplicate_exists: Option<bool> = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM menu_item WHERE name = $1 AND item_id != $2)",
            )
            .bind(new_name)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            if duplicate_exists.unwrap_or(false) {
                tracing::warn!(
                    "Attempt to update menu item {} to duplicate name: {}",
                    id,
                    new_name
                );
                return Err(ApiError::Conflict {
                    message: format!("Menu item with name '{}' already exists", new_name),
                });
            }
        }
    }

    let updated = sqlx::query_as::<_, MenuItem>(
        r#"
        UPDATE menu_item
        SET name = $1,
            category = $2,
            base_price = $3
        WHERE item_id = $4
        RETURNING item_id, name, category, base_price
        "#,
    )
    .bind(payload.name.unwrap_or(existing.name))
    .bind(payload.category.or(existing.category))
    .bind(payload.base_price.unwrap_or(existing.base_price))
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Successfully updated menu item with id: {}", id);
    Ok(Json(updated))
}

/// Handler for DELETE /api/menu-items/:id
async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    tracing::debug!("Deleting menu item with id: {}", id);

    let referenced: Option<bool> =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM order_item WHERE item_id = $1)")
            .bind(id)
            .fetch_one(&state.db)
            .await?;

    if referenced.unwrap_or(false) {
        return Err(ApiError::Conflict {
            message: "Menu item is referenced by existing orders".to_string(),
        });
    }

    let result = sqlx::query("DELETE FROM menu_item WHERE item_id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        tracing::debug!("Menu item with id {} not found for deletion", id);
        return Err(ApiError::NotFound {
            resource: "Menu item".to_string(),
            id: id.to_string(),
        });
    }

    tracing::info!("Successfully deleted menu item with id: {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /api/tiers
async fn create_tier(
    State(state): State<AppState>,
    Json(payload): Json<CreateMembershipTier>,
) -> Result<(StatusCode, Json<MembershipTier>), ApiError> {
    payload.validate()?;

    let tier = sqlx::query_as::<_, MembershipTier>(
        r#"
        INSERT INTO membership_tier (tier_name, discount_rate)
        VALUES ($1, $2)
        RETURNING tier_id, tier_name, discount_rate
        "#,
    )
    .bind(&payload.tier_name)
    .bind(payload.discount_rate)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Created membership tier {}", tier.tier_id);
    Ok((StatusCode::CREATED, Json(tier)))
}

/// Handler for GET /api/tiers
async fn get_all_tiers(State(state): State<AppState>) -> Result<Json<Vec<MembershipTier>>, ApiError> {
    let tiers = sqlx::query_as::<_, MembershipTier>(
        "SELECT tier_id, tier_name, discount_rate FROM membership_tier ORDER BY tier_id",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(tiers))
}

/// Handler for POST /api/rooms
async fn create_room(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoom>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    payload.validate()?;

    let room = sqlx::query_as::<_, Room>(
        r#"
        INSERT INTO room (name, max_capacity)
        VALUES ($1, $2)
        RETURNING room_id, name, max_capacity
        "#,
    )
    .bind(&payload.name)
    .bind(payload.max_capacity)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Created room {}", room.room_id);
    Ok((StatusCode::CREATED, Json(room)))
}

/// Handler for GET /api/rooms
async fn get_all_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms =
        sqlx::query_as::<_, Room>("SELECT room_id, name, max_capacity FROM room ORDER BY room_id")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(rooms))
}

/// Handler for POST /api/staff
async fn create_staff(
    State(state): State<AppState>,
    Json(payload): Json<CreateStaff>,
) -> Result<(StatusCode, Json<Staff>), ApiError> {
    payload.validate()?;

    let staff = sqlx::query_as::<_, Staff>(
        r#"
        INSERT INTO staff (name, role)
        VALUES ($1, $2)
        RETURNING staff_id, name, role
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.role)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Created staff member {}", staff.staff_id);
    Ok((StatusCode::CREATED, Json(staff)))
}

/// Handler for GET /api/staff
async fn get_all_staff(State(state): State<AppState>) -> Result<Json<Vec<Staff>>, ApiError> {
    let staff = sqlx::query_as::<_, Staff>("SELECT staff_id, name, role FROM staff ORDER BY staff_id")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(staff))
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(db: PgPool) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let state = AppState::new(db);

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Reference data
        .route("/api/menu-items", post(create_menu_item))
        .route("/api/menu-items", get(get_all_menu_items))
        .route("/api/menu-items/:id", get(get_menu_item_by_id))
        .route("/api/menu-items/:id", put(update_menu_item))
        .route("/api/menu-items/:id", delete(delete_menu_item))
        .route("/api/tiers", post(create_tier).get(get_all_tiers))
        .route("/api/rooms", post(create_room).get(get_all_rooms))
        .route("/api/staff", post(create_staff).get(get_all_staff))
        // Reservations
        .route(
            "/api/reservations",
            post(reservations::book_reservation_handler).get(reservations::list_reservations_handler),
        )
        .route(
            "/api/reservations/:id",
            get(reservations::get_reservation_handler)
                .delete(reservations::cancel_reservation_handler),
        )
        .route(
            "/api/reservations/:id/status",
            patch(reservations::update_reservation_status_handler),
        )
        // Orders
        .route("/api/orders", post(orders::create_order_handler))
        .route(
            "/api/orders/:id",
            get(orders::get_order_handler).delete(orders::delete_order_handler),
        )
        .route("/api/orders/:id/items", post(orders::add_order_item_handler))
        .route("/api/orders/:id/finalize", post(orders::finalize_order_handler))
        .route("/api/orders/:id/pay", post(orders::pay_order_handler))
        // Members
        .route(
            "/api/members",
            post(members::create_member_handler).get(members::list_members_handler),
        )
        .route(
            "/api/members/:id",
            get(members::get_member_handler)
                .put(members::update_member_handler)
                .delete(members::delete_member_handler),
        )
        .route(
            "/api/members/:id/orders",
            get(orders::list_member_orders_handler),
        )
        // Pets and health records
        .route(
            "/api/pets",
            post(pets::create_pet_handler).get(pets::list_pets_handler),
        )
        .route(
            "/api/pets/:id",
            get(pets::get_pet_handler)
                .put(pets::update_pet_handler)
                .delete(pets::delete_pet_handler),
        )
        .route(
            "/api/pets/:id/health-records",
            post(pets::create_health_record_handler).get(pets::list_health_records_handler),
        )
        .route(
            "/api/health-records/:id",
            patch(pets::update_health_record_handler),
        )
        // Adoptions
        .route(
            "/api/adoptions/applications",
            post(adoptions::submit_application_handler).get(adoptions::list_applications_handler),
        )
        .route(
            "/api/adoptions/applications/:id",
            get(adoptions::get_application_handler).delete(adoptions::remove_application_handler),
        )
        .route(
            "/api/adoptions/applications/:id/review",
            patch(adoptions::review_application_handler),
        )
        .route(
            "/api/adoptions",
            post(adoptions::record_adoption_handler).get(adoptions::list_adoptions_handler),
        )
        // Events and registrations
        .route(
            "/api/events",
            post(events::create_event_handler).get(events::list_events_handler),
        )
        .route("/api/events/:event_id", get(events::get_event_handler))
        .route(
            "/api/events/:event_id/registrations",
            post(events::register_for_event_handler).get(events::list_event_registrations_handler),
        )
        .route(
            "/api/events/:event_id/registrations/:member_id/attendance",
            patch(events::update_attendance_handler),
        )
        .route(
            "/api/events/:event_id/registrations/:member_id/payment",
            patch(events::update_registration_payment_handler),
        )
        .route(
            "/api/events/:event_id/registrations/:member_id",
            delete(events::remove_registration_handler),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    // This enables the error!, warn!, info!, debug!, and trace! macros
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Pet Cafe API - Starting...");

    // Get configuration from environment variables
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(db_pool);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Pet Cafe API is running on http://{}", addr);

    axum::serve(listener, app).await.expect("Server error");
}
