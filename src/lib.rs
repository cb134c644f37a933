//! Prokat Core - logic core of an equipment-rental administration app
//!
//! This crate packages everything the admin frontend needs short of pixels:
//! - A failover-aware API client that probes backend candidates and retries
//!   once against an alternate when the active one dies mid-flight
//! - A request-keyed query cache with in-flight deduplication and
//!   invalidate-on-write semantics
//! - Observable session state with pluggable token persistence
//! - Typed resource modules for rentals, equipment, expenses, customers,
//!   analytics, and authentication
//! - Form state machines with field-level validation and Russian messages
//! - Date-range filtering and RU-localized formatting helpers
//! - A reverse proxy binary that fronts the backend with permissive CORS
//!
//! ## Architecture
//!
//! The codebase is organized into focused modules:
//! - `models/` - Wire-format data structures
//! - `services/` - The API client, query cache, session state, and metrics
//! - `resources/` - Typed operations per backend collection
//! - `forms/` - Validation state machines for user input
//! - `handlers/` - HTTP handlers for the proxy binary
//! - `middleware/` - Custom middleware for the proxy binary
//! - `utils/` - Date, phone, and formatting helpers
//! - `config/` - Configuration structures and environment loading

// Core modules
pub mod config;
pub mod context;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod resources;
pub mod services;
pub mod utils;

// Re-export commonly used types and functions for convenience
pub use config::{ApiClientConfig, FailoverPolicy, ProxyConfig};
pub use context::AppContext;
pub use error::{ApiError, NetworkErrorKind};
pub use forms::{EquipmentForm, ExpenseForm, FormPhase, RentalForm};
pub use handlers::{create_openapi_spec, create_proxy_app, forward, health, version};
pub use middleware::RequestIdMiddleware;
pub use models::{
    CreateEquipmentDto, CreateExpenseDto, CreateRentalDto, Customer, Equipment,
    EquipmentUtilization, Expense, FinancialSummary, HealthResponse, LoginRequest, LoginResponse,
    MonthlyRevenue, Rental, RentalSource, RentalStatus, UpdateRentalDto, VersionResponse,
};
pub use services::{
    ApiClient, ApiClientMetrics, AuthStatus, FileTokenStore, MemoryTokenStore, QueryCache,
    QueryKey, SessionEvent, SessionState, TokenStore,
};
pub use utils::{filter_rentals, is_valid_phone, normalize_phone, DateFilter, DateRange};
