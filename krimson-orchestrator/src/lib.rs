//! Krimson Orchestrator - upload handling, analysis runs and the HTTP API
//!
//! This crate ties the tracker together: it inspects uploaded projects, asks
//! the LLM for an assessment (or synthesizes one), records results in the
//! project history and serves everything over HTTP.
//!
//! # Architecture
//!
//! ```text
//! krimson-orchestrator/
//! ├── presentation/     # HTTP layer
//! │   ├── controllers/  # Request handlers
//! │   ├── models.rs     # DTOs with OpenAPI schemas
//! │   └── routes.rs     # API route definitions
//! ├── application/      # Analysis run and synthetic fallback
//! └── infrastructure/   # Archive inspection, stack detection
//! ```
//!
//! # API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/analysis/upload` | POST | Analyze an uploaded project |
//! | `/api/analysis/history/{projectId}` | GET | Project history |
//! | `/api/analysis/compare` | POST | Compare two analyses |
//! | `/api/activity/logs` | GET, POST | Activity log |
//! | `/api/health` | GET | Health check |

pub mod application;
pub mod infrastructure;
pub mod presentation;
