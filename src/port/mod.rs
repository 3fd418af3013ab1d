//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!   scheduler, CLI ─▶│   SimilarityModel       │
//!                    │   (inbound port)        │
//!                    └───────────┬─────────────┘
//!                                │
//!        ┌───────────────┬───────┴───────┬───────────────┐
//!        ▼               ▼               ▼               ▼
//!  ┌───────────┐  ┌─────────────┐  ┌──────────┐  ┌──────────────┐
//!  │ Process   │  │ Generation  │  │  Clock   │  │ Training     │
//!  │ Runner    │  │ Store       │  │          │  │ Source       │
//!  └───────────┘  └─────────────┘  └──────────┘  └──────────────┘
//! ```

pub mod inbound;
pub mod outbound;
