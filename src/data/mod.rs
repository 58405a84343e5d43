/// Data layer: table parsing, angle extraction and the field-aligned rotation.
///
/// Architecture:
/// ```text
///   run_45_deg.odt ──────────────┐
///        │                       │
///        ▼                       ▼
///   ┌──────────┐           ┌──────────┐
///   │  loader   │           │  angle   │  file name → degrees
///   └──────────┘           └──────────┘
///        │ RawTable               │
///        ▼                       │
///   ┌──────────┐                 │
///   │  rotate   │ ◄──────────────┘  M_long / M_trans + field axis
///   └──────────┘
///        │
///        ▼
///   RotatedFrame
/// ```

pub mod angle;
pub mod error;
pub mod loader;
pub mod model;
pub mod rotate;
