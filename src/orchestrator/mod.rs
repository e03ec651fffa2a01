//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (初始化 / 运行 / 输出)
//!     ↓
//! services::AccumulatingPaginator (分页 + 过滤 + 去重)
//!     ↓
//! services::Accumulator (按分子 ID 去重存储)
//!     ↓
//! clients::ActivitySource (ChemblClient / 测试数据源)
//! ```

pub mod app;

pub use app::{App, RunOutcome};
