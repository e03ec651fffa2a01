//! # ChEMBL Activity Collector
//!
//! 从 ChEMBL REST API 分页拉取某个靶点的活性记录，按分子 ID 去重，
//! 收集到指定数量的唯一分子后输出结果表。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - `ActivitySource` 接口与基于 reqwest 的 `ChemblClient`
//!
//! ### ② 数据模型（Models）
//! - `models/` - 原始活性记录、分子记录、结果表
//!
//! ### ③ 业务能力层（Services）
//! - `Accumulator` - 按分子 ID 去重，先到先得
//! - `AccumulatingPaginator` - 翻页、跳过失败页、达到目标后停止
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 初始化、运行、输出统计与结果表

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use clients::{ActivitySource, ChemblClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{MoleculeRecord, RawActivity, ResultTable, ValuePolicy};
pub use orchestrator::{App, RunOutcome};
pub use services::{Accumulator, AccumulatingPaginator, CollectionReport, StopReason};
