//! 应用主流程 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：输出启动信息、构建 ChEMBL 客户端
//! 2. **采集**：委托 `AccumulatingPaginator` 完成分页、去重
//! 3. **输出**：打印统计信息和结果表预览
//!
//! 本层不做任何业务判断，分页循环中的失败也不会传播到这里。

use crate::clients::{ActivitySource, ChemblClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::ResultTable;
use crate::services::{AccumulatingPaginator, CollectionReport};
use crate::utils::logging::{log_startup, print_final_stats};

/// 一次运行的结果
#[derive(Debug)]
pub struct RunOutcome {
    pub table: ResultTable,
    pub report: CollectionReport,
}

/// 应用主结构
pub struct App<S = ChemblClient> {
    config: Config,
    paginator: AccumulatingPaginator<S>,
}

impl App<ChemblClient> {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        log_startup(&config);

        let client = ChemblClient::new(&config)?;
        Ok(Self::with_source(config, client))
    }
}

impl<S: ActivitySource> App<S> {
    /// 使用自定义数据源创建应用
    pub fn with_source(config: Config, source: S) -> Self {
        let paginator = AccumulatingPaginator::from_config(source, &config);
        Self { config, paginator }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> RunOutcome {
        let config = &self.config;
        let (accumulator, report) = self
            .paginator
            .collect_with_report(
                &config.target_chembl_id,
                config.page_size,
                config.required_molecules,
                config.max_offset,
            )
            .await;

        let table = ResultTable::from_accumulator(accumulator);
        print_final_stats(table.len(), config.required_molecules, &report);

        RunOutcome { table, report }
    }

    /// 把结果写到标准输出
    pub fn print_table(&self, table: &ResultTable) {
        println!("Total unique molecules collected: {}", table.len());
        if !table.is_empty() && self.config.preview_rows > 0 {
            print!("{}", table.render(self.config.preview_rows));
        }
    }
}
