use anyhow::Result;
use chembl_activity_collector::utils::logging;
use chembl_activity_collector::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::load()?;

    // 初始化并运行应用
    let app = App::initialize(config)?;
    let outcome = app.run().await;
    app.print_table(&outcome.table);

    Ok(())
}
