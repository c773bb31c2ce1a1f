use anyhow::Result;
use squad_attendance::utils::logging;
use squad_attendance::{App, Config, QrPayload};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 二维码：命令行第一个参数，其次 QR_CODE 环境变量
    let raw_qr = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("QR_CODE").ok())
        .unwrap_or_default();
    let qr = QrPayload::new(&raw_qr)?;

    // 初始化并运行应用
    let _outcomes = App::initialize(config).run(&qr).await?;

    Ok(())
}
