use certiflow::agent::build_agent;
use certiflow::config::Config;
use certiflow::utils::logging;
use certiflow::{Console, IssuanceStatus, SubmissionForm};

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_issue_single_certificate() {
    // 初始化日志
    logging::init(true);

    // 加载配置（CERTIFLOW_CONFIG 或环境变量）
    let config = Config::load().expect("加载配置失败");

    // 创建智能体客户端
    let agent = build_agent(&config).expect("创建智能体客户端失败");
    let mut console = Console::new(&config, agent);

    // 注意：请改成自己能收到邮件的地址
    let form = SubmissionForm::new(
        "Integration Test",
        "integration-test@example.com",
        "CertiFlow Smoke Test",
        "2026-02-15",
    );

    let record = console.submit(&form).await.expect("提交失败");

    assert_eq!(record.status, IssuanceStatus::Success, "签发应该成功: {}", record.appreciation_message);
    assert!(!record.appreciation_message.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_agent_connection() {
    // 初始化日志
    logging::init(true);

    // 加载配置
    let config = Config::load().expect("加载配置失败");

    // 测试智能体连接
    let agent = build_agent(&config).expect("创建智能体客户端失败");
    let result = agent
        .invoke("Reply with a short greeting. Do not send any email.", &config.agent_id)
        .await;

    assert!(result.is_ok(), "应该能够成功连接智能体");
}
