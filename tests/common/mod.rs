#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use certiflow::error::AgentError;
use certiflow::{AgentClient, AgentResponse, Config, Console};

/// 按脚本返回结果的智能体
///
/// 脚本用完后每次都返回成功，并记录收到的每条指令
#[derive(Default)]
pub struct ScriptedAgent {
    script: Mutex<VecDeque<Scripted>>,
    instructions: Mutex<Vec<String>>,
}

pub enum Scripted {
    Reply(AgentResponse),
    NetworkError,
    Hang,
}

impl ScriptedAgent {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_script(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            instructions: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.instructions.lock().unwrap().len()
    }

    pub fn instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentClient for ScriptedAgent {
    async fn invoke(&self, instruction: &str, _agent_id: &str) -> Result<AgentResponse, AgentError> {
        self.instructions.lock().unwrap().push(instruction.to_string());
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(resp)) => Ok(resp),
            Some(Scripted::NetworkError) => Err(AgentError::InvalidResponse("connection reset".into())),
            Some(Scripted::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(AgentResponse::message_only("too late"))
            }
            None => Ok(AgentResponse::delivered("Thank you for taking part.", "")),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        agent_timeout_secs: 1,
        ..Config::default()
    }
}

pub fn console_with(agent: Arc<ScriptedAgent>) -> Console {
    Console::new(&test_config(), agent)
}
