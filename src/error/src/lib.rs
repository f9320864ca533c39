//! 游戏错误处理模块
//!
//! Errors raised by the console layer while collecting player input. The
//! combat rules themselves never fail: invalid targets are contract
//! violations and an empty potion bag is a no-op.

use thiserror::Error;

/// 游戏运行过程中可能出现的错误类型
#[derive(Debug, Error)]
pub enum GameError {
    /// 难度不在 1..=3 之间
    #[error("Invalid difficulty: {0} (expected 1, 2 or 3)")]
    InvalidDifficulty(String),

    /// 菜单或目标选择无效
    #[error("Invalid choice {input:?}: expected a number between 1 and {max}")]
    InvalidChoice { input: String, max: usize },

    /// 角色名称为空
    #[error("Player name cannot be empty")]
    EmptyName,

    /// 输入流已关闭
    #[error("Input closed")]
    InputClosed,

    /// IO操作错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GameError {
    /// Whether the prompt that produced this error should simply ask again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidDifficulty(_) | GameError::InvalidChoice { .. } | GameError::EmptyName
        )
    }
}

/// 处理游戏错误并转换为用户友好的消息
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::InvalidDifficulty(_) => "Please choose a level between 1 and 3...".to_string(),
        GameError::InvalidChoice { max, .. } => {
            format!("Please enter a number between 1 and {}.", max)
        }
        GameError::EmptyName => "Your character needs a name.".to_string(),
        GameError::InputClosed => "No more input, leaving the game.".to_string(),
        GameError::IoError(e) => match e.kind() {
            std::io::ErrorKind::BrokenPipe => "Output closed".to_string(),
            _ => format!("IO error: {}", e),
        },
    }
}
