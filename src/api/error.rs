// ==========================================
// 清运运营报表分析引擎 - API层错误类型
// ==========================================
// 职责: 把数据源层/导出层错误转换为报表调用方可读的错误
// 说明: 计算核心本身无错误; API 层错误只有三个来源:
//       参数校验 / 外部取数 / 导出写缓冲
// ==========================================

use crate::engine::ExportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 参数校验错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ===== 取数错误 (唯一的上游失败来源) =====
    #[error("取数失败: {0}")]
    FetchFailed(String),

    #[error("鉴权失败: {0}")]
    Unauthorized(String),

    // ===== 导出错误 =====
    #[error("导出失败: {0}")]
    Export(#[from] ExportError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 保留鉴权错误的区分度, 其余统一归为取数失败
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            RepositoryError::Network(msg) => ApiError::FetchFailed(format!("网络错误: {}", msg)),
            RepositoryError::Timeout(msg) => ApiError::FetchFailed(format!("查询超时: {}", msg)),
            RepositoryError::Backend(msg) => ApiError::FetchFailed(msg),
            RepositoryError::InvalidQuery(msg) => ApiError::InvalidInput(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
