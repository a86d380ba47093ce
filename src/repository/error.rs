// ==========================================
// 清运运营报表分析引擎 - 数据源层错误类型
// ==========================================
// 职责: 外部取数失败的错误分类 (网络/鉴权/超时/后端)
// 说明: 取数是本系统唯一的可失败环节, 取数失败直接上抛,
//       绝不对失败或不完整的快照做部分汇总
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 数据源层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 网络/传输错误 =====
    #[error("网络错误: {0}")]
    Network(String),

    #[error("查询超时: {0}")]
    Timeout(String),

    // ===== 鉴权错误 =====
    #[error("鉴权失败: {0}")]
    Unauthorized(String),

    // ===== 后端错误 =====
    #[error("后端查询失败: {0}")]
    Backend(String),

    #[error("无效查询参数: {0}")]
    InvalidQuery(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
