//! 厕位卫生监控 HTTP API（薄适配层）。
//!
//! 只做请求解析、作用域构造和错误码映射，业务全部在能力 crate 中：
//! 告警（sanimon-alerts）、统计（sanimon-analytics）、写入（sanimon-intake）。

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::{build_app, create_api_router};
pub use state::{AppState, Clock};
