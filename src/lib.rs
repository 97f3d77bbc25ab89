// Sparrow Movies 电影列表
//
// 本库提供电影列表视图的核心功能，包括：
// - 查询参数模型
// - YTS 目录 API 客户端
// - 视图状态与渲染
// - HTTP 接口

pub mod api;
pub mod config;
pub mod external;
pub mod models;
pub mod view;
