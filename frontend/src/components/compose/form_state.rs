//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `ComposeForm` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换

use emailcraft::ApiResult;
use emailcraft::api::validate_generation;
use emailcraft_shared::Tone;
use emailcraft_shared::protocol::GenerateEmailRequest;
use leptos::prelude::*;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct ComposeForm {
    pub subject: RwSignal<String>,
    /// 未选择时为 `None`，提交时校验
    pub tone: RwSignal<Option<Tone>>,
}

impl ComposeForm {
    pub fn new() -> Self {
        Self {
            subject: RwSignal::new(String::new()),
            tone: RwSignal::new(None),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.subject.set(String::new());
        self.tone.set(None);
    }

    /// 从下拉框的值设置语气，空值表示未选择
    pub fn select_tone(&self, value: &str) {
        self.tone.set(value.parse().ok());
    }

    /// 客户端校验并转换为请求对象
    pub fn to_request(&self) -> ApiResult<GenerateEmailRequest> {
        validate_generation(&self.subject.get_untracked(), self.tone.get_untracked())
    }
}

impl Default for ComposeForm {
    fn default() -> Self {
        Self::new()
    }
}
