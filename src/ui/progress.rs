// ============================================================================
// TsCat - 批量处理进度条
// ============================================================================
//
// 文件: src/ui/progress.rs
// 职责: 批量检查时的终端进度显示
// 边界:
//   - ✅ indicatif 进度条创建与更新
//   - ✅ 非终端或禁用时退化为日志输出
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含任务调度
//
// ============================================================================

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

use crate::core::scheduler::ProgressCallback;
use crate::tf;
use crate::utils::constants::progress_chars;
use crate::utils::logger::Logger;

/// 批量处理进度显示
pub struct BatchProgress {
    bar: Option<ProgressBar>,
    verbose: bool,
}

impl BatchProgress {
    /// 创建进度显示
    ///
    /// 详细模式下逐条输出日志；否则仅在 stderr 为终端且未禁用时显示进度条。
    pub fn new(total: usize, show_progress: bool, verbose: bool) -> Self {
        let supports_refresh = !verbose && show_progress && atty::is(atty::Stream::Stderr);
        let bar = supports_refresh.then(|| {
            let bar = ProgressBar::new(total as u64);
            let style = ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars(progress_chars::BAR)
                .tick_chars(progress_chars::SPINNER);
            bar.set_style(style);
            bar
        });

        Self { bar, verbose }
    }

    /// 供调度器使用的进度回调
    pub fn callback(&self) -> Option<ProgressCallback> {
        if let Some(bar) = &self.bar {
            let bar = bar.clone();
            Some(Arc::new(move |completed: usize, _total: usize| {
                bar.set_position(completed as u64);
            }))
        } else if self.verbose {
            Some(Arc::new(|completed: usize, total: usize| {
                Logger::info(tf!("progress.update", completed, total));
            }))
        } else {
            None
        }
    }

    /// 结束并清除进度条
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
