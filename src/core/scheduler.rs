// ============================================================================
// TsCat - 异步任务调度器
// ============================================================================
//
// 文件: src/core/scheduler.rs
// 职责: 通用异步任务调度和并发控制
// 边界:
//   - ✅ 异步任务调度和执行
//   - ✅ 并发数量控制
//   - ✅ 任务超时管理
//   - ✅ 执行结果聚合
//   - ✅ 错误处理和传播
//   - ❌ 不包含具体业务逻辑
//   - ❌ 不包含 UI 显示逻辑
//   - ❌ 不包含配置管理
//
// ============================================================================

use anyhow::Result;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::utils::logger::Logger;
use crate::tf;

/// 任务执行结果枚举
#[derive(Debug, Clone)]
pub enum TaskResult<T> {
    /// 任务执行成功
    Success(T),
    /// 任务执行失败
    Failed(String),
    /// 任务执行超时
    Timeout,
    /// 任务被取消
    Cancelled,
}

/// 进度回调函数类型 (completed, total)
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// 调度器配置
#[derive(Clone)]
pub struct SchedulerConfig {
    /// 最大并发任务数
    pub max_concurrency: usize,
    /// 任务超时时长（None 表示不限制）
    pub timeout: Option<Duration>,
    /// 是否在第一个任务失败时停止所有任务
    pub fail_fast: bool,
    /// 是否显示详细日志
    pub verbose: bool,
    /// 进度回调函数 (completed, total)
    pub progress_callback: Option<ProgressCallback>,
}

impl std::fmt::Debug for SchedulerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerConfig")
            .field("max_concurrency", &self.max_concurrency)
            .field("timeout", &self.timeout)
            .field("fail_fast", &self.fail_fast)
            .field("verbose", &self.verbose)
            .field("has_progress_callback", &self.progress_callback.is_some())
            .finish()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: num_cpus::get(),
            timeout: None,
            fail_fast: false,
            verbose: false,
            progress_callback: None,
        }
    }
}

/// 异步任务调度器
pub struct AsyncTaskScheduler {
    /// 调度器配置
    config: SchedulerConfig,
    /// 并发控制信号量
    semaphore: Arc<Semaphore>,
    /// 是否应该停止执行
    should_stop: Arc<AtomicBool>,
    /// 已完成任务计数
    completed_count: Arc<AtomicUsize>,
    /// 本批次任务总数
    total_count: Arc<AtomicUsize>,
}

impl AsyncTaskScheduler {
    /// 创建新的调度器
    pub fn new(config: SchedulerConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
        Self {
            config,
            semaphore,
            should_stop: Arc::new(AtomicBool::new(false)),
            completed_count: Arc::new(AtomicUsize::new(0)),
            total_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 执行单个异步任务
    pub async fn execute_task<T, F>(&self, task_id: String, task: F) -> TaskResult<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        // 检查是否应该停止
        if self.should_stop.load(Ordering::SeqCst) {
            self.update_progress();
            return TaskResult::Cancelled;
        }

        // 获取信号量许可
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(_) => return TaskResult::Cancelled,
        };

        // 排队期间可能已有任务失败
        if self.should_stop.load(Ordering::SeqCst) {
            self.update_progress();
            return TaskResult::Cancelled;
        }

        let start_time = Instant::now();
        tracing::debug!("task started: {}", task_id);

        // 执行任务（可能有超时）
        let result = match self.config.timeout {
            Some(timeout_duration) => match timeout(timeout_duration, task).await {
                Ok(Ok(value)) => TaskResult::Success(value),
                Ok(Err(e)) => TaskResult::Failed(e.to_string()),
                Err(_) => TaskResult::Timeout,
            },
            None => match task.await {
                Ok(value) => TaskResult::Success(value),
                Err(e) => TaskResult::Failed(e.to_string()),
            },
        };

        let is_success = matches!(result, TaskResult::Success(_));
        self.update_progress();

        // 如果配置了 fail_fast 且任务失败，则停止所有其他任务
        if self.config.fail_fast && !is_success {
            self.should_stop.store(true, Ordering::SeqCst);
            if self.config.verbose {
                Logger::warn(tf!("scheduler.fail_fast_triggered", &task_id));
            }
        }

        // 输出任务结果日志
        if self.config.verbose {
            let duration = start_time.elapsed();
            match &result {
                TaskResult::Success(_) => {
                    Logger::info(tf!("scheduler.task_success", &task_id, duration.as_secs_f64()))
                }
                TaskResult::Failed(err) => Logger::error(tf!(
                    "scheduler.task_failed",
                    &task_id,
                    duration.as_secs_f64(),
                    err
                )),
                TaskResult::Timeout => {
                    Logger::warn(tf!("scheduler.task_timeout", &task_id, duration.as_secs_f64()))
                }
                TaskResult::Cancelled => Logger::warn(tf!("scheduler.task_cancelled", &task_id)),
            }
        }

        result
    }

    /// 并发执行多个任务，结果顺序与输入一致
    pub async fn execute_batch<T, F>(&self, tasks: Vec<(String, F)>) -> Vec<(String, TaskResult<T>)>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        if tasks.is_empty() {
            return Vec::new();
        }

        if self.config.verbose {
            Logger::info(tf!("scheduler.batch_start", tasks.len()));
        }

        // 重置停止标志和计数器
        self.should_stop.store(false, Ordering::SeqCst);
        self.completed_count.store(0, Ordering::SeqCst);
        self.total_count.store(tasks.len(), Ordering::SeqCst);

        let mut handles: Vec<(String, JoinHandle<TaskResult<T>>)> = Vec::new();
        for (task_id, task) in tasks {
            let scheduler = self.clone_for_task();
            let id = task_id.clone();
            let handle = tokio::spawn(async move { scheduler.execute_task(id, task).await });
            handles.push((task_id, handle));
        }

        // 等待所有任务完成
        let mut results = Vec::new();
        for (task_id, handle) in handles {
            match handle.await {
                Ok(result) => results.push((task_id, result)),
                Err(e) => {
                    Logger::error(tf!("scheduler.task_join_error", e.to_string()));
                    results.push((task_id, TaskResult::Failed(e.to_string())));
                }
            }
        }

        if self.config.verbose {
            let success_count = results
                .iter()
                .filter(|(_, result)| matches!(result, TaskResult::Success(_)))
                .count();
            Logger::info(tf!("scheduler.batch_complete", success_count, results.len()));
        }

        results
    }

    /// 获取当前执行进度 (completed, total)
    pub fn get_progress(&self) -> (usize, usize) {
        (
            self.completed_count.load(Ordering::SeqCst),
            self.total_count.load(Ordering::SeqCst),
        )
    }

    /// 更新计数器并调用进度回调
    fn update_progress(&self) {
        let completed = self.completed_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(callback) = &self.config.progress_callback {
            callback(completed, self.total_count.load(Ordering::SeqCst));
        }
    }

    /// 为任务执行创建调度器克隆
    fn clone_for_task(&self) -> Self {
        Self {
            config: self.config.clone(),
            semaphore: Arc::clone(&self.semaphore),
            should_stop: Arc::clone(&self.should_stop),
            completed_count: Arc::clone(&self.completed_count),
            total_count: Arc::clone(&self.total_count),
        }
    }
}
