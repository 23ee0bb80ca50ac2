// ============================================================================
// TsCat - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文翻译内容定义
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 检查命令
    ("check.start", "开始检查翻译目录..."),
    ("check.found_catalogs", "发现 {} 个翻译目录"),
    ("check.catalog_clean", "未发现问题"),
    ("check.catalog_counts", "{} 个错误, {} 个警告, {} 条提示"),
    ("check.rule_count", "  {} {}: {}"),
    ("check.detail_hint", "  使用 --detail 查看每条消息"),
    ("check.file_failed", "无法处理 {}: {}"),
    ("check.all_good", "全部 {} 个目录检查通过（{} 个警告）"),
    ("check.failed_summary", "{} 个目录未通过（{} 个错误, {} 个警告）"),
    // 统计命令
    ("stats.title", "翻译进度"),
    ("stats.column.catalog", "目录"),
    ("stats.column.language", "语言"),
    ("stats.column.messages", "消息"),
    ("stats.column.finished", "已完成"),
    ("stats.column.unfinished", "未完成"),
    ("stats.column.vanished", "已消失"),
    ("stats.column.obsolete", "已废弃"),
    ("stats.column.completion", "完成度"),
    ("stats.all_complete", "所有目录均已翻译完成"),
    ("stats.total", "{} 个目录: {} / {} 条活跃消息已翻译 ({}%)"),
    // 查询命令
    ("lookup.not_found", "{} :: \"{}\" 没有已完成的翻译，回退到源字符串"),
    // 格式化命令
    ("fmt.unchanged", "已是规范格式: {}"),
    ("fmt.would_reformat", "需要重新格式化: {}"),
    ("fmt.reformatted", "已重新格式化: {}"),
    ("fmt.all_formatted", "全部 {} 个目录已是规范格式"),
    ("fmt.check_failed", "{} 个目录格式不规范"),
    ("fmt.check_hint", "运行 `tscat fmt` 重写这些目录"),
    ("fmt.done", "已重新格式化 {} 个目录"),
    // 提取命令
    ("extract.scanning", "正在扫描 {} 个源文件..."),
    ("extract.context_header", "{}（{} 条字符串）"),
    ("extract.summary", "共 {} 条可翻译字符串，{} 个上下文"),
    // 同步命令
    ("update.start", "开始更新翻译目录: {}"),
    ("update.extracted", "提取到 {} 条字符串（共 {} 个源文件）"),
    ("update.summary_title", "同步结果"),
    ("update.added", "新增消息: {}"),
    ("update.kept", "保留消息: {}"),
    ("update.relocated", "位置变化消息: {}"),
    ("update.revived", "恢复消息: {}"),
    ("update.vanished", "标记消失: {}"),
    ("update.removed", "删除消息: {}"),
    ("update.up_to_date", "翻译目录已是最新"),
    ("update.dry_run", "试运行，未写入目录"),
    ("update.written", "翻译目录已写入: {}"),
    // 进度
    ("progress.update", "进度: {}/{}"),
    // 调度器
    ("scheduler.fail_fast_triggered", "任务 {} 失败，取消其余任务"),
    ("scheduler.task_success", "任务 {} 完成，耗时 {}s"),
    ("scheduler.task_failed", "任务 {} 失败，耗时 {}s: {}"),
    ("scheduler.task_timeout", "任务 {} 超时（{}s）"),
    ("scheduler.task_cancelled", "任务 {} 已取消"),
    ("scheduler.batch_start", "开始执行 {} 个任务"),
    ("scheduler.task_join_error", "任务等待失败: {}"),
    ("scheduler.batch_complete", "{} / {} 个任务成功"),
    // 错误信息
    ("error.workspace_not_exist", "工作区路径不存在: {}"),
    ("error.path_not_exist", "路径不存在: {}"),
    ("error.no_catalogs_found", "在 {} 中未找到翻译目录"),
    ("error.no_sources_found", "在 {} 中未找到源文件，翻译目录未修改"),
    ("error.catalogs_failed", "{} 个目录无法处理"),
    // 初始化命令
    ("init.start", "开始初始化 TsCat 配置..."),
    ("init.config_exists", "配置文件已存在: {}"),
    ("init.use_force_hint", "使用 --force 参数强制覆盖现有配置文件"),
    ("init.config_created", "配置文件已创建: {}"),
    ("init.create_failed", "创建配置文件失败: {}"),
    ("init.next_steps", "接下来您可以在配置文件中调整规则级别和忽略模式"),
];
