use crate::state::Language;

/// Static display strings for one language. Pure lookup, no logic.
pub struct UiText {
    pub app_title: &'static str,
    pub tagline: &'static str,

    pub header_idea: &'static str,
    pub header_review: &'static str,
    pub header_score: &'static str,
    pub header_dashboard: &'static str,

    pub prompt_menu: &'static str,
    pub prompt_idea: &'static str,
    pub prompt_feedback: &'static str,
    pub prompt_edit: &'static str,

    pub menu_submit: &'static str,
    pub menu_refine: &'static str,
    pub menu_edit: &'static str,
    pub menu_analyze: &'static str,
    pub menu_back: &'static str,
    pub menu_continue: &'static str,
    pub menu_restart: &'static str,
    pub menu_toggle_language: &'static str,
    pub menu_quit: &'static str,

    pub loading_generate: &'static str,
    pub loading_refine: &'static str,
    pub loading_evaluate: &'static str,
    pub loading_breakdown: &'static str,
    pub loading_translate: &'static str,

    pub error_generate: &'static str,
    pub error_refine: &'static str,
    pub error_evaluate: &'static str,
    pub error_translate: &'static str,

    pub label_relevance: &'static str,
    pub label_creativity: &'static str,
    pub label_feedback: &'static str,
    pub label_original_idea: &'static str,
    pub label_scene: &'static str,
    pub label_image_prompt: &'static str,
    pub label_video_prompt: &'static str,

    pub empty_breakdown_notice: &'static str,
    pub confirm_restart: &'static str,
}

pub static EN: UiText = UiText {
    app_title: "CineScript",
    tagline: "Turn a one-line idea into a shot-ready production plan.",

    header_idea: "Your Idea",
    header_review: "Script Review",
    header_score: "Quality Score",
    header_dashboard: "Production Breakdown",

    prompt_menu: "What next?",
    prompt_idea: "Describe your video idea:",
    prompt_feedback: "What should change?",
    prompt_edit: "Edit the script in your editor",

    menu_submit: "Write my script",
    menu_refine: "Refine with AI feedback",
    menu_edit: "Edit manually",
    menu_analyze: "Analyze quality",
    menu_back: "Back to editing",
    menu_continue: "Generate production breakdown",
    menu_restart: "Start over",
    menu_toggle_language: "切换到中文 (Switch to Chinese)",
    menu_quit: "Quit",

    loading_generate: "Writing your script...",
    loading_refine: "Refining the script...",
    loading_evaluate: "Analyzing the script...",
    loading_breakdown: "Breaking the script into shots...",
    loading_translate: "Translating script...",

    error_generate: "Failed to generate script. Please check your API key or try again.",
    error_refine: "Failed to refine script. Please try again.",
    error_evaluate: "Failed to analyze script. Please try again.",
    error_translate: "Failed to translate script. Please try again.",

    label_relevance: "Relevance",
    label_creativity: "Creativity",
    label_feedback: "Feedback",
    label_original_idea: "Original idea",
    label_scene: "Scene",
    label_image_prompt: "Image prompt",
    label_video_prompt: "Video prompt",

    empty_breakdown_notice: "No segments were produced. Go back and try generating the breakdown again.",
    confirm_restart: "Discard everything and start over?",
};

pub static ZH: UiText = UiText {
    app_title: "CineScript",
    tagline: "把一句话的灵感变成可开拍的分镜方案。",

    header_idea: "你的创意",
    header_review: "剧本审阅",
    header_score: "质量评分",
    header_dashboard: "制作分镜",

    prompt_menu: "接下来做什么？",
    prompt_idea: "描述你的视频创意：",
    prompt_feedback: "想要修改什么？",
    prompt_edit: "在编辑器中修改剧本",

    menu_submit: "生成我的剧本",
    menu_refine: "根据反馈润色",
    menu_edit: "手动编辑",
    menu_analyze: "分析质量",
    menu_back: "返回编辑",
    menu_continue: "生成制作分镜",
    menu_restart: "重新开始",
    menu_toggle_language: "Switch to English (切换到英文)",
    menu_quit: "退出",

    loading_generate: "正在创作剧本...",
    loading_refine: "正在润色剧本...",
    loading_evaluate: "正在分析剧本...",
    loading_breakdown: "正在拆分镜头...",
    loading_translate: "正在翻译剧本...",

    error_generate: "剧本生成失败，请检查 API 密钥或重试。",
    error_refine: "剧本润色失败，请重试。",
    error_evaluate: "剧本分析失败，请重试。",
    error_translate: "剧本翻译失败，请重试。",

    label_relevance: "相关性",
    label_creativity: "创意性",
    label_feedback: "点评",
    label_original_idea: "原始创意",
    label_scene: "场景",
    label_image_prompt: "图像提示词",
    label_video_prompt: "视频提示词",

    empty_breakdown_notice: "没有生成任何分镜，请返回并重新生成。",
    confirm_restart: "放弃全部内容并重新开始？",
};

pub fn translations(language: Language) -> &'static UiText {
    match language {
        Language::En => &EN,
        Language::Zh => &ZH,
    }
}
