use reqwest::StatusCode;

/// Failure of a single backend exchange.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("backend rejected the request: {0}")]
    Rejected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a user-initiated flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("input is empty")]
    EmptyInput,

    #[error("no ingredients to cook with")]
    NoIngredients,

    #[error("no recipe on this tab")]
    NoRecipe,

    #[error("no ingredients recognized in the photo")]
    NothingRecognized,
}

impl FlowError {
    /// Message shown next to the UI element the failure belongs to.
    pub fn user_message(&self) -> &'static str {
        match self {
            FlowError::Api(_) => messages::GENERIC_FAILURE,
            FlowError::EmptyInput => messages::EMPTY_INPUT,
            FlowError::NoIngredients => messages::NO_INGREDIENTS,
            FlowError::NoRecipe => messages::NO_RECIPE,
            FlowError::NothingRecognized => messages::NOTHING_RECOGNIZED,
        }
    }
}

/// User-facing texts. Technical details only go to the log.
pub mod messages {
    pub const GENERIC_FAILURE: &str = "操作失败，请稍后重试。";
    pub const GENERATION_FAILED: &str =
        "生成菜谱失败，请检查后端服务是否开启，或查看日志获取更多信息。";
    pub const OPTIMIZATION_FAILED: &str = "优化菜谱失败，请稍后重试。";
    pub const ANALYSIS_FAILED: &str =
        "图片识别失败，请检查后端服务是否开启，或查看日志获取更多信息。";
    pub const IMAGE_FAILED: &str = "生成图片失败，请稍后重试。";

    pub const EMPTY_INPUT: &str = "请先描述您想做的菜。";
    pub const NO_INGREDIENTS: &str = "请先识别或添加一些食材";
    pub const NO_RECIPE: &str = "请先生成菜谱，再生成菜品图片。";
    pub const NOTHING_RECOGNIZED: &str = "没有识别到食材，请换一张图片或手动添加食材。";

    pub const REPLY_GENERATING: &str = "我来为您生成菜谱...";
    pub const REPLY_GENERATION_FAILED: &str =
        "抱歉，生成菜谱时遇到了问题。您也可以点击下方的\"生成菜谱\"按钮重试。";
    pub const REPLY_OPTIMIZATION_FAILED: &str = "抱歉，优化菜谱时遇到了问题，请稍后重试。";
    pub const REPLY_UPLOAD_FIRST: &str =
        "请先上传一张包含食材的图片，我来帮您识别食材并生成菜谱。";
    pub const REPLY_ACK_TEXT: &str = "我已经收到您的消息。如果您想生成菜谱，请告诉我您的食材和需求，或点击\"生成菜谱\"按钮。";
    pub const REPLY_ACK_IMAGE: &str =
        "我已经收到您的消息。如果您想生成菜谱，请告诉我您的需求，或点击\"生成菜谱\"按钮。";

    pub fn reply_optimized(request: &str) -> String {
        format!("我已经根据您的需求\"{request}\"优化了菜谱。新的菜谱已经体现了您要求的改进。")
    }
}
