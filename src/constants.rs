// UI Constants
pub const APP_TITLE: &str = "Duke ChatBot";
pub const INPUT_PLACEHOLDER: &str = "Ask me anything";
pub const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const LOG_VIEW_CAPACITY: usize = 200;

// Endpoint Constants
pub const DEFAULT_BASE_URL: &str = "http://localhost:8060/answer/";

// Config Constants
pub const CONFIG_DIR_NAME: &str = "dukechat";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_BASENAME: &str = "dukechat";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
