pub const CONFIG_FILE_PATH: &str = "config/config.yml";

// Environment overrides for the config file
pub const ENV_BITBUCKET_HOST: &str = "REMINDER_BITBUCKET_HOST";
pub const ENV_BITBUCKET_USER: &str = "REMINDER_BITBUCKET_USER";
pub const ENV_BITBUCKET_PASSWORD: &str = "REMINDER_BITBUCKET_PASSWORD";
pub const ENV_SLACK_URL: &str = "REMINDER_SLACK_URL";
pub const ENV_DEBUG: &str = "REMINDER_DEBUG";

pub const API_BASE_PATH: &str = "rest/api/1.0";

// Single-page fetch limits; the job never walks pagination
pub const PROJECT_PAGE_LIMIT: u32 = 100;
pub const REPO_PAGE_LIMIT: u32 = 100;
pub const PULL_REQUEST_PAGE_LIMIT: u32 = 10;

pub const DIGEST_HEADER_TEXT: &str = "Время поревьюить :party-parrot:";
