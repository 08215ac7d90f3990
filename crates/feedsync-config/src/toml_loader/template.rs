//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# feedsync configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[server]
base_url = "http://127.0.0.1:8000/"
# cookie = "sessionid=...; csrftoken=..."   # or set FEEDSYNC_COOKIE
# csrf_cookie_name = "csrftoken"
# csrf_header = "X-CSRFToken"
# connect_timeout_secs = 10   # 1-120
# request_timeout_secs = 30   # 1-600

[polling]
# min_delay_ms = 1000         # 100-60000
# max_delay_ms = 15000        # >= min_delay_ms, <= 600000
# idle_timeout_ms = 60000     # 1000-3600000
# empty_growth = 1.7          # 1.0-10.0
# failure_growth = 2.0        # 1.0-10.0

[probe]
# enabled = true
# interval_secs = 5           # 1-300
# timeout_ms = 2000           # 100-30000

[display]
# max_entries = 500           # 10-100000
# show_timestamps = true

[logging]
# level = "INFO"              # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
